use std::collections::HashMap;

use async_trait::async_trait;
use orgscope_application::DirectoryRepository;
use orgscope_core::{AppResult, OrganizationId};
use orgscope_domain::{Actor, DepartmentId, Role, RoleId, User, UserId};
use tokio::sync::RwLock;

use crate::DirectorySnapshot;


/// In-memory directory repository implementation.
#[derive(Debug, Default)]
pub struct InMemoryDirectoryRepository {
    users: RwLock<HashMap<(OrganizationId, UserId), User>>,
    roles: RwLock<HashMap<(OrganizationId, RoleId), Role>>,
}

impl InMemoryDirectoryRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository holding every role and user of a snapshot.
    pub fn from_snapshot(snapshot: DirectorySnapshot) -> AppResult<Self> {
        let (roles, users) = snapshot.into_parts()?;

        Ok(Self {
            users: RwLock::new(
                users
                    .into_iter()
                    .map(|user| ((user.organization_id(), user.id()), user))
                    .collect(),
            ),
            roles: RwLock::new(
                roles
                    .into_iter()
                    .map(|role| ((role.organization_id(), role.id()), role))
                    .collect(),
            ),
        })
    }

    /// Inserts or replaces a user.
    pub async fn insert_user(&self, user: User) {
        self.users
            .write()
            .await
            .insert((user.organization_id(), user.id()), user);
    }

    /// Inserts or replaces a role.
    pub async fn insert_role(&self, role: Role) {
        self.roles
            .write()
            .await
            .insert((role.organization_id(), role.id()), role);
    }
}

#[async_trait]
impl DirectoryRepository for InMemoryDirectoryRepository {
    async fn list_direct_reports(
        &self,
        organization_id: OrganizationId,
        manager_id: UserId,
    ) -> AppResult<Vec<UserId>> {
        let users = self.users.read().await;

        let mut reports: Vec<UserId> = users
            .iter()
            .filter_map(|((stored_organization_id, user_id), user)| {
                (stored_organization_id == &organization_id
                    && user.manager_id() == Some(manager_id))
                .then_some(*user_id)
            })
            .collect();
        reports.sort();

        Ok(reports)
    }

    async fn find_user_department(
        &self,
        organization_id: OrganizationId,
        user_id: UserId,
    ) -> AppResult<Option<DepartmentId>> {
        Ok(self
            .users
            .read()
            .await
            .get(&(organization_id, user_id))
            .and_then(User::department_id))
    }

    async fn find_actor(
        &self,
        organization_id: OrganizationId,
        user_id: UserId,
    ) -> AppResult<Option<Actor>> {
        let Some(user) = self
            .users
            .read()
            .await
            .get(&(organization_id, user_id))
            .cloned()
        else {
            return Ok(None);
        };

        let role = match user.role_id() {
            Some(role_id) => self
                .roles
                .read()
                .await
                .get(&(organization_id, role_id))
                .cloned(),
            None => None,
        };

        Ok(Some(Actor::new(user, role)))
    }
}
