use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use orgscope_core::{AppResult, OrganizationId};
use orgscope_domain::{Actor, DepartmentId, Role, RoleId, User, UserId};

use crate::DirectoryRepository;

#[derive(Default)]
pub(crate) struct FakeDirectoryRepository {
    users: HashMap<UserId, User>,
    roles: HashMap<RoleId, Role>,
    lookup_delay: Option<Duration>,
    report_lookups: AtomicUsize,
    department_lookups: AtomicUsize,
}

impl FakeDirectoryRepository {
    pub(crate) fn new(users: Vec<User>, roles: Vec<Role>) -> Self {
        Self {
            users: users.into_iter().map(|user| (user.id(), user)).collect(),
            roles: roles.into_iter().map(|role| (role.id(), role)).collect(),
            ..Self::default()
        }
    }

    pub(crate) fn with_lookup_delay(mut self, delay: Duration) -> Self {
        self.lookup_delay = Some(delay);
        self
    }

    pub(crate) fn report_lookups(&self) -> usize {
        self.report_lookups.load(Ordering::SeqCst)
    }

    pub(crate) fn department_lookups(&self) -> usize {
        self.department_lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DirectoryRepository for FakeDirectoryRepository {
    async fn list_direct_reports(
        &self,
        organization_id: OrganizationId,
        manager_id: UserId,
    ) -> AppResult<Vec<UserId>> {
        if let Some(delay) = self.lookup_delay {
            tokio::time::sleep(delay).await;
        }
        self.report_lookups.fetch_add(1, Ordering::SeqCst);

        let mut reports: Vec<UserId> = self
            .users
            .values()
            .filter(|user| {
                user.organization_id() == organization_id && user.manager_id() == Some(manager_id)
            })
            .map(User::id)
            .collect();
        reports.sort();
        Ok(reports)
    }

    async fn find_user_department(
        &self,
        organization_id: OrganizationId,
        user_id: UserId,
    ) -> AppResult<Option<DepartmentId>> {
        self.department_lookups.fetch_add(1, Ordering::SeqCst);

        Ok(self
            .users
            .get(&user_id)
            .filter(|user| user.organization_id() == organization_id)
            .and_then(User::department_id))
    }

    async fn find_actor(
        &self,
        organization_id: OrganizationId,
        user_id: UserId,
    ) -> AppResult<Option<Actor>> {
        Ok(self
            .users
            .get(&user_id)
            .filter(|user| user.organization_id() == organization_id)
            .map(|user| {
                let role = user
                    .role_id()
                    .and_then(|role_id| self.roles.get(&role_id))
                    .cloned();
                Actor::new(user.clone(), role)
            }))
    }
}

/// Management chain `a <- b <- c <- d`: d reports to c, c to b, b to a.
pub(crate) struct Chain {
    pub(crate) a: UserId,
    pub(crate) b: UserId,
    pub(crate) c: UserId,
    pub(crate) d: UserId,
    pub(crate) users: Vec<User>,
}

pub(crate) fn chain(organization_id: OrganizationId) -> Chain {
    let (a, b, c, d) = (UserId::new(), UserId::new(), UserId::new(), UserId::new());
    let users = vec![
        User::new(a, organization_id),
        User::new(b, organization_id).with_manager(a),
        User::new(c, organization_id).with_manager(b),
        User::new(d, organization_id).with_manager(c),
    ];

    Chain { a, b, c, d, users }
}
