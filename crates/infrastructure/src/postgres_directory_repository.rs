use async_trait::async_trait;
use orgscope_application::DirectoryRepository;
use orgscope_core::{AppError, AppResult, OrganizationId};
use orgscope_domain::{Actor, DepartmentId, Role, RoleGrantTable, RoleId, User, UserId};
use serde_json::Value;
use sqlx::{FromRow, PgPool};
use tracing::warn;
use uuid::Uuid;


/// PostgreSQL-backed organization directory.
///
/// Reads the `users` and `roles` tables created by `migrations/`; every query
/// is filtered by organization.
#[derive(Clone)]
pub struct PostgresDirectoryRepository {
    pool: PgPool,
}

impl PostgresDirectoryRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_user(
        &self,
        organization_id: OrganizationId,
        user_id: UserId,
    ) -> AppResult<Option<UserRow>> {
        sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, department_id, role_id, manager_id
            FROM users
            WHERE organization_id = $1 AND id = $2
            "#,
        )
        .bind(organization_id.as_uuid())
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load user '{user_id}': {error}")))
    }

    async fn find_role(
        &self,
        organization_id: OrganizationId,
        role_id: RoleId,
    ) -> AppResult<Option<Role>> {
        let row = sqlx::query_as::<_, RoleRow>(
            r#"
            SELECT id, name, is_system, permissions::text AS permissions
            FROM roles
            WHERE organization_id = $1 AND id = $2
            "#,
        )
        .bind(organization_id.as_uuid())
        .bind(role_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load role '{role_id}': {error}")))?;

        row.map(|row| row.into_role(organization_id)).transpose()
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    department_id: Option<Uuid>,
    role_id: Option<Uuid>,
    manager_id: Option<Uuid>,
}

impl UserRow {
    fn into_user(self, organization_id: OrganizationId) -> User {
        let mut user = User::new(UserId::from_uuid(self.id), organization_id);
        if let Some(department_id) = self.department_id {
            user = user.with_department(DepartmentId::from_uuid(department_id));
        }
        if let Some(role_id) = self.role_id {
            user = user.with_role(RoleId::from_uuid(role_id));
        }
        if let Some(manager_id) = self.manager_id {
            user = user.with_manager(UserId::from_uuid(manager_id));
        }
        user
    }
}

#[derive(Debug, FromRow)]
struct RoleRow {
    id: Uuid,
    name: String,
    is_system: bool,
    permissions: Option<String>,
}

impl RoleRow {
    fn into_role(self, organization_id: OrganizationId) -> AppResult<Role> {
        let role_id = RoleId::from_uuid(self.id);
        let document = match self.permissions.as_deref().map(serde_json::from_str::<Value>) {
            Some(Ok(document)) => document,
            Some(Err(error)) => {
                warn!(
                    role_id = %role_id,
                    organization_id = %organization_id,
                    error = %error,
                    "role permissions are not valid JSON; denying all"
                );
                Value::Null
            }
            None => Value::Null,
        };

        let parsed = RoleGrantTable::from_json(&document);
        if !parsed.ignored_keys.is_empty() {
            warn!(
                role_id = %role_id,
                organization_id = %organization_id,
                ignored_keys = ?parsed.ignored_keys,
                "ignored unrecognized permission keys"
            );
        }

        let role = Role::new(role_id, organization_id, self.name, parsed.table).map_err(
            |error| AppError::Internal(format!("failed to decode role '{role_id}': {error}")),
        )?;

        Ok(if self.is_system {
            role.into_system()
        } else {
            role
        })
    }
}

#[async_trait]
impl DirectoryRepository for PostgresDirectoryRepository {
    async fn list_direct_reports(
        &self,
        organization_id: OrganizationId,
        manager_id: UserId,
    ) -> AppResult<Vec<UserId>> {
        let rows = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT id
            FROM users
            WHERE organization_id = $1 AND manager_id = $2
            ORDER BY id
            "#,
        )
        .bind(organization_id.as_uuid())
        .bind(manager_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to list direct reports of '{manager_id}': {error}"
            ))
        })?;

        Ok(rows.into_iter().map(UserId::from_uuid).collect())
    }

    async fn find_user_department(
        &self,
        organization_id: OrganizationId,
        user_id: UserId,
    ) -> AppResult<Option<DepartmentId>> {
        let department_id = sqlx::query_scalar::<_, Option<Uuid>>(
            r#"
            SELECT department_id
            FROM users
            WHERE organization_id = $1 AND id = $2
            "#,
        )
        .bind(organization_id.as_uuid())
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to resolve department of '{user_id}': {error}"
            ))
        })?;

        Ok(department_id.flatten().map(DepartmentId::from_uuid))
    }

    async fn find_actor(
        &self,
        organization_id: OrganizationId,
        user_id: UserId,
    ) -> AppResult<Option<Actor>> {
        let Some(row) = self.find_user(organization_id, user_id).await? else {
            return Ok(None);
        };

        let user = row.into_user(organization_id);
        let role = match user.role_id() {
            Some(role_id) => self.find_role(organization_id, role_id).await?,
            None => None,
        };

        Ok(Some(Actor::new(user, role)))
    }
}
