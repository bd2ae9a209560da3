use async_trait::async_trait;

use orgscope_core::{AppResult, OrganizationId};
use orgscope_domain::{Actor, DepartmentId, UserId};

/// Repository port for the read-only organization directory.
///
/// Every lookup is scoped to one organization: ids that belong to another
/// organization behave as if they did not exist.
#[async_trait]
pub trait DirectoryRepository: Send + Sync {
    /// Lists the users whose manager is `manager_id`.
    async fn list_direct_reports(
        &self,
        organization_id: OrganizationId,
        manager_id: UserId,
    ) -> AppResult<Vec<UserId>>;

    /// Returns the department of a user, if the user exists and has one.
    async fn find_user_department(
        &self,
        organization_id: OrganizationId,
        user_id: UserId,
    ) -> AppResult<Option<DepartmentId>>;

    /// Loads a user together with its role.
    async fn find_actor(
        &self,
        organization_id: OrganizationId,
        user_id: UserId,
    ) -> AppResult<Option<Actor>>;
}
