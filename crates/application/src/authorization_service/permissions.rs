use tracing::debug;

use super::*;

impl ActorAuthorization {
    /// Returns whether the actor's role grants `action` on `resource`.
    #[must_use]
    pub fn permitted(&self, resource: ResourceType, action: PermissionAction) -> bool {
        self.actor.permits(resource, action)
    }

    /// Ensures the actor holds `action` on `resource`.
    pub fn require_permission(
        &self,
        resource: ResourceType,
        action: PermissionAction,
    ) -> AppResult<()> {
        if self.permitted(resource, action) {
            return Ok(());
        }

        debug!(
            organization_id = %self.actor.organization_id(),
            user_id = %self.actor.id(),
            resource = %resource,
            action = %action,
            "permission denied"
        );

        Err(AppError::Forbidden(format!(
            "missing permission '{resource}.{action}'"
        )))
    }
}
