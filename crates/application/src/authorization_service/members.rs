use orgscope_domain::User;

use super::*;

impl ActorAuthorization {
    /// Returns whether the actor may edit `target`'s profile.
    ///
    /// Members of the same organization may always edit themselves; editing
    /// anyone else needs `users.edit`.
    #[must_use]
    pub fn can_edit_user(&self, target: &User) -> bool {
        if target.organization_id() != self.actor.organization_id() {
            return false;
        }

        target.id() == self.actor.id()
            || self.permitted(ResourceType::Users, PermissionAction::Edit)
    }

    /// Ensures the actor may remove `target` from the organization.
    pub fn ensure_can_delete_user(&self, target: &User) -> AppResult<()> {
        self.require_permission(ResourceType::Users, PermissionAction::Delete)?;

        if target.id() == self.actor.id() {
            return Err(AppError::Validation("cannot delete yourself".to_owned()));
        }

        if target.organization_id() != self.actor.organization_id() {
            return Err(AppError::NotFound(format!(
                "user '{}' not found",
                target.id()
            )));
        }

        Ok(())
    }
}
