use orgscope_core::OrganizationId;
use serde::{Deserialize, Serialize};

use crate::{DepartmentId, PermissionAction, ResourceType, Role, User, UserId};

/// A user together with the role it resolves to, as seen by policy checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    user: User,
    role: Option<Role>,
}

/// View-scope flags an actor holds on one resource type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewScopes {
    /// `viewAll` (or `view` for the organization resource).
    pub all: bool,
    /// `viewDepartment`.
    pub department: bool,
    /// `viewTeam`.
    pub team: bool,
    /// `viewOwn`.
    pub own: bool,
}

impl ViewScopes {
    /// Returns whether no scope is granted at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !(self.all || self.department || self.team || self.own)
    }
}

impl Actor {
    /// Creates an actor projection.
    #[must_use]
    pub fn new(user: User, role: Option<Role>) -> Self {
        Self { user, role }
    }

    /// Returns the underlying user.
    #[must_use]
    pub fn user(&self) -> &User {
        &self.user
    }

    /// Returns the actor's user id.
    #[must_use]
    pub fn id(&self) -> UserId {
        self.user.id()
    }

    /// Returns the actor's organization.
    #[must_use]
    pub fn organization_id(&self) -> OrganizationId {
        self.user.organization_id()
    }

    /// Returns the actor's department, if any.
    #[must_use]
    pub fn department_id(&self) -> Option<DepartmentId> {
        self.user.department_id()
    }

    /// Returns the resolved role, if any.
    #[must_use]
    pub fn role(&self) -> Option<&Role> {
        self.role.as_ref()
    }

    /// Returns whether the actor's role grants `action` on `resource`.
    ///
    /// Denies when there is no role, when the role does not belong to the
    /// actor's organization, or when it is not the role the user references.
    #[must_use]
    pub fn permits(&self, resource: ResourceType, action: PermissionAction) -> bool {
        let Some(role) = self.role.as_ref() else {
            return false;
        };

        if role.organization_id() != self.user.organization_id()
            || self.user.role_id() != Some(role.id())
        {
            return false;
        }

        role.permissions().allows(resource, action)
    }

    /// Returns the view-scope flags held on `resource`.
    #[must_use]
    pub fn view_scopes(&self, resource: ResourceType) -> ViewScopes {
        ViewScopes {
            all: self.permits(resource, resource.list_all_action()),
            department: self.permits(resource, PermissionAction::ViewDepartment),
            team: self.permits(resource, PermissionAction::ViewTeam),
            own: self.permits(resource, PermissionAction::ViewOwn),
        }
    }
}
