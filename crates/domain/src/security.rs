use std::fmt::{Display, Formatter};
use std::str::FromStr;

use orgscope_core::AppError;
use serde::{Deserialize, Serialize};

/// Resource types guarded by role grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    /// Customer records.
    Customers,
    /// Lead records.
    Leads,
    /// Task records.
    Tasks,
    /// Organization members.
    Users,
    /// Departments of the organization.
    Departments,
    /// Roles of the organization.
    Roles,
    /// The organization itself.
    Organization,
}

/// How list and record visibility is derived for a resource type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeModel {
    /// Records carry an optional assignee and honor all four view scopes.
    Assignable,
    /// Records are organization members, visible by team membership.
    Directory,
    /// Records are visible to everyone holding the list grant, or no one.
    OrganizationWide,
}

impl ResourceType {
    /// Returns a stable storage value for this resource type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Customers => "customers",
            Self::Leads => "leads",
            Self::Tasks => "tasks",
            Self::Users => "users",
            Self::Departments => "departments",
            Self::Roles => "roles",
            Self::Organization => "organization",
        }
    }

    /// Returns all known resource types.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[ResourceType] = &[
            ResourceType::Customers,
            ResourceType::Leads,
            ResourceType::Tasks,
            ResourceType::Users,
            ResourceType::Departments,
            ResourceType::Roles,
            ResourceType::Organization,
        ];

        ALL
    }

    /// Returns the visibility model for this resource type.
    #[must_use]
    pub fn scope_model(&self) -> ScopeModel {
        match self {
            Self::Customers | Self::Leads | Self::Tasks => ScopeModel::Assignable,
            Self::Users => ScopeModel::Directory,
            Self::Departments | Self::Roles | Self::Organization => ScopeModel::OrganizationWide,
        }
    }

    /// Returns the actions a role may hold for this resource type.
    #[must_use]
    pub fn supported_actions(&self) -> &'static [PermissionAction] {
        use PermissionAction::{
            Create, Delete, Edit, Invite, View, ViewAll, ViewDepartment, ViewOwn, ViewTeam,
        };

        match self {
            Self::Customers | Self::Leads | Self::Tasks => &[
                ViewAll,
                ViewDepartment,
                ViewTeam,
                ViewOwn,
                Create,
                Edit,
                Delete,
            ],
            Self::Users => &[ViewAll, ViewTeam, Invite, Edit, Delete],
            Self::Departments | Self::Roles => &[ViewAll, Create, Edit, Delete],
            Self::Organization => &[View, Edit],
        }
    }

    /// Returns whether `action` is a recognized flag for this resource type.
    #[must_use]
    pub fn supports(&self, action: PermissionAction) -> bool {
        self.supported_actions().contains(&action)
    }

    /// Returns the action that grants unrestricted listing in the organization.
    #[must_use]
    pub fn list_all_action(&self) -> PermissionAction {
        match self {
            Self::Organization => PermissionAction::View,
            _ => PermissionAction::ViewAll,
        }
    }
}

impl Display for ResourceType {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for ResourceType {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "customers" => Ok(Self::Customers),
            "leads" => Ok(Self::Leads),
            "tasks" => Ok(Self::Tasks),
            "users" => Ok(Self::Users),
            "departments" => Ok(Self::Departments),
            "roles" => Ok(Self::Roles),
            "organization" => Ok(Self::Organization),
            _ => Err(AppError::Validation(format!(
                "unknown resource type '{value}'"
            ))),
        }
    }
}

/// Named boolean flags a role grants per resource type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PermissionAction {
    /// Lists every record in the organization.
    ViewAll,
    /// Lists records assigned to members of the actor's department.
    ViewDepartment,
    /// Lists records assigned to the actor's team.
    ViewTeam,
    /// Lists records assigned to the actor.
    ViewOwn,
    /// Reads a single organization-wide resource.
    View,
    /// Creates records.
    Create,
    /// Edits records.
    Edit,
    /// Deletes records.
    Delete,
    /// Invites new members.
    Invite,
}

impl PermissionAction {
    /// Returns a stable storage value for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ViewAll => "viewAll",
            Self::ViewDepartment => "viewDepartment",
            Self::ViewTeam => "viewTeam",
            Self::ViewOwn => "viewOwn",
            Self::View => "view",
            Self::Create => "create",
            Self::Edit => "edit",
            Self::Delete => "delete",
            Self::Invite => "invite",
        }
    }

    /// Returns whether this action is one of the four list-scope flags.
    #[must_use]
    pub fn is_view_scope(&self) -> bool {
        matches!(
            self,
            Self::ViewAll | Self::ViewDepartment | Self::ViewTeam | Self::ViewOwn
        )
    }
}

impl Display for PermissionAction {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for PermissionAction {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "viewAll" => Ok(Self::ViewAll),
            "viewDepartment" => Ok(Self::ViewDepartment),
            "viewTeam" => Ok(Self::ViewTeam),
            "viewOwn" => Ok(Self::ViewOwn),
            "view" => Ok(Self::View),
            "create" => Ok(Self::Create),
            "edit" => Ok(Self::Edit),
            "delete" => Ok(Self::Delete),
            "invite" => Ok(Self::Invite),
            _ => Err(AppError::Validation(format!(
                "unknown permission action '{value}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::{PermissionAction, ResourceType, ScopeModel};

    #[test]
    fn resource_type_roundtrip_storage_value() {
        for resource in ResourceType::all() {
            let restored = ResourceType::from_str(resource.as_str());
            assert!(matches!(restored, Ok(value) if value == *resource));
        }
    }

    #[test]
    fn unknown_action_is_rejected() {
        assert!(PermissionAction::from_str("viewEverything").is_err());
        assert!(PermissionAction::from_str("ViewAll").is_err());
    }

    #[test]
    fn users_resource_has_no_department_or_own_scope() {
        assert!(ResourceType::Users.supports(PermissionAction::ViewTeam));
        assert!(!ResourceType::Users.supports(PermissionAction::ViewDepartment));
        assert!(!ResourceType::Users.supports(PermissionAction::ViewOwn));
        assert!(ResourceType::Users.supports(PermissionAction::Invite));
    }

    #[test]
    fn scope_models_follow_resource_shape() {
        assert_eq!(ResourceType::Leads.scope_model(), ScopeModel::Assignable);
        assert_eq!(ResourceType::Users.scope_model(), ScopeModel::Directory);
        assert_eq!(
            ResourceType::Roles.scope_model(),
            ScopeModel::OrganizationWide
        );
        assert_eq!(
            ResourceType::Organization.list_all_action(),
            PermissionAction::View
        );
    }
}
