//! Organization members and the identifiers that link them.

use std::str::FromStr;

use orgscope_core::{AppError, OrganizationId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::RoleId;

/// Unique identifier for a user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Creates a new random user identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a user identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value.trim())
            .map(Self)
            .map_err(|error| AppError::Validation(format!("invalid user id: {error}")))
    }
}

/// Unique identifier for a department.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DepartmentId(Uuid);

impl DepartmentId {
    /// Creates a new random department identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a department identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for DepartmentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DepartmentId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Organization member as stored by the surrounding system.
///
/// `manager_id` forms a forest of management chains. The data is normally
/// acyclic but nothing here enforces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    organization_id: OrganizationId,
    department_id: Option<DepartmentId>,
    role_id: Option<RoleId>,
    manager_id: Option<UserId>,
}

impl User {
    /// Creates a user without department, role, or manager.
    #[must_use]
    pub fn new(id: UserId, organization_id: OrganizationId) -> Self {
        Self {
            id,
            organization_id,
            department_id: None,
            role_id: None,
            manager_id: None,
        }
    }

    /// Places the user in a department.
    #[must_use]
    pub fn with_department(mut self, department_id: DepartmentId) -> Self {
        self.department_id = Some(department_id);
        self
    }

    /// Assigns a role to the user.
    #[must_use]
    pub fn with_role(mut self, role_id: RoleId) -> Self {
        self.role_id = Some(role_id);
        self
    }

    /// Makes the user report to `manager_id`.
    #[must_use]
    pub fn with_manager(mut self, manager_id: UserId) -> Self {
        self.manager_id = Some(manager_id);
        self
    }

    /// Returns the user identifier.
    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Returns the owning organization.
    #[must_use]
    pub fn organization_id(&self) -> OrganizationId {
        self.organization_id
    }

    /// Returns the department, if any.
    #[must_use]
    pub fn department_id(&self) -> Option<DepartmentId> {
        self.department_id
    }

    /// Returns the role, if any.
    #[must_use]
    pub fn role_id(&self) -> Option<RoleId> {
        self.role_id
    }

    /// Returns the manager, if any. `None` marks a hierarchy root.
    #[must_use]
    pub fn manager_id(&self) -> Option<UserId> {
        self.manager_id
    }

    /// Returns whether the user sits at the top of a management chain.
    #[must_use]
    pub fn is_hierarchy_root(&self) -> bool {
        self.manager_id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use orgscope_core::OrganizationId;

    use super::{DepartmentId, User, UserId};

    #[test]
    fn user_without_manager_is_root() {
        let user = User::new(UserId::new(), OrganizationId::new());
        assert!(user.is_hierarchy_root());

        let report = user.clone().with_manager(UserId::new());
        assert!(!report.is_hierarchy_root());
    }

    #[test]
    fn builders_set_optional_links() {
        let department_id = DepartmentId::new();
        let user = User::new(UserId::new(), OrganizationId::new()).with_department(department_id);
        assert_eq!(user.department_id(), Some(department_id));
        assert_eq!(user.role_id(), None);
    }

    #[test]
    fn user_id_rejects_invalid_transport_value() {
        assert!(UserId::from_str("alice").is_err());
    }
}
