use orgscope_core::{AppError, AppResult, NonEmptyString, OrganizationId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{RoleGrantTable, RoleTemplate};

/// Unique identifier for a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleId(Uuid);

impl RoleId {
    /// Creates a new random role identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a role identifier from an existing UUID value.
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

impl Default for RoleId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RoleId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Organization-scoped role carrying a grant table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    id: RoleId,
    organization_id: OrganizationId,
    name: NonEmptyString,
    #[serde(default)]
    is_system: bool,
    #[serde(default)]
    permissions: RoleGrantTable,
}

impl Role {
    /// Creates a custom role.
    pub fn new(
        id: RoleId,
        organization_id: OrganizationId,
        name: impl Into<String>,
        permissions: RoleGrantTable,
    ) -> AppResult<Self> {
        Ok(Self {
            id,
            organization_id,
            name: NonEmptyString::new(name)?,
            is_system: false,
            permissions,
        })
    }

    /// Materializes a built-in template as an immutable system role.
    pub fn from_template(
        id: RoleId,
        organization_id: OrganizationId,
        template: RoleTemplate,
    ) -> AppResult<Self> {
        let role = Self::new(
            id,
            organization_id,
            template.display_name(),
            template.grants(),
        )?;

        Ok(role.into_system())
    }

    /// Marks the role as a system role.
    #[must_use]
    pub fn into_system(mut self) -> Self {
        self.is_system = true;
        self
    }

    /// Returns the role identifier.
    #[must_use]
    pub fn id(&self) -> RoleId {
        self.id
    }

    /// Returns the owning organization.
    #[must_use]
    pub fn organization_id(&self) -> OrganizationId {
        self.organization_id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns whether the role is a system role.
    #[must_use]
    pub fn is_system(&self) -> bool {
        self.is_system
    }

    /// Returns the grant table.
    #[must_use]
    pub fn permissions(&self) -> &RoleGrantTable {
        &self.permissions
    }

    /// Rejects edits and deletion of system roles.
    pub fn ensure_mutable(&self) -> AppResult<()> {
        if self.is_system {
            return Err(AppError::Forbidden(format!(
                "system role '{}' cannot be modified",
                self.name.as_str()
            )));
        }

        Ok(())
    }
}
