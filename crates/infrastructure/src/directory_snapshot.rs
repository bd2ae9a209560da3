use std::path::Path;

use orgscope_core::{AppError, AppResult, OrganizationId};
use orgscope_domain::{Role, RoleGrantTable, RoleId, User};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// Organization directory serialized as one JSON document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DirectorySnapshot {
    /// Stored roles with their raw permission documents.
    #[serde(default)]
    pub roles: Vec<SnapshotRole>,
    /// Organization members.
    #[serde(default)]
    pub users: Vec<User>,
}

/// Role entry of a [`DirectorySnapshot`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotRole {
    /// Role identifier.
    pub id: RoleId,
    /// Owning organization.
    pub organization_id: OrganizationId,
    /// Display name.
    pub name: String,
    /// Built-in roles cannot be edited or deleted.
    #[serde(default)]
    pub is_system: bool,
    /// Nested `resource -> action -> bool` map.
    #[serde(default)]
    pub permissions: Value,
}

impl SnapshotRole {
    /// Converts the stored entry into a role, denying unrecognized grants.
    pub fn into_role(self) -> AppResult<Role> {
        let parsed = RoleGrantTable::from_json(&self.permissions);
        if !parsed.ignored_keys.is_empty() {
            warn!(
                role_id = %self.id,
                organization_id = %self.organization_id,
                ignored_keys = ?parsed.ignored_keys,
                "ignored unrecognized permission keys"
            );
        }

        let role = Role::new(self.id, self.organization_id, self.name, parsed.table)?;
        Ok(if self.is_system {
            role.into_system()
        } else {
            role
        })
    }
}

impl DirectorySnapshot {
    /// Parses a snapshot from JSON text.
    pub fn from_json_str(raw: &str) -> AppResult<Self> {
        serde_json::from_str(raw).map_err(|error| {
            AppError::Validation(format!("invalid directory snapshot: {error}"))
        })
    }

    /// Reads and parses a snapshot file.
    pub async fn load(path: &Path) -> AppResult<Self> {
        let raw = tokio::fs::read_to_string(path).await.map_err(|error| {
            AppError::Internal(format!(
                "failed to read directory snapshot '{}': {error}",
                path.display()
            ))
        })?;

        Self::from_json_str(raw.as_str())
    }

    /// Converts every stored role entry into a role.
    pub fn into_parts(self) -> AppResult<(Vec<Role>, Vec<User>)> {
        let roles = self
            .roles
            .into_iter()
            .map(SnapshotRole::into_role)
            .collect::<AppResult<Vec<_>>>()?;

        Ok((roles, self.users))
    }
}
