//! Role grant tables.
//!
//! A grant table maps each resource type to the set of action flags a role
//! holds for it. Only the (resource, action) pairs enumerated by
//! [`ResourceType::supported_actions`] can ever be granted, so a typo in
//! stored data can never turn into a grant. Everything absent is denied.

use std::collections::{BTreeMap, BTreeSet};

use orgscope_core::{AppError, AppResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::warn;

use crate::{PermissionAction, ResourceType};

/// Set of granted (resource, action) pairs for one role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleGrantTable {
    grants: BTreeMap<ResourceType, BTreeSet<PermissionAction>>,
}

/// Outcome of reading a stored grant table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrantTableParse {
    /// Grants recognized in the stored value.
    pub table: RoleGrantTable,
    /// Dotted paths of keys that were ignored and therefore denied.
    pub ignored_keys: Vec<String>,
}

impl RoleGrantTable {
    /// Creates a table that grants nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Adds one grant, rejecting pairs the resource type does not recognize.
    pub fn grant(mut self, resource: ResourceType, action: PermissionAction) -> AppResult<Self> {
        if !resource.supports(action) {
            return Err(AppError::Validation(format!(
                "action '{action}' is not defined for resource '{resource}'"
            )));
        }

        self.grants.entry(resource).or_default().insert(action);
        Ok(self)
    }

    /// Adds several grants for one resource type.
    pub fn grant_all(
        self,
        resource: ResourceType,
        actions: &[PermissionAction],
    ) -> AppResult<Self> {
        actions
            .iter()
            .try_fold(self, |table, action| table.grant(resource, *action))
    }

    /// Returns whether `action` is granted on `resource`.
    #[must_use]
    pub fn allows(&self, resource: ResourceType, action: PermissionAction) -> bool {
        self.grants
            .get(&resource)
            .is_some_and(|actions| actions.contains(&action))
    }

    /// Returns the granted actions for a resource type in stable order.
    pub fn granted_actions(
        &self,
        resource: ResourceType,
    ) -> impl Iterator<Item = PermissionAction> + '_ {
        self.grants
            .get(&resource)
            .into_iter()
            .flat_map(|actions| actions.iter().copied())
    }

    /// Returns whether the table grants nothing at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.grants.values().all(BTreeSet::is_empty)
    }

    /// Reads the stored `{ resource: { action: bool } }` shape.
    ///
    /// Unknown resources, unknown actions, pairs the resource does not
    /// support, and non-boolean flag values are skipped and reported in
    /// [`GrantTableParse::ignored_keys`].
    #[must_use]
    pub fn from_json(value: &Value) -> GrantTableParse {
        let mut table = Self::empty();
        let mut ignored_keys = Vec::new();

        let Some(resources) = value.as_object() else {
            if !value.is_null() {
                ignored_keys.push("$".to_owned());
            }
            return GrantTableParse {
                table,
                ignored_keys,
            };
        };

        for (resource_key, flags) in resources {
            let Ok(resource) = resource_key.parse::<ResourceType>() else {
                ignored_keys.push(resource_key.clone());
                continue;
            };
            let Some(flags) = flags.as_object() else {
                ignored_keys.push(resource_key.clone());
                continue;
            };

            for (action_key, flag) in flags {
                let action = action_key
                    .parse::<PermissionAction>()
                    .ok()
                    .filter(|action| resource.supports(*action));

                match (action, flag) {
                    (Some(action), Value::Bool(true)) => {
                        table.grants.entry(resource).or_default().insert(action);
                    }
                    (Some(_), Value::Bool(false)) => {}
                    _ => ignored_keys.push(format!("{resource_key}.{action_key}")),
                }
            }
        }

        GrantTableParse {
            table,
            ignored_keys,
        }
    }

    /// Writes the table in the stored shape, listing granted flags only.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let resources = self
            .grants
            .iter()
            .filter(|(_, actions)| !actions.is_empty())
            .map(|(resource, actions)| {
                let flags = actions
                    .iter()
                    .map(|action| (action.as_str().to_owned(), Value::Bool(true)))
                    .collect::<Map<String, Value>>();
                (resource.as_str().to_owned(), Value::Object(flags))
            })
            .collect::<Map<String, Value>>();

        Value::Object(resources)
    }

    fn with_actions(mut self, resource: ResourceType, actions: &[PermissionAction]) -> Self {
        let granted = self.grants.entry(resource).or_default();
        for action in actions {
            if resource.supports(*action) {
                granted.insert(*action);
            }
        }
        self
    }
}

impl Serialize for RoleGrantTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RoleGrantTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let parsed = Self::from_json(&value);
        if !parsed.ignored_keys.is_empty() {
            warn!(
                ignored_keys = ?parsed.ignored_keys,
                "ignored unrecognized permission keys while decoding grant table"
            );
        }

        Ok(parsed.table)
    }
}

/// Default grant sets handed to new organizations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleTemplate {
    /// Full access to the organization.
    Admin,
    /// Department and team visibility without destructive actions.
    Manager,
    /// Own records only.
    Member,
}

impl RoleTemplate {
    /// Returns the display name used when the template is materialized.
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Manager => "Manager",
            Self::Member => "Member",
        }
    }

    /// Builds the grant table for this template.
    #[must_use]
    pub fn grants(&self) -> RoleGrantTable {
        use PermissionAction::{
            Create, Delete, Edit, Invite, View, ViewAll, ViewDepartment, ViewOwn, ViewTeam,
        };

        const RECORDS: [ResourceType; 3] = [
            ResourceType::Customers,
            ResourceType::Leads,
            ResourceType::Tasks,
        ];

        match self {
            Self::Admin => RECORDS
                .iter()
                .fold(RoleGrantTable::empty(), |table, resource| {
                    table.with_actions(
                        *resource,
                        &[
                            ViewAll,
                            ViewDepartment,
                            ViewTeam,
                            ViewOwn,
                            Create,
                            Edit,
                            Delete,
                        ],
                    )
                })
                .with_actions(ResourceType::Users, &[ViewAll, Invite, Edit, Delete])
                .with_actions(ResourceType::Departments, &[ViewAll, Create, Edit, Delete])
                .with_actions(ResourceType::Roles, &[ViewAll, Create, Edit])
                .with_actions(ResourceType::Organization, &[View, Edit]),
            Self::Manager => RECORDS
                .iter()
                .fold(RoleGrantTable::empty(), |table, resource| {
                    table.with_actions(*resource, &[ViewDepartment, ViewTeam, ViewOwn, Create, Edit])
                })
                .with_actions(ResourceType::Users, &[ViewTeam])
                .with_actions(ResourceType::Departments, &[ViewAll])
                .with_actions(ResourceType::Roles, &[ViewAll])
                .with_actions(ResourceType::Organization, &[View]),
            Self::Member => RECORDS
                .iter()
                .fold(RoleGrantTable::empty(), |table, resource| {
                    table.with_actions(*resource, &[ViewOwn, Create, Edit])
                })
                .with_actions(ResourceType::Departments, &[ViewAll])
                .with_actions(ResourceType::Organization, &[View]),
        }
    }
}
