//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod actor;
mod filter;
mod grants;
mod record;
mod role;
mod security;
mod user;

pub use actor::{Actor, ViewScopes};
pub use filter::{FilterSpec, ScopeClause, ScopeFilter};
pub use grants::{GrantTableParse, RoleGrantTable, RoleTemplate};
pub use record::RecordRef;
pub use role::{Role, RoleId};
pub use security::{PermissionAction, ResourceType, ScopeModel};
pub use user::{DepartmentId, User, UserId};
