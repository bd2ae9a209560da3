//! Application services and ports.

#![forbid(unsafe_code)]

mod authorization_service;
mod directory_ports;
mod hierarchy;

#[cfg(test)]
mod test_support;

pub use authorization_service::{ActorAuthorization, AuthorizationService};
pub use directory_ports::DirectoryRepository;
pub use hierarchy::{HierarchyConfig, HierarchyResolver, TeamClosure};
