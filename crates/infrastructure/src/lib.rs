//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod directory_snapshot;
mod in_memory_directory_repository;
mod postgres_directory_repository;

pub use directory_snapshot::{DirectorySnapshot, SnapshotRole};
pub use in_memory_directory_repository::InMemoryDirectoryRepository;
pub use postgres_directory_repository::PostgresDirectoryRepository;
