//! Orgscope inspection tool: resolves teams, compiles scope filters, and
//! checks record access against a directory snapshot or database.

#![forbid(unsafe_code)]

mod command;
mod inspect_config;

use std::env;
use std::sync::Arc;

use orgscope_application::{AuthorizationService, DirectoryRepository};
use orgscope_core::AppError;
use orgscope_domain::{RecordRef, ScopeModel, User, UserId};
use orgscope_infrastructure::{
    DirectorySnapshot, InMemoryDirectoryRepository, PostgresDirectoryRepository,
};
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use crate::command::Command;
use crate::inspect_config::{DirectorySource, InspectConfig, init_tracing};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let args: Vec<String> = env::args().skip(1).collect();
    let command = Command::parse(&args)?;
    let config = InspectConfig::load()?;

    let repository: Arc<dyn DirectoryRepository> = match &config.source {
        DirectorySource::Snapshot(path) => {
            let snapshot = DirectorySnapshot::load(path).await?;
            info!(
                path = %path.display(),
                users = snapshot.users.len(),
                roles = snapshot.roles.len(),
                "loaded directory snapshot"
            );
            Arc::new(InMemoryDirectoryRepository::from_snapshot(snapshot)?)
        }
        DirectorySource::Postgres(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(4)
                .connect(database_url)
                .await
                .map_err(|error| {
                    AppError::Internal(format!("failed to connect to database: {error}"))
                })?;
            Arc::new(PostgresDirectoryRepository::new(pool))
        }
    };

    let service = AuthorizationService::new(repository, config.hierarchy);
    run(&service, command).await
}

async fn run(service: &AuthorizationService, command: Command) -> Result<(), AppError> {
    match command {
        Command::Team {
            organization_id,
            user_id,
        } => {
            let team = service
                .resolver()
                .subordinate_closure(organization_id, user_id)
                .await?;
            println!("{}", to_json(&team)?);
        }
        Command::Filter {
            organization_id,
            user_id,
            resource,
        } => {
            let authorization = service.load_actor(organization_id, user_id).await?;
            let filter = authorization.compile_filter(resource).await?;
            println!("{}", to_json(&filter)?);
        }
        Command::Access {
            organization_id,
            user_id,
            resource,
            record_organization_id,
            record_id,
            assigned_to,
        } => {
            let record = match resource.scope_model() {
                ScopeModel::Assignable => {
                    RecordRef::assignable(record_id, record_organization_id, assigned_to)
                }
                ScopeModel::Directory => RecordRef::member(&User::new(
                    UserId::from_uuid(record_id),
                    record_organization_id,
                )),
                ScopeModel::OrganizationWide => {
                    RecordRef::unowned(record_id, record_organization_id)
                }
            };

            let authorization = service.load_actor(organization_id, user_id).await?;
            let allowed = authorization.can_access(resource, &record).await?;
            println!("{}", if allowed { "allowed" } else { "denied" });
        }
    }

    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value)
        .map_err(|error| AppError::Internal(format!("failed to encode output: {error}")))
}
