use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use orgscope_application::HierarchyConfig;
use orgscope_core::AppError;
use tracing_subscriber::EnvFilter;

/// Where the organization directory is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectorySource {
    Snapshot(PathBuf),
    Postgres(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectConfig {
    pub source: DirectorySource,
    pub hierarchy: HierarchyConfig,
}

impl InspectConfig {
    pub fn load() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let source = match (
            non_empty("ORGSCOPE_SNAPSHOT_PATH"),
            non_empty("DATABASE_URL"),
        ) {
            (Some(path), _) => DirectorySource::Snapshot(PathBuf::from(path)),
            (None, Some(database_url)) => DirectorySource::Postgres(database_url),
            (None, None) => {
                return Err(AppError::Validation(
                    "either ORGSCOPE_SNAPSHOT_PATH or DATABASE_URL is required".to_owned(),
                ));
            }
        };

        let max_depth = parsed_env(
            non_empty("ORGSCOPE_HIERARCHY_MAX_DEPTH"),
            "ORGSCOPE_HIERARCHY_MAX_DEPTH",
            HierarchyConfig::DEFAULT_MAX_DEPTH,
        )?;
        let max_members = parsed_env(
            non_empty("ORGSCOPE_HIERARCHY_MAX_MEMBERS"),
            "ORGSCOPE_HIERARCHY_MAX_MEMBERS",
            HierarchyConfig::DEFAULT_MAX_MEMBERS,
        )?;
        let timeout_ms = parsed_env(
            non_empty("ORGSCOPE_HIERARCHY_TIMEOUT_MS"),
            "ORGSCOPE_HIERARCHY_TIMEOUT_MS",
            u64::try_from(HierarchyConfig::DEFAULT_TIMEOUT.as_millis()).unwrap_or(u64::MAX),
        )?;

        let hierarchy =
            HierarchyConfig::new(max_depth, max_members, Duration::from_millis(timeout_ms))?;

        Ok(Self { source, hierarchy })
    }
}

fn parsed_env<T>(value: Option<String>, name: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|error| AppError::Validation(format!("invalid {name}: {error}"))),
        None => Ok(default),
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_writer(std::io::stderr)
        .init();
}
