//! Process settings read from the environment (and `.env` when present).

use crate::error::ConfigError;
use std::str::FromStr;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_APP_NAME: &str = "gmodule";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Which repository backs the services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    Postgres,
    /// In-memory tables, lost on exit.
    Local,
}

impl FromStr for RepositoryType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" | "pg" => Ok(Self::Postgres),
            "local" => Ok(Self::Local),
            _ => Err(ConfigError::Invalid {
                key: "REPOSITORY_TYPE",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_url: Option<String>,
    pub repository_type: RepositoryType,
    pub bind_addr: String,
    /// Prefix of the `X-{app}-alert` headers and of alert keys.
    pub app_name: String,
    pub max_connections: u32,
    pub max_body_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            database_url: None,
            repository_type: RepositoryType::Local,
            bind_addr: DEFAULT_BIND_ADDR.into(),
            app_name: DEFAULT_APP_NAME.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl AppConfig {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup. Postgres is the default repository when a database URL is set.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = AppConfig::default();
        let database_url = get("DATABASE_URL").filter(|s| !s.trim().is_empty());
        let repository_type = match get("REPOSITORY_TYPE") {
            Some(v) => v.parse()?,
            None if database_url.is_some() => RepositoryType::Postgres,
            None => RepositoryType::Local,
        };
        if repository_type == RepositoryType::Postgres && database_url.is_none() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }
        Ok(AppConfig {
            database_url,
            repository_type,
            bind_addr: get("BIND_ADDR").unwrap_or(defaults.bind_addr),
            app_name: get("APP_NAME").unwrap_or(defaults.app_name),
            max_connections: parse_or(&get, "DB_MAX_CONNECTIONS", defaults.max_connections)?,
            max_body_bytes: parse_or(&get, "MAX_BODY_BYTES", defaults.max_body_bytes)?,
        })
    }
}

fn parse_or<N: FromStr>(get: &impl Fn(&str) -> Option<String>, key: &'static str, default: N) -> Result<N, ConfigError> {
    match get(key) {
        Some(v) => v.trim().parse().map_err(|_| ConfigError::Invalid { key, value: v }),
        None => Ok(default),
    }
}
