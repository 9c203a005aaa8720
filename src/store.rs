//! PostgreSQL bootstrap: create the database when missing, then open the pool.

use crate::error::{AppError, AppResult, ConfigError};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;

/// Create the database named in `database_url` when it does not exist yet.
/// Connects to the `postgres` maintenance database to do so.
pub async fn ensure_database_exists(database_url: &str) -> AppResult<()> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = PgConnectOptions::from_str(&admin_url).map_err(|e| invalid_url(&e.to_string()))?;
    let mut conn = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

pub async fn connect(database_url: &str, max_connections: u32) -> AppResult<PgPool> {
    Ok(PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?)
}

fn invalid_url(reason: &str) -> AppError {
    AppError::Config(ConfigError::Invalid {
        key: "DATABASE_URL",
        value: reason.to_string(),
    })
}

fn parse_db_name_from_url(url: &str) -> AppResult<(String, String)> {
    let path_start = url.rfind('/').ok_or_else(|| invalid_url("no database path"))? + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let mut parts = path_and_query.splitn(2, '?');
    let db_name = parts.next().unwrap_or("").trim().to_string();
    let query = parts.next().map(|q| format!("?{}", q)).unwrap_or_default();
    let base = url.get(..path_start).unwrap_or(url);
    Ok((format!("{}postgres{}", base, query), db_name))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_database_name_and_keeps_query() {
        let (admin, name) = parse_db_name_from_url("postgres://u:p@db:5432/grids?sslmode=disable").unwrap();
        assert_eq!(admin, "postgres://u:p@db:5432/postgres?sslmode=disable");
        assert_eq!(name, "grids");
    }

    #[test]
    fn quotes_identifiers() {
        assert_eq!(quote_ident("my\"db"), "\"my\"\"db\"");
    }
}
