//! Server: reads settings, prepares the database when PostgreSQL backs the repositories, and serves the API.

use grid_config::{apply_migrations, app, connect, ensure_database_exists, AppConfig, AppState, RepositoryType};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("grid_config=info".parse()?))
        .init();

    let state = match (config.repository_type, config.database_url.clone()) {
        (RepositoryType::Postgres, Some(database_url)) => {
            ensure_database_exists(&database_url).await?;
            let pool = connect(&database_url, config.max_connections).await?;
            apply_migrations(&pool).await?;
            AppState::postgres(config.clone(), pool)
        }
        _ => {
            tracing::warn!("using in-memory repositories; data is lost on exit");
            AppState::local(config.clone())
        }
    };

    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app(state)).await?;
    Ok(())
}
