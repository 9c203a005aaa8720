//! Grid configuration backend: grid configurations, their columns and toolbar items over REST,
//! stored in PostgreSQL or in memory.

pub mod case;
pub mod domain;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod mapper;
pub mod migration;
pub mod pagination;
pub mod repository;
pub mod response;
pub mod routes;
pub mod service;
pub mod settings;
pub mod sql;
pub mod state;
pub mod store;

pub use error::{AppError, AppResult, ConfigError};
pub use migration::apply_migrations;
pub use routes::app;
pub use settings::{AppConfig, RepositoryType};
pub use state::AppState;
pub use store::{connect, ensure_database_exists};
