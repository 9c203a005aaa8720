//! Typed errors and HTTP mapping.

use crate::domain::DomainError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
    #[error("missing setting: {0}")]
    Missing(&'static str),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("validation: {0}")]
    Validation(String),
    /// Client error carrying an alert key (`idexists`, `idnull`, ...).
    #[error("{message}")]
    Alert {
        message: String,
        entity_name: &'static str,
        error_key: &'static str,
    },
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("internal: {0}")]
    Internal(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn alert(message: impl Into<String>, entity_name: &'static str, error_key: &'static str) -> Self {
        AppError::Alert {
            message: message.into(),
            entity_name,
            error_key,
        }
    }

    pub fn id_exists(entity_name: &'static str, label: &str) -> Self {
        Self::alert(format!("A new {} cannot already have an ID", label), entity_name, "idexists")
    }

    pub fn id_null(entity_name: &'static str) -> Self {
        Self::alert("Invalid id", entity_name, "idnull")
    }

    pub fn id_invalid(entity_name: &'static str) -> Self {
        Self::alert("Invalid ID", entity_name, "idinvalid")
    }

    pub fn id_not_found(entity_name: &'static str) -> Self {
        Self::alert("Entity not found", entity_name, "idnotfound")
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

fn is_foreign_key_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .map(|d| d.is_foreign_key_violation())
        .unwrap_or(false)
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "config_error"),
            AppError::Domain(_) => (StatusCode::BAD_REQUEST, "domain_error"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            AppError::Alert { .. } => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::Db(e) => {
                if let sqlx::Error::RowNotFound = e {
                    (StatusCode::NOT_FOUND, "not_found")
                } else if is_foreign_key_violation(e) {
                    (StatusCode::BAD_REQUEST, "invalid_reference")
                } else {
                    (StatusCode::INTERNAL_SERVER_ERROR, "database_error")
                }
            }
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let (message, details) = match &self {
            AppError::Alert {
                entity_name,
                error_key,
                ..
            } => (
                format!("error.{}", error_key),
                Some(serde_json::json!({
                    "entityName": entity_name,
                    "errorKey": error_key,
                    "title": self.to_string(),
                })),
            ),
            _ => (self.to_string(), None),
        };
        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details,
            },
        };
        (status, Json(body)).into_response()
    }
}
