//! Typed errors and HTTP mapping.

use crate::response::{internal_error_body, not_found_body, validation_errors_body};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

/// Entity kinds that can be looked up by primary key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entity {
    Hero,
    Power,
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Entity::Hero => f.write_str("Hero"),
            Entity::Power => f.write_str("Power"),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{0} not found")]
    NotFound(Entity),
    /// The reason is logged, never sent to the client.
    #[error("validation: {0}")]
    Validation(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("internal: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::NotFound(entity) => {
                (StatusCode::NOT_FOUND, Json(not_found_body(*entity))).into_response()
            }
            AppError::Validation(reason) => {
                tracing::debug!(reason = %reason, "request rejected");
                (StatusCode::BAD_REQUEST, Json(validation_errors_body())).into_response()
            }
            AppError::Db(e) => {
                tracing::error!(error = %e, "database error");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(internal_error_body())).into_response()
            }
            AppError::Config(_) | AppError::Internal(_) => {
                tracing::error!(error = %self, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(internal_error_body())).into_response()
            }
        }
    }
}
