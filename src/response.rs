//! Response body helpers. Success bodies are bare JSON (no envelope).

use crate::error::Entity;
use axum::{http::StatusCode, Json};
use serde::Serialize;

/// Body of the `GET /` landing page.
pub const INDEX_HTML: &str = "<h1>Code challenge</h1>";

/// Message returned for every rejected payload; per-field detail is not exposed.
pub const VALIDATION_ERRORS: &str = "validation errors";

pub fn ok<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}

pub fn not_found_body(entity: Entity) -> serde_json::Value {
    serde_json::json!({ "error": format!("{} not found", entity) })
}

pub fn validation_errors_body() -> serde_json::Value {
    serde_json::json!({ "errors": [VALIDATION_ERRORS] })
}

pub fn internal_error_body() -> serde_json::Value {
    serde_json::json!({ "error": "Internal server error" })
}
