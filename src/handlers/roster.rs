//! Roster handlers: list/read heroes and powers, patch a power, create a hero power.

use crate::error::{AppError, Entity};
use crate::response::ok;
use crate::service::RosterService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::Value;

/// Ids that are not integers cannot name a row, so they read as absent.
fn parse_id(id_str: &str, entity: Entity) -> Result<i64, AppError> {
    id_str.parse().map_err(|_| AppError::NotFound(entity))
}

pub async fn list_heroes(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let heroes = RosterService::list_heroes(state.store.as_ref()).await?;
    Ok(ok(heroes))
}

pub async fn read_hero(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str, Entity::Hero)?;
    let hero = RosterService::get_hero(state.store.as_ref(), id).await?;
    Ok(ok(hero))
}

pub async fn list_powers(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let powers = RosterService::list_powers(state.store.as_ref()).await?;
    Ok(ok(powers))
}

pub async fn read_power(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str, Entity::Power)?;
    let power = RosterService::get_power(state.store.as_ref(), id).await?;
    Ok(ok(power))
}

pub async fn update_power(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str, Entity::Power)?;
    let power = RosterService::update_power(state.store.as_ref(), id, &body).await?;
    Ok(ok(power))
}

/// Responds 200, not 201, on success.
pub async fn create_hero_power(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let view = RosterService::create_hero_power(state.store.as_ref(), &body).await?;
    Ok(ok(view))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_numeric_ids_are_not_found() {
        assert!(matches!(parse_id("abc", Entity::Hero), Err(AppError::NotFound(Entity::Hero))));
        assert!(matches!(parse_id("1.5", Entity::Power), Err(AppError::NotFound(Entity::Power))));
        assert_eq!(parse_id("42", Entity::Hero).unwrap(), 42);
    }
}
