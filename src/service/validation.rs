//! Request-shape validation: JSON body in, typed payload or `AppError::Validation` out.

use crate::error::AppError;
use crate::model::Strength;
use serde_json::{Map, Value};

/// Body of `PATCH /powers/:id`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PowerPatch {
    pub description: String,
}

/// Body of `POST /hero_powers`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewHeroPower {
    pub hero_id: i64,
    pub power_id: i64,
    pub strength: Strength,
}

impl PowerPatch {
    /// `description` is required and must be a non-empty string. Other keys are ignored.
    pub fn from_json(body: &Value) -> Result<Self, AppError> {
        let obj = as_object(body)?;
        let description = match obj.get("description") {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            Some(Value::String(_)) => return Err(AppError::Validation("description must not be empty".into())),
            Some(Value::Null) | None => return Err(AppError::Validation("description is required".into())),
            Some(_) => return Err(AppError::Validation("description must be a string".into())),
        };
        Ok(PowerPatch { description })
    }
}

impl NewHeroPower {
    pub fn from_json(body: &Value) -> Result<Self, AppError> {
        let obj = as_object(body)?;
        let hero_id = required_id(obj, "hero_id")?;
        let power_id = required_id(obj, "power_id")?;
        let strength = match obj.get("strength") {
            Some(Value::String(s)) => s.parse::<Strength>().map_err(AppError::Validation)?,
            _ => return Err(AppError::Validation("strength must be one of Strong, Weak, Average".into())),
        };
        Ok(NewHeroPower { hero_id, power_id, strength })
    }
}

fn as_object(body: &Value) -> Result<&Map<String, Value>, AppError> {
    body.as_object()
        .ok_or_else(|| AppError::Validation("body must be a JSON object".into()))
}

/// Integer ids only; `1.0` or `"1"` are rejected.
fn required_id(obj: &Map<String, Value>, key: &str) -> Result<i64, AppError> {
    match obj.get(key) {
        Some(Value::Number(n)) => n
            .as_i64()
            .ok_or_else(|| AppError::Validation(format!("{} must be an integer", key))),
        Some(Value::Null) | None => Err(AppError::Validation(format!("{} is required", key))),
        Some(_) => Err(AppError::Validation(format!("{} must be an integer", key))),
    }
}
