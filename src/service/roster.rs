//! Hero, power and hero-power operations over a [`HeroStore`].

use crate::error::{AppError, Entity};
use crate::model::{Hero, HeroDetail, HeroPowerView, Power};
use crate::service::{NewHeroPower, PowerPatch};
use crate::store::HeroStore;
use serde_json::Value;

pub struct RosterService;

impl RosterService {
    pub async fn list_heroes(store: &dyn HeroStore) -> Result<Vec<Hero>, AppError> {
        store.list_heroes().await
    }

    /// Hero plus its associations. Heroes without any get an empty `hero_powers`.
    pub async fn get_hero(store: &dyn HeroStore, id: i64) -> Result<HeroDetail, AppError> {
        let hero = store.get_hero(id).await?.ok_or(AppError::NotFound(Entity::Hero))?;
        let hero_powers = store.hero_powers_for_hero(hero.id).await?;
        Ok(HeroDetail::new(hero, hero_powers))
    }

    pub async fn list_powers(store: &dyn HeroStore) -> Result<Vec<Power>, AppError> {
        store.list_powers().await
    }

    pub async fn get_power(store: &dyn HeroStore, id: i64) -> Result<Power, AppError> {
        store.get_power(id).await?.ok_or(AppError::NotFound(Entity::Power))
    }

    /// A missing power is reported before a bad body.
    pub async fn update_power(store: &dyn HeroStore, id: i64, body: &Value) -> Result<Power, AppError> {
        Self::get_power(store, id).await?;
        let patch = PowerPatch::from_json(body)?;
        let power = store
            .update_power_description(id, &patch.description)
            .await?
            .ok_or(AppError::NotFound(Entity::Power))?;
        tracing::info!(power_id = power.id, "power description updated");
        Ok(power)
    }

    /// Unknown hero or power ids are validation failures, not 404s.
    pub async fn create_hero_power(store: &dyn HeroStore, body: &Value) -> Result<HeroPowerView, AppError> {
        let new = NewHeroPower::from_json(body)?;
        let hero = store
            .get_hero(new.hero_id)
            .await?
            .ok_or_else(|| AppError::Validation(format!("hero {} does not exist", new.hero_id)))?;
        let power = store
            .get_power(new.power_id)
            .await?
            .ok_or_else(|| AppError::Validation(format!("power {} does not exist", new.power_id)))?;
        let row = store.insert_hero_power(hero.id, power.id, new.strength).await?;
        tracing::info!(
            hero_power_id = row.id,
            hero_id = row.hero_id,
            power_id = row.power_id,
            strength = %row.strength,
            "hero power created"
        );
        Ok(HeroPowerView::new(row, hero, power))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Strength;
    use crate::store::MemoryStore;
    use serde_json::json;

    fn store() -> MemoryStore {
        let s = MemoryStore::new();
        s.add_hero("Kamala Khan", "Ms. Marvel").unwrap();
        s.add_power("flight", "gives the wielder the ability to fly").unwrap();
        s
    }

    #[tokio::test]
    async fn missing_power_beats_bad_body() {
        let s = store();
        let err = RosterService::update_power(&s, 99, &json!({})).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(Entity::Power)));
    }

    #[tokio::test]
    async fn rejected_update_keeps_description() {
        let s = store();
        let err = RosterService::update_power(&s, 1, &json!({"description": ""})).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        let power = RosterService::get_power(&s, 1).await.unwrap();
        assert_eq!(power.description, "gives the wielder the ability to fly");
    }

    #[tokio::test]
    async fn unknown_parent_is_a_validation_error() {
        let s = store();
        for body in [
            json!({"hero_id": 5, "power_id": 1, "strength": "Strong"}),
            json!({"hero_id": 1, "power_id": 5, "strength": "Strong"}),
        ] {
            let err = RosterService::create_hero_power(&s, &body).await.unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
        }
        assert_eq!(s.hero_power_count().unwrap(), 0);
    }

    #[tokio::test]
    async fn created_hero_power_is_listed_on_hero() {
        let s = store();
        let view = RosterService::create_hero_power(&s, &json!({"hero_id": 1, "power_id": 1, "strength": "Strong"}))
            .await
            .unwrap();
        assert_eq!(view.strength, Strength::Strong);
        assert_eq!(view.hero.super_name, "Ms. Marvel");

        let detail = RosterService::get_hero(&s, 1).await.unwrap();
        assert_eq!(detail.hero_powers.len(), 1);
        assert_eq!(detail.hero_powers[0].id, view.id);
        assert_eq!(detail.hero_powers[0].power.name, "flight");
    }
}
