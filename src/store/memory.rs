//! In-process tables behind one lock. Used by tests and by `STORE_BACKEND=memory`.

use crate::error::AppError;
use crate::model::{Hero, HeroPower, HeroPowerEntry, Power, Strength};
use crate::seed::{SEED_HEROES, SEED_POWERS};
use crate::store::HeroStore;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct Tables {
    heroes: BTreeMap<i64, Hero>,
    powers: BTreeMap<i64, Power>,
    hero_powers: BTreeMap<i64, HeroPower>,
}

impl Tables {
    fn next_id<T>(rows: &BTreeMap<i64, T>) -> i64 {
        rows.keys().next_back().map_or(1, |last| last + 1)
    }

    fn add_hero(&mut self, name: &str, super_name: &str) -> Hero {
        let hero = Hero {
            id: Self::next_id(&self.heroes),
            name: name.into(),
            super_name: super_name.into(),
        };
        self.heroes.insert(hero.id, hero.clone());
        hero
    }

    fn add_power(&mut self, name: &str, description: &str) -> Power {
        let power = Power {
            id: Self::next_id(&self.powers),
            name: name.into(),
            description: description.into(),
        };
        self.powers.insert(power.id, power.clone());
        power
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with the sample heroes and powers (ids start at 1).
    pub fn seeded() -> Self {
        let mut tables = Tables::default();
        for &(name, super_name) in SEED_HEROES {
            tables.add_hero(name, super_name);
        }
        for &(name, description) in SEED_POWERS {
            tables.add_power(name, description);
        }
        MemoryStore {
            tables: RwLock::new(tables),
        }
    }

    pub fn add_hero(&self, name: &str, super_name: &str) -> Result<Hero, AppError> {
        Ok(self.write_tables()?.add_hero(name, super_name))
    }

    pub fn add_power(&self, name: &str, description: &str) -> Result<Power, AppError> {
        Ok(self.write_tables()?.add_power(name, description))
    }

    pub fn hero_power_count(&self) -> Result<usize, AppError> {
        Ok(self.read_tables()?.hero_powers.len())
    }

    fn read_tables(&self) -> Result<RwLockReadGuard<'_, Tables>, AppError> {
        self.tables
            .read()
            .map_err(|_| AppError::Internal("memory store lock poisoned".into()))
    }

    fn write_tables(&self) -> Result<RwLockWriteGuard<'_, Tables>, AppError> {
        self.tables
            .write()
            .map_err(|_| AppError::Internal("memory store lock poisoned".into()))
    }
}

#[async_trait]
impl HeroStore for MemoryStore {
    async fn ping(&self) -> Result<(), AppError> {
        self.read_tables().map(|_| ())
    }

    async fn list_heroes(&self) -> Result<Vec<Hero>, AppError> {
        Ok(self.read_tables()?.heroes.values().cloned().collect())
    }

    async fn get_hero(&self, id: i64) -> Result<Option<Hero>, AppError> {
        Ok(self.read_tables()?.heroes.get(&id).cloned())
    }

    async fn hero_powers_for_hero(&self, hero_id: i64) -> Result<Vec<HeroPowerEntry>, AppError> {
        let t = self.read_tables()?;
        let mut out = Vec::new();
        for hp in t.hero_powers.values().filter(|hp| hp.hero_id == hero_id) {
            let power = t
                .powers
                .get(&hp.power_id)
                .cloned()
                .ok_or_else(|| AppError::Internal(format!("hero power {} references missing power {}", hp.id, hp.power_id)))?;
            out.push(HeroPowerEntry {
                id: hp.id,
                hero_id: hp.hero_id,
                power_id: hp.power_id,
                strength: hp.strength,
                power,
            });
        }
        Ok(out)
    }

    async fn list_powers(&self) -> Result<Vec<Power>, AppError> {
        Ok(self.read_tables()?.powers.values().cloned().collect())
    }

    async fn get_power(&self, id: i64) -> Result<Option<Power>, AppError> {
        Ok(self.read_tables()?.powers.get(&id).cloned())
    }

    async fn update_power_description(&self, id: i64, description: &str) -> Result<Option<Power>, AppError> {
        let mut t = self.write_tables()?;
        Ok(t.powers.get_mut(&id).map(|p| {
            p.description = description.to_string();
            p.clone()
        }))
    }

    async fn insert_hero_power(
        &self,
        hero_id: i64,
        power_id: i64,
        strength: Strength,
    ) -> Result<HeroPower, AppError> {
        let mut t = self.write_tables()?;
        if !t.heroes.contains_key(&hero_id) || !t.powers.contains_key(&power_id) {
            return Err(AppError::Validation(format!(
                "hero {} or power {} does not exist",
                hero_id, power_id
            )));
        }
        let row = HeroPower {
            id: Tables::next_id(&t.hero_powers),
            hero_id,
            power_id,
            strength,
        };
        t.hero_powers.insert(row.id, row.clone());
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seeded_store_lists_in_id_order() {
        let store = MemoryStore::seeded();
        let heroes = store.list_heroes().await.unwrap();
        assert_eq!(heroes.len(), SEED_HEROES.len());
        assert!(heroes.windows(2).all(|w| w[0].id < w[1].id));
        assert_eq!(heroes[0].id, 1);
        let powers = store.list_powers().await.unwrap();
        assert_eq!(powers.len(), SEED_POWERS.len());
    }

    #[tokio::test]
    async fn update_description_of_missing_power_is_none() {
        let store = MemoryStore::new();
        assert!(store.update_power_description(9, "anything").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn inserted_hero_power_shows_up_on_hero() {
        let store = MemoryStore::new();
        let hero = store.add_hero("Doreen Green", "Squirrel Girl").unwrap();
        let power = store.add_power("super strength", "gives the wielder super-human strengths").unwrap();
        let row = store.insert_hero_power(hero.id, power.id, Strength::Average).await.unwrap();
        assert_eq!(row.id, 1);

        let entries = store.hero_powers_for_hero(hero.id).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].power, power);
        assert_eq!(entries[0].strength, Strength::Average);
        assert!(store.hero_powers_for_hero(hero.id + 1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn insert_rejects_dangling_references() {
        let store = MemoryStore::new();
        let hero = store.add_hero("Gwen Stacy", "Spider-Gwen").unwrap();
        let err = store.insert_hero_power(hero.id, 42, Strength::Strong).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(store.hero_power_count().unwrap(), 0);
    }

    #[tokio::test]
    async fn poisoned_lock_is_an_internal_error() {
        let store = std::sync::Arc::new(MemoryStore::seeded());
        let holder = store.clone();
        let joined = std::thread::spawn(move || {
            let _guard = holder.tables.write().unwrap();
            panic!("writer died holding the lock");
        })
        .join();
        assert!(joined.is_err());

        assert!(matches!(store.list_heroes().await, Err(AppError::Internal(_))));
        assert!(matches!(store.update_power_description(1, "x").await, Err(AppError::Internal(_))));
        assert!(matches!(store.add_hero("Jean Grey", "Dark Phoenix"), Err(AppError::Internal(_))));
    }
}
