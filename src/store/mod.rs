//! Persistence seam. Handlers only see [`HeroStore`]; each call is one explicit read or write.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::{connect, ensure_database_exists, PgStore};

use crate::error::AppError;
use crate::model::{Hero, HeroPower, HeroPowerEntry, Power, Strength};
use async_trait::async_trait;

#[async_trait]
pub trait HeroStore: Send + Sync {
    /// Cheap round trip used by the readiness probe.
    async fn ping(&self) -> Result<(), AppError>;

    async fn list_heroes(&self) -> Result<Vec<Hero>, AppError>;

    async fn get_hero(&self, id: i64) -> Result<Option<Hero>, AppError>;

    /// Associations of one hero, each with its power, ordered by association id.
    async fn hero_powers_for_hero(&self, hero_id: i64) -> Result<Vec<HeroPowerEntry>, AppError>;

    async fn list_powers(&self) -> Result<Vec<Power>, AppError>;

    async fn get_power(&self, id: i64) -> Result<Option<Power>, AppError>;

    /// Returns the updated row, or None if no power has this id.
    async fn update_power_description(&self, id: i64, description: &str) -> Result<Option<Power>, AppError>;

    /// Caller must have checked that both parents exist.
    async fn insert_hero_power(
        &self,
        hero_id: i64,
        power_id: i64,
        strength: Strength,
    ) -> Result<HeroPower, AppError>;
}
