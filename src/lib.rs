//! Hero powers: REST backend for heroes, powers and the strengths that join them.

pub mod config;
pub mod error;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod response;
pub mod routes;
pub mod seed;
pub mod service;
pub mod state;
pub mod store;

pub use config::{ServerConfig, StoreBackend};
pub use error::{AppError, ConfigError, Entity};
pub use migration::apply_migrations;
pub use model::{Hero, HeroDetail, HeroPower, HeroPowerView, Power, Strength};
pub use routes::{app, common_routes, roster_routes};
pub use seed::seed_if_empty;
pub use service::RosterService;
pub use state::AppState;
pub use store::{connect, ensure_database_exists, HeroStore, MemoryStore, PgStore};
