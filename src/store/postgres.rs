//! PostgreSQL implementation of [`HeroStore`] plus connection helpers.

use crate::config::ServerConfig;
use crate::error::AppError;
use crate::model::{Hero, HeroPower, HeroPowerEntry, Power, Strength};
use crate::store::HeroStore;
use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;
use std::time::Duration;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Open the pool described by `config`.
pub async fn connect(config: &ServerConfig) -> Result<PgPool, AppError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&config.database_url)
        .await?;
    Ok(pool)
}

fn parse_strength(raw: &str) -> Result<Strength, AppError> {
    raw.parse()
        .map_err(|e: String| AppError::Internal(format!("hero_powers row: {}", e)))
}

type EntryRow = (i64, i64, i64, String, i64, String, String);

#[async_trait]
impl HeroStore for PgStore {
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_heroes(&self) -> Result<Vec<Hero>, AppError> {
        let sql = "SELECT id, name, super_name FROM heroes ORDER BY id";
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, Hero>(sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn get_hero(&self, id: i64) -> Result<Option<Hero>, AppError> {
        let sql = "SELECT id, name, super_name FROM heroes WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Hero>(sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn hero_powers_for_hero(&self, hero_id: i64) -> Result<Vec<HeroPowerEntry>, AppError> {
        let sql = "SELECT hp.id, hp.hero_id, hp.power_id, hp.strength, p.id, p.name, p.description \
                   FROM hero_powers hp JOIN powers p ON p.id = hp.power_id \
                   WHERE hp.hero_id = $1 ORDER BY hp.id";
        tracing::debug!(sql = %sql, hero_id, "query");
        let rows: Vec<EntryRow> = sqlx::query_as(sql).bind(hero_id).fetch_all(&self.pool).await?;
        rows.into_iter()
            .map(|(id, hero_id, power_id, strength, pid, name, description)| {
                Ok(HeroPowerEntry {
                    id,
                    hero_id,
                    power_id,
                    strength: parse_strength(&strength)?,
                    power: Power { id: pid, name, description },
                })
            })
            .collect()
    }

    async fn list_powers(&self) -> Result<Vec<Power>, AppError> {
        let sql = "SELECT id, name, description FROM powers ORDER BY id";
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, Power>(sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn get_power(&self, id: i64) -> Result<Option<Power>, AppError> {
        let sql = "SELECT id, name, description FROM powers WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Power>(sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update_power_description(&self, id: i64, description: &str) -> Result<Option<Power>, AppError> {
        let sql = "UPDATE powers SET description = $1 WHERE id = $2 RETURNING id, name, description";
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Power>(sql)
            .bind(description)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert_hero_power(
        &self,
        hero_id: i64,
        power_id: i64,
        strength: Strength,
    ) -> Result<HeroPower, AppError> {
        let sql = "INSERT INTO hero_powers (hero_id, power_id, strength) VALUES ($1, $2, $3) RETURNING id";
        tracing::debug!(sql = %sql, hero_id, power_id, strength = %strength, "query");
        let result = sqlx::query_as::<_, (i64,)>(sql)
            .bind(hero_id)
            .bind(power_id)
            .bind(strength.as_str())
            .fetch_one(&self.pool)
            .await;
        match result {
            Ok((id,)) => Ok(HeroPower { id, hero_id, power_id, strength }),
            // A parent vanished between the existence check and the insert.
            Err(sqlx::Error::Database(e)) if e.is_foreign_key_violation() => Err(AppError::Validation(format!(
                "hero {} or power {} does not exist",
                hero_id, power_id
            ))),
            Err(e) => Err(AppError::Db(e)),
        }
    }
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let Some((admin, db_name)) = admin_options(database_url)? else {
        return Ok(());
    };
    let mut conn: sqlx::PgConnection = admin.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Connection options for the `postgres` admin database on the same server, plus the
/// target database name. None when the URL names no database or names `postgres` itself.
fn admin_options(database_url: &str) -> Result<Option<(PgConnectOptions, String)>, AppError> {
    let opts = PgConnectOptions::from_str(database_url)
        .map_err(|e| AppError::Internal(format!("invalid DATABASE_URL: {}", e)))?;
    let db_name = match opts.get_database() {
        Some(name) if !name.is_empty() && name != "postgres" => name.to_string(),
        _ => return Ok(None),
    };
    Ok(Some((opts.database("postgres"), db_name)))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
