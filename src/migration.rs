//! Idempotent DDL for the heroes, powers and hero_powers tables.
//! Order follows foreign key dependencies: parents before the join table.

use crate::error::AppError;
use sqlx::PgPool;

pub const CREATE_HEROES: &str = r#"
CREATE TABLE IF NOT EXISTS heroes (
    id BIGSERIAL PRIMARY KEY,
    name TEXT NOT NULL,
    super_name TEXT NOT NULL
)
"#;

pub const CREATE_POWERS: &str = r#"
CREATE TABLE IF NOT EXISTS powers (
    id BIGSERIAL PRIMARY KEY,
    name TEXT NOT NULL,
    description TEXT NOT NULL
)
"#;

pub const CREATE_HERO_POWERS: &str = r#"
CREATE TABLE IF NOT EXISTS hero_powers (
    id BIGSERIAL PRIMARY KEY,
    hero_id BIGINT NOT NULL REFERENCES heroes (id) ON DELETE CASCADE,
    power_id BIGINT NOT NULL REFERENCES powers (id) ON DELETE CASCADE,
    strength TEXT NOT NULL CONSTRAINT hero_powers_strength_check CHECK (strength IN ('Strong', 'Weak', 'Average'))
)
"#;

pub const CREATE_HERO_POWERS_HERO_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS hero_powers_hero_id_idx ON hero_powers (hero_id)";

/// Statements in the order they must run.
pub const SCHEMA: &[&str] = &[
    CREATE_HEROES,
    CREATE_POWERS,
    CREATE_HERO_POWERS,
    CREATE_HERO_POWERS_HERO_INDEX,
];

/// Create the tables if they do not exist yet. Existing tables are left as they are.
pub async fn apply_migrations(pool: &PgPool) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;
    for ddl in SCHEMA {
        sqlx::query(ddl).execute(&mut *tx).await?;
    }
    tx.commit().await?;
    tracing::info!(statements = SCHEMA.len(), "schema ensured");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_table_is_created_after_its_parents() {
        let pos = |needle: &str| SCHEMA.iter().position(|s| s.contains(needle)).unwrap();
        assert!(pos("TABLE IF NOT EXISTS heroes") < pos("TABLE IF NOT EXISTS hero_powers"));
        assert!(pos("TABLE IF NOT EXISTS powers") < pos("TABLE IF NOT EXISTS hero_powers"));
    }

    #[test]
    fn strength_check_lists_every_variant() {
        for s in crate::model::Strength::ALL {
            assert!(CREATE_HERO_POWERS.contains(&format!("'{}'", s)));
        }
    }
}
