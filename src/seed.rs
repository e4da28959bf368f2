//! Sample heroes and powers, so a fresh database has something to serve.

use crate::error::AppError;
use sqlx::PgPool;

/// `(name, super_name)`
pub const SEED_HEROES: &[(&str, &str)] = &[
    ("Kamala Khan", "Ms. Marvel"),
    ("Doreen Green", "Squirrel Girl"),
    ("Gwen Stacy", "Spider-Gwen"),
    ("Janet Van Dyne", "The Wasp"),
    ("Wanda Maximoff", "Scarlet Witch"),
    ("Carol Danvers", "Captain Marvel"),
    ("Jean Grey", "Dark Phoenix"),
    ("Ororo Munroe", "Storm"),
    ("Kitty Pryde", "Shadowcat"),
    ("Elektra Natchios", "Elektra"),
];

/// `(name, description)`
pub const SEED_POWERS: &[(&str, &str)] = &[
    ("super strength", "gives the wielder super-human strengths"),
    ("flight", "gives the wielder the ability to fly through the skies at supersonic speed"),
    ("super human senses", "allows the wielder to use her senses at a super-human level"),
    ("elasticity", "can stretch the human body to extreme lengths"),
];

/// Insert the sample rows in one transaction, but only when both tables are empty.
/// Returns true if rows were written.
pub async fn seed_if_empty(pool: &PgPool) -> Result<bool, AppError> {
    let mut tx = pool.begin().await?;
    let (heroes,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM heroes")
        .fetch_one(&mut *tx)
        .await?;
    let (powers,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM powers")
        .fetch_one(&mut *tx)
        .await?;
    if heroes > 0 || powers > 0 {
        tracing::debug!(heroes, powers, "tables not empty, skipping seed");
        return Ok(false);
    }

    for &(name, super_name) in SEED_HEROES {
        sqlx::query("INSERT INTO heroes (name, super_name) VALUES ($1, $2)")
            .bind(name)
            .bind(super_name)
            .execute(&mut *tx)
            .await?;
    }
    for &(name, description) in SEED_POWERS {
        sqlx::query("INSERT INTO powers (name, description) VALUES ($1, $2)")
            .bind(name)
            .bind(description)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;
    tracing::info!(heroes = SEED_HEROES.len(), powers = SEED_POWERS.len(), "seeded sample data");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_rows_are_usable() {
        assert!(SEED_HEROES.iter().all(|(n, s)| !n.is_empty() && !s.is_empty()));
        // Descriptions must satisfy the same rule PATCH /powers enforces.
        assert!(SEED_POWERS.iter().all(|(n, d)| !n.is_empty() && !d.is_empty()));
    }
}
