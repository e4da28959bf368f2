//! Plain records for heroes, powers and hero powers, plus the response views built from them.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Hero {
    pub id: i64,
    pub name: String,
    pub super_name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Power {
    pub id: i64,
    pub name: String,
    pub description: String,
}

/// Strength of a hero's power. Stored and serialized as its variant name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strength {
    Strong,
    Weak,
    Average,
}

impl Strength {
    pub const ALL: [Strength; 3] = [Strength::Strong, Strength::Weak, Strength::Average];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strength::Strong => "Strong",
            Strength::Weak => "Weak",
            Strength::Average => "Average",
        }
    }
}

impl std::fmt::Display for Strength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Strength {
    type Err = String;

    /// Case-sensitive: only the exact variant names are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strength::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| format!("invalid strength: {}", s))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroPower {
    pub id: i64,
    pub hero_id: i64,
    pub power_id: i64,
    pub strength: Strength,
}

/// Hero with its associated powers, returned by `GET /heroes/:id`.
#[derive(Clone, Debug, Serialize)]
pub struct HeroDetail {
    pub id: i64,
    pub name: String,
    pub super_name: String,
    pub hero_powers: Vec<HeroPowerEntry>,
}

/// One association inside [`HeroDetail`]; embeds the power it points to.
#[derive(Clone, Debug, Serialize)]
pub struct HeroPowerEntry {
    pub id: i64,
    pub hero_id: i64,
    pub power_id: i64,
    pub strength: Strength,
    pub power: Power,
}

/// Denormalized hero power returned by `POST /hero_powers`.
#[derive(Clone, Debug, Serialize)]
pub struct HeroPowerView {
    pub id: i64,
    pub hero_id: i64,
    pub power_id: i64,
    pub strength: Strength,
    pub hero: Hero,
    pub power: Power,
}

impl HeroDetail {
    pub fn new(hero: Hero, hero_powers: Vec<HeroPowerEntry>) -> Self {
        HeroDetail {
            id: hero.id,
            name: hero.name,
            super_name: hero.super_name,
            hero_powers,
        }
    }
}

impl HeroPowerView {
    pub fn new(row: HeroPower, hero: Hero, power: Power) -> Self {
        HeroPowerView {
            id: row.id,
            hero_id: row.hero_id,
            power_id: row.power_id,
            strength: row.strength,
            hero,
            power,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strength_parses_exact_names_only() {
        assert_eq!("Strong".parse::<Strength>(), Ok(Strength::Strong));
        assert_eq!("Average".parse::<Strength>(), Ok(Strength::Average));
        assert!("strong".parse::<Strength>().is_err());
        assert!("Mighty".parse::<Strength>().is_err());
        assert!("".parse::<Strength>().is_err());
    }

    #[test]
    fn hero_power_view_embeds_parents() {
        let hero = Hero { id: 1, name: "Kamala Khan".into(), super_name: "Ms. Marvel".into() };
        let power = Power { id: 2, name: "flight".into(), description: "gives the wielder the ability to fly".into() };
        let row = HeroPower { id: 7, hero_id: 1, power_id: 2, strength: Strength::Weak };
        let value = serde_json::to_value(HeroPowerView::new(row, hero, power)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": 7,
                "hero_id": 1,
                "power_id": 2,
                "strength": "Weak",
                "hero": {"id": 1, "name": "Kamala Khan", "super_name": "Ms. Marvel"},
                "power": {"id": 2, "name": "flight", "description": "gives the wielder the ability to fly"}
            })
        );
    }
}
