//! Teams, player classes, and the fixed team formation.

#[cfg(test)]
#[path = "roster_test.rs"]
mod roster_test;

use serde::{Deserialize, Serialize};

use crate::viewport::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    Red,
    Blu,
}

impl Team {
    pub const ALL: [Self; 2] = [Self::Red, Self::Blu];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Blu => "blu",
        }
    }

    /// Parse a team name as used in asset file names (`"red"`, `"blu"`).
    /// `"blue"` is accepted as well.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "red" => Some(Self::Red),
            "blu" | "blue" => Some(Self::Blu),
            _ => None,
        }
    }
}

/// The nine playable classes, named as in their asset file names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerClass {
    Scout,
    Soldier,
    Pyro,
    Demo,
    Heavy,
    Engi,
    Med,
    Sniper,
    Spy,
}

impl PlayerClass {
    pub const ALL: [Self; 9] = [
        Self::Scout,
        Self::Soldier,
        Self::Pyro,
        Self::Demo,
        Self::Heavy,
        Self::Engi,
        Self::Med,
        Self::Sniper,
        Self::Spy,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scout => "scout",
            Self::Soldier => "soldier",
            Self::Pyro => "pyro",
            Self::Demo => "demo",
            Self::Heavy => "heavy",
            Self::Engi => "engi",
            Self::Med => "med",
            Self::Sniper => "sniper",
            Self::Spy => "spy",
        }
    }
}

/// Standard 6v6 line-up, left to right: medic, demo, two scouts, two soldiers.
pub const FORMATION: [PlayerClass; 6] = [
    PlayerClass::Med,
    PlayerClass::Demo,
    PlayerClass::Scout,
    PlayerClass::Scout,
    PlayerClass::Soldier,
    PlayerClass::Soldier,
];

/// Asset path of a class icon, e.g. `med_red.png`.
#[must_use]
pub fn class_asset_path(class: PlayerClass, team: Team) -> String {
    format!("{}_{}.png", class.as_str(), team.as_str())
}

/// Every class icon for both teams, in preload order.
#[must_use]
pub fn all_asset_paths() -> Vec<String> {
    PlayerClass::ALL
        .iter()
        .flat_map(|&class| Team::ALL.iter().map(move |&team| class_asset_path(class, team)))
        .collect()
}

/// Centers of the formation slots: a horizontal line through `center`,
/// `spacing` apart, whose midpoint is `center`.
#[must_use]
pub fn formation_centers(center: Point, spacing: f64) -> [Point; FORMATION.len()] {
    #[allow(clippy::cast_precision_loss)]
    let start_x = center.x - spacing * (FORMATION.len() - 1) as f64 / 2.0;
    std::array::from_fn(|i| {
        #[allow(clippy::cast_precision_loss)]
        let x = start_x + i as f64 * spacing;
        Point::new(x, center.y)
    })
}
