use serde::{Deserialize, Serialize};

/// Generation 1 base stats. Special covers both special attack and defense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u8,
    pub attack: u8,
    pub defense: u8,
    pub speed: u8,
    pub special: u8,
}

impl Default for BaseStats {
    fn default() -> Self {
        Self {
            hp: 50,
            attack: 50,
            defense: 50,
            speed: 50,
            special: 50,
        }
    }
}

pub const MAX_DV: u8 = 15;

/// Determinant values, 0..=15 per stat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dvs {
    pub hp: u8,
    pub attack: u8,
    pub defense: u8,
    pub speed: u8,
    pub special: u8,
}

impl Default for Dvs {
    fn default() -> Self {
        Self::perfect()
    }
}

impl Dvs {
    pub const fn perfect() -> Self {
        Self {
            hp: MAX_DV,
            attack: MAX_DV,
            defense: MAX_DV,
            speed: MAX_DV,
            special: MAX_DV,
        }
    }

    /// Returns the first stat whose value is out of range, if any.
    pub fn first_invalid(&self) -> Option<(&'static str, u8)> {
        [
            ("hp", self.hp),
            ("attack", self.attack),
            ("defense", self.defense),
            ("speed", self.speed),
            ("special", self.special),
        ]
        .into_iter()
        .find(|(_, value)| *value > MAX_DV)
    }
}
