use schema::{MoveCategory, MoveRecord, PokemonType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A move as known by a specific Pokemon, with its own PP counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub name: String,
    pub move_type: PokemonType,
    pub power: u8,
    pub accuracy: Option<u8>,
    pub pp: u8,
    pub max_pp: u8,
}

impl Move {
    pub fn new(
        name: impl Into<String>,
        move_type: PokemonType,
        power: u8,
        accuracy: Option<u8>,
        max_pp: u8,
    ) -> Self {
        Self {
            name: name.into(),
            move_type,
            power,
            accuracy,
            pp: max_pp,
            max_pp,
        }
    }

    /// Builds a move from a table row, converting the hyphenated key into a
    /// display name ("thunder-shock" becomes "Thunder Shock").
    pub fn from_record(record: &MoveRecord) -> Self {
        Self::new(
            display_name(&record.name),
            record.move_type,
            record.power,
            record.accuracy,
            record.pp,
        )
    }

    pub fn is_usable(&self) -> bool {
        self.pp > 0
    }

    /// Spend one PP. Returns false if the move was already exhausted.
    pub fn use_move(&mut self) -> bool {
        if self.pp == 0 {
            return false;
        }
        self.pp -= 1;
        true
    }

    pub fn restore_pp(&mut self) {
        self.pp = self.max_pp;
    }

    pub fn is_damaging(&self) -> bool {
        self.power > 0
    }

    pub fn is_physical(&self) -> bool {
        self.move_type.is_physical()
    }

    pub fn category(&self) -> MoveCategory {
        if self.power == 0 {
            MoveCategory::Status
        } else if self.is_physical() {
            MoveCategory::Physical
        } else {
            MoveCategory::Special
        }
    }

    /// Case-insensitive match against either the display name or the table key.
    pub fn matches_name(&self, name: &str) -> bool {
        normalize_move_name(&self.name) == normalize_move_name(name)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {} power, {}/{} PP)",
            self.name, self.move_type, self.power, self.pp, self.max_pp
        )
    }
}

/// Lowercase, hyphenated form used as the move table key.
pub fn normalize_move_name(name: &str) -> String {
    name.trim()
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|word| !word.is_empty())
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

/// Title-cased display form of a table key.
pub fn display_name(key: &str) -> String {
    key.split('-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(|c| c.to_lowercase()))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
