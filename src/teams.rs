//! Turning external Pokemon records into battle-ready teams.

use crate::battle::state::{SideId, MAX_TEAM_SIZE};
use crate::errors::{PokemonError, PokemonResult, TeamError, TeamResult};
use crate::move_data::{resolve_selected_moves, select_moves};
use crate::pokemon::{Pokemon, MAX_MOVES};
use schema::{BaseStats, Dvs, PokemonType};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

fn default_base_stat() -> u8 {
    50
}

/// Base stats as they arrive in a request; missing fields are 50.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStatsRecord {
    #[serde(default = "default_base_stat")]
    pub hp: u8,
    #[serde(default = "default_base_stat")]
    pub attack: u8,
    #[serde(default = "default_base_stat")]
    pub defense: u8,
    #[serde(default = "default_base_stat")]
    pub special: u8,
    #[serde(default = "default_base_stat")]
    pub speed: u8,
}

impl Default for BaseStatsRecord {
    fn default() -> Self {
        BaseStats::default().into()
    }
}

impl From<BaseStats> for BaseStatsRecord {
    fn from(stats: BaseStats) -> Self {
        Self {
            hp: stats.hp,
            attack: stats.attack,
            defense: stats.defense,
            special: stats.special,
            speed: stats.speed,
        }
    }
}

impl From<BaseStatsRecord> for BaseStats {
    fn from(record: BaseStatsRecord) -> Self {
        Self {
            hp: record.hp,
            attack: record.attack,
            defense: record.defense,
            speed: record.speed,
            special: record.special,
        }
    }
}

/// One team member as described by a caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PokemonRecord {
    pub name: String,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default, rename = "base_stats", alias = "baseStats")]
    pub base_stats: BaseStatsRecord,
    /// Learnable moves, used for automatic selection.
    #[serde(default)]
    pub moves: Vec<String>,
    /// Explicit move choice; takes precedence over `moves` when non-empty.
    #[serde(default)]
    pub selected_moves: Vec<String>,
    #[serde(default)]
    pub level: Option<u8>,
    #[serde(default)]
    pub dvs: Option<Dvs>,
}

/// "PIKACHU" and "pikachu" both become "Pikachu".
pub fn capitalize_name(name: &str) -> String {
    let mut chars = name.trim().chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

pub fn parse_type(name: &str) -> PokemonResult<PokemonType> {
    PokemonType::from_str(name.trim()).map_err(|_| PokemonError::UnknownType(name.to_string()))
}

/// Build one Pokemon. Explicit `selected_moves` are resolved as given (first
/// four, unknown names skipped); otherwise up to four moves are picked from
/// `moves`. Either way an empty result falls back to Tackle.
pub fn build_pokemon(record: &PokemonRecord, default_level: u8) -> PokemonResult<Pokemon> {
    let types = record
        .types
        .iter()
        .map(|name| parse_type(name))
        .collect::<PokemonResult<Vec<_>>>()?;

    let moves = if record.selected_moves.is_empty() {
        select_moves(&record.moves, MAX_MOVES)
    } else {
        resolve_selected_moves(&record.selected_moves)
    };

    Pokemon::new(
        capitalize_name(&record.name),
        types,
        record.level.unwrap_or(default_level),
        record.base_stats.into(),
        record.dvs.unwrap_or_default(),
        moves,
    )
}

/// Build a whole side, rejecting empty and oversized teams before any
/// member is constructed.
pub fn build_team(side: SideId, records: &[PokemonRecord], default_level: u8) -> TeamResult<Vec<Pokemon>> {
    if records.is_empty() {
        return Err(TeamError::Empty { side });
    }
    if records.len() > MAX_TEAM_SIZE {
        return Err(TeamError::TooLarge {
            side,
            size: records.len(),
        });
    }

    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            build_pokemon(record, default_level).map_err(|source| TeamError::Member { side, index, source })
        })
        .collect()
}
