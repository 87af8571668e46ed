use crate::{BaseStats, PokemonType};
use serde::{Deserialize, Serialize};

/// A preset team member. Moves are referenced by move table key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainerPokemonRecord {
    pub name: String,
    pub types: Vec<PokemonType>,
    pub level: u8,
    pub base_stats: BaseStats,
    pub moves: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainerRecord {
    pub id: String,
    pub name: String,
    pub title: String,
    pub description: String,
    pub team: Vec<TrainerPokemonRecord>,
}
