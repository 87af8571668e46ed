use crate::errors::{PokemonError, PokemonResult};
use crate::moves::Move;
use schema::{BaseStats, Dvs, PokemonType};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MAX_MOVES: usize = 4;
pub const MIN_LEVEL: u8 = 1;
pub const MAX_LEVEL: u8 = 100;

/// Stats derived once from base stats, DVs and level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub max_hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub speed: u16,
    pub special: u16,
}

impl Stats {
    /// Generation 1 stat formulas with maximum stat experience (the `+ 63` term).
    pub fn calculate(base: &BaseStats, dvs: &Dvs, level: u8) -> Self {
        Self {
            max_hp: calculate_hp(base.hp, dvs.hp, level),
            attack: calculate_stat(base.attack, dvs.attack, level),
            defense: calculate_stat(base.defense, dvs.defense, level),
            speed: calculate_stat(base.speed, dvs.speed, level),
            special: calculate_stat(base.special, dvs.special, level),
        }
    }
}

fn scaled(base: u8, dv: u8, level: u8) -> u32 {
    ((base as u32 + dv as u32) * 2 + 63) * level as u32 / 100
}

pub fn calculate_hp(base: u8, dv: u8, level: u8) -> u16 {
    (scaled(base, dv, level) + level as u32 + 10) as u16
}

pub fn calculate_stat(base: u8, dv: u8, level: u8) -> u16 {
    (scaled(base, dv, level) + 5) as u16
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pokemon {
    pub name: String,
    types: Vec<PokemonType>,
    pub level: u8,
    pub base_stats: BaseStats,
    pub dvs: Dvs,
    pub stats: Stats,
    pub current_hp: u16,
    pub moves: [Option<Move>; MAX_MOVES],
}

impl Pokemon {
    /// Build a combatant at full health. Fails on an out-of-range level or DV,
    /// a type list that is not one or two long, or more than four moves.
    pub fn new(
        name: impl Into<String>,
        types: Vec<PokemonType>,
        level: u8,
        base_stats: BaseStats,
        dvs: Dvs,
        moves: Vec<Move>,
    ) -> PokemonResult<Self> {
        if !(MIN_LEVEL..=MAX_LEVEL).contains(&level) {
            return Err(PokemonError::InvalidLevel(level));
        }
        if types.is_empty() || types.len() > 2 {
            return Err(PokemonError::InvalidTypeCount(types.len()));
        }
        if moves.len() > MAX_MOVES {
            return Err(PokemonError::TooManyMoves(moves.len()));
        }
        if let Some((stat, value)) = dvs.first_invalid() {
            return Err(PokemonError::InvalidDv { stat, value });
        }

        let stats = Stats::calculate(&base_stats, &dvs, level);
        let mut slots: [Option<Move>; MAX_MOVES] = [const { None }; MAX_MOVES];
        for (slot, mv) in slots.iter_mut().zip(moves) {
            *slot = Some(mv);
        }

        Ok(Self {
            name: name.into(),
            types,
            level,
            base_stats,
            dvs,
            stats,
            current_hp: stats.max_hp,
            moves: slots,
        })
    }

    pub fn types(&self) -> &[PokemonType] {
        &self.types
    }

    /// Primary and optional secondary type, in declaration order.
    pub fn type_pair(&self) -> (PokemonType, Option<PokemonType>) {
        (self.types[0], self.types.get(1).copied())
    }

    pub fn has_type(&self, pokemon_type: PokemonType) -> bool {
        self.types.contains(&pokemon_type)
    }

    pub fn max_hp(&self) -> u16 {
        self.stats.max_hp
    }

    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0
    }

    /// Apply damage clamped at zero. Returns the HP actually lost.
    pub fn take_damage(&mut self, damage: u16) -> u16 {
        let dealt = damage.min(self.current_hp);
        self.current_hp -= dealt;
        dealt
    }

    /// Restore HP up to the maximum. Returns the HP actually restored.
    pub fn heal(&mut self, amount: u16) -> u16 {
        let restored = amount.min(self.stats.max_hp - self.current_hp);
        self.current_hp += restored;
        restored
    }

    pub fn set_hp(&mut self, hp: u16) {
        self.current_hp = hp.min(self.stats.max_hp);
    }

    pub fn hp_percentage(&self) -> f32 {
        if self.stats.max_hp == 0 {
            return 0.0;
        }
        self.current_hp as f32 / self.stats.max_hp as f32 * 100.0
    }

    pub fn move_at(&self, slot: usize) -> Option<&Move> {
        self.moves.get(slot).and_then(Option::as_ref)
    }

    /// Slot index of the move with this name, if known.
    pub fn move_slot(&self, name: &str) -> Option<usize> {
        self.moves
            .iter()
            .position(|slot| slot.as_ref().is_some_and(|mv| mv.matches_name(name)))
    }

    pub fn move_by_name(&self, name: &str) -> Option<&Move> {
        self.move_slot(name).and_then(|slot| self.move_at(slot))
    }

    pub fn known_moves(&self) -> impl Iterator<Item = (usize, &Move)> {
        self.moves
            .iter()
            .enumerate()
            .filter_map(|(slot, mv)| mv.as_ref().map(|mv| (slot, mv)))
    }

    pub fn move_count(&self) -> usize {
        self.known_moves().count()
    }

    /// Put a move in the first empty slot. Returns the slot, or `None` if all
    /// four are taken.
    pub fn add_move(&mut self, mv: Move) -> Option<usize> {
        let slot = self.moves.iter().position(Option::is_none)?;
        self.moves[slot] = Some(mv);
        Some(slot)
    }

    /// Remove a move by name, leaving its slot empty.
    pub fn remove_move(&mut self, name: &str) -> Option<Move> {
        let slot = self.move_slot(name)?;
        self.moves[slot].take()
    }
}

impl fmt::Display for Pokemon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let types: Vec<String> = self.types.iter().map(ToString::to_string).collect();
        write!(
            f,
            "{} Lv.{} [{}] {}/{} HP",
            self.name,
            self.level,
            types.join("/"),
            self.current_hp,
            self.stats.max_hp
        )
    }
}
