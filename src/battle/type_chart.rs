//! Immutable type-effectiveness table, built once and passed by reference.

use crate::pokemon::Pokemon;
use schema::PokemonType;
use strum::{EnumCount, IntoEnumIterator};

const TYPES: usize = PokemonType::COUNT;

#[derive(Debug, Clone, PartialEq)]
pub struct TypeChart {
    multipliers: [[f32; TYPES]; TYPES],
}

impl Default for TypeChart {
    fn default() -> Self {
        Self::gen1()
    }
}

impl TypeChart {
    /// The Generation 1 chart.
    pub fn gen1() -> Self {
        let mut multipliers = [[1.0; TYPES]; TYPES];
        for attacking in PokemonType::iter() {
            for defending in PokemonType::iter() {
                multipliers[attacking.index()][defending.index()] =
                    PokemonType::type_effectiveness(attacking, defending);
            }
        }
        Self { multipliers }
    }

    /// A chart with every matchup neutral.
    pub fn neutral() -> Self {
        Self {
            multipliers: [[1.0; TYPES]; TYPES],
        }
    }

    /// Copy of this chart with one matchup replaced.
    pub fn with_override(mut self, attacking: PokemonType, defending: PokemonType, multiplier: f32) -> Self {
        self.multipliers[attacking.index()][defending.index()] = multiplier;
        self
    }

    pub fn multiplier(&self, attacking: PokemonType, defending: PokemonType) -> f32 {
        self.multipliers[attacking.index()][defending.index()]
    }

    /// Product of both matchups for dual-typed defenders.
    pub fn dual_multiplier(
        &self,
        attacking: PokemonType,
        primary: PokemonType,
        secondary: Option<PokemonType>,
    ) -> f32 {
        let mut multiplier = self.multiplier(attacking, primary);
        if let Some(secondary) = secondary {
            multiplier *= self.multiplier(attacking, secondary);
        }
        multiplier
    }

    pub fn against(&self, attacking: PokemonType, defender: &Pokemon) -> f32 {
        let (primary, secondary) = defender.type_pair();
        self.dual_multiplier(attacking, primary, secondary)
    }

    pub fn is_super_effective(&self, attacking: PokemonType, defender: &Pokemon) -> bool {
        self.against(attacking, defender) > 1.0
    }

    pub fn is_not_very_effective(&self, attacking: PokemonType, defender: &Pokemon) -> bool {
        let multiplier = self.against(attacking, defender);
        multiplier > 0.0 && multiplier < 1.0
    }

    pub fn is_immune(&self, attacking: PokemonType, defender: &Pokemon) -> bool {
        self.against(attacking, defender) == 0.0
    }
}

/// Battle text for a combined multiplier. `None` for neutral hits.
pub fn effectiveness_text(multiplier: f32) -> Option<&'static str> {
    if multiplier == 0.0 {
        Some("It doesn't affect the foe...")
    } else if multiplier >= 4.0 {
        Some("It's super effective! (4x)")
    } else if multiplier >= 2.0 {
        Some("It's super effective!")
    } else if multiplier <= 0.25 {
        Some("It's not very effective... (0.25x)")
    } else if multiplier < 1.0 {
        Some("It's not very effective...")
    } else {
        None
    }
}
