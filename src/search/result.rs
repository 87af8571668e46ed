use crate::battle::state::{BattleState, MoveRef, Outcome};
use crate::search::Strategy;
use serde::Serialize;
use std::fmt;

/// Bookkeeping gathered while searching. Reporting only.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchStats {
    pub states_explored: usize,
    pub cache_hits: usize,
    pub cache_misses: usize,
    /// Length of the chosen graph path; set by graph search only.
    pub path_cost: Option<f64>,
}

impl SearchStats {
    /// Hits over lookups, 0 when nothing was looked up.
    pub fn cache_hit_rate(&self) -> f64 {
        let lookups = self.cache_hits + self.cache_misses;
        if lookups == 0 {
            0.0
        } else {
            self.cache_hits as f64 / lookups as f64
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchResult {
    pub strategy: Strategy,
    pub outcome: Outcome,
    /// Sum of HP lost across the whole opponent team.
    pub total_damage: u32,
    pub turns: usize,
    pub move_sequence: Vec<String>,
    /// The same sequence as member/slot references, for replaying.
    pub actions: Vec<MoveRef>,
    pub final_state: BattleState,
    pub stats: SearchStats,
}

impl SearchResult {
    /// Build a result from the actions a strategy settled on and the state
    /// they lead to. Anything short of the opponent being wiped is a defeat.
    pub fn assemble(
        strategy: Strategy,
        final_state: BattleState,
        actions: Vec<MoveRef>,
        stats: SearchStats,
    ) -> Self {
        let move_sequence = actions
            .iter()
            .map(|&action| {
                final_state
                    .player()
                    .move_name(action)
                    .unwrap_or_default()
                    .to_string()
            })
            .collect();
        let outcome = if final_state.player_won() {
            Outcome::Victory
        } else {
            Outcome::Defeat
        };

        Self {
            strategy,
            outcome,
            total_damage: final_state.total_damage_dealt(),
            turns: actions.len(),
            move_sequence,
            actions,
            final_state,
            stats,
        }
    }

    /// A defeat with no moves and no damage, reported from `initial`.
    pub fn failure(strategy: Strategy, initial: &BattleState, stats: SearchStats) -> Self {
        Self {
            strategy,
            outcome: Outcome::Defeat,
            total_damage: 0,
            turns: 0,
            move_sequence: Vec::new(),
            actions: Vec::new(),
            final_state: initial.clone(),
            stats,
        }
    }

    pub fn success(&self) -> bool {
        self.outcome.is_victory()
    }
}

impl fmt::Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} in {} turns, {} damage",
            self.strategy,
            if self.success() { "victory" } else { "defeat" },
            self.turns,
            self.total_damage
        )?;
        if self.stats.cache_hits + self.stats.cache_misses > 0 {
            write!(f, ", cache hit rate {:.1}%", self.stats.cache_hit_rate() * 100.0)?;
        }
        if self.stats.states_explored > 0 {
            write!(f, ", {} states explored", self.stats.states_explored)?;
        }
        Ok(())
    }
}
