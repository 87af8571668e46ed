//! Opponent behavior. The opponent is not a search participant: it answers
//! every player move with a fixed, deterministic choice.

use crate::battle::state::BattleState;
use crate::battle::type_chart::TypeChart;
use crate::moves::Move;
use crate::pokemon::Pokemon;

/// A trait for any system that picks the opponent's counter-move.
pub trait OpponentPolicy {
    /// Slot of the opponent's active Pokemon to use against the player's
    /// active Pokemon, or `None` if it has no usable move.
    fn select_move(&self, state: &BattleState) -> Option<usize>;
}

/// Gen 1 trainer-style move choice: every usable move starts at a baseline
/// priority, super-effective moves are preferred and resisted ones avoided.
/// The lowest priority wins, then the highest base power, then the lowest slot.
#[derive(Debug, Clone, Copy)]
pub struct TrainerAi<'a> {
    chart: &'a TypeChart,
}

impl<'a> TrainerAi<'a> {
    pub const BASE_PRIORITY: i32 = 10;

    pub fn new(chart: &'a TypeChart) -> Self {
        Self { chart }
    }

    pub fn move_priority(&self, mv: &Move, target: &Pokemon) -> i32 {
        let multiplier = self.chart.against(mv.move_type, target);
        if multiplier > 1.0 {
            Self::BASE_PRIORITY - 1
        } else if multiplier < 1.0 {
            Self::BASE_PRIORITY + 1
        } else {
            Self::BASE_PRIORITY
        }
    }
}

impl OpponentPolicy for TrainerAi<'_> {
    fn select_move(&self, state: &BattleState) -> Option<usize> {
        let opponent = state.opponent();
        let target = state.player().active_pokemon();

        opponent
            .usable_slots()
            .filter_map(|slot| opponent.usable_move(slot).map(|mv| (slot, mv)))
            .min_by(|(slot_a, a), (slot_b, b)| {
                self.move_priority(a, target)
                    .cmp(&self.move_priority(b, target))
                    .then_with(|| b.power.cmp(&a.power))
                    .then_with(|| slot_a.cmp(slot_b))
            })
            .map(|(slot, _)| slot)
    }
}
