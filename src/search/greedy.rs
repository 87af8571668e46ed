//! One-ply lookahead: always take the hardest-hitting move available now.

use crate::battle::calculators::Roll;
use crate::battle::engine::{Engine, Successor};
use crate::battle::state::{BattleState, MoveRef};
use crate::search::result::{SearchResult, SearchStats};
use crate::search::Strategy;
use ordered_float::OrderedFloat;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// How candidate moves are scored each ply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Ranking {
    /// The engine's own deterministic damage for the ply.
    #[default]
    Expected,
    /// A freshly rolled damage value per candidate, reproducible by seed.
    /// Only the ranking is random; the chosen ply is still the engine's.
    Sampled { seed: u64 },
    /// Average-roll damage weighted by the attacker's critical-hit chance.
    #[serde(rename = "crit_weighted")]
    CritWeighted,
}

pub struct GreedySearch<'a> {
    engine: Engine<'a>,
    max_turns: u32,
    ranking: Ranking,
}

impl<'a> GreedySearch<'a> {
    pub fn new(engine: Engine<'a>, max_turns: u32) -> Self {
        Self {
            engine,
            max_turns,
            ranking: Ranking::Expected,
        }
    }

    pub fn with_ranking(mut self, ranking: Ranking) -> Self {
        self.ranking = ranking;
        self
    }

    pub fn run(&self, initial: &BattleState) -> SearchResult {
        let mut rng = match self.ranking {
            Ranking::Expected | Ranking::CritWeighted => None,
            Ranking::Sampled { seed } => Some(StdRng::seed_from_u64(seed)),
        };
        let mut state = initial.clone();
        let mut actions: Vec<MoveRef> = Vec::new();
        let mut stats = SearchStats::default();

        while !state.is_terminal() && (actions.len() as u32) < self.max_turns {
            let mut successors = self.engine.successors(&state);
            stats.states_explored += successors.len();
            if successors.is_empty() {
                tracing::warn!(
                    turn = state.turn,
                    "greedy: no move can damage the opponent, stopping early"
                );
                break;
            }

            let chosen = self.pick(&state, &successors, rng.as_mut());
            let successor = successors.swap_remove(chosen);
            tracing::debug!(
                turn = successor.state.turn,
                move_name = successor.move_name(),
                damage = successor.damage,
                "greedy ply"
            );
            actions.push(successor.action);
            state = successor.state;
        }

        if !state.is_terminal() && actions.len() as u32 >= self.max_turns {
            tracing::warn!(max_turns = self.max_turns, "greedy: turn limit reached before the battle ended");
        }

        let result = SearchResult::assemble(Strategy::Greedy, state, actions, stats);
        tracing::info!(
            success = result.success(),
            turns = result.turns,
            total_damage = result.total_damage,
            "greedy search finished"
        );
        result
    }

    /// Index of the best-scoring successor. Every candidate goes into a max
    /// heap and a single pop decides; equal scores go to the
    /// alphabetically last move name, then to the lower slot.
    fn pick(&self, state: &BattleState, successors: &[Successor], mut rng: Option<&mut StdRng>) -> usize {
        let mut heap: BinaryHeap<(OrderedFloat<f64>, &str, Reverse<usize>)> =
            BinaryHeap::with_capacity(successors.len());

        for (index, successor) in successors.iter().enumerate() {
            let score = match (self.ranking, rng.as_deref_mut()) {
                (_, Some(rng)) => self.sampled_damage(state, successor.action, rng),
                (Ranking::CritWeighted, None) => self.crit_weighted_damage(state, successor.action),
                (_, None) => successor.damage as f64,
            };
            heap.push((OrderedFloat(score), successor.move_name(), Reverse(index)));
        }

        heap.pop().map(|(_, _, Reverse(index))| index).unwrap_or(0)
    }

    fn sampled_damage(&self, state: &BattleState, action: MoveRef, rng: &mut StdRng) -> f64 {
        let attacker = state.player().active_pokemon();
        let defender = state.opponent().active_pokemon();
        let Some(move_used) = attacker.move_at(action.slot as usize) else {
            return 0.0;
        };
        let roll = Roll::sample(rng, attacker);
        self.engine
            .resolver()
            .resolve(attacker, defender, move_used, Some(roll.critical), Some(roll.roll)) as f64
    }

    fn crit_weighted_damage(&self, state: &BattleState, action: MoveRef) -> f64 {
        let attacker = state.player().active_pokemon();
        let defender = state.opponent().active_pokemon();
        attacker
            .move_at(action.slot as usize)
            .map(|move_used| self.engine.resolver().expected_damage(attacker, defender, move_used, true))
            .unwrap_or(0.0)
    }
}
