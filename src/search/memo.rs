//! Depth-bounded best-value search with a state cache.
//!
//! `best(s)` is the total opponent damage on a won terminal state, 0 on a
//! lost one, and otherwise the maximum over successors of
//! `immediate damage + best(successor)`. Anything `max_depth` plies below
//! the evaluation root is worth 0. Evaluation runs on an explicit stack of
//! frames, so deep battles never grow the call stack.

use crate::battle::engine::{Engine, Successor};
use crate::battle::state::{BattleState, MoveRef, StateKey};
use crate::search::result::{SearchResult, SearchStats};
use crate::search::Strategy;
use std::collections::HashMap;
use std::vec::IntoIter;

/// Cached value of a state and the move that achieves it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemoEntry {
    pub value: f64,
    pub best: Option<MoveRef>,
}

impl MemoEntry {
    const EMPTY: MemoEntry = MemoEntry {
        value: 0.0,
        best: None,
    };

    fn leaf(value: f64) -> Self {
        Self { value, best: None }
    }
}

/// A state whose successors are still being evaluated.
struct Frame {
    key: StateKey,
    depth: u32,
    children: IntoIter<Successor>,
    /// Immediate damage and action of the child currently being evaluated.
    pending: Option<(u16, MoveRef)>,
    best_value: f64,
    best: Option<MoveRef>,
}

enum Visit {
    Resolved(MemoEntry),
    Expand(Frame),
}

pub struct MemoSearch<'a> {
    engine: Engine<'a>,
    max_depth: u32,
    cache: HashMap<StateKey, MemoEntry>,
    stats: SearchStats,
}

impl<'a> MemoSearch<'a> {
    pub fn new(engine: Engine<'a>, max_depth: u32) -> Self {
        Self {
            engine,
            max_depth,
            cache: HashMap::new(),
            stats: SearchStats::default(),
        }
    }

    /// Number of states with a cached value.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    pub fn cached(&self, key: &StateKey) -> Option<&MemoEntry> {
        self.cache.get(key)
    }

    /// Evaluate `initial`, then rebuild the move sequence by following the
    /// cached best move from the live state, one ply at a time.
    pub fn run(&mut self, initial: &BattleState) -> SearchResult {
        self.cache.clear();
        self.stats = SearchStats::default();

        let mut state = initial.clone();
        let mut actions: Vec<MoveRef> = Vec::new();

        while !state.is_terminal() && (actions.len() as u32) < self.max_depth {
            let entry = self.evaluate(&state, 0);
            let Some(action) = entry.best else {
                tracing::warn!(
                    turn = state.turn,
                    "memo: no move can damage the opponent, stopping early"
                );
                break;
            };
            match self.engine.apply(&state, action.slot as usize) {
                Some(successor) => {
                    tracing::debug!(
                        turn = successor.state.turn,
                        move_name = successor.move_name(),
                        value = entry.value,
                        "memo ply"
                    );
                    actions.push(successor.action);
                    state = successor.state;
                }
                None => {
                    tracing::warn!(turn = state.turn, slot = action.slot, "memo: cached move no longer applies");
                    break;
                }
            }
        }

        if !state.is_terminal() && actions.len() as u32 >= self.max_depth {
            tracing::warn!(max_depth = self.max_depth, "memo: depth limit reached before the battle ended");
        }

        let stats = self.stats.clone();
        let result = SearchResult::assemble(Strategy::Dp, state, actions, stats);
        tracing::info!(
            success = result.success(),
            turns = result.turns,
            total_damage = result.total_damage,
            cache_hit_rate = result.stats.cache_hit_rate(),
            states = result.stats.states_explored,
            "memo search finished"
        );
        result
    }

    /// Best value and move for `root`, treating it as `depth` plies below
    /// the evaluation root. Children are visited in successor order, and a
    /// later child only replaces the best on a strictly greater total.
    pub fn evaluate(&mut self, root: &BattleState, depth: u32) -> MemoEntry {
        let mut stack = match self.visit(root, depth) {
            Visit::Resolved(entry) => return entry,
            Visit::Expand(frame) => vec![frame],
        };
        let mut returned: Option<f64> = None;

        while let Some(frame) = stack.last_mut() {
            if let Some(child_value) = returned.take() {
                if let Some((damage, action)) = frame.pending.take() {
                    let total = damage as f64 + child_value;
                    if total > frame.best_value {
                        frame.best_value = total;
                        frame.best = Some(action);
                    }
                }
            }

            if let Some(child) = frame.children.next() {
                frame.pending = Some((child.damage, child.action));
                let child_depth = frame.depth + 1;
                match self.visit(&child.state, child_depth) {
                    Visit::Resolved(entry) => returned = Some(entry.value),
                    Visit::Expand(child_frame) => stack.push(child_frame),
                }
                continue;
            }

            let Some(done) = stack.pop() else {
                break;
            };
            let entry = MemoEntry {
                value: done.best_value,
                best: done.best,
            };
            self.cache.insert(done.key, entry);
            if stack.is_empty() {
                return entry;
            }
            returned = Some(entry.value);
        }

        MemoEntry::EMPTY
    }

    /// Resolve `state` without expanding it if possible: past the depth
    /// bound, terminal, or already cached. Otherwise count a miss and open a
    /// frame over its successors.
    fn visit(&mut self, state: &BattleState, depth: u32) -> Visit {
        if depth >= self.max_depth {
            return Visit::Resolved(MemoEntry::EMPTY);
        }
        if state.is_terminal() {
            let value = if state.player_won() {
                state.total_damage_dealt() as f64
            } else {
                0.0
            };
            return Visit::Resolved(MemoEntry::leaf(value));
        }

        let key = state.key();
        if let Some(entry) = self.cache.get(&key) {
            self.stats.cache_hits += 1;
            return Visit::Resolved(*entry);
        }
        self.stats.cache_misses += 1;
        self.stats.states_explored += 1;

        let successors = self.engine.successors(state);
        if successors.is_empty() {
            self.cache.insert(key, MemoEntry::EMPTY);
            return Visit::Resolved(MemoEntry::EMPTY);
        }

        Visit::Expand(Frame {
            key,
            depth,
            children: successors.into_iter(),
            pending: None,
            best_value: f64::NEG_INFINITY,
            best: None,
        })
    }
}
