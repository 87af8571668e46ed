//! Shortest path to victory over the explored state graph.

use crate::battle::engine::Engine;
use crate::battle::state::BattleState;
use crate::search::graph::{NodeId, NodeKind, Path, StateGraph};
use crate::search::result::{SearchResult, SearchStats};
use crate::search::Strategy;

pub struct GraphSearch<'a> {
    engine: Engine<'a>,
    max_states: usize,
}

impl<'a> GraphSearch<'a> {
    pub fn new(engine: Engine<'a>, max_states: usize) -> Self {
        Self { engine, max_states }
    }

    pub fn run(&self, initial: &BattleState) -> SearchResult {
        let graph = StateGraph::explore(&self.engine, initial, self.max_states);
        self.search(&graph, initial)
    }

    /// Pick the terminal node to aim for. Any reachable win beats every loss:
    /// wins are ranked by path length, losses by damage dealt, and a loss
    /// that dealt no damage is never chosen.
    pub fn search(&self, graph: &StateGraph, initial: &BattleState) -> SearchResult {
        let mut stats = SearchStats {
            states_explored: graph.len(),
            path_cost: Some(0.0),
            ..SearchStats::default()
        };
        if graph.is_empty() {
            tracing::warn!("graph: nothing explored");
            return SearchResult::failure(Strategy::Dijkstra, initial, stats);
        }

        let wins: Vec<NodeId> = graph.nodes_of_kind(NodeKind::Win).collect();
        let losses: Vec<NodeId> = graph.nodes_of_kind(NodeKind::Loss).collect();
        tracing::debug!(
            nodes = graph.len(),
            wins = wins.len(),
            losses = losses.len(),
            "graph: terminal states classified"
        );

        if let Some((node, path)) = self.best_win(graph, &wins) {
            stats.path_cost = Some(path.distance);
            return self.finish(graph, node, path, stats);
        }
        if let Some((node, path)) = self.best_loss(graph, &losses) {
            tracing::warn!(
                damage = graph.node(node).state.total_damage_dealt(),
                "graph: no victory reachable, using the most damaging defeat"
            );
            return self.finish(graph, node, path, stats);
        }

        tracing::warn!(
            nodes = graph.len(),
            "graph: no usable terminal state, reporting a defeat"
        );
        SearchResult::failure(Strategy::Dijkstra, initial, stats)
    }

    /// Fewest plies to any win, earliest discovered on ties. Node depth is a
    /// lower bound on distance, so candidates that cannot improve are skipped.
    fn best_win(&self, graph: &StateGraph, wins: &[NodeId]) -> Option<(NodeId, Path)> {
        let mut best: Option<(NodeId, Path)> = None;
        for &node in wins {
            if let Some((_, path)) = &best {
                if graph.node(node).depth as f64 >= path.distance {
                    continue;
                }
            }
            let Some(path) = graph.shortest_path(0, node) else {
                continue;
            };
            let better = best
                .as_ref()
                .map_or(true, |(_, current)| path.distance < current.distance);
            if better {
                best = Some((node, path));
            }
        }
        best
    }

    /// Most opponent damage among reachable losses, earliest discovered on ties.
    fn best_loss(&self, graph: &StateGraph, losses: &[NodeId]) -> Option<(NodeId, Path)> {
        let mut best: Option<(NodeId, u32)> = None;
        for &node in losses {
            let damage = graph.node(node).state.total_damage_dealt();
            if damage > best.map_or(0, |(_, best_damage)| best_damage) {
                best = Some((node, damage));
            }
        }
        let (node, _) = best?;
        let mut path = graph.shortest_path(0, node)?;
        path.distance = 0.0;
        Some((node, path))
    }

    fn finish(&self, graph: &StateGraph, node: NodeId, path: Path, stats: SearchStats) -> SearchResult {
        let final_state = graph.node(node).state.clone();
        let result = SearchResult::assemble(Strategy::Dijkstra, final_state, path.actions, stats);
        tracing::info!(
            success = result.success(),
            turns = result.turns,
            total_damage = result.total_damage,
            states = result.stats.states_explored,
            "graph search finished"
        );
        result
    }
}
