//! Explicit graph of reachable battle states.

use crate::battle::engine::Engine;
use crate::battle::state::{BattleState, MoveRef, StateKey};
use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, VecDeque};

pub type NodeId = usize;

/// Weight of every edge: one ply.
pub const EDGE_WEIGHT: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub to: NodeId,
    pub weight: f64,
    pub action: MoveRef,
}

#[derive(Debug, Clone)]
pub struct Node {
    pub state: BattleState,
    /// Plies from the start node along the discovering path.
    pub depth: u32,
    pub edges: Vec<Edge>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Win,
    Loss,
    Open,
}

/// A shortest path between two nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    pub distance: f64,
    pub nodes: Vec<NodeId>,
    pub actions: Vec<MoveRef>,
}

/// Arena of unique states (by canonical key) connected by one-ply edges.
/// Node 0 is the start state.
#[derive(Debug, Clone, Default)]
pub struct StateGraph {
    nodes: Vec<Node>,
    index: HashMap<StateKey, NodeId>,
}

impl StateGraph {
    /// Breadth-first exploration from `initial`, stopping once `max_states`
    /// distinct states are known. Terminal states are recorded but not
    /// expanded. When two moves lead to the same state only the first edge
    /// is kept.
    pub fn explore(engine: &Engine<'_>, initial: &BattleState, max_states: usize) -> Self {
        let mut graph = StateGraph::default();
        if max_states == 0 {
            return graph;
        }
        graph.add_node(initial.clone(), 0);

        let mut queue: VecDeque<NodeId> = VecDeque::from([0]);
        let mut capped = false;

        while let Some(current) = queue.pop_front() {
            let node = &graph.nodes[current];
            if node.state.is_terminal() {
                continue;
            }
            let depth = node.depth + 1;

            for successor in engine.successors(&node.state) {
                let key = successor.state.key();
                let target = match graph.index.get(&key) {
                    Some(&existing) => existing,
                    None if graph.len() >= max_states => {
                        capped = true;
                        continue;
                    }
                    None => {
                        let id = graph.add_node(successor.state, depth);
                        queue.push_back(id);
                        id
                    }
                };
                graph.add_edge(current, target, successor.action);
            }
        }

        if capped {
            tracing::warn!(max_states, "graph: state limit reached, exploration truncated");
        }
        tracing::debug!(nodes = graph.len(), edges = graph.edge_count(), "graph built");
        graph
    }

    fn add_node(&mut self, state: BattleState, depth: u32) -> NodeId {
        let id = self.nodes.len();
        self.index.insert(state.key(), id);
        self.nodes.push(Node {
            state,
            depth,
            edges: Vec::new(),
        });
        id
    }

    fn add_edge(&mut self, from: NodeId, to: NodeId, action: MoveRef) {
        let edges = &mut self.nodes[from].edges;
        if edges.iter().any(|edge| edge.to == to) {
            return;
        }
        edges.push(Edge {
            to,
            weight: EDGE_WEIGHT,
            action,
        });
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|node| node.edges.len()).sum()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn find(&self, key: &StateKey) -> Option<NodeId> {
        self.index.get(key).copied()
    }

    pub fn kind(&self, id: NodeId) -> NodeKind {
        let state = &self.nodes[id].state;
        if !state.is_terminal() {
            NodeKind::Open
        } else if state.player_won() {
            NodeKind::Win
        } else {
            NodeKind::Loss
        }
    }

    /// Nodes of the given kind, in discovery order.
    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).filter(move |&id| self.kind(id) == kind)
    }

    /// Dijkstra from `source`, returning as soon as `target` is settled.
    pub fn shortest_path(&self, source: NodeId, target: NodeId) -> Option<Path> {
        if source >= self.nodes.len() || target >= self.nodes.len() {
            return None;
        }

        let mut distance = vec![f64::INFINITY; self.nodes.len()];
        let mut previous: Vec<Option<(NodeId, MoveRef)>> = vec![None; self.nodes.len()];
        let mut heap = BinaryHeap::new();
        distance[source] = 0.0;
        heap.push(Reverse((OrderedFloat(0.0), source)));

        while let Some(Reverse((OrderedFloat(dist), current))) = heap.pop() {
            if current == target {
                return Some(self.trace_back(source, target, dist, &previous));
            }
            if dist > distance[current] {
                continue;
            }
            for edge in &self.nodes[current].edges {
                let next = dist + edge.weight;
                if next < distance[edge.to] {
                    distance[edge.to] = next;
                    previous[edge.to] = Some((current, edge.action));
                    heap.push(Reverse((OrderedFloat(next), edge.to)));
                }
            }
        }
        None
    }

    fn trace_back(
        &self,
        source: NodeId,
        target: NodeId,
        distance: f64,
        previous: &[Option<(NodeId, MoveRef)>],
    ) -> Path {
        let mut nodes = vec![target];
        let mut actions = Vec::new();
        let mut current = target;
        while current != source {
            let Some((parent, action)) = previous[current] else {
                break;
            };
            actions.push(action);
            nodes.push(parent);
            current = parent;
        }
        nodes.reverse();
        actions.reverse();
        Path {
            distance,
            nodes,
            actions,
        }
    }
}
