//! Search strategies over the battle transition model.

pub mod dijkstra;
pub mod graph;
pub mod greedy;
pub mod memo;
pub mod result;

#[cfg(test)]
mod tests;

use crate::battle::engine::Engine;
use crate::battle::state::BattleState;
use crate::config::OptimizerConfig;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

pub use dijkstra::GraphSearch;
pub use greedy::{GreedySearch, Ranking};
pub use memo::MemoSearch;
pub use result::{SearchResult, SearchStats};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    #[strum(to_string = "greedy")]
    Greedy,
    #[strum(to_string = "dp", serialize = "memo")]
    #[serde(alias = "memo")]
    Dp,
    #[default]
    #[strum(to_string = "dijkstra", serialize = "graph")]
    #[serde(alias = "graph")]
    Dijkstra,
}

/// Run one strategy with the bounds from `config`.
pub fn run_strategy(
    strategy: Strategy,
    engine: Engine<'_>,
    initial: &BattleState,
    config: &OptimizerConfig,
) -> SearchResult {
    tracing::debug!(%strategy, "running search");
    match strategy {
        Strategy::Greedy => GreedySearch::new(engine, config.max_turns)
            .with_ranking(config.ranking)
            .run(initial),
        Strategy::Dp => MemoSearch::new(engine, config.max_depth).run(initial),
        Strategy::Dijkstra => GraphSearch::new(engine, config.max_states).run(initial),
    }
}

/// Every strategy on its own copy of `initial`, in declaration order.
pub fn compare_strategies(
    engine: Engine<'_>,
    initial: &BattleState,
    config: &OptimizerConfig,
) -> Vec<SearchResult> {
    use strum::IntoEnumIterator;

    Strategy::iter()
        .map(|strategy| run_strategy(strategy, engine, initial, config))
        .collect()
}
