//! Battle Optimizer
//!
//! State-space search over Generation 1 style Pokemon battles: given a player
//! team and an opponent team, find the move sequence that wins fastest, or
//! failing that, the one that deals the most damage. Game data is compiled
//! into the binary at build time.

// --- MODULE DECLARATIONS ---
pub mod battle;
pub mod config;
pub mod errors;
pub mod move_data;
pub mod moves;
pub mod pokemon;
pub mod search;
pub mod service;
pub mod teams;
pub mod trainers;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
pub use schema::{BaseStats, Dvs, MoveCategory, MoveRecord, PokemonType};

// --- From this crate's modules (`src/`) ---

// Transition model and its collaborators.
pub use battle::ai::{OpponentPolicy, TrainerAi};
pub use battle::calculators::{CombatResolver, Gen1Resolver, Roll};
pub use battle::engine::{Engine, Successor};
pub use battle::replay::{replay, BattleEvent, EventBus, Replay};
pub use battle::state::{BattleState, MoveRef, Outcome, SideId, StateKey};
pub use battle::type_chart::TypeChart;

// Search strategies.
pub use search::{
    compare_strategies, run_strategy, GraphSearch, GreedySearch, MemoSearch, Ranking, SearchResult,
    SearchStats, Strategy,
};

// Runtime types and data access.
pub use config::OptimizerConfig;
pub use errors::{ConfigError, DataError, PokemonError, ServiceError, TeamError};
pub use move_data::{get_move_by_name, select_moves};
pub use moves::Move;
pub use pokemon::Pokemon;
pub use service::{BattleOptimizer, OptimizeRequest, OptimizeResponse};
pub use teams::PokemonRecord;
pub use trainers::{boss_trainer, list_boss_trainers, Trainer, TrainerSummary};
