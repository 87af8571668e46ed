//! Request-level facade: JSON in, optimized plan and battle log out.

use crate::battle::ai::TrainerAi;
use crate::battle::calculators::Gen1Resolver;
use crate::battle::engine::Engine;
use crate::battle::replay::{replay, BattleEvent};
use crate::battle::state::{BattleState, SideId};
use crate::battle::type_chart::TypeChart;
use crate::config::OptimizerConfig;
use crate::errors::{ServiceError, ServiceResult};
use crate::pokemon::Pokemon;
use crate::search::{compare_strategies, run_strategy, SearchResult, Strategy};
use crate::teams::{build_team, PokemonRecord};
use crate::trainers::{boss_trainer, list_boss_trainers, TrainerSummary};
use schema::PokemonType;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const CUSTOM_OPPONENT_NAME: &str = "Custom Opponent";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeRequest {
    #[serde(default)]
    pub player_team: Vec<PokemonRecord>,
    #[serde(default)]
    pub opponent_team: Option<Vec<PokemonRecord>>,
    /// Wins over `opponent_team` when both are given.
    #[serde(default)]
    pub boss_trainer: Option<String>,
    #[serde(default)]
    pub algorithm: Option<String>,
    #[serde(default)]
    pub player_level: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpponentSummary {
    pub name: String,
    pub level: u8,
    pub types: Vec<PokemonType>,
    pub max_hp: u16,
}

impl From<&Pokemon> for OpponentSummary {
    fn from(pokemon: &Pokemon) -> Self {
        Self {
            name: pokemon.name.clone(),
            level: pokemon.level,
            types: pokemon.types().to_vec(),
            max_hp: pokemon.max_hp(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeResponse {
    pub success: bool,
    pub victory: bool,
    pub total_damage: u32,
    pub turns: usize,
    pub move_sequence: Vec<String>,
    pub states_explored: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_hits: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_misses: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_hit_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_cost: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub battle_log: Vec<BattleEvent>,
    pub algorithm: Strategy,
    pub opponent: String,
    pub player_team_size: usize,
    pub opponent_team_size: usize,
    pub opponent_team: Vec<OpponentSummary>,
}

/// A validated request, ready to search.
#[derive(Debug, Clone)]
pub struct PreparedBattle {
    pub strategy: Strategy,
    pub opponent: String,
    pub initial: BattleState,
}

pub struct BattleOptimizer {
    config: OptimizerConfig,
    chart: TypeChart,
}

impl Default for BattleOptimizer {
    fn default() -> Self {
        Self::new(OptimizerConfig::default())
    }
}

impl BattleOptimizer {
    pub fn new(config: OptimizerConfig) -> Self {
        Self {
            config,
            chart: TypeChart::gen1(),
        }
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    pub fn optimize_json(&self, body: &str) -> ServiceResult<OptimizeResponse> {
        let request: OptimizeRequest = serde_json::from_str(body)?;
        self.optimize(&request)
    }

    pub fn optimize(&self, request: &OptimizeRequest) -> ServiceResult<OptimizeResponse> {
        let prepared = self.prepare(request)?;
        tracing::info!(
            algorithm = %prepared.strategy,
            opponent = %prepared.opponent,
            player_team = prepared.initial.player().len(),
            opponent_team = prepared.initial.opponent().len(),
            "optimizing battle"
        );

        let resolver = Gen1Resolver::new(&self.chart);
        let policy = TrainerAi::new(&self.chart);
        let engine = Engine::new(&resolver, &policy);

        let result = run_strategy(prepared.strategy, engine, &prepared.initial, &self.config);
        Ok(self.respond(&engine, &prepared, result))
    }

    /// Every strategy against the same opponent, in a fixed order.
    pub fn compare(&self, request: &OptimizeRequest) -> ServiceResult<Vec<OptimizeResponse>> {
        let prepared = self.prepare(request)?;
        let resolver = Gen1Resolver::new(&self.chart);
        let policy = TrainerAi::new(&self.chart);
        let engine = Engine::new(&resolver, &policy);

        Ok(compare_strategies(engine, &prepared.initial, &self.config)
            .into_iter()
            .map(|result| self.respond(&engine, &prepared, result))
            .collect())
    }

    /// Validate a request and build both sides. The player level falls back
    /// to the configured default and also applies to custom opponents.
    pub fn prepare(&self, request: &OptimizeRequest) -> ServiceResult<PreparedBattle> {
        let strategy = match request.algorithm.as_deref() {
            Some(name) => Strategy::from_str(name.trim())
                .map_err(|_| ServiceError::InvalidAlgorithm(name.to_string()))?,
            None => self.config.strategy,
        };
        if request.player_team.is_empty() {
            return Err(ServiceError::MissingPlayerTeam);
        }
        let level = request.player_level.unwrap_or(self.config.default_level);

        let player_team = build_team(SideId::Player, &request.player_team, level)?;
        let (opponent, opponent_team) = match (&request.boss_trainer, &request.opponent_team) {
            (Some(id), _) if !id.trim().is_empty() => {
                let trainer = boss_trainer(id)?;
                (trainer.name, trainer.team)
            }
            (_, Some(records)) if !records.is_empty() => (
                CUSTOM_OPPONENT_NAME.to_string(),
                build_team(SideId::Opponent, records, level)?,
            ),
            _ => return Err(ServiceError::MissingOpponent),
        };

        Ok(PreparedBattle {
            strategy,
            opponent,
            initial: BattleState::new(player_team, opponent_team)?,
        })
    }

    fn respond(&self, engine: &Engine<'_>, prepared: &PreparedBattle, result: SearchResult) -> OptimizeResponse {
        let battle_log = if result.actions.is_empty() {
            Vec::new()
        } else {
            replay(engine, &prepared.initial, &result.actions).events.into_events()
        };
        let stats = &result.stats;
        let (cache_hits, cache_misses, cache_hit_rate) = match result.strategy {
            Strategy::Dp => (
                Some(stats.cache_hits),
                Some(stats.cache_misses),
                Some(stats.cache_hit_rate()),
            ),
            _ => (None, None, None),
        };
        let initial = &prepared.initial;

        OptimizeResponse {
            success: result.success(),
            victory: result.success(),
            total_damage: result.total_damage,
            turns: result.turns,
            move_sequence: result.move_sequence.clone(),
            states_explored: stats.states_explored,
            cache_hits,
            cache_misses,
            cache_hit_rate,
            path_cost: stats.path_cost,
            battle_log,
            algorithm: result.strategy,
            opponent: prepared.opponent.clone(),
            player_team_size: initial.player().len(),
            opponent_team_size: initial.opponent().len(),
            opponent_team: initial.opponent().roster().iter().map(OpponentSummary::from).collect(),
        }
    }
}

pub fn boss_trainers() -> Vec<TrainerSummary> {
    list_boss_trainers()
}
