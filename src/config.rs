//! Optimizer settings, loadable from a RON file.

use crate::errors::{ConfigError, ConfigResult};
use crate::pokemon::{MAX_LEVEL, MIN_LEVEL};
use crate::search::{Ranking, Strategy};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_MAX_TURNS: u32 = 75;
pub const DEFAULT_MAX_DEPTH: u32 = 40;
pub const DEFAULT_MAX_STATES: usize = 20_000;
pub const DEFAULT_LEVEL: u8 = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Greedy gives up after this many plies.
    pub max_turns: u32,
    /// Memoized search looks this many plies ahead.
    pub max_depth: u32,
    /// Graph search stops discovering states past this count.
    pub max_states: usize,
    /// Level used for player Pokemon without their own, and for custom opponents.
    pub default_level: u8,
    pub strategy: Strategy,
    pub ranking: Ranking,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            max_turns: DEFAULT_MAX_TURNS,
            max_depth: DEFAULT_MAX_DEPTH,
            max_states: DEFAULT_MAX_STATES,
            default_level: DEFAULT_LEVEL,
            strategy: Strategy::default(),
            ranking: Ranking::default(),
        }
    }
}

impl OptimizerConfig {
    pub fn load_from_path(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_ron(&content)
    }

    /// Parse RON; missing fields take their defaults.
    pub fn from_ron(content: &str) -> ConfigResult<Self> {
        let config: OptimizerConfig = ron::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_turns == 0 {
            return Err(ConfigError::Invalid("max_turns must be at least 1".to_string()));
        }
        if self.max_depth == 0 {
            return Err(ConfigError::Invalid("max_depth must be at least 1".to_string()));
        }
        if self.max_states == 0 {
            return Err(ConfigError::Invalid("max_states must be at least 1".to_string()));
        }
        if !(MIN_LEVEL..=MAX_LEVEL).contains(&self.default_level) {
            return Err(ConfigError::Invalid(format!(
                "default_level {} is outside {}..={}",
                self.default_level, MIN_LEVEL, MAX_LEVEL
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = OptimizerConfig::default();
        assert_eq!(config.max_turns, 75);
        assert_eq!(config.max_depth, 40);
        assert_eq!(config.max_states, 20_000);
        assert_eq!(config.default_level, 50);
        assert_eq!(config.strategy, Strategy::Dijkstra);
        assert_eq!(config.ranking, Ranking::Expected);
    }

    #[test]
    fn test_partial_ron_keeps_defaults() {
        let config = OptimizerConfig::from_ron("(max_depth: 12, strategy: dp)").expect("valid config");
        assert_eq!(
            config,
            OptimizerConfig {
                max_depth: 12,
                strategy: Strategy::Dp,
                ..OptimizerConfig::default()
            }
        );
    }

    #[test]
    fn test_sampled_ranking_from_ron() {
        let config =
            OptimizerConfig::from_ron("(ranking: (mode: \"sampled\", seed: 9))").expect("valid config");
        assert_eq!(config.ranking, Ranking::Sampled { seed: 9 });
    }

    #[test]
    fn test_crit_weighted_ranking_from_ron() {
        let config =
            OptimizerConfig::from_ron("(ranking: (mode: \"crit_weighted\"))").expect("valid config");
        assert_eq!(config.ranking, Ranking::CritWeighted);
    }

    #[test]
    fn test_rejects_zero_bounds_and_bad_level() {
        assert!(matches!(
            OptimizerConfig::from_ron("(max_states: 0)"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            OptimizerConfig::from_ron("(default_level: 101)"),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_parse_error_is_reported() {
        assert!(matches!(
            OptimizerConfig::from_ron("(max_turns: \"many\")"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = OptimizerConfig::load_from_path(Path::new("/definitely/not/here.ron"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
