use crate::battle::state::SideId;
use thiserror::Error;

/// Errors raised while building a single combatant
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PokemonError {
    #[error("level {0} is outside 1..=100")]
    InvalidLevel(u8),
    #[error("a Pokemon needs one or two types, got {0}")]
    InvalidTypeCount(usize),
    #[error("unknown type '{0}'")]
    UnknownType(String),
    #[error("a Pokemon knows at most 4 moves, got {0}")]
    TooManyMoves(usize),
    #[error("{stat} DV {value} is outside 0..=15")]
    InvalidDv { stat: &'static str, value: u8 },
}

/// Errors raised while assembling a side for battle
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TeamError {
    #[error("{side} team is empty")]
    Empty { side: SideId },
    #[error("{side} team has {size} members, the limit is 6")]
    TooLarge { side: SideId, size: usize },
    #[error("{side} team member {index}: {source}")]
    Member {
        side: SideId,
        index: usize,
        #[source]
        source: PokemonError,
    },
}

/// Errors related to static game data lookups
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    #[error("move '{0}' is not in the Generation 1 move table")]
    MoveNotFound(String),
    #[error("unknown trainer '{0}'")]
    TrainerNotFound(String),
    #[error("trainer '{trainer}' is malformed: {source}")]
    MalformedTrainer {
        trainer: String,
        #[source]
        source: TeamError,
    },
}

/// Errors raised while loading optimizer configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Errors surfaced to callers of the optimizer service
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("playerTeam is required")]
    MissingPlayerTeam,
    #[error("must provide either opponentTeam or bossTrainer")]
    MissingOpponent,
    #[error("invalid algorithm: {0}")]
    InvalidAlgorithm(String),
    #[error(transparent)]
    Team(#[from] TeamError),
    #[error(transparent)]
    Data(#[from] DataError),
    #[error("invalid request JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Type alias for Results using PokemonError
pub type PokemonResult<T> = Result<T, PokemonError>;

/// Type alias for Results using TeamError
pub type TeamResult<T> = Result<T, TeamError>;

/// Type alias for Results using DataError
pub type DataResult<T> = Result<T, DataError>;

/// Type alias for Results using ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Type alias for Results using ServiceError
pub type ServiceResult<T> = Result<T, ServiceError>;
