// Battle Optimizer Schema - Shared type definitions
// This crate contains the static enums and data records that are shared between
// the main battle-optimizer crate and its build script, so both sides agree on
// the postcard layout of the compiled data tables.

// Re-export the main types
pub use battle_data::*;
pub use move_data::*;
pub use pokemon_types::*;
pub use species_data::*;

pub mod battle_data;
pub mod move_data;
pub mod pokemon_types;
pub mod species_data;
