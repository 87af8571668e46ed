use crate::PokemonType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveCategory {
    Physical,
    Special,
    Status,
}

/// One row of the move table as stored in `data/moves.ron`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Lowercase, hyphenated key, e.g. `"thunder-shock"`.
    pub name: String,
    pub move_type: PokemonType,
    pub power: u8,
    /// `None` for moves that never miss.
    pub accuracy: Option<u8>,
    pub pp: u8,
}

impl MoveRecord {
    pub fn category(&self) -> MoveCategory {
        if self.power == 0 {
            MoveCategory::Status
        } else if self.move_type.is_physical() {
            MoveCategory::Physical
        } else {
            MoveCategory::Special
        }
    }
}
