//! Access to the compiled Generation 1 move table.

use crate::errors::{DataError, DataResult};
use crate::moves::{normalize_move_name, Move};
use crate::pokemon::MAX_MOVES;
use schema::{MoveRecord, PokemonType};
use std::sync::LazyLock;

// Include the generated move and trainer tables
include!(concat!(env!("OUT_DIR"), "/generated_data.rs"));

// Lazy-loaded move data
static MOVE_TABLE: LazyLock<Vec<MoveRecord>> = LazyLock::new(|| {
    postcard::from_bytes(MOVE_TABLE_BYTES).expect("moves.bin is produced and validated by build.rs")
});

pub(crate) static TRAINER_TABLE: LazyLock<Vec<schema::TrainerRecord>> = LazyLock::new(|| {
    postcard::from_bytes(TRAINER_TABLE_BYTES)
        .expect("trainers.bin is produced and validated by build.rs")
});

pub(crate) fn trainer_position(id: &str) -> Option<usize> {
    TRAINER_INDEX.get(id).copied()
}

/// Look up a table row by display name or key, case-insensitively.
pub fn get_move_record(name: &str) -> DataResult<&'static MoveRecord> {
    let key = normalize_move_name(name);
    MOVE_INDEX
        .get(key.as_str())
        .and_then(|&position| MOVE_TABLE.get(position))
        .ok_or_else(|| DataError::MoveNotFound(name.to_string()))
}

pub fn get_move_by_name(name: &str) -> DataResult<Move> {
    get_move_record(name).map(Move::from_record)
}

pub fn all_move_records() -> &'static [MoveRecord] {
    &MOVE_TABLE
}

/// Substituted whenever no move resolves for a team member.
pub fn fallback_move() -> Move {
    get_move_by_name("tackle")
        .unwrap_or_else(|_| Move::new("Tackle", PokemonType::Normal, 35, Some(95), 35))
}

/// Resolve an explicit move list: at most the first four names, unknown
/// names skipped, Tackle if nothing resolves.
pub fn resolve_selected_moves<S: AsRef<str>>(names: &[S]) -> Vec<Move> {
    let moves: Vec<Move> = names
        .iter()
        .take(MAX_MOVES)
        .filter_map(|name| match get_move_by_name(name.as_ref()) {
            Ok(mv) => Some(mv),
            Err(err) => {
                tracing::debug!("Skipping move: {}", err);
                None
            }
        })
        .collect();

    if moves.is_empty() {
        vec![fallback_move()]
    } else {
        moves
    }
}

/// Pick up to `count` moves from a learnable pool: damaging moves first by
/// descending power, then status moves in pool order. Tackle if nothing resolves.
pub fn select_moves<S: AsRef<str>>(pool: &[S], count: usize) -> Vec<Move> {
    let available: Vec<Move> = pool
        .iter()
        .filter_map(|name| get_move_by_name(name.as_ref()).ok())
        .collect();

    if available.is_empty() {
        return vec![fallback_move()];
    }

    let (mut damaging, status): (Vec<Move>, Vec<Move>) =
        available.into_iter().partition(Move::is_damaging);
    // Stable sort keeps pool order among equal powers.
    damaging.sort_by(|a, b| b.power.cmp(&a.power));

    let mut selected: Vec<Move> = damaging.into_iter().take(count).collect();
    let remaining = count.saturating_sub(selected.len());
    selected.extend(status.into_iter().take(remaining));
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_table_contains_every_move() {
        assert_eq!(all_move_records().len(), 162);
    }

    #[rstest]
    #[case("thunderbolt", "Thunderbolt", PokemonType::Electric, 95, Some(100), 15)]
    #[case("Thunder Shock", "Thunder Shock", PokemonType::Electric, 40, Some(100), 30)]
    #[case("SWIFT", "Swift", PokemonType::Normal, 60, None, 20)]
    #[case("karate-chop", "Karate Chop", PokemonType::Normal, 50, Some(100), 25)]
    #[case("struggle", "Struggle", PokemonType::Normal, 50, Some(100), 1)]
    fn test_get_move_by_name(
        #[case] query: &str,
        #[case] name: &str,
        #[case] move_type: PokemonType,
        #[case] power: u8,
        #[case] accuracy: Option<u8>,
        #[case] pp: u8,
    ) {
        let mv = get_move_by_name(query).expect("move should exist");
        assert_eq!(mv, Move::new(name, move_type, power, accuracy, pp));
    }

    #[test]
    fn test_unknown_move_is_an_error() {
        assert_eq!(
            get_move_by_name("splash-attack"),
            Err(DataError::MoveNotFound("splash-attack".to_string()))
        );
    }

    #[test]
    fn test_resolve_selected_moves_skips_unknown_and_caps_at_four() {
        let moves = resolve_selected_moves(&[
            "thunderbolt",
            "not-a-move",
            "thunder-wave",
            "quick-attack",
            "thunder",
            "surf",
        ]);
        let names: Vec<&str> = moves.iter().map(|m| m.name.as_str()).collect();
        // Only the first four names are considered; one of them is unknown.
        assert_eq!(names, vec!["Thunderbolt", "Thunder Wave", "Quick Attack"]);
    }

    #[test]
    fn test_resolve_selected_moves_falls_back_to_tackle() {
        let moves = resolve_selected_moves(&["nope", "also-nope"]);
        assert_eq!(moves, vec![fallback_move()]);
        assert_eq!(moves[0].name, "Tackle");
        assert_eq!(moves[0].power, 35);
    }

    #[test]
    fn test_select_moves_prefers_power_then_status() {
        let pool = [
            "growl",
            "thunder-shock",
            "thunder",
            "thunder-wave",
            "quick-attack",
        ];
        let names: Vec<String> = select_moves(&pool, 4)
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(
            names,
            vec!["Thunder", "Thunder Shock", "Quick Attack", "Growl"]
        );
    }

    #[test]
    fn test_select_moves_with_empty_pool() {
        let pool: [&str; 0] = [];
        assert_eq!(select_moves(&pool, 4), vec![fallback_move()]);
    }
}
