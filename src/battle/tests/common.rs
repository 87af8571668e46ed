use crate::battle::ai::TrainerAi;
use crate::battle::calculators::Gen1Resolver;
use crate::battle::engine::Engine;
use crate::battle::state::BattleState;
use crate::battle::type_chart::TypeChart;
use crate::move_data::get_move_by_name;
use crate::pokemon::Pokemon;
use schema::{BaseStats, Dvs, PokemonType};
use std::fmt::Display;
use std::sync::LazyLock;

static CHART: LazyLock<TypeChart> = LazyLock::new(TypeChart::gen1);
static RESOLVER: LazyLock<Gen1Resolver<'static>> = LazyLock::new(|| Gen1Resolver::new(&CHART));
static POLICY: LazyLock<TrainerAi<'static>> = LazyLock::new(|| TrainerAi::new(&CHART));

/// A builder for creating test Pokemon with common defaults: Normal type,
/// every base stat 50, perfect DVs, Tackle only, full HP.
///
/// # Example
/// ```rust,ignore
/// let pokemon = TestPokemonBuilder::new("Pikachu", 25)
///     .with_types(&[PokemonType::Electric])
///     .with_moves(&["thunder-shock"])
///     .with_hp(10)
///     .build();
/// ```
pub struct TestPokemonBuilder {
    name: String,
    level: u8,
    types: Vec<PokemonType>,
    base_stats: BaseStats,
    dvs: Dvs,
    moves: Vec<String>,
    current_hp: Option<u16>,
}

impl TestPokemonBuilder {
    pub fn new(name: &str, level: u8) -> Self {
        Self {
            name: name.to_string(),
            level,
            types: vec![PokemonType::Normal],
            base_stats: BaseStats::default(),
            dvs: Dvs::perfect(),
            moves: vec!["tackle".to_string()],
            current_hp: None,
        }
    }

    pub fn with_types(mut self, types: &[PokemonType]) -> Self {
        self.types = types.to_vec();
        self
    }

    pub fn with_base_stats(mut self, base_stats: BaseStats) -> Self {
        self.base_stats = base_stats;
        self
    }

    /// Every base stat set to the same value.
    pub fn with_flat_stats(self, value: u8) -> Self {
        self.with_base_stats(BaseStats {
            hp: value,
            attack: value,
            defense: value,
            speed: value,
            special: value,
        })
    }

    pub fn with_dvs(mut self, dvs: Dvs) -> Self {
        self.dvs = dvs;
        self
    }

    /// Move table keys; every name must exist.
    pub fn with_moves(mut self, moves: &[&str]) -> Self {
        self.moves = moves.iter().map(|name| name.to_string()).collect();
        self
    }

    /// Sets the current HP. If not set, HP will be max.
    pub fn with_hp(mut self, hp: u16) -> Self {
        self.current_hp = Some(hp);
        self
    }

    pub fn build(self) -> Pokemon {
        let moves = self
            .moves
            .iter()
            .map(|name| assert_ok(get_move_by_name(name)))
            .collect();
        let mut pokemon = assert_ok(Pokemon::new(
            self.name,
            self.types,
            self.level,
            self.base_stats,
            self.dvs,
            moves,
        ));
        if let Some(hp) = self.current_hp {
            pokemon.set_hp(hp);
        }
        pokemon
    }
}

/// Level 50 Pikachu: 141 HP, 106 Atk, 91 Def, 141 Spe, 101 Spc.
pub fn pikachu() -> Pokemon {
    TestPokemonBuilder::new("Pikachu", 50)
        .with_types(&[PokemonType::Electric])
        .with_base_stats(BaseStats {
            hp: 35,
            attack: 55,
            defense: 40,
            speed: 90,
            special: 50,
        })
        .with_moves(&["thunderbolt", "thunder-wave", "quick-attack", "thunder"])
        .build()
}

/// Level 50 Charizard: 184 HP.
pub fn charizard() -> Pokemon {
    TestPokemonBuilder::new("Charizard", 50)
        .with_types(&[PokemonType::Fire, PokemonType::Flying])
        .with_base_stats(BaseStats {
            hp: 78,
            attack: 84,
            defense: 78,
            speed: 100,
            special: 85,
        })
        .with_moves(&["flamethrower", "slash", "earthquake", "fire-blast"])
        .build()
}

/// Level 50 Blastoise: 185 HP.
pub fn blastoise() -> Pokemon {
    TestPokemonBuilder::new("Blastoise", 50)
        .with_types(&[PokemonType::Water])
        .with_base_stats(BaseStats {
            hp: 79,
            attack: 83,
            defense: 100,
            speed: 78,
            special: 85,
        })
        .with_moves(&["surf", "ice-beam", "bite", "withdraw"])
        .build()
}

/// Level 100 Normal-type with Tackle that knocks out any `weakling` in one hit.
pub fn heavy_hitter() -> Pokemon {
    TestPokemonBuilder::new("Tauros", 100)
        .with_flat_stats(100)
        .with_moves(&["tackle"])
        .build()
}

/// Level 2, every base stat 10: 14 HP.
pub fn weakling(name: &str) -> Pokemon {
    TestPokemonBuilder::new(name, 2)
        .with_flat_stats(10)
        .with_moves(&["tackle"])
        .build()
}

pub fn gen1_chart() -> &'static TypeChart {
    &CHART
}

/// Engine over the Gen 1 chart and the trainer opponent policy.
pub fn engine() -> Engine<'static> {
    Engine::new(&*RESOLVER, &*POLICY)
}

/// Creates a 1v1 battle state.
pub fn create_test_battle(player: Pokemon, opponent: Pokemon) -> BattleState {
    create_team_battle(vec![player], vec![opponent])
}

pub fn create_team_battle(player: Vec<Pokemon>, opponent: Vec<Pokemon>) -> BattleState {
    assert_ok(BattleState::new(player, opponent))
}

/// Helper function to assert that a Result is Ok and return the value.
/// Provides clear error messages in tests when functions unexpectedly fail.
pub fn assert_ok<T, E: Display>(result: Result<T, E>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("Expected Ok but got error: {}", err),
    }
}
