use crate::battle::type_chart::TypeChart;
use crate::moves::Move;
use crate::pokemon::Pokemon;
use rand::Rng;
use schema::PokemonType;

pub const MIN_ROLL: u8 = 217;
pub const MAX_ROLL: u8 = 255;
/// Midpoint of the roll range; the search engine always resolves with it.
pub const AVERAGE_ROLL: u8 = 236;

pub const STAB_MULTIPLIER: f64 = 1.5;
pub const CRITICAL_MULTIPLIER: f64 = 2.0;

/// The random inputs of one damage calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Roll {
    pub critical: bool,
    pub roll: u8,
}

impl Roll {
    /// Non-critical, average roll. Makes resolution a pure function.
    pub const FIXED: Roll = Roll {
        critical: false,
        roll: AVERAGE_ROLL,
    };

    pub fn sample<R: Rng + ?Sized>(rng: &mut R, attacker: &Pokemon) -> Self {
        Self {
            critical: rng.random_bool(critical_hit_rate(attacker)),
            roll: rng.random_range(MIN_ROLL..=MAX_ROLL),
        }
    }
}

/// Damage and type-effectiveness for one (attacker, defender, move) triple.
///
/// `critical` and `roll` are sampled when omitted, so callers that need
/// reproducible results must supply both.
pub trait CombatResolver {
    fn resolve(
        &self,
        attacker: &Pokemon,
        defender: &Pokemon,
        move_used: &Move,
        critical: Option<bool>,
        roll: Option<u8>,
    ) -> u16;

    fn effectiveness(
        &self,
        attack_type: PokemonType,
        defense_primary: PokemonType,
        defense_secondary: Option<PokemonType>,
    ) -> f32;

    /// Expected damage at the average roll, optionally weighted by crit chance.
    fn expected_damage(
        &self,
        attacker: &Pokemon,
        defender: &Pokemon,
        move_used: &Move,
        include_crit_chance: bool,
    ) -> f64;
}

/// Generation 1 damage formula over an injected type chart.
#[derive(Debug, Clone, Copy)]
pub struct Gen1Resolver<'a> {
    chart: &'a TypeChart,
}

impl<'a> Gen1Resolver<'a> {
    pub fn new(chart: &'a TypeChart) -> Self {
        Self { chart }
    }

    pub fn chart(&self) -> &'a TypeChart {
        self.chart
    }

    pub fn damage(&self, attacker: &Pokemon, defender: &Pokemon, move_used: &Move, roll: Roll) -> u16 {
        calculate_damage(self.chart, attacker, defender, move_used, roll)
    }

    /// (min, max) over the roll range.
    pub fn damage_range(
        &self,
        attacker: &Pokemon,
        defender: &Pokemon,
        move_used: &Move,
        critical: bool,
    ) -> (u16, u16) {
        let low = self.damage(attacker, defender, move_used, Roll { critical, roll: MIN_ROLL });
        let high = self.damage(attacker, defender, move_used, Roll { critical, roll: MAX_ROLL });
        (low, high)
    }

    /// Expected damage at the average roll, optionally weighted by the
    /// attacker's critical-hit chance.
    pub fn average_damage(
        &self,
        attacker: &Pokemon,
        defender: &Pokemon,
        move_used: &Move,
        include_crit_chance: bool,
    ) -> f64 {
        let normal = self.damage(attacker, defender, move_used, Roll::FIXED) as f64;
        if !include_crit_chance {
            return normal;
        }
        let crit_rate = critical_hit_rate(attacker);
        let critical = self.damage(
            attacker,
            defender,
            move_used,
            Roll {
                critical: true,
                roll: AVERAGE_ROLL,
            },
        ) as f64;
        normal * (1.0 - crit_rate) + critical * crit_rate
    }
}

impl CombatResolver for Gen1Resolver<'_> {
    fn resolve(
        &self,
        attacker: &Pokemon,
        defender: &Pokemon,
        move_used: &Move,
        critical: Option<bool>,
        roll: Option<u8>,
    ) -> u16 {
        let roll = match (critical, roll) {
            (Some(critical), Some(roll)) => Roll { critical, roll },
            (critical, roll) => {
                let sampled = Roll::sample(&mut rand::rng(), attacker);
                Roll {
                    critical: critical.unwrap_or(sampled.critical),
                    roll: roll.unwrap_or(sampled.roll),
                }
            }
        };
        self.damage(attacker, defender, move_used, roll)
    }

    fn effectiveness(
        &self,
        attack_type: PokemonType,
        defense_primary: PokemonType,
        defense_secondary: Option<PokemonType>,
    ) -> f32 {
        self.chart
            .dual_multiplier(attack_type, defense_primary, defense_secondary)
    }

    fn expected_damage(
        &self,
        attacker: &Pokemon,
        defender: &Pokemon,
        move_used: &Move,
        include_crit_chance: bool,
    ) -> f64 {
        self.average_damage(attacker, defender, move_used, include_crit_chance)
    }
}

/// Generation 1 critical-hit chance: base speed / 512.
pub fn critical_hit_rate(attacker: &Pokemon) -> f64 {
    (attacker.base_stats.speed as f64 / 512.0).min(1.0)
}

pub fn stab_multiplier(attacker: &Pokemon, move_used: &Move) -> f64 {
    if attacker.has_type(move_used.move_type) {
        STAB_MULTIPLIER
    } else {
        1.0
    }
}

/// Generation 1 damage formula. Status moves deal nothing; physical types
/// read Attack against Defense, everything else Special against Special.
pub fn calculate_damage(
    chart: &TypeChart,
    attacker: &Pokemon,
    defender: &Pokemon,
    move_used: &Move,
    roll: Roll,
) -> u16 {
    if move_used.power == 0 {
        return 0;
    }

    let (attack, defense) = if move_used.is_physical() {
        (attacker.stats.attack, defender.stats.defense)
    } else {
        (attacker.stats.special, defender.stats.special)
    };

    let level = attacker.level as f64;
    let scaled = (2.0 * level / 5.0 + 2.0) * move_used.power as f64 * attack as f64
        / defense.max(1) as f64;
    let base = (scaled / 50.0).floor() + 2.0;

    let effectiveness = chart.against(move_used.move_type, defender) as f64;
    let critical = if roll.critical { CRITICAL_MULTIPLIER } else { 1.0 };
    let variance = roll.roll as f64 / MAX_ROLL as f64;

    let damage = base * stab_multiplier(attacker, move_used) * effectiveness * critical * variance;
    damage.floor().min(u16::MAX as f64) as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::tests::common::{blastoise, charizard, pikachu, TestPokemonBuilder};
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_thunderbolt_into_blastoise() {
        // Arrange
        let chart = TypeChart::gen1();
        let resolver = Gen1Resolver::new(&chart);
        let attacker = pikachu();
        let defender = blastoise();
        let thunderbolt = attacker.move_by_name("thunderbolt").unwrap().clone();

        // Act
        let damage = resolver.resolve(&attacker, &defender, &thunderbolt, Some(false), Some(AVERAGE_ROLL));

        // Assert: base 33, STAB 1.5, 2x effective, 236/255.
        assert_eq!(damage, 91);
    }

    #[test]
    fn test_status_and_immune_moves_deal_nothing() {
        let chart = TypeChart::gen1();
        let resolver = Gen1Resolver::new(&chart);
        let attacker = TestPokemonBuilder::new("Pikachu", 50)
            .with_types(&[PokemonType::Electric])
            .with_moves(&["thunder-wave", "thunderbolt"])
            .build();
        let ground = TestPokemonBuilder::new("Diglett", 50)
            .with_types(&[PokemonType::Ground])
            .build();

        let wave = attacker.move_at(0).unwrap();
        let bolt = attacker.move_at(1).unwrap();
        assert_eq!(resolver.damage(&attacker, &ground, wave, Roll::FIXED), 0);
        assert_eq!(resolver.damage(&attacker, &ground, bolt, Roll::FIXED), 0);
    }

    #[test]
    fn test_critical_doubles_before_flooring() {
        let chart = TypeChart::gen1();
        let resolver = Gen1Resolver::new(&chart);
        let attacker = charizard();
        let defender = pikachu();
        let flamethrower = attacker.move_by_name("flamethrower").unwrap();

        let normal = resolver.damage(&attacker, &defender, flamethrower, Roll::FIXED);
        let critical = resolver.damage(
            &attacker,
            &defender,
            flamethrower,
            Roll {
                critical: true,
                roll: AVERAGE_ROLL,
            },
        );
        assert!(critical >= normal * 2 && critical <= normal * 2 + 1);
    }

    #[test]
    fn test_damage_range_brackets_every_roll() {
        let chart = TypeChart::gen1();
        let resolver = Gen1Resolver::new(&chart);
        let attacker = blastoise();
        let defender = charizard();
        let surf = attacker.move_by_name("surf").unwrap();

        let (low, high) = resolver.damage_range(&attacker, &defender, surf, false);
        assert!(low < high);

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let roll = Roll {
                critical: false,
                ..Roll::sample(&mut rng, &attacker)
            };
            let damage = resolver.damage(&attacker, &defender, surf, roll);
            assert!((low..=high).contains(&damage));
        }
    }

    #[test]
    fn test_average_damage_without_crits_uses_fixed_roll() {
        let chart = TypeChart::gen1();
        let resolver = Gen1Resolver::new(&chart);
        let attacker = pikachu();
        let defender = blastoise();
        let thunderbolt = attacker.move_by_name("thunderbolt").unwrap();

        assert_eq!(resolver.average_damage(&attacker, &defender, thunderbolt, false), 91.0);
        let weighted = resolver.average_damage(&attacker, &defender, thunderbolt, true);
        assert!(weighted > 91.0, "crit chance can only raise the expectation");
    }

    #[test]
    fn test_expected_damage_through_the_trait_object() {
        let chart = TypeChart::gen1();
        let gen1 = Gen1Resolver::new(&chart);
        let resolver: &dyn CombatResolver = &gen1;
        let attacker = pikachu();
        let defender = blastoise();
        let thunder = attacker.move_by_name("thunder").unwrap();

        assert_eq!(
            resolver.expected_damage(&attacker, &defender, thunder, true),
            gen1.average_damage(&attacker, &defender, thunder, true)
        );
        assert_eq!(
            resolver.expected_damage(&attacker, &defender, thunder, false),
            gen1.damage(&attacker, &defender, thunder, Roll::FIXED) as f64
        );
    }

    #[test]
    fn test_effectiveness_lookup_uses_injected_chart() {
        let chart = TypeChart::gen1().with_override(PokemonType::Electric, PokemonType::Water, 0.5);
        let resolver = Gen1Resolver::new(&chart);
        assert_eq!(
            resolver.effectiveness(PokemonType::Electric, PokemonType::Water, None),
            0.5
        );
        assert_eq!(
            resolver.effectiveness(PokemonType::Electric, PokemonType::Water, Some(PokemonType::Flying)),
            1.0
        );
    }

    #[test]
    fn test_critical_hit_rate_follows_base_speed() {
        assert_eq!(critical_hit_rate(&pikachu()), 90.0 / 512.0);
    }
}
