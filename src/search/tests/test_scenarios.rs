#[cfg(test)]
mod tests {
    use crate::battle::replay::replay;
    use crate::battle::state::{Outcome, SideId};
    use crate::battle::tests::common::{
        blastoise, create_team_battle, create_test_battle, engine, heavy_hitter, pikachu, weakling,
        TestPokemonBuilder,
    };
    use crate::config::OptimizerConfig;
    use crate::search::{compare_strategies, run_strategy, Strategy};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;
    use schema::PokemonType;

    #[rstest]
    #[case(Strategy::Greedy)]
    #[case(Strategy::Dp)]
    #[case(Strategy::Dijkstra)]
    fn test_one_hit_knockout(#[case] strategy: Strategy) {
        // Arrange
        let initial = create_test_battle(heavy_hitter(), weakling("Rattata"));

        // Act
        let result = run_strategy(strategy, engine(), &initial, &OptimizerConfig::default());

        // Assert
        assert_eq!(result.outcome, Outcome::Victory);
        assert_eq!(result.turns, 1);
        assert_eq!(result.total_damage, 14);
        assert_eq!(result.move_sequence, vec!["Tackle"]);
        assert!(result.final_state.is_terminal());
    }

    #[rstest]
    #[case(Strategy::Greedy)]
    #[case(Strategy::Dp)]
    #[case(Strategy::Dijkstra)]
    fn test_no_pp_left_is_an_immediate_defeat(#[case] strategy: Strategy) {
        let mut initial = create_test_battle(heavy_hitter(), weakling("Rattata"));
        initial.side_mut(SideId::Player).set_pp(0, 0, 0);

        let result = run_strategy(strategy, engine(), &initial, &OptimizerConfig::default());

        assert_eq!(result.outcome, Outcome::Defeat);
        assert_eq!(result.turns, 0);
        assert_eq!(result.total_damage, 0);
        assert!(result.move_sequence.is_empty());
    }

    #[rstest]
    #[case(Strategy::Greedy)]
    #[case(Strategy::Dp)]
    #[case(Strategy::Dijkstra)]
    fn test_all_moves_immune(#[case] strategy: Strategy) {
        // Tackle cannot touch a Ghost, so nothing is ever playable.
        let gastly = TestPokemonBuilder::new("Gastly", 50)
            .with_types(&[PokemonType::Ghost, PokemonType::Poison])
            .with_moves(&["lick"])
            .build();
        let initial = create_test_battle(heavy_hitter(), gastly);

        let result = run_strategy(strategy, engine(), &initial, &OptimizerConfig::default());

        assert_eq!(result.outcome, Outcome::Defeat);
        assert_eq!(result.turns, 0);
        assert_eq!(result.total_damage, 0);
        assert_eq!(result.final_state.key(), initial.key());
    }

    #[rstest]
    #[case(Strategy::Greedy)]
    #[case(Strategy::Dp)]
    #[case(Strategy::Dijkstra)]
    fn test_outmatched_player_reports_its_best_damage(#[case] strategy: Strategy) {
        let initial = create_test_battle(weakling("Rattata"), heavy_hitter());

        let result = run_strategy(strategy, engine(), &initial, &OptimizerConfig::default());

        assert_eq!(result.outcome, Outcome::Defeat);
        assert_eq!(result.turns, 1);
        assert_eq!(result.total_damage, 2);
    }

    #[test]
    fn test_auto_switch_keeps_the_battle_going() {
        let initial = create_team_battle(vec![heavy_hitter()], vec![weakling("Rattata"), weakling("Pidgey")]);

        let successors = engine().successors(&initial);

        assert_eq!(successors.len(), 1);
        let next = &successors[0].state;
        assert!(!next.is_terminal());
        assert_eq!(next.opponent().active_index(), 1);
        assert_eq!(next.player().active_hp(), 403);
    }

    #[test]
    fn test_strategies_agree_on_the_outcome() {
        let initial = create_test_battle(pikachu(), blastoise());

        let results = compare_strategies(engine(), &initial, &OptimizerConfig::default());

        let strategies: Vec<Strategy> = results.iter().map(|result| result.strategy).collect();
        assert_eq!(strategies, vec![Strategy::Greedy, Strategy::Dp, Strategy::Dijkstra]);
        for result in &results {
            assert_eq!(result.outcome, Outcome::Victory, "{}", result);
            assert_eq!(result.turns, 2);
            assert_eq!(result.total_damage, 185);
        }
        assert_eq!(initial.turn, 0);
    }

    #[rstest]
    #[case(Strategy::Greedy)]
    #[case(Strategy::Dp)]
    #[case(Strategy::Dijkstra)]
    fn test_replaying_a_plan_reaches_its_final_state(#[case] strategy: Strategy) {
        let initial = create_team_battle(vec![pikachu(), heavy_hitter()], vec![blastoise(), weakling("Pidgey")]);
        let result = run_strategy(strategy, engine(), &initial, &OptimizerConfig::default());

        let first = replay(&engine(), &initial, &result.actions);
        let second = replay(&engine(), &initial, &result.actions);

        assert_eq!(first.turns_played, result.turns);
        assert_eq!(first.final_state.key(), result.final_state.key());
        assert_eq!(first.events, second.events);
        assert_eq!(first.outcome(), result.final_state.outcome());
    }

    proptest! {
        #[test]
        fn prop_every_strategy_sweeps_weak_teams(size in 1usize..=6) {
            let opponents: Vec<_> = (0..size).map(|i| weakling(&format!("Rattata{}", i))).collect();
            let initial = create_team_battle(vec![heavy_hitter()], opponents);

            for result in compare_strategies(engine(), &initial, &OptimizerConfig::default()) {
                prop_assert_eq!(result.outcome, Outcome::Victory);
                prop_assert_eq!(result.turns, size);
                prop_assert_eq!(result.total_damage, 14 * size as u32);
                if result.strategy == Strategy::Dijkstra {
                    prop_assert_eq!(result.stats.path_cost, Some(size as f64));
                }
            }
        }
    }
}
