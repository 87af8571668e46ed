#[cfg(test)]
mod tests {
    use crate::battle::state::Outcome;
    use crate::battle::tests::common::{
        blastoise, create_team_battle, create_test_battle, engine, heavy_hitter, pikachu, weakling,
    };
    use crate::search::greedy::{GreedySearch, Ranking};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_greedy_one_hit_knockout() {
        // Arrange
        let initial = create_test_battle(heavy_hitter(), weakling("Rattata"));

        // Act
        let result = GreedySearch::new(engine(), 75).run(&initial);

        // Assert
        assert_eq!(result.outcome, Outcome::Victory);
        assert_eq!(result.turns, 1);
        assert_eq!(result.total_damage, 14);
        assert_eq!(result.move_sequence, vec!["Tackle"]);
        assert_eq!(result.stats.states_explored, 1);
    }

    #[test]
    fn test_greedy_takes_the_hardest_hit_each_turn() {
        // Thunder outdamages Thunderbolt; two of them beat Blastoise before
        // two Surfs bring Pikachu down.
        let initial = create_test_battle(pikachu(), blastoise());

        let result = GreedySearch::new(engine(), 75).run(&initial);

        assert!(result.success());
        assert_eq!(result.move_sequence, vec!["Thunder", "Thunder"]);
        assert_eq!(result.total_damage, 185);
        assert_eq!(result.final_state.player().active_hp(), 61);
    }

    #[test]
    fn test_greedy_stops_at_the_turn_limit() {
        let initial = create_team_battle(vec![heavy_hitter()], vec![weakling("Rattata"), weakling("Pidgey")]);

        let result = GreedySearch::new(engine(), 1).run(&initial);

        assert_eq!(result.outcome, Outcome::Defeat);
        assert_eq!(result.turns, 1);
        assert_eq!(result.total_damage, 14);
        assert!(!result.final_state.is_terminal());
    }

    #[test]
    fn test_greedy_does_not_touch_the_initial_state() {
        let initial = create_test_battle(pikachu(), blastoise());
        let before = initial.key();

        GreedySearch::new(engine(), 75).run(&initial);

        assert_eq!(initial.key(), before);
    }

    #[test]
    fn test_sampled_ranking_is_reproducible() {
        let initial = create_test_battle(pikachu(), blastoise());
        let search = GreedySearch::new(engine(), 75).with_ranking(Ranking::Sampled { seed: 7 });

        let first = search.run(&initial);
        let second = search.run(&initial);

        assert_eq!(first.actions, second.actions);
        assert_eq!(first.total_damage, second.total_damage);
        assert!(first.turns >= 1);
    }

    #[test]
    fn test_crit_weighted_ranking_scores_through_the_resolver() {
        // Arrange
        let initial = create_test_battle(pikachu(), blastoise());
        let search = GreedySearch::new(engine(), 75).with_ranking(Ranking::CritWeighted);

        // Act
        let result = search.run(&initial);

        // Assert
        // Crit chance scales every move alike, so Thunder still outranks Thunderbolt.
        assert!(result.success());
        assert_eq!(result.move_sequence, vec!["Thunder", "Thunder"]);
        assert_eq!(result.total_damage, 185);
        assert_eq!(result.final_state.player().active_hp(), 61);
    }
}
