#[cfg(test)]
mod tests {
    use crate::battle::state::{MoveRef, Outcome};
    use crate::battle::tests::common::{
        blastoise, create_team_battle, create_test_battle, engine, heavy_hitter, pikachu, weakling,
    };
    use crate::search::memo::MemoSearch;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_memo_cache_accounting() {
        // Arrange
        let initial = create_team_battle(vec![heavy_hitter()], vec![weakling("Rattata"), weakling("Pidgey")]);
        let mut search = MemoSearch::new(engine(), 40);

        // Act
        let result = search.run(&initial);

        // Assert
        // Two misses while evaluating the start, one hit when the plan is
        // followed from the second state.
        assert_eq!(result.outcome, Outcome::Victory);
        assert_eq!(result.turns, 2);
        assert_eq!(result.total_damage, 28);
        assert_eq!(result.stats.cache_misses, 2);
        assert_eq!(result.stats.cache_hits, 1);
        assert_eq!(result.stats.states_explored, 2);
        assert_eq!(search.cache_len(), 2);
    }

    #[test]
    fn test_memo_value_counts_immediate_and_final_damage() {
        let initial = create_test_battle(heavy_hitter(), weakling("Rattata"));
        let mut search = MemoSearch::new(engine(), 40);

        let entry = search.evaluate(&initial, 0);

        // Tackle deals far more than 14 before clamping, plus 14 on the won state.
        assert_eq!(entry.best, Some(MoveRef { member: 0, slot: 0 }));
        assert!(entry.value > 28.0);
        assert_eq!(search.cached(&initial.key()), Some(&entry));
    }

    #[test]
    fn test_memo_prefers_the_winning_line() {
        let initial = create_test_battle(pikachu(), blastoise());

        let result = MemoSearch::new(engine(), 40).run(&initial);

        assert!(result.success());
        assert_eq!(result.turns, 2);
        assert_eq!(result.total_damage, 185);
        assert_eq!(result.move_sequence, vec!["Thunder", "Thunder"]);
    }

    #[test]
    fn test_memo_depth_bound() {
        let initial = create_team_battle(vec![heavy_hitter()], vec![weakling("Rattata"), weakling("Pidgey")]);

        let result = MemoSearch::new(engine(), 1).run(&initial);

        assert_eq!(result.outcome, Outcome::Defeat);
        assert_eq!(result.turns, 1);
        assert_eq!(result.total_damage, 14);
    }

    #[test]
    fn test_memo_past_the_bound_is_worth_nothing() {
        let initial = create_test_battle(heavy_hitter(), weakling("Rattata"));
        let mut search = MemoSearch::new(engine(), 3);

        let entry = search.evaluate(&initial, 3);

        assert_eq!(entry.value, 0.0);
        assert_eq!(entry.best, None);
        assert_eq!(search.cache_len(), 0);
    }

    #[test]
    fn test_memo_runs_are_independent() {
        let initial = create_test_battle(pikachu(), blastoise());
        let mut search = MemoSearch::new(engine(), 40);

        let first = search.run(&initial);
        let second = search.run(&initial);

        assert_eq!(first.actions, second.actions);
        assert_eq!(first.stats, second.stats);
    }
}
