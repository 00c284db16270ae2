use rand::Rng;
use rand::seq::IndexedRandom;

use crate::q_table::ValueTable;
use crate::types::{ACTIONS, Action, StateKey};

/// Epsilon-greedy choice over `ACTIONS`.
///
/// With probability `exploration_rate` a uniformly random speed is returned, otherwise
/// the greedy one. The state is initialized in the table either way.
///
/// Panics if `exploration_rate` is outside [0, 1]; `AgentConfig::validate` rules that out.
pub fn select_action<R: Rng>(
    table: &mut ValueTable,
    state: StateKey,
    exploration_rate: f64,
    rng: &mut R,
) -> Action {
    table.ensure_initialized(state);

    if rng.random_bool(exploration_rate) {
        *ACTIONS.choose(rng).unwrap_or(&ACTIONS[0])
    } else {
        table.greedy_action(&state).unwrap_or(ACTIONS[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn key() -> StateKey {
        StateKey {
            fuel: 3,
            distance: 4,
            speed: 1,
            weather: 2,
            progress: 0,
            lat_zone: 1,
            lng_zone: 1,
        }
    }

    fn other() -> StateKey {
        StateKey { fuel: 2, ..key() }
    }

    #[test]
    fn selection_initializes_state() {
        let mut table = ValueTable::new(0.1, 0.9);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        select_action(&mut table, key(), 0.3, &mut rng);
        assert_eq!(table.values(&key()).map(|v| v.len()), Some(10));
    }

    #[test]
    fn zero_exploration_is_greedy() {
        let mut table = ValueTable::new(0.1, 0.9);
        table.update(key(), 8, 50.0, other());
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..100 {
            assert_eq!(select_action(&mut table, key(), 0.0, &mut rng), 8);
        }
    }

    #[test]
    fn full_exploration_covers_action_set() {
        let mut table = ValueTable::new(0.1, 0.9);
        table.update(key(), 8, 50.0, other());
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut seen = [false; 10];
        for _ in 0..1000 {
            let a = select_action(&mut table, key(), 1.0, &mut rng);
            assert!((1..=10).contains(&a));
            seen[usize::from(a - 1)] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
