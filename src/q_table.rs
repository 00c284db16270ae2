use fxhash::FxBuildHasher;

use crate::types::{ACTIONS, Action, InnerMap, QTable, StateKey};

/// Tabular action-value estimates with a fixed learning rate and discount.
#[derive(Debug, Clone)]
pub struct ValueTable {
    table: QTable,
    alpha: f64,
    gamma: f64,
}

impl ValueTable {
    pub fn new(alpha: f64, gamma: f64) -> Self {
        ValueTable {
            table: QTable::with_hasher(FxBuildHasher::default()),
            alpha,
            gamma,
        }
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// Number of distinct states seen so far.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn contains(&self, state: &StateKey) -> bool {
        self.table.contains_key(state)
    }

    /// Inserts a zeroed entry for every action if `state` is new.
    pub fn ensure_initialized(&mut self, state: StateKey) -> &mut InnerMap {
        self.table.entry(state).or_insert_with(|| {
            let mut values = InnerMap::with_hasher(FxBuildHasher::default());
            ACTIONS.iter().for_each(|&a| {
                values.insert(a, 0.0);
            });
            values
        })
    }

    pub fn values(&self, state: &StateKey) -> Option<&InnerMap> {
        self.table.get(state)
    }

    /// All states with their per-action values, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&StateKey, &InnerMap)> {
        self.table.iter()
    }

    pub fn value(&self, state: &StateKey, action: Action) -> Option<f64> {
        self.table.get(state).and_then(|v| v.get(&action).copied())
    }

    /// Highest action value for `state`, or `None` if the state was never initialized.
    pub fn best_value(&self, state: &StateKey) -> Option<f64> {
        self.greedy(state).map(|(_, v)| v)
    }

    /// Best action for `state`; ties go to the earliest action in `ACTIONS`.
    pub fn greedy_action(&self, state: &StateKey) -> Option<Action> {
        self.greedy(state).map(|(a, _)| a)
    }

    fn greedy(&self, state: &StateKey) -> Option<(Action, f64)> {
        let values = self.table.get(state)?;
        let mut best: Option<(Action, f64)> = None;
        for &action in ACTIONS.iter() {
            let v = values.get(&action).copied().unwrap_or(0.0);
            match best {
                Some((_, bv)) if v <= bv => {}
                _ => best = Some((action, v)),
            }
        }
        best
    }

    /// One-step Q-learning update. Initializes both states first. Returns the new value.
    pub fn update(&mut self, state: StateKey, action: Action, reward: f64, next_state: StateKey) -> f64 {
        self.ensure_initialized(next_state);
        let max_next_q = self.best_value(&next_state).unwrap_or(0.0);
        let (alpha, gamma) = (self.alpha, self.gamma);

        let values = self.ensure_initialized(state);
        let current_q = values.entry(action).or_insert(0.0);
        *current_q += alpha * (reward + gamma * max_next_q - *current_q);
        *current_q
    }

    pub fn clear(&mut self) {
        self.table.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(fuel: u8) -> StateKey {
        StateKey {
            fuel,
            distance: 4,
            speed: 1,
            weather: 0,
            progress: 0,
            lat_zone: 1,
            lng_zone: 1,
        }
    }

    #[test]
    fn initialization_is_total_and_idempotent() {
        let mut table = ValueTable::new(0.1, 0.9);
        table.ensure_initialized(key(3));
        assert_eq!(table.len(), 1);

        let values = table.values(&key(3)).unwrap();
        assert_eq!(values.len(), 10);
        assert!(ACTIONS.iter().all(|a| values[a] == 0.0));

        table.update(key(3), 4, 5.0, key(2));
        let before = table.value(&key(3), 4);
        table.ensure_initialized(key(3));
        assert_eq!(table.value(&key(3), 4), before);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn bellman_update_from_zero() {
        let mut table = ValueTable::new(0.1, 0.9);
        let q = table.update(key(3), 7, 10.0, key(2));
        assert_eq!(q, 1.0);
        assert_eq!(table.value(&key(3), 7), Some(1.0));
        assert_eq!(table.values(&key(2)).unwrap().len(), 10);
    }

    #[test]
    fn bellman_update_uses_best_next_value() {
        let mut table = ValueTable::new(0.5, 0.9);
        table.update(key(2), 3, 10.0, key(1)); // Q(2,3) = 5
        let q = table.update(key(3), 1, 0.0, key(2));
        assert!((q - 0.5 * 0.9 * 5.0).abs() < 1e-12);
    }

    #[test]
    fn greedy_ties_go_to_first_action() {
        let mut table = ValueTable::new(0.1, 0.9);
        table.ensure_initialized(key(0));
        assert_eq!(table.greedy_action(&key(0)), Some(1));

        table.update(key(0), 6, 1.0, key(1));
        table.update(key(0), 9, 1.0, key(1));
        assert_eq!(table.greedy_action(&key(0)), Some(6));
        assert!((table.best_value(&key(0)).unwrap() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn unknown_state_has_no_best_value() {
        let table = ValueTable::new(0.1, 0.9);
        assert_eq!(table.best_value(&key(0)), None);
        assert!(table.is_empty());
    }

    #[test]
    fn clear_forgets_everything() {
        let mut table = ValueTable::new(0.1, 0.9);
        table.update(key(0), 1, 1.0, key(1));
        table.clear();
        assert!(table.is_empty());
    }
}
