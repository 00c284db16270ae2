use crate::types::Action;

/// Per-step feedback. Terms are additive and the sum is not clamped.
///
/// `_distance_pct` is accepted for symmetry with the observation but carries no term.
pub fn reward(fuel: f64, _distance_pct: f64, speed: Action, reached_destination: bool) -> f64 {
    let mut reward = 0.0;

    if reached_destination {
        reward += 100.0;
    }
    if fuel > 50.0 {
        reward += 10.0;
    }

    if fuel <= 0.0 {
        reward -= 100.0;
    }
    if fuel < 25.0 {
        reward -= 20.0;
    }
    if speed > 8 && fuel < 50.0 {
        reward -= 15.0;
    }

    reward + fuel / 10.0
}
