use crate::types::{Action, StateKey, Weather};

/// Continuous snapshot of the flight, before bucketing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    /// Remaining fuel, 0-100.
    pub fuel: f64,
    /// Distance left as a percentage of the whole route.
    pub distance_pct: f64,
    pub speed: Action,
    pub weather: Weather,
    /// Share of the step budget already used, 0-100.
    pub progress_pct: f64,
    pub lat: f64,
    pub lng: f64,
}

/// Maps an observation to its discrete state key. Buckets are closed on the upper bound.
pub fn encode_state(obs: &Observation) -> StateKey {
    StateKey {
        fuel: bucket_upper(obs.fuel, &[25.0, 50.0, 75.0]),
        distance: bucket_upper(obs.distance_pct, &[20.0, 40.0, 60.0, 80.0]),
        speed: bucket_upper(f64::from(obs.speed), &[3.0, 7.0]),
        weather: obs.weather.value() - 1,
        progress: bucket_upper(obs.progress_pct, &[33.0, 66.0]),
        lat_zone: bucket_below(obs.lat, &[-30.0, 30.0]),
        lng_zone: bucket_below(obs.lng, &[-60.0, 60.0]),
    }
}

// first bound with value <= bound wins
fn bucket_upper(value: f64, bounds: &[f64]) -> u8 {
    bounds.iter().position(|&b| value <= b).unwrap_or(bounds.len()) as u8
}

// first bound with value < bound wins
fn bucket_below(value: f64, bounds: &[f64]) -> u8 {
    bounds.iter().position(|&b| value < b).unwrap_or(bounds.len()) as u8
}
