use std::fmt;

use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Cruise speed selection, 1 (slowest) to 10 (fastest).
pub type Action = u8;
pub type InnerMap = FxHashMap<Action, f64>;
pub type QTable = FxHashMap<StateKey, InnerMap>;

pub const ACTIONS: [Action; 10] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10];

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A point on the sphere, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub lat: f64,
    pub lng: f64,
}

impl Position {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Position { lat, lng }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}, {:.2}", self.lat, self.lng)
    }
}

/// Discretized observation: (fuel, distance, speed, weather, progress, lat zone, lng zone).
///
/// Displays as `f-d-s-w-p-la-lo`, which is unique per bucket combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateKey {
    pub fuel: u8,
    pub distance: u8,
    pub speed: u8,
    pub weather: u8,
    pub progress: u8,
    pub lat_zone: u8,
    pub lng_zone: u8,
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}-{}-{}-{}-{}",
            self.fuel, self.distance, self.speed, self.weather, self.progress, self.lat_zone, self.lng_zone
        )
    }
}

/// Categorical weather signal. Only ever used as a state feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Weather {
    Clear = 1,
    Cloudy = 2,
    Stormy = 3,
}

impl Weather {
    pub const ALL: [Weather; 3] = [Weather::Clear, Weather::Cloudy, Weather::Stormy];

    pub fn value(self) -> u8 {
        self as u8
    }
}
