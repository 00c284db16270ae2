use crate::aircraft::Aircraft;
use crate::config::AgentConfig;
use crate::encoder::Observation;
use crate::error::{FlightError, Result};
use crate::geo;
use crate::reward::reward;
use crate::types::{Action, Position, Weather};

/// Below this many km the endpoints are treated as the same point.
pub const COINCIDENT_KM: f64 = 1e-9;

/// Validated source and destination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Route {
    pub source: Position,
    pub destination: Position,
}

impl Route {
    pub fn new(source: Position, destination: Position) -> Result<Self> {
        check_position(source)?;
        check_position(destination)?;
        Ok(Route { source, destination })
    }

    pub fn total_distance(&self) -> f64 {
        geo::distance(self.source, self.destination)
    }

    pub fn is_degenerate(&self) -> bool {
        self.total_distance() < COINCIDENT_KM
    }
}

fn check_position(p: Position) -> Result<()> {
    if !(p.lat.is_finite() && (-90.0..=90.0).contains(&p.lat)) {
        return Err(FlightError::InvalidLatitude(p.lat));
    }
    if !(p.lng.is_finite() && (-180.0..=180.0).contains(&p.lng)) {
        return Err(FlightError::InvalidLongitude(p.lng));
    }
    Ok(())
}

/// Result of applying one speed choice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    pub reward: f64,
    pub move_distance: f64,
    /// Distance left after the move, km.
    pub distance_km: f64,
    pub distance_pct: f64,
    pub reached_destination: bool,
}

/// One episode's mutable state: the aircraft, the step counter and the fixed route length.
pub struct FlightEnv {
    pub route: Route,
    pub aircraft: Aircraft,
    pub max_steps: u32,
    current_step: u32,
    total_distance: f64,
}

impl FlightEnv {
    pub fn new(route: Route, config: &AgentConfig) -> Self {
        FlightEnv {
            route,
            aircraft: Aircraft::new(route.source, config.initial_fuel, config.fuel_per_speed),
            max_steps: config.max_steps,
            current_step: 0,
            total_distance: route.total_distance(),
        }
    }

    pub fn current_step(&self) -> u32 {
        self.current_step
    }

    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    pub fn distance_to_destination(&self) -> f64 {
        geo::distance(self.aircraft.position, self.route.destination)
    }

    /// Distance as a percentage of the full route.
    pub fn distance_pct(&self, distance_km: f64) -> f64 {
        if self.total_distance < COINCIDENT_KM {
            return 0.0;
        }
        distance_km / self.total_distance * 100.0
    }

    pub fn progress_pct(&self) -> f64 {
        f64::from(self.current_step) / f64::from(self.max_steps) * 100.0
    }

    /// Observation of the current state, as fed to the encoder.
    pub fn observe(&self, speed: Action, weather: Weather, progress_pct: f64) -> Observation {
        Observation {
            fuel: self.aircraft.fuel,
            distance_pct: self.distance_pct(self.distance_to_destination()),
            speed,
            weather,
            progress_pct,
            lat: self.aircraft.position.lat,
            lng: self.aircraft.position.lng,
        }
    }

    /// Moves the aircraft one step at `speed` and scores the result.
    pub fn step(&mut self, speed: Action) -> StepOutcome {
        let move_distance = f64::from(speed) * (self.total_distance / 100.0);
        self.aircraft.fly_towards(self.route.destination, speed, move_distance);

        let distance_km = self.distance_to_destination();
        let distance_pct = self.distance_pct(distance_km);
        let reached_destination = distance_km < move_distance;

        StepOutcome {
            reward: reward(self.aircraft.fuel, distance_pct, speed, reached_destination),
            move_distance,
            distance_km,
            distance_pct,
            reached_destination,
        }
    }

    pub fn advance(&mut self) {
        self.current_step += 1;
    }

    pub fn out_of_steps(&self) -> bool {
        self.current_step >= self.max_steps
    }

    pub fn reset(&mut self) {
        self.current_step = 0;
        self.aircraft.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env() -> FlightEnv {
        let route = Route::new(Position::new(0.0, 0.0), Position::new(0.0, 10.0)).unwrap();
        FlightEnv::new(route, &AgentConfig::default())
    }

    #[test]
    fn route_rejects_bad_coordinates() {
        let ok = Position::new(0.0, 0.0);
        assert!(matches!(
            Route::new(Position::new(91.0, 0.0), ok),
            Err(FlightError::InvalidLatitude(_))
        ));
        assert!(matches!(
            Route::new(ok, Position::new(0.0, f64::NAN)),
            Err(FlightError::InvalidLongitude(_))
        ));
    }

    #[test]
    fn step_moves_a_percentage_of_the_route() {
        let mut env = env();
        let outcome = env.step(10);

        assert!((outcome.move_distance - env.total_distance() / 10.0).abs() < 1e-9);
        assert!((outcome.distance_pct - 90.0).abs() < 1e-6);
        assert!(!outcome.reached_destination);
        assert!((env.aircraft.fuel - 92.0).abs() < 1e-9);
        // fuel > 50 bonus plus efficiency term
        assert!((outcome.reward - (10.0 + 9.2)).abs() < 1e-9);
    }

    #[test]
    fn arrival_when_remaining_distance_is_less_than_a_move() {
        let mut env = env();
        // 7% of the route per step: 2% left after the 14th move
        for _ in 0..13 {
            assert!(!env.step(7).reached_destination);
        }
        let last = env.step(7);
        assert!(last.reached_destination);
        assert!((last.distance_pct - 2.0).abs() < 1e-6);
        assert!(last.reward > 80.0);
    }

    #[test]
    fn progress_follows_step_counter() {
        let mut env = env();
        assert_eq!(env.progress_pct(), 0.0);
        for _ in 0..25 {
            env.advance();
        }
        assert_eq!(env.progress_pct(), 25.0);
        assert!(!env.out_of_steps());
        env.reset();
        assert_eq!(env.current_step(), 0);
    }

    #[test]
    fn degenerate_route_has_zero_distance_pct() {
        let p = Position::new(5.0, 5.0);
        let env = FlightEnv::new(Route::new(p, p).unwrap(), &AgentConfig::default());
        assert!(env.route.is_degenerate());
        assert_eq!(env.distance_pct(0.0), 0.0);
    }
}
