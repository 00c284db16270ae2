use crate::geo;
use crate::types::{Action, Position};

pub struct Aircraft {
    pub position: Position,
    pub fuel: f64,
    pub fuel_per_speed: f64,
    initial_position: Position,
    initial_fuel: f64,
}

impl Aircraft {
    pub fn new(position: Position, fuel: f64, fuel_per_speed: f64) -> Self {
        Aircraft {
            position,
            fuel,
            fuel_per_speed,
            initial_position: position,
            initial_fuel: fuel,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fuel <= 0.0
    }

    /// Fuel reading for display. The tank itself may dip below zero on the final step.
    pub fn reported_fuel(&self) -> f64 {
        self.fuel.max(0.0)
    }

    pub fn fuel_cost(&self, speed: Action) -> f64 {
        f64::from(speed) * self.fuel_per_speed
    }

    /// Flies `distance_km` towards `target` along the great circle and burns fuel for `speed`.
    pub fn fly_towards(&mut self, target: Position, speed: Action, distance_km: f64) {
        let bearing = geo::bearing(self.position, target);
        self.position = geo::project(self.position, bearing, distance_km);
        self.fuel -= self.fuel_cost(speed);
    }

    pub fn reset(&mut self) {
        self.position = self.initial_position;
        self.fuel = self.initial_fuel;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flying_burns_fuel_and_closes_distance() {
        let target = Position::new(0.0, 10.0);
        let mut aircraft = Aircraft::new(Position::new(0.0, 0.0), 100.0, 0.8);
        let before = geo::distance(aircraft.position, target);

        aircraft.fly_towards(target, 5, 55.6);

        assert!((aircraft.fuel - 96.0).abs() < 1e-12);
        let after = geo::distance(aircraft.position, target);
        assert!((before - after - 55.6).abs() < 1e-6);
        assert!(aircraft.position.lat.abs() < 1e-9);
    }

    #[test]
    fn reported_fuel_never_negative() {
        let mut aircraft = Aircraft::new(Position::new(0.0, 0.0), 2.0, 0.8);
        aircraft.fly_towards(Position::new(10.0, 0.0), 10, 1.0);
        assert!(aircraft.fuel < 0.0);
        assert!(aircraft.is_empty());
        assert_eq!(aircraft.reported_fuel(), 0.0);
    }

    #[test]
    fn reset_restores_start() {
        let mut aircraft = Aircraft::new(Position::new(1.0, 2.0), 100.0, 0.8);
        aircraft.fly_towards(Position::new(5.0, 5.0), 3, 100.0);
        aircraft.reset();
        assert_eq!(aircraft.position, Position::new(1.0, 2.0));
        assert_eq!(aircraft.fuel, 100.0);
    }
}
