//! Agent configuration.
//!
//! Defaults reproduce the classic setup: alpha 0.1, gamma 0.9, a flat 30% exploration
//! rate, 100 steps per episode and a 100 ms visualization delay.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{FlightError, Result};
use crate::types::Action;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Step size of the value update (alpha).
    pub learning_rate: f64,
    /// Weight of the next state's best value (gamma).
    pub discount_factor: f64,
    /// Probability of a random speed. Constant for the agent's lifetime.
    pub exploration_rate: f64,
    pub max_steps: u32,
    pub initial_fuel: f64,
    /// Fuel burned per unit of speed per step.
    pub fuel_per_speed: f64,
    /// Speed fed to the encoder when observing the current state.
    pub nominal_speed: Action,
    pub step_delay_ms: u64,
    /// Fixed RNG seed; entropy-seeded when absent.
    pub seed: Option<u64>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        AgentConfig {
            learning_rate: 0.1,
            discount_factor: 0.9,
            exploration_rate: 0.3,
            max_steps: 100,
            initial_fuel: 100.0,
            fuel_per_speed: 0.8,
            nominal_speed: 5,
            step_delay_ms: 100,
            seed: None,
        }
    }
}

impl AgentConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: AgentConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |field, reason| Err(FlightError::InvalidConfig { field, reason });

        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return invalid("learning_rate", "must be in (0, 1]");
        }
        if !(0.0..=1.0).contains(&self.discount_factor) {
            return invalid("discount_factor", "must be in [0, 1]");
        }
        if !(0.0..=1.0).contains(&self.exploration_rate) {
            return invalid("exploration_rate", "must be in [0, 1]");
        }
        if self.max_steps == 0 {
            return invalid("max_steps", "must be positive");
        }
        if !(self.initial_fuel > 0.0 && self.initial_fuel.is_finite()) {
            return invalid("initial_fuel", "must be positive");
        }
        if !(self.fuel_per_speed > 0.0 && self.fuel_per_speed.is_finite()) {
            return invalid("fuel_per_speed", "must be positive");
        }
        if !(1..=10).contains(&self.nominal_speed) {
            return invalid("nominal_speed", "must be in 1..=10");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = AgentConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.step_delay(), Duration::from_millis(100));
    }

    #[test]
    fn rejects_out_of_range_rates() {
        let bad = AgentConfig { exploration_rate: 1.5, ..AgentConfig::default() };
        assert!(matches!(
            bad.validate(),
            Err(FlightError::InvalidConfig { field: "exploration_rate", .. })
        ));

        let bad = AgentConfig { learning_rate: 0.0, ..AgentConfig::default() };
        assert!(bad.validate().is_err());

        let bad = AgentConfig { max_steps: 0, ..AgentConfig::default() };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "exploration_rate": 0.1, "seed": 9 }}"#).unwrap();

        let config = AgentConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.exploration_rate, 0.1);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.max_steps, 100);
    }

    #[test]
    fn invalid_json_config_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "discount_factor": 2.0 }}"#).unwrap();
        assert!(AgentConfig::from_json_file(file.path()).is_err());
    }
}
