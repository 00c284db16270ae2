use rand::SeedableRng;
use rand::seq::IndexedRandom;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use crate::config::AgentConfig;
use crate::encoder::encode_state;
use crate::env::{FlightEnv, Route};
use crate::error::Result;
use crate::policy::select_action;
use crate::q_table::ValueTable;
use crate::sink::{FlightSink, NoDelay, Pacer, StopHandle, StepReport};
use crate::types::{Position, Weather};

/// How an episode ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum Outcome {
    Success,
    OutOfFuel,
    StepLimit,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct EpisodeSummary {
    pub outcome: Outcome,
    /// Steps simulated, including the one that ended the episode.
    pub steps: u32,
    pub final_fuel: f64,
    pub final_position: Position,
    pub total_reward: f64,
    pub table_size: usize,
}

/// Tabular Q-learning pilot. Owns its value table for its whole lifetime.
pub struct QLearningAgent {
    config: AgentConfig,
    table: ValueTable,
    rng: ChaCha8Rng,
}

impl QLearningAgent {
    pub fn new(config: AgentConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        };
        Ok(QLearningAgent {
            table: ValueTable::new(config.learning_rate, config.discount_factor),
            config,
            rng,
        })
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn table(&self) -> &ValueTable {
        &self.table
    }

    pub fn exploration_rate(&self) -> f64 {
        self.config.exploration_rate
    }

    /// Forgets everything learned so far.
    pub fn reset(&mut self) {
        self.table.clear();
    }

    /// Flies one episode from `route.source` to `route.destination`, learning online.
    ///
    /// `sink` gets one report per step; `pacer` runs between steps; `stop` is polled before
    /// each step.
    pub fn fly_episode<S, P>(&mut self, route: Route, sink: &mut S, pacer: &mut P, stop: &StopHandle) -> EpisodeSummary
    where
        S: FlightSink + ?Sized,
        P: Pacer + ?Sized,
    {
        let mut env = FlightEnv::new(route, &self.config);
        let mut total_reward = 0.0;

        if route.is_degenerate() {
            warn!(source = %route.source, "source and destination coincide, treating as arrived");
            return self.summarize(&env, Outcome::Success, 0, total_reward);
        }

        let outcome = loop {
            if stop.is_stopped() {
                break Outcome::Cancelled;
            }

            let step = env.current_step();
            let progress = env.progress_pct();
            let weather = *Weather::ALL.choose(&mut self.rng).unwrap_or(&Weather::Clear);

            let state = encode_state(&env.observe(self.config.nominal_speed, weather, progress));
            let action = select_action(&mut self.table, state, self.config.exploration_rate, &mut self.rng);

            let result = env.step(action);
            total_reward += result.reward;

            let next_state = encode_state(&env.observe(action, weather, progress + 1.0));
            self.table.update(state, action, result.reward, next_state);

            debug!(
                "Step {}: Speed {}, Fuel {:.1}%, Dist {:.0}km",
                step, action, env.aircraft.fuel, result.distance_km
            );
            sink.on_step(&StepReport {
                position: env.aircraft.position,
                fuel: env.aircraft.fuel,
                step,
                speed: action,
                distance_km: result.distance_km,
                reward: result.reward,
                table_size: self.table.len(),
                exploration_rate: self.config.exploration_rate,
            });

            if result.reached_destination {
                break Outcome::Success;
            }
            env.advance();
            if env.aircraft.is_empty() {
                break Outcome::OutOfFuel;
            }
            if env.out_of_steps() {
                break Outcome::StepLimit;
            }

            pacer.pause();
        };

        let steps = match outcome {
            Outcome::Success => env.current_step() + 1,
            _ => env.current_step(),
        };
        self.summarize(&env, outcome, steps, total_reward)
    }

    /// Flies `episodes` back-to-back episodes without pacing, sharing the table.
    ///
    /// Stops early if `stop` fires; the cancelled episode is included in the result.
    pub fn train<S>(&mut self, route: Route, episodes: usize, sink: &mut S, stop: &StopHandle) -> Vec<EpisodeSummary>
    where
        S: FlightSink + ?Sized,
    {
        let mut summaries = Vec::with_capacity(episodes);
        for _ in 0..episodes {
            let summary = self.fly_episode(route, sink, &mut NoDelay, stop);
            let cancelled = summary.outcome == Outcome::Cancelled;
            summaries.push(summary);
            if cancelled {
                break;
            }
        }
        summaries
    }

    fn summarize(&self, env: &FlightEnv, outcome: Outcome, steps: u32, total_reward: f64) -> EpisodeSummary {
        info!(
            ?outcome,
            steps,
            fuel = env.aircraft.reported_fuel(),
            table_size = self.table.len(),
            "episode finished"
        );
        EpisodeSummary {
            outcome,
            steps,
            final_fuel: env.aircraft.fuel,
            final_position: env.aircraft.position,
            total_reward,
            table_size: self.table.len(),
        }
    }
}
