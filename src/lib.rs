pub mod agent;
pub mod aircraft;
pub mod config;
pub mod encoder;
pub mod env;
pub mod error;
pub mod geo;
pub mod policy;
pub mod q_table;
pub mod reward;
pub mod sink;
pub mod types;

pub use agent::{EpisodeSummary, Outcome, QLearningAgent};
pub use config::AgentConfig;
pub use env::Route;
pub use error::{FlightError, Result};
pub use sink::{FlightSink, NoDelay, NoopSink, Pacer, StepReport, StopHandle, ThreadSleepPacer};
pub use types::{ACTIONS, Action, Position, StateKey};

#[cfg(feature = "python")]
mod python {
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::{AgentConfig, NoDelay, Position, QLearningAgent, Route, StepReport, StopHandle};

    #[pymodule]
    fn flight_rl(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(fly_episode, m)?)
    }

    /// Trains for `episodes` episodes, then returns the last episode's track as (lat, lng, fuel).
    #[pyfunction]
    #[pyo3(signature = (src_lat, src_lng, dst_lat, dst_lng, episodes=1, seed=None))]
    fn fly_episode(
        src_lat: f64,
        src_lng: f64,
        dst_lat: f64,
        dst_lng: f64,
        episodes: usize,
        seed: Option<u64>,
    ) -> PyResult<Vec<(f64, f64, f64)>> {
        let to_py = |e: crate::FlightError| PyValueError::new_err(e.to_string());

        let route = Route::new(Position::new(src_lat, src_lng), Position::new(dst_lat, dst_lng)).map_err(to_py)?;
        let config = AgentConfig { seed, ..AgentConfig::default() };
        let mut agent = QLearningAgent::new(config).map_err(to_py)?;
        let stop = StopHandle::new();

        if episodes > 1 {
            agent.train(route, episodes - 1, &mut crate::NoopSink, &stop);
        }

        let mut track = Vec::new();
        agent.fly_episode(
            route,
            &mut |r: &StepReport| track.push((r.position.lat, r.position.lng, r.fuel)),
            &mut NoDelay,
            &stop,
        );
        Ok(track)
    }
}
