//! Side channels of the flight loop: per-step reports, step pacing and cancellation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use serde::Serialize;

use crate::types::{Action, Position};

/// What the loop publishes after every simulated step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StepReport {
    pub position: Position,
    /// Raw tank level; may be slightly negative on the step that empties it.
    pub fuel: f64,
    pub step: u32,
    pub speed: Action,
    pub distance_km: f64,
    pub reward: f64,
    pub table_size: usize,
    pub exploration_rate: f64,
}

/// Receives one report per step, synchronously, in step order.
pub trait FlightSink {
    fn on_step(&mut self, report: &StepReport);
}

impl<F: FnMut(&StepReport)> FlightSink for F {
    fn on_step(&mut self, report: &StepReport) {
        self(report)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl FlightSink for NoopSink {
    fn on_step(&mut self, _report: &StepReport) {}
}

/// Delay policy applied between steps.
pub trait Pacer {
    fn pause(&mut self);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoDelay;

impl Pacer for NoDelay {
    fn pause(&mut self) {}
}

/// Blocks the calling thread for a fixed interval.
#[derive(Debug, Clone, Copy)]
pub struct ThreadSleepPacer(pub Duration);

impl Pacer for ThreadSleepPacer {
    fn pause(&mut self) {
        if !self.0.is_zero() {
            thread::sleep(self.0);
        }
    }
}

/// Cooperative stop flag, checked between steps.
#[derive(Debug, Default, Clone)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Re-arms the handle for the next episode.
    pub fn clear(&self) {
        self.0.store(false, Ordering::Release);
    }
}
