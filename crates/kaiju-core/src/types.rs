//! Fundamental simulation types.

use serde::{Deserialize, Serialize};

use crate::constants::{DT, TICK_RATE};

pub use glam::DVec2;

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += DT;
    }
}

/// Convert milliseconds to whole ticks (rounded to nearest, saturating).
pub fn ms_to_ticks(ms: u64) -> u64 {
    ms.saturating_mul(TICK_RATE as u64).saturating_add(500) / 1000
}
