//! Session settings
//!
//! Loaded from JSON by the native runner; the browser uses the defaults and
//! drives the same knobs through the control surface.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::DrillMode;
pub use crate::sim::tick::clamp_randomness;

/// Session settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Initial randomness slider value (clamped to 0..=10)
    pub randomness: f32,
    /// Mode for the first run (a restart always goes back to Easy)
    pub mode: DrillMode,
    /// RNG seed; `None` lets the driver pick one
    pub seed: Option<u64>,
    /// Slack around the goal x for the hard-mode win test (0 = exact)
    pub hard_win_tolerance: f32,

    // === Headless runner ===
    /// Give up after this many ticks
    pub max_ticks: u64,
    /// Ticks (by path length) at which to flip the bias
    pub bias_flips: Vec<usize>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            randomness: 0.0,
            mode: DrillMode::Easy,
            seed: None,
            hard_win_tolerance: HARD_WIN_TOLERANCE,

            max_ticks: 5_000,
            bias_flips: Vec::new(),
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Randomness clamped to the slider range
    pub fn effective_randomness(&self) -> f32 {
        clamp_randomness(self.randomness)
    }
}
