//! Drill state and core simulation types
//!
//! Everything the render layer reads each frame lives here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::{heading_angle, heading_from_angle};

/// Current phase of a drilling run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DrillStatus {
    /// Waiting for the start control
    #[default]
    Paused,
    /// Advancing one step per tick
    Drilling,
    /// Reached the goal
    Win,
    /// Hit water, an obstacle, or left the course
    Lose,
}

impl DrillStatus {
    /// Win or Lose: no more stepping until a reset
    pub fn is_finished(&self) -> bool {
        matches!(self, DrillStatus::Win | DrillStatus::Lose)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DrillStatus::Paused => "PAUSED",
            DrillStatus::Drilling => "DRILLING",
            DrillStatus::Win => "WIN",
            DrillStatus::Lose => "LOSE",
        }
    }
}

/// How termination is decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DrillMode {
    /// Sample the scene bitmap under the bit
    #[default]
    Easy,
    /// Test the course shapes analytically
    Hard,
}

impl DrillMode {
    pub fn toggled(self) -> Self {
        match self {
            DrillMode::Easy => DrillMode::Hard,
            DrillMode::Hard => DrillMode::Easy,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DrillMode::Easy => "EASY",
            DrillMode::Hard => "HARD",
        }
    }
}

/// Which way the bit's bent sub steers it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Bias {
    /// Clockwise on screen (+1)
    #[default]
    Down,
    /// Counter-clockwise on screen (-1)
    Up,
}

impl Bias {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Bias::Down => 1.0,
            Bias::Up => -1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Bias::Down => Bias::Up,
            Bias::Up => Bias::Down,
        }
    }
}

/// Complete drill state for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrillState {
    /// Bit position (world units, y down)
    pub position: Vec2,
    /// Unit travel direction
    pub heading: Vec2,
    pub bias: Bias,
    /// Every position the bit has left behind, oldest first
    pub path: Vec<Vec2>,
    pub mode: DrillMode,
    pub status: DrillStatus,
}

impl Default for DrillState {
    fn default() -> Self {
        Self::reset()
    }
}

impl DrillState {
    /// Fresh run at the entry point, paused, easy mode
    pub fn reset() -> Self {
        Self {
            position: Vec2::new(START_X, START_Y),
            heading: heading_from_angle(START_ANGLE),
            bias: Bias::Down,
            path: Vec::new(),
            mode: DrillMode::Easy,
            status: DrillStatus::Paused,
        }
    }

    /// Pipe length so far (one unit per step); doubles as the score
    pub fn pipe_length(&self) -> usize {
        self.path.len()
    }

    /// Angle to draw the bit at: heading tilted toward the bias
    pub fn bit_angle(&self) -> f32 {
        heading_angle(self.heading) + START_ANGLE * self.bias.sign()
    }

    pub fn flip_bias(&mut self) {
        self.bias = self.bias.flipped();
    }

    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
    }
}
