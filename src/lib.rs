//! Directional Boring - steer a drill bit under a river to the goal
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, drill state, stepping, termination)
//! - `scene`: Rasterized background used as the easy-mode pixel source
//! - `session`: One play session: controls, fixed timestep, events
//! - `settings`: Data-driven configuration (JSON)
//! - `web`: Browser bindings (wasm32 only)

pub mod scene;
pub mod session;
pub mod settings;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use scene::{PixelSource, Rgba, SceneBitmap};
pub use session::{GameEvent, Session, Snapshot};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one drill step per 60 Hz frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Longest frame the accumulator will absorb (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// World dimensions (y grows downward)
    pub const WORLD_WIDTH: f32 = 600.0;
    pub const WORLD_HEIGHT: f32 = 400.0;
    /// Surface line; everything below is ground
    pub const GROUND_LEVEL: f32 = 100.0;

    /// Drill entry point and initial heading
    pub const START_X: f32 = 10.0;
    pub const START_Y: f32 = GROUND_LEVEL;
    pub const START_ANGLE: f32 = std::f32::consts::FRAC_PI_6;

    /// Heading change per tick (radians), signed by bias
    pub const TURN_ANGLE: f32 = 0.01;
    /// Randomness slider range
    pub const MAX_RANDOMNESS: f32 = 10.0;

    /// Goal marker (square sitting on the surface)
    pub const GOAL_X: f32 = 540.0;
    pub const GOAL_SIZE: f32 = 20.0;

    /// Hard mode: no surfacing left of this x
    pub const HARD_LEFT_LIMIT: f32 = 200.0;
    /// Hard mode: drill must climb above this y at the goal to win
    pub const HARD_WIN_MAX_Y: f32 = 20.0;
    /// Hard mode: default slack around GOAL_X for the win test
    pub const HARD_WIN_TOLERANCE: f32 = 0.5;

    /// Points sampled along the water ellipse for distance queries
    pub const ELLIPSE_SAMPLES: usize = 1000;
}

/// Unit vector for a heading angle (radians, screen space)
#[inline]
pub fn heading_from_angle(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Angle of a heading vector (radians, [-π, π])
#[inline]
pub fn heading_angle(heading: Vec2) -> f32 {
    heading.y.atan2(heading.x)
}

/// Rotate a vector by `angle` radians
#[inline]
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    Vec2::from_angle(angle).rotate(v)
}
