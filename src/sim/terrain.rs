//! The drilling course: surface, river, buried obstacles and the goal
//!
//! A single fixed layout shared by both modes. Easy mode sees it through the
//! rasterized scene; hard mode queries the shapes directly.

use serde::{Deserialize, Serialize};

use super::geometry::{Circle, Ellipse, Rect, WorldBounds};
use crate::consts::*;

/// Fixed course layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Terrain {
    pub bounds: WorldBounds,
    /// River cross-section; only the half below the surface holds water
    pub water: Ellipse,
    /// Buried rocks (hard mode only)
    pub obstacles: [Circle; 3],
    /// Exit pit marker sitting on the surface
    pub goal: Rect,
}

impl Terrain {
    pub const STANDARD: Terrain = Terrain {
        bounds: WorldBounds {
            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,
            ground_level: GROUND_LEVEL,
        },
        water: Ellipse::new(WORLD_WIDTH / 2.0, GROUND_LEVEL, 200.0, 100.0),
        obstacles: [
            Circle::new(175.0, 250.0, 30.0),
            Circle::new(250.0, 275.0, 20.0),
            Circle::new(475.0, 200.0, 40.0),
        ],
        goal: Rect::new(GOAL_X, GROUND_LEVEL - GOAL_SIZE, GOAL_SIZE, GOAL_SIZE),
    };
}

impl Default for Terrain {
    fn default() -> Self {
        Self::STANDARD
    }
}
