//! Deterministic simulation module
//!
//! All drilling logic lives here. This module must be pure and deterministic:
//! - One step per logical tick
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod evaluate;
pub mod geometry;
pub mod state;
pub mod terrain;
pub mod tick;

pub use evaluate::{Evaluator, GeometryRule, PixelRule, TerminationRule};
pub use geometry::{
    Circle, Ellipse, EllipseOutline, Rect, WorldBounds, nearest_boundary_distance,
    point_in_circle, point_in_ellipse,
};
pub use state::{Bias, DrillMode, DrillState, DrillStatus};
pub use terrain::Terrain;
pub use tick::{step, tick};
