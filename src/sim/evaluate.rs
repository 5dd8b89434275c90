//! Win/lose detection
//!
//! Two interchangeable rules decide what happens after each step: easy mode
//! reads the color under the bit, hard mode tests the course shapes.

use glam::Vec2;

use super::geometry::{EllipseOutline, nearest_boundary_distance, point_in_circle, point_in_ellipse};
use super::state::{DrillMode, DrillState, DrillStatus};
use super::terrain::Terrain;
use crate::consts::*;
use crate::scene::{GOAL_COLOR, GROUND_COLOR, PixelSource};

/// Decides the status of a drill bit at `position`
///
/// Returns `Drilling` to keep going, `Win` or `Lose` to end the run.
pub trait TerminationRule {
    fn evaluate(&self, position: Vec2) -> DrillStatus;
}

/// Easy mode: goal color wins, anything but ground color loses
#[derive(Debug, Clone)]
pub struct PixelRule<S> {
    source: S,
}

impl<S: PixelSource> PixelRule<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

impl<S: PixelSource> TerminationRule for PixelRule<S> {
    fn evaluate(&self, position: Vec2) -> DrillStatus {
        let px = self.source.pixel_at(position.x.floor() as i32, position.y.floor() as i32);

        if px.rgb() == GOAL_COLOR.rgb() {
            DrillStatus::Win
        } else if px.rgb() != GROUND_COLOR.rgb() {
            DrillStatus::Lose
        } else {
            DrillStatus::Drilling
        }
    }
}

/// Hard mode: analytic tests against the course
#[derive(Debug, Clone)]
pub struct GeometryRule {
    terrain: Terrain,
    water_outline: EllipseOutline,
    win_tolerance: f32,
}

impl GeometryRule {
    pub fn new(terrain: Terrain, win_tolerance: f32) -> Self {
        Self {
            water_outline: EllipseOutline::sample(&terrain.water, ELLIPSE_SAMPLES),
            terrain,
            win_tolerance: win_tolerance.max(0.0),
        }
    }

    /// Distance to the nearest wall, surface or riverbed (hard-mode HUD ring)
    pub fn clearance(&self, position: Vec2) -> f32 {
        nearest_boundary_distance(position, &self.terrain.bounds, &self.water_outline)
    }
}

impl TerminationRule for GeometryRule {
    fn evaluate(&self, position: Vec2) -> DrillStatus {
        let Vec2 { x, y } = position;
        let bounds = &self.terrain.bounds;
        let below_surface = y > bounds.ground_level;

        if below_surface && point_in_ellipse(position, &self.terrain.water) {
            return DrillStatus::Lose;
        }
        if (x < HARD_LEFT_LIMIT && y < bounds.ground_level) || x > bounds.width {
            return DrillStatus::Lose;
        }
        if y > bounds.height {
            return DrillStatus::Lose;
        }
        if self.terrain.obstacles.iter().any(|c| point_in_circle(position, c)) {
            return DrillStatus::Lose;
        }
        if (x - self.terrain.goal.origin.x).abs() <= self.win_tolerance && y < HARD_WIN_MAX_Y {
            return DrillStatus::Win;
        }
        DrillStatus::Drilling
    }
}

/// Both rules, picked per call by the drill's mode
#[derive(Debug, Clone)]
pub struct Evaluator<S> {
    pub easy: PixelRule<S>,
    pub hard: GeometryRule,
}

impl<S: PixelSource> Evaluator<S> {
    pub fn new(source: S, terrain: Terrain, win_tolerance: f32) -> Self {
        Self {
            easy: PixelRule::new(source),
            hard: GeometryRule::new(terrain, win_tolerance),
        }
    }

    pub fn rule(&self, mode: DrillMode) -> &dyn TerminationRule {
        match mode {
            DrillMode::Easy => &self.easy,
            DrillMode::Hard => &self.hard,
        }
    }

    /// Status for the drill's current position under its current mode
    pub fn evaluate(&self, state: &DrillState) -> DrillStatus {
        self.rule(state.mode).evaluate(state.position)
    }
}
