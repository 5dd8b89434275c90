//! Fixed-step drill simulation
//!
//! One call advances the bit one unit along its (rotated) heading.

use rand::Rng;

use super::evaluate::Evaluator;
use super::state::{DrillState, DrillStatus};
use crate::consts::*;
use crate::rotate;
use crate::scene::PixelSource;

/// Clamp a randomness value into `[0, MAX_RANDOMNESS]` (NaN reads as 0)
pub fn clamp_randomness(r: f32) -> f32 {
    if r.is_nan() {
        0.0
    } else {
        r.clamp(0.0, MAX_RANDOMNESS)
    }
}

/// Advance the drill by one step
///
/// Turns the heading by the bias plus a random wobble of up to
/// `randomness` turn angles either way, records the old position in the
/// path, then moves one unit. `randomness` is clamped to
/// `[0, MAX_RANDOMNESS]`.
pub fn step<R: Rng>(state: &mut DrillState, randomness: f32, rng: &mut R) {
    let randomness = clamp_randomness(randomness);
    let mut heading = rotate(state.heading, TURN_ANGLE * state.bias.sign());

    if randomness > 0.0 {
        let wobble = rng.random_range(-randomness..=randomness) * TURN_ANGLE;
        heading = rotate(heading, wobble);
    }
    state.heading = heading.normalize();

    state.path.push(state.position);
    state.position += state.heading;
}

/// Run one logical tick: step, then decide the outcome
///
/// Does nothing unless the drill is `Drilling`. Returns the new status when
/// the tick ended the run.
pub fn tick<S, R>(
    state: &mut DrillState,
    evaluator: &Evaluator<S>,
    randomness: f32,
    rng: &mut R,
) -> Option<DrillStatus>
where
    S: PixelSource,
    R: Rng,
{
    if state.status != DrillStatus::Drilling {
        return None;
    }

    step(state, randomness, rng);
    state.status = evaluator.evaluate(state);

    state.status.is_finished().then_some(state.status)
}
