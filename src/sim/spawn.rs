//! Robot spawning
//!
//! Population is self-regulating: a fixed per-tick spawn probability bounded
//! by a capacity check, with robots also expiring on their own TTL.

use glam::Vec2;
use rand::Rng;

use crate::consts::*;
use crate::sim::state::{Robot, SessionState};

/// Spawn one robot at a uniformly random in-bounds position with randomized
/// speed, heading, and hue.
pub fn spawn_robot(state: &mut SessionState) {
    let margin = SPAWN_MARGIN;
    // Degenerate bounds (smaller than twice the margin) collapse to the margin point
    let span_x = (state.bounds.x - margin * 2.0).max(0.0);
    let span_y = (state.bounds.y - margin * 2.0).max(0.0);

    let pos = Vec2::new(
        margin + state.rng.random::<f32>() * span_x,
        margin + state.rng.random::<f32>() * span_y,
    );
    let speed = ROBOT_SPEED_MIN + state.rng.random::<f32>() * ROBOT_SPEED_RANGE;
    let heading = state.rng.random::<f32>() * std::f32::consts::TAU;
    let hue = state.rng.random::<f32>() * 360.0;

    state.robots.push(Robot::new(pos, speed, heading, hue));
}

/// Per-tick spawn roll: while under the population cap, spawn with fixed
/// probability.
pub fn maybe_spawn(state: &mut SessionState) {
    if state.robots.len() < MAX_ROBOTS && state.rng.random::<f32>() < SPAWN_CHANCE {
        spawn_robot(state);
    }
}
