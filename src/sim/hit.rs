//! Pointer hit testing
//!
//! Maps a canvas-space tap to the topmost overlapping live robot. Robots are
//! stored in spawn order and drawn in that order, so scanning in reverse
//! tests the topmost-rendered robot first. At most one robot is credited per
//! tap, even when several overlap.

use glam::Vec2;
use rand::Rng;

use crate::consts::*;
use crate::sim::state::{Particle, SessionPhase, SessionState};

/// Process a tap at a canvas-space point. On a hit the robot is removed from
/// the live set immediately, a particle burst is emitted at its position, and
/// the score is credited. Returns whether anything was hit.
pub fn handle_tap(state: &mut SessionState, point: Vec2) -> bool {
    if state.phase != SessionPhase::Running {
        return false;
    }

    let Some(idx) = state.robots.iter().rposition(|r| r.contains(point)) else {
        return false;
    };

    let robot = state.robots.remove(idx);
    for _ in 0..BURST_SIZE {
        let particle = burst_particle(state, robot.pos, robot.hue);
        state.particles.push(particle);
    }
    state.score += HIT_SCORE;
    true
}

/// One fragment of a hit burst: random size and scatter velocity, hue
/// inherited from the robot.
fn burst_particle(state: &mut SessionState, pos: Vec2, hue: f32) -> Particle {
    Particle {
        pos,
        vel: Vec2::new(
            (state.rng.random::<f32>() - 0.5) * PARTICLE_SPREAD,
            (state.rng.random::<f32>() - 0.5) * PARTICLE_SPREAD,
        ),
        radius: PARTICLE_SIZE_MIN + state.rng.random::<f32>() * PARTICLE_SIZE_RANGE,
        hue,
        life: 1.0,
        decay: PARTICLE_DECAY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Robot;

    fn running_state() -> SessionState {
        let mut state = SessionState::new(9, Vec2::new(600.0, 400.0));
        state.phase = SessionPhase::Running;
        state
    }

    #[test]
    fn test_tap_on_center_scores_and_bursts() {
        let mut state = running_state();
        state
            .robots
            .push(Robot::new(Vec2::new(300.0, 200.0), 1.0, 0.0, 120.0));

        assert!(handle_tap(&mut state, Vec2::new(300.0, 200.0)));
        assert_eq!(state.score, HIT_SCORE);
        assert!(state.robots.is_empty());
        assert_eq!(state.particles.len(), BURST_SIZE);
        for particle in &state.particles {
            assert_eq!(particle.pos, Vec2::new(300.0, 200.0));
            assert_eq!(particle.hue, 120.0);
            assert_eq!(particle.life, 1.0);
        }
    }

    #[test]
    fn test_topmost_robot_wins_on_overlap() {
        let mut state = running_state();
        state
            .robots
            .push(Robot::new(Vec2::new(300.0, 200.0), 1.0, 0.0, 10.0));
        state
            .robots
            .push(Robot::new(Vec2::new(305.0, 200.0), 1.0, 0.0, 20.0));

        // Both contain the point; only the most recently spawned is removed
        assert!(handle_tap(&mut state, Vec2::new(302.0, 200.0)));
        assert_eq!(state.robots.len(), 1);
        assert_eq!(state.robots[0].hue, 10.0);
        assert_eq!(state.score, HIT_SCORE);
    }

    #[test]
    fn test_miss_has_no_effect() {
        let mut state = running_state();
        state
            .robots
            .push(Robot::new(Vec2::new(300.0, 200.0), 1.0, 0.0, 10.0));

        assert!(!handle_tap(&mut state, Vec2::new(100.0, 100.0)));
        assert_eq!(state.score, 0);
        assert_eq!(state.robots.len(), 1);
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_tap_ignored_unless_running() {
        let mut state = SessionState::new(9, Vec2::new(600.0, 400.0));
        state
            .robots
            .push(Robot::new(Vec2::new(300.0, 200.0), 1.0, 0.0, 10.0));

        assert!(!handle_tap(&mut state, Vec2::new(300.0, 200.0)));
        assert_eq!(state.score, 0);
        assert_eq!(state.robots.len(), 1);
    }
}
