//! Frame and countdown ticks
//!
//! Two cooperative callbacks drive a session: the display-synchronized frame
//! tick and a one-second countdown tick. Both are no-ops outside the Running
//! phase, so a stopped session halts cleanly no matter which callback fires
//! last.

use glam::Vec2;

use crate::sim::hit::handle_tap;
use crate::sim::spawn::maybe_spawn;
use crate::sim::state::{SessionPhase, SessionState};

/// Input gathered since the previous frame (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Canvas-space tap positions in arrival order. Every pointer event
    /// queues one entry; none are coalesced across a frame.
    pub taps: Vec<Vec2>,
}

/// Advance the session by one frame tick:
/// 1. process queued taps, one hit test per pointer event
/// 2. advance and prune particles
/// 3. advance and prune robots
/// 4. roll the spawner
///
/// Pruned entities are gone before the renderer ever sees this tick's state.
pub fn tick(state: &mut SessionState, input: &TickInput) {
    if state.phase != SessionPhase::Running {
        return;
    }
    state.time_ticks += 1;

    for &point in &input.taps {
        handle_tap(state, point);
    }

    state.particles.retain_mut(|p| p.advance());

    let bounds = state.bounds;
    state.robots.retain_mut(|r| r.advance(bounds));

    maybe_spawn(state);
}

/// Advance the one-second countdown. At zero the session transitions to
/// Ended and the final score freezes; the platform layer is expected to halt
/// both schedulers.
pub fn countdown_tick(state: &mut SessionState) {
    if state.phase != SessionPhase::Running {
        return;
    }
    state.time_left = state.time_left.saturating_sub(1);
    if state.time_left == 0 {
        state.phase = SessionPhase::Ended;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::Robot;

    const BOUNDS: Vec2 = Vec2::new(600.0, 400.0);

    fn started(seed: u64) -> SessionState {
        let mut state = SessionState::new(seed, BOUNDS);
        state.start();
        state
    }

    #[test]
    fn test_tick_is_noop_when_idle() {
        let mut state = SessionState::new(1, BOUNDS);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.time_ticks, 0);
        assert!(state.robots.is_empty());
    }

    #[test]
    fn test_population_stays_under_cap() {
        let mut state = started(3);
        for _ in 0..5_000 {
            tick(&mut state, &TickInput::default());
            assert!(state.robots.len() <= MAX_ROBOTS);
        }
    }

    #[test]
    fn test_tapped_robot_removed_same_tick() {
        let mut state = started(3);
        state.robots.clear();
        state
            .robots
            .push(Robot::new(Vec2::new(300.0, 200.0), 0.0, 0.0, 999.0));

        let input = TickInput {
            taps: vec![Vec2::new(300.0, 200.0)],
        };
        tick(&mut state, &input);

        // Gone within the same tick, before any render would see it
        assert!(!state.robots.iter().any(|r| r.hue == 999.0));
        assert_eq!(state.score, HIT_SCORE);
        // Burst already advanced once this tick
        assert_eq!(state.particles.len(), BURST_SIZE);
        assert!(state.particles.iter().all(|p| p.life < 1.0));
    }

    #[test]
    fn test_every_pointer_event_gets_its_own_hit_test() {
        let mut state = started(3);
        state.robots.clear();
        // Two robots far apart, each under one of two taps from the same frame
        state
            .robots
            .push(Robot::new(Vec2::new(100.0, 100.0), 0.0, 0.0, 997.0));
        state
            .robots
            .push(Robot::new(Vec2::new(500.0, 300.0), 0.0, 0.0, 998.0));

        let input = TickInput {
            taps: vec![Vec2::new(100.0, 100.0), Vec2::new(500.0, 300.0)],
        };
        tick(&mut state, &input);

        assert!(!state.robots.iter().any(|r| r.hue >= 997.0));
        assert_eq!(state.score, 2 * HIT_SCORE);
        assert_eq!(state.particles.len(), 2 * BURST_SIZE);
    }

    #[test]
    fn test_overlapping_taps_credit_one_robot_each() {
        let mut state = started(3);
        state.robots.clear();
        state
            .robots
            .push(Robot::new(Vec2::new(300.0, 200.0), 0.0, 0.0, 997.0));
        state
            .robots
            .push(Robot::new(Vec2::new(305.0, 200.0), 0.0, 0.0, 998.0));

        // Both taps land where both robots overlap: first removes the
        // topmost, second hits the remaining one
        let input = TickInput {
            taps: vec![Vec2::new(302.0, 200.0), Vec2::new(302.0, 200.0)],
        };
        tick(&mut state, &input);

        assert!(state.robots.iter().all(|r| r.hue < 997.0));
        assert_eq!(state.score, 2 * HIT_SCORE);
    }

    #[test]
    fn test_robots_expire_over_time() {
        let mut state = started(3);
        state.robots.clear();
        // Marker hue outside the spawner's 0-360 range
        let marked = Robot::new(Vec2::new(300.0, 200.0), 0.0, 0.0, 999.0);
        let ttl = marked.ttl_ticks;
        state.robots.push(marked);

        for _ in 0..ttl {
            tick(&mut state, &TickInput::default());
        }
        assert!(!state.robots.iter().any(|r| r.hue == 999.0));
        // Live robots never carry an age at or past their TTL
        assert!(state.robots.iter().all(|r| r.age_ticks < r.ttl_ticks));
    }

    #[test]
    fn test_countdown_to_ended() {
        let mut state = started(3);
        for i in 0..SESSION_SECONDS {
            assert_eq!(state.phase, SessionPhase::Running, "tick {i}");
            countdown_tick(&mut state);
        }
        assert_eq!(state.phase, SessionPhase::Ended);
        assert_eq!(state.time_left, 0);

        // Frozen: neither tick fires once ended
        let score = state.score;
        let ticks = state.time_ticks;
        tick(&mut state, &TickInput::default());
        countdown_tick(&mut state);
        assert_eq!(state.score, score);
        assert_eq!(state.time_ticks, ticks);
        assert_eq!(state.time_left, 0);
    }

    #[test]
    fn test_stop_mid_session_returns_to_idle() {
        let mut state = started(3);
        for _ in 0..(SESSION_SECONDS - 12) {
            countdown_tick(&mut state);
        }
        assert_eq!(state.time_left, 12);

        state.stop();
        assert_eq!(state.phase, SessionPhase::Idle);
        assert!(state.robots.is_empty());
        assert!(state.particles.is_empty());

        let ticks = state.time_ticks;
        tick(&mut state, &TickInput::default());
        countdown_tick(&mut state);
        assert_eq!(state.time_ticks, ticks);
        assert_eq!(state.time_left, 12);
    }

    #[test]
    fn test_restart_resets_score_and_clock() {
        let mut state = started(3);
        state.score = 170;
        for _ in 0..SESSION_SECONDS {
            countdown_tick(&mut state);
        }
        assert_eq!(state.phase, SessionPhase::Ended);

        state.start();
        assert_eq!(state.phase, SessionPhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.time_left, SESSION_SECONDS);
        assert_eq!(state.robots.len(), 1);
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_determinism() {
        let mut a = started(99_999);
        let mut b = started(99_999);

        let inputs = [
            TickInput::default(),
            TickInput {
                taps: vec![Vec2::new(300.0, 200.0)],
            },
            TickInput::default(),
            TickInput::default(),
        ];

        for _ in 0..500 {
            for input in &inputs {
                tick(&mut a, input);
                tick(&mut b, input);
            }
        }

        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.score, b.score);
        assert_eq!(a.robots.len(), b.robots.len());
        for (ra, rb) in a.robots.iter().zip(&b.robots) {
            assert!((ra.pos - rb.pos).length() < 1e-6);
            assert_eq!(ra.age_ticks, rb.age_ticks);
        }
    }
}
