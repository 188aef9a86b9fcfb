//! Session state and core entity types
//!
//! Everything the simulation mutates lives here, owned by [`SessionState`].
//! All state is transient: one session, discarded on stop or restart.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::sim::spawn::spawn_robot;

/// Current phase of a play session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Initial state, instructions shown
    Idle,
    /// Countdown and frame loop active
    Running,
    /// Time ran out, final score frozen
    Ended,
}

/// A tappable robot wandering the canvas
#[derive(Debug, Clone)]
pub struct Robot {
    pub pos: Vec2,
    /// Sprite size; the circular collider radius is `size / 2`
    pub size: f32,
    /// Speed in pixels per tick
    pub speed: f32,
    /// Heading angle in radians
    pub heading: f32,
    /// Ticks since spawn
    pub age_ticks: u32,
    /// Removal deadline in ticks
    pub ttl_ticks: u32,
    /// Set when tapped; the robot is pruned the same tick
    pub hit: bool,
    /// Display hue in degrees (rendered as hsl(hue, 70%, 60%))
    pub hue: f32,
}

impl Robot {
    pub fn new(pos: Vec2, speed: f32, heading: f32, hue: f32) -> Self {
        Self {
            pos,
            size: ROBOT_SIZE,
            speed,
            heading,
            age_ticks: 0,
            ttl_ticks: ROBOT_TTL_TICKS,
            hit: false,
            hue,
        }
    }

    /// Collision radius
    pub fn radius(&self) -> f32 {
        self.size / 2.0
    }

    /// Advance one tick: integrate position, reflect the heading off the
    /// canvas bounds, age. Returns whether the robot is still alive.
    pub fn advance(&mut self, bounds: Vec2) -> bool {
        self.pos += Vec2::new(self.heading.cos(), self.heading.sin()) * self.speed;

        let r = self.radius();
        if self.pos.x < r || self.pos.x > bounds.x - r {
            self.heading = std::f32::consts::PI - self.heading;
        }
        if self.pos.y < r || self.pos.y > bounds.y - r {
            self.heading = -self.heading;
        }

        self.age_ticks += 1;
        self.age_ticks < self.ttl_ticks && !self.hit
    }

    /// Circular hit test (strict: a point exactly on the rim misses)
    pub fn contains(&self, point: Vec2) -> bool {
        self.pos.distance(point) < self.radius()
    }
}

/// A short-lived visual fragment from a hit robot
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Hue inherited from the robot that spawned it
    pub hue: f32,
    /// 0-1, rendered as alpha
    pub life: f32,
    pub decay: f32,
}

impl Particle {
    /// Advance one tick. Returns whether the particle is still alive.
    pub fn advance(&mut self) -> bool {
        self.pos += self.vel;
        self.life -= self.decay;
        self.life > 0.0
    }
}

/// Complete session state (deterministic under a fixed seed)
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Session seed for reproducibility
    pub seed: u64,
    pub phase: SessionPhase,
    pub score: u32,
    /// Whole seconds remaining, decremented by the countdown tick
    pub time_left: u32,
    /// Current canvas dimensions; recomputed by the platform layer on resize
    pub bounds: Vec2,
    /// Live robots in spawn order (last spawned draws topmost)
    pub robots: Vec<Robot>,
    /// Live particles
    pub particles: Vec<Particle>,
    /// Frame tick counter
    pub time_ticks: u64,
    pub(crate) rng: Pcg32,
}

impl SessionState {
    /// Create an idle session with the given seed and canvas bounds
    pub fn new(seed: u64, bounds: Vec2) -> Self {
        Self {
            seed,
            phase: SessionPhase::Idle,
            score: 0,
            time_left: SESSION_SECONDS,
            bounds,
            robots: Vec::new(),
            particles: Vec::new(),
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Canvas was resized; the sim treats dimensions as configuration
    pub fn set_bounds(&mut self, bounds: Vec2) {
        self.bounds = bounds;
    }

    /// Begin a session: reset score and countdown, clear the live sets,
    /// spawn the first robot.
    pub fn start(&mut self) {
        self.score = 0;
        self.time_left = SESSION_SECONDS;
        self.robots.clear();
        self.particles.clear();
        self.time_ticks = 0;
        self.phase = SessionPhase::Running;
        spawn_robot(self);
    }

    /// Forced stop: back to Idle regardless of current phase. Used when the
    /// hosting surface is dismissed mid-session.
    pub fn stop(&mut self) {
        self.phase = SessionPhase::Idle;
        self.robots.clear();
        self.particles.clear();
    }
}
