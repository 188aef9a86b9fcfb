//! Robo Tap - a timed tap-the-robot arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, hit testing, session state)
//! - `render`: Canvas2D rendering (wasm32 only)
//!
//! Platform glue (canvas setup, DOM panels, input, frame loop) lives in the
//! binary entry point.

pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod render;

/// Game configuration constants
pub mod consts {
    /// Robot sprite size in canvas pixels (collision radius is half of this)
    pub const ROBOT_SIZE: f32 = 60.0;
    /// Minimum robot speed, pixels per tick
    pub const ROBOT_SPEED_MIN: f32 = 1.0;
    /// Random speed range on top of the minimum
    pub const ROBOT_SPEED_RANGE: f32 = 2.0;
    /// Robot time-to-live in frame ticks (~2 seconds at 60 Hz)
    pub const ROBOT_TTL_TICKS: u32 = 120;

    /// Minimum distance from canvas edges for spawn positions
    pub const SPAWN_MARGIN: f32 = 60.0;
    /// Maximum concurrent live robots
    pub const MAX_ROBOTS: usize = 5;
    /// Per-tick spawn probability while under the cap
    pub const SPAWN_CHANCE: f32 = 0.02;

    /// Particles created per successful hit
    pub const BURST_SIZE: usize = 15;
    /// Minimum particle radius
    pub const PARTICLE_SIZE_MIN: f32 = 2.0;
    /// Random particle radius range on top of the minimum
    pub const PARTICLE_SIZE_RANGE: f32 = 4.0;
    /// Particle velocity spread (each component in [-spread/2, spread/2))
    pub const PARTICLE_SPREAD: f32 = 6.0;
    /// Per-tick particle life decay
    pub const PARTICLE_DECAY: f32 = 0.02;

    /// Score credited per hit robot
    pub const HIT_SCORE: u32 = 10;
    /// Session length in seconds
    pub const SESSION_SECONDS: u32 = 30;
}
