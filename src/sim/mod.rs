//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed per-tick step only
//! - Seeded RNG only
//! - Stable entity order (insertion order; last spawned renders topmost)
//! - No rendering or platform dependencies

pub mod hit;
pub mod spawn;
pub mod state;
pub mod tick;

pub use hit::handle_tap;
pub use spawn::{maybe_spawn, spawn_robot};
pub use state::{Particle, Robot, SessionPhase, SessionState};
pub use tick::{TickInput, countdown_tick, tick};
