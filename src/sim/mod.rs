//! Simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Seeded RNG only
//! - Stable iteration order (insertion order, stable ids)
//! - No rendering, storage or platform dependencies
//!
//! Side effects the outside world cares about (new high score, game over)
//! are queued as [`GameEvent`]s for the engine to drain.

pub mod geometry;
pub mod input;
pub mod levels;
pub mod particles;
pub mod powerups;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use geometry::{Rect, Side, resolve_overlap};
pub use input::move_paddle;
pub use levels::{Pattern, generate_bricks};
pub use snapshot::RenderSnapshot;
pub use state::{
    Ball, Brick, Color, GameEvent, GameState, Paddle, Particle, PowerUp, PowerUpKind, TimedEffect,
};
pub use tick::tick;
