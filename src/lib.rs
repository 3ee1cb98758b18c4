//! Brick Blitz - An arcade breakout game
//!
//! Core modules:
//! - `sim`: Pure simulation (physics, collisions, power-ups, scoring)
//! - `engine`: Control surface that owns the simulation and its persistence
//! - `platform`: Key/value storage backends (file, memory, LocalStorage)
//! - `highscores`: High score load/save
//! - `persistence`: Session and design record stores
//! - `tuning`: Data-driven game balance

pub mod engine;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use engine::{Engine, FixedCadence};
pub use tuning::Tuning;

/// Game rule constants
///
/// Balance knobs that a designer might want to tweak live in [`Tuning`];
/// these are the fixed rules of the game.
pub mod consts {
    /// Driver cadence (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;
    /// Velocities are expressed in units per 1/60 s frame
    pub const FRAMES_PER_SECOND: f32 = 60.0;
    /// Cap on catch-up steps per frame (prevents spiral of death)
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Consecutive brick hits closer than this extend the combo
    pub const COMBO_WINDOW_SECS: f64 = 0.5;

    /// Base points for a brick broken by a ball
    pub const BRICK_POINTS: u64 = 10;
    /// Base points for a brick destroyed by a bomb
    pub const BOMB_POINTS: u64 = 15;

    /// Multiplier range
    pub const MIN_MULTIPLIER: u32 = 1;
    pub const MAX_MULTIPLIER: u32 = 5;

    /// Brick health cap after level adjustment
    pub const MAX_BRICK_HEALTH: u8 = 5;

    /// A power-up drops when a uniform draw exceeds this (30% of tagged breaks)
    pub const POWERUP_DROP_THRESHOLD: f32 = 0.7;

    /// Timed paddle effects
    pub const WIDE_PADDLE_SECS: f64 = 10.0;
    pub const WIDE_PADDLE_SCALE: f32 = 1.5;
    pub const LASER_SECS: f64 = 8.0;
    pub const LASER_WIDTH: f32 = 4.0;

    /// Permanent effects
    pub const SLOW_BALL_FACTOR: f32 = 0.7;
    pub const BOMB_RADIUS: f32 = 100.0;

    /// Extra balls launch within this many radians of vertical
    pub const EXTRA_BALL_SPREAD: f32 = 0.5;

    /// Paddle bounce: horizontal component scale relative to speed
    pub const PADDLE_BOUNCE_SPREAD: f32 = 1.5;

    /// Particles begin fading when this much lifetime remains
    pub const PARTICLE_FADE_SECS: f32 = 0.3;
    /// Maximum live particles
    pub const MAX_PARTICLES: usize = 512;
}
