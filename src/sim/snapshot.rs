//! Read-only render projection
//!
//! The presentation layer pulls one of these per frame; it never sees the
//! live state.

use glam::Vec2;
use serde::Serialize;

use super::geometry::Rect;
use super::state::{Color, GameState, PowerUpKind};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrickView {
    pub rect: Rect,
    pub color: Color,
    pub health: u8,
    pub indestructible: bool,
    pub effect: Option<PowerUpKind>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PowerUpView {
    pub pos: Vec2,
    pub kind: PowerUpKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticleView {
    pub pos: Vec2,
    pub color: Color,
    pub scale: f32,
    pub opacity: f32,
    pub text: Option<String>,
}

/// Everything a renderer or HUD needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSnapshot {
    pub balls: Vec<Rect>,
    pub paddle: Rect,
    /// Visible bricks only
    pub bricks: Vec<BrickView>,
    /// Active power-ups only
    pub powerups: Vec<PowerUpView>,
    pub laser: Option<Rect>,
    pub particles: Vec<ParticleView>,
    pub score: u64,
    pub high_score: u64,
    pub level: u32,
    pub multiplier: u32,
    pub combo: u32,
    pub game_over: bool,
}

impl RenderSnapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            balls: state.balls.iter().map(|b| b.rect).collect(),
            paddle: state.paddle.rect,
            bricks: state
                .bricks
                .iter()
                .filter(|b| b.visible)
                .map(|b| BrickView {
                    rect: b.rect,
                    color: b.color,
                    health: b.health,
                    indestructible: b.indestructible,
                    effect: b.effect,
                })
                .collect(),
            powerups: state
                .powerups
                .iter()
                .filter(|p| p.active)
                .map(|p| PowerUpView {
                    pos: p.pos,
                    kind: p.kind,
                })
                .collect(),
            laser: state.laser_rect,
            particles: state
                .particles
                .iter()
                .map(|p| ParticleView {
                    pos: p.pos,
                    color: p.color,
                    scale: p.scale,
                    opacity: p.opacity,
                    text: p.text.clone(),
                })
                .collect(),
            score: state.score,
            high_score: state.high_score,
            level: state.level,
            multiplier: state.multiplier,
            combo: state.combo,
            game_over: state.game_over,
        }
    }
}
