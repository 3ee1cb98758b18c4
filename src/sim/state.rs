//! Game state and core simulation types
//!
//! Everything the tick mutates lives in [`GameState`]. In-progress games are
//! never persisted, so the state itself is not serializable; the entity
//! records are, because the render snapshot reuses them.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::levels::{generate_bricks, relayout_bricks};
use crate::consts::*;
use crate::tuning::Tuning;

/// RGBA color, components in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const GOLD: Color = Color::rgb(1.0, 0.84, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Convert from HSV (hue in [0, 1), wraps)
    pub fn from_hsv(hue: f32, saturation: f32, value: f32) -> Self {
        let h = hue.rem_euclid(1.0) * 6.0;
        let c = value * saturation;
        let x = c * (1.0 - ((h % 2.0) - 1.0).abs());
        let m = value - c;

        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        Self::rgb(r + m, g + m, b + m)
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    ExtraBall,
    WidenPaddle,
    LaserPaddle,
    SlowBall,
    ScoreMultiplier,
    Bomb,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 6] = [
        PowerUpKind::ExtraBall,
        PowerUpKind::WidenPaddle,
        PowerUpKind::LaserPaddle,
        PowerUpKind::SlowBall,
        PowerUpKind::ScoreMultiplier,
        PowerUpKind::Bomb,
    ];

    /// Pickup tint (also used for the pickup explosion)
    pub fn color(&self) -> Color {
        match self {
            PowerUpKind::ExtraBall => Color::rgb(0.3, 0.6, 1.0),
            PowerUpKind::WidenPaddle => Color::rgb(0.3, 1.0, 0.4),
            PowerUpKind::LaserPaddle => Color::rgb(1.0, 0.2, 0.2),
            PowerUpKind::SlowBall => Color::rgb(0.7, 0.4, 1.0),
            PowerUpKind::ScoreMultiplier => Color::GOLD,
            PowerUpKind::Bomb => Color::rgb(1.0, 0.5, 0.0),
        }
    }
}

/// A ball entity
///
/// Position and velocity are one record so a removal can never leave
/// them out of step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub rect: Rect,
    /// Units per 1/60 s frame
    pub vel: Vec2,
}

impl Ball {
    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }

    /// True until the first serve launches it
    pub fn is_stationary(&self) -> bool {
        self.vel == Vec2::ZERO
    }
}

/// The player's paddle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub rect: Rect,
    /// Width without the widen power-up
    pub base_width: f32,
}

impl Paddle {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            rect: Rect::new(0.0, 0.0, tuning.paddle_width, tuning.paddle_height),
            base_width: tuning.paddle_width,
        }
    }

    pub fn is_wide(&self) -> bool {
        self.rect.width() > self.base_width
    }

    /// Change width keeping the left edge, then re-confine to the bounds
    pub fn set_width(&mut self, width: f32, bounds: &Rect) {
        self.rect.size.x = width;
        self.rect.clamp_x(bounds.min_x(), bounds.max_x());
    }
}

/// A brick entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub id: u32,
    pub color: Color,
    pub rect: Rect,
    pub health: u8,
    pub visible: bool,
    /// Power-up this brick may drop when broken
    pub effect: Option<PowerUpKind>,
    pub indestructible: bool,
}

impl Brick {
    /// Returns true if this brick no longer blocks the level from completing
    pub fn is_cleared(&self) -> bool {
        !self.visible || self.indestructible
    }

    /// Visible and breakable
    pub fn is_breakable(&self) -> bool {
        self.visible && !self.indestructible
    }

    /// Apply one hit. Returns true if the brick broke.
    pub fn hit(&mut self) -> bool {
        if self.indestructible {
            return false;
        }
        self.health = self.health.saturating_sub(1);
        if self.health == 0 {
            self.visible = false;
            return true;
        }
        false
    }

    /// Break outright (bomb)
    pub fn destroy(&mut self) {
        self.health = 0;
        self.visible = false;
    }
}

/// A falling power-up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    /// Center of the pickup box
    pub pos: Vec2,
    pub active: bool,
}

impl PowerUp {
    pub fn rect(&self, size: f32) -> Rect {
        Rect::from_center(self.pos, Vec2::splat(size))
    }
}

/// A particle for visual effects (never affects gameplay)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub color: Color,
    pub scale: f32,
    pub opacity: f32,
    /// Units per second
    pub vel: Vec2,
    /// Seconds remaining
    pub lifetime: f32,
    /// Score popup text
    pub text: Option<String>,
}

/// A time-limited effect tracked against the simulation clock
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TimedEffect {
    pub active: bool,
    pub expires_at: f64,
}

impl TimedEffect {
    /// Activate for `duration` seconds. Retriggering while active is a no-op
    /// (the expiry is not extended). Returns true if it was newly activated.
    pub fn activate(&mut self, now: f64, duration: f64) -> bool {
        if self.active {
            return false;
        }
        self.active = true;
        self.expires_at = now + duration;
        true
    }

    /// Deactivate if the expiry has passed. Returns true on the transition.
    pub fn expire(&mut self, now: f64) -> bool {
        if self.active && now > self.expires_at {
            self.active = false;
            return true;
        }
        false
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Things the outside world reacts to (drained by the engine each tick)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Score passed the previous best
    NewHighScore(u64),
    /// A power-up was caught
    PowerUpCollected(PowerUpKind),
    /// Advanced to the given level
    LevelComplete { level: u32 },
    /// Last ball lost
    GameOver { score: u64 },
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seeded RNG (drops, particle spray, extra-ball angles)
    pub rng: Pcg32,
    /// Simulated seconds since the game started
    pub clock: f64,
    /// Play area
    pub bounds: Rect,

    pub score: u64,
    pub high_score: u64,
    /// Current level (1-based)
    pub level: u32,
    /// Combo counter
    pub combo: u32,
    /// Clock time of the last brick hit (combo window)
    pub last_hit_at: Option<f64>,
    pub bricks_broken: u32,
    /// Score multiplier, 1..=5
    pub multiplier: u32,
    pub game_over: bool,

    pub wide_paddle: TimedEffect,
    pub laser: TimedEffect,

    pub paddle: Paddle,
    /// Active balls (insertion order)
    pub balls: Vec<Ball>,
    pub bricks: Vec<Brick>,
    pub powerups: Vec<PowerUp>,
    pub particles: Vec<Particle>,
    /// Laser beam, recomputed each tick while the laser is active
    pub laser_rect: Option<Rect>,

    /// Pending events for the engine
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a state with no play area yet (call [`GameState::set_bounds`])
    pub fn new(seed: u64, high_score: u64, tuning: &Tuning) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            clock: 0.0,
            bounds: Rect::default(),
            score: 0,
            high_score,
            level: 1,
            combo: 0,
            last_hit_at: None,
            bricks_broken: 0,
            multiplier: MIN_MULTIPLIER,
            game_over: false,
            wide_paddle: TimedEffect::default(),
            laser: TimedEffect::default(),
            paddle: Paddle::new(tuning),
            balls: Vec::new(),
            bricks: Vec::new(),
            powerups: Vec::new(),
            particles: Vec::new(),
            laser_rect: None,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Ball speed for the current level
    pub fn level_speed(&self, tuning: &Tuning) -> f32 {
        tuning.speed_for_level(self.level)
    }

    /// Adopt a new play area: paddle goes home and one stationary ball is
    /// placed on it. An existing brick field is refitted, broken bricks
    /// stay broken; a fresh field is only built when there is none.
    pub fn set_bounds(&mut self, bounds: Rect, tuning: &Tuning) {
        self.bounds = bounds;
        self.place_paddle_home(tuning);
        self.reset_ball(tuning);
        if !relayout_bricks(&mut self.bricks, &bounds, tuning) {
            self.regenerate_bricks(tuning);
        }
    }

    /// Reset everything for a fresh run (bounds and high score survive)
    pub fn reset_for_new_game(&mut self, tuning: &Tuning) {
        self.clock = 0.0;
        self.score = 0;
        self.level = 1;
        self.combo = 0;
        self.last_hit_at = None;
        self.bricks_broken = 0;
        self.multiplier = MIN_MULTIPLIER;
        self.game_over = false;
        self.wide_paddle.clear();
        self.laser.clear();
        self.paddle.base_width = tuning.paddle_width;
        self.paddle.rect.size = Vec2::new(tuning.paddle_width, tuning.paddle_height);
        self.powerups.clear();
        self.particles.clear();
        self.laser_rect = None;
        self.events.clear();

        self.place_paddle_home(tuning);
        self.reset_ball(tuning);
        self.regenerate_bricks(tuning);
    }

    /// Center the paddle horizontally, `paddle_bottom_offset` above the bottom
    pub fn place_paddle_home(&mut self, tuning: &Tuning) {
        let width = self.paddle.rect.width();
        self.paddle.rect.origin = Vec2::new(
            self.bounds.center().x - width / 2.0,
            self.bounds.max_y() - tuning.paddle_bottom_offset,
        );
        self.paddle.rect.clamp_x(self.bounds.min_x(), self.bounds.max_x());
    }

    /// Serve position: centered on the paddle, resting on its top edge
    pub fn serve_origin(&self, tuning: &Tuning) -> Vec2 {
        Vec2::new(
            self.paddle.rect.center().x - tuning.ball_size / 2.0,
            self.paddle.rect.min_y() - tuning.ball_size,
        )
    }

    /// Replace all balls with one stationary ball at the serve position
    pub fn reset_ball(&mut self, tuning: &Tuning) {
        let id = self.next_entity_id();
        let origin = self.serve_origin(tuning);
        self.balls.clear();
        self.balls.push(Ball {
            id,
            rect: Rect {
                origin,
                size: Vec2::splat(tuning.ball_size),
            },
            vel: Vec2::ZERO,
        });
    }

    /// Give every stationary ball the serve velocity for the current level
    pub fn launch_balls(&mut self, tuning: &Tuning) {
        let speed = self.level_speed(tuning);
        for ball in &mut self.balls {
            if ball.is_stationary() {
                ball.vel = serve_velocity(speed);
            }
        }
    }

    /// Rebuild the brick field for the current level
    pub fn regenerate_bricks(&mut self, tuning: &Tuning) {
        let first_id = self.next_id;
        self.bricks = generate_bricks(self.level, &self.bounds, tuning, first_id, &mut self.rng);
        self.next_id = first_id + self.bricks.len() as u32;
    }

    /// Record a brick hit at `now` and return the updated combo
    pub fn register_hit(&mut self, now: f64) -> u32 {
        let within_window = self
            .last_hit_at
            .is_some_and(|last| now - last < COMBO_WINDOW_SECS);
        self.combo = if within_window { self.combo + 1 } else { 1 };
        self.last_hit_at = Some(now);
        self.combo
    }

    /// Add points, tracking the high score
    pub fn award(&mut self, points: u64) {
        self.score += points;
        if self.score > self.high_score {
            self.high_score = self.score;
            self.events.push(GameEvent::NewHighScore(self.high_score));
        }
    }

    /// Points for breaking a brick with the given base value
    pub fn points_for(&self, base: u64) -> u64 {
        base * self.level as u64 * self.multiplier as u64
    }

    pub fn increase_multiplier(&mut self) {
        self.multiplier = (self.multiplier + 1).min(MAX_MULTIPLIER);
    }

    /// True when every brick is hidden or indestructible
    pub fn level_cleared(&self) -> bool {
        !self.bricks.is_empty() && self.bricks.iter().all(Brick::is_cleared)
    }
}

/// Velocity of a freshly served ball: up and to the right at 45 degrees
pub fn serve_velocity(speed: f32) -> Vec2 {
    Vec2::new(1.0, -1.0).normalize() * speed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> GameState {
        let tuning = Tuning::default();
        let mut state = GameState::new(7, 0, &tuning);
        state.set_bounds(Rect::new(0.0, 0.0, 400.0, 700.0), &tuning);
        state
    }

    #[test]
    fn test_set_bounds_places_paddle_and_ball() {
        let state = state();
        assert_eq!(state.paddle.rect.center().x, 200.0);
        assert_eq!(state.paddle.rect.min_y(), 640.0);
        assert_eq!(state.balls.len(), 1);
        assert!(state.balls[0].is_stationary());
        assert_eq!(state.balls[0].rect.max_y(), state.paddle.rect.min_y());
        assert_eq!(state.bricks.len(), 48);
    }

    #[test]
    fn test_set_bounds_keeps_broken_bricks() {
        let tuning = Tuning::default();
        let mut state = state();
        for brick in state.bricks.iter_mut().take(10) {
            brick.destroy();
        }
        let ids: Vec<u32> = state.bricks.iter().map(|b| b.id).collect();

        state.set_bounds(Rect::new(0.0, 0.0, 500.0, 800.0), &tuning);

        assert_eq!(state.bricks.len(), 48);
        assert_eq!(state.bricks.iter().filter(|b| !b.visible).count(), 10);
        assert_eq!(state.bricks.iter().map(|b| b.id).collect::<Vec<_>>(), ids);
        assert!(state.bricks.iter().all(|b| b.rect.max_x() <= 500.0 + 1e-3));
        assert_eq!(state.paddle.rect.center().x, 250.0);
    }

    #[test]
    fn test_combo_window() {
        let mut state = state();
        let combos: Vec<u32> = [0.0, 0.2, 0.9]
            .iter()
            .map(|&t| state.register_hit(t))
            .collect();
        assert_eq!(combos, vec![1, 2, 1]);
    }

    #[test]
    fn test_timed_effect_no_stacking() {
        let mut effect = TimedEffect::default();
        assert!(effect.activate(1.0, 10.0));
        assert!(!effect.activate(5.0, 10.0));
        assert_eq!(effect.expires_at, 11.0);

        assert!(!effect.expire(11.0));
        assert!(effect.expire(11.01));
        assert!(!effect.active);
    }

    #[test]
    fn test_award_raises_high_score() {
        let mut state = state();
        state.high_score = 15;
        state.award(10);
        assert!(state.events.is_empty());
        state.award(10);
        assert_eq!(state.high_score, 20);
        assert_eq!(state.events, vec![GameEvent::NewHighScore(20)]);
    }

    #[test]
    fn test_multiplier_capped() {
        let mut state = state();
        for _ in 0..10 {
            state.increase_multiplier();
        }
        assert_eq!(state.multiplier, MAX_MULTIPLIER);
    }

    #[test]
    fn test_indestructible_brick_ignores_hits() {
        let mut brick = Brick {
            id: 1,
            color: Color::WHITE,
            rect: Rect::new(0.0, 0.0, 10.0, 10.0),
            health: 1,
            visible: true,
            effect: None,
            indestructible: true,
        };
        assert!(!brick.hit());
        assert_eq!(brick.health, 1);
        assert!(brick.visible && brick.is_cleared());
    }
}
