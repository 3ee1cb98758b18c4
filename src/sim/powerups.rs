//! Power-up effects, applied once on pickup
//!
//! Only the two paddle effects are timed; slow-ball and score-multiplier
//! last for the rest of the run.

use glam::Vec2;
use rand::Rng;

use super::particles;
use super::state::{Ball, GameEvent, GameState, PowerUp, PowerUpKind};
use crate::consts::*;
use crate::tuning::Tuning;

/// Spawn a falling power-up at `pos`
pub fn spawn(state: &mut GameState, kind: PowerUpKind, pos: Vec2) {
    let id = state.next_entity_id();
    state.powerups.push(PowerUp {
        id,
        kind,
        pos,
        active: true,
    });
}

/// Apply a caught power-up's effect
pub fn apply(state: &mut GameState, tuning: &Tuning, kind: PowerUpKind) {
    match kind {
        PowerUpKind::ExtraBall => add_ball(state, tuning),
        PowerUpKind::WidenPaddle => {
            if state.wide_paddle.activate(state.clock, WIDE_PADDLE_SECS) {
                let width = state.paddle.base_width * WIDE_PADDLE_SCALE;
                state.paddle.set_width(width, &state.bounds);
            }
        }
        PowerUpKind::LaserPaddle => {
            state.laser.activate(state.clock, LASER_SECS);
        }
        PowerUpKind::SlowBall => {
            for ball in &mut state.balls {
                ball.vel *= SLOW_BALL_FACTOR;
            }
        }
        PowerUpKind::ScoreMultiplier => state.increase_multiplier(),
        PowerUpKind::Bomb => detonate(state),
    }
    state.events.push(GameEvent::PowerUpCollected(kind));
}

/// Clone the first ball with a random launch angle at the level speed
fn add_ball(state: &mut GameState, tuning: &Tuning) {
    let Some(first) = state.balls.first() else {
        return;
    };
    let rect = first.rect;
    let speed = state.level_speed(tuning);
    let angle = state.rng.random_range(-EXTRA_BALL_SPREAD..=EXTRA_BALL_SPREAD);
    let id = state.next_entity_id();

    state.balls.push(Ball {
        id,
        rect,
        vel: Vec2::new(angle.sin(), -angle.cos()) * speed,
    });
}

/// Destroy every breakable brick within [`BOMB_RADIUS`] of any ball
fn detonate(state: &mut GameState) {
    let centers: Vec<Vec2> = state.balls.iter().map(Ball::center).collect();
    let points = state.points_for(BOMB_POINTS);
    let mut destroyed = 0u64;

    for brick in &mut state.bricks {
        if !brick.is_breakable() {
            continue;
        }
        let center = brick.rect.center();
        if centers.iter().any(|c| c.distance(center) <= BOMB_RADIUS) {
            brick.destroy();
            destroyed += 1;
            particles::brick_break(&mut state.particles, &mut state.rng, center, brick.color);
        }
    }

    if destroyed > 0 {
        state.bricks_broken += destroyed as u32;
        state.award(points * destroyed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geometry::Rect;

    fn state() -> (GameState, Tuning) {
        let tuning = Tuning::default();
        let mut state = GameState::new(11, 0, &tuning);
        state.set_bounds(Rect::new(0.0, 0.0, 400.0, 700.0), &tuning);
        state.launch_balls(&tuning);
        (state, tuning)
    }

    #[test]
    fn test_extra_ball() {
        let (mut state, tuning) = state();
        apply(&mut state, &tuning, PowerUpKind::ExtraBall);

        assert_eq!(state.balls.len(), 2);
        assert_ne!(state.balls[0].id, state.balls[1].id);
        assert_eq!(state.balls[1].rect, state.balls[0].rect);
        let new_vel = state.balls[1].vel;
        assert!((new_vel.length() - tuning.speed_for_level(1)).abs() < 1e-4);
        assert!(new_vel.y < 0.0);
        assert!(new_vel.x.abs() <= EXTRA_BALL_SPREAD.sin() * new_vel.length() + 1e-4);
    }

    #[test]
    fn test_widen_paddle_idempotent() {
        let (mut state, tuning) = state();
        state.clock = 2.0;
        apply(&mut state, &tuning, PowerUpKind::WidenPaddle);
        assert_eq!(state.paddle.rect.width(), 150.0);
        assert_eq!(state.wide_paddle.expires_at, 12.0);

        state.clock = 6.0;
        apply(&mut state, &tuning, PowerUpKind::WidenPaddle);
        assert_eq!(state.paddle.rect.width(), 150.0);
        assert_eq!(state.wide_paddle.expires_at, 12.0);
    }

    #[test]
    fn test_laser_idempotent() {
        let (mut state, tuning) = state();
        apply(&mut state, &tuning, PowerUpKind::LaserPaddle);
        let expiry = state.laser.expires_at;
        state.clock = 3.0;
        apply(&mut state, &tuning, PowerUpKind::LaserPaddle);
        assert!(state.laser.active);
        assert_eq!(state.laser.expires_at, expiry);
    }

    #[test]
    fn test_slow_ball_is_permanent_scale() {
        let (mut state, tuning) = state();
        let before = state.balls[0].vel;
        apply(&mut state, &tuning, PowerUpKind::SlowBall);
        assert!((state.balls[0].vel - before * 0.7).length() < 1e-5);
    }

    #[test]
    fn test_multiplier_capped() {
        let (mut state, tuning) = state();
        for _ in 0..8 {
            apply(&mut state, &tuning, PowerUpKind::ScoreMultiplier);
        }
        assert_eq!(state.multiplier, MAX_MULTIPLIER);
    }

    #[test]
    fn test_bomb_clears_nearby_bricks() {
        let (mut state, tuning) = state();
        // Park the ball just under the bottom brick row's center
        let target = state.bricks[5 * 8 + 3].rect.center();
        state.balls[0].rect.origin = target + Vec2::new(-7.5, 30.0);

        apply(&mut state, &tuning, PowerUpKind::Bomb);

        let destroyed = state.bricks.iter().filter(|b| !b.visible).count() as u64;
        assert!(destroyed > 0);
        assert!(!state.bricks[5 * 8 + 3].visible);
        // Far corner untouched
        assert!(state.bricks[0].visible);
        assert_eq!(state.bricks_broken as u64, destroyed);
        assert_eq!(state.score, destroyed * 15);
        assert!(state.events.contains(&GameEvent::PowerUpCollected(PowerUpKind::Bomb)));
    }
}
