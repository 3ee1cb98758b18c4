//! Simulation tick
//!
//! Core game loop step. Runs to completion once per driver callback; there is
//! no internal clamp on `dt`, so a long stall is simulated as one big step.
//!
//! Per tick: expire timed effects, then for each ball integrate, bounce off
//! walls, the paddle and at most one brick; drop lost balls; update power-ups
//! and particles; project the laser; check for a cleared level.

use glam::Vec2;
use rand::Rng;

use super::geometry::{Rect, resolve_overlap};
use super::particles;
use super::powerups;
use super::state::{Ball, GameEvent, GameState, serve_velocity};
use crate::consts::*;
use crate::tuning::Tuning;

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, tuning: &Tuning, dt: f32) {
    if state.game_over {
        return;
    }

    state.clock += dt as f64;
    expire_effects(state);

    let speed = state.level_speed(tuning);
    let frame_scale = dt * FRAMES_PER_SECOND;
    for index in 0..state.balls.len() {
        let mut ball = state.balls[index];
        step_ball(state, &mut ball, frame_scale, speed);
        state.balls[index] = ball;
    }

    if remove_lost_balls(state) {
        return;
    }

    update_powerups(state, tuning, dt);
    particles::update(&mut state.particles, dt);
    state.laser_rect = laser_beam(state);

    if state.level_cleared() {
        advance_level(state, tuning);
    }
}

/// Revert timed effects whose expiry has passed
fn expire_effects(state: &mut GameState) {
    let now = state.clock;
    if state.wide_paddle.expire(now) {
        let base = state.paddle.base_width;
        state.paddle.set_width(base, &state.bounds);
    }
    state.laser.expire(now);
}

/// Integrate one ball and resolve its collisions
fn step_ball(state: &mut GameState, ball: &mut Ball, frame_scale: f32, speed: f32) {
    ball.rect.origin += ball.vel * frame_scale;

    // --- WALLS (bottom is the fail line, no bounce) ---
    let bounds = state.bounds;
    if ball.rect.min_x() < bounds.min_x() {
        ball.rect.origin.x = bounds.min_x();
        ball.vel.x = ball.vel.x.abs();
        let contact = Vec2::new(bounds.min_x(), ball.center().y);
        particles::impact(&mut state.particles, &mut state.rng, contact);
    } else if ball.rect.max_x() > bounds.max_x() {
        ball.rect.origin.x = bounds.max_x() - ball.rect.width();
        ball.vel.x = -ball.vel.x.abs();
        let contact = Vec2::new(bounds.max_x(), ball.center().y);
        particles::impact(&mut state.particles, &mut state.rng, contact);
    }
    if ball.rect.min_y() < bounds.min_y() {
        ball.rect.origin.y = bounds.min_y();
        ball.vel.y = ball.vel.y.abs();
        let contact = Vec2::new(ball.center().x, bounds.min_y());
        particles::impact(&mut state.particles, &mut state.rng, contact);
    }

    // --- PADDLE ---
    let paddle = state.paddle.rect;
    if ball.rect.intersects(&paddle) {
        ball.rect.origin.y = paddle.min_y() - ball.rect.height();

        // 0 at the left edge, 1 at the right edge, mapped to [-1, 1]
        let relative = (ball.center().x - paddle.min_x()) / paddle.width();
        let angle = (relative * 2.0 - 1.0).clamp(-1.0, 1.0);
        ball.vel = Vec2::new(angle * speed * PADDLE_BOUNCE_SPREAD, -speed);

        let contact = Vec2::new(ball.center().x, paddle.min_y());
        particles::impact(&mut state.particles, &mut state.rng, contact);
    }

    // --- BRICKS (first overlap only; later overlaps wait for the next tick) ---
    let hit = state
        .bricks
        .iter()
        .position(|brick| brick.visible && ball.rect.intersects(&brick.rect));
    if let Some(index) = hit {
        hit_brick(state, ball, index);
        confine(ball, &bounds);
    }
}

/// Damage a brick, score it, and bounce the ball off its nearest face
fn hit_brick(state: &mut GameState, ball: &mut Ball, index: usize) {
    let now = state.clock;
    let broke = state.bricks[index].hit();
    let combo = state.register_hit(now);

    let brick = &state.bricks[index];
    let brick_rect = brick.rect;
    let brick_color = brick.color;
    let brick_effect = brick.effect;
    let center = brick_rect.center();

    if broke {
        let points = state.points_for(BRICK_POINTS);
        state.award(points);
        state.bricks_broken += 1;
        particles::score_popup(&mut state.particles, center, popup_text(points, combo));

        if let Some(kind) = brick_effect {
            if state.rng.random::<f32>() > POWERUP_DROP_THRESHOLD {
                powerups::spawn(state, kind, center);
            }
        }

        particles::brick_break(&mut state.particles, &mut state.rng, center, brick_color);
    }

    let side = resolve_overlap(&ball.rect, &brick_rect);
    ball.rect.origin = side.flush_origin(&ball.rect, &brick_rect);
    ball.vel = side.reflect(ball.vel);

    particles::impact(&mut state.particles, &mut state.rng, ball.center());
}

/// Score popup label, with the combo count once it builds
fn popup_text(points: u64, combo: u32) -> String {
    if combo > 1 {
        format!("+{points} x{combo}")
    } else {
        format!("+{points}")
    }
}

/// Keep a ball inside the left, right and top edges without bouncing it
fn confine(ball: &mut Ball, bounds: &Rect) {
    ball.rect.clamp_x(bounds.min_x(), bounds.max_x());
    ball.rect.origin.y = ball.rect.origin.y.max(bounds.min_y());
}

/// Remove balls that fell past the bottom. Returns true on game over.
///
/// The last ball is never removed; losing it ends the run.
fn remove_lost_balls(state: &mut GameState) -> bool {
    let bottom = state.bounds.max_y();
    let mut index = 0;
    while index < state.balls.len() {
        if state.balls[index].rect.min_y() > bottom {
            if state.balls.len() > 1 {
                state.balls.remove(index);
                continue;
            }
            state.game_over = true;
            state.events.push(GameEvent::GameOver { score: state.score });
            return true;
        }
        index += 1;
    }
    false
}

/// Drop power-ups, apply the ones the paddle catches
fn update_powerups(state: &mut GameState, tuning: &Tuning, dt: f32) {
    let fall = tuning.powerup_fall_speed * dt;
    let paddle = state.paddle.rect;
    let bottom = state.bounds.max_y();
    let mut caught = Vec::new();

    for powerup in state.powerups.iter_mut().filter(|p| p.active) {
        powerup.pos.y += fall;
        let rect = powerup.rect(tuning.powerup_size);
        if rect.intersects(&paddle) {
            powerup.active = false;
            caught.push((powerup.kind, powerup.pos));
        } else if rect.min_y() > bottom {
            powerup.active = false;
        }
    }
    state.powerups.retain(|p| p.active);

    for (kind, pos) in caught {
        powerups::apply(state, tuning, kind);
        particles::explosion(&mut state.particles, &mut state.rng, pos, kind.color());
    }
}

/// Vertical beam from the paddle's center to the top of the play area
fn laser_beam(state: &GameState) -> Option<Rect> {
    if !state.laser.active {
        return None;
    }
    let paddle = &state.paddle.rect;
    let top = state.bounds.min_y();
    Some(Rect::new(
        paddle.center().x - LASER_WIDTH / 2.0,
        top,
        LASER_WIDTH,
        (paddle.min_y() - top).max(0.0),
    ))
}

/// Move to the next level: new bricks, balls back on the paddle at the new
/// level's speed (same directions)
fn advance_level(state: &mut GameState, tuning: &Tuning) {
    state.level += 1;
    state.increase_multiplier();
    state.regenerate_bricks(tuning);

    let speed = state.level_speed(tuning);
    let origin = state.serve_origin(tuning);
    for ball in &mut state.balls {
        ball.rect.origin = origin;
        ball.vel = if ball.is_stationary() {
            serve_velocity(speed)
        } else {
            ball.vel.normalize() * speed
        };
    }

    particles::celebration(&mut state.particles, state.bounds.center());
    state.events.push(GameEvent::LevelComplete { level: state.level });
}
