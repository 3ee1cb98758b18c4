//! Pointer input adapter
//!
//! The drag handler runs between ticks on the same thread, so it writes the
//! paddle directly.

use glam::Vec2;

use super::state::GameState;

/// Center the paddle under the pointer, confined to the play area
///
/// Before the first serve (every ball stationary) the balls ride along.
pub fn move_paddle(state: &mut GameState, pointer: Vec2) {
    let paddle = &mut state.paddle.rect;
    paddle.origin.x = pointer.x - paddle.width() / 2.0;
    paddle.clamp_x(state.bounds.min_x(), state.bounds.max_x());

    if state.balls.iter().all(|b| b.is_stationary()) {
        let center_x = paddle.center().x;
        for ball in &mut state.balls {
            ball.rect.origin.x = center_x - ball.rect.width() / 2.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geometry::Rect;
    use crate::tuning::Tuning;

    fn state() -> (GameState, Tuning) {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, 0, &tuning);
        state.set_bounds(Rect::new(0.0, 0.0, 400.0, 700.0), &tuning);
        (state, tuning)
    }

    #[test]
    fn test_paddle_follows_pointer() {
        let (mut state, _) = state();
        move_paddle(&mut state, Vec2::new(120.0, 500.0));
        assert_eq!(state.paddle.rect.min_x(), 70.0);
        // Vertical pointer position is ignored
        assert_eq!(state.paddle.rect.min_y(), 640.0);
    }

    #[test]
    fn test_paddle_clamped() {
        let (mut state, _) = state();
        move_paddle(&mut state, Vec2::new(-50.0, 0.0));
        assert_eq!(state.paddle.rect.min_x(), 0.0);
        move_paddle(&mut state, Vec2::new(1000.0, 0.0));
        assert_eq!(state.paddle.rect.max_x(), 400.0);
    }

    #[test]
    fn test_ball_rides_paddle_before_serve() {
        let (mut state, tuning) = state();
        move_paddle(&mut state, Vec2::new(300.0, 0.0));
        assert_eq!(state.balls[0].center().x, 300.0);

        // Once launched the ball is on its own
        state.launch_balls(&tuning);
        let x = state.balls[0].rect.min_x();
        move_paddle(&mut state, Vec2::new(100.0, 0.0));
        assert_eq!(state.balls[0].rect.min_x(), x);
    }
}
