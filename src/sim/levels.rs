//! Brick field generation
//!
//! Every level fills a fixed `rows x cols` grid. The layout rule cycles with
//! `level mod 5`; it decides health, effect tags and indestructible bricks,
//! then a global difficulty bump adds `level / 3` health (capped at 5).

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::geometry::Rect;
use super::state::{Brick, Color, PowerUpKind};
use crate::consts::MAX_BRICK_HEALTH;
use crate::tuning::Tuning;

/// Layout rule for a level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// Health gradient by row, scattered random effects
    Standard,
    /// Alternating health, indestructible accents on the top row
    Checkerboard,
    /// Health peaks at the middle column, score-multiplier in the center
    Pyramid,
    /// Alternating row health, fixed extra-ball brick
    HorizontalStripes,
    /// Alternating column health, fixed bomb brick in the corner
    VerticalStripes,
}

impl Pattern {
    pub fn for_level(level: u32) -> Self {
        match level % 5 {
            1 => Pattern::Standard,
            2 => Pattern::Checkerboard,
            3 => Pattern::Pyramid,
            4 => Pattern::HorizontalStripes,
            _ => Pattern::VerticalStripes,
        }
    }
}

/// What a pattern puts in one grid cell (before the difficulty bump)
struct Cell {
    health: u8,
    effect: Option<PowerUpKind>,
    indestructible: bool,
}

impl Cell {
    fn plain(health: u8) -> Self {
        Self {
            health,
            effect: None,
            indestructible: false,
        }
    }
}

/// Generate the brick field for `level` inside `bounds`
///
/// IDs are assigned sequentially from `first_id` in row-major order.
pub fn generate_bricks(
    level: u32,
    bounds: &Rect,
    tuning: &Tuning,
    first_id: u32,
    rng: &mut Pcg32,
) -> Vec<Brick> {
    let rows = tuning.brick_rows;
    let cols = tuning.brick_cols;
    if rows == 0 || cols == 0 {
        return Vec::new();
    }

    let pattern = Pattern::for_level(level);
    let bump = (level / 3).min(MAX_BRICK_HEALTH as u32) as u8;

    let mut bricks = Vec::with_capacity((rows * cols) as usize);
    for row in 0..rows {
        for col in 0..cols {
            let cell = pattern_cell(pattern, row, col, tuning, rng);
            let health = cell.health.saturating_add(bump).clamp(1, MAX_BRICK_HEALTH);

            bricks.push(Brick {
                id: first_id + bricks.len() as u32,
                color: brick_color(row, col, rows, cols),
                rect: brick_rect(row, col, bounds, tuning),
                health,
                visible: true,
                effect: cell.effect,
                indestructible: cell.indestructible,
            });
        }
    }
    bricks
}

/// Grid cell `(row, col)` of a field fitted to `bounds`
pub fn brick_rect(row: u32, col: u32, bounds: &Rect, tuning: &Tuning) -> Rect {
    let cols = tuning.brick_cols.max(1) as f32;
    let spacing = tuning.brick_spacing;
    let width = ((bounds.width() - spacing * (cols + 1.0)) / cols).max(1.0);
    Rect {
        origin: Vec2::new(
            bounds.min_x() + spacing + col as f32 * (width + spacing),
            bounds.min_y() + tuning.brick_top_offset + row as f32 * (tuning.brick_height + spacing),
        ),
        size: Vec2::new(width, tuning.brick_height),
    }
}

/// Fit an existing row-major field to new bounds, leaving brick state alone
///
/// Returns false (and changes nothing) if the field is not a full grid.
pub fn relayout_bricks(bricks: &mut [Brick], bounds: &Rect, tuning: &Tuning) -> bool {
    let cols = tuning.brick_cols;
    if bricks.is_empty() || bricks.len() != (tuning.brick_rows * cols) as usize {
        return false;
    }
    for (index, brick) in bricks.iter_mut().enumerate() {
        let index = index as u32;
        brick.rect = brick_rect(index / cols, index % cols, bounds, tuning);
    }
    true
}

fn pattern_cell(pattern: Pattern, row: u32, col: u32, tuning: &Tuning, rng: &mut Pcg32) -> Cell {
    let rows = tuning.brick_rows;
    let cols = tuning.brick_cols;

    match pattern {
        Pattern::Standard => {
            // Top rows are tougher: 3,3,2,2,1,1 for six rows
            let health = ((rows - row + 1) / 2).max(1) as u8;
            let effect = if rng.random::<f32>() < tuning.random_effect_chance {
                let index = rng.random_range(0..PowerUpKind::ALL.len());
                Some(PowerUpKind::ALL[index])
            } else {
                None
            };
            Cell {
                health,
                effect,
                indestructible: false,
            }
        }
        Pattern::Checkerboard => Cell {
            health: if (row + col) % 2 == 0 { 2 } else { 1 },
            effect: None,
            indestructible: row == 0 && col % 3 == 0,
        },
        Pattern::Pyramid => {
            let center = (cols as f32 - 1.0) / 2.0;
            let distance = (col as f32 - center).abs().floor() as u32;
            let health = (cols / 2).saturating_sub(distance).max(1) as u8;
            let effect = (row == rows / 2 && col == cols / 2).then_some(PowerUpKind::ScoreMultiplier);
            Cell {
                health,
                effect,
                indestructible: false,
            }
        }
        Pattern::HorizontalStripes => {
            let mut cell = Cell::plain(if row % 2 == 0 { 2 } else { 1 });
            if row == 2u32.min(rows - 1) && col == cols / 2 {
                cell.effect = Some(PowerUpKind::ExtraBall);
            }
            cell
        }
        Pattern::VerticalStripes => {
            let mut cell = Cell::plain(if col % 2 == 0 { 2 } else { 1 });
            if row == 0 && col == 0 {
                cell.effect = Some(PowerUpKind::Bomb);
            }
            cell
        }
    }
}

/// Cosmetic brick color: hue follows the row, brightness follows the column
pub fn brick_color(row: u32, col: u32, rows: u32, cols: u32) -> Color {
    let hue = row as f32 / rows.max(1) as f32 * 0.8;
    let value = 0.65 + 0.35 * (col as f32 / cols.max(1) as f32);
    Color::from_hsv(hue, 0.75, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn bounds() -> Rect {
        Rect::new(0.0, 0.0, 400.0, 700.0)
    }

    fn generate(level: u32) -> Vec<Brick> {
        let mut rng = Pcg32::seed_from_u64(3);
        generate_bricks(level, &bounds(), &Tuning::default(), 1, &mut rng)
    }

    #[test]
    fn test_pattern_cycle() {
        assert_eq!(Pattern::for_level(1), Pattern::Standard);
        assert_eq!(Pattern::for_level(5), Pattern::VerticalStripes);
        assert_eq!(Pattern::for_level(6), Pattern::Standard);
        assert_eq!(Pattern::for_level(8), Pattern::Pyramid);
    }

    #[test]
    fn test_full_grid_within_bounds() {
        for level in 1..=10 {
            let bricks = generate(level);
            assert_eq!(bricks.len(), 48);
            for brick in &bricks {
                assert!(brick.visible);
                assert!(brick.rect.min_x() >= 0.0 && brick.rect.max_x() <= 400.0 + 1e-3);
                assert!((1..=MAX_BRICK_HEALTH).contains(&brick.health));
            }
        }
    }

    #[test]
    fn test_standard_health_gradient() {
        let bricks = generate(1);
        let row_health: Vec<u8> = bricks.chunks(8).map(|row| row[0].health).collect();
        assert_eq!(row_health, vec![3, 3, 2, 2, 1, 1]);
    }

    #[test]
    fn test_checkerboard_top_accents() {
        let bricks = generate(2);
        let indestructible: Vec<usize> = bricks
            .iter()
            .enumerate()
            .filter(|(_, b)| b.indestructible)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(indestructible, vec![0, 3, 6]);
    }

    #[test]
    fn test_fixed_effect_bricks() {
        let pyramid = generate(3);
        // Row 3, column 4
        assert_eq!(pyramid[3 * 8 + 4].effect, Some(PowerUpKind::ScoreMultiplier));
        // Middle columns are tougher than the edges (level 3 adds one)
        assert_eq!(pyramid[3].health, 5);
        assert_eq!(pyramid[0].health, 2);

        let stripes = generate(4);
        assert_eq!(stripes[2 * 8 + 4].effect, Some(PowerUpKind::ExtraBall));

        let columns = generate(5);
        assert_eq!(columns[0].effect, Some(PowerUpKind::Bomb));
    }

    #[test]
    fn test_difficulty_bump_caps_at_five() {
        let bricks = generate(21);
        assert!(bricks.iter().all(|b| b.health == MAX_BRICK_HEALTH));
    }

    #[test]
    fn test_relayout_keeps_brick_state() {
        let mut bricks = generate(2);
        bricks[9].visible = false;
        bricks[9].health = 0;
        bricks[10].health = 1;

        let wide = Rect::new(0.0, 0.0, 800.0, 900.0);
        assert!(relayout_bricks(&mut bricks, &wide, &Tuning::default()));

        assert!(!bricks[9].visible);
        assert_eq!(bricks[10].health, 1);
        assert!(bricks[0].indestructible);
        assert_eq!(bricks[9].rect, brick_rect(1, 1, &wide, &Tuning::default()));
        assert!(bricks[7].rect.max_x() > 700.0 && bricks[7].rect.max_x() <= 800.0 + 1e-3);
    }

    #[test]
    fn test_relayout_rejects_partial_field() {
        let mut bricks = generate(1);
        bricks.truncate(5);
        let before = bricks.clone();
        assert!(!relayout_bricks(&mut bricks, &bounds(), &Tuning::default()));
        assert_eq!(bricks, before);
    }

    #[test]
    fn test_sequential_ids() {
        let bricks = generate(1);
        assert!(bricks.iter().enumerate().all(|(i, b)| b.id == 1 + i as u32));
    }
}
