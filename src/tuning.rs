//! Data-driven game balance
//!
//! Sizes, speeds and grid dimensions. Stored as JSON so a designer can
//! override them without rebuilding; every field falls back to its default.

use serde::{Deserialize, Serialize};

use crate::platform::storage::KeyValueStore;

/// Game balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Ball ===
    /// Ball edge length (balls are square)
    pub ball_size: f32,
    /// Level 1 ball speed (units per frame)
    pub initial_speed: f32,
    /// Speed growth per level (multiplicative)
    pub speed_factor: f32,
    /// Speed ceiling (units per frame)
    pub max_speed: f32,

    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Gap between the paddle's top edge and the bottom of the play area
    pub paddle_bottom_offset: f32,

    // === Bricks ===
    pub brick_rows: u32,
    pub brick_cols: u32,
    pub brick_height: f32,
    pub brick_spacing: f32,
    /// Gap between the top of the play area and the first brick row
    pub brick_top_offset: f32,
    /// Chance that a standard-pattern brick carries a random effect tag
    pub random_effect_chance: f32,

    // === Power-ups ===
    /// Pickup box edge length
    pub powerup_size: f32,
    /// Fall speed (units per second)
    pub powerup_fall_speed: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            ball_size: 15.0,
            initial_speed: 5.0,
            speed_factor: 1.1,
            max_speed: 12.0,

            paddle_width: 100.0,
            paddle_height: 15.0,
            paddle_bottom_offset: 60.0,

            brick_rows: 6,
            brick_cols: 8,
            brick_height: 20.0,
            brick_spacing: 5.0,
            brick_top_offset: 80.0,
            random_effect_chance: 0.15,

            powerup_size: 30.0,
            powerup_fall_speed: 150.0,
        }
    }
}

impl Tuning {
    /// Storage key for designer overrides
    pub const STORAGE_KEY: &'static str = "brick_blitz_tuning";

    /// Ball speed for a level: `initial * factor^(level-1)`, capped at `max_speed`
    pub fn speed_for_level(&self, level: u32) -> f32 {
        let exponent = level.saturating_sub(1) as i32;
        (self.initial_speed * self.speed_factor.powi(exponent)).min(self.max_speed)
    }

    /// Parse overrides from JSON (missing fields use defaults)
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load overrides from storage, falling back to defaults
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning overrides");
                    return tuning;
                }
                Err(e) => log::warn!("Ignoring malformed tuning: {}", e),
            },
            Ok(None) => {}
            Err(e) => log::warn!("Could not read tuning: {}", e),
        }

        log::info!("Using default tuning");
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::storage::MemoryStore;

    #[test]
    fn test_speed_for_level() {
        let tuning = Tuning::default();
        assert_eq!(tuning.speed_for_level(1), 5.0);
        assert!((tuning.speed_for_level(2) - 5.5).abs() < 1e-5);
        // Far levels hit the cap
        assert_eq!(tuning.speed_for_level(50), tuning.max_speed);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "brick_rows": 4 }"#).unwrap();
        assert_eq!(tuning.brick_rows, 4);
        assert_eq!(tuning.brick_cols, Tuning::default().brick_cols);
    }

    #[test]
    fn test_load_malformed_falls_back() {
        let mut store = MemoryStore::new();
        store.set(Tuning::STORAGE_KEY, "{not json").unwrap();
        assert_eq!(Tuning::load(&store), Tuning::default());
    }
}
