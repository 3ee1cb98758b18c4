//! Record types kept by the stores

use serde::{Deserialize, Serialize};

use super::store::Record;
use crate::sim::Color;

/// One finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: u64,
    pub score: u64,
    /// Level reached
    pub level: u32,
    pub bricks_broken: u32,
    /// Unix timestamp (ms) when the run ended
    pub played_at: f64,
    /// Player note
    #[serde(default)]
    pub note: String,
}

impl Record for SessionRecord {
    fn id(&self) -> u64 {
        self.id
    }
}

/// A cosmetic paddle/ball skin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Design {
    pub id: u64,
    pub name: String,
    pub paddle_color: Color,
    pub ball_color: Color,
    /// Picked image (URI understood by the presentation layer)
    #[serde(default)]
    pub image: Option<String>,
}

impl Record for Design {
    fn id(&self) -> u64 {
        self.id
    }
}
