//! Game engine: the control surface around the pure simulation
//!
//! Owns the [`GameState`], the storage backend and the record stores.
//! Everything takes `&mut self`, so pointer input and ticks can never
//! interleave mid-tick.

use glam::Vec2;

use crate::consts::{FRAME_DT, MAX_SUBSTEPS};
use crate::highscores;
use crate::persistence::{DESIGNS_KEY, Design, DesignStore, SESSIONS_KEY, SessionRecord, SessionStore};
use crate::platform::storage::KeyValueStore;
use crate::sim::{GameEvent, GameState, Rect, RenderSnapshot, move_paddle, tick};
use crate::tuning::Tuning;

/// The running game
pub struct Engine {
    state: GameState,
    tuning: Tuning,
    store: Box<dyn KeyValueStore>,
    sessions: SessionStore,
    designs: DesignStore,
    /// Tick driver armed (cleared on game over)
    running: bool,
}

impl Engine {
    /// Create an engine, loading the high score and record stores
    pub fn new(store: Box<dyn KeyValueStore>, tuning: Tuning, seed: u64) -> Self {
        let high_score = highscores::load(&*store);
        let sessions = SessionStore::load(&*store, SESSIONS_KEY);
        let designs = DesignStore::load(&*store, DESIGNS_KEY);
        Self {
            state: GameState::new(seed, high_score, &tuning),
            tuning,
            store,
            sessions,
            designs,
            running: false,
        }
    }

    /// Reset to level 1, serve, and arm the tick driver
    pub fn start_game(&mut self) {
        self.state.reset_for_new_game(&self.tuning);
        self.state.launch_balls(&self.tuning);
        self.running = true;
        log::info!("Game started (high score {})", self.state.high_score);
    }

    /// The viewport changed: re-home the paddle, reset the ball, refit bricks
    ///
    /// Broken bricks stay broken. Mid-game the fresh ball is served straight away.
    pub fn update_game_area(&mut self, bounds: Rect) {
        self.state.set_bounds(bounds, &self.tuning);
        if self.running {
            self.state.launch_balls(&self.tuning);
        }
        log::info!("Game area {}x{}", bounds.width(), bounds.height());
    }

    /// Pointer drag handler
    pub fn move_paddle(&mut self, to: Vec2) {
        move_paddle(&mut self.state, to);
    }

    /// Run one tick of `dt` seconds (no-op unless running)
    pub fn advance(&mut self, dt: f32) {
        if !self.running {
            return;
        }

        tick(&mut self.state, &self.tuning, dt);

        let mut new_high_score = None;
        for event in self.state.events.drain(..) {
            match event {
                GameEvent::NewHighScore(score) => new_high_score = Some(score),
                GameEvent::PowerUpCollected(kind) => log::debug!("Power-up {:?}", kind),
                GameEvent::LevelComplete { level } => log::info!("Level {} reached", level),
                GameEvent::GameOver { score } => {
                    self.running = false;
                    log::info!("Game over with {} points", score);
                }
            }
        }
        if let Some(score) = new_high_score {
            highscores::save(&mut *self.store, score);
        }
    }

    /// Render projection of the current state
    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::capture(&self.state)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    // === Records ===

    /// Save the current run to the session history
    pub fn record_session(&mut self, played_at: f64) -> SessionRecord {
        let record = SessionRecord {
            id: self.sessions.next_id(),
            score: self.state.score,
            level: self.state.level,
            bricks_broken: self.state.bricks_broken,
            played_at,
            note: String::new(),
        };
        self.sessions.add(&mut *self.store, record.clone());
        record
    }

    pub fn sessions(&self) -> &[SessionRecord] {
        self.sessions.list()
    }

    pub fn delete_session(&mut self, id: u64) -> bool {
        self.sessions.delete(&mut *self.store, id)
    }

    pub fn designs(&self) -> &[Design] {
        self.designs.list()
    }

    /// Add a design, or replace the one with the same id
    pub fn save_design(&mut self, design: Design) {
        let id = design.id;
        if !self.designs.update(&mut *self.store, id, design.clone()) {
            self.designs.add(&mut *self.store, design);
        }
    }

    pub fn delete_design(&mut self, id: u64) -> bool {
        self.designs.delete(&mut *self.store, id)
    }

    /// Next free design id
    pub fn next_design_id(&self) -> u64 {
        self.designs.next_id()
    }
}

/// Fixed-cadence driver: turns variable frame times into 60 Hz steps
#[derive(Debug, Clone)]
pub struct FixedCadence {
    interval: f32,
    accumulator: f32,
}

impl Default for FixedCadence {
    fn default() -> Self {
        Self::new(FRAME_DT)
    }
}

impl FixedCadence {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            accumulator: 0.0,
        }
    }

    /// Add frame time; returns how many steps are due (at most `MAX_SUBSTEPS`,
    /// excess time is dropped)
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator = (self.accumulator + frame_dt).min(self.interval * MAX_SUBSTEPS as f32);
        let steps = (self.accumulator / self.interval) as u32;
        self.accumulator -= steps as f32 * self.interval;
        steps
    }

    /// Run the due steps against an engine
    pub fn drive(&mut self, engine: &mut Engine, frame_dt: f32) {
        for _ in 0..self.accumulate(frame_dt) {
            engine.advance(self.interval);
        }
    }
}
