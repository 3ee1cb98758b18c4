//! Brick Blitz entry point
//!
//! The web build is driven from JavaScript through `brick_blitz::web`.
//! Natively this runs a headless game with the paddle on autopilot, which
//! is handy for balancing: tweak the tuning file and watch the logs.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::time::{SystemTime, UNIX_EPOCH};

    use brick_blitz::consts::FRAME_DT;
    use brick_blitz::platform::{FileStore, KeyValueStore, MemoryStore};
    use brick_blitz::sim::Rect;
    use brick_blitz::{Engine, FixedCadence, Tuning};

    /// Give up after ten simulated minutes
    const MAX_FRAMES: u32 = 60 * 60 * 10;

    fn open_store() -> Box<dyn KeyValueStore> {
        match std::env::var("BRICK_BLITZ_DATA_DIR") {
            Ok(dir) => {
                log::info!("Using data directory {}", dir);
                Box::new(FileStore::new(dir))
            }
            Err(_) => {
                log::info!("BRICK_BLITZ_DATA_DIR not set, nothing will be saved");
                Box::new(MemoryStore::new())
            }
        }
    }

    fn now_millis() -> f64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as f64)
            .unwrap_or(0.0)
    }

    fn seed() -> u64 {
        std::env::var("BRICK_BLITZ_SEED")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(|| now_millis() as u64)
    }

    pub fn run() {
        let store = open_store();
        let tuning = Tuning::load(&*store);
        let seed = seed();
        log::info!("Game initialized with seed: {}", seed);

        let mut engine = Engine::new(store, tuning, seed);
        engine.update_game_area(Rect::new(0.0, 0.0, 400.0, 700.0));
        engine.start_game();

        let mut cadence = FixedCadence::default();
        let mut frames = 0;
        while engine.is_running() && frames < MAX_FRAMES {
            // Track the lowest descending ball
            let target = engine
                .state()
                .balls
                .iter()
                .filter(|b| b.vel.y > 0.0)
                .max_by(|a, b| a.rect.max_y().total_cmp(&b.rect.max_y()))
                .map(|b| b.center());
            if let Some(target) = target {
                engine.move_paddle(target);
            }
            cadence.drive(&mut engine, FRAME_DT);
            frames += 1;
        }

        let state = engine.state();
        log::info!(
            "Finished after {:.1}s: score {}, level {}, {} bricks (best {})",
            state.clock,
            state.score,
            state.level,
            state.bricks_broken,
            state.high_score
        );
        let record = engine.record_session(now_millis());
        log::info!("Recorded session #{}", record.id);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Brick Blitz (native, headless) starting...");
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is brick_blitz::web::wasm_start, this is just to satisfy the compiler
}
