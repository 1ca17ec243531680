//! Spy's Return entry point
//!
//! On the web the page drives `WebGame`. Natively there is no window; this
//! binary runs the demo autopilot headless for a couple of minutes of game
//! time, logging what happens and persisting the high score to a save file.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use spys_return::HighScoreStore;
    use spys_return::consts::SIM_DT;
    use spys_return::persistence::JsonFileStore;
    use spys_return::settings::Settings;
    use spys_return::sim::{GameEvent, GameState, autopilot_input, tick};

    /// Simulated seconds per demo run
    const DEMO_SECONDS: u32 = 120;

    env_logger::init();
    log::info!("Spy's Return (native) starting...");
    log::info!("Native mode is headless - serve the wasm build for the playable version");

    let save_path = std::env::temp_dir().join("spys_return_save.json");
    let store = JsonFileStore::open(&save_path);
    let settings = Settings::load(&store);
    let mut high_scores = HighScoreStore::open(store);

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let mut state = GameState::new(settings, seed, high_scores.best());

    let mut runs = 0u32;
    let mut best_run = 0u64;
    let ticks = (DEMO_SECONDS as f32 / SIM_DT) as u64;
    for _ in 0..ticks {
        let input = autopilot_input(&state);
        tick(&mut state, &input, SIM_DT);

        for event in state.drain_events() {
            high_scores.observe(&event);
            match event {
                GameEvent::GameOver { .. } => {
                    runs += 1;
                    best_run = best_run.max(state.score.score);
                }
                GameEvent::ElevatorMoved { .. } | GameEvent::PlayerMoved { .. } => {}
                other => log::debug!("{:?}", other),
            }
        }
    }
    best_run = best_run.max(state.score.score);

    let hud = state.hud();
    println!("Demo finished after {} simulated seconds", DEMO_SECONDS);
    println!("  {} | {} | {}", hud.level_text(), hud.floor_text(), hud.score_text());
    println!("  Runs ended: {}, best run: {}", runs, best_run);
    println!("  {} (saved to {})", hud.high_score_text(), save_path.display());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::wasm_main, this is just to satisfy the compiler
}
