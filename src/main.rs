//! Boss Arena entry point
//!
//! Native: runs a scripted headless run and logs what the arena reports.
//! Web: exposes a run handle the host game drives once per frame.

use boss_arena::sim::GameMode;

fn parse_mode(s: &str) -> Option<GameMode> {
    match s {
        "story" => Some(GameMode::Story),
        "rush" => Some(GameMode::Rush),
        "endless" => Some(GameMode::Endless),
        _ => None,
    }
}

#[cfg(target_arch = "wasm32")]
mod wasm_run {
    use wasm_bindgen::prelude::*;

    use boss_arena::audio::AudioManager;
    use boss_arena::persistence::Dispatcher;
    use boss_arena::sim::{RunState, TickInput, tick};
    use boss_arena::{ArenaTuning, Leaderboard, Settings};

    /// One run, driven by the host game loop at the fixed tick rate
    #[wasm_bindgen]
    pub struct ArenaRun {
        run: RunState,
        audio: AudioManager,
        results: Dispatcher<Leaderboard>,
    }

    #[wasm_bindgen]
    impl ArenaRun {
        /// `tuning_json` may be empty to use the built-in balance
        #[wasm_bindgen(constructor)]
        pub fn new(mode: &str, seed: u64, tuning_json: &str) -> Result<ArenaRun, JsValue> {
            let mode = super::parse_mode(mode)
                .ok_or_else(|| JsValue::from_str(&format!("unknown mode: {mode}")))?;
            let tuning = if tuning_json.is_empty() {
                ArenaTuning::default()
            } else {
                ArenaTuning::from_json(tuning_json)
                    .map_err(|e| JsValue::from_str(&e.to_string()))?
            };
            let run = RunState::with_tuning(seed, mode, tuning)
                .map_err(|e| JsValue::from_str(&e.to_string()))?;
            log::info!("Starting {} run (seed {seed})", mode.as_str());
            Ok(ArenaRun {
                run,
                audio: AudioManager::new(&Settings::load()),
                results: Dispatcher::start(Leaderboard::load()),
            })
        }

        /// Advance one tick; returns the tick's arena events as JSON
        pub fn tick(
            &mut self,
            distance_delta: f32,
            attack: Option<u32>,
            player_died: bool,
            exit: bool,
        ) -> String {
            let input = TickInput {
                distance_delta,
                attack,
                player_died,
                exit,
            };
            let output = tick(&mut self.run, &input);

            for event in &output.events {
                self.audio.handle(event);
            }
            for submission in output.submissions {
                if let Err(e) = self.results.submit(submission) {
                    log::warn!("Result dropped: {e}");
                }
            }
            for failure in self.results.drain_failures() {
                log::warn!("Result not stored: {}", failure.error);
            }

            serde_json::to_string(&output.events).unwrap_or_else(|_| "[]".to_string())
        }

        /// Arena state snapshot as JSON (for the HUD)
        pub fn state(&self) -> String {
            serde_json::to_string(self.run.arena.state()).unwrap_or_default()
        }

        pub fn finished(&self) -> bool {
            self.run.finished
        }

        pub fn apply_settings(&mut self, settings_json: &str) {
            match serde_json::from_str::<Settings>(settings_json) {
                Ok(settings) => {
                    settings.save();
                    self.audio.apply_settings(&settings);
                }
                Err(e) => log::warn!("Settings ignored: {e}"),
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("Logger init failed: {e}").into());
    }
    log::info!("Boss Arena ready");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let mode = args.next().unwrap_or_else(|| "story".to_string());
    let Some(mode) = parse_mode(&mode) else {
        log::error!("Unknown mode '{mode}' (expected story, rush or endless)");
        std::process::exit(2);
    };
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);

    log::info!("Boss Arena (native) headless {} run, seed {seed}", mode.as_str());
    headless::run(mode, seed);
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use boss_arena::Leaderboard;
    use boss_arena::persistence::Dispatcher;
    use boss_arena::sim::{ArenaEvent, ArenaPhase, GameMode, RunState, TickInput, tick};

    /// Runner speed in distance units per tick
    const RUN_SPEED: f32 = 10.0;
    /// Player lands a hit this often while fighting
    const ATTACK_EVERY_TICKS: u64 = 40;
    /// Endless runs leave after this many waves
    const ENDLESS_WAVES: u32 = 2;
    /// Hard stop for the scripted run (10 minutes of game time)
    const MAX_TICKS: u64 = 60 * 60 * 10;

    pub fn run(mode: GameMode, seed: u64) {
        let mut run = RunState::new(seed, mode);
        let results = Dispatcher::start(Leaderboard::new());

        while !run.finished && run.time_ticks < MAX_TICKS {
            let fighting = run.arena.phase() == ArenaPhase::Fighting;
            let input = TickInput {
                distance_delta: RUN_SPEED,
                attack: (fighting && run.time_ticks % ATTACK_EVERY_TICKS == 0).then_some(1),
                player_died: false,
                exit: mode.is_endless() && run.arena.state().endless_wave >= ENDLESS_WAVES,
            };
            let output = tick(&mut run, &input);

            for event in &output.events {
                log_event(run.time_ticks, event);
            }
            for submission in output.submissions {
                if let Err(e) = results.submit(submission) {
                    log::warn!("Result dropped: {e}");
                }
            }

            if run.arena.phase() == ArenaPhase::Complete {
                break;
            }
        }

        let summary = run.summary();
        log::info!(
            "Run over after {} ticks: {} bosses, {} coins, {} xp, {:.2}s in arena{}",
            run.time_ticks,
            summary.bosses_defeated.len(),
            summary.total_rewards.coins,
            summary.total_rewards.xp,
            summary.completion_time_seconds,
            if summary.died { " (died)" } else { "" }
        );

        let (board, failures) = results.shutdown();
        for failure in failures {
            log::warn!("Result not stored: {}", failure.error);
        }
        if let Some(board) = board {
            for (boss, secs) in &board.best_kill_times {
                log::info!("Best {boss} kill: {secs:.2}s");
            }
            if let Some(top) = board.top_score(mode.is_endless()) {
                log::info!("Top {} score: {top}", mode.as_str());
            }
        }
    }

    fn log_event(tick: u64, event: &ArenaEvent) {
        match event {
            ArenaEvent::BossAttack { .. } | ArenaEvent::BossHealthChanged { .. } => {
                log::debug!("[{tick}] {event:?}")
            }
            _ => log::info!("[{tick}] {event:?}"),
        }
    }
}
