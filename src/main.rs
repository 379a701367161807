//! Subway Runner entry point
//!
//! Natively this runs a headless autopilot game and prints the result. The
//! browser build starts from `subway_runner::web` instead.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use clap::Parser;

    use subway_runner::consts::DEFAULT_SEED;
    use subway_runner::render::{TextureHandle, Textures, draw_list};
    use subway_runner::sim::{GameEvent, GameState, TickInput, tick};
    use subway_runner::{HighScores, Result, Tuning};

    /// Ten minutes of play at one tick per frame
    const DEFAULT_TICKS: u64 = 36_000;

    /// Headless autopilot run of the three-lane runner
    #[derive(Debug, Parser)]
    #[command(name = "subway-runner", version, about)]
    struct Args {
        /// JSON tuning table overriding the default balance
        #[arg(long, value_name = "FILE")]
        tuning: Option<PathBuf>,

        /// Run seed
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,

        /// Maximum number of ticks to simulate
        #[arg(long, default_value_t = DEFAULT_TICKS)]
        ticks: u64,

        /// High-score file to record the run in
        #[arg(long, value_name = "FILE")]
        scores: Option<PathBuf>,
    }

    fn run(args: Args) -> Result<()> {
        let tuning = match &args.tuning {
            Some(path) => Tuning::load(path)?,
            None => Tuning::default(),
        };

        // No GPU here; hand out sequential handles
        let mut next_handle = 0;
        let textures = Textures::load(&mut |path: &str| {
            next_handle += 1;
            log::debug!("texture {} -> {}", path, next_handle);
            TextureHandle(next_handle)
        });

        let mut state = GameState::with_tuning(args.seed, tuning, textures);
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };

        for _ in 0..args.ticks {
            tick(&mut state, &input);
            for event in &state.events {
                match event {
                    GameEvent::CoinCollected => {
                        log::debug!("tick {}: coin ({})", state.time_ticks, state.score)
                    }
                    other => log::info!("tick {}: {:?}", state.time_ticks, other),
                }
            }
            if state.outcome().is_some() {
                break;
            }
        }

        log::info!("Final frame draws {} instances", draw_list(&state).len());

        let summary = state.summary();
        println!("{}", serde_json::to_string_pretty(&summary)?);

        if let Some(path) = &args.scores {
            let mut scores = HighScores::load_from(path)?;
            let timestamp = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as f64)
                .unwrap_or_default();
            match scores.add_run(&summary, timestamp) {
                Some(rank) => {
                    log::info!("New high score! Rank #{}", rank);
                    scores.save_to(path)?;
                }
                None => log::info!("Score {} did not make the table", summary.score),
            }
        }

        Ok(())
    }

    pub fn main() {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
        log::info!("Subway Runner (native) starting...");

        let args = Args::parse();
        log::debug!("{:?}", args);

        if let Err(err) = run(args) {
            log::error!("{err}");
            std::process::exit(1);
        }
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::main();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is subway_runner::web::start, this is just to satisfy the compiler
}
