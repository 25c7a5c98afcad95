//! Paan Rider entry point
//!
//! The browser build is driven from JavaScript through `platform::web`.
//! Natively this runs a headless demo session with the autopilot at the
//! wheel and prints the result.
//!
//! Usage: `paan-rider [seed] [settings.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn run() -> Result<(), paan_rider::ConfigError> {
    use paan_rider::Settings;
    use paan_rider::sim::{GameEvent, GameState, apply_input, autopilot, tick};

    /// Simulated display rate
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Ten simulated minutes
    const MAX_FRAMES: u64 = 60 * 60 * 10;

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
    let settings = match args.next() {
        Some(path) => Settings::load_file(&path)?,
        None => Settings::default(),
    };

    log::info!("Paan Rider (native demo) starting...");
    let mut state = GameState::new(settings, seed);

    let mut frame = 0;
    while state.is_playing() && frame < MAX_FRAMES {
        frame += 1;
        let now = frame as f64 * FRAME_MS;
        for event in autopilot(&state) {
            apply_input(&mut state, event, now);
        }
        tick(&mut state, now);

        for event in state.take_events() {
            match event {
                GameEvent::TargetHit { target_id, .. } => {
                    log::info!("[{:>6}] hit target {}", frame, target_id)
                }
                GameEvent::TargetLost { id } => log::info!("[{:>6}] lost target {}", frame, id),
                GameEvent::PenaltyTaken { id } => {
                    log::info!("[{:>6}] hit penalty target {}", frame, id)
                }
                _ => {}
            }
        }
    }

    println!("{}", state.scoreboard());
    println!("Simulated {} frames ({:.1} s)", frame, frame as f64 * FRAME_MS / 1000.0);
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}
