//! Directional Boring entry point
//!
//! On the web the library's `wasm_bindgen(start)` hook does the setup; the
//! native binary runs one headless drilling session and prints the outcome.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use directional_boring::{GameEvent, Session, Settings};

    env_logger::init();
    log::info!("Directional Boring (native) starting...");

    let settings = std::env::args()
        .nth(1)
        .map(|path| load_settings(&path))
        .unwrap_or_default();

    match settings.to_json() {
        Ok(json) => log::debug!("Effective settings: {}", json),
        Err(e) => log::warn!("Could not serialize settings: {}", e),
    }

    let mut session = Session::new(settings.seed.unwrap_or_else(clock_seed), &settings);
    let mut flips = settings.bias_flips.clone();
    flips.sort_unstable();
    let mut flips = flips.into_iter().peekable();

    session.press_start();

    let mut outcome = None;
    for _ in 0..settings.max_ticks {
        let len = session.state().pipe_length();
        while flips.next_if(|&at| at <= len).is_some() {
            session.toggle_bias();
        }

        if let Some(event) = session.tick() {
            outcome = Some(event);
            break;
        }
    }

    let state = session.state();
    match outcome {
        Some(GameEvent::Finished { status, pipe_length }) => {
            println!("{} (seed {}): pipe length {}", status.as_str(), session.seed(), pipe_length);
        }
        _ => {
            println!(
                "Still drilling after {} ticks (seed {}), bit at ({:.1}, {:.1})",
                settings.max_ticks, session.seed(), state.position.x, state.position.y
            );
        }
    }
}

/// Read a JSON settings file, falling back to defaults on any problem
#[cfg(not(target_arch = "wasm32"))]
fn load_settings(path: &str) -> directional_boring::Settings {
    use directional_boring::Settings;

    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) => {
            log::warn!("Could not read settings {}: {} - using defaults", path, e);
            return Settings::default();
        }
    };

    match Settings::from_json(&json) {
        Ok(settings) => {
            log::info!("Loaded settings from {}", path);
            settings
        }
        Err(e) => {
            log::warn!("Invalid settings {}: {} - using defaults", path, e);
            Settings::default()
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is the library's start hook, this is just to satisfy the compiler
}
