//! Crazy Pong headless driver
//!
//! Plays one attract-mode match (AI against AI) to completion and logs what
//! happens. Pass a settings JSON path as the first argument to override the
//! defaults; `RUST_LOG=debug` shows every point.

use crazy_pong::audio::AudioMixer;
use crazy_pong::sim::{GameEvent, LevelPhase, MatchMode, Side, TickInput};
use crazy_pong::{Game, Settings, UiAction};

/// Render-rate frame delta fed to the accumulator
const FRAME_DT: f32 = 1.0 / 60.0;
/// Give up after this many frames (about 30 minutes of play)
const MAX_FRAMES: u32 = 60 * 60 * 30;

#[cfg(not(target_arch = "wasm32"))]
fn load_settings() -> Result<Settings, crazy_pong::SettingsError> {
    match std::env::args().nth(1) {
        Some(path) => match Settings::load(&path) {
            Ok(settings) => Ok(settings),
            Err(e) if e.is_recoverable() => {
                log::warn!("Failed to load {}: {} - using defaults", path, e);
                Ok(Settings::default())
            }
            Err(e) => Err(e),
        },
        None => Ok(Settings::default()),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Crazy Pong (headless) starting...");

    let settings = match load_settings() {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    let mixer = AudioMixer::new(settings.audio.clone());
    let mut game = Game::new(settings, crazy_pong::entropy_seed());
    game.dispatch(UiAction::Play(MatchMode::Attract));

    let input = TickInput::default();
    let mut frames = 0;
    while frames < MAX_FRAMES {
        let events = game.advance(FRAME_DT, &input);
        for event in &events {
            match event {
                GameEvent::Scored { side, score } => {
                    log::info!("{} scores ({})", side.as_str(), score)
                }
                GameEvent::BallOut { .. } | GameEvent::Won { .. } => {}
                other => log::trace!("{:?}", other),
            }
        }
        for cue in mixer.cues(&events) {
            log::trace!("cue {:?} at {:.2}", cue.effect, cue.volume);
        }

        let won = game
            .level
            .as_ref()
            .is_some_and(|level| level.phase == LevelPhase::Won);
        if won {
            break;
        }
        frames += 1;
    }

    if let Some(level) = game.level.as_ref() {
        let (left, right) = (level.score(Side::Left), level.score(Side::Right));
        match level.winner_label() {
            Some(label) => println!("{} ({} - {}) after {} frames", label, left, right, frames),
            None => println!("No winner after {} frames ({} - {})", frames, left, right),
        }
    }

    game.dispatch(UiAction::Quit);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser builds drive `Game` from the host page
}
