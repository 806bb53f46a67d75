//! Application lifecycle: menu, play and quit
//!
//! `Game` sits above the simulation. It turns UI actions into level
//! transitions and feeds frame deltas through the fixed-timestep
//! accumulator.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::settings::Settings;
use crate::sim::{GameEvent, Level, MatchMode, TickInput, tick};

/// Top-level application state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppState {
    Menu,
    Play,
    Quit,
}

/// Action raised by a menu or HUD button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UiAction {
    Play(MatchMode),
    Restart,
    BackToMenu,
    Quit,
}

impl UiAction {
    /// Parse a button action string such as `"play:oneplayer"` or `"restart"`
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        if let Some(mode) = s.strip_prefix("play:") {
            return MatchMode::parse(mode).map(UiAction::Play);
        }
        match s.as_str() {
            "restart" => Some(UiAction::Restart),
            "backmenu" | "back-to-menu" | "back_to_menu" => Some(UiAction::BackToMenu),
            "quit" => Some(UiAction::Quit),
            _ => None,
        }
    }
}

/// Game instance holding all state
#[derive(Debug, Clone)]
pub struct Game {
    pub state: AppState,
    pub level: Option<Level>,
    settings: Settings,
    accumulator: f32,
    seed: u64,
    matches_played: u64,
}

impl Game {
    pub fn new(settings: Settings, seed: u64) -> Self {
        Self {
            state: AppState::Menu,
            level: None,
            settings,
            accumulator: 0.0,
            seed,
            matches_played: 0,
        }
    }

    /// Apply a UI action
    pub fn dispatch(&mut self, action: UiAction) {
        match (self.state, action) {
            (AppState::Quit, _) => {
                log::debug!("{:?} ignored after quit", action);
            }
            (_, UiAction::Quit) => {
                log::info!("Quitting");
                self.level = None;
                self.state = AppState::Quit;
            }
            (AppState::Menu, UiAction::Play(mode)) => self.start_match(mode),
            (AppState::Play, UiAction::Restart) => {
                if let Some(level) = &mut self.level {
                    level.restart();
                }
            }
            (AppState::Play, UiAction::BackToMenu) => self.leave_match(),
            (state, action) => {
                log::debug!("{:?} ignored in {:?}", action, state);
            }
        }
    }

    /// Parse and apply an action string; unknown actions are ignored
    pub fn dispatch_str(&mut self, action: &str) {
        match UiAction::parse(action) {
            Some(action) => self.dispatch(action),
            None => log::debug!("unknown action {:?}", action),
        }
    }

    /// Escape/backspace: abandon the current match
    pub fn escape(&mut self) {
        if self.state == AppState::Play {
            self.leave_match();
        }
    }

    fn start_match(&mut self, mode: MatchMode) {
        let seed = self.seed.wrapping_add(self.matches_played);
        self.matches_played += 1;

        let mut level = Level::new(mode, &self.settings, seed);
        level.start();
        self.level = Some(level);
        self.accumulator = 0.0;
        self.state = AppState::Play;
    }

    fn leave_match(&mut self) {
        if let Some(level) = &mut self.level {
            level.back_to_menu();
            log::info!("Match abandoned: {}", level.mode.as_str());
        }
        self.level = None;
        self.state = AppState::Menu;
    }

    /// Run simulation ticks for one rendered frame
    pub fn advance(&mut self, frame_dt: f32, input: &TickInput) -> Vec<GameEvent> {
        let mut events = Vec::new();
        let Some(level) = &mut self.level else {
            return events;
        };

        let dt = frame_dt.clamp(0.0, MAX_FRAME_DT);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            events.extend(tick(level, input, SIM_DT));
            self.accumulator -= SIM_DT;
            substeps += 1;
        }

        // Drop whatever the substep cap left behind
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }

        events
    }
}
