//! The multi-timer reminder engine
//!
//! Owns the four countdowns and the settings that drive them. All mutation
//! goes through `&mut self`, so whoever owns the engine decides how ticks
//! and control calls are serialized; the engine itself never runs a tick
//! concurrently with anything.
//!
//! Every change publishes a fresh `Arc<TimerBoard>`. A change that leaves the
//! board equal to the previous one keeps the previous `Arc`, so observers can
//! use `Arc::ptr_eq` to skip redundant updates.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::{CompletionDispatcher, TimerKind};
use crate::state::{Settings, SettingsError, SettingsPatch, TimerBoard};

/// A timer that reached zero during a tick
#[derive(Debug)]
pub struct Completion {
    pub kind: TimerKind,
    /// Logging task spawned for this expiry, if a runtime was available
    pub side_effects: Option<JoinHandle<()>>,
}

pub struct ReminderEngine {
    settings: Settings,
    board: Arc<TimerBoard>,
    dispatcher: CompletionDispatcher,
}

impl ReminderEngine {
    /// Create an engine with every timer paused at its full interval
    pub fn new(settings: Settings, dispatcher: CompletionDispatcher) -> Self {
        dispatcher.sync_preferences(&settings);
        Self {
            board: Arc::new(TimerBoard::from_settings(&settings)),
            settings,
            dispatcher,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Current snapshot of all timers
    pub fn board(&self) -> Arc<TimerBoard> {
        Arc::clone(&self.board)
    }

    pub fn dispatcher(&self) -> &CompletionDispatcher {
        &self.dispatcher
    }

    /// Advance every active timer by one second.
    ///
    /// A timer that reaches zero fires its completion and is re-armed from
    /// the current settings before the new board is published, so zero is
    /// never observable as a resting value.
    pub fn tick(&mut self) -> Vec<Completion> {
        if !self.board.any_active() {
            return Vec::new();
        }

        let mut next = (*self.board).clone();
        let mut completions = Vec::new();
        let mut changed = false;

        for kind in TimerKind::ALL {
            let timer = next.get_mut(kind);
            if !timer.is_active || timer.remaining_seconds == 0 {
                continue;
            }

            timer.remaining_seconds -= 1;
            changed = true;

            if timer.remaining_seconds == 0 {
                let side_effects = self.dispatcher.dispatch(kind);
                timer.remaining_seconds = self.settings.reset_seconds(kind);
                debug!("{} re-armed at {}s", kind, timer.remaining_seconds);
                completions.push(Completion { kind, side_effects });
            }
        }

        if changed {
            self.board = Arc::new(next);
        }
        completions
    }

    pub fn start(&mut self, kind: TimerKind) -> Arc<TimerBoard> {
        self.update_board(|board| board.get_mut(kind).is_active = true)
    }

    pub fn pause(&mut self, kind: TimerKind) -> Arc<TimerBoard> {
        self.update_board(|board| board.get_mut(kind).is_active = false)
    }

    /// Pause the timer and load its full interval
    pub fn reset(&mut self, kind: TimerKind) -> Arc<TimerBoard> {
        let remaining_seconds = self.settings.reset_seconds(kind);
        self.update_board(|board| {
            let timer = board.get_mut(kind);
            timer.remaining_seconds = remaining_seconds;
            timer.is_active = false;
        })
    }

    pub fn start_all(&mut self) -> Arc<TimerBoard> {
        self.set_all_active(true)
    }

    pub fn pause_all(&mut self) -> Arc<TimerBoard> {
        self.set_all_active(false)
    }

    fn set_all_active(&mut self, active: bool) -> Arc<TimerBoard> {
        self.update_board(|board| {
            for kind in TimerKind::ALL {
                board.get_mut(kind).is_active = active;
            }
        })
    }

    /// Merge a settings patch.
    ///
    /// Every interval present in the patch snaps its timer to the new full
    /// length immediately, running or not. Running state is never touched.
    /// An invalid patch changes nothing.
    pub fn update_settings(&mut self, patch: &SettingsPatch) -> Result<Settings, SettingsError> {
        patch.validate()?;
        self.settings.apply(patch);
        self.dispatcher.sync_preferences(&self.settings);

        if patch.touches_intervals() {
            self.update_board(|board| {
                for kind in TimerKind::ALL {
                    if let Some(minutes) = patch.interval_minutes(kind) {
                        board.get_mut(kind).remaining_seconds = minutes * 60;
                    }
                }
            });
        }

        info!("Settings updated: {:?}", self.settings);
        Ok(self.settings.clone())
    }

    /// Apply a complete settings value, e.g. one loaded from disk
    pub fn replace_settings(&mut self, settings: &Settings) -> Result<Settings, SettingsError> {
        self.update_settings(&SettingsPatch::full(settings))
    }

    fn update_board<F>(&mut self, updater: F) -> Arc<TimerBoard>
    where
        F: FnOnce(&mut TimerBoard),
    {
        let mut next = (*self.board).clone();
        updater(&mut next);
        if next != *self.board {
            self.board = Arc::new(next);
        }
        self.board()
    }
}
