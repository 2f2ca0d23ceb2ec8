//! Main application state management

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Instant,
};

use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{error, info, warn};

use super::{Diagnostics, Settings, SettingsError, SettingsPatch, TimerBoard};
use crate::{
    engine::{Completion, CompletionDispatcher, ReminderEngine, TimerKind},
    services::{ActivityLogger, NotificationGateway, NotificationLog, SettingsStore},
};

/// Failure of a settings update
#[derive(Debug, Error)]
pub enum SettingsUpdateError {
    #[error(transparent)]
    Invalid(#[from] SettingsError),
    #[error("{0}")]
    State(String),
}

/// The collaborators the engine and the handlers talk to
#[derive(Clone)]
pub struct Services {
    pub settings_store: Arc<dyn SettingsStore>,
    pub notification_log: Arc<dyn NotificationLog>,
    pub sessions: Arc<dyn ActivityLogger>,
    pub gateway: Arc<dyn NotificationGateway>,
    pub diagnostics: Arc<Diagnostics>,
}

/// Shared state behind every handler and the clock task
pub struct AppState {
    /// The reminder engine; every tick and control call takes this lock
    engine: Mutex<ReminderEngine>,
    pub services: Services,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Channel for timer updates
    pub timer_update_tx: watch::Sender<Arc<TimerBoard>>,
    /// Keep the receiver alive to prevent channel closure
    pub _timer_update_rx: watch::Receiver<Arc<TimerBoard>>,
    /// Serializes settings writes so the newest settings always land last
    settings_save: tokio::sync::Mutex<()>,
}

impl AppState {
    /// Create the state with an engine built from `settings`
    pub fn new(settings: Settings, services: Services, port: u16, host: String) -> Self {
        let dispatcher = CompletionDispatcher::new(
            Arc::clone(&services.gateway),
            Arc::clone(&services.notification_log),
            Arc::clone(&services.sessions),
            Arc::clone(&services.diagnostics),
        );
        let engine = ReminderEngine::new(settings, dispatcher);
        let (timer_update_tx, timer_update_rx) = watch::channel(engine.board());

        Self {
            engine: Mutex::new(engine),
            services,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            timer_update_tx,
            _timer_update_rx: timer_update_rx,
            settings_save: tokio::sync::Mutex::new(()),
        }
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.services.diagnostics
    }

    fn lock_engine(&self) -> Result<MutexGuard<'_, ReminderEngine>, String> {
        self.engine
            .lock()
            .map_err(|e| format!("Failed to lock reminder engine: {}", e))
    }

    /// Publish a board unless watchers already have this exact snapshot
    fn publish(&self, board: &Arc<TimerBoard>) {
        self.timer_update_tx.send_if_modified(|current| {
            if Arc::ptr_eq(current, board) {
                false
            } else {
                *current = Arc::clone(board);
                true
            }
        });
    }

    fn track_action(&self, action: String) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action);
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Advance the engine by one second and publish the result
    pub fn tick(&self) -> Result<Vec<Completion>, String> {
        let mut engine = self.lock_engine()?;
        let completions = engine.tick();
        self.publish(&engine.board());
        Ok(completions)
    }

    /// Run a control operation against the engine and publish the new board
    fn control<F>(&self, action: String, operation: F) -> Result<Arc<TimerBoard>, String>
    where
        F: FnOnce(&mut ReminderEngine) -> Arc<TimerBoard>,
    {
        let mut engine = self.lock_engine()?;
        let board = operation(&mut engine);
        self.publish(&board);
        drop(engine);

        info!("Timer action: {}", action);
        self.track_action(action);
        Ok(board)
    }

    pub fn start_timer(&self, kind: TimerKind) -> Result<Arc<TimerBoard>, String> {
        self.control(format!("{}-start", kind), |engine| engine.start(kind))
    }

    pub fn pause_timer(&self, kind: TimerKind) -> Result<Arc<TimerBoard>, String> {
        self.control(format!("{}-pause", kind), |engine| engine.pause(kind))
    }

    pub fn reset_timer(&self, kind: TimerKind) -> Result<Arc<TimerBoard>, String> {
        self.control(format!("{}-reset", kind), |engine| engine.reset(kind))
    }

    pub fn start_all(&self) -> Result<Arc<TimerBoard>, String> {
        self.control("start-all".to_string(), ReminderEngine::start_all)
    }

    pub fn pause_all(&self) -> Result<Arc<TimerBoard>, String> {
        self.control("pause-all".to_string(), ReminderEngine::pause_all)
    }

    /// Get the current timer board
    pub fn get_timers(&self) -> Result<Arc<TimerBoard>, String> {
        self.lock_engine().map(|engine| engine.board())
    }

    /// Get the current settings
    pub fn get_settings(&self) -> Result<Settings, String> {
        self.lock_engine().map(|engine| engine.settings().clone())
    }

    /// Merge a settings patch into the engine and persist the result.
    ///
    /// The merge is kept even if persisting fails; the failure is logged and
    /// recorded in diagnostics.
    pub async fn update_settings(
        &self,
        patch: &SettingsPatch,
    ) -> Result<Settings, SettingsUpdateError> {
        let _save = self.settings_save.lock().await;

        let settings = {
            let mut engine = self.lock_engine().map_err(SettingsUpdateError::State)?;
            let settings = engine.update_settings(patch)?;
            self.publish(&engine.board());
            settings
        };
        self.track_action("settings-update".to_string());
        self.persist_settings(&settings).await;
        Ok(settings)
    }

    async fn persist_settings(&self, settings: &Settings) {
        match self.services.settings_store.save(settings).await {
            Ok(()) => self.diagnostics().clear_for("settings"),
            Err(e) => {
                error!("Failed to save settings: {}", e);
                self.diagnostics()
                    .record("settings", format!("Failed to save settings: {}", e));
            }
        }
    }

    /// Load persisted settings into the engine.
    ///
    /// A failed load or an invalid stored value keeps the current settings.
    pub async fn restore_settings(&self) -> Settings {
        let loaded = match self.services.settings_store.load().await {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Failed to load settings, using defaults: {}", e);
                self.diagnostics()
                    .record("settings", format!("Failed to load settings: {}", e));
                return self.get_settings().unwrap_or_default();
            }
        };

        let restored = self.lock_engine().and_then(|mut engine| {
            let restored = engine
                .replace_settings(&loaded)
                .map_err(|e| format!("Stored settings are invalid: {}", e))?;
            self.publish(&engine.board());
            Ok(restored)
        });

        match restored {
            Ok(settings) => {
                info!("Settings restored");
                settings
            }
            Err(e) => {
                warn!("{}", e);
                self.diagnostics().record("settings", e);
                self.get_settings().unwrap_or_default()
            }
        }
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
