//! State management module
//!
//! Settings, the timer board snapshot and the shared application state the
//! HTTP handlers and the clock task work against.

pub mod app_state;
pub mod diagnostics;
pub mod settings;
pub mod timer_state;

// Re-export main types
pub use app_state::{AppState, Services, SettingsUpdateError};
pub use diagnostics::{DiagnosticEntry, Diagnostics};
pub use settings::{Settings, SettingsError, SettingsPatch, WorkHours};
pub use timer_state::{TimerBoard, TimerState};
