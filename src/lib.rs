//! HealthGuard - posture, eye, stretch and work-session reminders
//!
//! A reminder engine with four independent countdowns driven by a shared
//! one-second clock, plus the local stores, desktop notifications and HTTP
//! API that run it as a standalone daemon.

pub mod api;
pub mod config;
pub mod engine;
pub mod services;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use engine::{ReminderEngine, TimerKind};
pub use state::AppState;
pub use tasks::Clock;
pub use utils::signals::shutdown_signal;
