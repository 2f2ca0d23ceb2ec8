//! HTTP endpoint handlers, grouped by resource

pub mod exercises;
pub mod notifications;
pub mod sessions;
pub mod settings;
pub mod stats;
pub mod system;
pub mod timers;
