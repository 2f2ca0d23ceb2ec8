//! Reminder engine
//!
//! The engine owns the timer board and the settings that drive it. It knows
//! nothing about wall-clock time: the clock task calls `tick` once a second.

pub mod dispatcher;
pub mod kinds;
pub mod reminder_engine;

#[cfg(test)]
mod test_support;

pub use dispatcher::CompletionDispatcher;
pub use kinds::{ActivityType, IntervalField, KindDescriptor, TimerKind};
pub use reminder_engine::{Completion, ReminderEngine};
