//! Countdown state for each reminder timer

use serde::{ser::SerializeMap, Serialize, Serializer};

use crate::engine::TimerKind;

use super::Settings;

/// Countdown state of a single reminder timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimerState {
    pub remaining_seconds: u32,
    pub is_active: bool,
}

impl TimerState {
    /// Create a paused timer with the given countdown
    pub fn paused(remaining_seconds: u32) -> Self {
        Self {
            remaining_seconds,
            is_active: false,
        }
    }

    /// Check if the timer is counting down
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Remaining time formatted as MM:SS
    pub fn display(&self) -> String {
        format!(
            "{:02}:{:02}",
            self.remaining_seconds / 60,
            self.remaining_seconds % 60
        )
    }
}

/// Snapshot of all four timers. Boards are never mutated once published;
/// the engine builds a new one for every change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerBoard {
    timers: [TimerState; 4],
}

impl TimerBoard {
    /// Paused timers loaded with the settings-derived defaults
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            timers: TimerKind::ALL.map(|kind| TimerState::paused(settings.reset_seconds(kind))),
        }
    }

    pub fn get(&self, kind: TimerKind) -> TimerState {
        self.timers[kind.index()]
    }

    pub(crate) fn get_mut(&mut self, kind: TimerKind) -> &mut TimerState {
        &mut self.timers[kind.index()]
    }

    /// Iterate kinds with their state, in board order
    pub fn iter(&self) -> impl Iterator<Item = (TimerKind, TimerState)> + '_ {
        TimerKind::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }

    /// Check if any timer is counting down
    pub fn any_active(&self) -> bool {
        self.timers.iter().any(TimerState::is_active)
    }

    /// Check if every timer is counting down
    pub fn all_active(&self) -> bool {
        self.timers.iter().all(TimerState::is_active)
    }
}

impl Serialize for TimerBoard {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.timers.len()))?;
        for (kind, state) in self.iter() {
            map.serialize_entry(kind.as_str(), &state)?;
        }
        map.end()
    }
}
