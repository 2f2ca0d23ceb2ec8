//! User settings and partial updates

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::{IntervalField, TimerKind};

/// Longest interval accepted for any reminder, in minutes (one day)
pub const MAX_INTERVAL_MINUTES: u32 = 24 * 60;

/// Daily working window, stored as "HH:MM" strings.
///
/// Flattened into `Settings` on the wire, so reads and patches share the
/// `work_hours_start` / `work_hours_end` keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkHours {
    #[serde(rename = "work_hours_start")]
    pub start: String,
    #[serde(rename = "work_hours_end")]
    pub end: String,
}

impl Default for WorkHours {
    fn default() -> Self {
        Self {
            start: "09:00".to_string(),
            end: "17:00".to_string(),
        }
    }
}

/// Interval lengths (minutes) and behavior flags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub posture_reminder_interval: u32,
    pub eye_exercise_interval: u32,
    pub stretch_reminder_interval: u32,
    pub work_session_length: u32,
    pub notifications_enabled: bool,
    pub sound_enabled: bool,
    #[serde(flatten)]
    pub work_hours: WorkHours,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            posture_reminder_interval: 3,
            eye_exercise_interval: 20,
            stretch_reminder_interval: 60,
            work_session_length: 25,
            notifications_enabled: true,
            sound_enabled: true,
            work_hours: WorkHours::default(),
        }
    }
}

impl Settings {
    /// Configured interval for a timer kind, in minutes
    pub fn interval_minutes(&self, kind: TimerKind) -> u32 {
        match kind.descriptor().interval {
            IntervalField::PostureReminderInterval => self.posture_reminder_interval,
            IntervalField::EyeExerciseInterval => self.eye_exercise_interval,
            IntervalField::StretchReminderInterval => self.stretch_reminder_interval,
            IntervalField::WorkSessionLength => self.work_session_length,
        }
    }

    /// Full countdown length for a timer kind
    pub fn reset_seconds(&self, kind: TimerKind) -> u32 {
        self.interval_minutes(kind).saturating_mul(60)
    }

    /// Merge a validated patch into these settings
    pub fn apply(&mut self, patch: &SettingsPatch) {
        for kind in TimerKind::ALL {
            if let Some(minutes) = patch.interval_minutes(kind) {
                *self.interval_mut(kind) = minutes;
            }
        }
        if let Some(enabled) = patch.notifications_enabled {
            self.notifications_enabled = enabled;
        }
        if let Some(enabled) = patch.sound_enabled {
            self.sound_enabled = enabled;
        }
        if let Some(start) = &patch.work_hours_start {
            self.work_hours.start = start.clone();
        }
        if let Some(end) = &patch.work_hours_end {
            self.work_hours.end = end.clone();
        }
    }

    fn interval_mut(&mut self, kind: TimerKind) -> &mut u32 {
        match kind.descriptor().interval {
            IntervalField::PostureReminderInterval => &mut self.posture_reminder_interval,
            IntervalField::EyeExerciseInterval => &mut self.eye_exercise_interval,
            IntervalField::StretchReminderInterval => &mut self.stretch_reminder_interval,
            IntervalField::WorkSessionLength => &mut self.work_session_length,
        }
    }
}

/// Rejected settings update
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("{field} must be between 1 and {max} minutes, got {value}")]
    IntervalOutOfRange {
        field: &'static str,
        value: u32,
        max: u32,
    },
    #[error("{field} must be a time formatted as HH:MM, got {value:?}")]
    InvalidTime { field: &'static str, value: String },
}

/// Partial settings update; absent fields keep their current value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SettingsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posture_reminder_interval: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eye_exercise_interval: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stretch_reminder_interval: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_session_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notifications_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sound_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_hours_start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_hours_end: Option<String>,
}

impl SettingsPatch {
    /// Interval carried by this patch for a kind, if any
    pub fn interval_minutes(&self, kind: TimerKind) -> Option<u32> {
        match kind.descriptor().interval {
            IntervalField::PostureReminderInterval => self.posture_reminder_interval,
            IntervalField::EyeExerciseInterval => self.eye_exercise_interval,
            IntervalField::StretchReminderInterval => self.stretch_reminder_interval,
            IntervalField::WorkSessionLength => self.work_session_length,
        }
    }

    /// Check every present field before anything is applied
    pub fn validate(&self) -> Result<(), SettingsError> {
        let intervals = [
            ("posture_reminder_interval", self.posture_reminder_interval),
            ("eye_exercise_interval", self.eye_exercise_interval),
            ("stretch_reminder_interval", self.stretch_reminder_interval),
            ("work_session_length", self.work_session_length),
        ];
        for (field, value) in intervals {
            if let Some(value) = value {
                if value == 0 || value > MAX_INTERVAL_MINUTES {
                    return Err(SettingsError::IntervalOutOfRange {
                        field,
                        value,
                        max: MAX_INTERVAL_MINUTES,
                    });
                }
            }
        }

        let times = [
            ("work_hours_start", &self.work_hours_start),
            ("work_hours_end", &self.work_hours_end),
        ];
        for (field, value) in times {
            if let Some(value) = value {
                if NaiveTime::parse_from_str(value, "%H:%M").is_err() {
                    return Err(SettingsError::InvalidTime {
                        field,
                        value: value.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    /// A patch carrying every field of `settings`
    pub fn full(settings: &Settings) -> Self {
        Self {
            posture_reminder_interval: Some(settings.posture_reminder_interval),
            eye_exercise_interval: Some(settings.eye_exercise_interval),
            stretch_reminder_interval: Some(settings.stretch_reminder_interval),
            work_session_length: Some(settings.work_session_length),
            notifications_enabled: Some(settings.notifications_enabled),
            sound_enabled: Some(settings.sound_enabled),
            work_hours_start: Some(settings.work_hours.start.clone()),
            work_hours_end: Some(settings.work_hours.end.clone()),
        }
    }

    /// Whether the patch changes any interval
    pub fn touches_intervals(&self) -> bool {
        TimerKind::ALL
            .into_iter()
            .any(|kind| self.interval_minutes(kind).is_some())
    }
}
