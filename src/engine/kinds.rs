//! Timer kinds and the per-kind descriptor table

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// The four reminder categories driven by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimerKind {
    Posture,
    Eye,
    Stretch,
    WorkSession,
}

impl TimerKind {
    /// Every kind, in board order
    pub const ALL: [TimerKind; 4] = [
        TimerKind::Posture,
        TimerKind::Eye,
        TimerKind::Stretch,
        TimerKind::WorkSession,
    ];

    /// Position of this kind inside a timer board
    pub const fn index(self) -> usize {
        match self {
            TimerKind::Posture => 0,
            TimerKind::Eye => 1,
            TimerKind::Stretch => 2,
            TimerKind::WorkSession => 3,
        }
    }

    /// Wire name used in URLs and JSON
    pub const fn as_str(self) -> &'static str {
        match self {
            TimerKind::Posture => "posture",
            TimerKind::Eye => "eye",
            TimerKind::Stretch => "stretch",
            TimerKind::WorkSession => "workSession",
        }
    }

    /// Static descriptor for this kind
    pub fn descriptor(self) -> &'static KindDescriptor {
        &DESCRIPTORS[self.index()]
    }
}

impl fmt::Display for TimerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimerKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("Unknown timer kind: {}", s))
    }
}

/// Session counter bumped when a reminder completes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    PostureReminder,
    EyeExercise,
    Stretch,
    Break,
}

impl ActivityType {
    pub const fn as_str(self) -> &'static str {
        match self {
            ActivityType::PostureReminder => "posture_reminder",
            ActivityType::EyeExercise => "eye_exercise",
            ActivityType::Stretch => "stretch",
            ActivityType::Break => "break",
        }
    }

    /// Human readable label, e.g. "Posture Reminder"
    pub fn label(self) -> String {
        self.as_str()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "posture_reminder" => Ok(ActivityType::PostureReminder),
            "eye_exercise" => Ok(ActivityType::EyeExercise),
            "stretch" => Ok(ActivityType::Stretch),
            "break" => Ok(ActivityType::Break),
            _ => Err(format!("Invalid activity type: {}", s)),
        }
    }
}

/// Settings field holding the interval for a kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalField {
    PostureReminderInterval,
    EyeExerciseInterval,
    StretchReminderInterval,
    WorkSessionLength,
}

/// Everything the engine needs to know about a kind: what to say when it
/// fires, what to log, and which setting drives its reset value.
#[derive(Debug)]
pub struct KindDescriptor {
    pub kind: TimerKind,
    pub title: &'static str,
    pub message: &'static str,
    pub activity: ActivityType,
    pub interval: IntervalField,
}

static DESCRIPTORS: [KindDescriptor; 4] = [
    KindDescriptor {
        kind: TimerKind::Posture,
        title: "Posture Check! 🚨",
        message: "Time to check your posture. Sit up straight and align your shoulders!",
        activity: ActivityType::PostureReminder,
        interval: IntervalField::PostureReminderInterval,
    },
    KindDescriptor {
        kind: TimerKind::Eye,
        title: "Eye Exercise Time! 👀",
        message: "You've been working for a while. Time for the 20-20-20 rule!",
        activity: ActivityType::EyeExercise,
        interval: IntervalField::EyeExerciseInterval,
    },
    KindDescriptor {
        kind: TimerKind::Stretch,
        title: "Stretch Break! 🤸‍♀️",
        message: "Time to get up and stretch! Your body will thank you.",
        activity: ActivityType::Stretch,
        interval: IntervalField::StretchReminderInterval,
    },
    KindDescriptor {
        kind: TimerKind::WorkSession,
        title: "Work Session Complete! ✅",
        message: "Great job! Take a well-deserved break.",
        activity: ActivityType::Break,
        interval: IntervalField::WorkSessionLength,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_table_is_indexed_by_kind() {
        for kind in TimerKind::ALL {
            assert_eq!(kind.descriptor().kind, kind);
        }
    }

    #[test]
    fn kinds_parse_from_wire_names() {
        assert_eq!("workSession".parse::<TimerKind>(), Ok(TimerKind::WorkSession));
        assert!("work_session".parse::<TimerKind>().is_err());
        let json = serde_json::to_string(&TimerKind::WorkSession).unwrap();
        assert_eq!(json, "\"workSession\"");
    }

    #[test]
    fn activity_labels_are_title_cased() {
        assert_eq!(ActivityType::PostureReminder.label(), "Posture Reminder");
        assert_eq!(ActivityType::Break.label(), "Break");
        assert_eq!("eye_exercise".parse::<ActivityType>(), Ok(ActivityType::EyeExercise));
        assert!("nap".parse::<ActivityType>().is_err());
    }
}
