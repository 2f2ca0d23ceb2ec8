//! Built-in guided exercises

use serde::Serialize;

/// A short guided exercise shown alongside a reminder
#[derive(Debug, Clone, Serialize)]
pub struct Exercise {
    pub id: &'static str,
    /// posture, eye or stretch
    pub category: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Seconds
    pub duration: u32,
    pub instructions: &'static [&'static str],
}

static CATALOG: [Exercise; 6] = [
    Exercise {
        id: "posture-shoulder-roll",
        category: "posture",
        name: "Shoulder Roll",
        description: "Roll your shoulders backwards 5 times, then forward 5 times",
        duration: 30,
        instructions: &[
            "Sit up straight",
            "Roll shoulders back slowly",
            "Roll shoulders forward slowly",
            "Repeat 5 times each direction",
        ],
    },
    Exercise {
        id: "posture-neck-stretch",
        category: "posture",
        name: "Neck Stretch",
        description: "Gently stretch your neck to relieve tension",
        duration: 45,
        instructions: &[
            "Sit up straight",
            "Slowly tilt head to right shoulder",
            "Hold for 15 seconds",
            "Repeat on left side",
            "Gently roll head in circle",
        ],
    },
    Exercise {
        id: "eye-20-20-20",
        category: "eye",
        name: "20-20-20 Rule",
        description: "Look at something 20 feet away for 20 seconds",
        duration: 20,
        instructions: &[
            "Find an object 20 feet away",
            "Focus on it for 20 seconds",
            "Blink slowly several times",
            "Return to work",
        ],
    },
    Exercise {
        id: "eye-circles",
        category: "eye",
        name: "Eye Circles",
        description: "Move your eyes in circular motions",
        duration: 30,
        instructions: &[
            "Close your eyes",
            "Move eyes in clockwise circles 5 times",
            "Move eyes counter-clockwise 5 times",
            "Blink rapidly 10 times",
        ],
    },
    Exercise {
        id: "stretch-desk",
        category: "stretch",
        name: "Desk Stretch",
        description: "Simple stretches you can do at your desk",
        duration: 60,
        instructions: &[
            "Stand up and reach arms overhead",
            "Stretch side to side",
            "Touch toes gently",
            "Twist torso left and right",
            "Take 3 deep breaths",
        ],
    },
    Exercise {
        id: "stretch-back-extension",
        category: "stretch",
        name: "Back Extension",
        description: "Counter the forward hunched position",
        duration: 45,
        instructions: &[
            "Stand with hands on lower back",
            "Gently arch backwards",
            "Hold for 10 seconds",
            "Return to neutral",
            "Repeat 3 times",
        ],
    },
];

pub fn all() -> &'static [Exercise] {
    &CATALOG
}

pub fn by_category(category: &str) -> Vec<&'static Exercise> {
    CATALOG
        .iter()
        .filter(|exercise| exercise.category == category)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_has_two_exercises() {
        for category in ["posture", "eye", "stretch"] {
            assert_eq!(by_category(category).len(), 2, "{}", category);
        }
        assert!(by_category("nap").is_empty());
        assert_eq!(all().len(), 6);
    }
}
