//! Block model: the tagged union of exercise and circuit entries.

use serde::{Deserialize, Serialize};

/// One entry in a workout: either a single exercise or a named circuit.
///
/// The serialized form carries a `type` discriminant (`"exercise"` or
/// `"circuit"`), which is also the shape the diff protocol validates
/// incoming payloads against.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Block {
    /// A single exercise with set/rep prescription
    Exercise(Exercise),
    /// A named group of exercises performed for rounds
    Circuit(Circuit),
}

impl Block {
    /// Short label used when listing blocks.
    pub fn name(&self) -> &str {
        match self {
            Block::Exercise(exercise) => &exercise.name,
            Block::Circuit(circuit) => &circuit.name,
        }
    }
}

/// A single exercise prescription.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    /// Exercise name (e.g. "Back Squat")
    pub name: String,

    /// Number of sets
    pub sets: u32,

    /// Repetitions per set
    pub reps: u32,

    /// Working weight in kilograms
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,

    /// Rest between sets in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rest_seconds: Option<u32>,

    /// Coaching notes (tempo, cues, substitutions)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A circuit: a named group of exercises repeated for a number of rounds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Circuit {
    /// Circuit name (e.g. "Finisher")
    pub name: String,

    /// Number of rounds through the exercise list
    pub rounds: u32,

    /// Rest between rounds in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rest_seconds: Option<u32>,

    /// Ordered member exercises
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}
