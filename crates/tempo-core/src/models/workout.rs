//! Workout model definition and related functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::Block;

/// Represents an individual workout session within a program.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Workout {
    /// Unique identifier for the workout
    pub id: u64,

    /// ID of the parent program
    pub program_id: u64,

    /// Brief title of the workout (e.g. "Upper Body A")
    pub title: String,

    /// Detailed multi-line description of the workout
    pub description: Option<String>,

    /// Order of the workout within the program (0-indexed)
    pub position: u32,

    /// Ordered blocks making up the session
    #[serde(default)]
    pub blocks: Vec<Block>,

    /// Timestamp when the workout was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the workout was last updated (UTC)
    pub updated_at: Timestamp,
}
