//! Program model definition and related functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{ProgramStatus, Workout};

/// Represents a complete training program with metadata and workouts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Program {
    /// Unique identifier for the program
    pub id: u64,

    /// Title of the program
    pub title: String,

    /// Detailed multi-line description of the program
    pub description: Option<String>,

    /// Name of the client this program is written for
    pub client: Option<String>,

    /// Status of the program (active or archived)
    #[serde(default)]
    pub status: ProgramStatus,

    /// Revision counter, bumped on every persisted mutation. Review
    /// sessions use this as the staleness marker when accepting changes.
    #[serde(default)]
    pub revision: u64,

    /// Timestamp when the program was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the program was last modified (UTC)
    pub updated_at: Timestamp,

    /// Associated workouts in program order
    #[serde(default)]
    pub workouts: Vec<Workout>,
}
