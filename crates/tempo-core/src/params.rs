//! Parameter structures for Tempo operations
//!
//! This module contains shared parameter structures that can be used
//! across different interfaces (CLI, MCP, etc.) without framework-specific
//! derives or dependencies. These structures provide a clean interface for
//! passing data between different layers of the application.
//!
//! ## Architecture: Parameter Wrapper Pattern
//!
//! Core parameter structures stay free of interface framework concerns:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │   MCP Params    │    │  Core Params    │
//! │  (clap derives) │───▶│ (serde derives) │───▶│ (minimal deps)  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Interface layers wrap these types to add their own derives (clap's
//! `Args`, MCP's `JsonSchema`) and convert via `From`/accessors, so JSON
//! schema generation stays behind the `schema` feature and the core keeps
//! compiling without it.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Generic parameters for operations requiring just an ID.
///
/// Used for operations like show_program, archive_program,
/// unarchive_program, show_workout, remove_workout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// Parameters for creating a new program.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreateProgram {
    /// Title of the program (required)
    pub title: String,
    /// Optional detailed description of the program
    pub description: Option<String>,
    /// Optional client name the program is written for
    pub client: Option<String>,
}

/// Parameters for listing programs.
///
/// Controls whether to show archived or active programs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListPrograms {
    /// Whether to show archived programs instead of active ones
    #[serde(default)]
    pub archived: bool,
}

/// Parameters for searching programs by client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SearchPrograms {
    /// Client name to search programs for
    pub client: String,
    /// Whether to include archived programs in search results
    #[serde(default)]
    pub archived: bool,
}

/// Parameters for permanently deleting a program.
///
/// Deletion requires explicit confirmation to prevent accidents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct DeleteProgram {
    /// The ID of the program to delete
    pub id: u64,
    /// Must be true for the deletion to proceed
    #[serde(default)]
    pub confirmed: bool,
}

/// Base parameters for workout creation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct WorkoutCreate {
    /// ID of the program to add the workout to
    pub program_id: u64,
    /// Title of the workout (required)
    pub title: String,
    /// Optional detailed description of the workout
    pub description: Option<String>,
}

/// Parameters for inserting a workout at a specific position.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct InsertWorkout {
    /// Base workout creation parameters
    #[serde(flatten)]
    pub workout: WorkoutCreate,
    /// Position to insert the workout (0-indexed)
    pub position: u32,
}

/// Parameters for updating an existing workout.
///
/// Allows partial updates; fields left out keep their current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdateWorkout {
    /// Workout ID to update (required)
    pub id: u64,
    /// Updated title of the workout
    pub title: Option<String>,
    /// Updated detailed description of the workout
    pub description: Option<String>,
}

/// Parameters for swapping the order of two workouts.
///
/// Both workouts must belong to the same program.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SwapWorkouts {
    /// ID of the first workout to swap
    pub workout1_id: u64,
    /// ID of the second workout to swap
    pub workout2_id: u64,
}

/// Parameters for proposing assistant-emitted changes to a program.
///
/// `fragments` is the *cumulative* fragment sequence for the current
/// assistant turn; the decoder only interprets fragments it has not seen
/// yet, so callers resend the whole sequence as it grows.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ProposeChanges {
    /// ID of the program the changes target
    pub program_id: u64,
    /// Cumulative fragment sequence for this assistant turn
    #[serde(default)]
    pub fragments: Vec<serde_json::Value>,
}
