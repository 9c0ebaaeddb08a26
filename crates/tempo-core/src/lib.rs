//! Core library for the Tempo training application.
//!
//! This crate provides the core business logic for managing training
//! programs and their workouts, including database operations, data
//! models, the assistant diff-review protocol, and error handling.
//!
//! # Review Workflow
//!
//! The distinguishing piece of this crate is the diff review pipeline in
//! [`diff`]: an AI assistant streams proposed edits as fragments, a
//! [`studio::ReviewSession`] accumulates them into a pending batch, and
//! accepting the batch applies it to the stored program. Per-change
//! conflicts are reported, never fatal.
//!
//! # Quick Start
//!
//! ```rust
//! use tempo_core::{params::CreateProgram, StudioBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Create a studio instance
//! let studio = StudioBuilder::new()
//!     .with_database_path(Some("test.db"))
//!     .build()
//!     .await?;
//!
//! // Create a new program
//! let create_params = CreateProgram {
//!     title: "Strength Base".to_string(),
//!     description: Some("Three-day full body block".to_string()),
//!     client: Some("Alex".to_string()),
//! };
//!
//! let program = studio.create_program(&create_params).await?;
//! println!("Created program: {}", program);
//!
//! // List programs as summaries
//! use tempo_core::params::ListPrograms;
//! let programs = studio.list_programs_summary(&ListPrograms::default()).await?;
//! for program in &programs {
//!     println!("Program: {}", program.title);
//! }
//! # Ok(())
//! # }
//! ```

pub mod db;
pub mod diff;
pub mod display;
pub mod error;
pub mod models;
pub mod params;
pub mod studio;

// Re-export commonly used types
pub use db::Database;
pub use diff::{
    apply_batch, ApplyOutcome, Change, DiffStore, PendingDiff, ProposePolicy, StreamDecoder,
    TargetPath,
};
pub use display::{
    CreateResult, DeleteResult, OperationStatus, PendingChanges, ProgramSummaries, UpdateResult,
    Workouts,
};
pub use error::{Result, StudioError};
pub use models::{
    Block, Circuit, Exercise, Program, ProgramFilter, ProgramStatus, ProgramSummary, Workout,
};
pub use params::{
    CreateProgram, DeleteProgram, Id, InsertWorkout, ListPrograms, ProposeChanges, SearchPrograms,
    SwapWorkouts, UpdateWorkout, WorkoutCreate,
};
pub use studio::{ReviewSession, Studio, StudioBuilder};
