//! High-level studio API for managing programs and reviewing changes.
//!
//! This module provides the main [`Studio`] interface for interacting with
//! the Tempo training system. The studio acts as the central coordinator
//! between the application layers and the database, implementing the
//! business logic for program and workout operations plus the diff review
//! workflow.
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    Handlers     │    │   Operations    │    │    Database     │
//! │ (program_       │───▶│ (program_ops,   │───▶│   (via db/)     │
//! │  handlers)      │    │  workout_ops)   │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!     User Interface      Business Logic         Data Persistence
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for creating [`Studio`] instances with
//!   configuration
//! - [`program_ops`]: Program database operations (create, get, list,
//!   archive, save, etc.)
//! - [`workout_ops`]: Workout database operations (add, insert, update,
//!   swap, etc.)
//! - [`program_handlers`]: High-level operations returning formatted
//!   wrapper types
//! - [`review`]: The [`ReviewSession`] wiring the diff pipeline to
//!   persistence
//!
//! ## Design Principles
//!
//! 1. **Async First**: All operations are async-compatible; SQLite work
//!    runs on a blocking task
//! 2. **Error Propagation**: Comprehensive error handling with context
//! 3. **Transaction Safety**: Database operations use proper transaction
//!    boundaries
//! 4. **Owned Review State**: a review session is an explicit value owned
//!    by its caller, not process-global state

use std::path::PathBuf;

// Module declarations
pub mod builder;
pub mod program_handlers;
pub mod program_ops;
pub mod review;
pub mod workout_ops;

#[cfg(test)]
mod tests;

// Re-export the main types
pub use builder::StudioBuilder;
pub use review::ReviewSession;

/// Main studio interface for managing programs and workouts.
pub struct Studio {
    pub(crate) db_path: PathBuf,
}

impl Studio {
    /// Creates a new studio with the specified database path.
    pub(crate) fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }
}
