//! Database operations and SQLite management for programs and workouts.
//!
//! This module provides low-level database operations for the Tempo
//! training system. It handles SQLite database connections, schema
//! management, and provides specialized query interfaces for programs and
//! workouts. Block lists are stored as JSON documents inside the workout
//! rows, so the diff applier's output persists in one shape.

use std::path::Path;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod migrations;
pub mod program_queries;
pub mod workout_queries;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
