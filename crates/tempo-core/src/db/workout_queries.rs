//! Workout CRUD operations and queries.

use jiff::Timestamp;
use rusqlite::{params, types::Type, OptionalExtension};

use crate::{
    error::{DatabaseResultExt, Result, StudioError},
    models::{Block, Workout},
};

// Optimized SQL queries as const strings for compile-time optimization
const CHECK_PROGRAM_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM programs WHERE id = ?1)";
const GET_NEXT_WORKOUT_POSITION_SQL: &str =
    "SELECT COALESCE(MAX(workout_position), -1) + 1 FROM workouts WHERE program_id = ?1";
const GET_MAX_WORKOUT_POSITION_SQL: &str =
    "SELECT MAX(workout_position) FROM workouts WHERE program_id = ?1";
const INSERT_WORKOUT_SQL: &str = "INSERT INTO workouts (program_id, title, description, workout_position, blocks, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";
const UPDATE_PROGRAM_TIMESTAMP_SQL: &str = "UPDATE programs SET updated_at = ?1 WHERE id = ?2";
const UPDATE_PROGRAM_TIMESTAMP_BY_WORKOUT_SQL: &str =
    "UPDATE programs SET updated_at = ?1 WHERE id = (SELECT program_id FROM workouts WHERE id = ?2)";
const SHIFT_WORKOUT_POSITIONS_UP_SQL: &str = "UPDATE workouts SET workout_position = workout_position + 1 WHERE program_id = ?1 AND workout_position >= ?2";
const SHIFT_WORKOUT_POSITIONS_DOWN_SQL: &str = "UPDATE workouts SET workout_position = workout_position - 1 WHERE program_id = ?1 AND workout_position > ?2";
const SELECT_WORKOUT_DETAILS_SQL: &str =
    "SELECT title, description FROM workouts WHERE id = ?1";
const UPDATE_WORKOUT_SQL: &str =
    "UPDATE workouts SET title = ?1, description = ?2, updated_at = ?3 WHERE id = ?4";
const SELECT_WORKOUTS_BY_PROGRAM_SQL: &str = "SELECT id, program_id, title, description, workout_position, blocks, created_at, updated_at FROM workouts WHERE program_id = ?1 ORDER BY workout_position";
const SELECT_WORKOUT_BY_ID_SQL: &str = "SELECT id, program_id, title, description, workout_position, blocks, created_at, updated_at FROM workouts WHERE id = ?1";
const SELECT_WORKOUT_POSITION_SQL: &str =
    "SELECT program_id, workout_position FROM workouts WHERE id = ?1";
const UPDATE_WORKOUT_POSITION_TEMP_SQL: &str =
    "UPDATE workouts SET workout_position = -1, updated_at = ?1 WHERE id = ?2";
const UPDATE_WORKOUT_POSITION_SQL: &str =
    "UPDATE workouts SET workout_position = ?1, updated_at = ?2 WHERE id = ?3";
const DELETE_WORKOUT_SQL: &str = "DELETE FROM workouts WHERE id = ?1";

impl super::Database {
    /// Helper function to construct a Workout from a database row
    pub(super) fn build_workout_from_row(row: &rusqlite::Row) -> rusqlite::Result<Workout> {
        let blocks_json: String = row.get(5)?;
        let blocks: Vec<Block> = serde_json::from_str(&blocks_json).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e))
        })?;

        Ok(Workout {
            id: row.get::<_, i64>(0)? as u64,
            program_id: row.get::<_, i64>(1)? as u64,
            title: row.get(2)?,
            description: row.get(3)?,
            position: row.get::<_, i64>(4)? as u32,
            blocks,
            created_at: row.get::<_, String>(6)?.parse::<Timestamp>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(e))
            })?,
            updated_at: row
                .get::<_, String>(7)?
                .parse::<Timestamp>()
                .map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(7, Type::Text, Box::new(e))
                })?,
        })
    }

    /// Adds a new workout at the end of the specified program.
    pub fn add_workout(
        &mut self,
        program_id: u64,
        title: &str,
        description: Option<&str>,
    ) -> Result<Workout> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        // Check if program exists
        let program_exists: bool = tx
            .query_row(CHECK_PROGRAM_EXISTS_SQL, params![program_id as i64], |row| {
                row.get(0)
            })
            .map_err(|e| StudioError::database_error("Failed to check program existence", e))?;

        if !program_exists {
            return Err(StudioError::ProgramNotFound { id: program_id });
        }

        let next_position: i64 = tx
            .query_row(
                GET_NEXT_WORKOUT_POSITION_SQL,
                params![program_id as i64],
                |row| row.get(0),
            )
            .map_err(|e| StudioError::database_error("Failed to get next workout position", e))?;

        let now = Timestamp::now();
        let now_str = now.to_string();

        tx.execute(
            INSERT_WORKOUT_SQL,
            params![
                program_id as i64,
                title,
                description,
                next_position,
                "[]",
                &now_str,
                &now_str
            ],
        )
        .map_err(|e| StudioError::database_error("Failed to insert workout", e))?;

        let id = tx.last_insert_rowid() as u64;

        // Update program's updated_at
        tx.execute(
            UPDATE_PROGRAM_TIMESTAMP_SQL,
            params![&now_str, program_id as i64],
        )
        .map_err(|e| StudioError::database_error("Failed to update program timestamp", e))?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Workout {
            id,
            program_id,
            title: title.into(),
            description: description.map(String::from),
            position: next_position as u32,
            blocks: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Inserts a new workout at a specific position in the program's
    /// order. All workouts at or after the specified position have their
    /// position incremented.
    pub fn insert_workout(
        &mut self,
        program_id: u64,
        position: u32,
        title: &str,
        description: Option<&str>,
    ) -> Result<Workout> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        // Check if program exists
        let program_exists: bool = tx
            .query_row(CHECK_PROGRAM_EXISTS_SQL, params![program_id as i64], |row| {
                row.get(0)
            })
            .map_err(|e| StudioError::database_error("Failed to check program existence", e))?;

        if !program_exists {
            return Err(StudioError::ProgramNotFound { id: program_id });
        }

        let max_position: Option<i64> = tx
            .query_row(
                GET_MAX_WORKOUT_POSITION_SQL,
                params![program_id as i64],
                |row| row.get(0),
            )
            .map_err(|e| StudioError::database_error("Failed to get max workout position", e))?;

        // Validate position - allow inserting at the end (position == count)
        let workout_count = max_position.map(|m| m + 1).unwrap_or(0) as u32;
        if position > workout_count {
            return Err(StudioError::InvalidInput {
                field: "position".into(),
                reason: format!(
                    "Position {position} is out of range. Program has {workout_count} workouts"
                ),
            });
        }

        // Shift existing workouts to make room for the new one
        tx.execute(
            SHIFT_WORKOUT_POSITIONS_UP_SQL,
            params![program_id as i64, position as i64],
        )
        .map_err(|e| StudioError::database_error("Failed to shift workout positions", e))?;

        let now = Timestamp::now();
        let now_str = now.to_string();

        tx.execute(
            INSERT_WORKOUT_SQL,
            params![
                program_id as i64,
                title,
                description,
                position as i64,
                "[]",
                &now_str,
                &now_str
            ],
        )
        .map_err(|e| StudioError::database_error("Failed to insert workout", e))?;

        let id = tx.last_insert_rowid() as u64;

        tx.execute(
            UPDATE_PROGRAM_TIMESTAMP_SQL,
            params![&now_str, program_id as i64],
        )
        .map_err(|e| StudioError::database_error("Failed to update program timestamp", e))?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Workout {
            id,
            program_id,
            title: title.into(),
            description: description.map(String::from),
            position,
            blocks: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Updates workout details (title and/or description), preserving
    /// fields that are not provided.
    pub fn update_workout(
        &mut self,
        workout_id: u64,
        title: Option<&str>,
        description: Option<&str>,
    ) -> Result<()> {
        if title.is_none() && description.is_none() {
            return Ok(());
        }

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let (current_title, current_description): (String, Option<String>) = tx
            .query_row(SELECT_WORKOUT_DETAILS_SQL, params![workout_id as i64], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })
            .map_err(|e| {
                if matches!(e, rusqlite::Error::QueryReturnedNoRows) {
                    StudioError::WorkoutNotFound { id: workout_id }
                } else {
                    StudioError::database_error("Failed to get current workout", e)
                }
            })?;

        let new_title = title.map(String::from).unwrap_or(current_title);
        let new_description = description.map(String::from).or(current_description);
        let now_str = Timestamp::now().to_string();

        tx.execute(
            UPDATE_WORKOUT_SQL,
            params![&new_title, &new_description, &now_str, workout_id as i64],
        )
        .map_err(|e| StudioError::database_error("Failed to update workout", e))?;

        tx.execute(
            UPDATE_PROGRAM_TIMESTAMP_BY_WORKOUT_SQL,
            params![&now_str, workout_id as i64],
        )
        .map_err(|e| StudioError::database_error("Failed to update program timestamp", e))?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(())
    }

    /// Retrieves all workouts for a given program, in program order.
    pub fn get_workouts(&self, program_id: u64) -> Result<Vec<Workout>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_WORKOUTS_BY_PROGRAM_SQL)
            .map_err(|e| StudioError::database_error("Failed to prepare query", e))?;

        let workouts = stmt
            .query_map(params![program_id as i64], Self::build_workout_from_row)
            .map_err(|e| StudioError::database_error("Failed to query workouts", e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| StudioError::database_error("Failed to fetch workouts", e))?;

        Ok(workouts)
    }

    /// Retrieves a single workout by its ID.
    pub fn get_workout(&self, workout_id: u64) -> Result<Option<Workout>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_WORKOUT_BY_ID_SQL)
            .map_err(|e| StudioError::database_error("Failed to prepare query", e))?;

        let workout = stmt
            .query_row(params![workout_id as i64], Self::build_workout_from_row)
            .optional()
            .map_err(|e| StudioError::database_error("Failed to get workout", e))?;

        Ok(workout)
    }

    /// Swaps the order of two workouts within the same program.
    pub fn swap_workouts(&mut self, workout_id1: u64, workout_id2: u64) -> Result<()> {
        // Don't do anything if swapping with self
        if workout_id1 == workout_id2 {
            return Ok(());
        }

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let (program_id1, position1): (i64, i64) = tx
            .query_row(
                SELECT_WORKOUT_POSITION_SQL,
                params![workout_id1 as i64],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .map_err(|e| {
                if matches!(e, rusqlite::Error::QueryReturnedNoRows) {
                    StudioError::WorkoutNotFound { id: workout_id1 }
                } else {
                    StudioError::database_error("Failed to query first workout", e)
                }
            })?;

        let (program_id2, position2): (i64, i64) = tx
            .query_row(
                SELECT_WORKOUT_POSITION_SQL,
                params![workout_id2 as i64],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .map_err(|e| {
                if matches!(e, rusqlite::Error::QueryReturnedNoRows) {
                    StudioError::WorkoutNotFound { id: workout_id2 }
                } else {
                    StudioError::database_error("Failed to query second workout", e)
                }
            })?;

        // Verify both workouts are in the same program
        if program_id1 != program_id2 {
            return Err(StudioError::InvalidInput {
                field: "workout_ids".into(),
                reason: "Workouts must be from the same program to swap".into(),
            });
        }

        let now_str = Timestamp::now().to_string();

        // Use a temporary negative value to avoid position collisions
        tx.execute(
            UPDATE_WORKOUT_POSITION_TEMP_SQL,
            params![&now_str, workout_id1 as i64],
        )
        .map_err(|e| StudioError::database_error("Failed to update first workout position", e))?;

        tx.execute(
            UPDATE_WORKOUT_POSITION_SQL,
            params![position1, &now_str, workout_id2 as i64],
        )
        .map_err(|e| StudioError::database_error("Failed to update second workout position", e))?;

        tx.execute(
            UPDATE_WORKOUT_POSITION_SQL,
            params![position2, &now_str, workout_id1 as i64],
        )
        .map_err(|e| {
            StudioError::database_error("Failed to update first workout final position", e)
        })?;

        tx.execute(UPDATE_PROGRAM_TIMESTAMP_SQL, params![&now_str, program_id1])
            .map_err(|e| StudioError::database_error("Failed to update program timestamp", e))?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(())
    }

    /// Removes a workout from a program.
    pub fn remove_workout(&mut self, workout_id: u64) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let (program_id, position): (i64, i64) = tx
            .query_row(
                SELECT_WORKOUT_POSITION_SQL,
                params![workout_id as i64],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .map_err(|e| {
                if matches!(e, rusqlite::Error::QueryReturnedNoRows) {
                    StudioError::WorkoutNotFound { id: workout_id }
                } else {
                    StudioError::database_error("Failed to query workout", e)
                }
            })?;

        // Delete the workout
        tx.execute(DELETE_WORKOUT_SQL, params![workout_id as i64])
            .map_err(|e| StudioError::database_error("Failed to delete workout", e))?;

        // Close the gap left in the position sequence
        tx.execute(
            SHIFT_WORKOUT_POSITIONS_DOWN_SQL,
            params![program_id, position],
        )
        .map_err(|e| StudioError::database_error("Failed to shift workout positions", e))?;

        // Update program's updated_at
        let now_str = Timestamp::now().to_string();
        tx.execute(UPDATE_PROGRAM_TIMESTAMP_SQL, params![&now_str, program_id])
            .map_err(|e| StudioError::database_error("Failed to update program timestamp", e))?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(())
    }
}
