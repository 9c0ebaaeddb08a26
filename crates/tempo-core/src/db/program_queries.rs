//! Program CRUD operations and queries.

use jiff::Timestamp;
use rusqlite::{params, types::Type, OptionalExtension};

use crate::{
    error::{DatabaseResultExt, Result, StudioError},
    models::{Program, ProgramFilter, ProgramStatus},
};

// Optimized SQL queries as const strings for compile-time optimization
const INSERT_PROGRAM_SQL: &str = "INSERT INTO programs (title, description, client, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5)";
const PROGRAM_COLUMNS: &str =
    "id, title, description, client, status, revision, created_at, updated_at";
const CHECK_PROGRAM_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM programs WHERE id = ?1)";
const UPDATE_PROGRAM_STATUS_SQL: &str =
    "UPDATE programs SET status = ?1, updated_at = ?2 WHERE id = ?3 AND status = ?4";
const DELETE_PROGRAM_WORKOUTS_SQL: &str = "DELETE FROM workouts WHERE program_id = ?1";
const DELETE_PROGRAM_SQL: &str = "DELETE FROM programs WHERE id = ?1";
const UPDATE_PROGRAM_SQL: &str = "UPDATE programs SET title = ?1, description = ?2, client = ?3, status = ?4, revision = ?5, updated_at = ?6 WHERE id = ?7";
const INSERT_SAVED_WORKOUT_SQL: &str = "INSERT INTO workouts (program_id, title, description, workout_position, blocks, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";

impl super::Database {
    /// Helper function to construct a Program (without workouts) from a
    /// database row laid out as [`PROGRAM_COLUMNS`].
    fn build_program_from_row(row: &rusqlite::Row) -> rusqlite::Result<Program> {
        let status_str: String = row.get(4)?;
        let status = status_str.parse::<ProgramStatus>().map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                4,
                Type::Text,
                format!("Invalid status: {status_str}").into(),
            )
        })?;

        Ok(Program {
            id: row.get::<_, i64>(0)? as u64,
            title: row.get(1)?,
            description: row.get(2)?,
            client: row.get(3)?,
            status,
            revision: row.get::<_, i64>(5)? as u64,
            created_at: row.get::<_, String>(6)?.parse::<Timestamp>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(e))
            })?,
            updated_at: row.get::<_, String>(7)?.parse::<Timestamp>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(7, Type::Text, Box::new(e))
            })?,
            workouts: Vec::new(),
        })
    }

    /// Creates a new program with the given title, optional description,
    /// and optional client name.
    pub fn create_program(
        &mut self,
        title: &str,
        description: Option<&str>,
        client: Option<&str>,
    ) -> Result<Program> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now();
        let now_str = now.to_string();

        tx.execute(
            INSERT_PROGRAM_SQL,
            params![title, description, client, &now_str, &now_str],
        )
        .map_err(|e| StudioError::database_error("Failed to insert program", e))?;

        let id = tx.last_insert_rowid() as u64;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Program {
            id,
            title: title.into(),
            description: description.map(String::from),
            client: client.map(String::from),
            status: ProgramStatus::Active,
            revision: 0,
            created_at: now,
            updated_at: now,
            workouts: Vec::new(),
        })
    }

    /// Retrieves a program by its ID, with workouts eagerly loaded.
    pub fn get_program(&self, id: u64) -> Result<Option<Program>> {
        let query = format!("SELECT {PROGRAM_COLUMNS} FROM programs WHERE id = ?1");
        let mut stmt = self
            .connection
            .prepare(&query)
            .map_err(|e| StudioError::database_error("Failed to prepare query", e))?;

        let mut program = stmt
            .query_row(params![id as i64], Self::build_program_from_row)
            .optional()
            .map_err(|e| StudioError::database_error("Failed to query program", e))?;

        if let Some(ref mut program) = program {
            program.workouts = self.get_workouts(program.id)?;
        }

        Ok(program)
    }

    /// Lists all programs with optional filtering, workouts eagerly
    /// loaded.
    pub fn list_programs(&self, filter: Option<&ProgramFilter>) -> Result<Vec<Program>> {
        let mut query = format!("SELECT {PROGRAM_COLUMNS} FROM programs");

        let mut conditions = Vec::new();
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(f) = filter {
            if let Some(ref title) = f.title_contains {
                conditions.push("title LIKE ?");
                params_vec.push(Box::new(format!("%{title}%")));
            }

            if let Some(ref client) = f.client {
                conditions.push("client = ?");
                params_vec.push(Box::new(client.clone()));
            }

            if let Some(ref after) = f.created_after {
                conditions.push("created_at >= ?");
                params_vec.push(Box::new(after.to_string()));
            }

            if let Some(ref before) = f.created_before {
                conditions.push("created_at <= ?");
                params_vec.push(Box::new(before.to_string()));
            }

            // Filter by specific status unless all statuses are wanted
            if let Some(ref status) = f.status {
                conditions.push("status = ?");
                params_vec.push(Box::new(status.as_str().to_string()));
            }
        }

        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }

        query.push_str(" ORDER BY created_at DESC");

        let mut stmt = self
            .connection
            .prepare(&query)
            .map_err(|e| StudioError::database_error("Failed to prepare query", e))?;

        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|b| &**b).collect();

        let mut programs: Vec<Program> = stmt
            .query_map(&params_refs[..], Self::build_program_from_row)
            .map_err(|e| StudioError::database_error("Failed to query programs", e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| StudioError::database_error("Failed to fetch programs", e))?;

        // Eagerly load workouts for each program
        for program in &mut programs {
            program.workouts = self.get_workouts(program.id)?;
        }

        Ok(programs)
    }

    /// Archives a program (soft delete).
    /// Returns the archived program details if successful, None if the
    /// program doesn't exist.
    pub fn archive_program(&mut self, id: u64) -> Result<Option<Program>> {
        self.set_program_status(id, ProgramStatus::Active, ProgramStatus::Archived)
    }

    /// Unarchives a program (restores from archive).
    /// Returns the unarchived program details if successful, None if the
    /// program doesn't exist.
    pub fn unarchive_program(&mut self, id: u64) -> Result<Option<Program>> {
        self.set_program_status(id, ProgramStatus::Archived, ProgramStatus::Active)
    }

    /// Transitions a program between statuses. A program already in the
    /// target status is returned unchanged.
    fn set_program_status(
        &mut self,
        id: u64,
        from: ProgramStatus,
        to: ProgramStatus,
    ) -> Result<Option<Program>> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now().to_string();
        let rows_affected = tx
            .execute(
                UPDATE_PROGRAM_STATUS_SQL,
                params![to.as_str(), &now, id as i64, from.as_str()],
            )
            .map_err(|e| StudioError::database_error("Failed to update program status", e))?;

        if rows_affected == 0 {
            let exists: bool = tx
                .query_row(CHECK_PROGRAM_EXISTS_SQL, params![id as i64], |row| {
                    row.get(0)
                })
                .map_err(|e| StudioError::database_error("Failed to check program existence", e))?;

            if !exists {
                return Ok(None);
            }
            // Program exists but is already in the target status - still
            // return its details
        }

        tx.commit().db_context("Failed to commit transaction")?;

        self.get_program(id)
    }

    /// Permanently deletes a program and all its associated workouts from
    /// the database. This operation cannot be undone.
    pub fn delete_program(&mut self, id: u64) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let exists: bool = tx
            .query_row(CHECK_PROGRAM_EXISTS_SQL, params![id as i64], |row| {
                row.get(0)
            })
            .map_err(|e| StudioError::database_error("Failed to check program existence", e))?;

        if !exists {
            return Err(StudioError::ProgramNotFound { id });
        }

        // Delete all workouts associated with this program first
        // (Foreign key constraints should handle this automatically, but
        // we'll be explicit)
        tx.execute(DELETE_PROGRAM_WORKOUTS_SQL, params![id as i64])
            .map_err(|e| StudioError::database_error("Failed to delete program workouts", e))?;

        tx.execute(DELETE_PROGRAM_SQL, params![id as i64])
            .map_err(|e| StudioError::database_error("Failed to delete program", e))?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(())
    }

    /// Persists a whole program tree, replacing its stored workouts.
    ///
    /// This is the write half of the diff workflow: the applier produces
    /// the next in-memory program and this call makes it durable. Workout
    /// rows are rewritten in program order (newly added workouts get
    /// fresh ids) and the program row carries the new revision. Returns
    /// the persisted program as stored.
    pub fn save_program(&mut self, program: &Program) -> Result<Program> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let exists: bool = tx
            .query_row(CHECK_PROGRAM_EXISTS_SQL, params![program.id as i64], |row| {
                row.get(0)
            })
            .map_err(|e| StudioError::database_error("Failed to check program existence", e))?;

        if !exists {
            return Err(StudioError::ProgramNotFound { id: program.id });
        }

        let now_str = Timestamp::now().to_string();

        tx.execute(
            UPDATE_PROGRAM_SQL,
            params![
                &program.title,
                &program.description,
                &program.client,
                program.status.as_str(),
                program.revision as i64,
                &now_str,
                program.id as i64
            ],
        )
        .map_err(|e| StudioError::database_error("Failed to update program", e))?;

        tx.execute(DELETE_PROGRAM_WORKOUTS_SQL, params![program.id as i64])
            .map_err(|e| StudioError::database_error("Failed to clear stored workouts", e))?;

        for (position, workout) in program.workouts.iter().enumerate() {
            let blocks_json = serde_json::to_string(&workout.blocks)?;
            tx.execute(
                INSERT_SAVED_WORKOUT_SQL,
                params![
                    program.id as i64,
                    &workout.title,
                    &workout.description,
                    position as i64,
                    &blocks_json,
                    &workout.created_at.to_string(),
                    &now_str
                ],
            )
            .map_err(|e| StudioError::database_error("Failed to store workout", e))?;
        }

        tx.commit().db_context("Failed to commit transaction")?;

        self.get_program(program.id)?
            .ok_or(StudioError::ProgramNotFound { id: program.id })
    }
}
