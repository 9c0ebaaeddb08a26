//! Program operations for the Studio.

use tokio::task;

use super::Studio;
use crate::{
    db::Database,
    error::{Result, StudioError},
    models::{Program, ProgramFilter},
    params::{CreateProgram, Id, SearchPrograms},
};

impl Studio {
    /// Creates a new program with the given title, optional description,
    /// and optional client name.
    pub async fn create_program(&self, params: &CreateProgram) -> Result<Program> {
        let db_path = self.db_path.clone();
        let title = params.title.clone();
        let description = params.description.clone();
        let client = params.client.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.create_program(&title, description.as_deref(), client.as_deref())
        })
        .await
        .map_err(|e| StudioError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Retrieves a program by its ID, workouts included.
    pub async fn get_program(&self, params: &Id) -> Result<Option<Program>> {
        let db_path = self.db_path.clone();
        let program_id = params.id;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_program(program_id)
        })
        .await
        .map_err(|e| StudioError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Lists all programs with optional filtering.
    pub async fn list_programs(&self, filter: Option<ProgramFilter>) -> Result<Vec<Program>> {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.list_programs(filter.as_ref())
        })
        .await
        .map_err(|e| StudioError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Search for programs written for a specific client.
    pub async fn search_programs_by_client(&self, params: &SearchPrograms) -> Result<Vec<Program>> {
        let filter = ProgramFilter::for_client(params.client.clone(), params.archived);
        self.list_programs(Some(filter)).await
    }

    /// Archives a program (soft delete).
    /// Returns the archived program if it exists, None otherwise.
    pub async fn archive_program(&self, params: &Id) -> Result<Option<Program>> {
        let db_path = self.db_path.clone();
        let program_id = params.id;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.archive_program(program_id)
        })
        .await
        .map_err(|e| StudioError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Unarchives a program (restores from archive).
    /// Returns the unarchived program if it exists, None otherwise.
    pub async fn unarchive_program(&self, params: &Id) -> Result<Option<Program>> {
        let db_path = self.db_path.clone();
        let program_id = params.id;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.unarchive_program(program_id)
        })
        .await
        .map_err(|e| StudioError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Permanently deletes a program and all its associated workouts.
    /// This operation cannot be undone.
    pub async fn delete_program_by_id(&self, params: &Id) -> Result<()> {
        let db_path = self.db_path.clone();
        let program_id = params.id;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.delete_program(program_id)
        })
        .await
        .map_err(|e| StudioError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Persists a whole program tree, replacing its stored workouts.
    /// Returns the program as stored, with fresh workout ids.
    pub async fn save_program(&self, program: Program) -> Result<Program> {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.save_program(&program)
        })
        .await
        .map_err(|e| StudioError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}
