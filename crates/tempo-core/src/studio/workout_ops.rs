//! Workout operations for the Studio.

use tokio::task;

use super::Studio;
use crate::{
    db::Database,
    error::{Result, StudioError},
    models::Workout,
    params::{Id, InsertWorkout, SwapWorkouts, UpdateWorkout, WorkoutCreate},
};

impl Studio {
    /// Adds a new workout at the end of the specified program.
    pub async fn add_workout(&self, params: &WorkoutCreate) -> Result<Workout> {
        let db_path = self.db_path.clone();
        let title = params.title.clone();
        let description = params.description.clone();
        let program_id = params.program_id;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.add_workout(program_id, &title, description.as_deref())
        })
        .await
        .map_err(|e| StudioError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Inserts a new workout at a specific position in the program's
    /// order.
    pub async fn insert_workout(&self, params: &InsertWorkout) -> Result<Workout> {
        let db_path = self.db_path.clone();
        let title = params.workout.title.clone();
        let description = params.workout.description.clone();
        let program_id = params.workout.program_id;
        let position = params.position;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.insert_workout(program_id, position, &title, description.as_deref())
        })
        .await
        .map_err(|e| StudioError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Updates workout details (title and/or description).
    pub async fn update_workout(&self, params: &UpdateWorkout) -> Result<()> {
        let db_path = self.db_path.clone();
        let workout_id = params.id;
        let title = params.title.clone();
        let description = params.description.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.update_workout(workout_id, title.as_deref(), description.as_deref())
        })
        .await
        .map_err(|e| StudioError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Retrieves all workouts for a given program.
    pub async fn get_workouts(&self, params: &Id) -> Result<crate::display::Workouts> {
        let db_path = self.db_path.clone();
        let program_id = params.id;

        let workouts = task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_workouts(program_id)
        })
        .await
        .map_err(|e| StudioError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        Ok(crate::display::Workouts(workouts))
    }

    /// Retrieves a single workout by its ID.
    pub async fn get_workout(&self, params: &Id) -> Result<Option<Workout>> {
        let db_path = self.db_path.clone();
        let workout_id = params.id;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_workout(workout_id)
        })
        .await
        .map_err(|e| StudioError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Swaps the order of two workouts within the same program.
    pub async fn swap_workouts(&self, params: &SwapWorkouts) -> Result<()> {
        let db_path = self.db_path.clone();
        let workout1_id = params.workout1_id;
        let workout2_id = params.workout2_id;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.swap_workouts(workout1_id, workout2_id)
        })
        .await
        .map_err(|e| StudioError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Removes a workout from a program.
    pub async fn remove_workout(&self, params: &Id) -> Result<()> {
        let db_path = self.db_path.clone();
        let workout_id = params.id;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.remove_workout(workout_id)
        })
        .await
        .map_err(|e| StudioError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}
