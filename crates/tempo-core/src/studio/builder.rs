//! Builder for creating and configuring Studio instances.

use std::path::{Path, PathBuf};

use tokio::task;

use super::Studio;
use crate::{
    db::Database,
    error::{Result, StudioError},
};

/// Builder for creating and configuring Studio instances.
#[derive(Debug, Clone)]
pub struct StudioBuilder {
    database_path: Option<PathBuf>,
}

impl StudioBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            database_path: None,
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/tempo/tempo.db` or `~/.local/share/tempo/tempo.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Builds the configured studio instance.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::FileSystem` if the database path is invalid
    /// Returns `StudioError::Database` if database initialization fails
    pub async fn build(self) -> Result<Studio> {
        let db_path = if let Some(path) = self.database_path {
            path
        } else {
            Self::default_database_path()?
        };

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StudioError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), StudioError>(())
        })
        .await
        .map_err(|e| StudioError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        Ok(Studio::new(db_path))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("tempo")
            .place_data_file("tempo.db")
            .map_err(|e| StudioError::XdgDirectory(e.to_string()))
    }
}

impl Default for StudioBuilder {
    fn default() -> Self {
        Self::new()
    }
}
