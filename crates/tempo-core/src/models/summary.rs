//! Program summary types and functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{Program, ProgramStatus};

/// Summary information about a program with workout statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramSummary {
    /// Program ID
    pub id: u64,
    /// Title of the program
    pub title: String,
    /// Detailed multi-line description of the program
    pub description: Option<String>,
    /// Name of the client this program is written for
    pub client: Option<String>,
    /// Program status
    pub status: ProgramStatus,
    /// Current revision counter
    pub revision: u64,
    /// Creation timestamp
    pub created_at: Timestamp,
    /// Last update timestamp
    pub updated_at: Timestamp,
    /// Total number of workouts
    pub workout_count: u32,
    /// Total number of blocks across all workouts
    pub block_count: u32,
}

impl From<&Program> for ProgramSummary {
    fn from(program: &Program) -> Self {
        let workout_count = program.workouts.len() as u32;
        let block_count = program
            .workouts
            .iter()
            .map(|workout| workout.blocks.len() as u32)
            .sum();

        Self {
            id: program.id,
            title: program.title.clone(),
            description: program.description.clone(),
            client: program.client.clone(),
            status: program.status,
            revision: program.revision,
            created_at: program.created_at,
            updated_at: program.updated_at,
            workout_count,
            block_count,
        }
    }
}
