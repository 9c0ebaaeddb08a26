//! Display implementations for domain models.
//!
//! This module contains all Display trait implementations for the core
//! domain models, separated from the model definitions to maintain clean
//! separation of concerns. All output is markdown for rich terminal
//! display.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::models::{Block, Exercise, Program, ProgramStatus, ProgramSummary, Workout};

impl fmt::Display for ProgramStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.title)?;
        writeln!(f)?;

        // Metadata section
        writeln!(f, "- Status: {}", self.status.as_str())?;
        if let Some(client) = &self.client {
            writeln!(f, "- Client: {client}")?;
        }
        writeln!(f, "- Revision: {}", self.revision)?;
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        // Description as a paragraph
        if let Some(desc) = &self.description {
            writeln!(f)?;
            writeln!(f, "{desc}")?;
        }

        if !self.workouts.is_empty() {
            writeln!(f, "\n## Workouts")?;
            writeln!(f)?;
            for workout in &self.workouts {
                write!(f, "{}", workout)?;
            }
        } else {
            writeln!(f, "\nNo workouts in this program.")?;
        }

        Ok(())
    }
}

impl fmt::Display for Workout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### {}. {}", self.position + 1, self.title)?;
        writeln!(f)?;

        if let Some(desc) = &self.description {
            writeln!(f, "{desc}")?;
            writeln!(f)?;
        }

        if self.blocks.is_empty() {
            writeln!(f, "No blocks yet.")?;
        } else {
            for block in &self.blocks {
                write!(f, "{}", block)?;
            }
        }
        writeln!(f)?;

        Ok(())
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Block::Exercise(exercise) => writeln!(f, "- {exercise}"),
            Block::Circuit(circuit) => {
                write!(f, "- **{}** — {} rounds", circuit.name, circuit.rounds)?;
                if let Some(rest) = circuit.rest_seconds {
                    write!(f, ", rest {rest}s")?;
                }
                writeln!(f)?;
                for exercise in &circuit.exercises {
                    writeln!(f, "    - {exercise}")?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} — {}×{}", self.name, self.sets, self.reps)?;
        if let Some(weight) = self.weight {
            write!(f, " @ {weight}kg")?;
        }
        if let Some(rest) = self.rest_seconds {
            write!(f, ", rest {rest}s")?;
        }
        if let Some(notes) = &self.notes {
            write!(f, " ({notes})")?;
        }
        Ok(())
    }
}

impl fmt::Display for ProgramSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let volume = if self.workout_count > 0 {
            format!(
                " ({} workouts, {} blocks)",
                self.workout_count, self.block_count
            )
        } else {
            String::new()
        };

        writeln!(f, "## {} (ID: {}){volume}", self.title, self.id)?;
        writeln!(f)?;

        if let Some(desc) = &self.description {
            writeln!(f, "- **Description**: {desc}")?;
        }

        if let Some(client) = &self.client {
            writeln!(f, "- **Client**: {client}")?;
        }

        writeln!(f, "- **Created**: {}", LocalDateTime(&self.created_at))?;
        writeln!(f)?; // Add blank line after each program

        Ok(())
    }
}
