//! Program handler operations that return formatted wrapper types.

use super::Studio;
use crate::{
    error::Result,
    models::{Program, ProgramFilter, ProgramSummary},
    params::{DeleteProgram, Id, ListPrograms, SearchPrograms},
};

impl Studio {
    /// Handle listing programs with optional archived filtering.
    ///
    /// Converts programs to summaries with workout and block counts for
    /// consistent list display across interfaces.
    pub async fn list_programs_summary(
        &self,
        params: &ListPrograms,
    ) -> Result<crate::display::ProgramSummaries> {
        let filter = Some(ProgramFilter::from(params));
        let programs = self.list_programs(filter).await?;
        let summaries: Vec<ProgramSummary> = programs.iter().map(Into::into).collect();
        Ok(crate::display::ProgramSummaries(summaries))
    }

    /// Handle showing a complete program with all its workouts.
    ///
    /// Returns the program with workouts eagerly loaded, or None if it
    /// doesn't exist.
    pub async fn show_program_with_workouts(&self, params: &Id) -> Result<Option<Program>> {
        self.get_program(params).await
    }

    /// Handle permanently deleting a program with confirmation.
    ///
    /// Requires explicit confirmation via the `confirmed` field to
    /// prevent accidental deletion. Uses get-before-delete so the deleted
    /// program's details can be shown. Returns None if the program
    /// doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::InvalidInput` if `confirmed` is false
    pub async fn delete_program(&self, params: &DeleteProgram) -> Result<Option<Program>> {
        if !params.confirmed {
            return Err(crate::StudioError::InvalidInput {
                field: "confirmed".to_string(),
                reason: "Program deletion requires explicit confirmation. Set 'confirmed' to true to proceed with permanent deletion.".to_string(),
            });
        }

        let id_params = Id { id: params.id };
        let program = self.get_program(&id_params).await?;

        if program.is_some() {
            self.delete_program_by_id(&id_params).await?;
        }

        Ok(program)
    }

    /// Handle searching for a client's programs with summaries.
    pub async fn search_programs_summary(
        &self,
        params: &SearchPrograms,
    ) -> Result<crate::display::ProgramSummaries> {
        let programs = self.search_programs_by_client(params).await?;
        let summaries: Vec<ProgramSummary> = programs.iter().map(Into::into).collect();
        Ok(crate::display::ProgramSummaries(summaries))
    }
}
