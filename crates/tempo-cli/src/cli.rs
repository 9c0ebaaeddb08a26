//! Command-line interface definitions using clap
//!
//! This module defines the CLI structure using clap's derive API,
//! implementing the parameter wrapper pattern for clean separation
//! between CLI framework concerns and core domain logic.
//!
//! ## Parameter Wrapper Pattern Implementation
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Business Logic
//! ```
//!
//! Each command defines a CLI-specific argument structure with clap
//! derives and converts into the corresponding core parameter type via
//! `From`, so CLI concerns (help text, flag parsing, aliases) stay in
//! this layer and core types remain interface-agnostic.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use log::warn;
use tempo_core::params::*;
use tempo_core::{
    CreateResult, OperationStatus, PendingChanges, ReviewSession, Studio, UpdateResult,
};

use crate::renderer::TerminalRenderer;

// ============================================================================
// CLI Argument Wrapper Implementations
// ============================================================================
//
// These structures implement the CLI side of the parameter wrapper
// pattern. Each wrapper defines CLI-specific argument parsing with clap
// derives and provides a conversion into the core parameter type, keeping
// the mapping explicit and verifiable at compile time.

/// Create a new program
#[derive(Args)]
pub struct CreateProgramArgs {
    /// Title of the program
    pub title: String,
    /// Optional description providing more context about the program
    #[arg(short, long)]
    pub description: Option<String>,
    /// Client name to associate with this program
    #[arg(long)]
    pub client: Option<String>,
}

impl From<CreateProgramArgs> for CreateProgram {
    fn from(val: CreateProgramArgs) -> Self {
        CreateProgram {
            title: val.title,
            description: val.description,
            client: val.client,
        }
    }
}

/// List all programs
///
/// Display either active programs (default) or archived programs based
/// on the --archived flag.
#[derive(Args)]
pub struct ListProgramsArgs {
    /// Show archived programs instead of active ones
    #[arg(long)]
    pub archived: bool,
}

impl From<ListProgramsArgs> for ListPrograms {
    fn from(val: ListProgramsArgs) -> Self {
        ListPrograms {
            archived: val.archived,
        }
    }
}

/// Show details of a specific program
#[derive(Args)]
pub struct ShowProgramArgs {
    /// ID of the program to display
    pub id: u64,
}

impl From<ShowProgramArgs> for Id {
    fn from(val: ShowProgramArgs) -> Self {
        Id { id: val.id }
    }
}

/// Archive a program
///
/// Move a program to the archived state, hiding it from the default
/// program list. Archived programs are preserved and can be restored
/// later with the unarchive command.
#[derive(Args)]
pub struct ArchiveProgramArgs {
    /// ID of the program to archive
    pub id: u64,
}

impl From<ArchiveProgramArgs> for Id {
    fn from(val: ArchiveProgramArgs) -> Self {
        Id { id: val.id }
    }
}

/// Unarchive a program
#[derive(Args)]
pub struct UnarchiveProgramArgs {
    /// ID of the program to restore from archive
    pub id: u64,
}

impl From<UnarchiveProgramArgs> for Id {
    fn from(val: UnarchiveProgramArgs) -> Self {
        Id { id: val.id }
    }
}

/// Delete a program permanently
#[derive(Args)]
pub struct DeleteProgramArgs {
    /// ID of the program to delete
    pub id: u64,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

impl From<DeleteProgramArgs> for DeleteProgram {
    fn from(val: DeleteProgramArgs) -> Self {
        DeleteProgram {
            id: val.id,
            confirmed: val.confirm,
        }
    }
}

/// Search for a client's programs
#[derive(Args)]
pub struct SearchProgramsArgs {
    /// Client name to search programs for
    pub client: String,
    /// Include archived programs in search results
    #[arg(long)]
    pub archived: bool,
}

impl From<SearchProgramsArgs> for SearchPrograms {
    fn from(val: SearchProgramsArgs) -> Self {
        SearchPrograms {
            client: val.client,
            archived: val.archived,
        }
    }
}

#[derive(Subcommand)]
pub enum ProgramCommands {
    /// Create a new program
    #[command(alias = "c")]
    Create(CreateProgramArgs),
    /// List all programs
    #[command(aliases = ["l", "ls"])]
    List(ListProgramsArgs),
    /// Show details of a specific program
    #[command(alias = "s")]
    Show(ShowProgramArgs),
    /// Archive a program
    #[command(alias = "a")]
    Archive(ArchiveProgramArgs),
    /// Unarchive a program
    #[command(alias = "u")]
    Unarchive(UnarchiveProgramArgs),
    /// Delete a program permanently
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteProgramArgs),
    /// Search for a client's programs
    #[command(alias = "f")]
    Search(SearchProgramsArgs),
}

/// Add a new workout at the end of a program
#[derive(Args)]
pub struct AddWorkoutArgs {
    /// ID of the program to add the workout to
    pub program_id: u64,
    /// Title of the workout
    pub title: String,
    /// Optional detailed description of the session
    #[arg(short, long)]
    pub description: Option<String>,
}

impl From<AddWorkoutArgs> for WorkoutCreate {
    fn from(val: AddWorkoutArgs) -> Self {
        WorkoutCreate {
            program_id: val.program_id,
            title: val.title,
            description: val.description,
        }
    }
}

/// Insert a new workout at a specific position in a program
///
/// Position is 0-indexed (0 = first position). All existing workouts at
/// or after this position are shifted down to make room.
#[derive(Args)]
pub struct InsertWorkoutArgs {
    /// ID of the program to insert the workout into
    pub program_id: u64,
    /// 0-based position index where to insert the workout
    pub position: u32,
    /// Title of the workout
    pub title: String,
    /// Optional detailed description of the session
    #[arg(short, long)]
    pub description: Option<String>,
}

impl From<InsertWorkoutArgs> for InsertWorkout {
    fn from(val: InsertWorkoutArgs) -> Self {
        InsertWorkout {
            workout: WorkoutCreate {
                program_id: val.program_id,
                title: val.title,
                description: val.description,
            },
            position: val.position,
        }
    }
}

/// Update a workout's details
#[derive(Args)]
pub struct UpdateWorkoutArgs {
    /// ID of the workout to update
    pub id: u64,
    /// Updated title for the workout
    #[arg(short, long)]
    pub title: Option<String>,
    /// Updated detailed description of the session
    #[arg(short, long)]
    pub description: Option<String>,
}

impl From<UpdateWorkoutArgs> for UpdateWorkout {
    fn from(val: UpdateWorkoutArgs) -> Self {
        UpdateWorkout {
            id: val.id,
            title: val.title,
            description: val.description,
        }
    }
}

/// Show details of a specific workout
#[derive(Args)]
pub struct ShowWorkoutArgs {
    /// ID of the workout to show details for
    pub id: u64,
}

impl From<ShowWorkoutArgs> for Id {
    fn from(val: ShowWorkoutArgs) -> Self {
        Id { id: val.id }
    }
}

/// Swap the order of two workouts within the same program
#[derive(Args)]
pub struct SwapWorkoutsArgs {
    /// ID of the first workout to swap
    pub workout1_id: u64,
    /// ID of the second workout to swap
    pub workout2_id: u64,
}

impl From<SwapWorkoutsArgs> for SwapWorkouts {
    fn from(val: SwapWorkoutsArgs) -> Self {
        SwapWorkouts {
            workout1_id: val.workout1_id,
            workout2_id: val.workout2_id,
        }
    }
}

/// Remove a workout from a program
#[derive(Args)]
pub struct RemoveWorkoutArgs {
    /// ID of the workout to remove
    pub id: u64,
}

impl From<RemoveWorkoutArgs> for Id {
    fn from(val: RemoveWorkoutArgs) -> Self {
        Id { id: val.id }
    }
}

#[derive(Subcommand)]
pub enum WorkoutCommands {
    /// Add a new workout at the end of a program
    #[command(alias = "a")]
    Add(AddWorkoutArgs),
    /// Insert a new workout at a specific position in a program
    #[command(alias = "i")]
    Insert(InsertWorkoutArgs),
    /// Update a workout's details
    #[command(alias = "u")]
    Update(UpdateWorkoutArgs),
    /// Show details of a specific workout
    #[command(alias = "s")]
    Show(ShowWorkoutArgs),
    /// Swap the order of two workouts within the same program
    #[command(alias = "sw")]
    Swap(SwapWorkoutsArgs),
    /// Remove a workout from a program
    #[command(aliases = ["d", "rm"])]
    Remove(RemoveWorkoutArgs),
}

/// Preview a recorded assistant change stream without applying it
#[derive(Args)]
pub struct PreviewReviewArgs {
    /// ID of the program the changes target
    pub program_id: u64,
    /// Path to a JSON file holding the fragment sequence (a JSON array)
    #[arg(short, long)]
    pub file: PathBuf,
}

/// Apply a recorded assistant change stream to a program
#[derive(Args)]
pub struct ApplyReviewArgs {
    /// ID of the program the changes target
    pub program_id: u64,
    /// Path to a JSON file holding the fragment sequence (a JSON array)
    #[arg(short, long)]
    pub file: PathBuf,
    /// Fail unless the stored program is still at this revision
    #[arg(long)]
    pub expected_revision: Option<u64>,
}

#[derive(Subcommand)]
pub enum ReviewCommands {
    /// Decode a fragment file and show the changes it proposes
    #[command(alias = "p")]
    Preview(PreviewReviewArgs),
    /// Decode a fragment file and apply the changes to the program
    #[command(alias = "a")]
    Apply(ApplyReviewArgs),
}

// ============================================================================
// Command handlers
// ============================================================================

/// Command handler wiring the studio to terminal output.
pub struct Cli {
    studio: Studio,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(studio: Studio, renderer: TerminalRenderer) -> Self {
        Self { studio, renderer }
    }

    pub async fn handle_program_command(self, command: ProgramCommands) -> Result<()> {
        match command {
            ProgramCommands::Create(args) => {
                let program = self.studio.create_program(&args.into()).await?;
                self.renderer.render(&CreateResult::new(program).to_string())
            }
            ProgramCommands::List(args) => self.list_programs(&args.into()).await,
            ProgramCommands::Show(args) => {
                let params: Id = args.into();
                match self.studio.show_program_with_workouts(&params).await? {
                    Some(program) => self.renderer.render(&program.to_string()),
                    None => self.renderer.render(
                        &OperationStatus::failure(format!(
                            "Program with ID {} not found",
                            params.id
                        ))
                        .to_string(),
                    ),
                }
            }
            ProgramCommands::Archive(args) => {
                let params: Id = args.into();
                match self.studio.archive_program(&params).await? {
                    Some(_) => self.renderer.render(
                        &OperationStatus::success(format!(
                            "Archived program with ID {}. Use 'program unarchive' to restore it.",
                            params.id
                        ))
                        .to_string(),
                    ),
                    None => self.renderer.render(
                        &OperationStatus::failure(format!(
                            "Program with ID {} not found",
                            params.id
                        ))
                        .to_string(),
                    ),
                }
            }
            ProgramCommands::Unarchive(args) => {
                let params: Id = args.into();
                match self.studio.unarchive_program(&params).await? {
                    Some(_) => self.renderer.render(
                        &OperationStatus::success(format!(
                            "Unarchived program with ID {}. Program is now active again.",
                            params.id
                        ))
                        .to_string(),
                    ),
                    None => self.renderer.render(
                        &OperationStatus::failure(format!(
                            "Program with ID {} not found",
                            params.id
                        ))
                        .to_string(),
                    ),
                }
            }
            ProgramCommands::Delete(args) => {
                let params: DeleteProgram = args.into();
                match self.studio.delete_program(&params).await? {
                    Some(deleted) => self.renderer.render(
                        &OperationStatus::success(format!(
                            "Permanently deleted program '{}' (ID: {}). This action cannot be undone.",
                            deleted.title, params.id
                        ))
                        .to_string(),
                    ),
                    None => self.renderer.render(
                        &OperationStatus::failure(format!(
                            "Program with ID {} not found",
                            params.id
                        ))
                        .to_string(),
                    ),
                }
            }
            ProgramCommands::Search(args) => {
                let params: SearchPrograms = args.into();
                let summaries = self.studio.search_programs_summary(&params).await?;
                let status_text = if params.archived { "archived" } else { "active" };
                let output = if summaries.is_empty() {
                    format!("No {} programs found for client: {}", status_text, params.client)
                } else {
                    format!(
                        "# Programs for {} ({})\n\n{}",
                        params.client, status_text, summaries
                    )
                };
                self.renderer.render(&output)
            }
        }
    }

    pub async fn handle_workout_command(self, command: WorkoutCommands) -> Result<()> {
        match command {
            WorkoutCommands::Add(args) => {
                let workout = self.studio.add_workout(&args.into()).await?;
                self.renderer.render(&CreateResult::new(workout).to_string())
            }
            WorkoutCommands::Insert(args) => {
                let workout = self.studio.insert_workout(&args.into()).await?;
                self.renderer.render(&CreateResult::new(workout).to_string())
            }
            WorkoutCommands::Update(args) => {
                let params: UpdateWorkout = args.into();
                let mut changes = Vec::new();
                if params.title.is_some() {
                    changes.push("Updated title".to_string());
                }
                if params.description.is_some() {
                    changes.push("Updated description".to_string());
                }

                self.studio.update_workout(&params).await?;
                match self.studio.get_workout(&Id { id: params.id }).await? {
                    Some(workout) => self
                        .renderer
                        .render(&UpdateResult::with_changes(workout, changes).to_string()),
                    None => self.renderer.render(
                        &OperationStatus::failure(format!(
                            "Workout with ID {} not found",
                            params.id
                        ))
                        .to_string(),
                    ),
                }
            }
            WorkoutCommands::Show(args) => {
                let params: Id = args.into();
                match self.studio.get_workout(&params).await? {
                    Some(workout) => self.renderer.render(&workout.to_string()),
                    None => self.renderer.render(
                        &OperationStatus::failure(format!(
                            "Workout with ID {} not found",
                            params.id
                        ))
                        .to_string(),
                    ),
                }
            }
            WorkoutCommands::Swap(args) => {
                let params: SwapWorkouts = args.into();
                self.studio.swap_workouts(&params).await?;
                self.renderer.render(
                    &OperationStatus::success(format!(
                        "Successfully swapped the order of workouts {} and {}",
                        params.workout1_id, params.workout2_id
                    ))
                    .to_string(),
                )
            }
            WorkoutCommands::Remove(args) => {
                let params: Id = args.into();
                self.studio.remove_workout(&params).await?;
                self.renderer.render(
                    &OperationStatus::success(format!(
                        "Removed workout with ID {}",
                        params.id
                    ))
                    .to_string(),
                )
            }
        }
    }

    pub async fn handle_review_command(self, command: ReviewCommands) -> Result<()> {
        match command {
            ReviewCommands::Preview(args) => {
                let fragments = read_fragments(&args.file)?;
                let mut session = ReviewSession::new(args.program_id);

                let summary = session.ingest(&fragments)?;
                for skipped in &summary.skipped {
                    warn!(
                        "Skipped fragment {}: {}",
                        skipped.fragment_index, skipped.reason
                    );
                }

                match session.pending() {
                    Some(pending) => self
                        .renderer
                        .render(&PendingChanges(pending).to_string()),
                    None => self.renderer.render("No pending changes.\n"),
                }
            }
            ReviewCommands::Apply(args) => {
                let fragments = read_fragments(&args.file)?;
                let mut session = ReviewSession::new(args.program_id);
                if let Some(revision) = args.expected_revision {
                    session = session.with_expected_revision(revision);
                }

                let summary = session.ingest(&fragments)?;
                for skipped in &summary.skipped {
                    warn!(
                        "Skipped fragment {}: {}",
                        skipped.fragment_index, skipped.reason
                    );
                }

                match self.studio.accept_review(&mut session).await? {
                    Some(outcome) => self.renderer.render(&outcome.to_string()),
                    None => self.renderer.render("No pending changes to apply.\n"),
                }
            }
        }
    }

    pub async fn list_programs(&self, params: &ListPrograms) -> Result<()> {
        let summaries = self.studio.list_programs_summary(params).await?;

        let title = if summaries.is_empty() {
            if params.archived {
                "No archived programs found"
            } else {
                "No active programs found"
            }
        } else if params.archived {
            "Archived Programs"
        } else {
            "Active Programs"
        };

        if summaries.is_empty() {
            self.renderer.render(&format!("{title}.\n"))
        } else {
            self.renderer.render(&format!("# {title}\n\n{summaries}"))
        }
    }
}

/// Read a recorded fragment sequence (a JSON array) from disk.
fn read_fragments(path: &std::path::Path) -> Result<Vec<serde_json::Value>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read fragment file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Fragment file {} is not a JSON array", path.display()))
}
