use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{ProgramCommands, ReviewCommands, WorkoutCommands};

/// Main command-line interface for the Tempo training tool
///
/// Tempo is a training program management system for coaches: programs
/// are built from ordered workouts and blocks, and an AI assistant can
/// propose incremental edits that are reviewed before they apply. It
/// provides a command-line interface for local operations and an MCP
/// (Model Context Protocol) server mode for integration with AI
/// assistants.
#[derive(Parser)]
#[command(version, about, name = "tempo")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/tempo/tempo.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Tempo CLI
///
/// The CLI is organized into four main command categories:
/// - `program`: Operations for managing training programs
/// - `workout`: Operations for managing workouts within programs
/// - `review`: Preview or apply assistant-proposed change streams
/// - `serve`: Start the MCP server for AI assistant integration
#[derive(Subcommand)]
pub enum Commands {
    /// Manage programs
    #[command(alias = "p")]
    Program {
        #[command(subcommand)]
        command: ProgramCommands,
    },
    /// Manage workouts within programs
    #[command(alias = "w")]
    Workout {
        #[command(subcommand)]
        command: WorkoutCommands,
    },
    /// Review assistant-proposed changes
    #[command(alias = "r")]
    Review {
        #[command(subcommand)]
        command: ReviewCommands,
    },
    /// Start the MCP server
    Serve,
}
