//! Tempo CLI Application
//!
//! Command-line interface for the Tempo training program tool.

mod args;
mod cli;
mod mcp;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use mcp::{run_stdio_server, TempoMcpServer};
use renderer::TerminalRenderer;
use tempo_core::{params::ListPrograms, StudioBuilder};
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        command,
    } = Args::parse();

    let studio = StudioBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize studio")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("Tempo started");

    match command {
        Some(Program { command }) => {
            Cli::new(studio, renderer)
                .handle_program_command(command)
                .await
        }
        Some(Workout { command }) => {
            Cli::new(studio, renderer)
                .handle_workout_command(command)
                .await
        }
        Some(Review { command }) => {
            Cli::new(studio, renderer)
                .handle_review_command(command)
                .await
        }
        Some(Serve) => {
            info!("Starting Tempo MCP server");
            run_stdio_server(TempoMcpServer::new(studio))
                .await
                .context("MCP server failed")
        }
        None => {
            Cli::new(studio, renderer)
                .list_programs(&ListPrograms { archived: false })
                .await
        }
    }
}
