//! MCP server implementation for Tempo
//!
//! This module implements the Model Context Protocol server for Tempo,
//! providing a standardized interface for AI models to manage training
//! programs and propose edits through the review workflow.

use std::sync::Arc;

use anyhow::Result;
use log::{debug, error, info};
use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        GetPromptRequestParam, GetPromptResult, Implementation, ListPromptsResult,
        PaginatedRequestParam, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
    tool, tool_handler, tool_router,
};
use tempo_core::{ReviewSession, Studio};
use tokio::{
    signal::unix::{signal, SignalKind},
    sync::Mutex,
};

pub mod errors;
pub mod handlers;
pub mod prompts;

// Re-export parameter types and result type from handlers for external use
pub use handlers::{
    CreateProgram, DeleteProgram, Id, InsertWorkout, ListPrograms, McpResult, ProposeChanges,
    SearchPrograms, SwapWorkouts, UpdateWorkout, WorkoutCreate,
};

/// MCP server for Tempo
#[derive(Clone)]
pub struct TempoMcpServer {
    studio: Arc<Mutex<Studio>>,
    review: Arc<Mutex<Option<ReviewSession>>>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl TempoMcpServer {
    /// Create a new Tempo MCP server
    pub fn new(studio: Studio) -> Self {
        Self {
            studio: Arc::new(Mutex::new(studio)),
            review: Arc::new(Mutex::new(None)),
            tool_router: Self::tool_router(),
        }
    }

    fn handlers(&self) -> handlers::McpHandlers {
        handlers::McpHandlers::new(self.studio.clone(), self.review.clone())
    }

    // Tool methods that delegate to handlers::McpHandlers methods
    #[tool(
        name = "create_program",
        description = "Create a new training program. Provide a clear title (required), optional description of the training focus, and optional client name. Returns the new program ID for adding workouts."
    )]
    async fn create_program(&self, Parameters(params): Parameters<CreateProgram>) -> McpResult {
        self.handlers().create_program(params.as_ref()).await
    }

    #[tool(
        name = "list_programs",
        description = "List all training programs. Use archived=false (default) for active programs, or archived=true to see completed/hidden programs. Returns a formatted list with IDs, titles, clients, and workout counts."
    )]
    async fn list_programs(&self, Parameters(params): Parameters<ListPrograms>) -> McpResult {
        self.handlers().list_programs(params.as_ref()).await
    }

    #[tool(
        name = "show_program",
        description = "Display complete details of a specific program including all its workouts and their blocks (exercises and circuits) with sets, reps, weight, and rest. Use the program ID to retrieve. Essential before proposing edits."
    )]
    async fn show_program(&self, Parameters(params): Parameters<Id>) -> McpResult {
        self.handlers().show_program(params.as_ref()).await
    }

    #[tool(
        name = "archive_program",
        description = "Archive a completed or inactive program to hide it from the active list. Archived programs are preserved and can be restored later with unarchive_program."
    )]
    async fn archive_program(&self, Parameters(params): Parameters<Id>) -> McpResult {
        self.handlers().archive_program(params.as_ref()).await
    }

    #[tool(
        name = "unarchive_program",
        description = "Restore an archived program back to the active list. The program and all its workouts are preserved exactly as they were."
    )]
    async fn unarchive_program(&self, Parameters(params): Parameters<Id>) -> McpResult {
        self.handlers().unarchive_program(params.as_ref()).await
    }

    #[tool(
        name = "delete_program",
        description = "Permanently delete a program and all its workouts from the database. This operation cannot be undone and requires confirmed=true. Consider archiving instead if you might need the program later."
    )]
    async fn delete_program(&self, Parameters(params): Parameters<DeleteProgram>) -> McpResult {
        self.handlers().delete_program(params.as_ref()).await
    }

    #[tool(
        name = "search_programs",
        description = "Find all programs written for a specific client. Use archived=false (default) for active programs, or archived=true for completed/hidden ones. Useful before creating a new program for a returning client."
    )]
    async fn search_programs(&self, Parameters(params): Parameters<SearchPrograms>) -> McpResult {
        self.handlers().search_programs(params.as_ref()).await
    }

    #[tool(
        name = "add_workout",
        description = "Add a new workout at the end of an existing program. Requires program_id and title. Optionally include a description of the session. Workouts start empty; fill them with blocks through propose_changes."
    )]
    async fn add_workout(&self, Parameters(params): Parameters<WorkoutCreate>) -> McpResult {
        self.handlers().add_workout(params.as_ref()).await
    }

    #[tool(
        name = "insert_workout",
        description = "Insert a new workout at a specific position in a program's order. Position is 0-indexed (0 = first position). All existing workouts at or after this position will be shifted down."
    )]
    async fn insert_workout(&self, Parameters(params): Parameters<InsertWorkout>) -> McpResult {
        self.handlers().insert_workout(params.as_ref()).await
    }

    #[tool(
        name = "update_workout",
        description = "Modify an existing workout's title and/or description. Use the workout ID to identify it. Block-level edits (exercises, circuits) go through propose_changes instead."
    )]
    async fn update_workout(&self, Parameters(params): Parameters<UpdateWorkout>) -> McpResult {
        self.handlers().update_workout(params.as_ref()).await
    }

    #[tool(
        name = "show_workout",
        description = "View detailed information about a specific workout including its position and block list. Use when you need to focus on a single session rather than the whole program."
    )]
    async fn show_workout(&self, Parameters(params): Parameters<Id>) -> McpResult {
        self.handlers().show_workout(params.as_ref()).await
    }

    #[tool(
        name = "swap_workouts",
        description = "Swap the order of two workouts within the same program. Both workouts must belong to the same program. The operation preserves all workout properties and only changes their order."
    )]
    async fn swap_workouts(&self, Parameters(params): Parameters<SwapWorkouts>) -> McpResult {
        self.handlers().swap_workouts(params.as_ref()).await
    }

    #[tool(
        name = "remove_workout",
        description = "Remove a workout from a program. Remaining workouts close the gap in the ordering. This cannot be undone."
    )]
    async fn remove_workout(&self, Parameters(params): Parameters<Id>) -> McpResult {
        self.handlers().remove_workout(params.as_ref()).await
    }

    #[tool(
        name = "propose_changes",
        description = "Propose edits to a program for review. Send the CUMULATIVE fragment sequence for the current turn each call (previously sent fragments are decoded only once). Each fragment is {\"type\": \"workout-diff\", \"content\": [{id?, target, op, payload?}]} where target is a path like 'workouts[0].blocks[2]' and op is add/remove/modify. Nothing applies until accept_changes. Proposing for a different program supersedes the current pending batch."
    )]
    async fn propose_changes(&self, Parameters(params): Parameters<ProposeChanges>) -> McpResult {
        self.handlers().propose_changes(params.as_ref()).await
    }

    #[tool(
        name = "show_pending_changes",
        description = "Show the batch of proposed changes currently awaiting review, with operation, target path, and change id for each entry."
    )]
    async fn show_pending_changes(&self) -> McpResult {
        self.handlers().show_pending_changes().await
    }

    #[tool(
        name = "accept_changes",
        description = "Accept the pending change batch: changes apply to the program in order and the result is saved. Changes whose target no longer resolves are reported as conflicts; the rest still apply. Fails without applying anything if the program was modified since the proposal."
    )]
    async fn accept_changes(&self) -> McpResult {
        self.handlers().accept_changes().await
    }

    #[tool(
        name = "reject_changes",
        description = "Discard the pending change batch without touching the program."
    )]
    async fn reject_changes(&self) -> McpResult {
        self.handlers().reject_changes().await
    }

    /// List all available prompts
    async fn list_prompts(
        &self,
        request: Option<PaginatedRequestParam>,
        context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        self.handlers().list_prompts(request, context).await
    }

    /// Get a specific prompt by name and apply arguments
    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        self.handlers().get_prompt(request, context).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for TempoMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_prompts()
                .build(),
            server_info: Implementation {
                name: "tempo".to_string(),
                title: None,
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                website_url: None,
            },
            instructions: Some(r#"Tempo is a training program management system: programs hold ordered workouts, and workouts hold blocks (single exercises or circuits).

## Core Concepts
- **Programs**: A training block for a client, with title, description, and revision counter
- **Workouts**: Ordered sessions within a program ("Day 1 — Lower")
- **Blocks**: Exercises (sets/reps/weight/rest) or circuits (rounds of exercises)
- **Pending changes**: Edits you propose stay pending until the coach accepts or rejects them

## Workflow Examples

### Building a New Program
1. Create a program with `create_program` - provide a clear title and optional client
2. Lay out the week with `add_workout` for each training day
3. Fill workouts by proposing blocks through `propose_changes`

### Proposing Edits for Review
1. Load the current structure with `show_program` and note block positions
2. Send edits with `propose_changes` as workout-diff fragments; resend the cumulative fragment list as your output grows within a turn
3. The coach inspects with `show_pending_changes`, then `accept_changes` or `reject_changes`
4. Conflicted changes (target no longer resolves) are reported after acceptance - re-read the program and re-propose just those

## Best Practices
- Target paths index the current tree: `workouts[0].blocks[2]`, `workouts[1].blocks` (append)
- Keep each proposed batch focused; small batches are easier to review
- Never assume an edit applied: check the accept result for conflicts

## Tool Categories
- **Program Management**: create_program, list_programs, show_program, archive_program, unarchive_program, delete_program, search_programs
- **Workout Management**: add_workout, insert_workout, update_workout, show_workout, swap_workouts, remove_workout
- **Change Review**: propose_changes, show_pending_changes, accept_changes, reject_changes"#.to_string()),
        }
    }

    async fn list_prompts(
        &self,
        request: Option<PaginatedRequestParam>,
        context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        self.list_prompts(request, context).await
    }

    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        self.get_prompt(request, context).await
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: TempoMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting Tempo MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    // Set up signal handlers for graceful shutdown
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down gracefully...");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down gracefully...");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}
