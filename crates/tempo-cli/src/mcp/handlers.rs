//! MCP tool handlers implementation

use std::sync::Arc;

use log::{debug, warn};
use rmcp::{
    ErrorData, RoleServer,
    model::{
        CallToolResult, Content, GetPromptRequestParam, GetPromptResult, ListPromptsResult,
        PaginatedRequestParam, Prompt, PromptArgument, PromptMessage, PromptMessageContent,
        PromptMessageRole,
    },
    service::RequestContext,
};
use schemars::JsonSchema;
use serde::Deserialize;
use tempo_core::{
    CreateResult, OperationStatus, PendingChanges, ReviewSession, Studio, params as core,
};
use tokio::sync::Mutex;

use super::{errors::to_mcp_error, prompts::get_prompt_templates};

// ============================================================================
// Generic Parameter Wrapper Implementation
// ============================================================================
//
// This generic wrapper struct implements the parameter wrapper pattern by
// wrapping any core parameter type in a transparent serde container and
// adding the MCP-specific derives (Deserialize, JsonSchema) needed for
// JSON handling, keeping the core types clean of framework dependencies.

/// Generic MCP wrapper for core parameter types with serde integration
///
/// Provides JSON deserialization and schema generation for any parameter
/// type, eliminating the need for individual wrapper structs while
/// maintaining the same functionality and type safety.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

// Type aliases for cleaner usage in function signatures
pub type Id = McpParams<core::Id>;
pub type CreateProgram = McpParams<core::CreateProgram>;
pub type DeleteProgram = McpParams<core::DeleteProgram>;
pub type ListPrograms = McpParams<core::ListPrograms>;
pub type SearchPrograms = McpParams<core::SearchPrograms>;
pub type WorkoutCreate = McpParams<core::WorkoutCreate>;
pub type InsertWorkout = McpParams<core::InsertWorkout>;
pub type UpdateWorkout = McpParams<core::UpdateWorkout>;
pub type SwapWorkouts = McpParams<core::SwapWorkouts>;
pub type ProposeChanges = McpParams<core::ProposeChanges>;

pub type McpResult = Result<CallToolResult, ErrorData>;

/// Handler implementations for the MCP server
pub struct McpHandlers {
    studio: Arc<Mutex<Studio>>,
    review: Arc<Mutex<Option<ReviewSession>>>,
}

impl McpHandlers {
    pub fn new(studio: Arc<Mutex<Studio>>, review: Arc<Mutex<Option<ReviewSession>>>) -> Self {
        Self { studio, review }
    }

    pub async fn create_program(&self, params: &core::CreateProgram) -> McpResult {
        debug!("create_program: {:?}", params);

        let program = self
            .studio
            .lock()
            .await
            .create_program(params)
            .await
            .map_err(|e| to_mcp_error("Failed to create program", &e))?;

        let result = CreateResult::new(program);
        Ok(CallToolResult::success(vec![Content::text(
            result.to_string(),
        )]))
    }

    pub async fn list_programs(&self, params: &core::ListPrograms) -> McpResult {
        debug!("list_programs: {:?}", params);

        let studio = self.studio.lock().await;
        let summaries = studio
            .list_programs_summary(params)
            .await
            .map_err(|e| to_mcp_error("Failed to list programs", &e))?;

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

        let result = format!("# {}\n\n{}", title, summaries);
        Ok(CallToolResult::success(vec![Content::text(result)]))
    }

    pub async fn show_program(&self, params: &core::Id) -> McpResult {
        debug!("show_program: {:?}", params);

        let program = self
            .studio
            .lock()
            .await
            .show_program_with_workouts(params)
            .await
            .map_err(|e| to_mcp_error("Failed to get program", &e))?
            .ok_or_else(|| {
                ErrorData::internal_error(
                    format!("Program with ID {} not found", params.id),
                    None,
                )
            })?;

        Ok(CallToolResult::success(vec![Content::text(
            program.to_string(),
        )]))
    }

    pub async fn archive_program(&self, params: &core::Id) -> McpResult {
        debug!("archive_program: {:?}", params);

        let studio = self.studio.lock().await;
        let _archived = studio
            .archive_program(params)
            .await
            .map_err(|e| to_mcp_error("Failed to archive program", &e))?
            .ok_or_else(|| {
                ErrorData::internal_error(
                    format!("Program with ID {} not found", params.id),
                    None,
                )
            })?;

        let result = OperationStatus::success(format!(
            "Archived program with ID {}. Use 'unarchive_program' to restore it.",
            params.id
        ));
        Ok(CallToolResult::success(vec![Content::text(
            result.to_string(),
        )]))
    }

    pub async fn unarchive_program(&self, params: &core::Id) -> McpResult {
        debug!("unarchive_program: {:?}", params);

        let studio = self.studio.lock().await;
        let _unarchived = studio
            .unarchive_program(params)
            .await
            .map_err(|e| to_mcp_error("Failed to unarchive program", &e))?
            .ok_or_else(|| {
                ErrorData::internal_error(
                    format!("Program with ID {} not found", params.id),
                    None,
                )
            })?;

        let result = OperationStatus::success(format!(
            "Unarchived program with ID {}. Program is now active again.",
            params.id
        ));
        Ok(CallToolResult::success(vec![Content::text(
            result.to_string(),
        )]))
    }

    pub async fn delete_program(&self, params: &core::DeleteProgram) -> McpResult {
        debug!("delete_program: {:?}", params);

        let studio = self.studio.lock().await;
        let deleted = studio
            .delete_program(params)
            .await
            .map_err(|e| to_mcp_error("Failed to delete program", &e))?
            .ok_or_else(|| {
                ErrorData::internal_error(
                    format!("Program with ID {} not found", params.id),
                    None,
                )
            })?;

        let result = OperationStatus::success(format!(
            "Permanently deleted program '{}' (ID: {}). This action cannot be undone.",
            deleted.title, params.id
        ));
        Ok(CallToolResult::success(vec![Content::text(
            result.to_string(),
        )]))
    }

    pub async fn search_programs(&self, params: &core::SearchPrograms) -> McpResult {
        debug!("search_programs: {:?}", params);

        let studio = self.studio.lock().await;
        let summaries = studio
            .search_programs_summary(params)
            .await
            .map_err(|e| to_mcp_error("Failed to search programs", &e))?;

        let status_text = if params.archived { "archived" } else { "active" };
        let result = if summaries.is_empty() {
            format!(
                "No {} programs found for client: {}",
                status_text, params.client
            )
        } else {
            format!(
                "# Programs for {} ({})\n\n{}",
                params.client, status_text, summaries
            )
        };

        Ok(CallToolResult::success(vec![Content::text(result)]))
    }

    pub async fn add_workout(&self, params: &core::WorkoutCreate) -> McpResult {
        debug!("add_workout: {:?}", params);

        let studio = self.studio.lock().await;
        let workout = studio
            .add_workout(params)
            .await
            .map_err(|e| to_mcp_error("Failed to add workout", &e))?;

        let result = CreateResult::new(workout);
        Ok(CallToolResult::success(vec![Content::text(
            result.to_string(),
        )]))
    }

    pub async fn insert_workout(&self, params: &core::InsertWorkout) -> McpResult {
        debug!("insert_workout: {:?}", params);

        let studio = self.studio.lock().await;
        let workout = studio
            .insert_workout(params)
            .await
            .map_err(|e| to_mcp_error("Failed to insert workout", &e))?;

        let result = CreateResult::new(workout);
        Ok(CallToolResult::success(vec![Content::text(
            result.to_string(),
        )]))
    }

    pub async fn update_workout(&self, params: &core::UpdateWorkout) -> McpResult {
        debug!("update_workout: {:?}", params);

        let studio = self.studio.lock().await;
        studio
            .update_workout(params)
            .await
            .map_err(|e| to_mcp_error("Failed to update workout", &e))?;

        // Build update messages based on what was provided
        let mut messages = Vec::new();
        if params.title.is_some() {
            messages.push("Updated title".to_string());
        }
        if params.description.is_some() {
            messages.push("Updated description".to_string());
        }

        let result = if messages.is_empty() {
            "No updates provided for workout".to_string()
        } else {
            format!("Workout {} updated: {}", params.id, messages.join(", "))
        };

        Ok(CallToolResult::success(vec![Content::text(result)]))
    }

    pub async fn show_workout(&self, params: &core::Id) -> McpResult {
        debug!("show_workout: {:?}", params);

        let studio = self.studio.lock().await;
        let workout = studio
            .get_workout(params)
            .await
            .map_err(|e| to_mcp_error("Failed to get workout", &e))?
            .ok_or_else(|| {
                ErrorData::internal_error(
                    format!("Workout with ID {} not found", params.id),
                    None,
                )
            })?;

        Ok(CallToolResult::success(vec![Content::text(
            workout.to_string(),
        )]))
    }

    pub async fn swap_workouts(&self, params: &core::SwapWorkouts) -> McpResult {
        debug!("swap_workouts: {:?}", params);

        let studio = self.studio.lock().await;
        studio
            .swap_workouts(params)
            .await
            .map_err(|e| to_mcp_error("Failed to swap workouts", &e))?;

        let result = OperationStatus::success(format!(
            "Successfully swapped the order of workouts {} and {}",
            params.workout1_id, params.workout2_id
        ));

        Ok(CallToolResult::success(vec![Content::text(
            result.to_string(),
        )]))
    }

    pub async fn remove_workout(&self, params: &core::Id) -> McpResult {
        debug!("remove_workout: {:?}", params);

        let studio = self.studio.lock().await;
        studio
            .remove_workout(params)
            .await
            .map_err(|e| to_mcp_error("Failed to remove workout", &e))?;

        let result =
            OperationStatus::success(format!("Removed workout with ID {}", params.id));
        Ok(CallToolResult::success(vec![Content::text(
            result.to_string(),
        )]))
    }

    pub async fn propose_changes(&self, params: &core::ProposeChanges) -> McpResult {
        debug!(
            "propose_changes: program {} with {} fragment(s)",
            params.program_id,
            params.fragments.len()
        );

        let mut review = self.review.lock().await;

        // A proposal for a different program supersedes the current
        // session; the new session captures the program revision so a
        // concurrent edit is caught at accept time.
        let reusable = matches!(
            review.as_ref(),
            Some(session) if session.program_id() == params.program_id
        );
        if !reusable {
            let program = self
                .studio
                .lock()
                .await
                .get_program(&core::Id {
                    id: params.program_id,
                })
                .await
                .map_err(|e| to_mcp_error("Failed to load program", &e))?
                .ok_or_else(|| {
                    ErrorData::internal_error(
                        format!("Program with ID {} not found", params.program_id),
                        None,
                    )
                })?;
            *review =
                Some(ReviewSession::new(program.id).with_expected_revision(program.revision));
        }

        let Some(session) = review.as_mut() else {
            return Err(ErrorData::internal_error(
                "Review session unavailable".to_string(),
                None,
            ));
        };

        let summary = session
            .ingest(&params.fragments)
            .map_err(|e| to_mcp_error("Failed to decode fragments", &e))?;
        for skipped in &summary.skipped {
            warn!(
                "Skipped fragment {}: {}",
                skipped.fragment_index, skipped.reason
            );
        }

        let body = match session.pending() {
            Some(pending) => PendingChanges(pending).to_string(),
            None => "No pending changes.".to_string(),
        };
        let mut result = format!("Decoded {} new change(s).\n\n{}", summary.decoded, body);
        if !summary.skipped.is_empty() {
            result.push_str(&format!(
                "\nDropped {} malformed fragment(s)/edit(s); see server log.\n",
                summary.skipped.len()
            ));
        }

        Ok(CallToolResult::success(vec![Content::text(result)]))
    }

    pub async fn show_pending_changes(&self) -> McpResult {
        debug!("show_pending_changes");

        let review = self.review.lock().await;
        let result = match review.as_ref().and_then(|session| session.pending()) {
            Some(pending) => PendingChanges(pending).to_string(),
            None => "No pending changes.".to_string(),
        };

        Ok(CallToolResult::success(vec![Content::text(result)]))
    }

    pub async fn accept_changes(&self) -> McpResult {
        debug!("accept_changes");

        let mut review = self.review.lock().await;
        let Some(session) = review.as_mut() else {
            return Ok(CallToolResult::success(vec![Content::text(
                "No pending changes to accept.".to_string(),
            )]));
        };

        let studio = self.studio.lock().await;
        match studio.accept_review(session).await {
            Ok(Some(outcome)) => {
                *review = None;
                Ok(CallToolResult::success(vec![Content::text(
                    outcome.to_string(),
                )]))
            }
            Ok(None) => {
                *review = None;
                Ok(CallToolResult::success(vec![Content::text(
                    "No pending changes to accept.".to_string(),
                )]))
            }
            // The batch stays pending on failure (e.g. a stale revision)
            // so the caller can re-sync and decide again
            Err(e) => Err(to_mcp_error("Failed to accept changes", &e)),
        }
    }

    pub async fn reject_changes(&self) -> McpResult {
        debug!("reject_changes");

        let mut review = self.review.lock().await;
        let result = match review.take().and_then(|mut session| session.reject()) {
            Some(batch) => OperationStatus::success(format!(
                "Rejected {} pending change(s). The program is unchanged.",
                batch.len()
            ))
            .to_string(),
            None => "No pending changes to reject.".to_string(),
        };

        Ok(CallToolResult::success(vec![Content::text(result)]))
    }

    /// List all available prompts
    pub async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, ErrorData> {
        debug!("list_prompts");

        let templates = get_prompt_templates();
        let prompts = templates
            .iter()
            .map(|template| {
                Prompt::new(
                    &template.name,
                    Some(&template.description),
                    Some(
                        template
                            .arguments
                            .iter()
                            .map(|arg| PromptArgument {
                                name: arg.name.clone(),
                                title: None,
                                description: Some(arg.description.clone()),
                                required: Some(arg.required),
                            })
                            .collect(),
                    ),
                )
            })
            .collect();

        Ok(ListPromptsResult {
            next_cursor: None,
            prompts,
        })
    }

    /// Get a specific prompt by name and apply arguments
    pub async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, ErrorData> {
        debug!("get_prompt: {}", request.name);

        let templates = get_prompt_templates();
        let template = templates
            .iter()
            .find(|t| t.name == request.name)
            .ok_or_else(|| ErrorData::invalid_params("Prompt not found", None))?;

        let mut prompt_text = template.template.clone();

        // Apply argument substitution if arguments are provided
        if let Some(args) = &request.arguments {
            for arg_def in &template.arguments {
                if let Some(arg_value) = args.get(&arg_def.name) {
                    if let Some(arg_str) = arg_value.as_str() {
                        let placeholder = format!("{{{}}}", arg_def.name);
                        prompt_text = prompt_text.replace(&placeholder, arg_str);
                    } else if arg_def.required {
                        return Err(ErrorData::invalid_params(
                            format!("Argument '{}' must be a string", arg_def.name),
                            None,
                        ));
                    }
                } else if arg_def.required {
                    return Err(ErrorData::invalid_params(
                        format!("Required argument '{}' is missing", arg_def.name),
                        None,
                    ));
                }
            }
        } else {
            // Check if any required arguments are missing
            let required_args: Vec<_> = template
                .arguments
                .iter()
                .filter(|arg| arg.required)
                .map(|arg| arg.name.as_str())
                .collect();
            if !required_args.is_empty() {
                return Err(ErrorData::invalid_params(
                    format!("Required arguments missing: {}", required_args.join(", ")),
                    None,
                ));
            }
        }

        Ok(GetPromptResult {
            description: Some(template.description.clone()),
            messages: vec![PromptMessage {
                role: PromptMessageRole::User,
                content: PromptMessageContent::text(prompt_text),
            }],
        })
    }
}
