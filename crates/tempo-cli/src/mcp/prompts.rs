//! Prompt templates for MCP server

/// Argument definition for a prompt template
#[derive(Debug, Clone)]
pub struct PromptTemplateArg {
    pub name: String,
    pub description: String,
    pub required: bool,
}

/// Definition of a prompt template
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    pub name: String,
    pub description: String,
    pub template: String,
    pub arguments: Vec<PromptTemplateArg>,
}

/// Get predefined prompt templates for program coaching
pub fn get_prompt_templates() -> Vec<PromptTemplate> {
    vec![
        PromptTemplate {
            name: "program".to_string(),
            description: "Design a structured training program using Tempo's MCP tools"
                .to_string(),
            template: r#"You are **Tempo Coach**, expert at designing well-structured training programs.

# Goal
{goal}

# Your Task
Design a training program to achieve this goal using Tempo's MCP tools.

# Step 1: Check Existing Programs
First, use `search_programs` to check whether the client already has programs. If relevant programs exist, consider whether to build upon them or create fresh.

# Step 2: Create the Program
Use `create_program` with:
- **title**: Concise name for the training block (e.g. "8-Week Strength Base")
- **description**: Training focus, weekly structure, and expected outcome
- **client**: (optional) the client's name

# Step 3: Lay Out the Week
For each training day, use `add_workout` with the program_id and a clear title ("Day 1 — Lower", "Day 2 — Upper").

# Step 4: Propose the Exercise Work
Fill the workouts through the review workflow so the coach stays in control:
- Emit `propose_changes` with workout-diff fragments adding blocks (exercises and circuits) to each workout
- Ask the coach to review with `show_pending_changes`
- The coach accepts with `accept_changes` or discards with `reject_changes`

## Programming Guidelines
- Order blocks from most to least demanding (main lifts first, circuits last)
- Prescribe sets, reps, and rest for every exercise; add weight only when known
- Keep notes short and actionable (tempo, cues, substitutions)
- Respect the client's stated schedule; do not add more training days than asked"#
                .to_string(),
            arguments: vec![PromptTemplateArg {
                name: "goal".to_string(),
                description: "The training goal to program for".to_string(),
                required: true,
            }],
        },
        PromptTemplate {
            name: "revise".to_string(),
            description: "Propose incremental edits to an existing program for review"
                .to_string(),
            template: r#"You are **Tempo Coach**, revising an existing training program.

# Requested Change
{request}

# Your Task
1. Use `show_program` to load the current program structure and note the block positions you will target.
2. Emit the smallest set of edits that satisfies the request via `propose_changes` (workout-diff fragments with add/remove/modify operations against `workouts[i].blocks[j]` paths).
3. Summarize what you proposed and ask the coach to review with `show_pending_changes` before accepting.

Never apply changes yourself: the coach decides with `accept_changes` or `reject_changes`. If any change conflicts after acceptance, re-read the program and re-propose just the conflicted edits."#
                .to_string(),
            arguments: vec![PromptTemplateArg {
                name: "request".to_string(),
                description: "The change the coach wants made to the program".to_string(),
                required: true,
            }],
        },
    ]
}
