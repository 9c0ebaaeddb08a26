//! Filter types for querying programs.

use jiff::Timestamp;

use super::ProgramStatus;

/// Filter options for querying programs.
#[derive(Debug, Clone, Default)]
pub struct ProgramFilter {
    /// Filter by program title (case-insensitive partial match)
    pub title_contains: Option<String>,

    /// Filter by client name (exact match)
    pub client: Option<String>,

    /// Filter by creation date range
    pub created_after: Option<Timestamp>,
    pub created_before: Option<Timestamp>,

    /// Filter by program status (active/archived)
    /// If None, defaults to showing only active programs
    pub status: Option<ProgramStatus>,

    /// Show all programs regardless of status
    pub include_archived: bool,
}

impl ProgramFilter {
    /// Create a client-specific program filter for search operations.
    ///
    /// Combines client filtering with archived status filtering, matching
    /// the behavior of the `search_programs` operations.
    pub fn for_client(client: String, archived: bool) -> Self {
        Self {
            status: Some(if archived {
                ProgramStatus::Archived
            } else {
                ProgramStatus::Active
            }),
            client: Some(client),
            include_archived: archived,
            ..Default::default()
        }
    }
}

impl From<&crate::params::ListPrograms> for ProgramFilter {
    /// Convert ListPrograms parameters to a ProgramFilter for queries.
    ///
    /// - `archived: false` → Filter for active programs only
    /// - `archived: true` → Filter for archived programs only
    fn from(params: &crate::params::ListPrograms) -> Self {
        if params.archived {
            Self {
                status: Some(ProgramStatus::Archived),
                include_archived: true,
                ..Default::default()
            }
        } else {
            Self {
                status: Some(ProgramStatus::Active),
                include_archived: false,
                ..Default::default()
            }
        }
    }
}
