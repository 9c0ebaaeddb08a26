//! Status enumeration for programs.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type-safe enumeration of program statuses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProgramStatus {
    /// Program is active and visible
    #[default]
    Active,

    /// Program is archived and hidden from normal views
    Archived,
}

impl FromStr for ProgramStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(ProgramStatus::Active),
            "archived" => Ok(ProgramStatus::Archived),
            _ => Err(format!("Invalid program status: {s}")),
        }
    }
}

impl ProgramStatus {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgramStatus::Active => "active",
            ProgramStatus::Archived => "archived",
        }
    }
}
