//! Display formatting functions and result types.
//!
//! This module provides wrapper types for formatting collections,
//! operation results, and review state, enabling consistent markdown
//! output across different contexts (terminal, MCP tool results).
//!
//! # Architecture: Display Functions and Wrappers
//!
//! Domain models implement [`std::fmt::Display`] directly (in
//! [`models`]); collections and operation outcomes get newtype wrappers
//! so the same data can be formatted differently depending on context.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Format Functions│    │   Formatted     │
//! │ (Program, ...)  │───▶│ & Result Types  │───▶│    Output       │
//! │                 │    │                 │    │  (Terminal/MCP) │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collections`]: Collection wrapper types (ProgramSummaries,
//!   Workouts)
//! - [`results`]: Operation result types (CreateResult, UpdateResult,
//!   DeleteResult)
//! - [`status`]: Status and confirmation messages (OperationStatus)
//! - [`datetime`]: Date/time formatting utilities
//! - [`models`]: Display implementations for domain models
//! - [`diff`]: Review-specific wrappers (pending changes, apply outcome)

pub mod collections;
pub mod datetime;
pub mod diff;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{ProgramSummaries, Workouts};
pub use datetime::LocalDateTime;
pub use diff::PendingChanges;
pub use results::{CreateResult, DeleteResult, UpdateResult};
pub use status::OperationStatus;
