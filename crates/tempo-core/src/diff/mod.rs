//! The workout diff protocol: assistant-proposed edits under review.
//!
//! An AI assistant proposes incremental edits to a program as a stream of
//! fragments; a reviewer accepts or rejects the accumulated batch. This
//! module implements the whole pipeline:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  StreamDecoder  │    │    DiffStore    │    │   apply_batch   │
//! │ (fragments →    │───▶│ (EMPTY/PENDING, │───▶│ (program →      │
//! │  typed Changes) │    │  accept/reject) │    │  next program)  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!   Stream Decoding        Review State            Application
//! ```
//!
//! ## Submodules
//!
//! - [`change`]: the wire envelope and decoded [`Change`] records
//! - [`path`]: [`TargetPath`] locators into the program tree
//! - [`decoder`]: incremental [`StreamDecoder`] with injectable id
//!   generation
//! - [`store`]: the [`DiffStore`] state machine
//! - [`apply`]: best-effort batch application with per-change conflicts
//!
//! ## Guarantees
//!
//! 1. A fragment is decoded exactly once as long as callers supply the
//!    cumulative sequence; truncated sequences are an error, not a silent
//!    skip.
//! 2. Every decoded change carries a non-empty id, unique within its
//!    decode pass.
//! 3. Changes apply in batch order; an unresolvable target conflicts that
//!    one change and never aborts the rest.
//! 4. Rejecting a batch leaves the program untouched.

pub mod apply;
pub mod change;
pub mod decoder;
pub mod path;
pub mod store;

// Re-export the protocol surface at the diff level
pub use apply::{apply_batch, ApplyOutcome};
pub use change::{AddPayload, Change, ChangeOp, OpKind, RawEdit, WorkoutDraft, WORKOUT_DIFF_KIND};
pub use decoder::{
    DecodeError, DecodeOutcome, IdGenerator, SequentialIdGenerator, SkippedFragment,
    StreamDecoder, UuidGenerator,
};
pub use path::TargetPath;
pub use store::{DiffStore, PendingDiff, ProposePolicy};
