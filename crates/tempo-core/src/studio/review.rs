//! Review sessions: the diff pipeline wired to persistence.

use serde_json::Value;

use super::Studio;
use crate::{
    diff::{
        ApplyOutcome, DiffStore, IdGenerator, PendingDiff, ProposePolicy, SkippedFragment,
        StreamDecoder, UuidGenerator,
    },
    error::{Result, StudioError},
    params::Id,
};

/// What one `ingest` call added to the pending batch.
#[derive(Debug)]
pub struct IngestSummary {
    /// Number of changes decoded from newly appended fragments
    pub decoded: usize,
    /// Fragments or edits dropped with their reasons
    pub skipped: Vec<SkippedFragment>,
}

/// One in-flight review of assistant-proposed changes against a program.
///
/// A session owns the stream decoder and the pending diff store for a
/// single program; callers hold it for the duration of the review and
/// drop it afterwards. Exactly one batch is pending at a time. There is
/// deliberately no global session registry: whoever drives the review
/// owns the state (a CLI invocation, the MCP server's current
/// conversation).
#[derive(Debug)]
pub struct ReviewSession<G: IdGenerator = UuidGenerator> {
    program_id: u64,
    decoder: StreamDecoder<G>,
    store: DiffStore,
    expected_revision: Option<u64>,
}

impl ReviewSession<UuidGenerator> {
    /// Start a review session for the given program with random change
    /// ids and the merging propose policy.
    pub fn new(program_id: u64) -> Self {
        Self::with_id_generator(program_id, UuidGenerator)
    }
}

impl<G: IdGenerator> ReviewSession<G> {
    /// Start a session with a custom identifier generator.
    pub fn with_id_generator(program_id: u64, ids: G) -> Self {
        Self {
            program_id,
            decoder: StreamDecoder::with_id_generator(ids),
            store: DiffStore::new(ProposePolicy::Merge),
            expected_revision: None,
        }
    }

    /// Use a different propose policy for this session.
    pub fn with_policy(mut self, policy: ProposePolicy) -> Self {
        self.store = DiffStore::new(policy);
        self
    }

    /// Arm the staleness precondition: accepting fails if the stored
    /// program's revision no longer matches.
    pub fn with_expected_revision(mut self, revision: u64) -> Self {
        self.expected_revision = Some(revision);
        self
    }

    /// The program this session reviews changes for.
    pub fn program_id(&self) -> u64 {
        self.program_id
    }

    /// Decode the newly appended suffix of the cumulative fragment
    /// sequence and propose the resulting changes for review.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::InvalidInput` when the sequence is shorter
    /// than what was already processed (the decoder needs the cumulative
    /// sequence; see [`reset_turn`](Self::reset_turn)).
    pub fn ingest(&mut self, fragments: &[Value]) -> Result<IngestSummary> {
        let outcome = self
            .decoder
            .decode(fragments)
            .map_err(|e| StudioError::InvalidInput {
                field: "fragments".to_string(),
                reason: e.to_string(),
            })?;

        let decoded = outcome.changes.len();
        if decoded > 0 {
            self.store.propose(outcome.changes);
        }

        Ok(IngestSummary {
            decoded,
            skipped: outcome.skipped,
        })
    }

    /// The batch currently awaiting review, if any.
    pub fn pending(&self) -> Option<&PendingDiff> {
        self.store.pending()
    }

    /// Discard the pending batch without side effects. No-op when
    /// nothing is pending.
    pub fn reject(&mut self) -> Option<PendingDiff> {
        self.store.reject()
    }

    /// Begin a new assistant turn: the decoder forgets processed
    /// fragments, so the next ingest treats its input as a fresh
    /// sequence. Pending changes are kept for review.
    pub fn reset_turn(&mut self) {
        self.decoder.reset();
    }
}

impl Studio {
    /// Accept the session's pending batch: load the program, apply the
    /// changes, and persist the result.
    ///
    /// Returns `Ok(None)` when nothing was pending. Partial failure is
    /// carried in the returned [`ApplyOutcome`]: conflicted change ids
    /// are listed next to applied ones, and the program is saved with
    /// whatever applied.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::ProgramNotFound` when the program vanished,
    /// and `StudioError::StaleProgram` when the session's expected
    /// revision no longer matches; the batch then stays pending so the
    /// reviewer can re-sync and decide again.
    pub async fn accept_review<G: IdGenerator>(
        &self,
        session: &mut ReviewSession<G>,
    ) -> Result<Option<ApplyOutcome>> {
        if session.store.pending().is_none() {
            return Ok(None);
        }

        let program = self
            .get_program(&Id {
                id: session.program_id,
            })
            .await?
            .ok_or(StudioError::ProgramNotFound {
                id: session.program_id,
            })?;

        if let Some(expected) = session.expected_revision {
            if program.revision != expected {
                return Err(StudioError::StaleProgram {
                    expected,
                    found: program.revision,
                });
            }
        }

        let Some(outcome) = session.store.accept(&program) else {
            return Ok(None);
        };

        let saved = self.save_program(outcome.program).await?;

        Ok(Some(ApplyOutcome {
            program: saved,
            applied: outcome.applied,
            conflicted: outcome.conflicted,
        }))
    }
}
