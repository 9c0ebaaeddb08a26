//! Pending diff store: the EMPTY/PENDING review state machine.

use super::apply::{apply_batch, ApplyOutcome};
use super::change::Change;
use crate::models::Program;

/// The batch of changes currently awaiting review.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingDiff {
    /// Changes in arrival order
    pub changes: Vec<Change>,
}

impl PendingDiff {
    /// Number of pending changes.
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Whether the batch holds no changes.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

/// How `propose` resolves when a batch is already pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProposePolicy {
    /// Append changes whose id is not already pending, preserving arrival
    /// order. Successive decoder emissions within one assistant turn
    /// accumulate into a single batch, and replayed ids deduplicate.
    #[default]
    Merge,
    /// Drop the prior batch and pend only the new one. Used when a new
    /// assistant turn supersedes an unreviewed proposal.
    Replace,
}

/// Holds the one batch of not-yet-applied changes.
///
/// Two states: EMPTY (no pending batch) and PENDING. `accept` and
/// `reject` on EMPTY are no-ops. The store owns no persistence; applying
/// only transforms the program it is handed, and the caller decides what
/// to do with the outcome.
#[derive(Debug, Default)]
pub struct DiffStore {
    pending: Option<PendingDiff>,
    policy: ProposePolicy,
}

impl DiffStore {
    /// Create an empty store with the given propose policy.
    pub fn new(policy: ProposePolicy) -> Self {
        Self {
            pending: None,
            policy,
        }
    }

    /// The batch awaiting review, if any.
    pub fn pending(&self) -> Option<&PendingDiff> {
        self.pending.as_ref()
    }

    /// Propose changes for review.
    ///
    /// EMPTY → PENDING with the given changes. When already PENDING the
    /// store's [`ProposePolicy`] decides between merging and replacing.
    /// Proposing nothing on an empty store stays EMPTY.
    pub fn propose(&mut self, changes: Vec<Change>) {
        if self.policy == ProposePolicy::Merge {
            if let Some(pending) = self.pending.as_mut() {
                for change in changes {
                    let duplicate = pending.changes.iter().any(|c| c.id == change.id);
                    if !duplicate {
                        pending.changes.push(change);
                    }
                }
                return;
            }
        }

        if changes.is_empty() && self.pending.is_none() {
            return;
        }
        self.pending = Some(PendingDiff { changes });
    }

    /// Accept the pending batch: apply it against `program` and return to
    /// EMPTY regardless of per-change outcome. Partial failure lives in
    /// the returned [`ApplyOutcome`]'s conflicted list. Returns `None`
    /// when nothing was pending.
    pub fn accept(&mut self, program: &Program) -> Option<ApplyOutcome> {
        let batch = self.pending.take()?;
        Some(apply_batch(program, &batch.changes))
    }

    /// Reject the pending batch, returning it without side effects.
    /// Returns `None` when nothing was pending.
    pub fn reject(&mut self) -> Option<PendingDiff> {
        self.pending.take()
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::diff::change::ChangeOp;
    use crate::models::ProgramStatus;

    fn change(id: &str) -> Change {
        Change {
            id: id.to_string(),
            target: "workouts[0]".parse().unwrap(),
            op: ChangeOp::Remove,
        }
    }

    fn empty_program() -> Program {
        Program {
            id: 1,
            title: "Base".to_string(),
            description: None,
            client: None,
            status: ProgramStatus::Active,
            revision: 0,
            created_at: Timestamp::from_second(1640995200).unwrap(),
            updated_at: Timestamp::from_second(1640995200).unwrap(),
            workouts: vec![],
        }
    }

    #[test]
    fn test_propose_then_reject_discards_without_side_effects() {
        let mut store = DiffStore::default();
        store.propose(vec![change("a")]);
        assert_eq!(store.pending().map(PendingDiff::len), Some(1));

        let discarded = store.reject().expect("batch should be pending");
        assert_eq!(discarded.changes[0].id, "a");
        assert!(store.pending().is_none());
    }

    #[test]
    fn test_accept_and_reject_on_empty_are_noops() {
        let mut store = DiffStore::default();
        assert!(store.reject().is_none());
        assert!(store.accept(&empty_program()).is_none());
        assert!(store.pending().is_none());
    }

    #[test]
    fn test_accept_transitions_to_empty_even_on_conflicts() {
        let mut store = DiffStore::default();
        // Targets nothing: the program has no workouts
        store.propose(vec![change("a")]);

        let outcome = store
            .accept(&empty_program())
            .expect("batch should be pending");
        assert_eq!(outcome.conflicted, vec!["a"]);
        assert!(store.pending().is_none());
    }

    #[test]
    fn test_merge_policy_accumulates_and_dedupes() {
        let mut store = DiffStore::new(ProposePolicy::Merge);
        store.propose(vec![change("a")]);
        store.propose(vec![change("a"), change("b")]);

        let pending = store.pending().expect("batch should be pending");
        let ids: Vec<&str> = pending.changes.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_replace_policy_drops_prior_batch() {
        let mut store = DiffStore::new(ProposePolicy::Replace);
        store.propose(vec![change("a")]);
        store.propose(vec![change("b")]);

        let pending = store.pending().expect("batch should be pending");
        let ids: Vec<&str> = pending.changes.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["b"]);
    }

    #[test]
    fn test_propose_nothing_on_empty_stays_empty() {
        let mut store = DiffStore::default();
        store.propose(vec![]);
        assert!(store.pending().is_none());
    }
}
