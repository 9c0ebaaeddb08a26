//! Stream decoder: turns the assistant's fragment sequence into changes.

use std::collections::HashSet;

use serde_json::Value;
use thiserror::Error;

use super::change::{Change, FragmentEnvelope, WORKOUT_DIFF_KIND};

/// Source of change identifiers.
///
/// The default implementation generates random UUIDs; tests inject a
/// deterministic generator so decoded batches are stable to assert on.
pub trait IdGenerator {
    /// Produce the next identifier.
    fn generate(&mut self) -> String;
}

/// Random UUID v4 identifiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&mut self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Deterministic `prefix-N` identifiers for tests.
#[derive(Debug, Clone)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: u64,
}

impl SequentialIdGenerator {
    /// Create a generator yielding `prefix-1`, `prefix-2`, …
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 0,
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn generate(&mut self) -> String {
        self.next += 1;
        format!("{}-{}", self.prefix, self.next)
    }
}

/// Errors the decoder refuses to paper over.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DecodeError {
    /// The caller supplied fewer fragments than were already processed.
    /// The decoder requires the cumulative sequence; a shorter one would
    /// silently skip fragments. Call [`StreamDecoder::reset`] to start a
    /// new assistant turn instead.
    #[error("fragment sequence shrank from {processed} to {observed}; supply the cumulative sequence or reset() for a new turn")]
    TruncatedStream { processed: usize, observed: usize },
}

/// A fragment (or one of its edits) dropped during decoding, with the
/// reason, so callers can log or surface it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFragment {
    /// Index of the fragment in the cumulative sequence
    pub fragment_index: usize,
    /// Why it was dropped
    pub reason: String,
}

/// Result of one decode pass: the newly decoded changes plus anything
/// that was dropped on the way.
#[derive(Debug, Default)]
pub struct DecodeOutcome {
    /// Changes decoded from newly appended fragments, in arrival order
    pub changes: Vec<Change>,
    /// Fragments or edits dropped with their reasons
    pub skipped: Vec<SkippedFragment>,
}

/// Incremental decoder over the assistant's append-only fragment stream.
///
/// The decoder tracks how many leading fragments it has already processed.
/// Each [`decode`](Self::decode) call must receive the *cumulative*
/// sequence observed so far; only the suffix beyond the processed count is
/// interpreted, so replaying an already-seen prefix never re-emits
/// changes. Fragments whose kind is not recognized are ignored.
#[derive(Debug)]
pub struct StreamDecoder<G = UuidGenerator> {
    processed: usize,
    ids: G,
}

impl StreamDecoder<UuidGenerator> {
    /// Create a decoder with random UUID identifier assignment.
    pub fn new() -> Self {
        Self::with_id_generator(UuidGenerator)
    }
}

impl Default for StreamDecoder<UuidGenerator> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: IdGenerator> StreamDecoder<G> {
    /// Create a decoder with a custom identifier generator.
    pub fn with_id_generator(ids: G) -> Self {
        Self { processed: 0, ids }
    }

    /// Number of leading fragments already processed.
    pub fn processed(&self) -> usize {
        self.processed
    }

    /// Start a new assistant turn: forget all processed fragments. The
    /// next decode call treats the supplied sequence as fresh, which is
    /// how a new turn supersedes an interrupted one.
    pub fn reset(&mut self) {
        self.processed = 0;
    }

    /// Decode the newly appended suffix of the cumulative sequence.
    ///
    /// Each recognized edit becomes exactly one [`Change`]; edits without
    /// an id (and edits whose id collides with one already decoded in
    /// this pass) get a generated one, keeping ids batch-unique.
    /// Malformed fragments and edits are dropped into the outcome's
    /// `skipped` list; they never abort the rest of the stream.
    ///
    /// # Errors
    ///
    /// [`DecodeError::TruncatedStream`] when `fragments` is shorter than
    /// the processed count.
    pub fn decode(&mut self, fragments: &[Value]) -> Result<DecodeOutcome, DecodeError> {
        if fragments.len() < self.processed {
            return Err(DecodeError::TruncatedStream {
                processed: self.processed,
                observed: fragments.len(),
            });
        }

        let mut outcome = DecodeOutcome::default();
        let mut seen_ids: HashSet<String> = HashSet::new();

        for (offset, fragment) in fragments[self.processed..].iter().enumerate() {
            let fragment_index = self.processed + offset;
            self.decode_fragment(fragment, fragment_index, &mut seen_ids, &mut outcome);
        }

        self.processed = fragments.len();
        Ok(outcome)
    }

    fn decode_fragment(
        &mut self,
        fragment: &Value,
        fragment_index: usize,
        seen_ids: &mut HashSet<String>,
        outcome: &mut DecodeOutcome,
    ) {
        // Only object fragments with a string `type` tag are candidates;
        // everything else is an unrecognized kind and a deliberate no-op.
        let kind = fragment.get("type").and_then(Value::as_str);
        if kind != Some(WORKOUT_DIFF_KIND) {
            return;
        }

        let envelope: FragmentEnvelope = match serde_json::from_value(fragment.clone()) {
            Ok(envelope) => envelope,
            Err(e) => {
                outcome.skipped.push(SkippedFragment {
                    fragment_index,
                    reason: format!("Malformed workout-diff fragment: {e}"),
                });
                return;
            }
        };

        for (edit_index, raw) in envelope.content.into_iter().enumerate() {
            match raw.decode() {
                Ok(decoded) => {
                    let id = match decoded.id {
                        Some(id) if !seen_ids.contains(&id) => id,
                        _ => self.ids.generate(),
                    };
                    seen_ids.insert(id.clone());
                    outcome.changes.push(Change {
                        id,
                        target: decoded.target,
                        op: decoded.op,
                    });
                }
                Err(reason) => outcome.skipped.push(SkippedFragment {
                    fragment_index,
                    reason: format!("Edit {edit_index}: {reason}"),
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn test_decoder() -> StreamDecoder<SequentialIdGenerator> {
        StreamDecoder::with_id_generator(SequentialIdGenerator::new("gen"))
    }

    fn diff_fragment(edits: Value) -> Value {
        json!({ "type": "workout-diff", "content": edits })
    }

    #[test]
    fn test_decode_emits_each_fragment_once() {
        let mut decoder = test_decoder();
        let mut fragments = vec![diff_fragment(json!([
            { "id": "a", "target": "workouts[0].blocks[0]", "op": "remove" }
        ]))];

        let first = decoder.decode(&fragments).expect("decode failed");
        assert_eq!(first.changes.len(), 1);
        assert_eq!(first.changes[0].id, "a");

        // Replaying the same cumulative sequence yields nothing new
        let replay = decoder.decode(&fragments).expect("decode failed");
        assert!(replay.changes.is_empty());

        // Appending a fragment yields only the new change
        fragments.push(diff_fragment(json!([
            { "id": "b", "target": "workouts[0].blocks[1]", "op": "remove" }
        ])));
        let second = decoder.decode(&fragments).expect("decode failed");
        assert_eq!(second.changes.len(), 1);
        assert_eq!(second.changes[0].id, "b");
    }

    #[test]
    fn test_decode_backfills_missing_ids() {
        let mut decoder = test_decoder();
        let fragments = vec![diff_fragment(json!([
            { "target": "workouts[0].blocks[0]", "op": "remove" },
            { "target": "workouts[0].blocks[1]", "op": "remove" }
        ]))];

        let outcome = decoder.decode(&fragments).expect("decode failed");
        assert_eq!(outcome.changes.len(), 2);
        assert_eq!(outcome.changes[0].id, "gen-1");
        assert_eq!(outcome.changes[1].id, "gen-2");
    }

    #[test]
    fn test_decode_keeps_ids_batch_unique() {
        let mut decoder = test_decoder();
        let fragments = vec![diff_fragment(json!([
            { "id": "dup", "target": "workouts[0].blocks[0]", "op": "remove" },
            { "id": "dup", "target": "workouts[0].blocks[1]", "op": "remove" }
        ]))];

        let outcome = decoder.decode(&fragments).expect("decode failed");
        assert_eq!(outcome.changes[0].id, "dup");
        assert_eq!(outcome.changes[1].id, "gen-1");
    }

    #[test]
    fn test_decode_ignores_unrecognized_fragments() {
        let mut decoder = test_decoder();
        let fragments = vec![
            json!({ "type": "narration", "content": "Adding a bench press..." }),
            json!("free text"),
            json!(42),
            diff_fragment(json!([
                { "id": "a", "target": "workouts[0].blocks[0]", "op": "remove" }
            ])),
        ];

        let outcome = decoder.decode(&fragments).expect("decode failed");
        assert_eq!(outcome.changes.len(), 1);
        assert!(outcome.skipped.is_empty());
    }

    #[test]
    fn test_decode_reports_malformed_edits_without_aborting() {
        let mut decoder = test_decoder();
        let fragments = vec![diff_fragment(json!([
            { "target": "not a path", "op": "remove" },
            { "id": "ok", "target": "workouts[0].blocks[0]", "op": "remove" }
        ]))];

        let outcome = decoder.decode(&fragments).expect("decode failed");
        assert_eq!(outcome.changes.len(), 1);
        assert_eq!(outcome.changes[0].id, "ok");
        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.skipped[0].fragment_index, 0);
    }

    #[test]
    fn test_decode_rejects_truncated_sequence() {
        let mut decoder = test_decoder();
        let fragments = vec![
            diff_fragment(json!([])),
            diff_fragment(json!([])),
        ];
        decoder.decode(&fragments).expect("decode failed");

        let err = decoder.decode(&fragments[..1]).unwrap_err();
        assert_eq!(
            err,
            DecodeError::TruncatedStream {
                processed: 2,
                observed: 1
            }
        );

        // A reset starts a fresh turn over the shorter sequence
        decoder.reset();
        assert!(decoder.decode(&fragments[..1]).is_ok());
    }
}
