//! Change encoding: the wire envelope and the decoded edit records.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::path::TargetPath;
use crate::models::{Block, Exercise};

/// Fragment kind recognized by the decoder. Fragments carrying any other
/// kind are ignored as a forward-compatible no-op.
pub const WORKOUT_DIFF_KIND: &str = "workout-diff";

/// Wire form of a recognized fragment: a kind tag and a list of raw edits.
#[derive(Debug, Clone, Deserialize)]
pub struct FragmentEnvelope {
    /// Fragment kind discriminant
    #[serde(rename = "type")]
    pub kind: String,

    /// Proposed edits carried by this fragment
    #[serde(default)]
    pub content: Vec<RawEdit>,
}

/// One edit as emitted by the assistant, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEdit {
    /// Source-assigned identifier; backfilled by the decoder when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Raw target path into the program tree
    pub target: String,

    /// Operation kind
    pub op: OpKind,

    /// Operation payload (entity for `add`, partial object for `modify`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

/// The three mutation intents a change can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpKind {
    Add,
    Remove,
    Modify,
}

/// Payload of a validated `add` operation; the variant matches the entity
/// type held by the target collection.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum AddPayload {
    /// New workout for the program's workout list
    Workout(WorkoutDraft),
    /// New block for a workout's block list
    Block(Block),
    /// New exercise for a circuit's member list
    Exercise(Exercise),
}

/// The content of a workout proposed through the diff protocol. Identity
/// and timestamps are assigned when the program is persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkoutDraft {
    /// Workout title
    pub title: String,

    /// Optional workout description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Initial blocks, in order
    #[serde(default)]
    pub blocks: Vec<Block>,
}

/// A validated operation with its payload.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum ChangeOp {
    /// Insert the payload at the target position (append when the target
    /// path carries no index)
    Add { payload: AddPayload },
    /// Delete the entity at the target path
    Remove,
    /// Shallow-merge the partial object into the entity at the target path
    Modify {
        payload: serde_json::Map<String, Value>,
    },
}

/// One decoded, validated edit against a program.
///
/// Content is immutable after decoding; the only decode-time mutation is
/// identifier assignment. The `id` is the idempotency key used to
/// deduplicate repeated delivery and to report apply outcomes.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Change {
    /// Non-empty, batch-unique identifier
    pub id: String,

    /// Locator into the program tree
    pub target: TargetPath,

    /// Operation and payload
    #[serde(flatten)]
    pub op: ChangeOp,
}

/// A raw edit with its target parsed and payload validated, but no
/// identifier assigned yet.
#[derive(Debug, Clone)]
pub struct DecodedEdit {
    pub id: Option<String>,
    pub target: TargetPath,
    pub op: ChangeOp,
}

impl RawEdit {
    /// Validate this edit against the program's entity shapes.
    ///
    /// `add` requires a payload that deserializes into the entity type the
    /// target collection holds; `remove` and `modify` require an element
    /// path, and `modify` additionally a non-empty partial object.
    /// Malformed edits are rejected here, at decode time, never coerced.
    pub fn decode(self) -> Result<DecodedEdit, String> {
        let target: TargetPath = self.target.parse()?;

        let op = match self.op {
            OpKind::Add => {
                let payload = self
                    .payload
                    .ok_or_else(|| format!("Add at '{target}' is missing a payload"))?;
                let payload = decode_add_payload(&target, payload)?;
                ChangeOp::Add { payload }
            }
            OpKind::Remove => {
                if !target.is_element() {
                    return Err(format!("Remove needs an element path, got '{target}'"));
                }
                ChangeOp::Remove
            }
            OpKind::Modify => {
                if !target.is_element() {
                    return Err(format!("Modify needs an element path, got '{target}'"));
                }
                let payload = match self.payload {
                    Some(Value::Object(map)) if !map.is_empty() => map,
                    Some(Value::Object(_)) => {
                        return Err(format!("Modify at '{target}' has an empty payload"))
                    }
                    Some(_) => {
                        return Err(format!("Modify at '{target}' needs an object payload"))
                    }
                    None => return Err(format!("Modify at '{target}' is missing a payload")),
                };
                ChangeOp::Modify { payload }
            }
        };

        let id = self.id.filter(|id| !id.is_empty());
        Ok(DecodedEdit { id, target, op })
    }
}

/// Check an `add` payload against the entity shape of the target depth.
fn decode_add_payload(target: &TargetPath, payload: Value) -> Result<AddPayload, String> {
    match target {
        TargetPath::Workouts { .. } => serde_json::from_value::<WorkoutDraft>(payload)
            .map(AddPayload::Workout)
            .map_err(|e| format!("Payload is not a valid workout: {e}")),
        TargetPath::Blocks { .. } => serde_json::from_value::<Block>(payload)
            .map(AddPayload::Block)
            .map_err(|e| format!("Payload is not a valid block: {e}")),
        TargetPath::CircuitExercises { .. } => serde_json::from_value::<Exercise>(payload)
            .map(AddPayload::Exercise)
            .map_err(|e| format!("Payload is not a valid exercise: {e}")),
    }
}
