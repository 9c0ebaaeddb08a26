//! Diff applier: transforms a program by an accepted change batch.

use jiff::Timestamp;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::change::{AddPayload, Change, ChangeOp};
use super::path::TargetPath;
use crate::models::{Block, Program, Workout};

/// Result of applying a batch: the next program plus which change ids
/// landed and which conflicted.
#[derive(Debug, Clone)]
pub struct ApplyOutcome {
    /// The transformed program
    pub program: Program,
    /// Ids of changes that were applied, in batch order
    pub applied: Vec<String>,
    /// Ids of changes whose target could not be resolved
    pub conflicted: Vec<String>,
}

/// Apply `changes` to `program` in batch order.
///
/// Application is best effort: a change whose target does not resolve
/// (index out of range, wrong entity kind, merge producing an invalid
/// shape) is recorded as a conflict and the remaining changes still
/// apply. Indices always address the tree as left by the previous change
/// in the batch. The program revision is bumped once when anything
/// applied.
pub fn apply_batch(program: &Program, changes: &[Change]) -> ApplyOutcome {
    let mut next = program.clone();
    let mut applied = Vec::new();
    let mut conflicted = Vec::new();

    for change in changes {
        match apply_change(&mut next, change) {
            Ok(()) => applied.push(change.id.clone()),
            Err(_) => conflicted.push(change.id.clone()),
        }
    }

    // Workout positions are part of the model contract; renumber after
    // any structural edits.
    for (index, workout) in next.workouts.iter_mut().enumerate() {
        workout.position = index as u32;
    }

    if !applied.is_empty() {
        next.revision += 1;
    }

    ApplyOutcome {
        program: next,
        applied,
        conflicted,
    }
}

fn apply_change(program: &mut Program, change: &Change) -> Result<(), String> {
    match (change.target, &change.op) {
        (TargetPath::Workouts { index }, ChangeOp::Add { payload }) => {
            let AddPayload::Workout(draft) = payload else {
                return Err("Payload does not match the workout list".into());
            };
            let position = insertion_point(index, program.workouts.len())?;
            let now = Timestamp::now();
            program.workouts.insert(
                position,
                Workout {
                    // Persisted ids are assigned when the program is saved
                    id: 0,
                    program_id: program.id,
                    title: draft.title.clone(),
                    description: draft.description.clone(),
                    position: position as u32,
                    blocks: draft.blocks.clone(),
                    created_at: now,
                    updated_at: now,
                },
            );
            Ok(())
        }
        (TargetPath::Workouts { index }, ChangeOp::Remove) => {
            let index = element_index(index, program.workouts.len())?;
            program.workouts.remove(index);
            Ok(())
        }
        (TargetPath::Workouts { index }, ChangeOp::Modify { payload }) => {
            let index = element_index(index, program.workouts.len())?;
            let workout = &program.workouts[index];
            let mut merged: Workout = shallow_merge(workout, payload)?;
            // Identity and placement are not editable through the diff
            merged.id = workout.id;
            merged.program_id = workout.program_id;
            merged.position = workout.position;
            merged.created_at = workout.created_at;
            program.workouts[index] = merged;
            Ok(())
        }
        (TargetPath::Blocks { workout, index }, ChangeOp::Add { payload }) => {
            let AddPayload::Block(block) = payload else {
                return Err("Payload does not match the block list".into());
            };
            let blocks = &mut workout_at(program, workout)?.blocks;
            let position = insertion_point(index, blocks.len())?;
            blocks.insert(position, block.clone());
            Ok(())
        }
        (TargetPath::Blocks { workout, index }, ChangeOp::Remove) => {
            let blocks = &mut workout_at(program, workout)?.blocks;
            let index = element_index(index, blocks.len())?;
            blocks.remove(index);
            Ok(())
        }
        (TargetPath::Blocks { workout, index }, ChangeOp::Modify { payload }) => {
            let blocks = &mut workout_at(program, workout)?.blocks;
            let index = element_index(index, blocks.len())?;
            blocks[index] = shallow_merge(&blocks[index], payload)?;
            Ok(())
        }
        (TargetPath::CircuitExercises { workout, block, index }, op) => {
            let blocks = &mut workout_at(program, workout)?.blocks;
            if block >= blocks.len() {
                return Err(format!("No block at index {block}"));
            }
            let Block::Circuit(circuit) = &mut blocks[block] else {
                return Err(format!("Block at index {block} is not a circuit"));
            };
            match op {
                ChangeOp::Add { payload } => {
                    let AddPayload::Exercise(exercise) = payload else {
                        return Err("Payload does not match the exercise list".into());
                    };
                    let position = insertion_point(index, circuit.exercises.len())?;
                    circuit.exercises.insert(position, exercise.clone());
                    Ok(())
                }
                ChangeOp::Remove => {
                    let index = element_index(index, circuit.exercises.len())?;
                    circuit.exercises.remove(index);
                    Ok(())
                }
                ChangeOp::Modify { payload } => {
                    let index = element_index(index, circuit.exercises.len())?;
                    circuit.exercises[index] = shallow_merge(&circuit.exercises[index], payload)?;
                    Ok(())
                }
            }
        }
    }
}

fn workout_at(program: &mut Program, index: usize) -> Result<&mut Workout, String> {
    let len = program.workouts.len();
    program
        .workouts
        .get_mut(index)
        .ok_or_else(|| format!("No workout at index {index} (program has {len})"))
}

/// Resolve an `add` target: no index appends, an index up to and
/// including the length inserts there.
fn insertion_point(index: Option<usize>, len: usize) -> Result<usize, String> {
    match index {
        None => Ok(len),
        Some(index) if index <= len => Ok(index),
        Some(index) => Err(format!("Insert position {index} is out of range (len {len})")),
    }
}

fn element_index(index: Option<usize>, len: usize) -> Result<usize, String> {
    match index {
        Some(index) if index < len => Ok(index),
        Some(index) => Err(format!("No element at index {index} (len {len})")),
        None => Err("Element path required".into()),
    }
}

/// Merge a partial object into an entity and re-validate the result by
/// round-tripping through its serde shape.
fn shallow_merge<T>(base: &T, patch: &serde_json::Map<String, Value>) -> Result<T, String>
where
    T: Serialize + DeserializeOwned,
{
    let mut value = serde_json::to_value(base).map_err(|e| e.to_string())?;
    let Value::Object(fields) = &mut value else {
        return Err("Entity did not serialize to an object".into());
    };
    for (key, patch_value) in patch {
        fields.insert(key.clone(), patch_value.clone());
    }
    serde_json::from_value(value).map_err(|e| format!("Merged entity is invalid: {e}"))
}
