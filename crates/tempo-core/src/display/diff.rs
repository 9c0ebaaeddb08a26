//! Review-specific display wrappers: pending changes and apply outcomes.

use std::fmt;

use crate::diff::{AddPayload, ApplyOutcome, Change, ChangeOp, PendingDiff};

/// Newtype wrapper for displaying a pending change batch.
///
/// Lists every proposed change with its operation, target path, and a
/// short description of the payload so a reviewer can decide before
/// accepting.
pub struct PendingChanges<'a>(pub &'a PendingDiff);

impl<'a> fmt::Display for PendingChanges<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No pending changes.");
        }

        writeln!(f, "# Pending Changes")?;
        writeln!(f)?;
        for (index, change) in self.0.changes.iter().enumerate() {
            writeln!(f, "{}. {} `{}`", index + 1, describe(change), change.id)?;
        }

        Ok(())
    }
}

/// One-line human description of a change.
fn describe(change: &Change) -> String {
    match &change.op {
        ChangeOp::Add { payload } => {
            let what = match payload {
                AddPayload::Workout(draft) => format!("workout '{}'", draft.title),
                AddPayload::Block(block) => format!("block '{}'", block.name()),
                AddPayload::Exercise(exercise) => format!("exercise '{}'", exercise.name),
            };
            format!("add {} at {}", what, change.target)
        }
        ChangeOp::Remove => format!("remove {}", change.target),
        ChangeOp::Modify { payload } => {
            let fields: Vec<&str> = payload.keys().map(String::as_str).collect();
            format!("modify {} ({})", change.target, fields.join(", "))
        }
    }
}

impl fmt::Display for ApplyOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Applied {} change(s) to program '{}'; now at revision {}.",
            self.applied.len(),
            self.program.title,
            self.program.revision
        )?;

        // Conflicts are surfaced separately so the reviewer can re-request
        // or resolve them by hand
        if !self.conflicted.is_empty() {
            writeln!(f)?;
            writeln!(
                f,
                "Conflicted change(s) whose target could not be resolved:"
            )?;
            for id in &self.conflicted {
                writeln!(f, "- `{id}`")?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{PendingDiff, TargetPath};

    fn remove_change(id: &str, target: &str) -> Change {
        Change {
            id: id.to_string(),
            target: target.parse::<TargetPath>().unwrap(),
            op: ChangeOp::Remove,
        }
    }

    #[test]
    fn test_pending_changes_display() {
        let pending = PendingDiff {
            changes: vec![
                remove_change("a", "workouts[0].blocks[1]"),
                remove_change("b", "workouts[2]"),
            ],
        };

        let output = format!("{}", PendingChanges(&pending));
        assert!(output.contains("# Pending Changes"));
        assert!(output.contains("1. remove workouts[0].blocks[1] `a`"));
        assert!(output.contains("2. remove workouts[2] `b`"));
    }

    #[test]
    fn test_empty_pending_changes_display() {
        let pending = PendingDiff { changes: vec![] };
        assert_eq!(
            format!("{}", PendingChanges(&pending)),
            "No pending changes.\n"
        );
    }
}
