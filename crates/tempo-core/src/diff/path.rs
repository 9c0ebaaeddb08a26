//! Target path locators into the program tree.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A typed locator addressing a collection or element in the program tree.
///
/// Paths follow the nesting of the domain model: workouts, blocks within a
/// workout, and exercises within a circuit block. A path without a trailing
/// index addresses the collection itself (the insertion point for `add`
/// operations); a trailing index addresses one element.
///
/// The canonical text form uses plural segment names
/// (`workouts[0].blocks[2].exercises[1]`); singular spellings are accepted
/// on input since assistants emit both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetPath {
    /// The workout list, or one workout
    Workouts { index: Option<usize> },
    /// A workout's block list, or one block
    Blocks {
        workout: usize,
        index: Option<usize>,
    },
    /// A circuit block's exercise list, or one member exercise
    CircuitExercises {
        workout: usize,
        block: usize,
        index: Option<usize>,
    },
}

impl TargetPath {
    /// The trailing index, when the path addresses a single element.
    pub fn index(&self) -> Option<usize> {
        match self {
            TargetPath::Workouts { index }
            | TargetPath::Blocks { index, .. }
            | TargetPath::CircuitExercises { index, .. } => *index,
        }
    }

    /// Whether the path addresses a single element rather than a
    /// collection. `remove` and `modify` require an element path.
    pub fn is_element(&self) -> bool {
        self.index().is_some()
    }
}

/// One parsed `name` or `name[index]` path segment.
fn parse_segment(segment: &str) -> Result<(&str, Option<usize>), String> {
    if let Some(open) = segment.find('[') {
        let close = segment
            .find(']')
            .ok_or_else(|| format!("Unclosed index in path segment '{segment}'"))?;
        if close != segment.len() - 1 || close <= open {
            return Err(format!("Malformed index in path segment '{segment}'"));
        }
        let index = segment[open + 1..close]
            .parse::<usize>()
            .map_err(|_| format!("Invalid index in path segment '{segment}'"))?;
        Ok((&segment[..open], Some(index)))
    } else {
        Ok((segment, None))
    }
}

impl FromStr for TargetPath {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut segments = s.split('.');

        let first = segments
            .next()
            .filter(|segment| !segment.is_empty())
            .ok_or_else(|| "Empty target path".to_string())?;
        let (name, workout_index) = parse_segment(first)?;
        if name != "workouts" && name != "workout" {
            return Err(format!("Target path must start with 'workouts', got '{name}'"));
        }

        let second = match segments.next() {
            None => return Ok(TargetPath::Workouts { index: workout_index }),
            Some(segment) => segment,
        };
        let workout = workout_index.ok_or_else(|| {
            format!("Path segment 'workouts' needs an index before '.{second}'")
        })?;
        let (name, block_index) = parse_segment(second)?;
        if name != "blocks" && name != "block" {
            return Err(format!("Expected 'blocks' after workout index, got '{name}'"));
        }

        let third = match segments.next() {
            None => {
                return Ok(TargetPath::Blocks {
                    workout,
                    index: block_index,
                })
            }
            Some(segment) => segment,
        };
        let block = block_index
            .ok_or_else(|| format!("Path segment 'blocks' needs an index before '.{third}'"))?;
        let (name, exercise_index) = parse_segment(third)?;
        if name != "exercises" && name != "exercise" {
            return Err(format!("Expected 'exercises' after block index, got '{name}'"));
        }

        if let Some(extra) = segments.next() {
            return Err(format!("Unexpected path segment '{extra}'"));
        }

        Ok(TargetPath::CircuitExercises {
            workout,
            block,
            index: exercise_index,
        })
    }
}

impl fmt::Display for TargetPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_indexed(
            f: &mut fmt::Formatter<'_>,
            name: &str,
            index: Option<usize>,
        ) -> fmt::Result {
            match index {
                Some(index) => write!(f, "{name}[{index}]"),
                None => write!(f, "{name}"),
            }
        }

        match self {
            TargetPath::Workouts { index } => write_indexed(f, "workouts", *index),
            TargetPath::Blocks { workout, index } => {
                write!(f, "workouts[{workout}].")?;
                write_indexed(f, "blocks", *index)
            }
            TargetPath::CircuitExercises {
                workout,
                block,
                index,
            } => {
                write!(f, "workouts[{workout}].blocks[{block}].")?;
                write_indexed(f, "exercises", *index)
            }
        }
    }
}

impl Serialize for TargetPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TargetPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_collection_paths() {
        assert_eq!(
            "workouts".parse::<TargetPath>().unwrap(),
            TargetPath::Workouts { index: None }
        );
        assert_eq!(
            "workouts[2].blocks".parse::<TargetPath>().unwrap(),
            TargetPath::Blocks {
                workout: 2,
                index: None
            }
        );
        assert_eq!(
            "workouts[0].blocks[1].exercises".parse::<TargetPath>().unwrap(),
            TargetPath::CircuitExercises {
                workout: 0,
                block: 1,
                index: None
            }
        );
    }

    #[test]
    fn test_parse_element_paths() {
        assert_eq!(
            "workouts[3]".parse::<TargetPath>().unwrap(),
            TargetPath::Workouts { index: Some(3) }
        );
        assert_eq!(
            "workouts[0].blocks[5]".parse::<TargetPath>().unwrap(),
            TargetPath::Blocks {
                workout: 0,
                index: Some(5)
            }
        );
    }

    #[test]
    fn test_parse_singular_spelling() {
        assert_eq!(
            "workout[0].block[2]".parse::<TargetPath>().unwrap(),
            TargetPath::Blocks {
                workout: 0,
                index: Some(2)
            }
        );
    }

    #[test]
    fn test_display_round_trip() {
        for raw in [
            "workouts",
            "workouts[1]",
            "workouts[1].blocks",
            "workouts[1].blocks[0]",
            "workouts[1].blocks[0].exercises[2]",
        ] {
            let path: TargetPath = raw.parse().unwrap();
            assert_eq!(path.to_string(), raw);
            assert_eq!(path.to_string().parse::<TargetPath>().unwrap(), path);
        }
    }

    #[test]
    fn test_parse_rejects_malformed_paths() {
        assert!("".parse::<TargetPath>().is_err());
        assert!("blocks[0]".parse::<TargetPath>().is_err());
        assert!("workouts.blocks".parse::<TargetPath>().is_err());
        assert!("workouts[x]".parse::<TargetPath>().is_err());
        assert!("workouts[0".parse::<TargetPath>().is_err());
        assert!("workouts[0].blocks[1].sets".parse::<TargetPath>().is_err());
        assert!("workouts[0].blocks[1].exercises[0].extra"
            .parse::<TargetPath>()
            .is_err());
    }

    #[test]
    fn test_element_classification() {
        let collection: TargetPath = "workouts[0].blocks".parse().unwrap();
        assert!(!collection.is_element());

        let element: TargetPath = "workouts[0].blocks[1]".parse().unwrap();
        assert!(element.is_element());
        assert_eq!(element.index(), Some(1));
    }
}
