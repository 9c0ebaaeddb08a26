//! Collection wrapper types for displaying groups of domain objects.
//!
//! This module provides wrapper types that format collections of domain
//! objects with consistent structure and empty collection handling.

use std::{fmt, ops::Index};

use crate::models::{ProgramSummary, Workout};

/// Newtype wrapper for displaying collections of program summaries.
///
/// This provides clean Display formatting for program collections without
/// title handling, allowing consumers to handle titles separately.
/// Handles empty collections gracefully.
pub struct ProgramSummaries(pub Vec<ProgramSummary>);

impl ProgramSummaries {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of program summaries in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get a reference to the program summary at the given index.
    pub fn get(&self, index: usize) -> Option<&ProgramSummary> {
        self.0.get(index)
    }

    /// Get an iterator over the program summaries.
    pub fn iter(&self) -> std::slice::Iter<'_, ProgramSummary> {
        self.0.iter()
    }
}

impl Index<usize> for ProgramSummaries {
    type Output = ProgramSummary;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for ProgramSummaries {
    type Item = ProgramSummary;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ProgramSummaries {
    type Item = &'a ProgramSummary;
    type IntoIter = std::slice::Iter<'a, ProgramSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for ProgramSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No programs found.")
        } else {
            for program in &self.0 {
                write!(f, "{}", program)?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for displaying collections of workouts.
///
/// Formats each workout using its own Display implementation and handles
/// empty collections gracefully.
pub struct Workouts(pub Vec<Workout>);

impl Workouts {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of workouts in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get a reference to the workout at the given index.
    pub fn get(&self, index: usize) -> Option<&Workout> {
        self.0.get(index)
    }

    /// Get an iterator over the workouts.
    pub fn iter(&self) -> std::slice::Iter<'_, Workout> {
        self.0.iter()
    }
}

impl Index<usize> for Workouts {
    type Output = Workout;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for Workouts {
    type Item = Workout;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Workouts {
    type Item = &'a Workout;
    type IntoIter = std::slice::Iter<'a, Workout>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Workouts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No workouts found.")
        } else {
            for workout in &self.0 {
                write!(f, "{}", workout)?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::models::{Block, Exercise, ProgramStatus};

    fn create_test_summary() -> ProgramSummary {
        ProgramSummary {
            id: 1,
            title: "Test Program".to_string(),
            description: Some("A test program".to_string()),
            client: Some("Alex".to_string()),
            status: ProgramStatus::Active,
            revision: 0,
            created_at: Timestamp::from_second(1640995200).unwrap(), // 2022-01-01 00:00:00 UTC
            updated_at: Timestamp::from_second(1640995200).unwrap(),
            workout_count: 2,
            block_count: 6,
        }
    }

    fn create_test_workout() -> Workout {
        Workout {
            id: 1,
            program_id: 1,
            title: "Upper Body A".to_string(),
            description: None,
            position: 0,
            blocks: vec![Block::Exercise(Exercise {
                name: "Bench Press".to_string(),
                sets: 3,
                reps: 8,
                weight: Some(80.0),
                rest_seconds: Some(90),
                notes: None,
            })],
            created_at: Timestamp::from_second(1640995200).unwrap(),
            updated_at: Timestamp::from_second(1640995200).unwrap(),
        }
    }

    #[test]
    fn test_program_summaries_display() {
        let summaries = ProgramSummaries(vec![create_test_summary()]);
        let output = format!("{}", summaries);
        assert!(output.contains("Test Program"));
        assert!(output.contains("ID: 1"));
        assert!(output.contains("2 workouts, 6 blocks"));

        let empty = ProgramSummaries(vec![]);
        assert_eq!(format!("{}", empty), "No programs found.\n");
    }

    #[test]
    fn test_workouts_display() {
        let workouts = Workouts(vec![create_test_workout()]);
        let output = format!("{}", workouts);
        assert!(output.contains("Upper Body A"));
        assert!(output.contains("Bench Press — 3×8 @ 80kg, rest 90s"));

        let empty = Workouts(vec![]);
        assert_eq!(format!("{}", empty), "No workouts found.\n");
    }
}
