//! Tests for the studio module.

use serde_json::json;
use tempfile::TempDir;

use super::*;
use crate::params::{CreateProgram, Id, ListPrograms, WorkoutCreate};

/// Helper function to create a test studio
async fn create_test_studio() -> (TempDir, Studio) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let studio = StudioBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create studio");
    (temp_dir, studio)
}

#[tokio::test]
async fn test_list_programs_summary_active() {
    let (_temp_dir, studio) = create_test_studio().await;

    let program = studio
        .create_program(&CreateProgram {
            title: "Test Program".to_string(),
            description: Some("Test Description".to_string()),
            client: None,
        })
        .await
        .expect("Failed to create program");

    studio
        .add_workout(&WorkoutCreate {
            program_id: program.id,
            title: "Day 1".to_string(),
            description: None,
        })
        .await
        .expect("Failed to add workout");

    let summaries = studio
        .list_programs_summary(&ListPrograms { archived: false })
        .await
        .expect("Failed to list program summaries");

    assert_eq!(summaries.0.len(), 1);
    assert_eq!(summaries.0[0].title, "Test Program");
    assert_eq!(
        summaries.0[0].description,
        Some("Test Description".to_string())
    );
    assert_eq!(summaries.0[0].workout_count, 1);
    assert_eq!(summaries.0[0].block_count, 0);
}

#[tokio::test]
async fn test_list_programs_summary_archived() {
    let (_temp_dir, studio) = create_test_studio().await;

    let program = studio
        .create_program(&CreateProgram {
            title: "Archived Program".to_string(),
            description: None,
            client: None,
        })
        .await
        .expect("Failed to create program");

    studio
        .archive_program(&Id { id: program.id })
        .await
        .expect("Failed to archive program");

    let archived = studio
        .list_programs_summary(&ListPrograms { archived: true })
        .await
        .expect("Failed to list archived summaries");
    assert_eq!(archived.0.len(), 1);
    assert_eq!(archived.0[0].title, "Archived Program");

    let active = studio
        .list_programs_summary(&ListPrograms { archived: false })
        .await
        .expect("Failed to list active summaries");
    assert!(active.is_empty());
}

#[tokio::test]
async fn test_accept_review_applies_and_persists() {
    let (_temp_dir, studio) = create_test_studio().await;

    let program = studio
        .create_program(&CreateProgram {
            title: "Strength Base".to_string(),
            description: None,
            client: None,
        })
        .await
        .expect("Failed to create program");

    studio
        .add_workout(&WorkoutCreate {
            program_id: program.id,
            title: "Day 1".to_string(),
            description: None,
        })
        .await
        .expect("Failed to add workout");

    let mut session = ReviewSession::new(program.id);
    let fragments = vec![json!({
        "type": "workout-diff",
        "content": [{
            "id": "a",
            "target": "workouts[0].blocks",
            "op": "add",
            "payload": { "type": "exercise", "name": "Bench Press", "sets": 3, "reps": 8 }
        }]
    })];

    let summary = session.ingest(&fragments).expect("Failed to ingest");
    assert_eq!(summary.decoded, 1);
    assert!(summary.skipped.is_empty());

    let outcome = studio
        .accept_review(&mut session)
        .await
        .expect("Failed to accept review")
        .expect("A batch should have been pending");

    assert_eq!(outcome.applied, vec!["a"]);
    assert!(outcome.conflicted.is_empty());
    assert!(session.pending().is_none());

    // The applied change is durable
    let stored = studio
        .get_program(&Id { id: program.id })
        .await
        .expect("Failed to get program")
        .expect("Program should exist");
    assert_eq!(stored.workouts[0].blocks.len(), 1);
    assert_eq!(stored.workouts[0].blocks[0].name(), "Bench Press");
    assert_eq!(stored.revision, 1);
}

#[tokio::test]
async fn test_reject_leaves_program_unchanged() {
    let (_temp_dir, studio) = create_test_studio().await;

    let program = studio
        .create_program(&CreateProgram {
            title: "Untouched".to_string(),
            description: None,
            client: None,
        })
        .await
        .expect("Failed to create program");

    let mut session = ReviewSession::new(program.id);
    let fragments = vec![json!({
        "type": "workout-diff",
        "content": [{
            "target": "workouts",
            "op": "add",
            "payload": { "title": "Day 1" }
        }]
    })];
    session.ingest(&fragments).expect("Failed to ingest");
    assert!(session.pending().is_some());

    let discarded = session.reject().expect("A batch should have been pending");
    assert_eq!(discarded.len(), 1);

    let stored = studio
        .get_program(&Id { id: program.id })
        .await
        .expect("Failed to get program")
        .expect("Program should exist");
    assert!(stored.workouts.is_empty());
    assert_eq!(stored.revision, 0);
}

#[tokio::test]
async fn test_accept_review_with_nothing_pending_is_noop() {
    let (_temp_dir, studio) = create_test_studio().await;

    let program = studio
        .create_program(&CreateProgram {
            title: "Quiet".to_string(),
            description: None,
            client: None,
        })
        .await
        .expect("Failed to create program");

    let mut session = ReviewSession::new(program.id);
    let outcome = studio
        .accept_review(&mut session)
        .await
        .expect("Accept on empty should not error");
    assert!(outcome.is_none());
}

#[tokio::test]
async fn test_accept_review_detects_stale_revision() {
    let (_temp_dir, studio) = create_test_studio().await;

    let program = studio
        .create_program(&CreateProgram {
            title: "Racing".to_string(),
            description: None,
            client: None,
        })
        .await
        .expect("Failed to create program");

    // Session captured revision 0, then the program moves on
    let mut session = ReviewSession::new(program.id).with_expected_revision(program.revision);
    let fragments = vec![json!({
        "type": "workout-diff",
        "content": [{ "target": "workouts", "op": "add", "payload": { "title": "Day 1" } }]
    })];
    session.ingest(&fragments).expect("Failed to ingest");

    let mut moved_on = program.clone();
    moved_on.revision += 1;
    studio
        .save_program(moved_on)
        .await
        .expect("Failed to save program");

    let err = studio
        .accept_review(&mut session)
        .await
        .expect_err("Stale revision should fail");
    assert!(matches!(
        err,
        crate::StudioError::StaleProgram {
            expected: 0,
            found: 1
        }
    ));

    // The batch stays pending so the reviewer can re-sync
    assert!(session.pending().is_some());
}
