mod common;

use common::create_test_studio;
use tempo_core::params::{
    CreateProgram, DeleteProgram, Id, InsertWorkout, ListPrograms, SearchPrograms, SwapWorkouts,
    UpdateWorkout, WorkoutCreate,
};
use tempo_core::{ProgramStatus, StudioError};

#[tokio::test]
async fn test_complete_program_workflow() {
    let (_temp_dir, studio) = create_test_studio().await;

    // Create a program
    let program = studio
        .create_program(&CreateProgram {
            title: "Integration Test".to_string(),
            description: Some("Testing complete workflow".to_string()),
            client: Some("Dana".to_string()),
        })
        .await
        .expect("Failed to create program");

    // Add multiple workouts
    let day1 = studio
        .add_workout(&WorkoutCreate {
            program_id: program.id,
            title: "Day 1".to_string(),
            description: None,
        })
        .await
        .expect("Failed to add workout");
    let day2 = studio
        .add_workout(&WorkoutCreate {
            program_id: program.id,
            title: "Day 2".to_string(),
            description: None,
        })
        .await
        .expect("Failed to add workout");

    // Verify ordering
    let workouts = studio
        .get_workouts(&Id { id: program.id })
        .await
        .expect("Failed to get workouts");
    assert_eq!(workouts.len(), 2);
    assert_eq!(workouts[0].position, 0);
    assert_eq!(workouts[1].position, 1);

    // Insert a deload day between them
    let deload = studio
        .insert_workout(&InsertWorkout {
            workout: WorkoutCreate {
                program_id: program.id,
                title: "Deload".to_string(),
                description: None,
            },
            position: 1,
        })
        .await
        .expect("Failed to insert workout");
    assert_eq!(deload.position, 1);

    // Update a workout's details
    studio
        .update_workout(&UpdateWorkout {
            id: day1.id,
            title: Some("Day 1 — Heavy".to_string()),
            description: Some("Top sets at RPE 8".to_string()),
        })
        .await
        .expect("Failed to update workout");

    let updated = studio
        .get_workout(&Id { id: day1.id })
        .await
        .expect("Failed to get workout")
        .expect("Workout should exist");
    assert_eq!(updated.title, "Day 1 — Heavy");
    assert_eq!(updated.description, Some("Top sets at RPE 8".to_string()));

    // Swap the last two
    studio
        .swap_workouts(&SwapWorkouts {
            workout1_id: deload.id,
            workout2_id: day2.id,
        })
        .await
        .expect("Failed to swap workouts");

    let titles: Vec<String> = studio
        .get_workouts(&Id { id: program.id })
        .await
        .expect("Failed to get workouts")
        .into_iter()
        .map(|workout| workout.title)
        .collect();
    assert_eq!(titles, vec!["Day 1 — Heavy", "Day 2", "Deload"]);

    // Remove one
    studio
        .remove_workout(&Id { id: day2.id })
        .await
        .expect("Failed to remove workout");
    let workouts = studio
        .get_workouts(&Id { id: program.id })
        .await
        .expect("Failed to get workouts");
    assert_eq!(workouts.len(), 2);
}

#[tokio::test]
async fn test_search_programs_by_client() {
    let (_temp_dir, studio) = create_test_studio().await;

    studio
        .create_program(&CreateProgram {
            title: "For Alex".to_string(),
            description: None,
            client: Some("Alex".to_string()),
        })
        .await
        .expect("Failed to create program");
    studio
        .create_program(&CreateProgram {
            title: "For Dana".to_string(),
            description: None,
            client: Some("Dana".to_string()),
        })
        .await
        .expect("Failed to create program");

    let found = studio
        .search_programs_summary(&SearchPrograms {
            client: "Alex".to_string(),
            archived: false,
        })
        .await
        .expect("Failed to search programs");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title, "For Alex");

    let none = studio
        .search_programs_summary(&SearchPrograms {
            client: "Riley".to_string(),
            archived: false,
        })
        .await
        .expect("Failed to search programs");
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_archive_hides_program_from_active_list() {
    let (_temp_dir, studio) = create_test_studio().await;

    let program = studio
        .create_program(&CreateProgram {
            title: "Old Block".to_string(),
            description: None,
            client: None,
        })
        .await
        .expect("Failed to create program");

    let archived = studio
        .archive_program(&Id { id: program.id })
        .await
        .expect("Failed to archive")
        .expect("Program should exist");
    assert_eq!(archived.status, ProgramStatus::Archived);

    let active = studio
        .list_programs_summary(&ListPrograms { archived: false })
        .await
        .expect("Failed to list programs");
    assert!(active.is_empty());

    let restored = studio
        .unarchive_program(&Id { id: program.id })
        .await
        .expect("Failed to unarchive")
        .expect("Program should exist");
    assert_eq!(restored.status, ProgramStatus::Active);
}

#[tokio::test]
async fn test_delete_program_requires_confirmation() {
    let (_temp_dir, studio) = create_test_studio().await;

    let program = studio
        .create_program(&CreateProgram {
            title: "Careful".to_string(),
            description: None,
            client: None,
        })
        .await
        .expect("Failed to create program");

    let err = studio
        .delete_program(&DeleteProgram {
            id: program.id,
            confirmed: false,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, StudioError::InvalidInput { .. }));

    let deleted = studio
        .delete_program(&DeleteProgram {
            id: program.id,
            confirmed: true,
        })
        .await
        .expect("Failed to delete program")
        .expect("Program should have existed");
    assert_eq!(deleted.title, "Careful");

    assert!(studio
        .get_program(&Id { id: program.id })
        .await
        .expect("Failed to query")
        .is_none());
}
