use tempo_core::{Block, Database, Exercise, StudioError};
use tempfile::NamedTempFile;

/// Helper function to create a temporary database for testing
fn create_test_db() -> (NamedTempFile, Database) {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let db = Database::new(temp_file.path()).expect("Failed to create test database");
    (temp_file, db)
}

fn bench_press() -> Block {
    Block::Exercise(Exercise {
        name: "Bench Press".to_string(),
        sets: 3,
        reps: 8,
        weight: Some(80.0),
        rest_seconds: Some(90),
        notes: None,
    })
}

#[test]
fn test_database_initialization() {
    let (temp_file, _db) = create_test_db();
    assert!(temp_file.path().exists());
}

#[test]
fn test_create_program() {
    let (_temp_file, mut db) = create_test_db();

    let program = db
        .create_program("Test Title", Some("Test Description"), Some("Alex"))
        .expect("Failed to create program");

    assert_eq!(program.title, "Test Title");
    assert_eq!(program.description, Some("Test Description".to_string()));
    assert_eq!(program.client, Some("Alex".to_string()));
    assert_eq!(program.revision, 0);
    assert!(program.id > 0);
    assert!(program.workouts.is_empty());
}

#[test]
fn test_get_program() {
    let (_temp_file, mut db) = create_test_db();

    let created = db
        .create_program("Get Title", None, None)
        .expect("Failed to create program");

    let retrieved = db
        .get_program(created.id)
        .expect("Failed to get program")
        .expect("Program should exist");

    assert_eq!(retrieved.id, created.id);
    assert_eq!(retrieved.title, "Get Title");
    assert!(retrieved.workouts.is_empty());
}

#[test]
fn test_list_programs() {
    let (_temp_file, mut db) = create_test_db();

    db.create_program("Title 1", None, None)
        .expect("Failed to create program 1");
    db.create_program("Title 2", None, None)
        .expect("Failed to create program 2");
    db.create_program("Title 3", None, None)
        .expect("Failed to create program 3");

    let programs = db.list_programs(None).expect("Failed to list programs");
    assert_eq!(programs.len(), 3);
}

#[test]
fn test_add_workout_and_ordering() {
    let (_temp_file, mut db) = create_test_db();

    let program = db
        .create_program("Workout Program", None, None)
        .expect("Failed to create program");

    let first = db
        .add_workout(program.id, "Day 1", None)
        .expect("Failed to add workout");
    let second = db
        .add_workout(program.id, "Day 2", Some("Accessory work"))
        .expect("Failed to add workout");

    assert_eq!(first.program_id, program.id);
    assert_eq!(first.position, 0);
    assert_eq!(second.position, 1);

    let workouts = db
        .get_workouts(program.id)
        .expect("Failed to get workouts");
    assert_eq!(workouts.len(), 2);
    assert_eq!(workouts[0].title, "Day 1");
    assert_eq!(workouts[1].title, "Day 2");
}

#[test]
fn test_add_workout_to_missing_program() {
    let (_temp_file, mut db) = create_test_db();

    let err = db.add_workout(42, "Orphan", None).unwrap_err();
    assert!(matches!(err, StudioError::ProgramNotFound { id: 42 }));
}

#[test]
fn test_insert_workout_shifts_positions() {
    let (_temp_file, mut db) = create_test_db();

    let program = db
        .create_program("Insert Program", None, None)
        .expect("Failed to create program");
    db.add_workout(program.id, "Day 1", None)
        .expect("Failed to add workout");
    db.add_workout(program.id, "Day 2", None)
        .expect("Failed to add workout");

    let inserted = db
        .insert_workout(program.id, 1, "Deload", None)
        .expect("Failed to insert workout");
    assert_eq!(inserted.position, 1);

    let titles: Vec<String> = db
        .get_workouts(program.id)
        .expect("Failed to get workouts")
        .into_iter()
        .map(|workout| workout.title)
        .collect();
    assert_eq!(titles, vec!["Day 1", "Deload", "Day 2"]);
}

#[test]
fn test_insert_workout_position_out_of_range() {
    let (_temp_file, mut db) = create_test_db();

    let program = db
        .create_program("Bounds", None, None)
        .expect("Failed to create program");

    let err = db.insert_workout(program.id, 3, "Too Far", None).unwrap_err();
    assert!(matches!(err, StudioError::InvalidInput { .. }));
}

#[test]
fn test_swap_and_remove_workouts() {
    let (_temp_file, mut db) = create_test_db();

    let program = db
        .create_program("Swap Program", None, None)
        .expect("Failed to create program");
    let first = db
        .add_workout(program.id, "Day 1", None)
        .expect("Failed to add workout");
    let second = db
        .add_workout(program.id, "Day 2", None)
        .expect("Failed to add workout");
    db.add_workout(program.id, "Day 3", None)
        .expect("Failed to add workout");

    db.swap_workouts(first.id, second.id)
        .expect("Failed to swap workouts");

    let titles: Vec<String> = db
        .get_workouts(program.id)
        .expect("Failed to get workouts")
        .into_iter()
        .map(|workout| workout.title)
        .collect();
    assert_eq!(titles, vec!["Day 2", "Day 1", "Day 3"]);

    db.remove_workout(second.id).expect("Failed to remove workout");

    let workouts = db.get_workouts(program.id).expect("Failed to get workouts");
    let titles: Vec<&str> = workouts.iter().map(|w| w.title.as_str()).collect();
    assert_eq!(titles, vec!["Day 1", "Day 3"]);
    // The gap is closed
    assert_eq!(workouts[0].position, 0);
    assert_eq!(workouts[1].position, 1);
}

#[test]
fn test_save_program_round_trips_blocks() {
    let (_temp_file, mut db) = create_test_db();

    let mut program = db
        .create_program("Persist", None, None)
        .expect("Failed to create program");
    db.add_workout(program.id, "Day 1", None)
        .expect("Failed to add workout");

    program = db
        .get_program(program.id)
        .expect("Failed to get program")
        .expect("Program should exist");
    program.workouts[0].blocks.push(bench_press());
    program.revision += 1;

    let saved = db.save_program(&program).expect("Failed to save program");
    assert_eq!(saved.revision, 1);
    assert_eq!(saved.workouts[0].blocks.len(), 1);

    // A fresh read sees the same tree
    let reread = db
        .get_program(program.id)
        .expect("Failed to get program")
        .expect("Program should exist");
    assert_eq!(reread.workouts[0].blocks, saved.workouts[0].blocks);
}

#[test]
fn test_archive_and_unarchive_program() {
    let (_temp_file, mut db) = create_test_db();

    let program = db
        .create_program("Archive Me", None, None)
        .expect("Failed to create program");

    let archived = db
        .archive_program(program.id)
        .expect("Failed to archive")
        .expect("Program should exist");
    assert_eq!(archived.status.as_str(), "archived");

    let unarchived = db
        .unarchive_program(program.id)
        .expect("Failed to unarchive")
        .expect("Program should exist");
    assert_eq!(unarchived.status.as_str(), "active");

    assert!(db.archive_program(999).expect("Query failed").is_none());
}

#[test]
fn test_delete_program_removes_workouts() {
    let (_temp_file, mut db) = create_test_db();

    let program = db
        .create_program("Delete Me", None, None)
        .expect("Failed to create program");
    let workout = db
        .add_workout(program.id, "Day 1", None)
        .expect("Failed to add workout");

    db.delete_program(program.id).expect("Failed to delete");

    assert!(db
        .get_program(program.id)
        .expect("Query failed")
        .is_none());
    assert!(db.get_workout(workout.id).expect("Query failed").is_none());

    let err = db.delete_program(program.id).unwrap_err();
    assert!(matches!(err, StudioError::ProgramNotFound { .. }));
}

#[test]
fn test_database_persistence_across_connections() {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");

    let program_id = {
        let mut db = Database::new(temp_file.path()).expect("Failed to create database");
        let program = db
            .create_program("Persistent", None, None)
            .expect("Failed to create program");
        db.add_workout(program.id, "Day 1", None)
            .expect("Failed to add workout");
        program.id
    };

    let db = Database::new(temp_file.path()).expect("Failed to reopen database");
    let program = db
        .get_program(program_id)
        .expect("Failed to get program")
        .expect("Program should survive reconnection");
    assert_eq!(program.title, "Persistent");
    assert_eq!(program.workouts.len(), 1);
}
