use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper function to create a temporary directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Helper function to create a Command with --no-color flag for testing
fn tempo_cmd() -> Command {
    let mut cmd = Command::cargo_bin("tempo").expect("Failed to find tempo binary");
    cmd.arg("--no-color");
    cmd
}

#[test]
fn test_cli_create_program_success() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    tempo_cmd()
        .args([
            "--database-file",
            db_path.to_str().unwrap(),
            "program",
            "create",
            "Test Title",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Test Title"))
        .stdout(predicate::str::contains("# 1."));
}

#[test]
fn test_cli_create_program_with_description_and_client() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    tempo_cmd()
        .args([
            "--database-file",
            db_path.to_str().unwrap(),
            "program",
            "create",
            "Strength Base",
            "--description",
            "Three-day full body block",
            "--client",
            "Alex",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Strength Base"))
        .stdout(predicate::str::contains("Three-day full body block"))
        .stdout(predicate::str::contains("Client: Alex"));
}

#[test]
fn test_cli_list_empty_programs() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    tempo_cmd()
        .args([
            "--database-file",
            db_path.to_str().unwrap(),
            "program",
            "list",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("No active programs found"));
}

#[test]
fn test_cli_list_programs() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    tempo_cmd()
        .args(["--database-file", db_arg, "program", "create", "List Title"])
        .assert()
        .success();

    tempo_cmd()
        .args(["--database-file", db_arg, "program", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Active Programs"))
        .stdout(predicate::str::contains("List Title"));
}

#[test]
fn test_cli_show_program_with_workout() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    tempo_cmd()
        .args(["--database-file", db_arg, "program", "create", "Show Title"])
        .assert()
        .success();

    tempo_cmd()
        .args([
            "--database-file",
            db_arg,
            "workout",
            "add",
            "1",
            "Day 1",
            "--description",
            "Heavy lower session",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created workout with ID: 1"));

    tempo_cmd()
        .args(["--database-file", db_arg, "program", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Show Title"))
        .stdout(predicate::str::contains("### 1. Day 1"))
        .stdout(predicate::str::contains("Heavy lower session"));
}

#[test]
fn test_cli_show_missing_program() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    tempo_cmd()
        .args([
            "--database-file",
            db_path.to_str().unwrap(),
            "program",
            "show",
            "42",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Program with ID 42 not found"));
}

#[test]
fn test_cli_delete_program_requires_confirm() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    tempo_cmd()
        .args(["--database-file", db_arg, "program", "create", "Careful"])
        .assert()
        .success();

    tempo_cmd()
        .args(["--database-file", db_arg, "program", "delete", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("confirmation"));

    tempo_cmd()
        .args([
            "--database-file",
            db_arg,
            "program",
            "delete",
            "1",
            "--confirm",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Permanently deleted program"));
}

#[test]
fn test_cli_review_preview_and_apply() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    tempo_cmd()
        .args(["--database-file", db_arg, "program", "create", "Reviewed"])
        .assert()
        .success();
    tempo_cmd()
        .args(["--database-file", db_arg, "workout", "add", "1", "Day 1"])
        .assert()
        .success();

    // A recorded assistant stream: one good edit, one unresolvable target
    let fragments = serde_json::json!([
        {
            "type": "workout-diff",
            "content": [
                {
                    "id": "good",
                    "target": "workouts[0].blocks",
                    "op": "add",
                    "payload": { "type": "exercise", "name": "Bench Press", "sets": 3, "reps": 8 }
                },
                { "id": "bad", "target": "workouts[0].blocks[9]", "op": "remove" }
            ]
        }
    ]);
    let fragment_file = temp_dir.path().join("fragments.json");
    std::fs::write(
        &fragment_file,
        serde_json::to_string_pretty(&fragments).unwrap(),
    )
    .expect("Failed to write fragment file");
    let file_arg = fragment_file.to_str().unwrap();

    // Preview lists the proposed changes without applying them
    tempo_cmd()
        .args([
            "--database-file",
            db_arg,
            "review",
            "preview",
            "1",
            "--file",
            file_arg,
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Pending Changes"))
        .stdout(predicate::str::contains("add block 'Bench Press'"));

    tempo_cmd()
        .args(["--database-file", db_arg, "program", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No blocks yet."));

    // Apply lands the good edit and reports the conflict
    tempo_cmd()
        .args([
            "--database-file",
            db_arg,
            "review",
            "apply",
            "1",
            "--file",
            file_arg,
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Applied 1 change(s)"))
        .stdout(predicate::str::contains("Conflicted change(s)"))
        .stdout(predicate::str::contains("bad"));

    tempo_cmd()
        .args(["--database-file", db_arg, "program", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bench Press"))
        .stdout(predicate::str::contains("Revision: 1"));
}

#[test]
fn test_cli_review_apply_detects_stale_revision() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    tempo_cmd()
        .args(["--database-file", db_arg, "program", "create", "Stale"])
        .assert()
        .success();
    tempo_cmd()
        .args(["--database-file", db_arg, "workout", "add", "1", "Day 1"])
        .assert()
        .success();

    let fragments = serde_json::json!([
        {
            "type": "workout-diff",
            "content": [{
                "target": "workouts[0].blocks",
                "op": "add",
                "payload": { "type": "exercise", "name": "Squat", "sets": 5, "reps": 5 }
            }]
        }
    ]);
    let fragment_file = temp_dir.path().join("fragments.json");
    std::fs::write(&fragment_file, fragments.to_string()).expect("Failed to write fragment file");

    tempo_cmd()
        .args([
            "--database-file",
            db_arg,
            "review",
            "apply",
            "1",
            "--file",
            fragment_file.to_str().unwrap(),
            "--expected-revision",
            "7",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("revision"));
}
