use tempo_core::StudioBuilder;
use tempfile::TempDir;

/// Helper function to create a test studio
pub async fn create_test_studio() -> (TempDir, tempo_core::Studio) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let studio = StudioBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create studio");
    (temp_dir, studio)
}
