//! Settings Repository Tests
//!
//! Run against a scratch directory per test.

#[cfg(test)]
mod tests {
    use crate::domain::{ErrorKind, Settings, Theme};
    use crate::repository::SettingsRepository;
    use serde_json::{json, Value};
    use tempfile::TempDir;

    fn setup_repo() -> (TempDir, SettingsRepository) {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let repo = SettingsRepository::new(dir.path().join("config").join("settings.json"));
        (dir, repo)
    }

    #[tokio::test]
    async fn test_get_without_file_returns_defaults() {
        let (dir, repo) = setup_repo();

        let snapshot = repo.get().await;
        assert!(snapshot.is_default);
        assert_eq!(snapshot.settings, Settings::default());

        // Reading must not create anything.
        assert!(!repo.path().exists());
        assert!(!dir.path().join("config").exists());
    }

    #[tokio::test]
    async fn test_get_with_corrupt_file_returns_defaults_untouched() {
        let (_dir, repo) = setup_repo();
        std::fs::create_dir_all(repo.path().parent().unwrap()).unwrap();
        std::fs::write(repo.path(), "{ not json").unwrap();

        let snapshot = repo.get().await;
        assert!(snapshot.is_default);
        assert_eq!(std::fs::read_to_string(repo.path()).unwrap(), "{ not json");
    }

    #[tokio::test]
    async fn test_get_with_non_object_returns_defaults() {
        let (_dir, repo) = setup_repo();
        std::fs::create_dir_all(repo.path().parent().unwrap()).unwrap();
        std::fs::write(repo.path(), "[1, 2]").unwrap();

        assert!(repo.get().await.is_default);
    }

    #[tokio::test]
    async fn test_update_creates_directory_and_persists() {
        let (_dir, repo) = setup_repo();

        let saved = repo
            .update(json!({"theme": "dark", "autoSave": false, "backendPort": 8123, "maxRecentFiles": 4}))
            .await
            .expect("Update failed");
        assert_eq!(saved.theme, Theme::Dark);

        let snapshot = repo.get().await;
        assert!(!snapshot.is_default);
        assert_eq!(snapshot.settings, saved);
        assert_eq!(snapshot.settings.backend_port, 8123);
    }

    #[tokio::test]
    async fn test_update_sanitizes_invalid_theme() {
        let (_dir, repo) = setup_repo();

        repo.update(json!({"theme": "neon", "autoSave": false, "backendPort": 9001, "maxRecentFiles": 2}))
            .await
            .unwrap();

        let stored: Value = serde_json::from_str(&std::fs::read_to_string(repo.path()).unwrap()).unwrap();
        assert_eq!(stored["theme"], json!("light"));
        assert_eq!(stored["autoSave"], json!(false));
        assert_eq!(stored["backendPort"], json!(9001));
        assert_eq!(stored["maxRecentFiles"], json!(2));
    }

    #[tokio::test]
    async fn test_update_merges_over_stored_record() {
        let (_dir, repo) = setup_repo();

        repo.update(json!({"theme": "auto", "backendPort": 8500, "editorFont": "mono"}))
            .await
            .unwrap();
        let merged = repo.update(json!({"autoSave": false})).await.unwrap();

        assert_eq!(merged.theme, Theme::Auto);
        assert_eq!(merged.backend_port, 8500);
        assert!(!merged.auto_save);
        assert_eq!(merged.extra.get("editorFont"), Some(&json!("mono")));
    }

    #[tokio::test]
    async fn test_update_rejects_non_object() {
        let (_dir, repo) = setup_repo();

        for patch in [Value::Null, json!("dark"), json!([1]), json!(3)] {
            let err = repo.update(patch).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidSettingsShape);
        }
        assert!(!repo.path().exists());
    }
}
