use crate::{error::Result, storage::Storage};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

/// File-based storage: one JSON file per slot under a root directory
pub struct FileStorage {
    root_path: PathBuf,
}

impl FileStorage {
    const TASKBOARD_DIR: &'static str = ".taskboard";
    const SLOT_EXTENSION: &'static str = "json";

    /// Creates a new FileStorage instance for the given project root
    pub fn new(project_root: impl AsRef<Path>) -> Self {
        Self {
            root_path: project_root.as_ref().join(Self::TASKBOARD_DIR),
        }
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    fn slot_file(&self, key: &str) -> PathBuf {
        self.root_path
            .join(format!("{}.{}", sanitize_key(key), Self::SLOT_EXTENSION))
    }

    async fn ensure_directory_exists(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).await?;
        }
        Ok(())
    }
}

/// Maps a storage key to a safe file stem.
///
/// ASCII alphanumerics and `-` pass through; every other byte becomes `_xx`
/// (lower-case hex), so distinct keys always get distinct files.
fn sanitize_key(key: &str) -> String {
    let mut stem = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' {
            stem.push(char::from(byte));
        } else {
            stem.push_str(&format!("_{:02x}", byte));
        }
    }
    stem
}

#[async_trait]
impl Storage for FileStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        let file_path = self.slot_file(key);

        if !file_path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&file_path).await?;
        Ok(Some(contents))
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.ensure_directory_exists(&self.root_path).await?;

        // Write to a sibling file first so a crash never leaves a torn slot
        let file_path = self.slot_file(key);
        let tmp_path = file_path.with_extension("json.tmp");
        fs::write(&tmp_path, value).await?;
        fs::rename(&tmp_path, &file_path).await?;

        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        let file_path = self.slot_file(key);

        if file_path.exists() {
            fs::remove_file(file_path).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_slot_reads_none() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());

        assert_eq!(storage.get_item("taskManagerData").await.unwrap(), None);
        assert!(!storage.root_path().exists());
    }

    #[tokio::test]
    async fn test_slot_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());

        storage
            .set_item("taskManagerData", r#"{"columns":{}}"#)
            .await
            .unwrap();

        assert!(storage.slot_file("taskManagerData").exists());
        let loaded = storage.get_item("taskManagerData").await.unwrap();
        assert_eq!(loaded.as_deref(), Some(r#"{"columns":{}}"#));
    }

    #[tokio::test]
    async fn test_slot_overwrite_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());

        storage.set_item("board", "one").await.unwrap();
        storage.set_item("board", "two").await.unwrap();

        assert_eq!(storage.get_item("board").await.unwrap().as_deref(), Some("two"));

        let mut entries = fs::read_dir(storage.root_path()).await.unwrap();
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await.unwrap() {
            names.push(entry.file_name().to_string_lossy().to_string());
        }
        assert_eq!(names, vec!["board.json"]);
    }

    #[tokio::test]
    async fn test_remove_slot() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());

        storage.remove_item("board").await.unwrap();
        storage.set_item("board", "{}").await.unwrap();
        storage.remove_item("board").await.unwrap();

        assert_eq!(storage.get_item("board").await.unwrap(), None);
    }

    #[test]
    fn test_sanitize_key() {
        assert_eq!(sanitize_key("taskManagerData"), "taskManagerData");
        assert_eq!(sanitize_key("../etc/passwd"), "_2e_2e_2fetc_2fpasswd");
        assert_eq!(sanitize_key("board v2"), "board_20v2");
        assert_ne!(sanitize_key("a.b"), sanitize_key("a_b"));
        assert_eq!(sanitize_key("a_b"), "a_5fb");
    }

    #[tokio::test]
    async fn test_similar_keys_use_separate_files() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());

        storage.set_item("a.b", "dot").await.unwrap();
        storage.set_item("a_b", "underscore").await.unwrap();

        assert_eq!(storage.get_item("a.b").await.unwrap().as_deref(), Some("dot"));
        assert_eq!(
            storage.get_item("a_b").await.unwrap().as_deref(),
            Some("underscore")
        );
    }
}
