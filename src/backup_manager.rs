use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const MAX_BACKUPS: usize = 50;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupMetadata {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub fix: String,
    pub files: Vec<FileBackup>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileBackup {
    pub original_path: PathBuf,
    pub backup_path: PathBuf,
}

pub struct BackupManager {
    backups_dir: PathBuf,
}

impl BackupManager {
    pub fn new() -> Result<Self> {
        let home_dir =
            dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Cannot determine home directory"))?;
        let backups_dir = home_dir.join(".nailfix").join("backups");

        fs::create_dir_all(&backups_dir).with_context(|| {
            format!(
                "Failed to create backups directory: {}",
                backups_dir.display()
            )
        })?;

        Ok(Self { backups_dir })
    }

    /// Create a BackupManager with a custom backup directory
    pub fn with_directory(dir: String) -> Result<Self> {
        let backups_dir = PathBuf::from(dir);

        fs::create_dir_all(&backups_dir).with_context(|| {
            format!(
                "Failed to create backups directory: {}",
                backups_dir.display()
            )
        })?;

        Ok(Self { backups_dir })
    }

    /// Get the backup directory path
    pub fn backups_dir(&self) -> &Path {
        &self.backups_dir
    }

    pub fn create_backup(&mut self, fix_name: &str, files: &[PathBuf]) -> Result<String> {
        // Millisecond precision keeps ids sortable even for back-to-back runs
        let id = format!(
            "{}-{}",
            Utc::now().format("%Y%m%d-%H%M%S%3f"),
            Uuid::new_v4().to_string().split_at(8).0
        );
        let backup_dir = self.backups_dir.join(&id);

        fs::create_dir_all(&backup_dir).with_context(|| {
            format!(
                "Failed to create backup directory: {}",
                backup_dir.display()
            )
        })?;

        let mut file_backups = Vec::new();

        for file_path in files {
            if !file_path.exists() {
                continue;
            }

            let file_name = file_path
                .file_name()
                .ok_or_else(|| anyhow::anyhow!("Invalid file name: {}", file_path.display()))?;

            let backup_path = backup_dir.join(file_name);

            fs::copy(file_path, &backup_path)
                .with_context(|| format!("Failed to backup file: {}", file_path.display()))?;

            file_backups.push(FileBackup {
                original_path: file_path.clone(),
                backup_path,
            });
        }

        let metadata = BackupMetadata {
            id: id.clone(),
            timestamp: Utc::now(),
            fix: fix_name.to_string(),
            files: file_backups,
        };

        let metadata_path = backup_dir.join("operation.json");
        let metadata_json =
            serde_json::to_string_pretty(&metadata).context("Failed to serialize metadata")?;

        fs::write(&metadata_path, metadata_json)
            .with_context(|| format!("Failed to write metadata: {}", metadata_path.display()))?;

        self.cleanup_old_backups()?;

        Ok(id)
    }

    pub fn restore_backup(&self, id: &str) -> Result<()> {
        let backup_dir = self.backups_dir.join(id);
        let metadata_path = backup_dir.join("operation.json");

        if !backup_dir.exists() {
            anyhow::bail!("Backup not found: {}", id);
        }

        let metadata_json = fs::read_to_string(&metadata_path)
            .with_context(|| format!("Failed to read metadata: {}", metadata_path.display()))?;

        let metadata: BackupMetadata =
            serde_json::from_str(&metadata_json).context("Failed to parse metadata")?;

        for file_backup in &metadata.files {
            if !file_backup.backup_path.exists() {
                eprintln!(
                    "Warning: Backup file missing: {}",
                    file_backup.backup_path.display()
                );
                continue;
            }

            fs::copy(&file_backup.backup_path, &file_backup.original_path).with_context(|| {
                format!(
                    "Failed to restore file: {}",
                    file_backup.original_path.display()
                )
            })?;

            println!("Restored: {}", file_backup.original_path.display());
        }

        // A restored backup is consumed
        fs::remove_dir_all(&backup_dir).with_context(|| {
            format!(
                "Failed to remove backup directory: {}",
                backup_dir.display()
            )
        })?;

        println!("Backup {} removed after restore", id);

        Ok(())
    }

    pub fn get_last_backup_id(&self) -> Result<Option<String>> {
        let mut backups = self.list_backups()?;
        backups.sort_by_key(|b| b.timestamp);
        Ok(backups.last().map(|b| b.id.clone()))
    }

    pub fn list_backups(&self) -> Result<Vec<BackupMetadata>> {
        let mut backups = Vec::new();

        for entry in fs::read_dir(&self.backups_dir).with_context(|| {
            format!(
                "Failed to read backups directory: {}",
                self.backups_dir.display()
            )
        })? {
            let entry = entry?;
            let metadata_path = entry.path().join("operation.json");

            if !metadata_path.exists() {
                continue;
            }

            let metadata_json = fs::read_to_string(&metadata_path)?;
            if let Ok(metadata) = serde_json::from_str::<BackupMetadata>(&metadata_json) {
                backups.push(metadata);
            }
        }

        // Chronological order; id breaks the rare timestamp tie
        backups.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then_with(|| a.id.cmp(&b.id)));
        Ok(backups)
    }

    fn cleanup_old_backups(&self) -> Result<()> {
        let mut backups = self.list_backups()?;
        backups.sort_by_key(|b| b.timestamp);

        if backups.len() > MAX_BACKUPS {
            for backup in backups.iter().take(backups.len() - MAX_BACKUPS) {
                let backup_dir = self.backups_dir.join(&backup.id);
                fs::remove_dir_all(&backup_dir).with_context(|| {
                    format!("Failed to remove old backup: {}", backup_dir.display())
                })?;
            }
        }

        Ok(())
    }

    /// Remove a backup by its ID
    pub fn remove_backup_by_id(&self, backup_id: &str) -> Result<()> {
        let backup_dir = self.backups_dir.join(backup_id);
        fs::remove_dir_all(&backup_dir)
            .with_context(|| format!("Failed to remove backup: {}", backup_dir.display()))?;
        Ok(())
    }

    /// Parse backup metadata from JSON string
    pub fn parse_backup_metadata(json: &str) -> Result<BackupMetadata> {
        let metadata: BackupMetadata =
            serde_json::from_str(json).context("Failed to parse backup metadata")?;
        Ok(metadata)
    }

    /// Read and parse one backup's metadata by ID
    pub fn get_backup(&self, id: &str) -> Result<BackupMetadata> {
        let metadata_path = self.backups_dir.join(id).join("operation.json");
        if !metadata_path.exists() {
            anyhow::bail!("Backup not found: {}", id);
        }

        let metadata_json = fs::read_to_string(&metadata_path)
            .with_context(|| format!("Failed to read metadata: {}", metadata_path.display()))?;

        Self::parse_backup_metadata(&metadata_json)
    }

    /// Prune backups keeping only the N most recent ones
    pub fn prune_backups(&self, keep_count: usize) -> Result<usize> {
        let mut backups = self.list_backups()?;
        backups.sort_by_key(|b| b.timestamp);

        if backups.len() <= keep_count {
            return Ok(0);
        }

        let to_remove = backups.len() - keep_count;
        for backup in backups.iter().take(to_remove) {
            let backup_dir = self.backups_dir.join(&backup.id);
            fs::remove_dir_all(&backup_dir)
                .with_context(|| format!("Failed to remove backup: {}", backup_dir.display()))?;
        }

        Ok(to_remove)
    }

    /// Prune backups older than the specified number of days
    pub fn prune_backups_older_than(&self, days: i64) -> Result<usize> {
        let cutoff = Utc::now() - chrono::Duration::days(days);
        let mut removed = 0;

        for backup in self.list_backups()? {
            if backup.timestamp < cutoff {
                let backup_dir = self.backups_dir.join(&backup.id);
                fs::remove_dir_all(&backup_dir).with_context(|| {
                    format!("Failed to remove old backup: {}", backup_dir.display())
                })?;
                removed += 1;
            }
        }

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Helper function to create a test file with content
    fn create_test_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let file_path = dir.join(name);
        let mut file = File::create(&file_path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file_path
    }

    /// Helper function to create a test backup manager with a temp directory
    fn create_test_manager() -> (BackupManager, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let backups_dir = temp_dir.path().join("backups");
        let manager =
            BackupManager::with_directory(backups_dir.to_str().unwrap().to_string()).unwrap();
        (manager, temp_dir)
    }

    #[test]
    fn test_create_backup_single_file() {
        let (mut manager, temp_dir) = create_test_manager();
        let test_file = create_test_file(temp_dir.path(), "LoginPage.tsx", "component source");

        let backup_id = manager
            .create_backup("login-phone", std::slice::from_ref(&test_file))
            .unwrap();

        let backup_dir = manager.backups_dir().join(&backup_id);
        assert!(backup_dir.exists(), "Backup directory should exist");

        let metadata_path = backup_dir.join("operation.json");
        assert!(metadata_path.exists(), "Metadata file should exist");

        let backup_file = backup_dir.join("LoginPage.tsx");
        assert!(backup_file.exists(), "Backup file should exist");

        let backup_content = fs::read_to_string(&backup_file).unwrap();
        let original_content = fs::read_to_string(&test_file).unwrap();
        assert_eq!(
            backup_content, original_content,
            "Backup content should match original"
        );

        let metadata_json = fs::read_to_string(&metadata_path).unwrap();
        let metadata: BackupMetadata = serde_json::from_str(&metadata_json).unwrap();
        assert_eq!(metadata.id, backup_id);
        assert_eq!(metadata.fix, "login-phone");
        assert_eq!(metadata.files.len(), 1);
        assert_eq!(metadata.files[0].original_path, test_file);
    }

    #[test]
    fn test_create_backup_multiple_files() {
        let (mut manager, temp_dir) = create_test_manager();
        let file1 = create_test_file(temp_dir.path(), "LoginPage.tsx", "login source");
        let file2 = create_test_file(temp_dir.path(), "BookingPage.tsx", "booking source");

        let backup_id = manager
            .create_backup("calendar-auto-open", &[file1.clone(), file2.clone()])
            .unwrap();

        let backup_dir = manager.backups_dir().join(&backup_id);
        assert!(backup_dir.exists());

        assert!(backup_dir.join("LoginPage.tsx").exists());
        assert!(backup_dir.join("BookingPage.tsx").exists());

        let metadata_path = backup_dir.join("operation.json");
        let metadata: BackupMetadata =
            serde_json::from_str(&fs::read_to_string(&metadata_path).unwrap()).unwrap();
        assert_eq!(metadata.files.len(), 2);
    }

    #[test]
    fn test_create_backup_special_characters_in_filename() {
        let (mut manager, temp_dir) = create_test_manager();

        let test_cases = vec![
            ("file with spaces.tsx", "content with spaces"),
            ("file-with-dashes.tsx", "content with dashes"),
            ("file_with_underscores.tsx", "content with underscores"),
            ("file.multiple.dots.tsx", "content"),
        ];

        let mut files = Vec::new();
        for (name, content) in &test_cases {
            files.push(create_test_file(temp_dir.path(), name, content));
        }

        let backup_id = manager.create_backup("login-phone", &files).unwrap();

        let backup_dir = manager.backups_dir().join(&backup_id);

        for (name, _) in &test_cases {
            assert!(
                backup_dir.join(name).exists(),
                "File '{}' should exist in backup",
                name
            );
        }
    }

    #[test]
    fn test_create_backup_nonexistent_file_skipped() {
        let (mut manager, temp_dir) = create_test_manager();
        let existing_file = create_test_file(temp_dir.path(), "exists.tsx", "I exist");
        let nonexistent_file = temp_dir.path().join("does_not_exist.tsx");

        let backup_id = manager
            .create_backup("login-phone", &[existing_file.clone(), nonexistent_file])
            .unwrap();

        let backup_dir = manager.backups_dir().join(&backup_id);
        let metadata_path = backup_dir.join("operation.json");
        let metadata: BackupMetadata =
            serde_json::from_str(&fs::read_to_string(&metadata_path).unwrap()).unwrap();

        assert_eq!(metadata.files.len(), 1);
        assert_eq!(metadata.files[0].original_path, existing_file);
    }

    #[test]
    fn test_create_backup_generates_unique_ids() {
        let (mut manager, temp_dir) = create_test_manager();
        let test_file = create_test_file(temp_dir.path(), "test.tsx", "content");

        let id1 = manager
            .create_backup("login-phone", std::slice::from_ref(&test_file))
            .unwrap();
        std::thread::sleep(std::time::Duration::from_millis(10));
        let id2 = manager
            .create_backup("login-connection", std::slice::from_ref(&test_file))
            .unwrap();

        assert_ne!(id1, id2, "Backup IDs should be unique");
    }

    #[test]
    fn test_restore_backup_success() {
        let (mut manager, temp_dir) = create_test_manager();
        let test_file = create_test_file(temp_dir.path(), "LoginPage.tsx", "original content");

        let backup_id = manager
            .create_backup("login-phone", std::slice::from_ref(&test_file))
            .unwrap();

        fs::write(&test_file, "patched content").unwrap();

        manager.restore_backup(&backup_id).unwrap();

        let restored_content = fs::read_to_string(&test_file).unwrap();
        assert_eq!(restored_content, "original content");

        let backup_dir = manager.backups_dir().join(&backup_id);
        assert!(
            !backup_dir.exists(),
            "Backup directory should be removed after restore"
        );
    }

    #[test]
    fn test_restore_backup_nonexistent_id() {
        let (manager, _) = create_test_manager();

        let result = manager.restore_backup("nonexistent-backup-id");
        assert!(result.is_err(), "Should return error for nonexistent backup");

        let err_msg = result.unwrap_err().to_string();
        assert!(
            err_msg.contains("Backup not found"),
            "Error should mention backup not found"
        );
    }

    #[test]
    fn test_restore_backup_multiple_files() {
        let (mut manager, temp_dir) = create_test_manager();
        let file1 = create_test_file(temp_dir.path(), "file1.tsx", "original 1");
        let file2 = create_test_file(temp_dir.path(), "file2.tsx", "original 2");

        let backup_id = manager
            .create_backup("calendar-auto-open", &[file1.clone(), file2.clone()])
            .unwrap();

        fs::write(&file1, "patched 1").unwrap();
        fs::write(&file2, "patched 2").unwrap();

        manager.restore_backup(&backup_id).unwrap();

        assert_eq!(fs::read_to_string(&file1).unwrap(), "original 1");
        assert_eq!(fs::read_to_string(&file2).unwrap(), "original 2");
    }

    #[test]
    fn test_restore_backup_with_missing_backup_file() {
        let (mut manager, temp_dir) = create_test_manager();
        let test_file = create_test_file(temp_dir.path(), "test.tsx", "original");

        let backup_id = manager
            .create_backup("login-phone", std::slice::from_ref(&test_file))
            .unwrap();

        // Simulate a corrupted backup
        let backup_dir = manager.backups_dir().join(&backup_id);
        let backup_file = backup_dir.join("test.tsx");
        fs::remove_file(&backup_file).unwrap();

        let result = manager.restore_backup(&backup_id);
        assert!(
            result.is_ok(),
            "Restore should succeed even with missing backup file"
        );

        let content = fs::read_to_string(&test_file).unwrap();
        assert_eq!(content, "original", "File should keep its current content");
    }

    #[test]
    fn test_get_last_backup_id_no_backups() {
        let (manager, _temp_dir) = create_test_manager();

        let last_id = manager.get_last_backup_id().unwrap();
        assert!(last_id.is_none(), "Should return None when no backups exist");
    }

    #[test]
    fn test_get_last_backup_id_multiple_backups() {
        let (mut manager, temp_dir) = create_test_manager();
        let test_file = create_test_file(temp_dir.path(), "test.tsx", "content");

        let id1 = manager
            .create_backup("login-phone", std::slice::from_ref(&test_file))
            .unwrap();
        std::thread::sleep(std::time::Duration::from_millis(10));
        let id2 = manager
            .create_backup("login-connection", std::slice::from_ref(&test_file))
            .unwrap();
        std::thread::sleep(std::time::Duration::from_millis(10));
        let id3 = manager
            .create_backup("calendar-auto-open", &[test_file])
            .unwrap();

        let last_id = manager.get_last_backup_id().unwrap();
        assert_eq!(last_id.as_ref().unwrap(), &id3);
        assert_ne!(last_id.as_ref().unwrap(), &id1);
        assert_ne!(last_id.as_ref().unwrap(), &id2);
    }

    #[test]
    fn test_list_backups_empty() {
        let (manager, _temp_dir) = create_test_manager();

        let backups = manager.list_backups().unwrap();
        assert_eq!(backups.len(), 0, "Should return empty list when no backups exist");
    }

    #[test]
    fn test_list_backups_sorted_by_timestamp() {
        let (mut manager, temp_dir) = create_test_manager();
        let test_file = create_test_file(temp_dir.path(), "test.tsx", "content");

        let id1 = manager
            .create_backup("login-phone", std::slice::from_ref(&test_file))
            .unwrap();
        std::thread::sleep(std::time::Duration::from_millis(10));
        let id2 = manager
            .create_backup("login-connection", std::slice::from_ref(&test_file))
            .unwrap();
        std::thread::sleep(std::time::Duration::from_millis(10));
        let id3 = manager
            .create_backup("designer-login-individual", &[test_file])
            .unwrap();

        let backups = manager.list_backups().unwrap();

        assert_eq!(backups[0].id, id1);
        assert_eq!(backups[1].id, id2);
        assert_eq!(backups[2].id, id3);

        assert!(backups[0].timestamp < backups[1].timestamp);
        assert!(backups[1].timestamp < backups[2].timestamp);
    }

    #[test]
    fn test_list_backups_ignores_invalid_directories() {
        let (manager, _temp_dir) = create_test_manager();

        // Directory without operation.json
        let invalid_dir = manager.backups_dir().join("invalid-backup");
        fs::create_dir_all(&invalid_dir).unwrap();
        fs::write(invalid_dir.join("some_file.tsx"), "data").unwrap();

        let backups = manager.list_backups().unwrap();
        assert_eq!(
            backups.len(),
            0,
            "Should ignore directories without operation.json"
        );
    }

    #[test]
    fn test_backup_limit_prunes_oldest() {
        let (mut manager, temp_dir) = create_test_manager();
        let test_file = create_test_file(temp_dir.path(), "test.tsx", "content");

        let mut ids = Vec::new();
        for _ in 0..=MAX_BACKUPS {
            let id = manager
                .create_backup("login-phone", std::slice::from_ref(&test_file))
                .unwrap();
            ids.push(id);
            std::thread::sleep(std::time::Duration::from_millis(2));
        }

        let backups = manager.list_backups().unwrap();
        assert_eq!(backups.len(), MAX_BACKUPS, "Retention cap should hold");

        let listed: Vec<&str> = backups.iter().map(|b| b.id.as_str()).collect();
        assert!(
            !listed.contains(&ids[0].as_str()),
            "Oldest backup should be pruned"
        );
        assert!(
            listed.contains(&ids.last().unwrap().as_str()),
            "Newest backup should survive"
        );
        assert!(
            !manager.backups_dir().join(&ids[0]).exists(),
            "Pruned backup directory should be removed from disk"
        );
    }

    #[test]
    fn test_remove_backup_existing() {
        let (mut manager, temp_dir) = create_test_manager();
        let test_file = create_test_file(temp_dir.path(), "test.tsx", "content");

        let backup_id = manager.create_backup("login-phone", &[test_file]).unwrap();
        let backup_dir = manager.backups_dir().join(&backup_id);

        assert!(backup_dir.exists(), "Backup should exist before removal");

        manager.remove_backup_by_id(&backup_id).unwrap();

        assert!(!backup_dir.exists(), "Backup should not exist after removal");
    }

    #[test]
    fn test_remove_backup_nonexistent() {
        let (manager, _) = create_test_manager();

        let result = manager.remove_backup_by_id("nonexistent-backup");
        assert!(
            result.is_err(),
            "Should return error when removing nonexistent backup"
        );
    }

    #[test]
    fn test_get_backup_returns_metadata() {
        let (mut manager, temp_dir) = create_test_manager();
        let test_file = create_test_file(temp_dir.path(), "test.tsx", "content");

        let backup_id = manager
            .create_backup("calendar-auto-open", &[test_file])
            .unwrap();

        let metadata = manager.get_backup(&backup_id).unwrap();
        assert_eq!(metadata.id, backup_id);
        assert_eq!(metadata.fix, "calendar-auto-open");

        assert!(manager.get_backup("no-such-id").is_err());
    }

    #[test]
    fn test_prune_backups_keep_all() {
        let (manager, _temp_dir) = create_test_manager();

        let removed = manager.prune_backups(10).unwrap();
        assert_eq!(removed, 0, "Should remove 0 backups when fewer than keep count");
    }

    #[test]
    fn test_prune_backups_keep_some() {
        let (mut manager, temp_dir) = create_test_manager();
        let test_file = create_test_file(temp_dir.path(), "test.tsx", "content");

        let mut backup_ids = Vec::new();
        for _ in 0..5 {
            backup_ids.push(
                manager
                    .create_backup("login-phone", std::slice::from_ref(&test_file))
                    .unwrap(),
            );
            std::thread::sleep(std::time::Duration::from_millis(10));
        }

        let removed = manager.prune_backups(2).unwrap();
        assert_eq!(removed, 3, "Should remove 3 oldest backups");

        let backups = manager.list_backups().unwrap();
        assert_eq!(backups.len(), 2);

        assert_eq!(backups[0].id, backup_ids[3]);
        assert_eq!(backups[1].id, backup_ids[4]);
    }

    #[test]
    fn test_prune_backups_exact_count() {
        let (mut manager, temp_dir) = create_test_manager();
        let test_file = create_test_file(temp_dir.path(), "test.tsx", "content");

        for _ in 0..3 {
            manager
                .create_backup("login-phone", std::slice::from_ref(&test_file))
                .unwrap();
            std::thread::sleep(std::time::Duration::from_millis(10));
        }

        let removed = manager.prune_backups(3).unwrap();
        assert_eq!(removed, 0, "Should remove 0 backups when count equals keep count");

        let backups = manager.list_backups().unwrap();
        assert_eq!(backups.len(), 3);
    }

    #[test]
    fn test_prune_backups_older_than_none_removed() {
        let (mut manager, temp_dir) = create_test_manager();
        let test_file = create_test_file(temp_dir.path(), "test.tsx", "content");

        manager.create_backup("login-phone", &[test_file]).unwrap();

        let removed = manager.prune_backups_older_than(30).unwrap();
        assert_eq!(removed, 0, "Should remove 0 backups when all are recent");
    }

    #[test]
    fn test_prune_backups_older_than_removes_old() {
        let (mut manager, temp_dir) = create_test_manager();
        let test_file = create_test_file(temp_dir.path(), "test.tsx", "content");

        for _ in 0..3 {
            manager
                .create_backup("login-phone", std::slice::from_ref(&test_file))
                .unwrap();
        }

        // Rewrite one backup's timestamp to make it "old"
        let aged_backup_id = manager.create_backup("login-connection", &[test_file]).unwrap();
        let backup_dir = manager.backups_dir().join(&aged_backup_id);
        let metadata_path = backup_dir.join("operation.json");

        let metadata_json = fs::read_to_string(&metadata_path).unwrap();
        let mut metadata: BackupMetadata = serde_json::from_str(&metadata_json).unwrap();
        metadata.timestamp = Utc::now() - chrono::Duration::days(10);
        let new_json = serde_json::to_string_pretty(&metadata).unwrap();
        fs::write(&metadata_path, new_json).unwrap();

        let removed = manager.prune_backups_older_than(5).unwrap();
        assert_eq!(removed, 1, "Should remove 1 old backup");
    }

    #[test]
    fn test_parse_backup_metadata_valid() {
        let json = r#"{
            "id": "20250201-120000123-abc12345",
            "timestamp": "2025-02-01T12:00:00Z",
            "fix": "login-phone",
            "files": [
                {
                    "original_path": "/project/src/components/LoginPage.tsx",
                    "backup_path": "/backups/20250201-120000123-abc12345/LoginPage.tsx"
                }
            ]
        }"#;

        let metadata = BackupManager::parse_backup_metadata(json).unwrap();

        assert_eq!(metadata.id, "20250201-120000123-abc12345");
        assert_eq!(metadata.fix, "login-phone");
        assert_eq!(metadata.files.len(), 1);
        assert_eq!(
            metadata.files[0].original_path,
            PathBuf::from("/project/src/components/LoginPage.tsx")
        );
    }

    #[test]
    fn test_parse_backup_metadata_invalid_json() {
        let invalid_json = r#"{ invalid json }"#;

        let result = BackupManager::parse_backup_metadata(invalid_json);
        assert!(result.is_err(), "Should return error for invalid JSON");
    }

    #[test]
    fn test_parse_backup_metadata_missing_required_field() {
        // Missing "id" field
        let json = r#"{
            "timestamp": "2025-02-01T12:00:00Z",
            "fix": "login-phone",
            "files": []
        }"#;

        let result = BackupManager::parse_backup_metadata(json);
        assert!(result.is_err(), "Should return error when missing required field");
    }

    #[test]
    fn test_with_directory_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let custom_path = temp_dir.path().join("custom_backup_dir");

        assert!(!custom_path.exists(), "Directory should not exist yet");

        let _manager =
            BackupManager::with_directory(custom_path.to_str().unwrap().to_string()).unwrap();

        assert!(custom_path.exists(), "Directory should be created");
    }

    #[test]
    fn test_backup_id_format() {
        let (mut manager, temp_dir) = create_test_manager();
        let test_file = create_test_file(temp_dir.path(), "test.tsx", "content");

        let backup_id = manager.create_backup("login-phone", &[test_file]).unwrap();

        // Format: YYYYMMDD-HHMMSSmmm-XXXXXXXX
        assert!(backup_id.len() >= 20, "Backup ID should be at least 20 characters");
        assert!(backup_id.contains('-'), "Backup ID should contain hyphens");

        let parts: Vec<&str> = backup_id.split('-').collect();
        assert_eq!(parts[0].len(), 8, "First part should be 8 digits (date)");
        assert!(
            parts[1].len() >= 9,
            "Second part should be at least 9 digits (time with milliseconds)"
        );
    }

    #[test]
    fn test_fix_name_preserved_in_metadata() {
        let (mut manager, temp_dir) = create_test_manager();
        let test_file = create_test_file(temp_dir.path(), "test.tsx", "content");

        let backup_id = manager
            .create_backup("designer-login-individual", &[test_file])
            .unwrap();

        let backup_dir = manager.backups_dir().join(&backup_id);
        let metadata_path = backup_dir.join("operation.json");
        let metadata: BackupMetadata =
            serde_json::from_str(&fs::read_to_string(&metadata_path).unwrap()).unwrap();

        assert_eq!(
            metadata.fix, "designer-login-individual",
            "Fix name should be preserved exactly"
        );
    }
}
