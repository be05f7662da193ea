//! File-backed record store for daily snapshots
//!
//! Provides the `RecordStore` contract the orchestrator depends on and a
//! `FileStore` that keeps one JSON document per calendar date under the
//! configured table directory.

use std::fs;
use std::io;
use std::path::PathBuf;

use directories::ProjectDirs;
use thiserror::Error;

use crate::data::CacheRecord;

/// Errors raised by the record store
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed
    #[error("store I/O failed: {0}")]
    Io(#[from] io::Error),

    /// A stored record could not be parsed
    #[error("stored record is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Contract the orchestrator requires of a record store
///
/// Point lookup by date key and point write of a full record, nothing more.
/// The store is an external collaborator; the orchestrator accepts any
/// implementation, so tests can substitute in-memory or failing doubles.
pub trait RecordStore {
    /// Looks up the record stored under `date`, if any
    fn get(&self, date: &str) -> Result<Option<CacheRecord>, StoreError>;

    /// Writes a full record under its date key
    fn put(&self, record: &CacheRecord) -> Result<(), StoreError>;
}

/// Record store persisting one JSON file per date
///
/// Records live under `<root>/<table>/<date>.json`, where `<table>` comes
/// from the TABLE_NAME configuration. The default root is an XDG-compliant
/// cache directory (`~/.cache/htbrank/` on Linux). A record is written at
/// most once per date in normal operation; a concurrent second writer
/// simply wins the file (last write wins, no conflict detection).
#[derive(Debug, Clone)]
pub struct FileStore {
    /// Directory holding the per-date record files
    table_dir: PathBuf,
}

impl FileStore {
    /// Opens the store for `table` under the XDG cache directory
    ///
    /// Returns `None` if the cache directory cannot be determined (e.g. no
    /// home directory).
    pub fn new(table: &str) -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "htbrank")?;
        Some(Self::open(project_dirs.cache_dir().to_path_buf(), table))
    }

    /// Opens the store for `table` under a custom root directory
    pub fn open(root: PathBuf, table: &str) -> Self {
        Self {
            table_dir: root.join(table),
        }
    }

    /// Returns the path of the record file for a date key
    fn record_path(&self, date: &str) -> PathBuf {
        self.table_dir.join(format!("{}.json", date))
    }
}

impl RecordStore for FileStore {
    fn get(&self, date: &str) -> Result<Option<CacheRecord>, StoreError> {
        let content = match fs::read_to_string(self.record_path(date)) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        Ok(Some(serde_json::from_str(&content)?))
    }

    fn put(&self, record: &CacheRecord) -> Result<(), StoreError> {
        fs::create_dir_all(&self.table_dir)?;

        let json = serde_json::to_string_pretty(record)?;
        fs::write(self.record_path(&record.date), json)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::RankingMetrics;
    use tempfile::TempDir;

    fn create_test_store() -> (FileStore, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = FileStore::open(temp_dir.path().to_path_buf(), "rankings");
        (store, temp_dir)
    }

    fn sample_record(date: &str) -> CacheRecord {
        CacheRecord::new(
            date.to_string(),
            RankingMetrics {
                system_owns: Some(10),
                rank: Some("Hacker".to_string()),
                global_rank: Some(2048),
                ..RankingMetrics::default()
            },
        )
    }

    #[test]
    fn test_put_creates_file_in_table_directory() {
        let (store, temp_dir) = create_test_store();

        store
            .put(&sample_record("2026-08-06"))
            .expect("Put should succeed");

        let expected_path = temp_dir.path().join("rankings").join("2026-08-06.json");
        assert!(expected_path.exists(), "Record file should exist");

        let content = fs::read_to_string(&expected_path).expect("Should read file");
        assert!(content.contains("\"date\""));
        assert!(content.contains("2026-08-06"));
        assert!(content.contains("\"System_Owns\""));
    }

    #[test]
    fn test_get_returns_none_for_missing_date() {
        let (store, _temp_dir) = create_test_store();

        let result = store.get("2026-08-06").expect("Get should succeed");

        assert!(result.is_none(), "Should return None for missing date");
    }

    #[test]
    fn test_record_survives_roundtrip() {
        let (store, _temp_dir) = create_test_store();
        let record = sample_record("2026-08-06");

        store.put(&record).expect("Put should succeed");
        let read_back = store
            .get("2026-08-06")
            .expect("Get should succeed")
            .expect("Record should exist");

        assert_eq!(read_back, record);
    }

    #[test]
    fn test_placeholder_roundtrips_with_empty_metrics() {
        let (store, _temp_dir) = create_test_store();
        let placeholder = CacheRecord::placeholder("2026-08-06".to_string());

        store.put(&placeholder).expect("Put should succeed");
        let read_back = store
            .get("2026-08-06")
            .expect("Get should succeed")
            .expect("Record should exist");

        assert_eq!(read_back.metrics, RankingMetrics::default());
    }

    #[test]
    fn test_put_creates_directory_if_missing() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let nested_root = temp_dir.path().join("nested").join("store");
        let store = FileStore::open(nested_root.clone(), "rankings");

        store
            .put(&sample_record("2026-08-06"))
            .expect("Put should succeed");

        assert!(nested_root.join("rankings").exists());
    }

    #[test]
    fn test_corrupt_record_is_a_store_error() {
        let (store, temp_dir) = create_test_store();
        let table_dir = temp_dir.path().join("rankings");
        fs::create_dir_all(&table_dir).expect("Should create dir");
        fs::write(table_dir.join("2026-08-06.json"), "{not json").expect("Should write file");

        let result = store.get("2026-08-06");

        assert!(matches!(result, Err(StoreError::Parse(_))));
    }

    #[test]
    fn test_tables_are_isolated() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store_a = FileStore::open(temp_dir.path().to_path_buf(), "rankings");
        let store_b = FileStore::open(temp_dir.path().to_path_buf(), "other");

        store_a
            .put(&sample_record("2026-08-06"))
            .expect("Put should succeed");

        assert!(store_b
            .get("2026-08-06")
            .expect("Get should succeed")
            .is_none());
    }

    #[test]
    fn test_overwrite_keeps_latest_record() {
        let (store, _temp_dir) = create_test_store();
        let first = sample_record("2026-08-06");
        let second = CacheRecord::new(
            "2026-08-06".to_string(),
            RankingMetrics {
                system_owns: Some(11),
                ..RankingMetrics::default()
            },
        );

        store.put(&first).expect("First put should succeed");
        store.put(&second).expect("Second put should succeed");

        let read_back = store
            .get("2026-08-06")
            .expect("Get should succeed")
            .expect("Record should exist");
        assert_eq!(read_back, second);
    }
}
