//! JSON file preference store.
//!
//! Stores all preferences as one JSON object in a single file. A missing file
//! reads as empty, so the first write creates it.
//!
//! Writers hold an exclusive OS lock on a sibling `.lock` file for the whole
//! read-modify-write, so separate handles and processes never lose each
//! other's keys. The data file is replaced by renaming a fresh temp file, so
//! readers need no lock.

use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tempfile::NamedTempFile;
use tokio::fs;
use tracing::debug;

use super::{PreferenceStore, Result, StoreError};

/// File-based JSON preference store.
pub struct JsonPreferenceStore {
    path: PathBuf,
    lock_path: PathBuf,
    dir: PathBuf,
}

impl JsonPreferenceStore {
    /// Create a store backed by `path`. Parent directories are created.
    pub async fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).await?;

        let mut lock_name = path.file_name().unwrap_or_default().to_os_string();
        lock_name.push(".lock");
        let lock_path = dir.join(lock_name);

        Ok(Self { path, lock_path, dir })
    }

    /// Backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<BTreeMap<String, i64>> {
        Ok(read_json(&self.path).await?.unwrap_or_default())
    }
}

#[async_trait::async_trait]
impl PreferenceStore for JsonPreferenceStore {
    async fn get_i64(&self, key: &str, default: i64) -> Result<i64> {
        let prefs = self.load().await?;
        Ok(prefs.get(key).copied().unwrap_or(default))
    }

    async fn put_i64(&self, key: &str, value: i64) -> Result<()> {
        let path = self.path.clone();
        let lock_path = self.lock_path.clone();
        let dir = self.dir.clone();
        let owned_key = key.to_string();

        tokio::task::spawn_blocking(move || write_locked(&path, &lock_path, &dir, owned_key, value))
            .await
            .map_err(|e| StoreError::Unavailable(format!("preference writer stopped: {}", e)))??;

        debug!(key, value, path = %self.path.display(), "preference written");
        Ok(())
    }
}

/// Insert one key while holding the exclusive lock on `lock_path`.
fn write_locked(path: &Path, lock_path: &Path, dir: &Path, key: String, value: i64) -> Result<()> {
    let lock = OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(lock_path)?;
    lock.lock_exclusive()?;

    let result = rewrite(path, dir, key, value);
    FileExt::unlock(&lock)?;
    result
}

fn rewrite(path: &Path, dir: &Path, key: String, value: i64) -> Result<()> {
    let mut prefs: BTreeMap<String, i64> = match std::fs::read_to_string(path) {
        Ok(json) => serde_json::from_str(&json)?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
        Err(e) => return Err(e.into()),
    };
    prefs.insert(key, value);

    let mut tmp = NamedTempFile::new_in(dir)?;
    serde_json::to_writer_pretty(tmp.as_file_mut(), &prefs)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match fs::read_to_string(path).await {
        Ok(json) => {
            let value = serde_json::from_str(&json)?;
            Ok(Some(value))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{keys, StoreError};

    #[tokio::test]
    async fn test_missing_file_reads_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonPreferenceStore::new(dir.path().join("prefs.json")).await.unwrap();

        assert_eq!(store.get_i64(keys::WEEK_ID, 1).await.unwrap(), 1);
        assert_eq!(store.get_i64(keys::HEARTBEAT_TIME, 0).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonPreferenceStore::new(dir.path().join("nested").join("prefs.json"))
            .await
            .unwrap();

        store.put_i64(keys::WEEK_ID, 3).await.unwrap();
        store.put_i64(keys::HEARTBEAT_TIME, 1_700_000_000_000).await.unwrap();

        assert_eq!(store.get_i64(keys::WEEK_ID, 1).await.unwrap(), 3);
        assert_eq!(store.get_i64(keys::HEARTBEAT_TIME, 0).await.unwrap(), 1_700_000_000_000);

        // A second store over the same file sees the data.
        let reopened = JsonPreferenceStore::new(store.path()).await.unwrap();
        assert_eq!(reopened.get_i64(keys::WEEK_ID, 1).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = JsonPreferenceStore::new(&path).await.unwrap();
        let err = store.get_i64(keys::WEEK_ID, 1).await.unwrap_err();
        assert!(matches!(err, StoreError::Json(_)));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_two_handles_keep_each_others_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        let heartbeat_writer = JsonPreferenceStore::new(&path).await.unwrap();
        let week_writer = JsonPreferenceStore::new(&path).await.unwrap();

        for round in 1..=50 {
            let (beat, week) = tokio::join!(
                heartbeat_writer.put_i64(keys::HEARTBEAT_TIME, round),
                week_writer.put_i64(keys::WEEK_ID, round),
            );
            beat.unwrap();
            week.unwrap();

            assert_eq!(heartbeat_writer.get_i64(keys::WEEK_ID, 0).await.unwrap(), round);
            assert_eq!(week_writer.get_i64(keys::HEARTBEAT_TIME, 0).await.unwrap(), round);
        }

        // Only the data file and its lock remain; temp files were renamed away.
        let mut names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect();
        names.sort();
        assert_eq!(names, vec!["prefs.json", "prefs.json.lock"]);
    }

    #[tokio::test]
    async fn test_corrupt_file_blocks_writes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = JsonPreferenceStore::new(&path).await.unwrap();
        let err = store.put_i64(keys::WEEK_ID, 2).await.unwrap_err();
        assert!(matches!(err, StoreError::Json(_)));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ not json");
    }
}
