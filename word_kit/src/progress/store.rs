//! Progress store implementations.
//!
//! Stores are synchronous: `save` returns only once the record is durable,
//! so a crash never loses more than the round in flight.

use log::{debug, warn};
use std::{
    fs::{self, File},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};
use uuid::Uuid;

use super::{
    errors::{ProgressError, ProgressResult},
    models::Progress,
};

/// Persistence boundary for [`Progress`].
pub trait ProgressStore: Send {
    /// Load saved progress. `Ok(None)` means nothing was saved yet.
    fn load(&self) -> ProgressResult<Option<Progress>>;

    /// Durably replace saved progress.
    fn save(&mut self, progress: &Progress) -> ProgressResult<()>;
}

/// Progress kept in a pretty-printed JSON file.
///
/// Writes go to a uniquely named sibling temp file which is synced and then
/// renamed over the target, so readers never see a half-written file.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> ProgressError {
        ProgressError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn write_temp(&self, tmp_path: &Path, content: &str) -> std::io::Result<()> {
        let mut tmp = File::create(tmp_path)?;
        tmp.write_all(content.as_bytes())?;
        tmp.sync_all()
    }
}

impl ProgressStore for JsonFileStore {
    fn load(&self) -> ProgressResult<Option<Progress>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No saved progress at {}", self.path.display());
                return Ok(None);
            }
            Err(e) => return Err(self.io_error(e)),
        };

        let progress = serde_json::from_str(&content)?;
        Ok(Some(progress))
    }

    fn save(&mut self, progress: &Progress) -> ProgressResult<()> {
        let content = serde_json::to_string_pretty(progress)?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(|e| self.io_error(e))?;

        let base = self
            .path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("progress.json");
        let tmp_path = dir.join(format!(".{base}.tmp-{}", Uuid::new_v4()));

        if let Err(e) = self
            .write_temp(&tmp_path, &content)
            .and_then(|()| fs::rename(&tmp_path, &self.path))
        {
            if let Err(cleanup) = fs::remove_file(&tmp_path) {
                warn!(
                    "Failed to remove temp progress file {}: {}",
                    tmp_path.display(),
                    cleanup
                );
            }
            return Err(self.io_error(e));
        }
        if let Ok(dir) = File::open(dir) {
            let _ = dir.sync_all();
        }

        debug!("Saved progress to {}", self.path.display());
        Ok(())
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    progress: Option<Progress>,
    writes: usize,
    fail_writes: bool,
}

/// In-memory store. Clones share the same record, so a caller can keep a
/// clone to inspect what the engine wrote.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that already holds `progress`.
    pub fn with_progress(progress: Progress) -> Self {
        let store = Self::default();
        store.lock().progress = Some(progress);
        store
    }

    /// Last saved progress, if any.
    pub fn snapshot(&self) -> Option<Progress> {
        self.lock().progress.clone()
    }

    /// Number of successful saves.
    pub fn write_count(&self) -> usize {
        self.lock().writes
    }

    /// Make every following save fail with [`ProgressError::Unavailable`].
    pub fn set_fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ProgressStore for MemoryStore {
    fn load(&self) -> ProgressResult<Option<Progress>> {
        Ok(self.lock().progress.clone())
    }

    fn save(&mut self, progress: &Progress) -> ProgressResult<()> {
        let mut state = self.lock();
        if state.fail_writes {
            return Err(ProgressError::Unavailable(
                "memory store is rejecting writes".to_string(),
            ));
        }
        state.progress = Some(progress.clone());
        state.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("word_kit_store_{}", Uuid::new_v4()))
            .join("progress.json")
    }

    #[test]
    fn test_file_store_missing_file_loads_none() {
        let store = JsonFileStore::new(temp_path());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_file_store_save_then_load() {
        let path = temp_path();
        let mut store = JsonFileStore::new(&path);

        let mut progress = Progress::default();
        progress.max_unlocked_level = 4;
        progress.completed_levels.extend([0, 1, 2, 3]);
        progress.hints_remaining = 1;
        store.save(&progress).unwrap();

        let loaded = JsonFileStore::new(&path).load().unwrap().unwrap();
        assert_eq!(loaded, progress);

        // Temp files are renamed away
        let leftovers: Vec<_> = fs::read_dir(path.parent().unwrap())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_name().to_string_lossy().contains(".tmp-"))
            .collect();
        assert!(leftovers.is_empty());

        fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_file_store_corrupt_file_is_an_error() {
        let path = temp_path();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();

        let err = JsonFileStore::new(&path).load().unwrap_err();
        assert!(matches!(err, ProgressError::Serialization(_)));

        fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_memory_store_shares_state_between_clones() {
        let observer = MemoryStore::new();
        let mut store = observer.clone();
        store.save(&Progress::default()).unwrap();

        assert_eq!(observer.write_count(), 1);
        assert_eq!(observer.snapshot(), Some(Progress::default()));
    }

    #[test]
    fn test_memory_store_rejects_writes_when_asked() {
        let mut store = MemoryStore::new();
        store.set_fail_writes(true);

        let err = store.save(&Progress::default()).unwrap_err();
        assert!(matches!(err, ProgressError::Unavailable(_)));
        assert_eq!(store.write_count(), 0);
        assert!(store.snapshot().is_none());
    }
}
