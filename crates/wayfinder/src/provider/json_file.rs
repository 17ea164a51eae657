use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use tracing::debug;

use super::{StorageBackend, StorageError};

/// File-backed storage: one JSON object mapping keys to string values.
///
/// Every mutation rewrites the whole file before returning, matching the
/// synchronous-persist contract of the history/favorites store. The map is
/// kept ordered so repeated writes of the same state are byte-identical.
#[derive(Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
    map: BTreeMap<String, String>,
}

impl JsonFileStorage {
    /// Open (or create on first write) the store at `path`.
    ///
    /// A missing file is treated as an empty store; a malformed one is an
    /// error rather than silent data loss.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        let map = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(err.into()),
        };
        debug!(path = %path.display(), keys = map.len(), "Opened JSON storage");
        Ok(Self { path, map })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StorageError> {
        let contents = serde_json::to_string_pretty(&self.map)?;
        fs::write(&self.path, contents)?;
        Ok(())
    }
}

impl StorageBackend for JsonFileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.map.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.map.insert(key.to_owned(), value.to_owned());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        if self.map.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}
