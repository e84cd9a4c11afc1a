use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// JsonConnection manages the data directory and the shared read/write
/// primitives used by the repositories.
#[derive(Clone)]
pub struct JsonConnection {
    base_directory: PathBuf,
    mutation_lock: Arc<Mutex<()>>,
}

impl JsonConnection {
    /// Create a new JSON connection with a base directory
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .with_context(|| format!("Failed to create data directory {}", base_path.display()))?;
        }

        Ok(Self {
            base_directory: base_path,
            mutation_lock: Arc::new(Mutex::new(())),
        })
    }

    /// Take the mutation lock. Repositories hold this across their
    /// read-modify-write sequences so concurrent updates cannot clobber
    /// each other. A poisoned lock is still usable; the files on disk are
    /// never left half-written thanks to the temp-then-rename writes.
    pub(crate) fn lock_mutations(&self) -> MutexGuard<'_, ()> {
        self.mutation_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    pub(crate) fn children_file(&self) -> PathBuf {
        self.base_directory.join("children.json")
    }

    pub(crate) fn readings_file(&self) -> PathBuf {
        self.base_directory.join("readings.json")
    }

    pub(crate) fn active_child_file(&self) -> PathBuf {
        self.base_directory.join("active_child.json")
    }

    /// Read a JSON document, defaulting when the file does not exist yet.
    pub(crate) fn read_json<T: DeserializeOwned + Default>(&self, path: &Path) -> Result<T> {
        if !path.exists() {
            return Ok(T::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Write a JSON document atomically: write to a temp file in the same
    /// directory, then rename over the target.
    pub(crate) fn write_json<T: Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        if !self.base_directory.exists() {
            fs::create_dir_all(&self.base_directory).with_context(|| {
                format!("Failed to create data directory {}", self.base_directory.display())
            })?;
        }

        let contents = serde_json::to_string_pretty(value)?;
        let temp_path = path.with_extension("json.tmp");

        fs::write(&temp_path, contents)
            .with_context(|| format!("Failed to write {}", temp_path.display()))?;
        fs::rename(&temp_path, path)
            .with_context(|| format!("Failed to replace {}", path.display()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_new_creates_base_directory() {
        let temp_dir = tempdir().unwrap();
        let nested = temp_dir.path().join("data").join("store");
        let connection = JsonConnection::new(&nested).unwrap();
        assert!(nested.exists());
        assert_eq!(connection.base_directory(), nested.as_path());
    }

    #[test]
    fn test_read_missing_file_defaults() {
        let temp_dir = tempdir().unwrap();
        let connection = JsonConnection::new(temp_dir.path()).unwrap();
        let value: Vec<String> = connection.read_json(&connection.children_file()).unwrap();
        assert!(value.is_empty());
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let temp_dir = tempdir().unwrap();
        let connection = JsonConnection::new(temp_dir.path()).unwrap();
        let path = connection.children_file();

        connection
            .write_json(&path, &vec!["a".to_string(), "b".to_string()])
            .unwrap();
        let back: Vec<String> = connection.read_json(&path).unwrap();
        assert_eq!(back, vec!["a".to_string(), "b".to_string()]);

        // No temp file left behind
        assert!(!path.with_extension("json.tmp").exists());
    }
}
