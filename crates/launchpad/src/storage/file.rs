//! File-backed storage: one JSON document per key in a data directory

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use gaspad_types::{GasPadError, GasPadResult};
use tracing::debug;

use super::traits::KeyValueStore;

/// Directory of `<key>.json` files
///
/// Values are written to a temporary sibling and renamed into place, so a
/// reader sees either the previous document or the new one.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Open a store rooted at `dir`, creating the directory if needed
    pub fn open(dir: impl AsRef<Path>) -> GasPadResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)
            .map_err(|e| GasPadError::storage(&dir.display().to_string(), &e.to_string()))?;
        debug!("Opened file store at {}", dir.display());
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the document holding `key`
    pub fn path_for(&self, key: &str) -> GasPadResult<PathBuf> {
        let valid = !key.is_empty()
            && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(GasPadError::invalid_parameter("key", key, "ASCII letters, digits, '_' or '-'"));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> GasPadResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(GasPadError::storage(key, &e.to_string())),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> GasPadResult<()> {
        let path = self.path_for(key)?;
        let tmp = self.dir.join(format!(".{}.json.tmp", key));

        fs::write(&tmp, value).map_err(|e| GasPadError::storage(key, &e.to_string()))?;
        fs::rename(&tmp, &path).map_err(|e| GasPadError::storage(key, &e.to_string()))?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> GasPadResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(GasPadError::storage(key, &e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_put_and_get() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let mut store = JsonFileStore::open(temp_dir.path().join("nested"))?;

        assert_eq!(store.get("gaspad_launches")?, None);

        store.set("gaspad_launches", "[1,2,3]")?;
        assert_eq!(store.get("gaspad_launches")?.as_deref(), Some("[1,2,3]"));
        assert!(temp_dir.path().join("nested/gaspad_launches.json").exists());
        assert!(!temp_dir.path().join("nested/.gaspad_launches.json.tmp").exists());

        store.set("gaspad_launches", "[]")?;
        assert_eq!(store.get("gaspad_launches")?.as_deref(), Some("[]"));

        store.remove("gaspad_launches")?;
        store.remove("gaspad_launches")?;
        assert_eq!(store.get("gaspad_launches")?, None);

        Ok(())
    }

    #[test]
    fn test_rejects_path_like_keys() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let store = JsonFileStore::open(temp_dir.path())?;

        assert!(store.path_for("../escape").is_err());
        assert!(store.path_for("").is_err());
        assert!(store.path_for("gaspad-launches_v2").is_ok());
        Ok(())
    }

    #[test]
    fn test_reopen_sees_previous_writes() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        {
            let mut store = JsonFileStore::open(temp_dir.path())?;
            store.set("slot", "\"persisted\"")?;
        }

        let store = JsonFileStore::open(temp_dir.path())?;
        assert_eq!(store.get("slot")?.as_deref(), Some("\"persisted\""));
        Ok(())
    }
}
