use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A key-value store of JSON values, keyed by namespace strings, kept in a
/// single JSON file.
///
/// The file is read once when the store is opened and rewritten in full on
/// every [`Store::set()`].  A store opened with no path lives only in memory.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Store {
    path: Option<PathBuf>,
    entries: Map<String, Value>,
}

impl Store {
    /// Create a store that is never written to disk
    pub(crate) fn in_memory() -> Store {
        Store::default()
    }

    /// Open the store file at `path`.  A missing file is treated as an empty
    /// store.
    pub(crate) fn open(path: PathBuf) -> Result<Store, LoadError> {
        let entries = match fs_err::read(&path) {
            Ok(src) => serde_json::from_slice(&src).map_err(LoadError::deserialize)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Map::new(),
            Err(e) => return Err(LoadError::read(e)),
        };
        Ok(Store {
            path: Some(path),
            entries,
        })
    }

    pub(crate) fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Fetch and deserialize the value stored under `key`.  Returns
    /// `Ok(None)` if there is no such value.
    pub(crate) fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, LoadError> {
        self.entries
            .get(key)
            .map(|v| T::deserialize(v).map_err(LoadError::deserialize))
            .transpose()
    }

    /// Store `value` under `key` and write the store to disk
    pub(crate) fn set<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), SaveError> {
        let value = serde_json::to_value(value).map_err(SaveError::serialize)?;
        self.entries.insert(key.to_owned(), value);
        self.save()
    }

    fn save(&self) -> Result<(), SaveError> {
        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::create_dir_all(parent).map_err(SaveError::mkdir)?;
        }
        let mut src = serde_json::to_string_pretty(&self.entries).map_err(SaveError::serialize)?;
        src.push('\n');
        fs_err::write(path, &src).map_err(SaveError::write)?;
        Ok(())
    }
}

#[derive(Debug, Error)]
#[error("failed to save data to store")]
pub(crate) struct SaveError(#[source] SaveErrorSource);

impl SaveError {
    fn mkdir(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Mkdir(e))
    }

    fn serialize(e: serde_json::Error) -> Self {
        SaveError(SaveErrorSource::Serialize(e))
    }

    fn write(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Write(e))
    }
}

#[derive(Debug, Error)]
enum SaveErrorSource {
    #[error("failed to create parent directories")]
    Mkdir(#[source] std::io::Error),
    #[error("failed to serialize value")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write store file")]
    Write(#[source] std::io::Error),
}

#[derive(Debug, Error)]
#[error("failed to load data from store")]
pub(crate) struct LoadError(#[source] LoadErrorSource);

impl LoadError {
    fn read(e: std::io::Error) -> Self {
        LoadError(LoadErrorSource::Read(e))
    }

    fn deserialize(e: serde_json::Error) -> Self {
        LoadError(LoadErrorSource::Deserialize(e))
    }
}

#[derive(Debug, Error)]
enum LoadErrorSource {
    #[error("failed to read store file")]
    Read(#[source] std::io::Error),
    #[error("failed to deserialize value")]
    Deserialize(#[source] serde_json::Error),
}
