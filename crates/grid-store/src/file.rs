//! JSON file backend
//!
//! Reads and writes a single pretty-printed JSON document. Writes follow
//! the temp-file-then-rename pattern:
//! 1. Write to `<file>.tmp.<timestamp>`
//! 2. Fsync to disk
//! 3. Rename over the original
//!
//! On failure before the rename, the temp file is left behind as a safety
//! copy.

use crate::error::{Result, StoreError};
use crate::Store;
use chrono::Local;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// A [`Store`] backed by one JSON file.
#[derive(Debug)]
pub struct JsonFileStore<T> {
    path: PathBuf,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonFileStore<T> {
    /// Creates a store for the document at `path`.
    ///
    /// Nothing touches the filesystem until the first `load` or `save`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _marker: PhantomData,
        }
    }

    /// Path of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let timestamp = Local::now().format("%Y%m%d-%H%M%S%.3f").to_string();
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "store.json".to_string());
        self.path.with_file_name(format!("{name}.tmp.{timestamp}"))
    }
}

impl<T> Store<T> for JsonFileStore<T>
where
    T: Serialize + DeserializeOwned,
{
    fn load(&self) -> Result<Option<T>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("no document at {}", self.path.display());
                return Ok(None);
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| StoreError::Parse(e.to_string()))
    }

    fn save(&self, value: &T) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| StoreError::Write {
                    path: self.path.clone(),
                    message: format!("Failed to create directory: {}", e),
                })?;
            }
        }

        let json =
            serde_json::to_string_pretty(value).map_err(|e| StoreError::Serialize(e.to_string()))?;

        let temp_path = self.temp_path();
        fs::write(&temp_path, json).map_err(|e| StoreError::Write {
            path: self.path.clone(),
            message: format!("Failed to write temp file: {}", e),
        })?;

        let file = fs::File::open(&temp_path).map_err(|e| StoreError::Write {
            path: self.path.clone(),
            message: format!("Failed to open temp file for fsync: {}", e),
        })?;
        file.sync_all().map_err(|e| StoreError::Write {
            path: self.path.clone(),
            message: format!("Failed to fsync: {}", e),
        })?;

        fs::rename(&temp_path, &self.path).map_err(|_| StoreError::WriteAtomic {
            path: self.path.clone(),
            temp_path: temp_path.clone(),
        })?;

        log::trace!("saved {}", self.path.display());
        Ok(())
    }
}
