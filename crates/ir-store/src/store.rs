//! Key-value store backends.
//!
//! Values are opaque strings, the same contract browser storage offers: the
//! store never interprets what it holds. Parsing happens in [`crate::StoreReader`].

use crate::{Result, StoreError};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// String-valued key-value store holding report inputs.
pub trait ReportStore {
    /// Read a value; `Ok(None)` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Insert or replace a value.
    fn set(&mut self, key: &str, value: String) -> Result<()>;

    /// Remove a value, returning the previous one.
    fn remove(&mut self, key: &str) -> Result<Option<String>>;

    /// All keys, sorted.
    fn keys(&self) -> Result<Vec<String>>;
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }
}

impl ReportStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.remove(key))
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.entries.keys().cloned().collect())
    }
}

/// Store persisted as a single JSON object file: `{"key": "value", ...}`.
///
/// A missing file reads as an empty store. Every write replaces the file
/// atomically through a temp file in the same directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Open a store at `path`. The file need not exist yet.
    pub fn open(path: &Path) -> Result<Self> {
        if path.is_dir() {
            return Err(StoreError::Corrupted(format!(
                "{} is a directory",
                path.display()
            )));
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        let map: Map<String, Value> = match serde_json::from_str::<Value>(&content)? {
            Value::Object(map) => map,
            other => {
                return Err(StoreError::Corrupted(format!(
                    "expected a JSON object, found {}",
                    json_kind(&other)
                )))
            }
        };

        let mut entries = BTreeMap::new();
        for (key, value) in map {
            match value {
                Value::String(s) => {
                    entries.insert(key, s);
                }
                other => {
                    return Err(StoreError::Corrupted(format!(
                        "value for '{}' is {}, expected string",
                        key,
                        json_kind(&other)
                    )))
                }
            }
        }

        debug!(path = %self.path.display(), keys = entries.len(), "Store file read");
        Ok(entries)
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)?;

        let json = serde_json::to_string_pretty(entries)?;
        let mut tmp = NamedTempFile::new_in(&dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.flush()?;
        tmp.persist(&self.path)?;

        debug!(
            path = %self.path.display(),
            bytes = json.len(),
            "Store file written"
        );
        Ok(())
    }
}

impl ReportStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        let mut entries = self.read_entries()?;
        entries.insert(key.to_string(), value);
        self.write_entries(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<Option<String>> {
        let mut entries = self.read_entries()?;
        let previous = entries.remove(key);
        if previous.is_some() {
            self.write_entries(&entries)?;
        }
        Ok(previous)
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.read_entries()?.into_keys().collect())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
