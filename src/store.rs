//! Local webhook state.
//!
//! [`StateStore`] maps repository names to the webhook believed to exist on
//! GitHub. A repository has an entry iff its webhook exists remotely.
//! [`StateFile`] loads and persists the whole map as a JSON object.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::StoreError;

/// Local belief about one repository's webhook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookRecord {
    /// Whether the webhook is active on GitHub.
    pub enabled: bool,
    /// Identifier GitHub assigned to the webhook.
    pub id: u64,
}

/// In-memory repository name -> webhook map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateStore {
    records: BTreeMap<String, WebhookRecord>,
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, repo: &str) -> bool {
        self.records.contains_key(repo)
    }

    pub fn get(&self, repo: &str) -> Option<&WebhookRecord> {
        self.records.get(repo)
    }

    pub fn set(&mut self, repo: impl Into<String>, record: WebhookRecord) {
        self.records.insert(repo.into(), record);
    }

    pub fn delete(&mut self, repo: &str) -> Option<WebhookRecord> {
        self.records.remove(repo)
    }

    /// Records ordered by repository name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &WebhookRecord)> {
        self.records.iter().map(|(name, record)| (name.as_str(), record))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<(String, WebhookRecord)> for StateStore {
    fn from_iter<I: IntoIterator<Item = (String, WebhookRecord)>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

/// Durable location of the [`StateStore`].
pub struct StateFile {
    path: PathBuf,
}

impl StateFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole store. A missing file is an I/O error, not an empty store.
    pub fn load(&self) -> Result<StateStore, StoreError> {
        let data = fs::read_to_string(&self.path).map_err(|source| self.io_error(source))?;
        serde_json::from_str(&data).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    /// Overwrite the file with the whole store via temp file + rename, so a
    /// later `load` never sees a partially written map.
    pub fn persist(&self, store: &StateStore) -> Result<(), StoreError> {
        let data = serde_json::to_string(store).map_err(|source| self.encode_error(source))?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, data).map_err(|source| self.io_error(source))?;
        if let Err(source) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(self.io_error(source));
        }
        tracing::debug!(path = %self.path.display(), records = store.len(), "persisted webhook state");
        Ok(())
    }

    /// Create the parent directory and an empty `{}` state file if none exists.
    /// An existing file is left untouched.
    pub fn initialize(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
        }
        if self.path.exists() {
            return Ok(());
        }
        self.persist(&StateStore::new())
    }

    /// Encoding happens on the write path, so it is reported as an I/O failure
    /// rather than as a corrupt file.
    fn encode_error(&self, source: serde_json::Error) -> StoreError {
        self.io_error(io::Error::other(source))
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
