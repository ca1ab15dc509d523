//! JSON snapshot persistence — what the previous run observed.

use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use sitewatch_common::{CorruptPolicy, WatchError};

/// Reads and writes one snapshot file.
///
/// A missing file is not an error: `load` returns the default snapshot,
/// the documented "no prior data" value. `save` is a plain overwrite,
/// not atomic — losing the file costs one duplicate notification cycle.
pub struct SnapshotStore<T> {
    path: PathBuf,
    _snapshot: PhantomData<T>,
}

impl<T> SnapshotStore<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _snapshot: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the previous snapshot. A file that exists but fails to parse
    /// yields `WatchError::CorruptSnapshot`.
    pub fn load(&self) -> Result<T, WatchError> {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(T::default()),
            Err(e) => {
                return Err(WatchError::SnapshotIo {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };

        serde_json::from_str(&json).map_err(|e| WatchError::CorruptSnapshot {
            path: self.path.clone(),
            source: e,
        })
    }

    /// Load under a corrupt-file policy: `Abort` surfaces the error,
    /// `Discard` logs and starts over from the default snapshot.
    pub fn load_with(&self, policy: CorruptPolicy) -> Result<T, WatchError> {
        match self.load() {
            Err(e @ WatchError::CorruptSnapshot { .. }) if policy == CorruptPolicy::Discard => {
                warn!(error = %e, "Discarding corrupt snapshot, starting from empty state");
                Ok(T::default())
            }
            other => other,
        }
    }

    /// Overwrite the snapshot file, creating parent directories as needed.
    pub fn save(&self, snapshot: &T) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(snapshot)?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write snapshot to {}", self.path.display()))?;
        Ok(())
    }
}
