//! Seen-set persistence
//!
//! State lives in a single JSON array of URLs, written sorted so the file
//! diffs cleanly when committed between runs.

use std::fs;
use std::path::{Path, PathBuf};

use shared_types::SeenSet;
use tracing::{debug, warn};

use crate::error::StoreError;

pub struct SeenStore {
    path: PathBuf,
}

impl SeenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing or unreadable state is an empty set, never an error.
    pub fn load(&self) -> SeenSet {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No seen state yet");
                return SeenSet::new();
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Could not read seen state, starting empty");
                return SeenSet::new();
            }
        };

        match serde_json::from_str::<SeenSet>(&raw) {
            Ok(seen) => {
                debug!(path = %self.path.display(), entries = seen.len(), "Loaded seen state");
                seen
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Corrupt seen state, starting empty");
                SeenSet::new()
            }
        }
    }

    /// Replace the stored state. Writes a sibling temp file and renames it
    /// over the target, so an interrupted save leaves the old state intact.
    pub fn save(&self, seen: &SeenSet) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(seen)?;
        let tmp = self.tmp_path();
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), entries = seen.len(), "Saved seen state");
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
