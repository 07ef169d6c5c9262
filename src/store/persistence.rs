//! File-backed state store

use crate::error::PersistenceError;
use crate::store::{codec, StateStore};
use crate::tree::Tree;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, instrument};

/// Default snapshot file, relative to the process working directory
pub const DEFAULT_STATE_FILE: &str = "filesystem_state.json";

/// Stores the tree as a pretty-printed JSON document in a single file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| DEFAULT_STATE_FILE.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self::new(DEFAULT_STATE_FILE)
    }
}

impl StateStore for JsonFileStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> Result<Option<Tree>, PersistenceError> {
        if !self.path.exists() {
            debug!("No saved state");
            return Ok(None);
        }

        let start = Instant::now();
        let text = fs::read_to_string(&self.path)?;
        let tree = codec::from_json(&text)?;
        info!(
            node_count = tree.len(),
            duration_ms = start.elapsed().as_millis(),
            "State loaded"
        );
        Ok(Some(tree))
    }

    /// Write the snapshot atomically.
    ///
    /// The document goes to a sibling temporary file which is then renamed
    /// over the target, so a failed save leaves the previous snapshot intact.
    #[instrument(skip(self, tree), fields(path = %self.path.display()))]
    fn save(&self, tree: &Tree) -> Result<(), PersistenceError> {
        let start = Instant::now();
        let document = codec::to_json(tree)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let temp_path = self.temp_path();
        fs::write(&temp_path, document.as_bytes())?;
        fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            PersistenceError::Io(e)
        })?;

        info!(
            node_count = tree.len(),
            bytes = document.len(),
            duration_ms = start.elapsed().as_millis(),
            "State saved"
        );
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
