use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::warn;

use crate::traits::RoundStore;
use crate::types::RoundState;

/// Round persistence as a single JSON document on disk.
pub struct FileRoundStore {
    path: PathBuf,
}

impl FileRoundStore {
    /// Store rooted at `{data_dir}/round.json`.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join("round.json"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RoundStore for FileRoundStore {
    fn name(&self) -> &'static str {
        "file-round-store"
    }

    fn load(&self) -> Result<Option<RoundState>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Failed to read round state file, starting fresh: {}", e);
                return Ok(None);
            }
        };
        match serde_json::from_str(&raw) {
            Ok(state) => Ok(Some(state)),
            Err(e) => {
                // Corrupt state is treated as absent rather than fatal.
                warn!("Failed to parse round state file, starting fresh: {}", e);
                Ok(None)
            }
        }
    }

    fn save(&self, state: &RoundState) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let raw = serde_json::to_string_pretty(state)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}
