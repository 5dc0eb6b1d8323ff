//! Best score persisted as a small JSON document: `{"best_score": N}`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestScoreRecord {
    pub best_score: u32,
}

#[derive(Debug)]
pub struct BestScoreStore {
    path: PathBuf,
    saved: u32,
}

impl BestScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            saved: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored best score.
    ///
    /// A missing file reads as 0. So does a file that does not parse; that
    /// case is logged and the file is overwritten on the next save.
    pub fn load(&mut self) -> Result<u32> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("failed to read best score from {}", self.path.display()))
            }
        };

        let best = match serde_json::from_str::<BestScoreRecord>(&text) {
            Ok(record) => record.best_score,
            Err(e) => {
                warn!("ignoring unreadable best score file {}: {}", self.path.display(), e);
                0
            }
        };
        self.saved = best;
        Ok(best)
    }

    /// Write `best` if it beats what was last loaded or saved. Returns whether
    /// the file was written.
    pub fn save(&mut self, best: u32) -> Result<bool> {
        if best <= self.saved {
            return Ok(false);
        }
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string(&BestScoreRecord { best_score: best })?;
        fs::write(&self.path, json)
            .with_context(|| format!("failed to write best score to {}", self.path.display()))?;

        debug!("best score {} saved to {}", best, self.path.display());
        self.saved = best;
        Ok(true)
    }
}
