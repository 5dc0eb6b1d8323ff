//! Runtime configuration read from the environment.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};

pub const SEED_VAR: &str = "TWENTY48_SEED";
pub const BEST_SCORE_PATH_VAR: &str = "TWENTY48_BEST_SCORE_PATH";
pub const NO_ANIMATION_VAR: &str = "TWENTY48_NO_ANIMATION";
pub const LOG_VAR: &str = "TWENTY48_LOG";

const DEFAULT_BEST_SCORE_FILE: &str = ".tui-2048.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub seed: u32,
    /// `None` disables best-score persistence.
    pub best_score_path: Option<PathBuf>,
    pub animate: bool,
    pub log_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let seed = match get(SEED_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .with_context(|| format!("{SEED_VAR} must be an unsigned 32-bit integer, got {raw:?}"))?,
            None => clock_seed(),
        };

        let best_score_path = get(BEST_SCORE_PATH_VAR)
            .map(PathBuf::from)
            .or_else(|| get("HOME").map(|home| PathBuf::from(home).join(DEFAULT_BEST_SCORE_FILE)));

        let animate = !matches!(get(NO_ANIMATION_VAR).as_deref(), Some(v) if v != "0");

        Ok(Self {
            seed,
            best_score_path,
            animate,
            log_path: get(LOG_VAR).map(PathBuf::from),
        })
    }
}

fn clock_seed() -> u32 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    (now.as_secs() as u32) ^ now.subsec_nanos()
}
