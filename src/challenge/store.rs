//! Run persistence: one JSON file per challenge under `data/challenges/`.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::challenge::ChallengeRunState;

pub const DEFAULT_CHALLENGE_STORE_DIR: &str = "data/challenges";

#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Serialize(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for StoreError {}

fn run_path(dir: &str, challenge_id: &str) -> PathBuf {
    let sanitized: String = challenge_id
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect();
    let stem = if sanitized.is_empty() {
        "unknown".to_string()
    } else {
        sanitized
    };
    Path::new(dir).join(format!("{stem}.json"))
}

pub fn save_run(dir: &str, state: &ChallengeRunState) -> Result<(), StoreError> {
    fs::create_dir_all(dir).map_err(StoreError::Io)?;
    let raw = serde_json::to_string_pretty(state).map_err(StoreError::Serialize)?;
    fs::write(run_path(dir, &state.challenge_id), raw).map_err(StoreError::Io)
}

/// Load a saved run. A missing file is `None`, not an error.
pub fn load_run(dir: &str, challenge_id: &str) -> Result<Option<ChallengeRunState>, StoreError> {
    let path = run_path(dir, challenge_id);
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(&path).map_err(StoreError::Io)?;
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(StoreError::Serialize)
}

pub fn clear_run(dir: &str, challenge_id: &str) -> Result<(), StoreError> {
    let path = run_path(dir, challenge_id);
    if path.exists() {
        fs::remove_file(path).map_err(StoreError::Io)?;
    }
    Ok(())
}
