//! Bank configuration, loaded from TOML.
//!
//! ```toml
//! seed = 60
//! max_attempts = 1000
//!
//! [[tiers]]
//! shape = [3, 3, 3]
//! palette = ["r", "g", "b"]
//! count = 3
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::puzzle::DEFAULT_MAX_ATTEMPTS;

/// Unvalidated bank settings. Missing fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BankConfig {
    pub seed: u64,
    pub max_attempts: usize,
    pub tiers: Vec<TierConfig>,
}

/// One difficulty tier, as written in a config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierConfig {
    pub shape: [usize; 3],
    pub palette: Vec<String>,
    pub count: usize,
}

impl TierConfig {
    fn rgb_cube(side: usize) -> Self {
        Self {
            shape: [side; 3],
            palette: ["r", "g", "b"].map(String::from).to_vec(),
            count: 3,
        }
    }
}

impl Default for BankConfig {
    /// Three tiers of 3 puzzles each, on 3-, 4- and 5-cubes with red, green
    /// and blue streaks.
    fn default() -> Self {
        Self {
            seed: 0,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            tiers: [3, 4, 5].map(TierConfig::rgb_cube).to_vec(),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigFileError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl BankConfig {
    /// Reads a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigFileError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigFileError::Read {
            path: path.to_owned(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigFileError::Parse {
            path: path.to_owned(),
            source,
        })
    }
}
