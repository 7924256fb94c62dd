use crate::identity::Address;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Construction parameters for a wallet
///
/// ```yaml
/// address: "0x5b38da6a701c568545dcfcb03fcb875f56beddc4"
/// owners:
///   - "0xab8483f64d9c6d1ecf9b849ae677dd3315835cb2"
///   - "0x4b20993bc481177ec7e8f571cecae8a9e22c02db"
/// threshold: 2
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletConfig {
    /// The wallet's own identity
    pub address: Address,
    pub owners: Vec<Address>,
    #[serde(default = "default_threshold")]
    pub threshold: usize,
}

fn default_threshold() -> usize {
    1
}

impl WalletConfig {
    pub fn new(address: Address, owners: Vec<Address>, threshold: usize) -> Self {
        Self {
            address,
            owners,
            threshold,
        }
    }

    /// Load a config from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let data = std::fs::read_to_string(path)?;
        let cfg: WalletConfig = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    /// Write the config as YAML, replacing any existing file atomically
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let data = serde_yaml::to_string(self)?;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                std::fs::create_dir_all(parent)?;
                parent
            }
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(data.as_bytes())?;
        tmp.persist(path).map_err(|e| e.error)?;
        Ok(())
    }
}
