use super::super::{GatewayConfig, RepositoryConfig};
use crate::compiler::Thresholds;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Data directory - computed from home, not serialized
    #[serde(skip)]
    pub data_dir: PathBuf,
    /// Path to config.toml - computed from home, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(default)]
    pub retention: Thresholds,

    #[serde(default)]
    pub gateway: GatewayConfig,

    #[serde(default)]
    pub repository: RepositoryConfig,
}

impl Config {
    /// Reject minimums that would let a job delete everything immediately.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.retention.min_days <= 0 {
            return Err(ConfigError::Validation(format!(
                "retention.min_days must be positive, got {}",
                self.retention.min_days
            )));
        }
        if self.retention.min_limit <= 0 {
            return Err(ConfigError::Validation(format!(
                "retention.min_limit must be positive, got {}",
                self.retention.min_limit
            )));
        }
        Ok(())
    }

    pub fn outbox_path(&self) -> PathBuf {
        self.repository.outbox_path(&self.data_dir)
    }
}
