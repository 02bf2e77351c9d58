use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_OUTBOX_FILE: &str = "statements.db";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RepositoryBackend {
    /// Acknowledge statements without storing them
    #[default]
    None,
    /// Append statements to a local SQLite outbox
    Sqlite,
}

impl RepositoryBackend {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "none" | "noop" => Some(Self::None),
            "sqlite" => Some(Self::Sqlite),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepositoryConfig {
    #[serde(default)]
    pub backend: RepositoryBackend,
    /// Outbox database path (default: `<data dir>/statements.db`)
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl RepositoryConfig {
    pub fn outbox_path(&self, data_dir: &Path) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| data_dir.join(DEFAULT_OUTBOX_FILE))
    }
}
