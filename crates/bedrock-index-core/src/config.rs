//! Index configuration

use crate::error::{IndexError, IndexResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the per-project config file looked up in the workspace root
pub const CONFIG_FILE_NAME: &str = ".bedrock-index.toml";

/// Default maximum size of an indexed file (8 MiB)
pub const DEFAULT_MAX_FILE_SIZE: u64 = 8 * 1024 * 1024;

/// Configuration for the definition index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Paths to exclude from glob scans (globs relative to the workspace root)
    pub exclude: Vec<String>,

    /// Extensions probed, in order, when resolving a bare texture reference
    pub texture_extensions: Vec<String>,

    /// Order scan results by distance from the active document
    pub proximity_ordering: bool,

    /// Files larger than this are skipped
    pub max_file_size: u64,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            exclude: vec![
                "node_modules/**".to_string(),
                ".git/**".to_string(),
                "target/**".to_string(),
            ],
            texture_extensions: vec!["png".to_string(), "tga".to_string()],
            proximity_ordering: true,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl IndexConfig {
    /// Load config from file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Compile the exclude globs
    pub fn exclude_patterns(&self) -> IndexResult<Vec<glob::Pattern>> {
        self.exclude
            .iter()
            .map(|p| {
                glob::Pattern::new(p).map_err(|source| IndexError::InvalidGlob {
                    pattern: p.clone(),
                    source,
                })
            })
            .collect()
    }
}
