//! YAML configuration
//!
//! ```yaml
//! converter:
//!   compact_json: false
//!   chunking_strategy: sheet-based
//!   max_cells_per_file: 100000
//! features:
//!   enable_experimental_features: false
//! ```
//!
//! Every field has a default, so a partial file (or none at all) is valid.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ChunkError, ChunkResult};
use crate::layout::find_repo_root;
use crate::options::ChunkOptions;
use crate::sheet_based::SheetBasedChunking;

/// Tool configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub converter: ConverterConfig,
    pub features: FeaturesConfig,
}

/// Conversion settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Write index and sheet files without indentation
    pub compact_json: bool,
    /// "sheet-based" or "hybrid"
    pub chunking_strategy: String,
    /// Cell budget per file for the hybrid strategy
    pub max_cells_per_file: usize,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            compact_json: false,
            chunking_strategy: SheetBasedChunking::NAME.to_string(),
            max_cells_per_file: 100_000,
        }
    }
}

/// Feature switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeaturesConfig {
    /// Allow strategies that are not finished
    pub enable_experimental_features: bool,
}

impl Config {
    /// File name looked up at the repository root
    pub const FILE_NAME: &'static str = ".sheetvc.yaml";

    /// Parse configuration from YAML text
    pub fn from_yaml_str(yaml: &str) -> ChunkResult<Self> {
        Self::parse(yaml, "<inline>".to_string())
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> ChunkResult<Self> {
        let text = fs::read_to_string(path).map_err(|e| ChunkError::io("load config", path, e))?;
        Self::parse(&text, path.display().to_string())
    }

    /// Load `.sheetvc.yaml` from the repository root above `start_dir`,
    /// or the defaults when there is none
    pub fn discover(start_dir: &Path) -> ChunkResult<Self> {
        let path = find_repo_root(start_dir).join(Self::FILE_NAME);
        match fs::metadata(&path) {
            Ok(_) => Self::load(&path),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(ChunkError::io("load config", path, e)),
        }
    }

    /// Write options derived from the converter section
    pub fn chunk_options(&self) -> ChunkOptions {
        ChunkOptions {
            compact_json: self.converter.compact_json,
        }
    }

    fn parse(yaml: &str, origin: String) -> ChunkResult<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(|source| ChunkError::Config { origin, source })
    }
}
