//! Chunking strategy interface

use std::fmt;
use std::path::{Path, PathBuf};

use sheetvc_core::Workbook;

use crate::config::Config;
use crate::error::{ChunkError, ChunkResult};
use crate::hybrid::HybridChunking;
use crate::options::ChunkOptions;
use crate::sheet_based::SheetBasedChunking;

/// A physical layout for chunk sets
///
/// `base_path` is always the logical source file (e.g. the original spreadsheet).
/// Implementations derive the chunk directory from it deterministically.
pub trait ChunkingStrategy: Send + Sync {
    /// Name recorded in the manifest
    fn name(&self) -> &'static str;

    /// Write `workbook` as a chunk set, returning the absolute paths written
    fn write_chunks(
        &self,
        workbook: &Workbook,
        base_path: &Path,
        options: &ChunkOptions,
    ) -> ChunkResult<Vec<PathBuf>>;

    /// Rebuild a workbook from its chunk set
    fn read_chunks(&self, base_path: &Path) -> ChunkResult<ChunkRead>;

    /// Absolute paths of every file the manifest lists
    fn chunk_paths(&self, base_path: &Path) -> ChunkResult<Vec<PathBuf>>;
}

/// Result of a read: the workbook plus any sheet files that were skipped or suspect
#[derive(Debug, Clone)]
pub struct ChunkRead {
    pub workbook: Workbook,
    pub warnings: Vec<ChunkWarning>,
}

impl ChunkRead {
    /// Check if the read was clean
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// What went wrong with a single sheet file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkWarningKind {
    /// File could not be read; sheet omitted
    Unreadable,
    /// File could not be parsed; sheet omitted
    Unparsable,
    /// Manifest entry escapes the chunk directory; skipped
    OutsideChunkDir,
    /// Sheet kept, but its workbook checksum differs from the index file
    ChecksumMismatch,
}

/// A non-fatal problem met while reading a chunk set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkWarning {
    pub file: PathBuf,
    pub kind: ChunkWarningKind,
    pub message: String,
}

impl fmt::Display for ChunkWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.file.display(), self.message)
    }
}

/// Pick the strategy named in the configuration
///
/// The hybrid strategy is only returned when experimental features are enabled.
pub fn strategy_from_config(config: &Config) -> ChunkResult<Box<dyn ChunkingStrategy>> {
    let name = config.converter.chunking_strategy.trim();
    match name {
        "" | SheetBasedChunking::NAME => Ok(Box::new(SheetBasedChunking::new())),
        HybridChunking::NAME if config.features.enable_experimental_features => Ok(Box::new(
            HybridChunking::new(config.converter.max_cells_per_file),
        )),
        HybridChunking::NAME => Err(ChunkError::StrategyNotEnabled(name.to_string())),
        other => Err(ChunkError::UnknownStrategy(other.to_string())),
    }
}
