//! Size-based chunking placeholder

use std::path::{Path, PathBuf};

use sheetvc_core::Workbook;

use crate::error::{ChunkError, ChunkResult};
use crate::options::ChunkOptions;
use crate::strategy::{ChunkRead, ChunkingStrategy};

/// Strategy that will split large sheets into cell-range files
///
/// Every operation currently fails with [`ChunkError::NotImplemented`]. It is
/// only reachable through [`strategy_from_config`](crate::strategy_from_config)
/// with experimental features enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HybridChunking {
    max_cells_per_file: usize,
}

impl HybridChunking {
    /// Strategy name in configuration and manifests
    pub const NAME: &'static str = "hybrid";

    pub fn new(max_cells_per_file: usize) -> Self {
        Self { max_cells_per_file }
    }

    /// Cell budget per file
    pub fn max_cells_per_file(&self) -> usize {
        self.max_cells_per_file
    }

    fn unimplemented<T>(operation: &'static str) -> ChunkResult<T> {
        Err(ChunkError::NotImplemented {
            strategy: Self::NAME,
            operation,
        })
    }
}

impl ChunkingStrategy for HybridChunking {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn write_chunks(
        &self,
        _workbook: &Workbook,
        _base_path: &Path,
        _options: &ChunkOptions,
    ) -> ChunkResult<Vec<PathBuf>> {
        Self::unimplemented("write_chunks")
    }

    fn read_chunks(&self, _base_path: &Path) -> ChunkResult<ChunkRead> {
        Self::unimplemented("read_chunks")
    }

    fn chunk_paths(&self, _base_path: &Path) -> ChunkResult<Vec<PathBuf>> {
        Self::unimplemented("chunk_paths")
    }
}
