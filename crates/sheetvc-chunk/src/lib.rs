//! # sheetvc-chunk
//!
//! Chunked JSON codec for sheetvc workbooks.
//!
//! A workbook is written as a *chunk set*: one manifest, one index file with
//! workbook metadata and a sheet table of contents, and one file per sheet. The
//! set lives under `<repo root>/.sheetvc/data/<relative dir>/<name>_chunks/`, so a
//! one-cell edit touches one small file instead of a binary blob.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use sheetvc_chunk::{ChunkOptions, ChunkingStrategy, SheetBasedChunking};
//! use sheetvc_core::{Cell, Workbook, Worksheet};
//!
//! let mut sheet = Worksheet::new("Sheet1", 0);
//! sheet.set_cell("A1", Cell::new("Header"));
//! let mut workbook = Workbook::new();
//! workbook.push_sheet(sheet);
//!
//! let strategy = SheetBasedChunking::new();
//! let source = Path::new("reports/budget.xlsx");
//! strategy.write_chunks(&workbook, source, &ChunkOptions::default()).unwrap();
//!
//! let read = strategy.read_chunks(source).unwrap();
//! assert_eq!(read.workbook.sheet_count(), 1);
//! ```

mod checksum;
mod config;
mod error;
mod format;
mod hybrid;
mod layout;
mod options;
mod sheet_based;
mod strategy;

pub use checksum::{source_checksum, SourceInfo};
pub use config::{Config, ConverterConfig, FeaturesConfig};
pub use error::{ChunkError, ChunkResult, ErrorKind};
pub use format::{Manifest, SheetChunk};
pub use hybrid::HybridChunking;
pub use layout::{
    find_repo_root, is_chunk_dir, sanitize_file_name, sheet_file_name, ChunkLayout, RepoRootCache,
    CHUNKS_DIR_SUFFIX, DATA_SUBDIR, INDEX_FILE_NAME, MANIFEST_FILE_NAME, REPO_MARKER, STATE_DIR,
};
pub use options::ChunkOptions;
pub use sheet_based::SheetBasedChunking;
pub use strategy::{strategy_from_config, ChunkRead, ChunkWarning, ChunkWarningKind, ChunkingStrategy};
