//! # sheetvc
//!
//! Track spreadsheet workbooks in text-based version control.
//!
//! A [`Workbook`] built from a spreadsheet is stored as a chunk set (manifest,
//! index file, one JSON file per sheet) next to the repository, and two
//! workbooks can be compared sheet by sheet and cell by cell.
//!
//! ## Example
//!
//! ```rust,no_run
//! use sheetvc::prelude::*;
//!
//! let mut sheet = Worksheet::new("Sheet1", 0);
//! sheet.set_cell("A1", Cell::new("Header"));
//! sheet.set_cell("A2", Cell::new(123.45));
//!
//! let mut workbook = Workbook::new();
//! workbook.push_sheet(sheet);
//!
//! // Writes <repo>/.sheetvc/data/reports/budget_chunks/...
//! workbook.save_chunks("reports/budget.xlsx").unwrap();
//!
//! let stored = Workbook::load_chunks("reports/budget.xlsx").unwrap();
//! assert!(!workbook.diff(&stored.workbook).has_changes());
//! ```

pub mod prelude;

// Re-export core types
pub use sheetvc_core::{
    Alignment, ArrayFormula, AutoFilter, Border, BorderLine, Cell, CellAddress, CellComment,
    CellError, CellRange, CellStyle, CellType, CellValue, Chart, ChartAxes, ChartAxis,
    ChartLegend, ChartPosition, ChartSeries, ChartStyle, ConditionalFormat, DataValidation,
    DocumentMetadata, DocumentProperties, Error, Fill, FilterColumn, Font, MergedCell,
    PivotDataField, PivotField, PivotTable, PivotTableSettings, Result, SheetProtection, Table,
    Workbook, Worksheet, FORMAT_VERSION, MAX_COLS, MAX_ROWS,
};

// Re-export chunk codec types
pub use sheetvc_chunk::{
    find_repo_root, sanitize_file_name, sheet_file_name, source_checksum, strategy_from_config,
    ChunkError, ChunkLayout, ChunkOptions, ChunkRead, ChunkResult, ChunkWarning,
    ChunkWarningKind, ChunkingStrategy, Config, ErrorKind, HybridChunking, Manifest,
    RepoRootCache, SheetBasedChunking, SheetChunk, SourceInfo, CHUNKS_DIR_SUFFIX, DATA_SUBDIR,
    INDEX_FILE_NAME, MANIFEST_FILE_NAME, REPO_MARKER, STATE_DIR,
};

// Re-export diff types
pub use sheetvc_diff::{
    compute_diff, compute_diff_with, CellChange, ChangeType, Diff, DiffOptions, DiffSummary,
    SheetDiff,
};

use std::path::{Path, PathBuf};

/// Extension trait for Workbook to add chunk storage and diffing
pub trait WorkbookExt {
    /// Write the workbook as a chunk set for the source file at `source`
    fn save_chunks<P: AsRef<Path>>(&self, source: P) -> ChunkResult<Vec<PathBuf>>;

    /// Read the chunk set stored for the source file at `source`
    fn load_chunks<P: AsRef<Path>>(source: P) -> ChunkResult<ChunkRead>;

    /// Compare against a newer version of the workbook
    fn diff(&self, newer: &Workbook) -> Diff;
}

impl WorkbookExt for Workbook {
    fn save_chunks<P: AsRef<Path>>(&self, source: P) -> ChunkResult<Vec<PathBuf>> {
        let source = source.as_ref();
        let config = config_for(source)?;
        strategy_from_config(&config)?.write_chunks(self, source, &config.chunk_options())
    }

    fn load_chunks<P: AsRef<Path>>(source: P) -> ChunkResult<ChunkRead> {
        let source = source.as_ref();
        let config = config_for(source)?;
        strategy_from_config(&config)?.read_chunks(source)
    }

    fn diff(&self, newer: &Workbook) -> Diff {
        compute_diff(self, newer)
    }
}

/// Configuration governing the chunk set of `source`, discovered from its directory
pub fn config_for(source: &Path) -> ChunkResult<Config> {
    match source.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => Config::discover(parent),
        _ => Config::discover(Path::new(".")),
    }
}
