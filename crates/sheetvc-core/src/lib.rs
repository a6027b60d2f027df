//! # sheetvc-core
//!
//! Workbook model for the sheetvc spreadsheet version tracker.
//!
//! This crate provides the in-memory shape every other sheetvc crate operates on:
//! - [`Workbook`] - The complete document (metadata, properties, defined names, sheets)
//! - [`Worksheet`] - One sheet: cells keyed by A1 reference plus layout and auxiliary objects
//! - [`Cell`] and [`CellValue`] - A cell's last computed value, formula and decorations
//! - [`CellAddress`] and [`CellRange`] - Validated A1 reference helpers
//!
//! The model carries no behaviour beyond construction, access and structural
//! equality. Every pointer-like field (style, comment, hyperlink, array formula,
//! validation) is an `Option`: absence means "not set", which is a different fact
//! from "set to an empty value".
//!
//! ## Example
//!
//! ```rust
//! use sheetvc_core::{Cell, CellValue, Workbook, Worksheet};
//!
//! let mut sheet = Worksheet::new("Sheet1", 0);
//! sheet.set_cell("A1", Cell::new("Header"));
//! sheet.set_cell("A2", Cell::new(123.45));
//! sheet.set_cell("B1", Cell::formula("=A2*2", 246.9));
//!
//! let mut workbook = Workbook::new();
//! workbook.push_sheet(sheet);
//!
//! let a2 = workbook.sheet_by_name("Sheet1").unwrap().cell("A2").unwrap();
//! assert_eq!(a2.value, CellValue::Number(123.45));
//! ```

pub mod cell;
pub mod chart;
pub mod comment;
pub mod conditional_format;
pub mod error;
pub mod pivot;
pub mod style;
pub mod table;
pub mod validation;
pub mod workbook;
pub mod worksheet;

// Re-exports for convenience
pub use cell::{ArrayFormula, Cell, CellAddress, CellError, CellRange, CellType, CellValue};
pub use chart::{Chart, ChartAxes, ChartAxis, ChartLegend, ChartPosition, ChartSeries, ChartStyle};
pub use comment::CellComment;
pub use conditional_format::ConditionalFormat;
pub use error::{Error, Result};
pub use pivot::{PivotDataField, PivotField, PivotTable, PivotTableSettings};
pub use table::{AutoFilter, FilterColumn, Table};
pub use validation::DataValidation;
pub use workbook::{DocumentMetadata, DocumentProperties, Workbook, FORMAT_VERSION};
pub use worksheet::{MergedCell, SheetProtection, Worksheet};

pub use style::{Alignment, Border, BorderLine, CellStyle, Fill, Font};

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;

pub(crate) fn is_false(b: &bool) -> bool {
    !*b
}
