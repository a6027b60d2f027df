//! # sheetvc-diff
//!
//! Structural diff between two workbook snapshots.
//!
//! [`compute_diff`] compares sheets by name and cells by reference. The result is
//! deterministic: sheets follow the old workbook's order (new-only sheets last)
//! and cell changes are sorted by reference string.
//!
//! ## Example
//!
//! ```rust
//! use sheetvc_core::{Cell, Workbook, Worksheet};
//! use sheetvc_diff::{compute_diff, ChangeType};
//!
//! let mut sheet = Worksheet::new("S1", 0);
//! sheet.set_cell("A1", Cell::new("x"));
//! let mut old = Workbook::new();
//! old.push_sheet(sheet);
//!
//! let diff = compute_diff(&old, &Workbook::new());
//! assert_eq!(diff.sheet_diffs[0].action, Some(ChangeType::Delete));
//! assert_eq!(diff.to_string(), "1 sheet(s) deleted, 1 cell(s) changed");
//! ```

mod engine;
mod model;
mod options;

pub use engine::{compute_diff, compute_diff_with, describe_cell_change};
pub use model::{CellChange, ChangeType, Diff, DiffSummary, SheetDiff};
pub use options::DiffOptions;
