//! Worksheet type

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cell::{Cell, CellAddress};
use crate::chart::Chart;
use crate::conditional_format::ConditionalFormat;
use crate::error::Result;
use crate::is_false;
use crate::pivot::PivotTable;
use crate::table::{AutoFilter, Table};

/// A worksheet (single sheet in a workbook)
///
/// Cells are keyed by their A1 reference. The map carries no meaningful order;
/// the `BTreeMap` only keeps serialized output stable.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Worksheet {
    /// Sheet name, unique within the workbook
    pub name: String,
    /// Zero-based position in the workbook
    pub index: usize,
    /// Cells keyed by A1 reference
    #[serde(default)]
    pub cells: BTreeMap<String, Cell>,
    /// Merged ranges
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub merged_cells: Vec<MergedCell>,
    /// Row height overrides keyed by 1-based row number
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub row_heights: BTreeMap<u32, f64>,
    /// Column width overrides keyed by column letters
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub column_widths: BTreeMap<String, f64>,
    /// Sheet is hidden
    #[serde(default)]
    pub hidden: bool,
    /// Protection settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protection: Option<SheetProtection>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditional_formats: Vec<ConditionalFormat>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub charts: Vec<Chart>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pivot_tables: Vec<PivotTable>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tables: Vec<Table>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_filter: Option<AutoFilter>,
}

impl Worksheet {
    /// Create a new empty, visible worksheet
    pub fn new<S: Into<String>>(name: S, index: usize) -> Self {
        Self {
            name: name.into(),
            index,
            ..Default::default()
        }
    }

    /// Get the sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check if the sheet is visible
    pub fn is_visible(&self) -> bool {
        !self.hidden
    }

    /// Get a cell by its reference as stored in the map
    pub fn cell(&self, reference: &str) -> Option<&Cell> {
        self.cells.get(reference)
    }

    /// Get a mutable cell by its reference
    pub fn cell_mut(&mut self, reference: &str) -> Option<&mut Cell> {
        self.cells.get_mut(reference)
    }

    /// Store a cell under `reference` as given, replacing any previous cell
    pub fn set_cell<S: Into<String>>(&mut self, reference: S, cell: Cell) -> Option<Cell> {
        self.cells.insert(reference.into(), cell)
    }

    /// Store a cell after validating and normalizing its reference ("$a$1" -> "A1")
    pub fn try_set_cell(&mut self, reference: &str, cell: Cell) -> Result<Option<Cell>> {
        let key = CellAddress::canonical(reference)?;
        Ok(self.cells.insert(key, cell))
    }

    /// Remove a cell, returning it if it existed
    pub fn remove_cell(&mut self, reference: &str) -> Option<Cell> {
        self.cells.remove(reference)
    }

    /// Number of stored cells
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Check if the sheet has no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate over cells in reference order
    pub fn cells(&self) -> impl Iterator<Item = (&str, &Cell)> {
        self.cells.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Add a merged range
    pub fn merge_cells<S: Into<String>>(&mut self, range: S) {
        self.merged_cells.push(MergedCell { range: range.into() });
    }

    /// A table-of-contents copy of this sheet: name, index and visibility only
    pub fn stub(&self) -> Self {
        Self {
            name: self.name.clone(),
            index: self.index,
            hidden: self.hidden,
            ..Default::default()
        }
    }
}

/// A merged cell range
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MergedCell {
    /// Range in A1 notation (e.g., "A1:C3")
    pub range: String,
}

/// Sheet protection settings
///
/// Each flag is an allowance granted while the sheet is protected.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SheetProtection {
    /// Password hash as reported by the engine
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub password: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub edit_objects: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub edit_scenarios: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub format_cells: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub format_columns: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub format_rows: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub insert_columns: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub insert_rows: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub insert_hyperlinks: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub delete_columns: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub delete_rows: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub select_locked_cells: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub select_unlocked_cells: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub sort: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub auto_filter: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub pivot_tables: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellValue;
    use crate::error::Error;

    #[test]
    fn test_new_worksheet() {
        let ws = Worksheet::new("Test", 2);
        assert_eq!(ws.name(), "Test");
        assert_eq!(ws.index, 2);
        assert!(ws.is_visible());
        assert!(ws.is_empty());
    }

    #[test]
    fn test_set_and_get_cells() {
        let mut ws = Worksheet::new("Test", 0);
        ws.set_cell("A1", Cell::new("Hello"));
        assert!(ws.set_cell("A1", Cell::new(42.0)).is_some());

        assert_eq!(ws.cell("A1").unwrap().value, CellValue::Number(42.0));
        assert!(ws.cell("B1").is_none());
        assert_eq!(ws.cell_count(), 1);

        assert!(ws.remove_cell("A1").is_some());
        assert!(ws.is_empty());
    }

    #[test]
    fn test_try_set_cell_normalizes() {
        let mut ws = Worksheet::new("Test", 0);
        ws.try_set_cell("$b$3", Cell::new(true)).unwrap();
        assert!(ws.cell("B3").is_some());

        assert!(matches!(
            ws.try_set_cell("3B", Cell::new(1)),
            Err(Error::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_stub_drops_content() {
        let mut ws = Worksheet::new("Data", 1);
        ws.hidden = true;
        ws.set_cell("A1", Cell::new("x"));
        ws.merge_cells("A1:B1");

        let stub = ws.stub();
        assert_eq!(stub.name, "Data");
        assert_eq!(stub.index, 1);
        assert!(stub.hidden);
        assert!(stub.cells.is_empty());
        assert!(stub.merged_cells.is_empty());
    }

    #[test]
    fn test_json_shape() {
        let mut ws = Worksheet::new("S", 0);
        ws.row_heights.insert(3, 22.5);
        let json = serde_json::to_value(&ws).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "S",
                "index": 0,
                "cells": {},
                "row_heights": {"3": 22.5},
                "hidden": false
            })
        );
    }
}
