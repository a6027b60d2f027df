//! Diff result types

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sheetvc_core::CellValue;

/// Kind of change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Add,
    Modify,
    Delete,
}

impl ChangeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeType::Add => "add",
            ChangeType::Modify => "modify",
            ChangeType::Delete => "delete",
        }
    }

    /// The change seen from the other side
    pub fn inverse(&self) -> Self {
        match self {
            ChangeType::Add => ChangeType::Delete,
            ChangeType::Modify => ChangeType::Modify,
            ChangeType::Delete => ChangeType::Add,
        }
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comparison of two workbooks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diff {
    pub timestamp: DateTime<Utc>,
    pub summary: DiffSummary,
    pub sheet_diffs: Vec<SheetDiff>,
}

impl Diff {
    /// Build a diff and aggregate its summary from the sheet entries
    pub fn new(sheet_diffs: Vec<SheetDiff>) -> Self {
        Self {
            timestamp: Utc::now(),
            summary: DiffSummary::aggregate(&sheet_diffs),
            sheet_diffs,
        }
    }

    /// Check if anything changed
    pub fn has_changes(&self) -> bool {
        !self.sheet_diffs.is_empty()
    }

    /// Look up the entry for a sheet
    pub fn sheet(&self, name: &str) -> Option<&SheetDiff> {
        self.sheet_diffs.iter().find(|sd| sd.sheet_name == name)
    }

    /// Recompute the summary after `sheet_diffs` was edited
    pub fn refresh_summary(&mut self) {
        self.summary = DiffSummary::aggregate(&self.sheet_diffs);
    }
}

impl fmt::Display for Diff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.summary.fmt(f)
    }
}

/// Change counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DiffSummary {
    /// Sheets added, modified or deleted
    pub total_changes: usize,
    pub added_sheets: usize,
    pub modified_sheets: usize,
    pub deleted_sheets: usize,
    /// Cell entries across all sheets
    pub cell_changes: usize,
}

impl DiffSummary {
    /// Count sheet and cell changes
    ///
    /// A sheet with an add or delete action counts only as added or deleted; its
    /// synthesized cell entries count as cell changes.
    pub fn aggregate(sheet_diffs: &[SheetDiff]) -> Self {
        let mut summary = Self::default();
        for sheet_diff in sheet_diffs {
            match sheet_diff.action {
                Some(ChangeType::Add) => summary.added_sheets += 1,
                Some(ChangeType::Delete) => summary.deleted_sheets += 1,
                Some(ChangeType::Modify) | None => summary.modified_sheets += 1,
            }
            summary.cell_changes += sheet_diff.changes.len();
        }
        summary.total_changes =
            summary.added_sheets + summary.modified_sheets + summary.deleted_sheets;
        summary
    }
}

impl fmt::Display for DiffSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.added_sheets > 0 {
            parts.push(format!("{} sheet(s) added", self.added_sheets));
        }
        if self.modified_sheets > 0 {
            parts.push(format!("{} sheet(s) modified", self.modified_sheets));
        }
        if self.deleted_sheets > 0 {
            parts.push(format!("{} sheet(s) deleted", self.deleted_sheets));
        }
        if self.cell_changes > 0 {
            parts.push(format!("{} cell(s) changed", self.cell_changes));
        }

        if parts.is_empty() {
            f.write_str("No changes detected")
        } else {
            f.write_str(&parts.join(", "))
        }
    }
}

/// Changes within one sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetDiff {
    pub sheet_name: String,
    /// Sheet-level action; absent when only cells changed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<ChangeType>,
    /// Cell changes sorted by reference
    pub changes: Vec<CellChange>,
}

/// One changed cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellChange {
    /// Cell reference (e.g. "B2")
    pub cell: String,
    #[serde(rename = "type")]
    pub change_type: ChangeType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_value: Option<CellValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_value: Option<CellValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_formula: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_formula: Option<String>,
    /// Human-readable summary of what changed
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}
