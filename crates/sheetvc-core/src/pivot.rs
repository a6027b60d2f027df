//! Pivot table structure
//!
//! Only the layout of a pivot table (source, target, fields) is modelled; the
//! pivot cache and computed values are left to the spreadsheet engine.

use serde::{Deserialize, Serialize};

/// A pivot table
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PivotTable {
    pub id: String,
    pub name: String,
    /// Source range (e.g., "Sheet1!A1:D100")
    pub source_range: String,
    /// Where the pivot table is placed
    pub target_range: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub row_fields: Vec<PivotField>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub column_fields: Vec<PivotField>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data_fields: Vec<PivotDataField>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filter_fields: Vec<PivotField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<PivotTableSettings>,
}

/// A row, column or filter field
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PivotField {
    pub name: String,
    pub position: u32,
    #[serde(default)]
    pub subtotal: bool,
}

/// An aggregated value field
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PivotDataField {
    pub name: String,
    /// Aggregation ("SUM", "COUNT", "AVERAGE", ...)
    pub function: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub display_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub number_format: String,
}

/// Layout switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PivotTableSettings {
    pub show_grand_totals: bool,
    pub show_row_headers: bool,
    pub show_column_headers: bool,
    pub compact_form: bool,
    pub outline_form: bool,
    pub tabular_form: bool,
}
