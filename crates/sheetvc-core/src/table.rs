//! Structured tables and auto filters

use serde::{Deserialize, Serialize};

use crate::is_false;

/// A structured table (ListObject)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    /// Range covered by the table, header row included
    pub range: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub style_name: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub show_header_row: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub show_totals_row: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<String>,
}

/// Sheet-level auto filter
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AutoFilter {
    pub range: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<FilterColumn>,
}

/// Filter criteria on one column of an auto filter
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterColumn {
    /// Column offset within the filter range
    pub column: u32,
    /// Filter expression as reported by the engine
    pub expression: String,
}
