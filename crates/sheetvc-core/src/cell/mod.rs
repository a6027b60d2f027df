//! Cell-related types and utilities
//!
//! This module contains:
//! - [`Cell`] - A single cell as persisted in a sheet file
//! - [`CellValue`] - The closed value type stored in a cell
//! - [`CellType`] - The type tag resolved by the document builder
//! - [`CellAddress`] - A cell's location (e.g., "A1")
//! - [`CellRange`] - A range of cells (e.g., "A1:B10")

mod address;
mod value;

pub use address::{CellAddress, CellRange};
pub use value::{CellError, CellValue};

use serde::{Deserialize, Serialize};

use crate::comment::CellComment;
use crate::style::CellStyle;
use crate::validation::DataValidation;

/// Type tag of a cell
///
/// Resolved upstream while the workbook is built; the model never infers it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellType {
    /// Plain text
    #[default]
    String,
    /// Numeric value
    Number,
    /// TRUE/FALSE
    Boolean,
    /// Date stored as a serial number or ISO string
    Date,
    /// Error marker (#DIV/0!, #N/A, ...)
    Error,
    /// Regular formula
    Formula,
    /// Array (CSE or dynamic) formula
    ArrayFormula,
}

impl CellType {
    /// Get the tag as it appears in chunk files
    pub fn as_str(&self) -> &'static str {
        match self {
            CellType::String => "string",
            CellType::Number => "number",
            CellType::Boolean => "boolean",
            CellType::Date => "date",
            CellType::Error => "error",
            CellType::Formula => "formula",
            CellType::ArrayFormula => "array_formula",
        }
    }

    /// Check if this tag requires formula text on the cell
    pub fn is_formula(&self) -> bool {
        matches!(self, CellType::Formula | CellType::ArrayFormula)
    }

    /// Tag matching a plain value
    pub fn of_value(value: &CellValue) -> Self {
        match value {
            CellValue::String(_) => CellType::String,
            CellValue::Number(_) => CellType::Number,
            CellValue::Boolean(_) => CellType::Boolean,
            CellValue::Error(_) => CellType::Error,
        }
    }
}

impl std::fmt::Display for CellType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Array formula details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrayFormula {
    /// Formula text shared by the whole array
    pub formula: String,
    /// Range the array formula covers (e.g., "C1:C10")
    pub range: String,
    /// Entered with Ctrl+Shift+Enter (legacy array formula)
    #[serde(default)]
    pub is_cse: bool,
}

/// A single cell
///
/// `value` always holds the last computed result, also for formula cells.
/// When [`cell_type`](Self::cell_type) is a formula tag, `formula` is non-empty.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Cell {
    /// Last computed value
    pub value: CellValue,
    /// Formula text (empty if none)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub formula: String,
    /// Formula in R1C1 reference style
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula_r1c1: Option<String>,
    /// Array formula descriptor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub array_formula: Option<ArrayFormula>,
    /// Cell formatting
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<CellStyle>,
    /// Type tag
    #[serde(rename = "type", default)]
    pub cell_type: CellType,
    /// Comment (note)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<CellComment>,
    /// Hyperlink target
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hyperlink: Option<String>,
    /// Data validation rule
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_validation: Option<DataValidation>,
}

impl Cell {
    /// Create a plain value cell, tagging it from the value kind
    pub fn new<V: Into<CellValue>>(value: V) -> Self {
        let value = value.into();
        Self {
            cell_type: CellType::of_value(&value),
            value,
            ..Default::default()
        }
    }

    /// Create a formula cell with its cached result
    pub fn formula<S: Into<String>, V: Into<CellValue>>(formula: S, cached: V) -> Self {
        Self {
            value: cached.into(),
            formula: formula.into(),
            cell_type: CellType::Formula,
            ..Default::default()
        }
    }

    /// Create an array formula cell covering `range`
    pub fn array_formula<S: Into<String>, V: Into<CellValue>>(
        formula: S,
        range: impl Into<String>,
        cached: V,
    ) -> Self {
        let formula = formula.into();
        Self {
            value: cached.into(),
            array_formula: Some(ArrayFormula {
                formula: formula.clone(),
                range: range.into(),
                is_cse: true,
            }),
            formula,
            cell_type: CellType::ArrayFormula,
            ..Default::default()
        }
    }

    /// Override the type tag (e.g. to mark a number as a date)
    pub fn with_type(mut self, cell_type: CellType) -> Self {
        self.cell_type = cell_type;
        self
    }

    /// Attach a style
    pub fn with_style(mut self, style: CellStyle) -> Self {
        self.style = Some(style);
        self
    }

    /// Attach a comment
    pub fn with_comment(mut self, comment: CellComment) -> Self {
        self.comment = Some(comment);
        self
    }

    /// Attach a hyperlink
    pub fn with_hyperlink<S: Into<String>>(mut self, target: S) -> Self {
        self.hyperlink = Some(target.into());
        self
    }

    /// Attach a data validation rule
    pub fn with_validation(mut self, validation: DataValidation) -> Self {
        self.data_validation = Some(validation);
        self
    }

    /// Check if the cell carries formula text
    pub fn has_formula(&self) -> bool {
        !self.formula.is_empty()
    }

    /// Check the formula invariant: formula tags require formula text
    pub fn is_consistent(&self) -> bool {
        !self.cell_type.is_formula() || self.has_formula()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cell_constructors_tag_values() {
        assert_eq!(Cell::new("x").cell_type, CellType::String);
        assert_eq!(Cell::new(1.5).cell_type, CellType::Number);
        assert_eq!(Cell::new(true).cell_type, CellType::Boolean);
        assert_eq!(Cell::new(CellError::Div0).cell_type, CellType::Error);

        let f = Cell::formula("=A1+1", 2.0);
        assert_eq!(f.cell_type, CellType::Formula);
        assert_eq!(f.value, CellValue::Number(2.0));
        assert!(f.is_consistent());
    }

    #[test]
    fn test_formula_tag_without_text_is_inconsistent() {
        let cell = Cell::new(1.0).with_type(CellType::Formula);
        assert!(!cell.is_consistent());
    }

    #[test]
    fn test_cell_json_omits_absent_fields() {
        let json = serde_json::to_value(Cell::new(123.45)).unwrap();
        assert_eq!(json, serde_json::json!({"value": 123.45, "type": "number"}));
    }

    #[test]
    fn test_empty_style_is_not_absent_style() {
        let styled = Cell::new("x").with_style(CellStyle::default());
        let json = serde_json::to_string(&styled).unwrap();
        assert!(json.contains("\"style\":{}"));

        let back: Cell = serde_json::from_str(&json).unwrap();
        assert_eq!(back.style, Some(CellStyle::default()));

        let plain: Cell = serde_json::from_str(r#"{"value":"x","type":"string"}"#).unwrap();
        assert_eq!(plain.style, None);
    }

    #[test]
    fn test_array_formula_cell() {
        let cell = Cell::array_formula("{=SUM(A1:A3*B1:B3)}", "C1", 14.0);
        assert_eq!(cell.cell_type, CellType::ArrayFormula);
        assert_eq!(cell.array_formula.as_ref().unwrap().range, "C1");
        assert!(cell.is_consistent());
    }
}
