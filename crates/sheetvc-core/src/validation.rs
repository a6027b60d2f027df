//! Data validation
//!
//! A data validation rule restricts what can be entered in a cell. The model keeps
//! the rule as the spreadsheet engine reported it; nothing here evaluates it.
//!
//! ## Example
//!
//! ```rust
//! use sheetvc_core::DataValidation;
//!
//! let validation = DataValidation::list("\"Yes,No,Maybe\"")
//!     .with_error_message("Invalid value", "Please select from the list");
//! assert_eq!(validation.validation_type, "list");
//! ```

use serde::{Deserialize, Serialize};

use crate::is_false;

/// Data validation rule for a cell
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DataValidation {
    /// Type of validation ("list", "whole", "decimal", "date", "textLength", "custom", ...)
    #[serde(rename = "type")]
    pub validation_type: String,
    /// Comparison operator ("between", "greaterThan", ...)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub operator: String,
    /// First formula/value
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub formula1: String,
    /// Second formula/value (for between/notBetween)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub formula2: String,
    /// Allow blank/empty cells
    #[serde(default, skip_serializing_if = "is_false")]
    pub allow_blank: bool,

    // Input message (shown when cell is selected)
    /// Show input message when cell is selected
    #[serde(default, skip_serializing_if = "is_false")]
    pub show_input_message: bool,
    /// Input message title
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub prompt_title: String,
    /// Input message text
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub prompt: String,

    // Error alert (shown when invalid data entered)
    /// Show error alert when invalid data entered
    #[serde(default, skip_serializing_if = "is_false")]
    pub show_error_message: bool,
    /// Error alert title
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub error_title: String,
    /// Error alert message
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub error: String,
}

impl DataValidation {
    /// Create a dropdown list validation
    pub fn list(source: impl Into<String>) -> Self {
        Self {
            validation_type: "list".into(),
            formula1: source.into(),
            allow_blank: true,
            ..Default::default()
        }
    }

    /// Create a whole-number validation between two bounds
    pub fn whole_between(min: impl Into<String>, max: impl Into<String>) -> Self {
        Self {
            validation_type: "whole".into(),
            operator: "between".into(),
            formula1: min.into(),
            formula2: max.into(),
            ..Default::default()
        }
    }

    /// Set the error alert shown on invalid input
    pub fn with_error_message(mut self, title: impl Into<String>, message: impl Into<String>) -> Self {
        self.show_error_message = true;
        self.error_title = title.into();
        self.error = message.into();
        self
    }

    /// Set the input prompt shown when the cell is selected
    pub fn with_prompt(mut self, title: impl Into<String>, message: impl Into<String>) -> Self {
        self.show_input_message = true;
        self.prompt_title = title.into();
        self.prompt = message.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_between() {
        let v = DataValidation::whole_between("1", "10").with_prompt("Range", "1 to 10");
        assert_eq!(v.operator, "between");
        assert_eq!(v.formula2, "10");
        assert!(v.show_input_message);
        assert!(!v.show_error_message);
    }

    #[test]
    fn test_json_is_sparse() {
        let json = serde_json::to_value(DataValidation::list("A1:A5")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "list", "formula1": "A1:A5", "allow_blank": true})
        );
    }
}
