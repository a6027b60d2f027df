//! Conditional formatting
//!
//! A conditional format applies a style to a range when a rule matches. Rule
//! values keep their typed form ([`CellValue`]) so `10` and `"10"` stay distinct.

use serde::{Deserialize, Serialize};

use crate::cell::CellValue;
use crate::style::CellStyle;

/// A conditional formatting rule
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConditionalFormat {
    /// Range the rule applies to (e.g., "A1:A10")
    pub range: String,
    /// Rule type ("cell", "expression", "colorScale", "dataBar", ...)
    #[serde(rename = "type")]
    pub rule_type: String,
    /// Comparison criteria (">", "between", ...)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub criteria: String,
    /// Comparison value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<CellValue>,
    /// Lower bound (between rules, scales)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<CellValue>,
    /// Upper bound (between rules, scales)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<CellValue>,
    /// Format applied when the rule matches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<CellStyle>,
}

impl ConditionalFormat {
    /// Highlight cells in `range` whose value is greater than `value`
    pub fn greater_than(range: impl Into<String>, value: impl Into<CellValue>) -> Self {
        Self {
            range: range.into(),
            rule_type: "cell".into(),
            criteria: ">".into(),
            value: Some(value.into()),
            ..Default::default()
        }
    }

    /// Set the format applied on match
    pub fn with_format(mut self, format: CellStyle) -> Self {
        self.format = Some(format);
        self
    }
}
