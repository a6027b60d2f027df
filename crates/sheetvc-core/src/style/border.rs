//! Border style types

use serde::{Deserialize, Serialize};

/// Border settings for a cell
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Border {
    /// Left border
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<BorderLine>,
    /// Right border
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<BorderLine>,
    /// Top border
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<BorderLine>,
    /// Bottom border
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<BorderLine>,
}

impl Border {
    /// Same line on all four edges
    pub fn all(line: BorderLine) -> Self {
        Self {
            left: Some(line.clone()),
            right: Some(line.clone()),
            top: Some(line.clone()),
            bottom: Some(line),
        }
    }
}

/// One border edge
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BorderLine {
    /// Line style ("thin", "medium", "dashed", ...)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub style: String,
    /// Line color
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub color: String,
}

impl BorderLine {
    /// Create a border line
    pub fn new(style: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            style: style.into(),
            color: color.into(),
        }
    }
}
