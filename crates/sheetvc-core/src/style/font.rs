//! Font style types

use serde::{Deserialize, Serialize};

use crate::is_false;

/// Font settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Font {
    /// Font family name (e.g., "Calibri", "Arial")
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Font size in points (0 = not set)
    #[serde(default, skip_serializing_if = "is_zero")]
    pub size: f64,
    /// Bold
    #[serde(default, skip_serializing_if = "is_false")]
    pub bold: bool,
    /// Italic
    #[serde(default, skip_serializing_if = "is_false")]
    pub italic: bool,
    /// Underline style ("single", "double", ...)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub underline: String,
    /// Font color
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub color: String,
}

impl Font {
    /// Create a font with a family and size
    pub fn new<S: Into<String>>(name: S, size: f64) -> Self {
        Self {
            name: name.into(),
            size,
            ..Default::default()
        }
    }
}

fn is_zero(v: &f64) -> bool {
    *v == 0.0
}
