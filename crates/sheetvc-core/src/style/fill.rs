//! Fill style types

use serde::{Deserialize, Serialize};

/// Cell background fill
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Fill {
    /// Fill kind ("pattern", "gradient")
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub fill_type: String,
    /// Pattern name ("solid", "gray125", ...)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub pattern: String,
    /// Foreground color
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub color: String,
    /// Background color
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub bg_color: String,
}

impl Fill {
    /// Create a solid pattern fill
    pub fn solid<S: Into<String>>(color: S) -> Self {
        Self {
            fill_type: "pattern".into(),
            pattern: "solid".into(),
            color: color.into(),
            bg_color: String::new(),
        }
    }
}
