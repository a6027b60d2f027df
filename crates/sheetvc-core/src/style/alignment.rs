//! Alignment types

use serde::{Deserialize, Serialize};

use crate::is_false;

/// Text alignment within a cell
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Alignment {
    /// Horizontal alignment ("left", "center", "right", ...)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub horizontal: String,
    /// Vertical alignment ("top", "center", "bottom", ...)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub vertical: String,
    /// Wrap text
    #[serde(default, skip_serializing_if = "is_false")]
    pub wrap_text: bool,
    /// Text rotation in degrees
    #[serde(default, skip_serializing_if = "is_zero")]
    pub text_rotation: i32,
}

fn is_zero(v: &i32) -> bool {
    *v == 0
}
