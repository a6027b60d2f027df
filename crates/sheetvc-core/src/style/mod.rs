//! Cell styling types
//!
//! This module contains types for cell formatting:
//! - [`CellStyle`] - Complete cell style
//! - [`Font`] - Font settings
//! - [`Fill`] - Background fill
//! - [`Border`] - Cell borders
//! - [`Alignment`] - Text alignment
//!
//! Colors are kept as the engine reports them (`"#RRGGBB"` or theme names).
//! Each part is optional so a style carries only what was actually set.

mod alignment;
mod border;
mod fill;
mod font;

pub use alignment::Alignment;
pub use border::{Border, BorderLine};
pub use fill::Fill;
pub use font::Font;

use serde::{Deserialize, Serialize};

/// Complete cell style
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CellStyle {
    /// Font settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
    /// Fill/background settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<Fill>,
    /// Border settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border: Option<Border>,
    /// Number format code (e.g., "0.00%")
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub number_format: String,
    /// Text alignment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
}

impl CellStyle {
    /// Create a new empty style
    pub fn new() -> Self {
        Self::default()
    }

    /// Set font to bold
    pub fn bold(mut self) -> Self {
        self.font.get_or_insert_with(Font::default).bold = true;
        self
    }

    /// Set the number format code
    pub fn number_format<S: Into<String>>(mut self, code: S) -> Self {
        self.number_format = code.into();
        self
    }

    /// Set a solid background color
    pub fn fill_color<S: Into<String>>(mut self, color: S) -> Self {
        self.fill = Some(Fill::solid(color));
        self
    }

    /// Check if no part of the style is set
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let style = CellStyle::new().bold().number_format("0.00").fill_color("#FFFF00");
        assert!(style.font.as_ref().unwrap().bold);
        assert_eq!(style.fill.as_ref().unwrap().pattern, "solid");
        assert!(!style.is_empty());
        assert!(CellStyle::new().is_empty());
    }
}
