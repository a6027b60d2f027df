//! Chart objects
//!
//! Charts are carried as descriptive metadata (type, anchor, series references) so
//! that edits to them show up in chunk files. They are never rendered.

use serde::{Deserialize, Serialize};

/// A chart anchored on a sheet
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Chart {
    /// Identifier unique within the sheet
    pub id: String,
    /// Chart type ("bar", "line", "pie", "scatter", ...)
    #[serde(rename = "type")]
    pub chart_type: String,
    /// Chart title
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    /// Position anchor
    pub position: ChartPosition,
    /// Data series
    #[serde(default)]
    pub series: Vec<ChartSeries>,
    /// Legend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legend: Option<ChartLegend>,
    /// Axes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub axes: Option<ChartAxes>,
    /// Visual style
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<ChartStyle>,
}

/// Chart placement in points
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartPosition {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A data series
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChartSeries {
    /// Series name
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Category range (e.g., "Sheet1!A1:A10")
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub categories: String,
    /// Value range (e.g., "Sheet1!B1:B10")
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub values: String,
    /// Series color
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub color: String,
}

/// Chart legend
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChartLegend {
    /// "top", "bottom", "left", "right" or "none"
    pub position: String,
    pub show: bool,
}

/// Chart axes
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartAxes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_axis: Option<ChartAxis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_axis: Option<ChartAxis>,
}

/// A single axis
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartAxis {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major_unit: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minor_unit: Option<f64>,
}

/// Chart visual style
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChartStyle {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub color_scheme: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub plot_area: String,
}
