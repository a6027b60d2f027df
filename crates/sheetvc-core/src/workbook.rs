//! Workbook type - the root document structure

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::worksheet::Worksheet;

/// Format version written into workbooks and chunk files
pub const FORMAT_VERSION: &str = "1.0";

/// A workbook (spreadsheet document)
///
/// Sheet order is significant. [`push_sheet`](Self::push_sheet) keeps each sheet's
/// `index` in step with its position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workbook {
    /// Format version
    pub version: String,
    /// Source file metadata
    pub metadata: DocumentMetadata,
    /// Sheets in workbook order
    #[serde(default)]
    pub sheets: Vec<Worksheet>,
    /// Defined names mapped to their formula reference
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub defined_names: BTreeMap<String, String>,
    /// Document properties
    #[serde(default)]
    pub properties: DocumentProperties,
}

impl Default for Workbook {
    fn default() -> Self {
        Self::new()
    }
}

impl Workbook {
    /// Create an empty workbook with no sheets
    pub fn new() -> Self {
        Self {
            version: FORMAT_VERSION.to_string(),
            metadata: DocumentMetadata::default(),
            sheets: Vec::new(),
            defined_names: BTreeMap::new(),
            properties: DocumentProperties::default(),
        }
    }

    /// Number of sheets
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Check if the workbook has no sheets
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Append a sheet, setting its index to its position
    pub fn push_sheet(&mut self, mut sheet: Worksheet) -> usize {
        let index = self.sheets.len();
        sheet.index = index;
        self.sheets.push(sheet);
        index
    }

    /// Get a sheet by position
    pub fn sheet(&self, index: usize) -> Option<&Worksheet> {
        self.sheets.get(index)
    }

    /// Get a sheet by name
    pub fn sheet_by_name(&self, name: &str) -> Option<&Worksheet> {
        self.sheets.iter().find(|ws| ws.name == name)
    }

    /// Get a mutable sheet by name
    pub fn sheet_by_name_mut(&mut self, name: &str) -> Option<&mut Worksheet> {
        self.sheets.iter_mut().find(|ws| ws.name == name)
    }

    /// Sheet names in workbook order
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|ws| ws.name.as_str()).collect()
    }

    /// Copy of this workbook whose sheets carry only name, index and visibility
    pub fn table_of_contents(&self) -> Self {
        Self {
            version: self.version.clone(),
            metadata: self.metadata.clone(),
            sheets: self.sheets.iter().map(Worksheet::stub).collect(),
            defined_names: self.defined_names.clone(),
            properties: self.properties.clone(),
        }
    }
}

/// Metadata about the source file the workbook was built from
///
/// `checksum` is computed once from the original container and never from a
/// decoded form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    #[serde(default)]
    pub app_version: String,
    /// Path of the original spreadsheet
    #[serde(default)]
    pub original_file: String,
    /// Size of the original spreadsheet in bytes
    #[serde(default)]
    pub file_size: u64,
    /// SHA-256 of the original spreadsheet, lowercase hex
    #[serde(default)]
    pub checksum: String,
}

impl Default for DocumentMetadata {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            created: now,
            modified: now,
            app_version: String::new(),
            original_file: String::new(),
            file_size: 0,
            checksum: String::new(),
        }
    }
}

/// Document properties (title, author, ...)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DocumentProperties {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub subject: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub author: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub company: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub keywords: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}
