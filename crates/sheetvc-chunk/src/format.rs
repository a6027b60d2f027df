//! On-disk chunk file shapes and JSON file helpers

use std::borrow::Cow;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sheetvc_core::Worksheet;

use crate::error::{ChunkError, ChunkResult};

/// Listing of the files that make up a chunk set
///
/// Written last, so a chunk directory without a manifest is incomplete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Format version
    pub version: String,
    /// Name of the strategy that wrote the set
    pub strategy: String,
    /// Index file name
    pub main_file: String,
    /// Every file in the set, relative to the chunk directory (index file first)
    pub chunk_files: Vec<String>,
    /// Number of sheets in the workbook
    pub total_sheets: usize,
    /// Workbook creation time
    pub created: DateTime<Utc>,
}

/// One sheet file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetChunk<'a> {
    /// Format version
    pub version: Cow<'a, str>,
    /// Checksum of the source workbook, matched against the index file on read
    #[serde(default)]
    pub workbook_checksum: Cow<'a, str>,
    /// The full sheet
    pub sheet: Cow<'a, Worksheet>,
}

impl<'a> SheetChunk<'a> {
    /// Borrowing chunk used on the write path
    pub fn borrowed(version: &'a str, workbook_checksum: &'a str, sheet: &'a Worksheet) -> Self {
        Self {
            version: Cow::Borrowed(version),
            workbook_checksum: Cow::Borrowed(workbook_checksum),
            sheet: Cow::Borrowed(sheet),
        }
    }

    /// Take the sheet out of the chunk
    pub fn into_sheet(self) -> Worksheet {
        self.sheet.into_owned()
    }
}

/// Serialize `value` to `path` (mode 0600 on unix), indented unless `compact`
pub(crate) fn write_json<T: Serialize>(
    operation: &'static str,
    path: &Path,
    value: &T,
    compact: bool,
) -> ChunkResult<()> {
    let encoded = if compact {
        serde_json::to_vec(value)
    } else {
        serde_json::to_vec_pretty(value)
    }
    .map_err(|source| ChunkError::Encode {
        path: path.to_path_buf(),
        source,
    })?;

    let mut file = open_for_write(path).map_err(|e| ChunkError::io(operation, path, e))?;
    file.write_all(&encoded)
        .map_err(|e| ChunkError::io(operation, path, e))
}

#[cfg(unix)]
fn open_for_write(path: &Path) -> io::Result<fs::File> {
    use std::os::unix::fs::OpenOptionsExt;
    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn open_for_write(path: &Path) -> io::Result<fs::File> {
    fs::File::create(path)
}

/// Create `dir` and its parents (mode 0755 on unix)
pub(crate) fn create_dir_all(dir: &Path) -> io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }
    builder.create(dir)
}

/// Decode a JSON document from raw bytes
pub(crate) fn decode<T: DeserializeOwned>(bytes: &[u8]) -> serde_json::Result<T> {
    serde_json::from_slice(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetvc_core::Cell;

    #[test]
    fn test_sheet_chunk_shape() {
        let mut sheet = Worksheet::new("Data", 0);
        sheet.set_cell("A1", Cell::new(1));
        let chunk = SheetChunk::borrowed("1.0", "abc", &sheet);

        let json = serde_json::to_value(&chunk).unwrap();
        assert_eq!(json["version"], "1.0");
        assert_eq!(json["workbook_checksum"], "abc");
        assert_eq!(json["sheet"]["name"], "Data");

        let back: SheetChunk<'static> = decode(json.to_string().as_bytes()).unwrap();
        assert_eq!(back.into_sheet(), sheet);
    }

    #[test]
    fn test_write_json_compact_and_indented() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x.json");
        let value = serde_json::json!({"a": [1, 2]});

        write_json("test", &path, &value, true).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), r#"{"a":[1,2]}"#);

        write_json("test", &path, &value, false).unwrap();
        assert!(fs::read_to_string(&path).unwrap().contains("\n  \"a\""));
    }

    #[cfg(unix)]
    #[test]
    fn test_file_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p.json");
        write_json("test", &path, &1, true).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
