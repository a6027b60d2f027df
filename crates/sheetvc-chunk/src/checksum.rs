//! Source file fingerprints

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use sheetvc_core::DocumentMetadata;

use crate::error::{ChunkError, ChunkResult};

/// Lowercase hex SHA-256 of a file's bytes
pub fn source_checksum(path: &Path) -> ChunkResult<String> {
    let mut file = File::open(path).map_err(|e| ChunkError::io("checksum", path, e))?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher).map_err(|e| ChunkError::io("checksum", path, e))?;
    Ok(format!("{:x}", hasher.finalize()))
}

/// Facts about an original spreadsheet, captured when a workbook is built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceInfo {
    pub path: PathBuf,
    pub size: u64,
    pub modified: DateTime<Utc>,
    pub checksum: String,
}

impl SourceInfo {
    /// Stat and hash `path`
    pub fn from_path(path: &Path) -> ChunkResult<Self> {
        let meta = std::fs::metadata(path).map_err(|e| ChunkError::io("stat source", path, e))?;
        let modified = meta
            .modified()
            .map(DateTime::<Utc>::from)
            .map_err(|e| ChunkError::io("stat source", path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
            size: meta.len(),
            modified,
            checksum: source_checksum(path)?,
        })
    }

    /// Copy these facts into workbook metadata
    pub fn apply_to(&self, metadata: &mut DocumentMetadata) {
        metadata.original_file = self.path.display().to_string();
        metadata.file_size = self.size;
        metadata.modified = self.modified;
        metadata.checksum = self.checksum.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_checksum() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("book.xlsx");
        std::fs::write(&path, b"abc").unwrap();

        assert_eq!(
            source_checksum(&path).unwrap(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_source_info_fills_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("book.xlsx");
        std::fs::write(&path, b"abc").unwrap();

        let info = SourceInfo::from_path(&path).unwrap();
        let mut metadata = DocumentMetadata::default();
        info.apply_to(&mut metadata);
        assert_eq!(metadata.file_size, 3);
        assert_eq!(metadata.checksum, info.checksum);
        assert!(metadata.original_file.ends_with("book.xlsx"));
    }

    #[test]
    fn test_missing_source() {
        let err = source_checksum(Path::new("/definitely/not/here.xlsx")).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::FileSystem);
    }
}
