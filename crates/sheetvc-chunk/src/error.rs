//! Chunk codec error types

use std::path::PathBuf;

use thiserror::Error;

/// Result type for chunk operations
pub type ChunkResult<T> = std::result::Result<T, ChunkError>;

/// Errors that can occur while writing, reading or locating chunk sets
#[derive(Debug, Error)]
pub enum ChunkError {
    /// No chunk directory exists for the requested path
    #[error(
        "no chunk files found for '{}' (looked in {}); this file was expected to be chunked, \
         re-run the conversion to create them",
        path.display(),
        chunk_dir.display()
    )]
    NotChunked { path: PathBuf, chunk_dir: PathBuf },

    /// The chunk directory exists but has no manifest
    #[error(
        "{operation}: chunk set at {} is incomplete (no manifest); re-run the conversion",
        chunk_dir.display()
    )]
    IncompleteChunkSet {
        operation: &'static str,
        chunk_dir: PathBuf,
    },

    /// The manifest exists but cannot be parsed
    #[error("{operation}: failed to parse manifest {}: {source}", path.display())]
    CorruptManifest {
        operation: &'static str,
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The index file is missing or unreadable
    #[error("{operation}: failed to read index file {}: {source}", path.display())]
    MissingIndex {
        operation: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },

    /// The index file cannot be parsed
    #[error("{operation}: failed to parse index file {}: {source}", path.display())]
    CorruptIndex {
        operation: &'static str,
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Filesystem failure
    #[error("{operation}: {}: {source}", path.display())]
    Io {
        operation: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },

    /// JSON encoding failure
    #[error("failed to encode {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Two sheets map to the same sheet file
    #[error("sheets '{first}' and '{second}' both map to file name '{file_name}'; rename one of them")]
    FileNameCollision {
        file_name: String,
        first: String,
        second: String,
    },

    /// A number JSON cannot represent (NaN or an infinity)
    #[error("sheet '{sheet}': {location} is not a finite number")]
    NonFiniteNumber { sheet: String, location: String },

    /// The base path has no file name component
    #[error("invalid base path '{}': no file name", .0.display())]
    InvalidBasePath(PathBuf),

    /// Unknown chunking strategy name
    #[error("unknown chunking strategy '{0}' (expected 'sheet-based' or 'hybrid')")]
    UnknownStrategy(String),

    /// Strategy exists but is gated behind experimental features
    #[error("chunking strategy '{0}' is experimental; set features.enable_experimental_features to use it")]
    StrategyNotEnabled(String),

    /// Strategy operation is a placeholder
    #[error("{operation}: {strategy} chunking is not implemented yet")]
    NotImplemented {
        strategy: &'static str,
        operation: &'static str,
    },

    /// Configuration could not be parsed
    #[error("invalid configuration in {origin}: {source}")]
    Config {
        origin: String,
        source: serde_yaml::Error,
    },

    /// Core model error
    #[error("Core error: {0}")]
    Core(#[from] sheetvc_core::Error),
}

/// Coarse classification of a [`ChunkError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Nothing was ever converted for this path
    NotChunked,
    /// A chunk set exists but is unusable
    Corrupted,
    /// Malformed input
    Validation,
    /// Permission or I/O failure
    FileSystem,
    /// Operation not supported by the selected strategy
    Unsupported,
    /// Bad configuration
    Config,
}

impl ChunkError {
    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ChunkError::NotChunked { .. } => ErrorKind::NotChunked,
            ChunkError::IncompleteChunkSet { .. }
            | ChunkError::CorruptManifest { .. }
            | ChunkError::MissingIndex { .. }
            | ChunkError::CorruptIndex { .. } => ErrorKind::Corrupted,
            ChunkError::FileNameCollision { .. }
            | ChunkError::NonFiniteNumber { .. }
            | ChunkError::InvalidBasePath(_)
            | ChunkError::Core(_) => ErrorKind::Validation,
            ChunkError::Io { .. } | ChunkError::Encode { .. } => ErrorKind::FileSystem,
            ChunkError::NotImplemented { .. } => ErrorKind::Unsupported,
            ChunkError::UnknownStrategy(_)
            | ChunkError::StrategyNotEnabled(_)
            | ChunkError::Config { .. } => ErrorKind::Config,
        }
    }

    pub(crate) fn io(operation: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ChunkError::Io {
            operation,
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_chunked_message_suggests_conversion() {
        let err = ChunkError::NotChunked {
            path: PathBuf::from("book.xlsx"),
            chunk_dir: PathBuf::from("/repo/.sheetvc/data/book_chunks"),
        };
        let msg = err.to_string();
        assert!(msg.contains("expected to be chunked"));
        assert!(msg.contains("re-run the conversion"));
        assert_eq!(err.kind(), ErrorKind::NotChunked);
    }

    #[test]
    fn test_kinds() {
        let incomplete = ChunkError::IncompleteChunkSet {
            operation: "chunk_paths",
            chunk_dir: PathBuf::from("x"),
        };
        assert_eq!(incomplete.kind(), ErrorKind::Corrupted);

        let core: ChunkError = sheetvc_core::Error::InvalidAddress("1A".into()).into();
        assert_eq!(core.kind(), ErrorKind::Validation);

        let hybrid = ChunkError::NotImplemented {
            strategy: "hybrid",
            operation: "write_chunks",
        };
        assert_eq!(hybrid.kind(), ErrorKind::Unsupported);
        assert_eq!(hybrid.to_string(), "write_chunks: hybrid chunking is not implemented yet");
    }
}
