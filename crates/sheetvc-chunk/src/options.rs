//! Chunk write options

/// Options for writing chunk sets
///
/// Options change only how dense the JSON is. The directory layout and the set of
/// files are the same for every option value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChunkOptions {
    /// Write index and sheet files without indentation (the manifest is always indented)
    pub compact_json: bool,
}

impl ChunkOptions {
    /// Compact output
    pub fn compact() -> Self {
        Self { compact_json: true }
    }
}
