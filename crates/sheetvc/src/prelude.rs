//! Prelude module - common imports for sheetvc users
//!
//! ```rust
//! use sheetvc::prelude::*;
//! ```

pub use crate::{
    // Cell types
    Cell,
    CellAddress,
    CellComment,
    CellError,
    CellRange,
    CellStyle,
    CellType,
    CellValue,

    // Chunk storage
    ChunkError,
    ChunkOptions,
    ChunkRead,
    ChunkingStrategy,
    Config,
    SheetBasedChunking,

    // Diffs
    ChangeType,
    Diff,
    DiffOptions,

    // Main types
    Workbook,
    // Extension traits
    WorkbookExt,
    Worksheet,
};
