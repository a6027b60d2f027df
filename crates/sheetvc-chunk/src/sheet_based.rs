//! One file per sheet

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use ahash::AHashMap;
use sheetvc_core::{CellValue, Workbook, FORMAT_VERSION};
use tracing::{debug, info, warn};

use crate::error::{ChunkError, ChunkResult};
use crate::format::{self, Manifest, SheetChunk};
use crate::layout::{sheet_file_name, ChunkLayout, INDEX_FILE_NAME, MANIFEST_FILE_NAME};
use crate::options::ChunkOptions;
use crate::strategy::{ChunkRead, ChunkWarning, ChunkWarningKind, ChunkingStrategy};

/// Writes an index file plus one JSON file per sheet
///
/// Write order is index, sheets, manifest. A reader trusts nothing in a chunk
/// directory until the manifest is present.
#[derive(Debug, Clone, Default)]
pub struct SheetBasedChunking {
    layout: ChunkLayout,
}

impl SheetBasedChunking {
    /// Strategy name in configuration and manifests
    pub const NAME: &'static str = "sheet-based";

    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom layout (e.g. one sharing a repository-root cache)
    pub fn with_layout(layout: ChunkLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &ChunkLayout {
        &self.layout
    }

    /// Load only the manifest and index file
    ///
    /// The returned workbook carries stub sheets: name, index and visibility,
    /// no cells.
    pub fn read_index(&self, base_path: &Path) -> ChunkResult<Workbook> {
        let chunk_dir = self.layout.resolve(base_path)?;
        self.load_manifest("read_index", base_path, &chunk_dir)?;
        load_index("read_index", &chunk_dir)
    }

    fn load_manifest(
        &self,
        operation: &'static str,
        base_path: &Path,
        chunk_dir: &Path,
    ) -> ChunkResult<Manifest> {
        let path = chunk_dir.join(MANIFEST_FILE_NAME);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(if chunk_dir.is_dir() {
                    ChunkError::IncompleteChunkSet {
                        operation,
                        chunk_dir: chunk_dir.to_path_buf(),
                    }
                } else {
                    ChunkError::NotChunked {
                        path: base_path.to_path_buf(),
                        chunk_dir: chunk_dir.to_path_buf(),
                    }
                });
            }
            Err(e) => return Err(ChunkError::io(operation, path, e)),
        };
        format::decode(&bytes).map_err(|source| ChunkError::CorruptManifest {
            operation,
            path,
            source,
        })
    }
}

fn load_index(operation: &'static str, chunk_dir: &Path) -> ChunkResult<Workbook> {
    let path = chunk_dir.join(INDEX_FILE_NAME);
    let bytes = fs::read(&path).map_err(|source| ChunkError::MissingIndex {
        operation,
        path: path.clone(),
        source,
    })?;
    format::decode(&bytes).map_err(|source| ChunkError::CorruptIndex {
        operation,
        path,
        source,
    })
}

/// Sheet file names in workbook order, rejecting names that sanitize alike
fn sheet_file_names(workbook: &Workbook) -> ChunkResult<Vec<String>> {
    let mut owners: AHashMap<String, &str> = AHashMap::with_capacity(workbook.sheet_count());
    let mut names = Vec::with_capacity(workbook.sheet_count());
    for sheet in &workbook.sheets {
        let file_name = sheet_file_name(&sheet.name);
        if let Some(first) = owners.insert(file_name.clone(), &sheet.name) {
            return Err(ChunkError::FileNameCollision {
                file_name,
                first: first.to_string(),
                second: sheet.name.clone(),
            });
        }
        names.push(file_name);
    }
    Ok(names)
}

/// JSON has no encoding for NaN or infinities
fn check_finite_numbers(workbook: &Workbook) -> ChunkResult<()> {
    for sheet in &workbook.sheets {
        let non_finite = |location: String| ChunkError::NonFiniteNumber {
            sheet: sheet.name.clone(),
            location,
        };
        for (reference, cell) in sheet.cells() {
            if let CellValue::Number(n) = cell.value {
                if !n.is_finite() {
                    return Err(non_finite(format!("cell {}", reference)));
                }
            }
        }
        if let Some((row, _)) = sheet.row_heights.iter().find(|(_, h)| !h.is_finite()) {
            return Err(non_finite(format!("height of row {}", row)));
        }
        if let Some((col, _)) = sheet.column_widths.iter().find(|(_, w)| !w.is_finite()) {
            return Err(non_finite(format!("width of column {}", col)));
        }
    }
    Ok(())
}

/// A manifest entry must be a plain file name inside the chunk directory
fn is_plain_file_name(entry: &str) -> bool {
    let mut components = Path::new(entry).components();
    matches!(components.next(), Some(Component::Normal(_))) && components.next().is_none()
}

impl ChunkingStrategy for SheetBasedChunking {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn write_chunks(
        &self,
        workbook: &Workbook,
        base_path: &Path,
        options: &ChunkOptions,
    ) -> ChunkResult<Vec<PathBuf>> {
        const OP: &str = "write_chunks";

        let file_names = sheet_file_names(workbook)?;
        check_finite_numbers(workbook)?;
        let chunk_dir = self.layout.chunk_dir(base_path)?;
        format::create_dir_all(&chunk_dir).map_err(|e| ChunkError::io(OP, &chunk_dir, e))?;

        // Drop the old manifest first so an interrupted rewrite reads as incomplete
        let manifest_path = chunk_dir.join(MANIFEST_FILE_NAME);
        match fs::remove_file(&manifest_path) {
            Ok(()) => debug!(path = %manifest_path.display(), "removed previous manifest"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(ChunkError::io(OP, manifest_path, e)),
        }

        let mut written = Vec::with_capacity(workbook.sheet_count() + 1);

        let index_path = chunk_dir.join(INDEX_FILE_NAME);
        format::write_json(OP, &index_path, &workbook.table_of_contents(), options.compact_json)?;
        written.push(index_path);

        for (sheet, file_name) in workbook.sheets.iter().zip(&file_names) {
            let path = chunk_dir.join(file_name);
            let chunk = SheetChunk::borrowed(&workbook.version, &workbook.metadata.checksum, sheet);
            format::write_json(OP, &path, &chunk, options.compact_json)?;
            debug!(
                sheet = %sheet.name,
                cells = sheet.cell_count(),
                path = %path.display(),
                "wrote sheet chunk"
            );
            written.push(path);
        }

        let mut chunk_files = Vec::with_capacity(file_names.len() + 1);
        chunk_files.push(INDEX_FILE_NAME.to_string());
        chunk_files.extend(file_names);

        let manifest = Manifest {
            version: FORMAT_VERSION.to_string(),
            strategy: Self::NAME.to_string(),
            main_file: INDEX_FILE_NAME.to_string(),
            chunk_files,
            total_sheets: workbook.sheet_count(),
            created: workbook.metadata.created,
        };
        format::write_json(OP, &manifest_path, &manifest, false)?;

        info!(
            files = written.len(),
            dir = %chunk_dir.display(),
            "wrote chunk set"
        );
        Ok(written)
    }

    fn read_chunks(&self, base_path: &Path) -> ChunkResult<ChunkRead> {
        const OP: &str = "read_chunks";

        let chunk_dir = self.layout.resolve(base_path)?;
        let manifest = self.load_manifest(OP, base_path, &chunk_dir)?;
        let mut workbook = load_index(OP, &chunk_dir)?;
        workbook.sheets.clear();

        let mut warnings = Vec::new();
        let mut warn_about = |file: PathBuf, kind: ChunkWarningKind, message: String| {
            warn!(path = %file.display(), ?kind, "{}", message);
            warnings.push(ChunkWarning { file, kind, message });
        };

        for entry in &manifest.chunk_files {
            if entry == INDEX_FILE_NAME || *entry == manifest.main_file {
                continue;
            }
            let path = chunk_dir.join(entry);
            if !is_plain_file_name(entry) {
                warn_about(
                    path,
                    ChunkWarningKind::OutsideChunkDir,
                    format!("manifest entry '{}' is not a file in the chunk directory", entry),
                );
                continue;
            }

            let bytes = match fs::read(&path) {
                Ok(bytes) => bytes,
                Err(e) => {
                    warn_about(path, ChunkWarningKind::Unreadable, format!("failed to read sheet file: {}", e));
                    continue;
                }
            };
            let chunk: SheetChunk<'static> = match format::decode(&bytes) {
                Ok(chunk) => chunk,
                Err(e) => {
                    warn_about(path, ChunkWarningKind::Unparsable, format!("failed to parse sheet file: {}", e));
                    continue;
                }
            };

            if chunk.workbook_checksum != workbook.metadata.checksum {
                warn_about(
                    path.clone(),
                    ChunkWarningKind::ChecksumMismatch,
                    format!(
                        "sheet '{}' was written for workbook checksum '{}', index has '{}'",
                        chunk.sheet.name, chunk.workbook_checksum, workbook.metadata.checksum
                    ),
                );
            }

            let sheet = chunk.into_sheet();
            debug!(sheet = %sheet.name, cells = sheet.cell_count(), "loaded sheet chunk");
            workbook.sheets.push(sheet);
        }

        info!(
            sheets = workbook.sheet_count(),
            skipped = warnings
                .iter()
                .filter(|w| w.kind != ChunkWarningKind::ChecksumMismatch)
                .count(),
            "read chunk set"
        );
        Ok(ChunkRead { workbook, warnings })
    }

    fn chunk_paths(&self, base_path: &Path) -> ChunkResult<Vec<PathBuf>> {
        let chunk_dir = self.layout.resolve(base_path)?;
        let manifest = self.load_manifest("chunk_paths", base_path, &chunk_dir)?;
        Ok(manifest
            .chunk_files
            .iter()
            .filter(|entry| {
                let plain = is_plain_file_name(entry);
                if !plain {
                    warn!(
                        entry = %entry,
                        dir = %chunk_dir.display(),
                        "skipping manifest entry outside the chunk directory"
                    );
                }
                plain
            })
            .map(|entry| chunk_dir.join(entry))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::layout::REPO_MARKER;
    use pretty_assertions::assert_eq;
    use sheetvc_core::{Cell, CellComment, CellError, CellStyle, Worksheet};
    use tempfile::TempDir;

    fn repo() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join(REPO_MARKER)).unwrap();
        dir
    }

    fn sample() -> Workbook {
        let mut workbook = Workbook::new();
        workbook.metadata.checksum = "c0ffee".into();
        workbook.defined_names.insert("Rate".into(), "Inputs!$B$1".into());

        let mut inputs = Worksheet::new("Inputs", 0);
        inputs.set_cell("A1", Cell::new("Rate"));
        inputs.set_cell("B1", Cell::new(0.05).with_style(CellStyle::new().number_format("0%")));
        inputs.set_cell("C1", Cell::new(CellError::Na).with_comment(CellComment::new("ann", "fix")));
        workbook.push_sheet(inputs);

        let mut hidden = Worksheet::new("Q1 Data", 0);
        hidden.hidden = true;
        hidden.set_cell("A1", Cell::formula("=Inputs!B1*2", 0.1));
        workbook.push_sheet(hidden);
        workbook
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let repo = repo();
        let source = repo.path().join("models/plan.xlsx");
        let strategy = SheetBasedChunking::new();
        let workbook = sample();

        let written = strategy
            .write_chunks(&workbook, &source, &ChunkOptions::default())
            .unwrap();
        let dir = repo.path().join(".sheetvc/data/models/plan_chunks");
        assert_eq!(
            written,
            vec![
                dir.join("workbook.json"),
                dir.join("sheet_Inputs.json"),
                dir.join("sheet_Q1_Data.json"),
            ]
        );
        assert!(dir.join(MANIFEST_FILE_NAME).is_file());

        let read = strategy.read_chunks(&source).unwrap();
        assert!(read.is_clean());
        assert_eq!(read.workbook, workbook);
    }

    #[test]
    fn test_manifest_contents() {
        let repo = repo();
        let source = repo.path().join("plan.xlsx");
        let strategy = SheetBasedChunking::new();
        let workbook = sample();
        strategy
            .write_chunks(&workbook, &source, &ChunkOptions::compact())
            .unwrap();

        let dir = strategy.layout().chunk_dir(&source).unwrap();
        let raw = fs::read_to_string(dir.join(MANIFEST_FILE_NAME)).unwrap();
        assert!(raw.contains('\n'));
        let manifest: Manifest = serde_json::from_str(&raw).unwrap();
        assert_eq!(manifest.strategy, "sheet-based");
        assert_eq!(manifest.main_file, INDEX_FILE_NAME);
        assert_eq!(manifest.total_sheets, 2);
        assert_eq!(manifest.created, workbook.metadata.created);
        assert_eq!(
            manifest.chunk_files,
            vec!["workbook.json", "sheet_Inputs.json", "sheet_Q1_Data.json"]
        );

        let index = fs::read_to_string(dir.join(INDEX_FILE_NAME)).unwrap();
        assert!(!index.contains('\n'));
    }

    #[test]
    fn test_read_index_returns_stubs() {
        let repo = repo();
        let source = repo.path().join("plan.xlsx");
        let strategy = SheetBasedChunking::new();
        strategy
            .write_chunks(&sample(), &source, &ChunkOptions::default())
            .unwrap();

        let toc = strategy.read_index(&source).unwrap();
        assert_eq!(toc.sheet_names(), vec!["Inputs", "Q1 Data"]);
        assert!(toc.sheets.iter().all(|s| s.cells.is_empty()));
        assert!(toc.sheets[1].hidden);
        assert_eq!(toc.defined_names.get("Rate").map(String::as_str), Some("Inputs!$B$1"));
    }

    #[test]
    fn test_missing_chunk_dir_is_not_chunked() {
        let repo = repo();
        let source = repo.path().join("never.xlsx");
        let strategy = SheetBasedChunking::new();

        let err = strategy.chunk_paths(&source).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotChunked);
        let err = strategy.read_chunks(&source).unwrap_err();
        assert!(matches!(err, ChunkError::NotChunked { .. }));
    }

    #[test]
    fn test_missing_manifest_is_incomplete() {
        let repo = repo();
        let source = repo.path().join("half.xlsx");
        let strategy = SheetBasedChunking::new();
        let dir = strategy.layout().chunk_dir(&source).unwrap();
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(INDEX_FILE_NAME), "{}").unwrap();

        let err = strategy.chunk_paths(&source).unwrap_err();
        assert!(matches!(err, ChunkError::IncompleteChunkSet { operation: "chunk_paths", .. }));
        assert_eq!(err.kind(), ErrorKind::Corrupted);
    }

    #[test]
    fn test_corrupt_manifest_and_index() {
        let repo = repo();
        let source = repo.path().join("plan.xlsx");
        let strategy = SheetBasedChunking::new();
        strategy
            .write_chunks(&sample(), &source, &ChunkOptions::default())
            .unwrap();
        let dir = strategy.layout().chunk_dir(&source).unwrap();

        fs::write(dir.join(INDEX_FILE_NAME), "not json").unwrap();
        assert!(matches!(
            strategy.read_chunks(&source),
            Err(ChunkError::CorruptIndex { .. })
        ));

        fs::remove_file(dir.join(INDEX_FILE_NAME)).unwrap();
        assert!(matches!(
            strategy.read_index(&source),
            Err(ChunkError::MissingIndex { .. })
        ));

        fs::write(dir.join(MANIFEST_FILE_NAME), "[").unwrap();
        let err = strategy.chunk_paths(&source).unwrap_err();
        assert!(matches!(err, ChunkError::CorruptManifest { .. }));
        assert_eq!(err.kind(), ErrorKind::Corrupted);
    }

    #[test]
    fn test_bad_sheet_file_is_skipped_with_warning() {
        let repo = repo();
        let source = repo.path().join("plan.xlsx");
        let strategy = SheetBasedChunking::new();
        strategy
            .write_chunks(&sample(), &source, &ChunkOptions::default())
            .unwrap();
        let dir = strategy.layout().chunk_dir(&source).unwrap();
        fs::write(dir.join("sheet_Inputs.json"), "{ broken").unwrap();

        let read = strategy.read_chunks(&source).unwrap();
        assert_eq!(read.workbook.sheet_names(), vec!["Q1 Data"]);
        assert_eq!(read.warnings.len(), 1);
        assert_eq!(read.warnings[0].kind, ChunkWarningKind::Unparsable);
        assert_eq!(read.warnings[0].file, dir.join("sheet_Inputs.json"));

        fs::remove_file(dir.join("sheet_Q1_Data.json")).unwrap();
        let read = strategy.read_chunks(&source).unwrap();
        assert!(read.workbook.is_empty());
        assert_eq!(read.warnings[1].kind, ChunkWarningKind::Unreadable);
    }

    #[test]
    fn test_checksum_mismatch_keeps_sheet() {
        let repo = repo();
        let source = repo.path().join("plan.xlsx");
        let strategy = SheetBasedChunking::new();
        let mut workbook = sample();
        strategy
            .write_chunks(&workbook, &source, &ChunkOptions::default())
            .unwrap();

        // Rewrite only the index with a different checksum
        workbook.metadata.checksum = "other".into();
        let dir = strategy.layout().chunk_dir(&source).unwrap();
        fs::write(
            dir.join(INDEX_FILE_NAME),
            serde_json::to_string(&workbook.table_of_contents()).unwrap(),
        )
        .unwrap();

        let read = strategy.read_chunks(&source).unwrap();
        assert_eq!(read.workbook.sheet_count(), 2);
        assert_eq!(read.warnings.len(), 2);
        assert!(read
            .warnings
            .iter()
            .all(|w| w.kind == ChunkWarningKind::ChecksumMismatch));
    }

    #[test]
    fn test_manifest_entry_outside_dir_is_skipped() {
        let repo = repo();
        let source = repo.path().join("plan.xlsx");
        let strategy = SheetBasedChunking::new();
        strategy
            .write_chunks(&sample(), &source, &ChunkOptions::default())
            .unwrap();
        let dir = strategy.layout().chunk_dir(&source).unwrap();

        let manifest_path = dir.join(MANIFEST_FILE_NAME);
        let mut manifest: Manifest =
            serde_json::from_str(&fs::read_to_string(&manifest_path).unwrap()).unwrap();
        manifest.chunk_files.push("../escape.json".into());
        fs::write(&manifest_path, serde_json::to_string(&manifest).unwrap()).unwrap();

        let read = strategy.read_chunks(&source).unwrap();
        assert_eq!(read.workbook.sheet_count(), 2);
        assert_eq!(read.warnings[0].kind, ChunkWarningKind::OutsideChunkDir);
    }

    #[test]
    fn test_chunk_paths_stay_inside_chunk_dir() {
        let repo = repo();
        let source = repo.path().join("plan.xlsx");
        let strategy = SheetBasedChunking::new();
        strategy
            .write_chunks(&sample(), &source, &ChunkOptions::default())
            .unwrap();
        let dir = strategy.layout().chunk_dir(&source).unwrap();

        let manifest_path = dir.join(MANIFEST_FILE_NAME);
        let mut manifest: Manifest =
            serde_json::from_str(&fs::read_to_string(&manifest_path).unwrap()).unwrap();
        manifest.chunk_files.push("../escape.json".into());
        manifest.chunk_files.push("/etc/passwd".into());
        fs::write(&manifest_path, serde_json::to_string(&manifest).unwrap()).unwrap();

        let paths = strategy.chunk_paths(&source).unwrap();
        assert_eq!(paths.len(), 3);
        assert!(paths.iter().all(|p| p.parent() == Some(dir.as_path())));
    }

    #[test]
    fn test_non_finite_numbers_are_rejected_before_writing() {
        let repo = repo();
        let strategy = SheetBasedChunking::new();

        let mut workbook = sample();
        workbook.sheets[1].set_cell("B7", Cell::new(f64::INFINITY));
        let source = repo.path().join("inf.xlsx");
        let err = strategy
            .write_chunks(&workbook, &source, &ChunkOptions::default())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("cell B7"));
        assert!(!strategy.layout().chunk_dir(&source).unwrap().exists());

        let mut workbook = sample();
        workbook.sheets[0].set_cell("A2", Cell::new(f64::NAN));
        let err = strategy
            .write_chunks(&workbook, &repo.path().join("nan.xlsx"), &ChunkOptions::default())
            .unwrap_err();
        assert!(matches!(err, ChunkError::NonFiniteNumber { ref sheet, .. } if sheet == "Inputs"));

        let mut workbook = sample();
        workbook.sheets[0].column_widths.insert("C".into(), f64::NEG_INFINITY);
        let err = strategy
            .write_chunks(&workbook, &repo.path().join("width.xlsx"), &ChunkOptions::default())
            .unwrap_err();
        assert!(err.to_string().contains("width of column C"));
    }

    #[test]
    fn test_name_collision_writes_nothing() {
        let repo = repo();
        let source = repo.path().join("clash.xlsx");
        let strategy = SheetBasedChunking::new();
        let mut workbook = Workbook::new();
        workbook.push_sheet(Worksheet::new("Sheet/1", 0));
        workbook.push_sheet(Worksheet::new("Sheet_1", 0));

        let err = strategy
            .write_chunks(&workbook, &source, &ChunkOptions::default())
            .unwrap_err();
        match &err {
            ChunkError::FileNameCollision { file_name, first, second } => {
                assert_eq!(file_name, "sheet_Sheet_1.json");
                assert_eq!(first, "Sheet/1");
                assert_eq!(second, "Sheet_1");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(!strategy.layout().chunk_dir(&source).unwrap().exists());
    }

    #[test]
    fn test_rewrite_replaces_sheet_list() {
        let repo = repo();
        let source = repo.path().join("plan.xlsx");
        let strategy = SheetBasedChunking::new();
        let mut workbook = sample();
        strategy
            .write_chunks(&workbook, &source, &ChunkOptions::default())
            .unwrap();

        workbook.sheets.pop();
        strategy
            .write_chunks(&workbook, &source, &ChunkOptions::default())
            .unwrap();

        let paths = strategy.chunk_paths(&source).unwrap();
        assert_eq!(paths.len(), 2);
        assert_eq!(strategy.read_chunks(&source).unwrap().workbook, workbook);
    }

    #[test]
    fn test_chunk_dir_accepted_directly() {
        let repo = repo();
        let source = repo.path().join("plan.xlsx");
        let strategy = SheetBasedChunking::new();
        strategy
            .write_chunks(&sample(), &source, &ChunkOptions::default())
            .unwrap();
        let dir = strategy.layout().chunk_dir(&source).unwrap();

        assert_eq!(
            strategy.chunk_paths(&dir).unwrap(),
            strategy.chunk_paths(&source).unwrap()
        );
        assert_eq!(strategy.read_chunks(&dir).unwrap().workbook.sheet_count(), 2);
    }

    #[test]
    fn test_same_chunk_set_for_any_source_extension() {
        let repo = repo();
        let strategy = SheetBasedChunking::new();
        strategy
            .write_chunks(&sample(), &repo.path().join("plan.xlsx"), &ChunkOptions::default())
            .unwrap();

        let via_json = strategy.read_chunks(&repo.path().join("plan.json")).unwrap();
        assert_eq!(via_json.workbook.sheet_count(), 2);
    }
}
