//! Chunk directory layout
//!
//! A source path `<root>/<rel>/<name>.xlsx` maps to the chunk directory
//! `<root>/.sheetvc/data/<rel>/<name>_chunks/`, where `<root>` is the nearest
//! ancestor holding a `.git` marker. Resolution is a pure function of the
//! source path and the working directory.

use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use ahash::AHashMap;

use crate::error::{ChunkError, ChunkResult};

/// Marker that identifies a repository root
pub const REPO_MARKER: &str = ".git";
/// Tool state directory at the repository root
pub const STATE_DIR: &str = ".sheetvc";
/// Sub-directory of [`STATE_DIR`] holding chunk sets
pub const DATA_SUBDIR: &str = "data";
/// Suffix of every chunk directory
pub const CHUNKS_DIR_SUFFIX: &str = "_chunks";
/// Fixed name of the index file
pub const INDEX_FILE_NAME: &str = "workbook.json";
/// Fixed name of the manifest
pub const MANIFEST_FILE_NAME: &str = ".sheetvc_chunks.json";

/// Extensions dropped from the source file name (one, case-insensitive)
const SOURCE_EXTENSIONS: [&str; 4] = ["json", "xlsx", "xlsm", "xls"];

const UNSAFE_FILE_CHARS: [char; 10] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|', ' '];

/// Walk up from `start` to the nearest directory containing [`REPO_MARKER`].
///
/// Falls back to `start` itself when no marker is found.
pub fn find_repo_root(start: &Path) -> PathBuf {
    start
        .ancestors()
        .find(|dir| dir.join(REPO_MARKER).exists())
        .unwrap_or(start)
        .to_path_buf()
}

/// Replace filesystem-unsafe characters with `_`
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| if UNSAFE_FILE_CHARS.contains(&c) { '_' } else { c })
        .collect()
}

/// File name of the chunk holding `sheet_name`
///
/// ```
/// use sheetvc_chunk::sheet_file_name;
///
/// assert_eq!(sheet_file_name("Q1 Sales"), "sheet_Q1_Sales.json");
/// assert_eq!(sheet_file_name("Sheet/1"), sheet_file_name("Sheet_1"));
/// ```
pub fn sheet_file_name(sheet_name: &str) -> String {
    sanitize_file_name(&format!("sheet_{}.json", sheet_name))
}

/// Memoized repository-root lookups keyed by absolute start directory
#[derive(Debug, Default)]
pub struct RepoRootCache {
    roots: Mutex<AHashMap<PathBuf, PathBuf>>,
}

impl RepoRootCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the root for `start`, walking the filesystem on a miss
    pub fn lookup(&self, start: &Path) -> PathBuf {
        if let Some(root) = self.lock().get(start) {
            return root.clone();
        }
        let root = find_repo_root(start);
        self.lock().insert(start.to_path_buf(), root.clone());
        root
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Forget every cached root
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, AHashMap<PathBuf, PathBuf>> {
        self.roots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Resolves source paths to chunk directories
#[derive(Debug, Clone, Default)]
pub struct ChunkLayout {
    cache: Option<Arc<RepoRootCache>>,
}

impl ChunkLayout {
    /// Layout with uncached root lookups
    pub fn new() -> Self {
        Self::default()
    }

    /// Layout sharing a root cache
    pub fn with_cache(cache: Arc<RepoRootCache>) -> Self {
        Self { cache: Some(cache) }
    }

    /// Repository root for a directory
    pub fn repo_root(&self, dir: &Path) -> PathBuf {
        match &self.cache {
            Some(cache) => cache.lookup(dir),
            None => find_repo_root(dir),
        }
    }

    /// Chunk directory derived from a logical source path
    pub fn chunk_dir(&self, base_path: &Path) -> ChunkResult<PathBuf> {
        let absolute = absolutize(base_path)?;
        let file_name = absolute
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| ChunkError::InvalidBasePath(base_path.to_path_buf()))?;
        let dir = absolute.parent().unwrap_or(&absolute);

        let root = self.repo_root(dir);
        let relative = dir.strip_prefix(&root).unwrap_or_else(|_| Path::new(""));

        let mut chunk_dir = root.join(STATE_DIR).join(DATA_SUBDIR);
        chunk_dir.push(relative);
        chunk_dir.push(format!("{}{}", base_name(file_name), CHUNKS_DIR_SUFFIX));
        Ok(chunk_dir)
    }

    /// Like [`chunk_dir`](Self::chunk_dir), but a path that already is a chunk
    /// directory is returned as is
    pub fn resolve(&self, base_path: &Path) -> ChunkResult<PathBuf> {
        if is_chunk_dir(base_path) {
            return absolutize(base_path);
        }
        self.chunk_dir(base_path)
    }
}

/// Check whether `path` points inside the data directory at a `_chunks` directory
pub fn is_chunk_dir(path: &Path) -> bool {
    let suffixed = path
        .file_name()
        .and_then(|name| name.to_str())
        .map_or(false, |name| name.ends_with(CHUNKS_DIR_SUFFIX));
    let components: Vec<_> = path.components().map(|c| c.as_os_str()).collect();
    suffixed
        && components
            .windows(2)
            .any(|pair| pair[0] == STATE_DIR && pair[1] == DATA_SUBDIR)
}

/// Source file name without one known extension
fn base_name(file_name: &str) -> &str {
    if let Some((stem, ext)) = file_name.rsplit_once('.') {
        if !stem.is_empty() && SOURCE_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)) {
            return stem;
        }
    }
    file_name
}

/// Absolute, lexically normalized form of `path`
fn absolutize(path: &Path) -> ChunkResult<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        let cwd = std::env::current_dir()
            .map_err(|e| ChunkError::io("resolve chunk directory", path, e))?;
        cwd.join(path)
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    Ok(normalized)
}
