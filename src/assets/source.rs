use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::foundation::error::{ConcertoError, ConcertoResult};

/// Where composition assets (painting, icons, font) are read from.
///
/// Implementations must be shareable across the concurrent loading branches.
pub trait AssetSource: Sync {
    /// Read raw bytes for a composition-relative asset path.
    fn read_bytes(&self, rel_path: &str) -> ConcertoResult<Vec<u8>>;

    /// Directories searched for font files when the composition names no font.
    fn font_dirs(&self) -> Vec<PathBuf> {
        Vec::new()
    }
}

/// Reads assets from a directory on disk.
#[derive(Clone, Debug)]
pub struct DirAssets {
    root: PathBuf,
}

impl DirAssets {
    /// Resolve assets relative to `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetSource for DirAssets {
    fn read_bytes(&self, rel_path: &str) -> ConcertoResult<Vec<u8>> {
        let norm = normalize_rel_path(rel_path)?;
        let path = self.root.join(&norm);
        std::fs::read(&path)
            .map_err(|e| ConcertoError::asset(format!("read '{}': {e}", path.display())))
    }

    fn font_dirs(&self) -> Vec<PathBuf> {
        vec![self.root.join("fonts"), self.root.clone()]
    }
}

/// In-memory asset map, keyed by normalized relative path.
#[derive(Clone, Debug, Default)]
pub struct MemoryAssets {
    files: BTreeMap<String, Vec<u8>>,
}

impl MemoryAssets {
    /// Empty asset map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register bytes under `rel_path`.
    pub fn insert(&mut self, rel_path: &str, bytes: impl Into<Vec<u8>>) -> ConcertoResult<()> {
        let norm = normalize_rel_path(rel_path)?;
        self.files.insert(norm, bytes.into());
        Ok(())
    }

    /// Builder-style [`MemoryAssets::insert`].
    pub fn with(mut self, rel_path: &str, bytes: impl Into<Vec<u8>>) -> ConcertoResult<Self> {
        self.insert(rel_path, bytes)?;
        Ok(self)
    }
}

impl AssetSource for MemoryAssets {
    fn read_bytes(&self, rel_path: &str) -> ConcertoResult<Vec<u8>> {
        let norm = normalize_rel_path(rel_path)?;
        self.files
            .get(&norm)
            .cloned()
            .ok_or_else(|| ConcertoError::asset(format!("asset '{norm}' not found")))
    }
}

/// Normalize and validate composition-relative asset paths.
///
/// The normalized result uses `/` separators, removes `.` segments, and rejects absolute paths or
/// parent traversals (`..`).
pub(crate) fn normalize_rel_path(source: &str) -> ConcertoResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(ConcertoError::validation("asset paths must be relative"));
    }
    if s.is_empty() {
        return Err(ConcertoError::validation("asset path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(ConcertoError::validation(
                "asset paths must not contain '..'",
            ));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(ConcertoError::validation(
            "asset path must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;
