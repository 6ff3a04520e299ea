use super::options::{SessionOptions, backup_file_path};
use super::snapshot;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Summary information about a scene file for CLI reporting.
#[derive(Debug, Clone)]
pub struct SceneInspection {
    pub scene_path: PathBuf,
    pub size_bytes: u64,
    pub compressed: bool,
    pub last_modified: String,
    pub shape_count: usize,
    /// Shape count per kind name, sorted by name
    pub kinds: BTreeMap<&'static str, usize>,
    pub backup_path: PathBuf,
    pub backup_exists: bool,
}

/// Load `path` and tally its contents.
pub fn inspect_scene(path: &Path, options: &SessionOptions) -> Result<SceneInspection> {
    let size_bytes = fs::metadata(path)
        .with_context(|| format!("failed to stat scene file {}", path.display()))?
        .len();
    let loaded = snapshot::load_scene(path, options)?;

    let mut kinds = BTreeMap::new();
    for shape in &loaded.shapes {
        *kinds.entry(shape.kind_name()).or_insert(0) += 1;
    }

    let backup_path = backup_file_path(path);
    Ok(SceneInspection {
        scene_path: path.to_path_buf(),
        size_bytes,
        compressed: loaded.compressed,
        last_modified: loaded.last_modified,
        shape_count: loaded.shapes.len(),
        kinds,
        backup_exists: backup_path.exists(),
        backup_path,
    })
}
