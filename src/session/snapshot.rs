use super::options::{SessionOptions, backup_file_path, lock_file_path, with_suffix};
use crate::draw::Shape;
use anyhow::{Context, Result, bail};
use chrono::Utc;
use flate2::{Compression, bufread::GzDecoder, write::GzEncoder};
use fs2::FileExt;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

pub const CURRENT_VERSION: u32 = 1;

/// On-disk document. `S` is a borrowed slice when writing and an owned
/// vector when reading.
#[derive(Debug, Serialize, Deserialize)]
struct SceneFile<S> {
    version: u32,
    last_modified: String,
    shapes: S,
}

/// A scene read back from disk.
#[derive(Debug, Clone)]
pub struct LoadedScene {
    pub shapes: Vec<Shape>,
    pub last_modified: String,
    pub compressed: bool,
}

/// Persist `shapes` to `path` according to the configured options.
///
/// The write goes through a temporary sibling file that is renamed into place
/// while holding an exclusive lock on `<path>.lock`. An empty scene is written
/// as an empty shape list.
pub fn save_scene(path: &Path, shapes: &[Shape], options: &SessionOptions) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create scene directory {}", parent.display()))?;
    }

    let lock_path = lock_file_path(path);
    let lock_file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(&lock_path)
        .with_context(|| format!("failed to open scene lock file {}", lock_path.display()))?;
    lock_file
        .lock_exclusive()
        .with_context(|| format!("failed to lock scene file {}", lock_path.display()))?;

    let result = save_scene_inner(path, shapes, options);

    lock_file.unlock().unwrap_or_else(|err| {
        warn!(
            "failed to unlock scene file {}: {}",
            lock_path.display(),
            err
        )
    });

    result
}

fn save_scene_inner(path: &Path, shapes: &[Shape], options: &SessionOptions) -> Result<()> {
    let payload = SceneFile {
        version: CURRENT_VERSION,
        last_modified: Utc::now().to_rfc3339(),
        shapes,
    };

    let mut bytes =
        serde_json::to_vec_pretty(&payload).context("failed to serialise scene payload")?;

    if bytes.len() as u64 > options.max_file_size_bytes {
        bail!(
            "scene data size {} bytes exceeds the configured limit of {} bytes",
            bytes.len(),
            options.max_file_size_bytes
        );
    }

    let compressed = options.should_compress(bytes.len() as u64);
    if compressed {
        bytes = compress_bytes(&bytes)?;
    }

    let tmp_path = temp_path(path);
    {
        let mut tmp_file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&tmp_path)
            .with_context(|| {
                format!("failed to open temporary scene file {}", tmp_path.display())
            })?;
        tmp_file
            .write_all(&bytes)
            .context("failed to write scene payload")?;
        tmp_file
            .sync_all()
            .context("failed to sync temporary scene file")?;
    }

    if path.exists() {
        if options.backup_retention > 0 {
            let backup_path = backup_file_path(path);
            if backup_path.exists() {
                fs::remove_file(&backup_path).ok();
            }
            if let Err(err) = fs::rename(path, &backup_path) {
                fs::remove_file(&tmp_path).ok();
                return Err(err).with_context(|| {
                    format!(
                        "failed to rotate previous scene file {} -> {}",
                        path.display(),
                        backup_path.display()
                    )
                });
            }
        } else {
            fs::remove_file(path).ok();
        }
    }

    if let Err(err) = fs::rename(&tmp_path, path) {
        fs::remove_file(&tmp_path).ok();
        return Err(err).with_context(|| {
            format!(
                "failed to move temporary scene file {} -> {}",
                tmp_path.display(),
                path.display()
            )
        });
    }

    info!(
        "Scene saved to {} ({} shapes, {} bytes, compression={})",
        path.display(),
        shapes.len(),
        bytes.len(),
        compressed
    );

    Ok(())
}

/// Read a scene previously written by [`save_scene`].
///
/// Fails on a missing or oversize file, undecodable gzip, malformed JSON,
/// an unknown format version, or shapes with a non-positive stroke width.
pub fn load_scene(path: &Path, options: &SessionOptions) -> Result<LoadedScene> {
    let metadata = fs::metadata(path)
        .with_context(|| format!("failed to stat scene file {}", path.display()))?;
    if metadata.len() > options.max_file_size_bytes {
        bail!(
            "scene file is {} bytes which exceeds the configured limit ({} bytes)",
            metadata.len(),
            options.max_file_size_bytes
        );
    }

    // Readers of a scene in a read-only location proceed without the lock.
    let lock_path = lock_file_path(path);
    let lock_file = match OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(&lock_path)
    {
        Ok(file) => {
            file.lock_shared().with_context(|| {
                format!("failed to acquire shared lock {}", lock_path.display())
            })?;
            Some(file)
        }
        Err(err) => {
            debug!(
                "Reading {} without a lock ({}: {})",
                path.display(),
                lock_path.display(),
                err
            );
            None
        }
    };

    let result = load_scene_inner(path);

    if let Some(lock_file) = lock_file {
        lock_file.unlock().unwrap_or_else(|err| {
            warn!(
                "failed to unlock scene file {}: {}",
                lock_path.display(),
                err
            )
        });
    }

    result
}

fn load_scene_inner(path: &Path) -> Result<LoadedScene> {
    let mut file_bytes = Vec::new();
    {
        let mut file = File::open(path)
            .with_context(|| format!("failed to open scene file {}", path.display()))?;
        file.read_to_end(&mut file_bytes)
            .context("failed to read scene file")?;
    }

    let compressed = is_gzip(&file_bytes);
    let decompressed = if compressed {
        let mut decoder = GzDecoder::new(&file_bytes[..]);
        let mut out = Vec::new();
        decoder
            .read_to_end(&mut out)
            .context("failed to decompress scene file")?;
        out
    } else {
        file_bytes
    };

    let scene_file: SceneFile<Vec<Shape>> =
        serde_json::from_slice(&decompressed).context("failed to parse scene json")?;

    if scene_file.version != CURRENT_VERSION {
        bail!(
            "unsupported scene file version {} (expected {})",
            scene_file.version,
            CURRENT_VERSION
        );
    }

    if let Some((index, shape)) = scene_file
        .shapes
        .iter()
        .enumerate()
        .find(|(_, shape)| !(shape.stroke_width.is_finite() && shape.stroke_width > 0.0))
    {
        bail!(
            "shape {} ({}) has invalid stroke width {}",
            index,
            shape.kind_name(),
            shape.stroke_width
        );
    }

    debug!(
        "Loaded {} shapes from {} (compressed={})",
        scene_file.shapes.len(),
        path.display(),
        compressed
    );

    Ok(LoadedScene {
        shapes: scene_file.shapes,
        last_modified: scene_file.last_modified,
        compressed,
    })
}

fn compress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .context("failed to compress scene payload")?;
    encoder
        .finish()
        .context("failed to finalise compressed scene payload")
}

pub(crate) fn is_gzip(bytes: &[u8]) -> bool {
    bytes.len() > 2 && bytes[0] == 0x1f && bytes[1] == 0x8b
}

fn temp_path(target: &Path) -> PathBuf {
    let mut candidate = with_suffix(target, ".tmp");
    let mut counter = 0u32;
    while candidate.exists() {
        counter += 1;
        candidate = with_suffix(target, &format!(".tmp{counter}"));
    }
    candidate
}
