//! Scene persistence (save/restore) support.
//!
//! Converts the in-memory shape list into a versioned JSON document, writes it
//! to disk with locking, optional compression, and backup rotation, and reads
//! it back with validation.

mod options;
mod snapshot;
mod storage;

pub use options::{
    CompressionMode, DEFAULT_AUTO_COMPRESS_THRESHOLD_BYTES, DEFAULT_MAX_FILE_SIZE_BYTES,
    SessionOptions, backup_file_path, lock_file_path, options_from_config,
};
pub use snapshot::{CURRENT_VERSION, LoadedScene, load_scene, save_scene};
pub use storage::{SceneInspection, inspect_scene};
