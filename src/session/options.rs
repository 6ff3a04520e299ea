use crate::config::{SessionCompression, SessionConfig};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub const DEFAULT_AUTO_COMPRESS_THRESHOLD_BYTES: u64 = 100 * 1024; // 100 KiB
pub const DEFAULT_MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024; // 10 MiB

/// Compression preference for scene files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMode {
    /// Always write plain JSON.
    Off,
    /// Always write gzip-compressed JSON.
    On,
    /// Write gzip when payload exceeds the configured threshold.
    Auto,
}

impl From<SessionCompression> for CompressionMode {
    fn from(value: SessionCompression) -> Self {
        match value {
            SessionCompression::Auto => CompressionMode::Auto,
            SessionCompression::On => CompressionMode::On,
            SessionCompression::Off => CompressionMode::Off,
        }
    }
}

/// Runtime options derived from configuration for scene persistence.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub max_file_size_bytes: u64,
    pub compression: CompressionMode,
    pub auto_compress_threshold_bytes: u64,
    pub backup_retention: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            max_file_size_bytes: DEFAULT_MAX_FILE_SIZE_BYTES,
            compression: CompressionMode::Auto,
            auto_compress_threshold_bytes: DEFAULT_AUTO_COMPRESS_THRESHOLD_BYTES,
            backup_retention: 1,
        }
    }
}

impl SessionOptions {
    /// Whether a payload of `len` bytes should be gzip-compressed.
    pub fn should_compress(&self, len: u64) -> bool {
        match self.compression {
            CompressionMode::Off => false,
            CompressionMode::On => true,
            CompressionMode::Auto => len >= self.auto_compress_threshold_bytes,
        }
    }
}

/// Build runtime session options from configuration values.
pub fn options_from_config(session_cfg: &SessionConfig) -> SessionOptions {
    SessionOptions {
        max_file_size_bytes: session_cfg
            .max_file_size_mb
            .saturating_mul(1024 * 1024)
            .max(1),
        compression: session_cfg.compress.into(),
        auto_compress_threshold_bytes: session_cfg
            .auto_compress_threshold_kb
            .saturating_mul(1024),
        backup_retention: session_cfg.backup_retention,
    }
}

/// `<scene>.bak`, the rotated copy of the previous save.
pub fn backup_file_path(scene_path: &Path) -> PathBuf {
    with_suffix(scene_path, ".bak")
}

/// `<scene>.lock`, the advisory lock guarding reads and writes.
pub fn lock_file_path(scene_path: &Path) -> PathBuf {
    with_suffix(scene_path, ".lock")
}

pub(crate) fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}
