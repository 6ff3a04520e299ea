//! Error type shared by the editing core, persistence and export.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by editor operations.
///
/// None of these are fatal to the editor: callers log them and keep the
/// current scene.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("Invalid export size {width}x{height}: both dimensions must be positive")]
    InvalidSize { width: i32, height: i32 },

    #[error("Scene file {}: {message}", path.display())]
    Persistence { path: PathBuf, message: String },

    #[error("Invalid value for {field}: {input:?}")]
    Parse { field: &'static str, input: String },

    #[error("Rendering failed: {0}")]
    Render(String),
}

impl EditorError {
    /// Wraps an anyhow chain from the persistence layer, keeping every cause.
    pub(crate) fn persistence(path: impl Into<PathBuf>, err: &anyhow::Error) -> Self {
        Self::Persistence {
            path: path.into(),
            message: format!("{err:#}"),
        }
    }
}
