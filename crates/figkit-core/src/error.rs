// File: crates/figkit-core/src/error.rs
// Summary: Error taxonomy shared by styling, layout and export.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FigError {
    /// Unknown profile name or an out-of-range style parameter.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Argument outside its domain (layer count, opacity, grid request, index).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("shape mismatch: expected {expected:?}, got {actual} panel(s)")]
    ShapeMismatch { expected: Vec<usize>, actual: usize },

    #[error("unsupported export format '{0}'")]
    UnsupportedFormat(String),

    /// The optimizer exists on the host but failed on `path`.
    #[error("{program} failed on {}: {reason}", path.display())]
    ExternalToolFailure { program: String, path: PathBuf, reason: String },

    #[error("render failed: {0}")]
    Render(String),

    /// Filesystem failure while creating, writing or reading `path`.
    #[error("{}: {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },

    #[error(transparent)]
    Image(#[from] image::ImageError),
}

impl FigError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> FigError {
        let path = path.into();
        move |source| FigError::Io { path, source }
    }
}

pub type Result<T> = std::result::Result<T, FigError>;
