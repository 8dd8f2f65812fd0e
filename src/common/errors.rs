use std::io;
use std::path::{Path, PathBuf};

/// Typed errors for CleanSweep operations.
/// The CLI works in `anyhow` at the top level; leaf filesystem operations
/// return these so callers can fold them into counters by kind.
#[derive(Debug, thiserror::Error)]
pub enum SweepError {
    /// File system operation failed
    #[error("I/O error at '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Permission or attribute denied the operation
    #[error("Permission denied: '{}'", path.display())]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Path vanished or never existed
    #[error("Not found: '{}'", path.display())]
    NotFound { path: PathBuf },

    /// Platform identifier outside the supported set
    #[error("Unknown platform '{name}' (expected windows, darwin/macos or linux)")]
    UnknownPlatform { name: String },

    /// Configuration file is invalid
    #[error("Config error in '{}': {message}", path.display())]
    Config { path: PathBuf, message: String },

    /// An OS maintenance command could not complete
    #[error("Maintenance action '{action}' failed: {message}")]
    Maintenance { action: String, message: String },
}

impl SweepError {
    /// Classify an `io::Error` raised while operating on `path`.
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => SweepError::NotFound {
                path: path.to_path_buf(),
            },
            io::ErrorKind::PermissionDenied => SweepError::PermissionDenied {
                path: path.to_path_buf(),
                source: err,
            },
            _ => SweepError::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }

    pub fn is_permission_denied(&self) -> bool {
        matches!(self, SweepError::PermissionDenied { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, SweepError::NotFound { .. })
    }
}

pub type SweepResult<T> = std::result::Result<T, SweepError>;
