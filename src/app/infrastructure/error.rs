use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("Not enough memory to load {} ({size} bytes)", .path.display())]
    OutOfMemory { path: PathBuf, size: u64 },

    #[error("Unsupported encoding: {0}")]
    UnsupportedEncoding(String),

    #[error("{} is not valid {encoding}", .path.display())]
    Malformed { path: PathBuf, encoding: String },

    #[error("Connection refused: {0}")]
    ConnectionRefused(String),

    #[error("Unknown host: {0}")]
    UnknownHost(String),

    #[error("Login failed: {0}")]
    Login(String),

    #[error("Remote error: {0}")]
    Remote(String),

    #[error("File is read-only: {}", .0.display())]
    ReadOnly(PathBuf),

    #[error("Invalid syntax filter: {0}")]
    InvalidFilter(String),

    #[error("Line {line} is out of range (1-{count})")]
    LineOutOfRange { line: usize, count: usize },

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Session error: {0}")]
    Session(String),
}

/// Convenience type alias for Results with AppError
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Classify an I/O failure on `path` into the matching failure class.
    pub fn from_io(err: io::Error, path: &Path) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => AppError::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => AppError::PermissionDenied(path.to_path_buf()),
            io::ErrorKind::OutOfMemory => AppError::OutOfMemory {
                path: path.to_path_buf(),
                size: 0,
            },
            io::ErrorKind::ConnectionRefused => {
                AppError::ConnectionRefused(path.display().to_string())
            }
            _ => AppError::Io(err),
        }
    }

    /// Message shown to the user, keyed by failure class.
    pub fn user_message(&self) -> String {
        match self {
            AppError::NotFound(path) => format!("File not found:\n{}", path.display()),
            AppError::PermissionDenied(path) => {
                format!("You do not have permission to access:\n{}", path.display())
            }
            AppError::OutOfMemory { path, .. } => format!(
                "Out of memory while loading or saving:\n{}\nTry closing other documents.",
                path.display()
            ),
            AppError::UnsupportedEncoding(name) => {
                format!("The encoding \"{}\" is not supported.", name)
            }
            AppError::Malformed { path, encoding } => format!(
                "Could not decode {} as {}.\nTry opening it with another encoding.",
                path.display(),
                encoding
            ),
            AppError::ConnectionRefused(target) => {
                format!("The connection to {} was refused.", target)
            }
            AppError::UnknownHost(host) => format!("Unknown host: {}", host),
            AppError::Login(target) => format!("Could not log in to {}.", target),
            AppError::ReadOnly(path) => format!("{} is read-only.", path.display()),
            AppError::LineOutOfRange { count, .. } => {
                format!("Line number must be between 1 and {}.", count)
            }
            other => format!("Error: {}", other),
        }
    }
}
