//! Common error types used throughout mp3conv.

use std::path::PathBuf;

/// Common error type for mp3conv.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Walking the directory tree failed.
    #[error("failed to read {}: {message}", path.display())]
    Walk { path: PathBuf, message: String },

    /// An external tool could not be started, timed out, or exited non-zero.
    #[error("{tool}: {message}")]
    Tool { tool: String, message: String },

    /// An internal invariant was violated.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new Walk error.
    pub fn walk(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Walk {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a new Tool error.
    pub fn tool(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Tool {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Create a new Internal error.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::Internal(msg.into())
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
