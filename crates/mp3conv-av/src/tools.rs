//! External tool detection.

use mp3conv_common::{Error, Result};
use std::path::{Path, PathBuf};

/// Require that a tool is available, returning its path.
///
/// # Errors
///
/// Returns [`Error::Tool`] if the tool is not found in `PATH`.
pub fn require_tool(name: &str) -> Result<PathBuf> {
    which::which(name)
        .map_err(|_| Error::tool(name, format!("{name} not found; is it installed and in PATH?")))
}

/// Get the path to a tool, preferring a configured path over `PATH` lookup.
///
/// Never fails: when neither the configured path nor `PATH` has the tool, the
/// bare name is returned so that each spawn attempt reports the problem.
pub fn resolve_tool(name: &str, configured: Option<&Path>) -> PathBuf {
    if let Some(path) = configured {
        if path.exists() {
            return path.to_path_buf();
        }
        tracing::warn!(tool = name, path = %path.display(), "Configured tool path does not exist, searching PATH");
    }

    match require_tool(name) {
        Ok(path) => path,
        Err(e) => {
            tracing::warn!("{e}");
            PathBuf::from(name)
        }
    }
}
