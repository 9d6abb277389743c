//! Path utilities for recognizing source files and naming their outputs.
//!
//! Extensions are given without the leading dot and compared
//! case-insensitively.

use std::path::{Path, PathBuf};

/// Check if a path's extension is one of `extensions`.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use mp3conv_common::paths::has_extension;
///
/// assert!(has_extension(Path::new("clip.mp4"), &["mp4"]));
/// assert!(has_extension(Path::new("/path/to/CLIP.MP4"), &["mp4", "mkv"]));
/// assert!(!has_extension(Path::new("song.mp3"), &["mp4"]));
/// ```
pub fn has_extension<S: AsRef<str>>(path: &Path, extensions: &[S]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            extensions
                .iter()
                .any(|candidate| candidate.as_ref().eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

/// Replace the extension of `source` with `target_extension`.
///
/// The result sits next to the source with the same base name.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use mp3conv_common::paths::derive_destination;
///
/// assert_eq!(
///     derive_destination(Path::new("/media/show.s01e01.mp4"), "mp3"),
///     Path::new("/media/show.s01e01.mp3"),
/// );
/// ```
#[must_use]
pub fn derive_destination(source: &Path, target_extension: &str) -> PathBuf {
    source.with_extension(target_extension)
}

/// Normalize a configured extension: trim whitespace and a leading dot.
///
/// # Examples
///
/// ```
/// use mp3conv_common::paths::normalize_extension;
///
/// assert_eq!(normalize_extension(".MP4"), "mp4");
/// assert_eq!(normalize_extension(" mkv "), "mkv");
/// ```
#[must_use]
pub fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_extension() {
        let exts = ["mp4"];
        assert!(has_extension(Path::new("movie.mp4"), &exts));
        assert!(has_extension(Path::new("movie.MP4"), &exts));
        assert!(has_extension(Path::new("/deep/path/movie.Mp4"), &exts));

        assert!(!has_extension(Path::new("movie.mp3"), &exts));
        assert!(!has_extension(Path::new("movie.mp4.part"), &exts));
        assert!(!has_extension(Path::new("no_extension"), &exts));
    }

    #[test]
    fn test_edge_cases() {
        let exts = ["mp4"];
        // A bare dotfile has no extension.
        assert!(!has_extension(Path::new(".mp4"), &exts));
        assert!(!has_extension(Path::new(""), &exts));

        // Multiple dots.
        assert!(has_extension(Path::new("talk.2021.final.mp4"), &exts));
        assert!(has_extension(Path::new(".hidden.mp4"), &exts));
    }

    #[test]
    fn test_derive_destination() {
        assert_eq!(
            derive_destination(Path::new("a.mp4"), "mp3"),
            PathBuf::from("a.mp3")
        );
        assert_eq!(
            derive_destination(Path::new("dir.v2/a.b.mp4"), "mp3"),
            PathBuf::from("dir.v2/a.b.mp3")
        );
        assert_eq!(
            derive_destination(Path::new("/x/y/noext"), "mp3"),
            PathBuf::from("/x/y/noext.mp3")
        );
    }

    #[test]
    fn test_normalize_extension() {
        assert_eq!(normalize_extension("mp4"), "mp4");
        assert_eq!(normalize_extension(".MKV"), "mkv");
        assert_eq!(normalize_extension("  .Webm "), "webm");
    }
}
