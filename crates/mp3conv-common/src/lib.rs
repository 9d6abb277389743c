//! mp3conv-common: shared error type and path utilities.
//!
//! - **Error Handling**: the [`Error`] enum and [`Result`] alias used by every
//!   crate in the workspace
//! - **Path Utilities**: extension matching and destination derivation for
//!   conversion jobs
//!
//! # Examples
//!
//! ```
//! use mp3conv_common::paths::{derive_destination, has_extension};
//! use std::path::Path;
//!
//! let source = Path::new("/media/talk.mp4");
//! assert!(has_extension(source, &["mp4"]));
//! assert_eq!(derive_destination(source, "mp3"), Path::new("/media/talk.mp3"));
//! ```

pub mod error;
pub mod paths;

pub use error::{Error, Result};
