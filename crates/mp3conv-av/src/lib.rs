//! # mp3conv-av
//!
//! External tool plumbing for the mp3conv pipeline.
//!
//! This crate provides:
//!
//! - **Tool discovery** ([`tools`]) -- locate ffmpeg via a configured path or
//!   `PATH`.
//! - **Command execution** ([`ToolCommand`]) -- async builder that captures and
//!   fully drains stdout/stderr, with optional timeout.
//! - **Audio extraction settings** ([`AudioSettings`]) -- the ffmpeg argument
//!   set that strips video and re-encodes the audio track.

pub mod audio;
pub mod command;
pub mod tools;

pub use audio::AudioSettings;
pub use command::{ToolCommand, ToolOutput};
pub use tools::{require_tool, resolve_tool};
