//! mp3conv - extract audio from every video under a directory tree
//!
//! A [`source::JobSource`] walks the tree and yields conversion jobs on
//! demand; a [`dispatch::Dispatcher`] runs them through ffmpeg with a fixed
//! concurrency limit. [`driver`] connects the two.

pub mod config;
pub mod dispatch;
pub mod driver;
pub mod runner;
pub mod source;
