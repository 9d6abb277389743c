//! Audio extraction settings.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// How ffmpeg turns a video file into an audio-only file.
///
/// The output codec follows from the destination extension; only the sample
/// rate and bitrate are pinned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioSettings {
    /// Output sample rate in Hz (`-ar`).
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// Output audio bitrate (`-b:a`), in ffmpeg notation.
    #[serde(default = "default_bitrate")]
    pub bitrate: String,

    /// Pass `-y` so a destination that appeared after discovery is replaced
    /// instead of ffmpeg waiting on a prompt.
    #[serde(default = "default_overwrite")]
    pub overwrite: bool,
}

fn default_sample_rate() -> u32 {
    48_000
}

fn default_bitrate() -> String {
    "137K".to_string()
}

fn default_overwrite() -> bool {
    true
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
            bitrate: default_bitrate(),
            overwrite: default_overwrite(),
        }
    }
}

impl AudioSettings {
    /// Build the ffmpeg argument list converting `input` into `output`.
    pub fn ffmpeg_args(&self, input: &Path, output: &Path) -> Vec<String> {
        let mut args = Vec::with_capacity(10);
        if self.overwrite {
            args.push("-y".to_string());
        }
        args.extend([
            "-i".to_string(),
            input.to_string_lossy().to_string(),
            "-vn".to_string(),
            "-ar".to_string(),
            self.sample_rate.to_string(),
            "-b:a".to_string(),
            self.bitrate.clone(),
            output.to_string_lossy().to_string(),
        ]);
        args
    }
}
