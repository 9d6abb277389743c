use mp3conv_av::AudioSettings;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub conversion: ConversionConfig,

    #[serde(default)]
    pub audio: AudioSettings,

    #[serde(default)]
    pub tools: ToolsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConversionConfig {
    /// Upper bound on simultaneously running ffmpeg processes
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,

    /// Extensions (without dot) of files to convert, matched case-insensitively
    #[serde(default = "default_source_extensions")]
    pub source_extensions: Vec<String>,

    /// Extension given to the audio file written next to each source
    #[serde(default = "default_target_extension")]
    pub target_extension: String,

    /// Descend into symlinked directories
    #[serde(default)]
    pub follow_links: bool,

    /// Jobs the directory walker may discover ahead of the dispatcher
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

fn default_max_concurrent() -> usize {
    6
}

fn default_source_extensions() -> Vec<String> {
    vec!["mp4".to_string()]
}

fn default_target_extension() -> String {
    "mp3".to_string()
}

fn default_channel_capacity() -> usize {
    1
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            max_concurrent: default_max_concurrent(),
            source_extensions: default_source_extensions(),
            target_extension: default_target_extension(),
            follow_links: false,
            channel_capacity: default_channel_capacity(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ToolsConfig {
    /// Explicit ffmpeg location; PATH is searched when unset or missing
    #[serde(default)]
    pub ffmpeg_path: Option<PathBuf>,

    /// Kill a conversion that runs longer than this. No limit when unset.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl ToolsConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
