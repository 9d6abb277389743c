mod types;

pub use types::*;

use anyhow::{Context, Result};
use mp3conv_common::paths::normalize_extension;
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    prepare(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./mp3conv.toml",
        "~/.config/mp3conv/config.toml",
        "/etc/mp3conv/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    prepare(Config::default())
}

fn prepare(mut config: Config) -> Result<Config> {
    normalize_extensions(&mut config.conversion);
    validate_config(&config)?;
    Ok(config)
}

fn normalize_extensions(conversion: &mut ConversionConfig) {
    conversion.source_extensions = conversion
        .source_extensions
        .iter()
        .map(|e| normalize_extension(e))
        .filter(|e| !e.is_empty())
        .collect();
    conversion.source_extensions.dedup();
    conversion.target_extension = normalize_extension(&conversion.target_extension);
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    let conversion = &config.conversion;

    if conversion.max_concurrent == 0 {
        anyhow::bail!("max_concurrent must be at least 1");
    }

    if conversion.channel_capacity == 0 {
        anyhow::bail!("channel_capacity must be at least 1");
    }

    if conversion.source_extensions.is_empty() {
        anyhow::bail!("At least one source extension is required");
    }

    if conversion.target_extension.is_empty() {
        anyhow::bail!("target_extension cannot be empty");
    }

    if conversion
        .source_extensions
        .iter()
        .any(|e| e.eq_ignore_ascii_case(&conversion.target_extension))
    {
        anyhow::bail!(
            "target_extension '{}' is also a source extension",
            conversion.target_extension
        );
    }

    if config.tools.timeout_secs == Some(0) {
        anyhow::bail!("timeout_secs must be at least 1 when set");
    }

    if let Some(ref path) = config.tools.ffmpeg_path {
        if !path.exists() {
            tracing::warn!("Configured ffmpeg path does not exist: {:?}", path);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = prepare(Config::default()).unwrap();
        assert_eq!(config.conversion.max_concurrent, 6);
        assert_eq!(config.conversion.source_extensions, ["mp4"]);
        assert_eq!(config.conversion.target_extension, "mp3");
        assert_eq!(config.audio.sample_rate, 48_000);
        assert_eq!(config.audio.bitrate, "137K");
        assert!(config.tools.timeout().is_none());
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[conversion]
max_concurrent = 2
source_extensions = [".MP4", "mkv"]

[audio]
bitrate = "192k"

[tools]
timeout_secs = 3600
"#
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.conversion.max_concurrent, 2);
        assert_eq!(config.conversion.source_extensions, ["mp4", "mkv"]);
        assert_eq!(config.audio.bitrate, "192k");
        assert_eq!(config.audio.sample_rate, 48_000);
        assert_eq!(
            config.tools.timeout(),
            Some(std::time::Duration::from_secs(3600))
        );
    }

    #[test]
    fn zero_concurrency_rejected() {
        let mut config = Config::default();
        config.conversion.max_concurrent = 0;
        let err = prepare(config).unwrap_err();
        assert!(err.to_string().contains("max_concurrent"));
    }

    #[test]
    fn target_matching_source_rejected() {
        let mut config = Config::default();
        config.conversion.target_extension = ".MP4".to_string();
        assert!(prepare(config).is_err());
    }

    #[test]
    fn empty_source_list_rejected() {
        let mut config = Config::default();
        config.conversion.source_extensions = vec![" . ".to_string()];
        assert!(prepare(config).is_err());
    }

    #[test]
    fn unreadable_file_reports_path() {
        let err = load_config(Path::new("/nonexistent/mp3conv.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to read config file"));
    }
}
