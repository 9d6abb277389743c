use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mp3conv")]
#[command(author, version, about = "Convert every video under a directory to an audio file")]
pub struct Cli {
    /// Directory to scan (defaults to the current directory)
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Maximum concurrent conversions (overrides config)
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// List planned conversions without running them
    #[arg(long)]
    pub dry_run: bool,

    /// Exit with a non-zero status if any conversion failed
    #[arg(long)]
    pub strict: bool,
}
