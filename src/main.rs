mod cli;

use mp3conv::{config, driver};

use anyhow::Result;
use clap::Parser;
use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "mp3conv=debug,mp3conv_av=debug,mp3conv_common=debug".to_string()
        } else {
            "mp3conv=info,mp3conv_av=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    let mut config = config::load_config_or_default(cli.config.as_deref())?;
    if let Some(jobs) = cli.jobs {
        config.conversion.max_concurrent = jobs;
        config::validate_config(&config)?;
    }

    let root = driver::resolve_root(&cli.dir)?;

    let rt = tokio::runtime::Runtime::new()?;

    if cli.dry_run {
        let jobs = rt.block_on(driver::plan(&root, &config))?;
        for job in &jobs {
            println!("{} -> {}", job.source().display(), job.destination().display());
        }
        println!("\n[DRY RUN] Would convert {} files", jobs.len());
        return Ok(());
    }

    println!("Process directory {}", root.display());
    let report = rt.block_on(driver::run(&root, &config))?;

    println!("All files processed");
    println!(
        "Converted: {}, failed: {}",
        report.summary.converted, report.summary.failed
    );

    if cli.strict && report.has_failures() {
        anyhow::bail!("{} conversions failed", report.summary.failed);
    }

    Ok(())
}
