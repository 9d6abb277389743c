//! Wires a directory tree to the dispatcher and runs it to completion.

use crate::config::Config;
use crate::dispatch::{DispatchSummary, Dispatcher};
use crate::runner::{CommandRunner, ProcessRunner};
use crate::source::{JobSource, JobSpec};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Result of a completed run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub root: PathBuf,
    pub summary: DispatchSummary,
}

impl RunReport {
    pub fn has_failures(&self) -> bool {
        self.summary.failed > 0
    }
}

/// Resolve `dir` against the current directory and check it is a directory.
pub fn resolve_root(dir: &Path) -> Result<PathBuf> {
    let joined = std::env::current_dir()
        .context("Failed to determine current directory")?
        .join(dir);

    let root = joined
        .canonicalize()
        .with_context(|| format!("Directory does not exist: {:?}", joined))?;

    if !root.is_dir() {
        anyhow::bail!("Not a directory: {:?}", root);
    }

    Ok(root)
}

/// Build the job source for `root` from `config`, locating ffmpeg.
pub fn job_source(root: &Path, config: &Config) -> JobSource {
    let ffmpeg = mp3conv_av::resolve_tool("ffmpeg", config.tools.ffmpeg_path.as_deref());
    JobSource::new(root, &config.conversion, config.audio.clone(), ffmpeg)
}

/// Convert every eligible file under `root` with ffmpeg.
pub async fn run(root: &Path, config: &Config) -> Result<RunReport> {
    let runner = CommandRunner::with_timeout(config.tools.timeout());
    let dispatcher = Dispatcher::new(runner, config.conversion.max_concurrent);
    convert_tree(job_source(root, config), dispatcher).await
}

/// Pull jobs from `source` one at a time and submit each to `dispatcher`,
/// then wait for all of them.
///
/// A full dispatcher blocks the pull loop, which in turn holds back the walk.
///
/// # Errors
///
/// A discovery error aborts the run after the jobs already started have
/// finished.
pub async fn convert_tree<R: ProcessRunner>(
    source: JobSource,
    mut dispatcher: Dispatcher<R>,
) -> Result<RunReport> {
    let root = source.root().to_path_buf();
    tracing::debug!(
        max_concurrent = dispatcher.max_concurrent(),
        "Starting conversion run in {}",
        root.display()
    );

    let mut jobs = source.produce_jobs();
    let mut submitted = 0usize;

    while let Some(job) = jobs.next().await {
        let job = match job {
            Ok(job) => job,
            Err(e) => {
                let running = dispatcher.in_flight();
                if running > 0 {
                    tracing::warn!("Waiting for {} running conversions before aborting", running);
                }
                dispatcher.drain().await;
                return Err(e).context("Failed to scan directory tree");
            }
        };

        tracing::info!("Converting {}", job.name());
        dispatcher.submit(job).await?;
        submitted += 1;
    }

    tracing::info!("Submitted {} conversions, waiting for running jobs", submitted);
    let summary = dispatcher.drain().await;

    Ok(RunReport { root, summary })
}

/// List the jobs a run would perform without starting any.
pub async fn plan(root: &Path, config: &Config) -> Result<Vec<JobSpec>> {
    job_source(root, config)
        .produce_jobs()
        .collect()
        .await
        .context("Failed to scan directory tree")
}
