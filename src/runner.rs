//! Execution of a single job.

use crate::source::JobSpec;
use async_trait::async_trait;
use mp3conv_av::ToolCommand;
use std::path::PathBuf;
use std::time::Duration;

/// Terminal result of one job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    /// The destination file was written.
    Converted(PathBuf),
    /// The job failed. The destination may or may not exist.
    Failed { destination: PathBuf, cause: String },
}

impl JobOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, JobOutcome::Converted(_))
    }
}

/// Runs a job to exactly one terminal outcome.
///
/// Implementations must not panic on job failure: start errors and non-zero
/// exits are reported as [`JobOutcome::Failed`].
#[async_trait]
pub trait ProcessRunner: Send + Sync + 'static {
    async fn run(&self, job: JobSpec) -> JobOutcome;
}

/// Runs a job's invocation as a subprocess with piped, drained output.
#[derive(Debug, Clone, Default)]
pub struct CommandRunner {
    timeout: Option<Duration>,
}

impl CommandRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl ProcessRunner for CommandRunner {
    async fn run(&self, job: JobSpec) -> JobOutcome {
        let invocation = job.invocation();
        tracing::debug!("Running {}", invocation);

        let result = ToolCommand::new(invocation.program().to_path_buf())
            .args(invocation.args().iter().cloned())
            .timeout(self.timeout)
            .execute()
            .await;

        match result {
            Ok(_) => {
                tracing::info!("Created audio file {}", job.destination().display());
                JobOutcome::Converted(job.destination().to_path_buf())
            }
            Err(e) => {
                tracing::error!("Error converting file {}: {}", job.name(), e);
                JobOutcome::Failed {
                    destination: job.destination().to_path_buf(),
                    cause: e.to_string(),
                }
            }
        }
    }
}
