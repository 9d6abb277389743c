use crate::runner::{JobOutcome, ProcessRunner};
use crate::source::JobSpec;
use std::future::{poll_fn, Future};
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::task::JoinHandle;

/// Completion state of a [`TrackedTask`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskState {
    Pending,
    /// Converted; holds the destination path.
    Fulfilled(PathBuf),
    /// Failed; holds the cause.
    Rejected(String),
}

impl TaskState {
    pub fn is_settled(&self) -> bool {
        !matches!(self, TaskState::Pending)
    }
}

/// A spawned job whose completion can be queried.
///
/// State only moves from `Pending` to a terminal state, and only when the
/// owner polls or queries it.
pub struct TrackedTask {
    source: PathBuf,
    handle: JoinHandle<JobOutcome>,
    state: TaskState,
}

impl TrackedTask {
    /// Start `job` on the runtime.
    pub fn spawn<R: ProcessRunner>(runner: Arc<R>, job: JobSpec) -> Self {
        let source = job.source().to_path_buf();
        let handle = tokio::spawn(async move { runner.run(job).await });
        Self {
            source,
            handle,
            state: TaskState::Pending,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn state(&self) -> &TaskState {
        &self.state
    }

    /// Poll the underlying task, recording its terminal state once it ends.
    pub fn poll_settle(&mut self, cx: &mut Context<'_>) -> Poll<()> {
        if self.state.is_settled() {
            return Poll::Ready(());
        }

        match Pin::new(&mut self.handle).poll(cx) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(result) => {
                self.state = match result {
                    Ok(JobOutcome::Converted(destination)) => TaskState::Fulfilled(destination),
                    Ok(JobOutcome::Failed { cause, .. }) => TaskState::Rejected(cause),
                    Err(e) => TaskState::Rejected(format!("job task failed: {e}")),
                };
                Poll::Ready(())
            }
        }
    }

    /// Non-blocking query: record the outcome if the task already finished.
    pub fn settle_now(&mut self) -> bool {
        if self.state.is_settled() {
            return true;
        }
        if !self.handle.is_finished() {
            return false;
        }
        let mut cx = Context::from_waker(futures::task::noop_waker_ref());
        self.poll_settle(&mut cx).is_ready()
    }

    /// Wait until the task reaches a terminal state.
    pub async fn settled(&mut self) -> &TaskState {
        poll_fn(|cx| self.poll_settle(cx)).await;
        &self.state
    }
}

impl std::fmt::Debug for TrackedTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackedTask")
            .field("source", &self.source)
            .field("state", &self.state)
            .finish()
    }
}
