//! Bounded-concurrency job dispatch.
//!
//! The [`Dispatcher`] owns the set of in-flight [`TrackedTask`]s. Admission
//! happens on the caller's task; jobs themselves run on the tokio runtime.
//! When the set is full, [`Dispatcher::submit`] waits for the first task to
//! finish, retires every task that has finished by then, and tries again.

mod task;

pub use task::{TaskState, TrackedTask};

use crate::runner::ProcessRunner;
use crate::source::JobSpec;
use mp3conv_common::{Error, Result};
use std::future::poll_fn;
use std::sync::Arc;
use std::task::Poll;

/// Counts of retired jobs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    pub converted: usize,
    pub failed: usize,
}

impl DispatchSummary {
    pub fn total(&self) -> usize {
        self.converted + self.failed
    }
}

pub struct Dispatcher<R: ProcessRunner> {
    runner: Arc<R>,
    max_concurrent: usize,
    in_flight: Vec<TrackedTask>,
    summary: DispatchSummary,
}

impl<R: ProcessRunner> Dispatcher<R> {
    /// Create a dispatcher running at most `max_concurrent` jobs at once.
    ///
    /// A limit of zero is raised to one.
    pub fn new(runner: R, max_concurrent: usize) -> Self {
        Self::with_runner(Arc::new(runner), max_concurrent)
    }

    /// Like [`new`](Self::new), sharing an existing runner.
    pub fn with_runner(runner: Arc<R>, max_concurrent: usize) -> Self {
        if max_concurrent == 0 {
            tracing::warn!("max_concurrent of 0 would never admit a job, using 1");
        }
        let max_concurrent = max_concurrent.max(1);
        Self {
            runner,
            max_concurrent,
            in_flight: Vec::with_capacity(max_concurrent),
            summary: DispatchSummary::default(),
        }
    }

    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    /// Number of admitted jobs not yet retired.
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Jobs retired so far.
    pub fn summary(&self) -> DispatchSummary {
        self.summary
    }

    /// Admit `job`, waiting for a free slot if all are taken.
    ///
    /// Returns once the job is started, not when it finishes. A failing job
    /// never makes this return an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Internal`] if the in-flight set ever exceeds the
    /// configured limit.
    pub async fn submit(&mut self, job: JobSpec) -> Result<()> {
        loop {
            if self.in_flight.len() < self.max_concurrent {
                tracing::debug!(
                    in_flight = self.in_flight.len(),
                    "Admitting {:?}",
                    job.source()
                );
                self.in_flight
                    .push(TrackedTask::spawn(Arc::clone(&self.runner), job));
                return self.check_capacity();
            }

            self.wait_any().await;
            let retired = self.reclaim();
            tracing::trace!(retired, "Reclaimed capacity");
        }
    }

    /// Wait for every in-flight job to finish and return the totals.
    pub async fn drain(&mut self) -> DispatchSummary {
        tracing::debug!(in_flight = self.in_flight.len(), "Draining");
        for task in &mut self.in_flight {
            task.settled().await;
        }
        self.reclaim();
        self.summary
    }

    /// Resolve once at least one in-flight task has settled.
    async fn wait_any(&mut self) {
        if self.in_flight.is_empty() {
            return;
        }

        let tasks = &mut self.in_flight;
        poll_fn(|cx| {
            // Poll every task so each one registers for wake-up.
            let mut any_settled = false;
            for task in tasks.iter_mut() {
                if task.poll_settle(cx).is_ready() {
                    any_settled = true;
                }
            }
            if any_settled {
                Poll::Ready(())
            } else {
                Poll::Pending
            }
        })
        .await;
    }

    /// Remove every settled task from the in-flight set. Returns how many.
    fn reclaim(&mut self) -> usize {
        let before = self.in_flight.len();
        let summary = &mut self.summary;

        self.in_flight.retain_mut(|task| {
            if !task.settle_now() {
                return true;
            }
            match task.state() {
                TaskState::Fulfilled(_) => summary.converted += 1,
                TaskState::Rejected(cause) => {
                    tracing::debug!("Retiring failed job {:?}: {}", task.source(), cause);
                    summary.failed += 1;
                }
                TaskState::Pending => return true,
            }
            false
        });

        before - self.in_flight.len()
    }

    fn check_capacity(&self) -> Result<()> {
        if self.in_flight.len() > self.max_concurrent {
            return Err(Error::internal(format!(
                "{} jobs in flight exceeds limit of {}",
                self.in_flight.len(),
                self.max_concurrent
            )));
        }
        Ok(())
    }
}

impl<R: ProcessRunner> Drop for Dispatcher<R> {
    fn drop(&mut self) {
        if !self.in_flight.is_empty() {
            tracing::warn!(
                "Dispatcher dropped with {} jobs still running",
                self.in_flight.len()
            );
        }
    }
}
