//! Job discovery.
//!
//! [`JobSource`] walks a directory tree on a blocking thread and hands
//! [`JobSpec`]s to the consumer through a bounded channel. The walker only
//! gets ahead of the consumer by the channel capacity, so pulling slowly
//! slows the walk down.

mod job;
mod planner;

pub use job::{Invocation, JobSpec};
pub use planner::JobPlanner;

use crate::config::ConversionConfig;
use mp3conv_av::AudioSettings;
use mp3conv_common::{Error, Result};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use walkdir::WalkDir;

/// Produces the conversion jobs for one directory tree.
pub struct JobSource {
    root: PathBuf,
    follow_links: bool,
    capacity: usize,
    planner: JobPlanner,
}

impl JobSource {
    pub fn new(
        root: impl Into<PathBuf>,
        conversion: &ConversionConfig,
        audio: AudioSettings,
        ffmpeg: PathBuf,
    ) -> Self {
        Self {
            root: root.into(),
            follow_links: conversion.follow_links,
            capacity: conversion.channel_capacity.max(1),
            planner: JobPlanner::new(conversion, audio, ffmpeg),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Start the traversal and return the stream of jobs it finds.
    ///
    /// Must be called from within a tokio runtime. The source is consumed:
    /// a second traversal needs a new `JobSource`, with fresh dedup state.
    pub fn produce_jobs(self) -> JobStream {
        let (tx, rx) = mpsc::channel(self.capacity);
        let walker = tokio::task::spawn_blocking(move || self.walk(tx));
        JobStream {
            rx,
            walker: Some(walker),
        }
    }

    fn walk(mut self, tx: mpsc::Sender<Result<JobSpec>>) {
        let walker = WalkDir::new(&self.root)
            .min_depth(1)
            .follow_links(self.follow_links);

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| self.root.clone());
                    tracing::error!(path = %path.display(), error = %err, "Error walking directory");
                    let _ = tx.blocking_send(Err(Error::walk(path, err.to_string())));
                    return;
                }
            };

            let file_type = entry.file_type();
            if file_type.is_dir() {
                tracing::info!("Process directory {}", entry.path().display());
                continue;
            }

            if let Some(job) = self.planner.plan(entry.path(), file_type.is_file()) {
                tracing::debug!("Discovered {:?}", job.source());
                if tx.blocking_send(Ok(job)).is_err() {
                    tracing::debug!("Job stream dropped, stopping walk");
                    return;
                }
            }
        }

        tracing::debug!(
            root = %self.root.display(),
            jobs = self.planner.planned(),
            "Directory walk finished"
        );
    }
}

/// Lazy, finite sequence of jobs from one traversal.
///
/// A discovery error is yielded as an `Err` item and ends the sequence.
/// Dropping the stream stops the walk.
pub struct JobStream {
    rx: mpsc::Receiver<Result<JobSpec>>,
    walker: Option<JoinHandle<()>>,
}

impl JobStream {
    /// Pull the next job, waiting for the walker if necessary.
    pub async fn next(&mut self) -> Option<Result<JobSpec>> {
        if let Some(item) = self.rx.recv().await {
            return Some(item);
        }

        // Channel closed: the walk ended. Surface a walker panic once.
        let walker = self.walker.take()?;
        match walker.await {
            Ok(()) => None,
            Err(e) => Some(Err(Error::internal(format!(
                "directory walker failed: {e}"
            )))),
        }
    }

    /// Stop the walk and wait for the walker thread to exit.
    ///
    /// Jobs still buffered in the channel are discarded.
    pub async fn close(mut self) -> Result<()> {
        self.rx.close();
        match self.walker.take() {
            Some(walker) => walker
                .await
                .map_err(|e| Error::internal(format!("directory walker failed: {e}"))),
            None => Ok(()),
        }
    }

    /// Drain the stream into a vector, stopping at the first error.
    pub async fn collect(mut self) -> Result<Vec<JobSpec>> {
        let mut jobs = Vec::new();
        while let Some(job) = self.next().await {
            jobs.push(job?);
        }
        Ok(jobs)
    }
}
