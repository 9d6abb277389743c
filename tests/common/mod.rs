//! Shared helpers for integration tests.
//!
//! Provides [`ScriptedRunner`], a [`ProcessRunner`] whose per-job duration and
//! result are fixed up front, and which records when each job started and how
//! many ran at once.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use mp3conv::runner::{JobOutcome, ProcessRunner};
use mp3conv::source::{Invocation, JobSpec};
use tokio::time::Instant;

/// Build a job for `name` (e.g. `"j1.mp4"`) with a dummy invocation.
pub fn job(name: &str) -> JobSpec {
    let source = PathBuf::from("/media").join(name);
    let destination = source.with_extension("mp3");
    JobSpec::new(source, destination, Invocation::new("ffmpeg", Vec::new()))
}

/// Write an empty file, creating parent directories.
pub fn touch(path: &Path) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, b"").unwrap();
}

#[derive(Debug, Clone, Copy)]
struct Script {
    duration: Duration,
    succeed: bool,
}

pub struct ScriptedRunner {
    scripts: HashMap<String, Script>,
    origin: Instant,
    started: Mutex<Vec<(u128, String)>>,
    running: AtomicUsize,
    peak: AtomicUsize,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self {
            scripts: HashMap::new(),
            origin: Instant::now(),
            started: Mutex::new(Vec::new()),
            running: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }

    /// Job `name` takes `millis` and succeeds.
    pub fn ok(mut self, name: &str, millis: u64) -> Self {
        self.scripts.insert(
            name.to_string(),
            Script {
                duration: Duration::from_millis(millis),
                succeed: true,
            },
        );
        self
    }

    /// Job `name` takes `millis` and fails.
    pub fn fail(mut self, name: &str, millis: u64) -> Self {
        self.scripts.insert(
            name.to_string(),
            Script {
                duration: Duration::from_millis(millis),
                succeed: false,
            },
        );
        self
    }

    /// `(start offset in ms, job file name)`, sorted.
    pub fn starts(&self) -> Vec<(u128, String)> {
        let mut starts = self.started.lock().unwrap().clone();
        starts.sort();
        starts
    }

    /// Highest number of jobs observed running at once.
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn running(&self) -> usize {
        self.running.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProcessRunner for ScriptedRunner {
    async fn run(&self, job: JobSpec) -> JobOutcome {
        let name = job.name();
        let script = self.scripts.get(&name).copied().unwrap_or(Script {
            duration: Duration::from_millis(1),
            succeed: true,
        });

        self.started
            .lock()
            .unwrap()
            .push((self.origin.elapsed().as_millis(), name.clone()));
        let now = self.running.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        tokio::time::sleep(script.duration).await;

        self.running.fetch_sub(1, Ordering::SeqCst);

        if script.succeed {
            JobOutcome::Converted(job.destination().to_path_buf())
        } else {
            JobOutcome::Failed {
                destination: job.destination().to_path_buf(),
                cause: "exited with status 1".to_string(),
            }
        }
    }
}
