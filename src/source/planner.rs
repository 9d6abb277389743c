use super::job::{Invocation, JobSpec};
use crate::config::ConversionConfig;
use mp3conv_av::AudioSettings;
use mp3conv_common::paths::{derive_destination, has_extension};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Decides which walked entries become jobs.
///
/// An entry is a job iff it is a regular file with a source extension, its
/// destination does not exist yet, and no job for the same destination was
/// planned earlier in this traversal. The last rule tolerates walkers that
/// report an entry more than once.
#[derive(Debug)]
pub struct JobPlanner {
    source_extensions: Vec<String>,
    target_extension: String,
    audio: AudioSettings,
    ffmpeg: PathBuf,
    planned: HashSet<PathBuf>,
}

impl JobPlanner {
    pub fn new(conversion: &ConversionConfig, audio: AudioSettings, ffmpeg: PathBuf) -> Self {
        Self {
            source_extensions: conversion.source_extensions.clone(),
            target_extension: conversion.target_extension.clone(),
            audio,
            ffmpeg,
            planned: HashSet::new(),
        }
    }

    /// Plan a job for `path`, or `None` if it is not eligible.
    pub fn plan(&mut self, path: &Path, is_file: bool) -> Option<JobSpec> {
        if !is_file || !has_extension(path, &self.source_extensions) {
            return None;
        }

        let destination = derive_destination(path, &self.target_extension);

        if self.planned.contains(&destination) {
            tracing::trace!("Already planned {:?}, ignoring repeated entry", path);
            return None;
        }

        if destination.exists() {
            tracing::debug!("Skipping {:?}: {:?} already exists", path, destination);
            return None;
        }

        self.planned.insert(destination.clone());

        let invocation = Invocation::new(
            self.ffmpeg.clone(),
            self.audio.ffmpeg_args(path, &destination),
        );
        Some(JobSpec::new(path.to_path_buf(), destination, invocation))
    }

    /// Number of jobs planned so far.
    pub fn planned(&self) -> usize {
        self.planned.len()
    }
}
