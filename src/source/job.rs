use std::fmt;
use std::path::{Path, PathBuf};

/// A subprocess to run: program plus arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: PathBuf,
    args: Vec<String>,
}

impl Invocation {
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// One unit of conversion work. Identified by its source path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSpec {
    source: PathBuf,
    destination: PathBuf,
    invocation: Invocation,
}

impl JobSpec {
    pub fn new(source: PathBuf, destination: PathBuf, invocation: Invocation) -> Self {
        Self {
            source,
            destination,
            invocation,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    pub fn invocation(&self) -> &Invocation {
        &self.invocation
    }

    /// File name of the source for log lines.
    pub fn name(&self) -> String {
        self.source
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.source.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invocation_display() {
        let inv = Invocation::new("ffmpeg", vec!["-i".into(), "a.mp4".into()]);
        assert_eq!(inv.to_string(), "ffmpeg -i a.mp4");
    }

    #[test]
    fn job_name_is_file_name() {
        let job = JobSpec::new(
            PathBuf::from("/media/talks/intro.mp4"),
            PathBuf::from("/media/talks/intro.mp3"),
            Invocation::new("ffmpeg", Vec::new()),
        );
        assert_eq!(job.name(), "intro.mp4");
    }
}
