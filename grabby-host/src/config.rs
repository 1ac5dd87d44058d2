//! Resolved settings for one host process.

use std::path::{Path, PathBuf};
use std::time::Duration;

use grabby_core::{paths, CoreError};
use grabby_runner::RunnerConfig;

/// Where the toolchain lives and how long a conversion may run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    pub spz2ply_root: PathBuf,
    pub runner: RunnerConfig,
}

impl HostConfig {
    pub fn new(spz2ply_root: impl Into<PathBuf>) -> Self {
        Self {
            spz2ply_root: spz2ply_root.into(),
            runner: RunnerConfig::default(),
        }
    }

    /// Anchor the toolchain next to the running executable's directory.
    pub fn from_current_exe() -> Result<Self, CoreError> {
        Ok(Self::new(paths::default_spz2ply_root()?))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.runner.timeout = timeout;
        self
    }

    pub fn root(&self) -> &Path {
        &self.spz2ply_root
    }
}
