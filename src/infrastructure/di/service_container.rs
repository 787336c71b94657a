//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::application::services::{CleanService, ReleaseService};
use crate::config::Settings;
use crate::infrastructure::traits::{CommandRunner, FileSystem, RealCommandRunner, RealFileSystem};

/// Container holding the settings, I/O boundaries and project root
/// that every service is built from.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Command runner abstraction
    pub cmd: Arc<dyn CommandRunner>,

    project_dir: PathBuf,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings, project_dir: impl Into<PathBuf>) -> Self {
        Self::with_deps(
            settings,
            project_dir,
            Arc::new(RealFileSystem),
            Arc::new(RealCommandRunner),
        )
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        project_dir: impl Into<PathBuf>,
        fs: Arc<dyn FileSystem>,
        cmd: Arc<dyn CommandRunner>,
    ) -> Self {
        Self {
            settings: Arc::new(settings),
            fs,
            cmd,
            project_dir: project_dir.into(),
        }
    }

    /// Project root all services operate on.
    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    pub fn release_service(&self) -> ReleaseService {
        ReleaseService::new(
            Arc::clone(&self.fs),
            Arc::clone(&self.cmd),
            Arc::clone(&self.settings),
            &self.project_dir,
        )
    }

    pub fn clean_service(&self) -> CleanService {
        CleanService::new(
            Arc::clone(&self.fs),
            Arc::clone(&self.settings),
            &self.project_dir,
        )
    }
}
