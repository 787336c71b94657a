//! Release service: build the source distribution and upload it
//!
//! Both operations are a single external-process invocation run from the
//! project root. The tool's output is inherited and its exit status becomes
//! ours; nothing is retried.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{wildcard_match, Invocation, Task, ToolOutcome};
use crate::infrastructure::traits::{CommandRunner, FileSystem};

/// Runs the configured packaging and upload tools.
pub struct ReleaseService {
    fs: Arc<dyn FileSystem>,
    cmd: Arc<dyn CommandRunner>,
    settings: Arc<Settings>,
    project_dir: PathBuf,
}

impl ReleaseService {
    /// Create a new release service for a project root.
    pub fn new(
        fs: Arc<dyn FileSystem>,
        cmd: Arc<dyn CommandRunner>,
        settings: Arc<Settings>,
        project_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            fs,
            cmd,
            settings,
            project_dir: project_dir.into(),
        }
    }

    /// Absolute location of the dist directory.
    pub fn dist_dir(&self) -> PathBuf {
        self.project_dir.join(&self.settings.dist_dir)
    }

    /// Files directly under the dist directory, sorted.
    ///
    /// Selects what `dist/*` would expand to in a shell: hidden files such as
    /// `.gitkeep` are left out. A missing dist directory yields no artifacts.
    /// Subdirectories are skipped.
    pub fn artifacts(&self) -> ApplicationResult<Vec<PathBuf>> {
        let dir = self.dist_dir();
        if !self.fs.is_dir(&dir) {
            debug!("artifacts: no dist directory at {}", dir.display());
            return Ok(Vec::new());
        }

        let mut files: Vec<PathBuf> = self
            .fs
            .read_dir(&dir)
            .with_path_context("list artifacts", &dir)?
            .into_iter()
            .filter(|p| {
                p.file_name()
                    .is_some_and(|name| wildcard_match("*", &name.to_string_lossy()))
            })
            .filter(|p| self.fs.is_file(p))
            .collect();
        files.sort();

        debug!("artifacts: found {} files", files.len());
        Ok(files)
    }

    /// Command building the sdist, e.g. `python setup.py sdist`.
    pub fn dist_invocation(&self) -> ApplicationResult<Invocation> {
        let spec = &self.settings.dist;
        Ok(Invocation::new(
            Task::Dist,
            spec.program.clone(),
            spec.args.clone(),
            &self.project_dir,
        )?)
    }

    /// Command uploading every artifact, e.g. `twine upload dist/a.tar.gz`.
    ///
    /// Artifact paths are given relative to the project root, as a shell glob
    /// would produce them. With no artifacts the unexpanded `dist/*` is passed
    /// on, leaving it to the upload tool to report the failure.
    pub fn upload_invocation(&self) -> ApplicationResult<Invocation> {
        let spec = &self.settings.upload;
        let mut args = spec.args.clone();

        let artifacts = self.artifacts()?;
        if artifacts.is_empty() {
            args.push(self.settings.dist_dir.join("*").to_string_lossy().into_owned());
        } else {
            args.extend(
                artifacts
                    .iter()
                    .filter_map(|p| p.file_name())
                    .map(|name| self.settings.dist_dir.join(name).to_string_lossy().into_owned()),
            );
        }

        Ok(Invocation::new(
            Task::Upload,
            spec.program.clone(),
            args,
            &self.project_dir,
        )?)
    }

    /// Build the source distribution.
    pub fn dist(&self) -> ApplicationResult<ToolOutcome> {
        let invocation = self.dist_invocation()?;
        self.run(&invocation)
    }

    /// Upload every artifact in the dist directory.
    pub fn upload(&self) -> ApplicationResult<ToolOutcome> {
        let invocation = self.upload_invocation()?;
        self.run(&invocation)
    }

    /// Run an invocation, turning a non-zero exit into `ToolFailed`.
    #[instrument(skip(self), fields(task = %invocation.task))]
    pub fn run(&self, invocation: &Invocation) -> ApplicationResult<ToolOutcome> {
        info!("{}: {}", invocation.task, invocation);

        let status = self
            .cmd
            .status(invocation)
            .map_err(|e| spawn_error(&invocation.program, &invocation.cwd, e))?;

        let outcome = ToolOutcome::from_status(&invocation.program, &status);
        debug!("run: {} exited with {}", outcome.program, outcome.code);

        if !outcome.success() {
            return Err(ApplicationError::ToolFailed {
                tool: outcome.program,
                code: outcome.code,
            });
        }
        Ok(outcome)
    }
}

fn spawn_error(program: &str, cwd: &Path, e: io::Error) -> ApplicationError {
    match e.kind() {
        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => {
            ApplicationError::ToolUnavailable {
                tool: program.to_string(),
                source: e,
            }
        }
        _ => ApplicationError::OperationFailed {
            context: format!("run {} in {}", program, cwd.display()),
            source: Box::new(e),
        },
    }
}
