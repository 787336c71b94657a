//! Domain entities: core data structures

use std::borrow::Cow;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::process::ExitStatus;

use crate::domain::error::DomainError;
use crate::domain::pattern::{is_wildcard, wildcard_match};
use crate::exitcode;

/// Named release operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Task {
    /// Build a source distribution into the dist directory
    Dist,
    /// Publish everything in the dist directory
    Upload,
    /// Remove build artifacts
    Clean,
}

impl Task {
    pub fn name(&self) -> &'static str {
        match self {
            Task::Dist => "dist",
            Task::Upload => "upload",
            Task::Clean => "clean",
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// External command resolved for a task, ready to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub task: Task,
    pub program: String,
    pub args: Vec<String>,
    /// Working directory (the project root)
    pub cwd: PathBuf,
}

impl Invocation {
    pub fn new(
        task: Task,
        program: impl Into<String>,
        args: Vec<String>,
        cwd: impl Into<PathBuf>,
    ) -> Result<Self, DomainError> {
        let program = program.into();
        if program.trim().is_empty() {
            return Err(DomainError::EmptyProgram(task.to_string()));
        }
        Ok(Self {
            task,
            program,
            args,
            cwd: cwd.into(),
        })
    }

    /// Render as a copy-pasteable shell command line.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .map(shell_quote)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}

fn shell_quote(arg: &str) -> Cow<'_, str> {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:@%+,".contains(c));
    if plain {
        Cow::Borrowed(arg)
    } else {
        Cow::Owned(format!("'{}'", arg.replace('\'', r"'\''")))
    }
}

/// Something `clean` removes: a literal relative path or a top-level wildcard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanTarget {
    /// Literal path relative to the project root, e.g. `build` or `docs/_build`
    Path(PathBuf),
    /// Wildcard matched against entries of the project root, e.g. `*.egg-info`
    Pattern(String),
}

impl CleanTarget {
    /// Parse a configured target.
    ///
    /// Targets must stay inside the project directory: absolute paths, `..`
    /// components and the project root itself are rejected.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let invalid = |reason: &str| DomainError::InvalidCleanTarget {
            target: raw.to_string(),
            reason: reason.to_string(),
        };

        let target = raw.trim();
        if target.is_empty() {
            return Err(invalid("empty target"));
        }

        let path = Path::new(target);
        if path.is_absolute() || path.has_root() {
            return Err(invalid("must be relative to the project directory"));
        }
        if path.components().any(|c| c == Component::ParentDir) {
            return Err(invalid("must not leave the project directory"));
        }
        if path.components().all(|c| c == Component::CurDir) {
            return Err(invalid("must name an entry inside the project directory"));
        }

        if is_wildcard(target) {
            if target.contains(['/', '\\']) {
                return Err(invalid("wildcards only match top-level entries"));
            }
            return Ok(Self::Pattern(target.to_string()));
        }

        Ok(Self::Path(path.to_path_buf()))
    }

    /// Whether a top-level entry name is covered by this target.
    pub fn matches(&self, name: &str) -> bool {
        match self {
            CleanTarget::Path(path) => path.as_os_str() == name,
            CleanTarget::Pattern(pattern) => wildcard_match(pattern, name),
        }
    }
}

impl fmt::Display for CleanTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CleanTarget::Path(path) => write!(f, "{}", path.display()),
            CleanTarget::Pattern(pattern) => f.write_str(pattern),
        }
    }
}

/// What a clean run would touch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanPlan {
    /// Existing paths to remove, sorted so parents come before children
    pub present: Vec<PathBuf>,
    /// Literal targets that do not exist
    pub missing: Vec<PathBuf>,
}

/// Result of a clean run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanReport {
    /// Paths that were removed
    pub removed: Vec<PathBuf>,
    /// Literal targets that did not exist
    pub missing: Vec<PathBuf>,
    /// Paths that could not be removed, with the reason
    pub failed: Vec<(PathBuf, String)>,
}

impl CleanReport {
    /// True if nothing was there to remove.
    pub fn is_noop(&self) -> bool {
        self.removed.is_empty() && self.failed.is_empty()
    }
}

/// Exit status of an external tool, normalized to a process exit code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutcome {
    pub program: String,
    pub code: i32,
}

impl ToolOutcome {
    /// Convert an exit status using shell conventions:
    /// a signal-terminated process maps to `128 + signal`.
    pub fn from_status(program: impl Into<String>, status: &ExitStatus) -> Self {
        Self {
            program: program.into(),
            code: exit_code(status),
        }
    }

    pub fn success(&self) -> bool {
        self.code == exitcode::OK
    }
}

fn exit_code(status: &ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    exitcode::SOFTWARE
}

/// Expand `~`, `$VAR` and `${VAR}` in a path-like string.
///
/// Unknown variables leave the input unchanged.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}
