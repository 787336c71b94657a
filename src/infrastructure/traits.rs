//! I/O boundaries of the release services
//!
//! Services only touch the disk and spawn processes through these traits,
//! so tests can swap in a recording runner or a scratch directory.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use crate::domain::Invocation;

/// Filesystem operations needed to inspect and clean a project.
pub trait FileSystem: Send + Sync {
    /// Write `content` to `path`, replacing an existing file.
    fn write(&self, path: &Path, content: &str) -> io::Result<()>;

    /// True if `path` resolves to something (symlinks are followed).
    fn exists(&self, path: &Path) -> bool;

    fn is_file(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    /// True for any symlink, including one whose target is gone.
    fn is_symlink(&self, path: &Path) -> bool;

    /// Direct entries of a directory, unsorted.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>>;

    /// Remove a file, a symlink or a whole directory tree.
    ///
    /// A symlink is unlinked, never followed: cleaning a project must not
    /// delete whatever the link points at.
    fn remove_any(&self, path: &Path) -> io::Result<()>;

    /// Create the parent directories of `path` if missing.
    fn ensure_parent(&self, path: &Path) -> io::Result<()>;
}

/// Spawns an external tool and waits for it.
pub trait CommandRunner: Send + Sync {
    /// Run with stdin, stdout and stderr inherited from pydist.
    fn status(&self, invocation: &Invocation) -> io::Result<ExitStatus>;
}

/// `std::fs` backed filesystem.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        std::fs::write(path, content)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_symlink(&self, path: &Path) -> bool {
        path.symlink_metadata()
            .map(|m| m.file_type().is_symlink())
            .unwrap_or(false)
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        std::fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.path()))
            .collect()
    }

    fn remove_any(&self, path: &Path) -> io::Result<()> {
        // lstat: a symlink to a directory is unlinked, not descended
        if std::fs::symlink_metadata(path)?.is_dir() {
            std::fs::remove_dir_all(path)
        } else {
            std::fs::remove_file(path)
        }
    }

    fn ensure_parent(&self, path: &Path) -> io::Result<()> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
            _ => Ok(()),
        }
    }
}

/// `std::process` backed runner.
#[derive(Debug, Default)]
pub struct RealCommandRunner;

impl CommandRunner for RealCommandRunner {
    fn status(&self, invocation: &Invocation) -> io::Result<ExitStatus> {
        Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.cwd)
            .status()
    }
}
