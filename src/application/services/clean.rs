//! Clean service: best-effort removal of build artifacts
//!
//! Literal targets are resolved against the project root, wildcard targets
//! against its top-level entries. A literal target reached through a
//! symlinked directory is skipped. Absent targets are not an error, and a
//! failed removal does not stop the remaining ones.

use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::{ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{CleanPlan, CleanReport, CleanTarget};
use crate::infrastructure::traits::FileSystem;

/// Removes configured build artifacts from a project.
pub struct CleanService {
    fs: Arc<dyn FileSystem>,
    settings: Arc<Settings>,
    project_dir: PathBuf,
}

impl CleanService {
    /// Create a new clean service for a project root.
    pub fn new(
        fs: Arc<dyn FileSystem>,
        settings: Arc<Settings>,
        project_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            fs,
            settings,
            project_dir: project_dir.into(),
        }
    }

    fn is_present(&self, path: &Path) -> bool {
        // dangling symlinks do not "exist" but still need removing
        self.fs.exists(path) || self.fs.is_symlink(path)
    }

    /// True if a directory between the project root and `rel` is a symlink.
    ///
    /// Removing `build/lib` through a symlinked `build` would delete data
    /// outside the project.
    fn crosses_symlink(&self, rel: &Path) -> bool {
        rel.ancestors()
            .skip(1)
            .filter(|a| !a.as_os_str().is_empty())
            .any(|a| self.fs.is_symlink(&self.project_dir.join(a)))
    }

    /// Resolve the configured targets against the project directory.
    pub fn plan(&self) -> ApplicationResult<CleanPlan> {
        let targets = self.settings.clean.parsed_targets()?;
        debug!("plan: {} targets in {}", targets.len(), self.project_dir.display());

        let mut present = BTreeSet::new();
        let mut missing = Vec::new();

        for target in &targets {
            if let CleanTarget::Path(rel) = target {
                if self.crosses_symlink(rel) {
                    warn!("skip {}: parent directory is a symlink", rel.display());
                    continue;
                }
                let path = self.project_dir.join(rel);
                if self.is_present(&path) {
                    present.insert(path);
                } else {
                    missing.push(path);
                }
            }
        }

        let patterns: Vec<&CleanTarget> = targets
            .iter()
            .filter(|t| matches!(t, CleanTarget::Pattern(_)))
            .collect();

        if !patterns.is_empty() {
            let entries = self
                .fs
                .read_dir(&self.project_dir)
                .with_path_context("list project directory", &self.project_dir)?;
            for entry in entries {
                let Some(name) = entry.file_name().map(|n| n.to_string_lossy()) else {
                    continue;
                };
                if patterns.iter().any(|p| p.matches(&name)) {
                    present.insert(entry);
                }
            }
        }

        Ok(CleanPlan {
            present: present.into_iter().collect(),
            missing,
        })
    }

    /// Remove everything the plan finds.
    pub fn clean(&self) -> ApplicationResult<CleanReport> {
        let plan = self.plan()?;
        let mut report = CleanReport {
            missing: plan.missing,
            ..CleanReport::default()
        };

        for path in plan.present {
            match self.fs.remove_any(&path) {
                Ok(()) => {
                    debug!("clean: removed {}", path.display());
                    report.removed.push(path);
                }
                // gone already, e.g. inside a target removed earlier
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    debug!("clean: already gone {}", path.display());
                }
                Err(e) => {
                    warn!("cannot remove {}: {}", path.display(), e);
                    report.failed.push((path, e.to_string()));
                }
            }
        }

        Ok(report)
    }
}
