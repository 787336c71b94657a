//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults (`python setup.py sdist`, `twine upload`, the usual artifacts)
//! 2. Global config: `$XDG_CONFIG_HOME/pydist/pydist.toml`
//! 3. Project config: `<project_dir>/.pydist.toml`
//! 4. Environment variables: `PYDIST_*` prefix

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, Map};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::{expand_env_vars, CleanTarget, DomainError};

/// File name of the per-project config.
pub const PROJECT_CONFIG_FILE: &str = ".pydist.toml";

/// External tool: program plus fixed leading arguments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToolSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl ToolSpec {
    fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Scalars and args both REPLACE: argument order matters, so no union.
    fn merge(&self, overlay: &RawToolSpec) -> Self {
        Self {
            program: overlay
                .program
                .clone()
                .unwrap_or_else(|| self.program.clone()),
            args: overlay.args.clone().unwrap_or_else(|| self.args.clone()),
        }
    }
}

/// Artifacts removed by `clean`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CleanConfig {
    /// Relative paths or top-level wildcards (e.g. `["build", "*.egg-info"]`)
    pub targets: Vec<String>,
}

impl Default for CleanConfig {
    fn default() -> Self {
        Self {
            targets: vec![
                "build".into(),
                "dist".into(),
                "foo.db".into(),
                "*.egg-info".into(),
            ],
        }
    }
}

/// Raw tool config for intermediate parsing (fields are Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawToolSpec {
    pub program: Option<String>,
    pub args: Option<Vec<String>>,
}

/// Raw clean config for intermediate parsing.
///
/// Used during layered config merging to distinguish between:
/// - `None` → field not specified, inherit from base
/// - `Some([])` → explicit empty array
/// - `Some([...])` → explicit values to merge
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawCleanConfig {
    pub targets: Option<Vec<String>>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub dist_dir: Option<PathBuf>,
    pub dist: RawToolSpec,
    pub upload: RawToolSpec,
    pub clean: RawCleanConfig,
}

impl CleanConfig {
    /// Merge arrays with union semantics and negation support.
    ///
    /// - Items from overlay are added to base
    /// - Items prefixed with `!` remove the corresponding item from the result
    /// - Duplicates are de-duplicated
    ///
    /// # Examples
    /// ```ignore
    /// merge_array(&["build", "dist"], &["docs/_build"]) // → ["build", "dist", "docs/_build"]
    /// merge_array(&["build", "dist"], &["!dist"])       // → ["build"]
    /// ```
    pub fn merge_array(base: &[String], overlay: &[String]) -> Vec<String> {
        let mut result: HashSet<String> = base.iter().cloned().collect();

        for pattern in overlay {
            if let Some(negated) = pattern.strip_prefix('!') {
                result.remove(negated);
            } else {
                result.insert(pattern.clone());
            }
        }

        // Sorted for deterministic output
        let mut vec: Vec<String> = result.into_iter().collect();
        vec.sort();
        vec
    }

    /// Merge project config onto self: union with negation support.
    pub fn merge(&self, overlay: &RawCleanConfig) -> Self {
        Self {
            targets: overlay
                .targets
                .as_ref()
                .map(|o| Self::merge_array(&self.targets, o))
                .unwrap_or_else(|| self.targets.clone()),
        }
    }

    /// Apply global config onto defaults: a specified array REPLACES the defaults.
    pub fn apply_global(&self, global: &RawCleanConfig) -> Self {
        Self {
            targets: global
                .targets
                .clone()
                .unwrap_or_else(|| self.targets.clone()),
        }
    }

    /// Parse every configured target.
    pub fn parsed_targets(&self) -> Result<Vec<CleanTarget>, DomainError> {
        self.targets.iter().map(|t| CleanTarget::parse(t)).collect()
    }
}

/// Unified configuration for pydist.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Directory receiving built archives, relative to the project root
    pub dist_dir: PathBuf,
    /// Command building the source distribution
    pub dist: ToolSpec,
    /// Command publishing the archives; the archive paths are appended
    pub upload: ToolSpec,
    /// Artifacts removed by `clean`
    pub clean: CleanConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dist_dir: PathBuf::from("dist"),
            dist: ToolSpec::new("python", &["setup.py", "sdist"]),
            upload: ToolSpec::new("twine", &["upload"]),
            clean: CleanConfig::default(),
        }
    }
}

/// Get the XDG config directory for pydist.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "pydist").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("pydist.toml"))
}

/// Get the path to the config file of a project.
pub fn project_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(PROJECT_CONFIG_FILE)
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Expand shell variables and tilde in path-like fields.
    ///
    /// Handles `~`, `$VAR`, and `${VAR}` syntax.
    fn expand_paths(&mut self) {
        let expanded = expand_env_vars(self.dist_dir.to_string_lossy().as_ref());
        self.dist_dir = PathBuf::from(expanded);

        // Programs may be given as paths like ~/.venv/bin/twine
        self.dist.program = expand_env_vars(&self.dist.program);
        self.upload.program = expand_env_vars(&self.upload.program);
    }

    /// Merge project config onto self (base) with union semantics for clean targets.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            dist_dir: overlay
                .dist_dir
                .clone()
                .unwrap_or_else(|| self.dist_dir.clone()),
            dist: self.dist.merge(&overlay.dist),
            upload: self.upload.merge(&overlay.upload),
            clean: self.clean.merge(&overlay.clean),
        }
    }

    /// Apply global config onto defaults with REPLACE semantics for clean targets.
    fn apply_global(&self, global: &RawSettings) -> Self {
        Self {
            dist_dir: global
                .dist_dir
                .clone()
                .unwrap_or_else(|| self.dist_dir.clone()),
            dist: self.dist.merge(&global.dist),
            upload: self.upload.merge(&global.upload),
            clean: self.clean.apply_global(&global.clean),
        }
    }

    /// Load settings for a project with layered precedence.
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/pydist/pydist.toml` (clean targets REPLACE defaults)
    /// 3. Project config: `<project_dir>/.pydist.toml` (clean targets UNION with global)
    /// 4. Environment variables: `PYDIST_*` prefix (REPLACES - explicit override)
    pub fn load(project_dir: &Path) -> Result<Self, ApplicationError> {
        Self::load_from(global_config_path().as_deref(), Some(project_dir), None)
    }

    /// Load settings from explicit sources.
    ///
    /// `env` replaces the process environment as the source of `PYDIST_*`
    /// variables when given.
    pub fn load_from(
        global_path: Option<&Path>,
        project_dir: Option<&Path>,
        env: Option<Map<String, String>>,
    ) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_path {
            if global_path.exists() {
                debug!("load_from: global config {}", global_path.display());
                let raw = load_raw_settings(global_path)?;
                current = current.apply_global(&raw);
            }
        }

        if let Some(project) = project_dir {
            let local_path = project_config_path(project);
            if local_path.exists() {
                debug!("load_from: project config {}", local_path.display());
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current, env)?;

        current.expand_paths();

        Ok(current)
    }

    /// Apply PYDIST_* environment variables as explicit overrides.
    ///
    /// Lists are comma separated: `PYDIST_CLEAN__TARGETS=build,dist`.
    fn apply_env_overrides(
        mut settings: Self,
        env: Option<Map<String, String>>,
    ) -> Result<Self, ApplicationError> {
        let environment = Environment::with_prefix("PYDIST")
            .prefix_separator("_")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("clean.targets")
            .with_list_parse_key("dist.args")
            .with_list_parse_key("upload.args")
            .try_parsing(true)
            .source(env);

        let config = Config::builder()
            .add_source(environment)
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("dist_dir") {
            settings.dist_dir = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("dist.program") {
            settings.dist.program = val;
        }
        if let Ok(val) = config.get::<Vec<String>>("dist.args") {
            settings.dist.args = non_empty(val);
        }
        if let Ok(val) = config.get_string("upload.program") {
            settings.upload.program = val;
        }
        if let Ok(val) = config.get::<Vec<String>>("upload.args") {
            settings.upload.args = non_empty(val);
        }
        if let Ok(val) = config.get::<Vec<String>>("clean.targets") {
            settings.clean.targets = non_empty(val);
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# pydist configuration
#
# Locations (by precedence, lowest to highest):
#   Global:  ~/.config/pydist/pydist.toml  (defines your baseline)
#   Project: <project>/.pydist.toml        (project-specific additions)
#   Env:     PYDIST_* environment variables (explicit overrides)
#            e.g. PYDIST_DIST__PROGRAM=python3 PYDIST_CLEAN__TARGETS=build,dist
#
# Clean target merge semantics:
#   Global config REPLACES compiled defaults.
#   Project config UNIONS with global; "!target" removes an inherited target:
#     targets = ["docs/_build", "!foo.db"]

# Directory receiving built archives
# dist_dir = "dist"

[dist]
# program = "python"
# args = ["setup.py", "sdist"]

[upload]
# Every file in dist_dir is appended to these arguments
# program = "twine"
# args = ["upload"]

[clean]
# Relative paths, or wildcards matched against top-level entries
# targets = ["build", "dist", "foo.db", "*.egg-info"]
"#
        .to_string()
    }
}

fn non_empty(values: Vec<String>) -> Vec<String> {
    values.into_iter().filter(|v| !v.trim().is_empty()).collect()
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
