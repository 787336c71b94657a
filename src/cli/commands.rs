//! Command dispatch: one handler per subcommand

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument, warn};

use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, project_config_path, Settings};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    if let Commands::Completion { shell } = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let project_dir = resolve_project_dir(cli.project_dir.as_deref())?;
    debug!("project_dir: {}", project_dir.display());

    match &cli.command {
        Commands::Dist => cmd_dist(&container(&project_dir)?, cli.dry_run),
        Commands::Upload => cmd_upload(&container(&project_dir)?, cli.dry_run),
        Commands::Clean => cmd_clean(&container(&project_dir)?, cli.dry_run),
        Commands::Config { command } => match command {
            ConfigCommands::Show => cmd_config_show(&project_dir),
            ConfigCommands::Init { global } => cmd_config_init(&project_dir, *global),
            ConfigCommands::Path => cmd_config_path(&project_dir),
        },
        Commands::Completion { .. } => Ok(()),
    }
}

fn resolve_project_dir(dir: Option<&Path>) -> CliResult<PathBuf> {
    let dir = match dir {
        Some(d) => d.to_path_buf(),
        None => std::env::current_dir()
            .map_err(|e| InfraError::io("read", Path::new("current directory"), e))?,
    };
    let canonical = dir
        .canonicalize()
        .map_err(|e| CliError::InvalidArgs(format!("project directory {}: {}", dir.display(), e)))?;
    if !canonical.is_dir() {
        return Err(CliError::InvalidArgs(format!(
            "project directory is not a directory: {}",
            dir.display()
        )));
    }
    Ok(canonical)
}

fn container(project_dir: &Path) -> CliResult<ServiceContainer> {
    let settings = Settings::load(project_dir)?;
    Ok(ServiceContainer::new(settings, project_dir))
}

/// Path relative to the project root for display.
fn display_rel(path: &Path, project_dir: &Path) -> String {
    pathdiff::diff_paths(path, project_dir)
        .unwrap_or_else(|| path.to_path_buf())
        .display()
        .to_string()
}

#[instrument(skip(services))]
fn cmd_dist(services: &ServiceContainer, dry_run: bool) -> CliResult<()> {
    let project_dir = services.project_dir();
    let release = services.release_service();

    if dry_run {
        let invocation = release.dist_invocation()?;
        output::would_run(&invocation);
        return Ok(());
    }

    release.dist()?;
    let dist_dir = display_rel(&release.dist_dir(), project_dir);
    // the tool succeeded; failing to list its output must not change that
    match release.artifacts() {
        Ok(artifacts) => output::success(&format!(
            "source distribution built ({} file(s) in {})",
            artifacts.len(),
            dist_dir
        )),
        Err(e) => {
            warn!("cmd_dist: cannot list {}: {}", dist_dir, e);
            output::success("source distribution built");
            output::warning(&format!("cannot list {}: {}", dist_dir, e));
        }
    }
    Ok(())
}

#[instrument(skip(services))]
fn cmd_upload(services: &ServiceContainer, dry_run: bool) -> CliResult<()> {
    let project_dir = services.project_dir();
    let release = services.release_service();

    if dry_run {
        let invocation = release.upload_invocation()?;
        output::would_run(&invocation);
        return Ok(());
    }

    let artifacts = release.artifacts()?;
    release.upload()?;
    output::success(&format!("uploaded {} file(s)", artifacts.len()));
    for artifact in &artifacts {
        output::artifact(&display_rel(artifact, project_dir));
    }
    Ok(())
}

#[instrument(skip(services))]
fn cmd_clean(services: &ServiceContainer, dry_run: bool) -> CliResult<()> {
    let project_dir = services.project_dir();
    let clean = services.clean_service();

    if dry_run {
        let plan = clean.plan()?;
        if plan.present.is_empty() {
            output::plain("Nothing to clean");
        }
        for path in &plan.present {
            output::would_remove(&display_rel(path, project_dir));
        }
        return Ok(());
    }

    let report = clean.clean()?;
    if report.is_noop() {
        output::plain("Nothing to clean");
    }
    for path in &report.removed {
        output::removed(&display_rel(path, project_dir));
    }
    // best-effort: a failed removal is reported but does not fail the command
    for (path, reason) in &report.failed {
        output::warning(&format!(
            "cannot remove {}: {}",
            display_rel(path, project_dir),
            reason
        ));
    }
    Ok(())
}

fn cmd_config_show(project_dir: &Path) -> CliResult<()> {
    let settings = Settings::load(project_dir)?;
    output::plain(&settings.to_toml()?);
    Ok(())
}

fn cmd_config_init(project_dir: &Path, global: bool) -> CliResult<()> {
    let path = if global {
        global_config_path().ok_or_else(|| {
            CliError::Usage("cannot determine global config directory".to_string())
        })?
    } else {
        project_config_path(project_dir)
    };

    let fs = RealFileSystem;
    if fs.exists(&path) {
        return Err(CliError::Usage(format!(
            "config already exists: {}",
            path.display()
        )));
    }

    fs.ensure_parent(&path)
        .map_err(|e| InfraError::io("create parent of", &path, e))?;
    fs.write(&path, &Settings::template())
        .map_err(|e| InfraError::io("write", &path, e))?;

    output::created(&path.display());
    Ok(())
}

fn cmd_config_path(project_dir: &Path) -> CliResult<()> {
    let fs = RealFileSystem;
    let mark = |p: &Path| if fs.exists(p) { "exists" } else { "not found" };

    output::header("Config paths");
    match global_config_path() {
        Some(p) => output::detail(&format!("global:  {} ({})", p.display(), mark(&p))),
        None => output::detail("global:  <unavailable>"),
    }
    let local = project_config_path(project_dir);
    output::detail(&format!("project: {} ({})", local.display(), mark(&local)));
    Ok(())
}
