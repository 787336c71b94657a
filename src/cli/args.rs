//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Release dispatcher for Python packages: build sdists, upload them, clean build artifacts
#[derive(Parser, Debug)]
#[command(name = "pydist")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Project directory (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,

    /// Show what would run or be removed, change nothing
    #[arg(short = 'n', long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a source distribution into dist/
    Dist,

    /// Upload every file in dist/
    Upload,

    /// Remove build/, dist/, foo.db and *.egg-info
    Clean,

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template
    Init {
        /// Create global config instead of the project one
        #[arg(short, long)]
        global: bool,
    },

    /// Show config paths
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    // https://docs.rs/clap/latest/clap/_derive/_tutorial/index.html#testing
    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn given_global_flags_after_subcommand_when_parsing_then_accepted() {
        let cli = Cli::try_parse_from(["pydist", "clean", "-n", "-vv", "-C", "/tmp/p"]).unwrap();
        assert!(matches!(cli.command, Commands::Clean));
        assert!(cli.dry_run);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.project_dir, Some(PathBuf::from("/tmp/p")));
    }

    #[test]
    fn given_no_subcommand_when_parsing_then_error() {
        assert!(Cli::try_parse_from(["pydist"]).is_err());
    }

    #[test]
    fn given_task_with_argument_when_parsing_then_rejected() {
        assert!(Cli::try_parse_from(["pydist", "dist", "extra"]).is_err());
    }
}
