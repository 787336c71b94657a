//! Top-level CLI errors and their exit codes

use std::io;

use thiserror::Error;

use crate::application::ApplicationError;
use crate::infrastructure::InfraError;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("{0}")]
    Usage(String),
}

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    ///
    /// A failed external tool's exit code is passed through unchanged.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) | CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Infra(e) => match e {
                InfraError::Io { .. } => crate::exitcode::IOERR,
                InfraError::Application(app) => match app {
                    ApplicationError::ToolFailed { code, .. } => *code,
                    ApplicationError::ToolUnavailable { source, .. } => match source.kind() {
                        io::ErrorKind::NotFound => crate::exitcode::NOTFOUND,
                        io::ErrorKind::PermissionDenied => crate::exitcode::NOEXEC,
                        _ => crate::exitcode::OSERR,
                    },
                    ApplicationError::Config { .. } | ApplicationError::Domain(_) => {
                        crate::exitcode::CONFIG
                    }
                    ApplicationError::OperationFailed { .. } => crate::exitcode::IOERR,
                },
            },
        }
    }
}
