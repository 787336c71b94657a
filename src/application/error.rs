//! Errors of the release and clean services

use thiserror::Error;

use crate::domain::DomainError;

#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Unreadable or invalid settings from any config layer.
    #[error("config error: {message}")]
    Config { message: String },

    /// The external tool ran and exited non-zero; `code` is passed through.
    #[error("{tool} exited with status {code}")]
    ToolFailed { tool: String, code: i32 },

    /// The external tool could not be started at all.
    #[error("cannot run {tool}: {source}")]
    ToolUnavailable {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{context}: {source}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

pub type ApplicationResult<T> = Result<T, ApplicationError>;
