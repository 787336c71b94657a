//! Errors raised while talking to the outside world directly from the CLI

use std::io;
use std::path::Path;

use thiserror::Error;

use crate::application::ApplicationError;

/// Service failures plus raw I/O done outside the services (e.g. `config init`).
#[derive(Error, Debug)]
pub enum InfraError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("cannot {action} {path}: {source}")]
    Io {
        action: String,
        path: String,
        #[source]
        source: io::Error,
    },
}

impl InfraError {
    pub fn io(action: impl Into<String>, path: &Path, source: io::Error) -> Self {
        Self::Io {
            action: action.into(),
            path: path.display().to_string(),
            source,
        }
    }
}
