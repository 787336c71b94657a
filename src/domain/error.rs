//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent invalid task definitions.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid clean target '{target}': {reason}")]
    InvalidCleanTarget { target: String, reason: String },

    #[error("no program configured for {0}")]
    EmptyProgram(String),
}
