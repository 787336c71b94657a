//! Domain layer: tasks, invocations and clean targets
//!
//! Pure data and rules; nothing here reads config or touches the disk.

pub mod entities;
pub mod error;
pub mod pattern;

pub use entities::*;
pub use error::DomainError;
pub use pattern::wildcard_match;
