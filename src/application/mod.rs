//! Application layer: the release and clean use cases
//!
//! Services here combine domain types with the I/O boundary traits; they
//! never touch `std::fs` or `std::process` directly.

pub mod error;
pub mod error_ext;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
