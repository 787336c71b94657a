//! Infrastructure layer: real filesystem and process access, service wiring

pub mod di;
pub mod error;
pub mod traits;

pub use error::InfraError;
