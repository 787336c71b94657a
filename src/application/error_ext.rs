//! `io::Result` adapters for the services

use std::io;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

/// Attach what was being done, and to which path, to a bare I/O error.
///
/// ```ignore
/// let entries = fs.read_dir(&dist_dir).with_path_context("list artifacts", &dist_dir)?;
/// // error: "list artifacts: /project/dist: Permission denied (os error 13)"
/// ```
pub trait IoResultExt<T> {
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|source| ApplicationError::OperationFailed {
            context: format!("{action}: {}", path.display()),
            source: Box::new(source),
        })
    }
}
