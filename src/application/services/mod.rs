//! One service per task family
//!
//! [`ReleaseService`] covers `dist` and `upload`, [`CleanService`] covers `clean`.

mod clean;
mod release;

pub use clean::CleanService;
pub use release::ReleaseService;
