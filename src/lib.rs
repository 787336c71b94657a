//! pydist: release dispatcher for Python packages
//!
//! Layers, innermost first:
//! - [`domain`]: tasks, invocations, clean targets (no I/O)
//! - [`application`]: release and clean services
//! - [`infrastructure`]: filesystem/process boundaries and wiring
//! - [`cli`]: argument parsing, dispatch, exit codes

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
