//! Test support: logging setup, a recording command runner, project scaffolding

use std::env;
use std::io;
use std::path::Path;
use std::process::ExitStatus;
use std::sync::{Mutex, Once};

use tracing::{debug, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::domain::Invocation;
use crate::infrastructure::traits::CommandRunner;

static TEST_SETUP: Once = Once::new();

pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        if env::var("RUST_LOG").is_err() {
            env::set_var("RUST_LOG", "pydist=trace");
        }
        // global logging subscriber, used by all tracing log macros
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_test_writer()
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

/// Command runner that records invocations instead of spawning processes.
#[derive(Debug)]
pub struct RecordingCommandRunner {
    exit_code: i32,
    program_missing: bool,
    calls: Mutex<Vec<Invocation>>,
}

impl RecordingCommandRunner {
    /// Every invocation "exits" with `code`.
    pub fn exiting_with(code: i32) -> Self {
        Self {
            exit_code: code,
            program_missing: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every invocation fails to spawn with `NotFound`.
    pub fn program_missing() -> Self {
        Self {
            exit_code: 0,
            program_missing: true,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Invocations seen so far, in order.
    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl CommandRunner for RecordingCommandRunner {
    fn status(&self, invocation: &Invocation) -> io::Result<ExitStatus> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(invocation.clone());
        }
        if self.program_missing {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{}: not found", invocation.program),
            ));
        }
        Ok(exit_status(self.exit_code))
    }
}

#[cfg(unix)]
fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    ExitStatus::from_raw(code << 8)
}

#[cfg(windows)]
fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    ExitStatus::from_raw(code as u32)
}

/// Create files (and their parent directories) under `root`.
///
/// Entries ending in `/` become empty directories.
pub fn scaffold(root: &Path, entries: &[&str]) -> io::Result<()> {
    for entry in entries {
        let path = root.join(entry);
        if entry.ends_with('/') {
            std::fs::create_dir_all(&path)?;
            continue;
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, entry.as_bytes())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Task;

    #[test]
    fn test_init_test_setup() {
        init_test_setup();
        init_test_setup();
    }

    #[test]
    fn given_recording_runner_when_invoked_then_records_and_returns_code() {
        let runner = RecordingCommandRunner::exiting_with(5);
        let inv = Invocation::new(Task::Dist, "python", vec!["setup.py".into()], ".").unwrap();

        let status = runner.status(&inv).unwrap();

        assert_eq!(status.code(), Some(5));
        assert_eq!(runner.calls(), vec![inv]);
    }
}
