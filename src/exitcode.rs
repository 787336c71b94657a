//! Standard exit codes (BSD sysexits.h compatible)
//!
//! A failing external tool's own exit code is passed through as-is;
//! these codes cover failures of pydist itself.

/// Successful termination
pub const OK: i32 = 0;

/// Command line usage error
pub const USAGE: i32 = 64;

/// Internal software error
pub const SOFTWARE: i32 = 70;

/// System error (e.g., can't fork)
pub const OSERR: i32 = 71;

/// Input/output error
pub const IOERR: i32 = 74;

/// Configuration error
pub const CONFIG: i32 = 78;

/// Command found but not executable (shell convention)
pub const NOEXEC: i32 = 126;

/// Command not found (shell convention)
pub const NOTFOUND: i32 = 127;
