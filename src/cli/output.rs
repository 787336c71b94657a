//! Terminal output formatting with colors
//!
//! Status goes to stdout, problems to stderr. Tool output is never
//! routed through here; external tools write straight to the terminal.
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use std::fmt::Display;

use colored::Colorize;

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "warning:" prefix) to stderr
pub fn warning(msg: &(impl Display + ?Sized)) {
    eprintln!("{}: {}", "warning".yellow(), msg);
}

/// Print finished task (green checkmark)
pub fn success(msg: &(impl Display + ?Sized)) {
    println!("{} {}", "✓".green(), msg);
}

/// Print one artifact under a finished task
pub fn artifact(path: &(impl Display + ?Sized)) {
    println!("  {} {}", "✓".green(), path);
}

/// Print a removed path
pub fn removed(path: &(impl Display + ?Sized)) {
    println!("{}: {}", "Removed".green(), path);
}

/// Print a path a dry run would remove
pub fn would_remove(path: &(impl Display + ?Sized)) {
    println!("{}: {}", "Would remove".cyan(), path);
}

/// Print the command line a dry run would execute
pub fn would_run(command_line: &(impl Display + ?Sized)) {
    println!("{}: {}", "Would run".cyan(), command_line);
}

/// Print a created file
pub fn created(path: &(impl Display + ?Sized)) {
    println!("{}: {}", "Created".green(), path);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print indented detail (no color)
pub fn detail(msg: &(impl Display + ?Sized)) {
    println!("  {}", msg);
}

/// Print plain output (no color, for data such as rendered config)
pub fn plain(msg: &(impl Display + ?Sized)) {
    println!("{}", msg);
}
