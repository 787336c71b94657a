//! End-to-end tests of the pydist binary.
//!
//! External tools are replaced by small `sh` scripts through the project
//! config, so exit-code pass-through can be observed for real.
#![cfg(unix)]

use std::fs;
use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use tempfile::TempDir;

use pydist::exitcode;
use pydist::util::testing::scaffold;

/// Isolated invocation: no inherited PYDIST_* vars, no user config.
fn pydist(project: &Path, home: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("pydist");
    cmd.env_clear()
        .env("PATH", std::env::var_os("PATH").unwrap_or_default())
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("NO_COLOR", "1")
        .current_dir(project);
    cmd
}

fn write_config(project: &Path, toml: &str) {
    fs::write(project.join(".pydist.toml"), toml).unwrap();
}

fn stdout_of(assert: &assert_cmd::assert::Assert) -> String {
    String::from_utf8_lossy(&assert.get_output().stdout).to_string()
}

// ============================================================
// clean
// ============================================================

#[test]
fn given_artifacts_when_clean_twice_then_removed_and_second_run_succeeds() {
    // Arrange
    let project = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();
    scaffold(
        project.path(),
        &[
            "build/lib/x.py",
            "dist/zamia_prolog-0.1.0.tar.gz",
            "foo.db",
            "zamia_prolog.egg-info/PKG-INFO",
            "setup.py",
        ],
    )
    .unwrap();

    // Act
    let first = pydist(project.path(), home.path()).arg("clean").assert().success();
    let second = pydist(project.path(), home.path()).arg("clean").assert().success();

    // Assert
    for gone in ["build", "dist", "foo.db", "zamia_prolog.egg-info"] {
        assert!(!project.path().join(gone).exists(), "{gone} should be removed");
    }
    assert!(project.path().join("setup.py").exists());
    assert!(stdout_of(&first).contains("Removed: build"));
    assert!(stdout_of(&second).contains("Nothing to clean"));
}

#[test]
fn given_dry_run_when_clean_then_lists_but_keeps_files() {
    // Arrange
    let project = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();
    scaffold(project.path(), &["build/lib/x.py", "foo.db"]).unwrap();

    // Act
    let assert = pydist(project.path(), home.path())
        .args(["clean", "--dry-run"])
        .assert()
        .success();

    // Assert
    let out = stdout_of(&assert);
    assert!(out.contains("Would remove: build"), "stdout: {out}");
    assert!(out.contains("Would remove: foo.db"), "stdout: {out}");
    assert!(project.path().join("build/lib/x.py").exists());
    assert!(project.path().join("foo.db").exists());
}

#[test]
fn given_project_dir_flag_when_clean_then_cleans_that_directory() {
    // Arrange
    let project = TempDir::new().unwrap();
    let elsewhere = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();
    scaffold(project.path(), &["foo.db"]).unwrap();

    // Act
    pydist(elsewhere.path(), home.path())
        .arg("-C")
        .arg(project.path())
        .arg("clean")
        .assert()
        .success();

    // Assert
    assert!(!project.path().join("foo.db").exists());
}

// ============================================================
// dist
// ============================================================

#[test]
fn given_packaging_tool_succeeds_when_dist_then_exit_zero_and_archive_present() {
    // Arrange
    let project = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();
    write_config(
        project.path(),
        r#"
[dist]
program = "sh"
args = ["-c", "mkdir -p dist && echo sdist > dist/zamia_prolog-0.1.0.tar.gz"]
"#,
    );

    // Act
    let assert = pydist(project.path(), home.path()).arg("dist").assert().success();

    // Assert
    assert!(project.path().join("dist/zamia_prolog-0.1.0.tar.gz").exists());
    assert!(stdout_of(&assert).contains("1 file(s) in dist"));
}

#[test]
fn given_packaging_tool_fails_when_dist_then_its_exit_code_is_ours() {
    // Arrange
    let project = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();
    write_config(
        project.path(),
        r#"
[dist]
program = "sh"
args = ["-c", "echo 'error: no setup.py' >&2; exit 3"]
"#,
    );

    // Act / Assert
    let assert = pydist(project.path(), home.path()).arg("dist").assert().code(3);
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();
    assert!(stderr.contains("error: no setup.py"), "tool output is surfaced: {stderr}");
}

#[test]
fn given_env_override_when_dist_then_env_tool_runs() {
    // Arrange
    let project = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();

    // Act / Assert
    pydist(project.path(), home.path())
        .env("PYDIST_DIST__PROGRAM", "sh")
        .env("PYDIST_DIST__ARGS", "-c,exit 4")
        .arg("dist")
        .assert()
        .code(4);
}

#[test]
fn given_missing_tool_when_dist_then_exit_127() {
    // Arrange
    let project = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();
    write_config(
        project.path(),
        r#"
[dist]
program = "pydist-test-no-such-tool"
args = []
"#,
    );

    // Act / Assert
    pydist(project.path(), home.path())
        .arg("dist")
        .assert()
        .code(exitcode::NOTFOUND);
}

#[test]
fn given_dry_run_when_dist_then_prints_command_without_running() {
    // Arrange
    let project = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();

    // Act
    let assert = pydist(project.path(), home.path())
        .args(["-n", "dist"])
        .assert()
        .success();

    // Assert
    assert!(stdout_of(&assert).contains("Would run: python setup.py sdist"));
}

// ============================================================
// upload
// ============================================================

#[test]
fn given_artifacts_when_upload_then_tool_receives_exactly_those_files() {
    // Arrange
    let project = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();
    scaffold(
        project.path(),
        &["dist/zamia_prolog-0.1.0.tar.gz", "dist/zamia_prolog-0.1.0-py3-none-any.whl"],
    )
    .unwrap();
    write_config(
        project.path(),
        r#"
[upload]
program = "sh"
args = ["-c", 'printf "%s\n" "$@" > uploaded.txt', "twine"]
"#,
    );

    // Act
    pydist(project.path(), home.path()).arg("upload").assert().success();

    // Assert
    let uploaded = fs::read_to_string(project.path().join("uploaded.txt")).unwrap();
    assert_eq!(
        uploaded.lines().collect::<Vec<_>>(),
        vec![
            "dist/zamia_prolog-0.1.0-py3-none-any.whl",
            "dist/zamia_prolog-0.1.0.tar.gz"
        ]
    );
}

#[test]
fn given_upload_tool_fails_when_upload_then_its_exit_code_is_ours() {
    // Arrange
    let project = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();
    scaffold(project.path(), &["dist/pkg-1.0.tar.gz"]).unwrap();
    write_config(
        project.path(),
        r#"
[upload]
program = "sh"
args = ["-c", "exit 5"]
"#,
    );

    // Act / Assert
    pydist(project.path(), home.path()).arg("upload").assert().code(5);
}

#[test]
fn given_no_dist_dir_when_upload_dry_run_then_shows_unexpanded_glob() {
    // Arrange
    let project = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();

    // Act
    let assert = pydist(project.path(), home.path())
        .args(["upload", "--dry-run"])
        .assert()
        .success();

    // Assert
    assert!(stdout_of(&assert).contains("Would run: twine upload 'dist/*'"));
}

// ============================================================
// config / usage errors
// ============================================================

#[test]
fn given_config_init_twice_then_second_refuses_to_overwrite() {
    // Arrange
    let project = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();

    // Act
    pydist(project.path(), home.path())
        .args(["config", "init"])
        .assert()
        .success();
    let second = pydist(project.path(), home.path())
        .args(["config", "init"])
        .assert()
        .code(exitcode::USAGE);

    // Assert
    assert!(project.path().join(".pydist.toml").exists());
    let stderr = String::from_utf8_lossy(&second.get_output().stderr).to_string();
    assert!(stderr.contains("config already exists"), "stderr: {stderr}");
}

#[test]
fn given_project_config_when_config_show_then_prints_effective_toml() {
    // Arrange
    let project = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();
    write_config(
        project.path(),
        r#"
[upload]
program = "twine3"
"#,
    );

    // Act
    let assert = pydist(project.path(), home.path())
        .args(["config", "show"])
        .assert()
        .success();

    // Assert
    let out = stdout_of(&assert);
    assert!(out.contains(r#"program = "twine3""#), "stdout: {out}");
    assert!(out.contains(r#"program = "python""#), "stdout: {out}");
}

#[test]
fn given_broken_config_when_dist_then_config_exit_code() {
    // Arrange
    let project = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();
    write_config(project.path(), "[dist\nprogram = ");

    // Act / Assert
    pydist(project.path(), home.path())
        .arg("dist")
        .assert()
        .code(exitcode::CONFIG);
}

#[test]
fn given_nonexistent_project_dir_when_clean_then_usage_error() {
    // Arrange
    let home = TempDir::new().unwrap();
    let missing = home.path().join("no-such-project");

    // Act / Assert
    pydist(home.path(), home.path())
        .arg("-C")
        .arg(&missing)
        .arg("clean")
        .assert()
        .code(exitcode::USAGE);
}
