//! Integration tests for the memtree binary in scripted mode

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn memtree(workdir: &Path, args: &[&str]) -> Output {
    let config_home = workdir.join("config-home");
    fs::create_dir_all(&config_home).unwrap();
    Command::new(env!("CARGO_BIN_EXE_memtree"))
        .current_dir(workdir)
        .env("XDG_CONFIG_HOME", &config_home)
        .env("HOME", workdir)
        .env_remove("MEMTREE_LOG")
        .env_remove("MEMTREE__STATE__PATH")
        .args(["--quiet", "--no-color"])
        .args(args)
        .output()
        .expect("failed to run memtree")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// A clean script exits zero and prints listings and file contents
#[test]
fn test_exec_success() {
    let temp_dir = TempDir::new().unwrap();
    let output = memtree(
        temp_dir.path(),
        &["exec", "mkdir a", "touch f.txt", "echo hi f.txt", "ls", "cat f.txt"],
    );
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(stdout_of(&output), "/a\n/f.txt\nhi\n");
}

/// Any failing line makes the process exit non-zero, later lines still run
#[test]
fn test_exec_failure_exit_code() {
    let temp_dir = TempDir::new().unwrap();
    let output = memtree(temp_dir.path(), &["exec", "cd nowhere", "mkdir a", "ls"]);
    assert!(!output.status.success());
    assert_eq!(stdout_of(&output), "/a\n");
    assert!(String::from_utf8_lossy(&output.stderr).contains("nowhere"));
}

/// State saved by one run is picked up by the next with --load
#[test]
fn test_exec_save_then_load_across_runs() {
    let temp_dir = TempDir::new().unwrap();
    let state = temp_dir.path().join("snap.json");
    let state_arg = state.to_str().unwrap();

    let first = memtree(
        temp_dir.path(),
        &["--state-file", state_arg, "exec", "mkdir kept", "save"],
    );
    assert!(first.status.success());
    assert!(state.exists());

    let second = memtree(
        temp_dir.path(),
        &["--state-file", state_arg, "--load", "exec", "ls"],
    );
    assert!(second.status.success());
    assert_eq!(stdout_of(&second), "/kept\n");
}

/// The workspace memtree.toml is read from the working directory
#[test]
fn test_workspace_config_sets_state_path() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("memtree.toml"),
        "[state]\npath = \"from-config.json\"\n",
    )
    .unwrap();

    let output = memtree(temp_dir.path(), &["exec", "save"]);
    assert!(output.status.success());
    assert!(temp_dir.path().join("from-config.json").exists());
    assert!(!temp_dir.path().join("filesystem_state.json").exists());
}

/// An interactive run off a terminal reads lines from stdin and never prompts
#[test]
fn test_shell_reads_piped_stdin() {
    use std::io::Write;
    use std::process::Stdio;

    let temp_dir = TempDir::new().unwrap();
    let config_home = temp_dir.path().join("config-home");
    fs::create_dir_all(&config_home).unwrap();
    let mut child = Command::new(env!("CARGO_BIN_EXE_memtree"))
        .current_dir(temp_dir.path())
        .env("XDG_CONFIG_HOME", &config_home)
        .env("HOME", temp_dir.path())
        .args(["--quiet", "--no-color", "shell"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"mkdir a\ncd a\ntouch x\nls\nexit\nmkdir never\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "/a/x\nExiting CLI...\n");
    assert!(!temp_dir.path().join("filesystem_state.json").exists());
}

/// A broken config file is fatal at startup
#[test]
fn test_invalid_config_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("bad.toml");
    fs::write(&config, "[logging]\noutput = \"syslog\"\n").unwrap();
    let output = memtree(
        temp_dir.path(),
        &["--config", config.to_str().unwrap(), "exec", "ls"],
    );
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid log output"));
}
