//! Integration tests for layered configuration feeding a session

use memtree::cli::Session;
use memtree::config::{ConfigLoader, PromptPolicy};
use memtree::error::{ApiError, FsError};
use memtree::store::JsonFileStore;
use memtree::tree::ConflictPolicy;
use std::fs;
use tempfile::TempDir;

/// An explicit config file drives the conflict policy and state path
#[test]
fn test_explicit_config_drives_session() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("memtree.toml");
    let state_path = temp_dir.path().join("snap.json");
    fs::write(
        &config_path,
        format!(
            "[state]\npath = {:?}\nsave_on_exit = \"never\"\n\n[tree]\non_conflict = \"reject\"\n",
            state_path.display().to_string()
        ),
    )
    .unwrap();

    let config = ConfigLoader::load_from_file(&config_path).unwrap();
    config.ensure_valid().unwrap();
    assert_eq!(config.state.path, state_path);
    assert_eq!(config.state.save_on_exit, PromptPolicy::Never);

    let mut session = Session::new(
        Box::new(JsonFileStore::new(config.state.path.clone())),
        config.tree.on_conflict,
    );
    session.execute_line("mkdir a").unwrap();
    session.execute_line("mkdir b").unwrap();
    session.execute_line("cd b").unwrap();
    session.execute_line("mkdir a").unwrap();
    session.execute_line("cd ~").unwrap();
    assert!(matches!(
        session.execute_line("cp a b"),
        Err(ApiError::Fs(FsError::AlreadyExists(_)))
    ));

    session.execute_line("save").unwrap();
    assert!(state_path.exists());
}

/// Bad values are reported by validation, not at use
#[test]
fn test_invalid_logging_values_fail_validation() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("bad.toml");
    fs::write(&config_path, "[logging]\nformat = \"xml\"\n").unwrap();

    let config = ConfigLoader::load_from_file(&config_path).unwrap();
    let err = config.ensure_valid().unwrap_err();
    assert!(err.to_string().contains("Invalid log format"));
}

/// Unknown policy strings are rejected when the file is read
#[test]
fn test_unknown_conflict_policy_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("bad.toml");
    fs::write(&config_path, "[tree]\non_conflict = \"merge\"\n").unwrap();
    assert!(ConfigLoader::load_from_file(&config_path).is_err());
}

#[test]
fn test_default_policy_is_overwrite() {
    assert_eq!(ConflictPolicy::default(), ConflictPolicy::Overwrite);
}
