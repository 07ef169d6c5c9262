//! Integration tests for the shell session: parsing, routing, rendering

use memtree::cli::{render, run_script, CommandOutput, Session, ShellOptions};
use memtree::config::PromptPolicy;
use memtree::error::{ApiError, FsError};
use memtree::store::JsonFileStore;
use memtree::tree::ConflictPolicy;
use tempfile::TempDir;

fn session_in(dir: &TempDir, policy: ConflictPolicy) -> Session {
    Session::new(
        Box::new(JsonFileStore::new(dir.path().join("state.json"))),
        policy,
    )
}

fn render_line(session: &mut Session, line: &str) -> Option<String> {
    render(&session.execute_line(line).unwrap(), false)
}

/// The quoted escape in an echo line becomes a real newline
#[test]
fn test_echo_with_escaped_newline_then_grep() {
    let dir = TempDir::new().unwrap();
    let mut session = session_in(&dir, ConflictPolicy::Overwrite);
    session.execute_line("touch log.txt").unwrap();
    session
        .execute_line(r#"echo "alpha\nbeta" log.txt"#)
        .unwrap();
    assert_eq!(
        render_line(&mut session, "grep alpha log.txt").as_deref(),
        Some("alpha")
    );
    assert_eq!(render_line(&mut session, "grep zeta log.txt"), None);
}

/// cat on a directory renders each entry with its header
#[test]
fn test_cat_directory_rendering() {
    let dir = TempDir::new().unwrap();
    let mut session = session_in(&dir, ConflictPolicy::Overwrite);
    session.execute_line("mkdir d").unwrap();
    session.execute_line("echo one d/a.txt").unwrap();
    assert_eq!(
        render_line(&mut session, "cat d").as_deref(),
        Some("\nContents of /d/a.txt:\n\none")
    );
}

/// Under the reject policy a name collision on mv is an error
#[test]
fn test_reject_policy_from_session() {
    let dir = TempDir::new().unwrap();
    let mut session = session_in(&dir, ConflictPolicy::Reject);
    session.execute_line("mkdir a").unwrap();
    session.execute_line("mkdir b").unwrap();
    session.execute_line("echo first a/f").unwrap();
    session.execute_line("echo second b/f").unwrap();

    let err = session.execute_line("mv a/f b").unwrap_err();
    assert!(matches!(err, ApiError::Fs(FsError::AlreadyExists(_))));
    assert_eq!(
        render_line(&mut session, "cat b/f").as_deref(),
        Some("second")
    );
}

/// Under the overwrite policy the destination entry is replaced
#[test]
fn test_overwrite_policy_from_session() {
    let dir = TempDir::new().unwrap();
    let mut session = session_in(&dir, ConflictPolicy::Overwrite);
    session.execute_line("mkdir a").unwrap();
    session.execute_line("mkdir b").unwrap();
    session.execute_line("echo first a/f").unwrap();
    session.execute_line("echo second b/f").unwrap();

    session.execute_line("mv a/f b").unwrap();
    assert_eq!(render_line(&mut session, "cat b/f").as_deref(), Some("first"));
    assert_eq!(render_line(&mut session, "ls a"), None);
    session.tree().verify().unwrap();
}

/// Removing the directory the session is in is refused
#[test]
fn test_rm_current_directory_is_protected() {
    let dir = TempDir::new().unwrap();
    let mut session = session_in(&dir, ConflictPolicy::Overwrite);
    session.execute_line("mkdir a").unwrap();
    session.execute_line("cd a").unwrap();
    assert!(matches!(
        session.execute_line("rm ~/a"),
        Err(ApiError::Fs(FsError::ProtectedNode(_)))
    ));
    assert!(matches!(
        session.execute_line("rm ~"),
        Err(ApiError::Fs(FsError::ProtectedNode(_)))
    ));
    assert_eq!(session.prompt_path(), "/a");
}

/// A script saved by one session is visible to the next through load
#[test]
fn test_script_save_and_reload() {
    let dir = TempDir::new().unwrap();
    let lines: Vec<String> = ["mkdir a", "echo hi a/f", "save"]
        .iter()
        .map(|l| l.to_string())
        .collect();
    let mut first = session_in(&dir, ConflictPolicy::Overwrite);
    let mut out = Vec::new();
    let mut err = Vec::new();
    let failures = run_script(
        &mut first,
        &lines,
        ShellOptions {
            color: false,
            load_on_start: PromptPolicy::Never,
            save_on_exit: PromptPolicy::Never,
        },
        &mut out,
        &mut err,
    )
    .unwrap();
    assert_eq!(failures, 0);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "File system state saved successfully.\n"
    );

    let mut second = session_in(&dir, ConflictPolicy::Overwrite);
    assert_eq!(
        second.execute_line("load").unwrap(),
        CommandOutput::Message("File system state loaded successfully.".to_string())
    );
    assert_eq!(render_line(&mut second, "cat a/f").as_deref(), Some("hi"));
}

/// cat of an empty file prints one blank line
#[test]
fn test_cat_of_empty_file_prints_blank_line() {
    let dir = TempDir::new().unwrap();
    let mut session = session_in(&dir, ConflictPolicy::Overwrite);
    session.execute_line("touch empty.txt").unwrap();
    assert_eq!(render_line(&mut session, "cat empty.txt").as_deref(), Some(""));

    let options = ShellOptions {
        color: false,
        load_on_start: PromptPolicy::Never,
        save_on_exit: PromptPolicy::Never,
    };
    let lines = vec!["cat empty.txt".to_string()];
    let mut out = Vec::new();
    let mut err = Vec::new();
    let failures = run_script(&mut session, &lines, options, &mut out, &mut err).unwrap();
    assert_eq!(failures, 0);
    assert_eq!(String::from_utf8(out).unwrap(), "\n");
}
