//! End-to-end command scenarios against a fresh tree

use memtree::error::FsError;
use memtree::store::codec;
use memtree::tree::{NodeKind, Tree};

fn names(tree: &Tree, path: Option<&str>) -> Vec<String> {
    tree.ls(path)
        .unwrap()
        .into_iter()
        .map(|entry| entry.name)
        .collect()
}

/// A second mkdir with the same name fails and leaves one entry
#[test]
fn test_duplicate_mkdir_reports_already_exists() {
    let mut tree = Tree::new();
    tree.mkdir("a").unwrap();
    assert_eq!(tree.mkdir("a"), Err(FsError::AlreadyExists("a".to_string())));
    assert_eq!(names(&tree, None), vec!["a"]);
}

/// echo writes content plus newline and cat reads it back
#[test]
fn test_touch_echo_cat() {
    let mut tree = Tree::new();
    tree.touch("f.txt").unwrap();
    tree.echo("hi", "f.txt").unwrap();
    assert_eq!(tree.cat("f.txt").unwrap(), "hi\n");
}

/// A moved file disappears from its old directory and is readable in the new one
#[test]
fn test_move_file_into_directory() {
    let mut tree = Tree::new();
    tree.mkdir("a").unwrap();
    tree.touch("f.txt").unwrap();
    tree.mv("f.txt", "a").unwrap();

    assert_eq!(names(&tree, None), vec!["a"]);
    assert_eq!(tree.cat("a/f.txt").unwrap(), "");
    tree.verify().unwrap();
}

/// Moving a directory into its own child fails without changing anything
#[test]
fn test_move_into_own_subtree_is_rejected() {
    let mut tree = Tree::new();
    tree.mkdir("a").unwrap();
    tree.cd("a").unwrap();
    tree.mkdir("b").unwrap();
    tree.cd("~").unwrap();

    let before = codec::to_json(&tree).unwrap();
    assert!(matches!(tree.mv("a", "a/b"), Err(FsError::InvalidDestination(_))));
    assert_eq!(codec::to_json(&tree).unwrap(), before);
    assert_eq!(tree.pwd(), "/");
}

/// grep returns only matching lines
#[test]
fn test_grep_multiline_file() {
    let mut tree = Tree::new();
    tree.touch("log.txt").unwrap();
    tree.echo("alpha\nbeta", "log.txt").unwrap();
    assert_eq!(tree.grep("alpha", "log.txt").unwrap(), vec!["alpha"]);
}

/// Relative navigation with `..` and `~` through a nested tree
#[test]
fn test_navigation_round_trip() {
    let mut tree = Tree::new();
    tree.mkdir("a").unwrap();
    tree.cd("a").unwrap();
    tree.mkdir("b").unwrap();
    tree.cd("b").unwrap();
    assert_eq!(tree.pwd(), "/a/b");
    tree.cd("../..").unwrap();
    assert_eq!(tree.pwd(), "/");
    tree.cd("a/b/..").unwrap();
    assert_eq!(tree.pwd(), "/a");
    tree.cd("~/a/b").unwrap();
    assert_eq!(tree.pwd(), "/a/b");
    // `..` at the root stays at the root.
    tree.cd("~/..").unwrap();
    assert_eq!(tree.pwd(), "/");
    assert!(matches!(tree.cd("a/missing"), Err(FsError::NotFound(_))));
}

/// Removing a directory releases its whole subtree
#[test]
fn test_rm_directory_releases_subtree() {
    let mut tree = Tree::new();
    tree.mkdir("a").unwrap();
    tree.echo("x", "a/one.txt").unwrap();
    tree.echo("y", "a/two.txt").unwrap();
    assert_eq!(tree.len(), 4);

    tree.rm("a").unwrap();
    assert_eq!(tree.len(), 1);
    assert!(tree.ls(None).unwrap().is_empty());
}

/// Removing a file outside the current directory goes through its own parent
#[test]
fn test_rm_file_outside_current_directory() {
    let mut tree = Tree::new();
    tree.mkdir("a").unwrap();
    tree.mkdir("b").unwrap();
    tree.echo("x", "a/f.txt").unwrap();
    tree.cd("b").unwrap();

    tree.rm("../a/f.txt").unwrap();
    assert!(tree.ls(Some("../a")).unwrap().is_empty());
    tree.verify().unwrap();
}

/// Copies are independent of their source
#[test]
fn test_copy_then_edit_both_sides() {
    let mut tree = Tree::new();
    tree.mkdir("src").unwrap();
    tree.mkdir("dst").unwrap();
    tree.echo("original", "src/f.txt").unwrap();
    tree.cp("src", "dst").unwrap();

    tree.echo("copy edit", "dst/src/f.txt").unwrap();
    assert_eq!(tree.cat("src/f.txt").unwrap(), "original\n");
    tree.echo("source edit", "src/f.txt").unwrap();
    assert_eq!(tree.cat("dst/src/f.txt").unwrap(), "copy edit\n");

    let kinds: Vec<NodeKind> = tree
        .ls(Some("dst"))
        .unwrap()
        .into_iter()
        .map(|e| e.kind)
        .collect();
    assert_eq!(kinds, vec![NodeKind::Directory]);
}
