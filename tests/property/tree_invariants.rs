//! Property-based tests for resolution, parent consistency, cycles,
//! persistence round trips and copy independence

use memtree::error::FsError;
use memtree::store::codec;
use memtree::tree::{NodeKind, Tree};
use proptest::prelude::*;

const NAMES: &[&str] = &["a", "b", "c", "d.txt", "e.txt"];

#[derive(Debug, Clone)]
enum Op {
    Mkdir(&'static str),
    Touch(&'static str),
    Cd(String),
    Echo(String, String),
    Mv(String, String),
    Cp(String, String),
    Rm(String),
}

fn name() -> impl Strategy<Value = &'static str> {
    prop::sample::select(NAMES)
}

fn path() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            6 => name().prop_map(str::to_string),
            1 => Just("..".to_string()),
            1 => Just("~".to_string()),
        ],
        0..4,
    )
    .prop_map(|parts| parts.join("/"))
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        name().prop_map(Op::Mkdir),
        name().prop_map(Op::Touch),
        path().prop_map(Op::Cd),
        ("[a-z ]{0,8}", path()).prop_map(|(text, p)| Op::Echo(text, p)),
        (path(), path()).prop_map(|(s, d)| Op::Mv(s, d)),
        (path(), path()).prop_map(|(s, d)| Op::Cp(s, d)),
        path().prop_map(Op::Rm),
    ]
}

fn apply(tree: &mut Tree, op: &Op) -> Result<(), FsError> {
    match op {
        Op::Mkdir(n) => tree.mkdir(n).map(|_| ()),
        Op::Touch(n) => tree.touch(n).map(|_| ()),
        Op::Cd(p) => tree.cd(p).map(|_| ()),
        Op::Echo(text, p) => tree.echo(text, p).map(|_| ()),
        Op::Mv(s, d) => tree.mv(s, d).map(|_| ()),
        Op::Cp(s, d) => tree.cp(s, d).map(|_| ()),
        Op::Rm(p) => tree.rm(p),
    }
}

fn build(ops: &[Op]) -> Tree {
    let mut tree = Tree::new();
    for op in ops {
        let _ = apply(&mut tree, op);
    }
    tree
}

fn shape(tree: &Tree) -> Vec<(String, NodeKind, Option<String>)> {
    tree.walk(tree.root_id())
        .map(|entry| {
            let content = entry.node.as_file().map(|f| f.content.clone());
            (entry.path, entry.node.kind(), content)
        })
        .collect()
}

proptest! {
    /// Parent links stay consistent after any sequence of mutations
    #[test]
    fn test_parent_consistency(ops in prop::collection::vec(op(), 0..40)) {
        let tree = build(&ops);
        prop_assert!(tree.verify().is_ok());
        prop_assert!(tree.node(tree.current_dir()).is_some_and(|n| n.is_directory()));
    }

    /// Resolution always ends in a live node or NotFound
    #[test]
    fn test_resolver_totality(ops in prop::collection::vec(op(), 0..30), probe in path()) {
        let tree = build(&ops);
        match tree.resolve_from_cwd(&probe) {
            Ok(id) => prop_assert!(tree.node(id).is_some()),
            Err(e) => prop_assert!(matches!(e, FsError::NotFound(_)), "unexpected {:?}", e),
        }
    }

    /// Failed mutations leave the tree exactly as it was
    #[test]
    fn test_failed_mutation_changes_nothing(ops in prop::collection::vec(op(), 0..30), next in op()) {
        let mut tree = build(&ops);
        let before = shape(&tree);
        let cwd = tree.pwd();
        if apply(&mut tree, &next).is_err() {
            prop_assert_eq!(shape(&tree), before);
            prop_assert_eq!(tree.pwd(), cwd);
        }
    }

    /// Moving a directory into itself or below it is refused
    #[test]
    fn test_no_cycles(ops in prop::collection::vec(op(), 0..30), below in path()) {
        let mut tree = build(&ops);
        tree.cd("~").unwrap();
        let dirs: Vec<String> = tree
            .walk(tree.root_id())
            .skip(1)
            .filter(|e| e.node.is_directory())
            .map(|e| e.path)
            .collect();
        for dir in dirs {
            let target = if below.is_empty() { dir.clone() } else { format!("{}/{}", dir, below) };
            let Ok(dest) = tree.resolve_from_cwd(&target) else { continue };
            let source = tree.resolve_from_cwd(&dir).unwrap();
            if !tree.is_ancestor_or_self(source, dest) || !tree.node(dest).unwrap().is_directory() {
                continue;
            }
            let before = shape(&tree);
            let result = tree.mv(&dir, &target);
            prop_assert!(matches!(result, Err(FsError::InvalidDestination(_))));
            prop_assert_eq!(shape(&tree), before);
        }
    }

    /// Encoding then decoding yields the same names, nesting and contents
    #[test]
    fn test_round_trip(ops in prop::collection::vec(op(), 0..40)) {
        let tree = build(&ops);
        let encoded = codec::to_json(&tree).unwrap();
        let restored = codec::from_json(&encoded).unwrap();
        prop_assert_eq!(shape(&restored), shape(&tree));
        prop_assert!(restored.verify().is_ok());
    }

    /// Edits on either side of a copy never reach the other side
    #[test]
    fn test_copy_independence(ops in prop::collection::vec(op(), 0..30)) {
        let mut tree = build(&ops);
        tree.cd("~").unwrap();
        let _ = tree.rm("copy_src");
        let _ = tree.rm("copy_dst");
        tree.mkdir("copy_src").unwrap();
        tree.mkdir("copy_dst").unwrap();
        tree.echo("original", "copy_src/f").unwrap();
        tree.cp("copy_src", "copy_dst").unwrap();

        tree.echo("changed copy", "copy_dst/copy_src/f").unwrap();
        prop_assert_eq!(tree.cat("copy_src/f").unwrap(), "original\n");
        tree.echo("changed source", "copy_src/f").unwrap();
        prop_assert_eq!(tree.cat("copy_dst/copy_src/f").unwrap(), "changed copy\n");
        prop_assert!(tree.verify().is_ok());
    }
}
