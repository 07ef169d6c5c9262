//! Tree arena: node storage, parent links and structural helpers

use crate::error::FsError;
use crate::tree::mutate::ConflictPolicy;
use crate::tree::node::{DirectoryNode, Node, NodeId, ROOT_NAME};
use crate::tree::walker::Walker;
use std::collections::{HashMap, HashSet};

/// The whole namespace: an arena of nodes, the root and the current directory
///
/// Directories own their children through `contents`; the `parent` field of
/// every node is a plain handle used for `..` and path reconstruction only.
#[derive(Debug, Clone)]
pub struct Tree {
    root_id: NodeId,
    cwd: NodeId,
    nodes: HashMap<NodeId, Node>,
    next_id: u64,
    conflict_policy: ConflictPolicy,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    /// Create a tree holding only the root directory
    pub fn new() -> Self {
        let root_id = NodeId(0);
        let mut nodes = HashMap::new();
        nodes.insert(root_id, Node::directory(ROOT_NAME, None));
        Tree {
            root_id,
            cwd: root_id,
            nodes,
            next_id: 1,
            conflict_policy: ConflictPolicy::default(),
        }
    }

    /// Create an empty tree with the given destination-conflict policy
    pub fn with_conflict_policy(policy: ConflictPolicy) -> Self {
        let mut tree = Self::new();
        tree.conflict_policy = policy;
        tree
    }

    pub fn root_id(&self) -> NodeId {
        self.root_id
    }

    /// The directory relative paths are resolved from
    pub fn current_dir(&self) -> NodeId {
        self.cwd
    }

    pub fn conflict_policy(&self) -> ConflictPolicy {
        self.conflict_policy
    }

    pub fn set_conflict_policy(&mut self, policy: ConflictPolicy) {
        self.conflict_policy = policy;
    }

    /// Look up a live node
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Number of live nodes, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Depth-first, name-ordered traversal starting at `start` (included)
    pub fn walk(&self, start: NodeId) -> Walker<'_> {
        Walker::new(self, start)
    }

    /// Absolute path of a live node (`/` for the root)
    pub fn path_of(&self, id: NodeId) -> Option<String> {
        let mut names = Vec::new();
        let mut current = id;
        // Bounded by the arena size so a corrupted parent chain cannot spin.
        for _ in 0..=self.nodes.len() {
            let node = self.nodes.get(&current)?;
            match node.parent() {
                Some(parent) => {
                    names.push(node.name());
                    current = parent;
                }
                None => {
                    names.reverse();
                    return Some(format!("/{}", names.join("/")));
                }
            }
        }
        None
    }

    /// Absolute path of the current directory
    pub fn pwd(&self) -> String {
        self.path_of(self.cwd).unwrap_or_else(|| ROOT_NAME.to_string())
    }

    /// True when `ancestor` is `node` or appears on its parent chain
    pub fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        let mut steps = 0;
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            steps += 1;
            if steps > self.nodes.len() {
                return false;
            }
            current = self.nodes.get(&id).and_then(Node::parent);
        }
        false
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    pub(crate) fn directory(&self, id: NodeId) -> Option<&DirectoryNode> {
        self.nodes.get(&id).and_then(Node::as_directory)
    }

    pub(crate) fn set_current_dir(&mut self, id: NodeId) {
        self.cwd = id;
    }

    /// Store a node in the arena without linking it anywhere
    pub(crate) fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, node);
        id
    }

    /// Store `node` and link it into `parent`'s contents under its name.
    ///
    /// Callers validate the name and any collision beforehand.
    pub(crate) fn insert_child(&mut self, parent: NodeId, mut node: Node) -> NodeId {
        node.set_parent(Some(parent));
        let name = node.name().to_string();
        let id = self.alloc(node);
        if let Some(dir) = self.nodes.get_mut(&parent).and_then(Node::as_directory_mut) {
            dir.contents.insert(name, id);
        }
        id
    }

    /// Link an already stored node into `parent`
    pub(crate) fn attach(&mut self, parent: NodeId, id: NodeId) {
        let Some(node) = self.nodes.get_mut(&id) else {
            return;
        };
        node.set_parent(Some(parent));
        let name = node.name().to_string();
        if let Some(dir) = self.nodes.get_mut(&parent).and_then(Node::as_directory_mut) {
            dir.contents.insert(name, id);
        }
    }

    /// Unlink a node from its parent's contents, leaving it stored
    pub(crate) fn detach(&mut self, id: NodeId) {
        let Some(node) = self.nodes.get_mut(&id) else {
            return;
        };
        let parent = node.parent();
        let name = node.name().to_string();
        node.set_parent(None);
        if let Some(dir) = parent
            .and_then(|p| self.nodes.get_mut(&p))
            .and_then(Node::as_directory_mut)
        {
            if dir.contents.get(&name) == Some(&id) {
                dir.contents.remove(&name);
            }
        }
    }

    /// Drop a detached node and everything below it from the arena
    pub(crate) fn release_subtree(&mut self, id: NodeId) -> usize {
        let mut stack = vec![id];
        let mut released = 0;
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(&current) {
                released += 1;
                if let Node::Directory(dir) = node {
                    stack.extend(dir.contents.into_values());
                }
            }
        }
        released
    }

    /// Check the structural invariants of the whole tree.
    ///
    /// Every reachable non-root node must sit in its parent's contents under
    /// its own name, no node may be reached twice, the root must be the
    /// parentless `/` directory, every stored node must be reachable, and the
    /// current directory must be a live directory.
    pub fn verify(&self) -> Result<(), FsError> {
        let corrupted = |msg: String| Err(FsError::Corrupted(msg));

        let Some(root) = self.nodes.get(&self.root_id) else {
            return corrupted("root node is missing".to_string());
        };
        match root {
            Node::Directory(dir) if dir.name == ROOT_NAME && dir.parent.is_none() => {}
            Node::Directory(dir) => {
                return corrupted(format!(
                    "root must be a parentless directory named '/', found '{}'",
                    dir.name
                ))
            }
            Node::File(_) => return corrupted("root is a file".to_string()),
        }

        let mut seen: HashSet<NodeId> = HashSet::with_capacity(self.nodes.len());
        seen.insert(self.root_id);
        let mut stack = vec![self.root_id];
        while let Some(id) = stack.pop() {
            let Some(Node::Directory(dir)) = self.nodes.get(&id) else {
                continue;
            };
            for (name, child_id) in &dir.contents {
                let Some(child) = self.nodes.get(child_id) else {
                    return corrupted(format!("entry '{}' points at a released node", name));
                };
                if child.name() != name {
                    return corrupted(format!(
                        "entry '{}' holds a node named '{}'",
                        name,
                        child.name()
                    ));
                }
                if child.parent() != Some(id) {
                    return corrupted(format!("node '{}' has a stale parent link", name));
                }
                if !seen.insert(*child_id) {
                    return corrupted(format!("node '{}' is reachable twice", name));
                }
                stack.push(*child_id);
            }
        }

        if seen.len() != self.nodes.len() {
            return corrupted(format!(
                "{} stored nodes are unreachable from the root",
                self.nodes.len() - seen.len()
            ));
        }
        if self.directory(self.cwd).is_none() || !seen.contains(&self.cwd) {
            return corrupted("current directory is not a live directory".to_string());
        }
        Ok(())
    }
}
