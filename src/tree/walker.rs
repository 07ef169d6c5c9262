//! Depth-first traversal over the tree arena
//!
//! The walker keeps an explicit stack instead of recursing, so arbitrarily
//! deep trees cannot exhaust the call stack. Entries come out in pre-order,
//! with siblings in name order.

use crate::tree::node::{Node, NodeId};
use crate::tree::path;
use crate::tree::Tree;

/// A node visited by the walker
#[derive(Debug, Clone)]
pub struct WalkEntry<'a> {
    pub id: NodeId,
    pub node: &'a Node,
    /// Absolute path of the node
    pub path: String,
    /// Distance from the walk's starting node
    pub depth: usize,
}

/// Pre-order iterator over a subtree
pub struct Walker<'a> {
    tree: &'a Tree,
    stack: Vec<(NodeId, String, usize)>,
}

impl<'a> Walker<'a> {
    /// Create a walker rooted at `start`; a released `start` yields nothing
    pub fn new(tree: &'a Tree, start: NodeId) -> Self {
        let stack = match tree.path_of(start) {
            Some(start_path) => vec![(start, start_path, 0)],
            None => Vec::new(),
        };
        Self { tree, stack }
    }
}

impl<'a> Iterator for Walker<'a> {
    type Item = WalkEntry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (id, node_path, depth) = self.stack.pop()?;
            let Some(node) = self.tree.node(id) else {
                continue;
            };
            if let Node::Directory(dir) = node {
                // Reverse so the smallest name is popped first.
                for (name, child) in dir.contents.iter().rev() {
                    self.stack
                        .push((*child, path::join(&node_path, name), depth + 1));
                }
            }
            return Some(WalkEntry {
                id,
                node,
                path: node_path,
                depth,
            });
        }
    }
}
