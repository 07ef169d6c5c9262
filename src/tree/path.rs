//! Path parsing and resolution
//!
//! Paths are `/`-separated component lists. Empty components are dropped, so
//! leading, trailing and repeated slashes are tolerated. `..` moves to the
//! parent (a no-op at the root) and `~` jumps back to the root; every other
//! component names an entry of the current directory.

use crate::error::FsError;
use crate::tree::node::{Node, NodeId, ROOT_NAME};
use crate::tree::Tree;

/// A single parsed path component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component<'a> {
    /// `..`
    Parent,
    /// `~`
    Root,
    /// Any other entry name
    Name(&'a str),
}

/// Split a path into its non-empty components
pub fn components(path: &str) -> impl Iterator<Item = Component<'_>> {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| match segment {
            ".." => Component::Parent,
            "~" => Component::Root,
            name => Component::Name(name),
        })
}

/// Split a path into its parent portion and its final component.
///
/// Returns `None` when the path has no components at all. The parent portion
/// is re-joined with `/` and may be empty (meaning "the starting directory").
pub fn split_leaf(path: &str) -> Option<(String, &str)> {
    let mut segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let leaf = segments.pop()?;
    Some((segments.join("/"), leaf))
}

/// Join a directory path and an entry name, collapsing the root case
pub fn join(parent: &str, name: &str) -> String {
    if parent == ROOT_NAME || parent.is_empty() {
        format!("/{}", name)
    } else {
        format!("{}/{}", parent.trim_end_matches('/'), name)
    }
}

impl Tree {
    /// Resolve `path` starting from the directory `from`.
    ///
    /// The result is a handle into the live tree. A missing entry, or a file
    /// followed by further components, yields [`FsError::NotFound`].
    pub fn resolve(&self, path: &str, from: NodeId) -> Result<NodeId, FsError> {
        let not_found = || FsError::NotFound(path.to_string());
        if self.node(from).is_none() {
            return Err(not_found());
        }

        let parts: Vec<Component<'_>> = components(path).collect();
        let mut current = from;
        for (index, part) in parts.iter().enumerate() {
            match part {
                Component::Parent => {
                    current = self
                        .node(current)
                        .and_then(Node::parent)
                        .unwrap_or(current);
                }
                Component::Root => current = self.root_id(),
                Component::Name(name) => {
                    let dir = self
                        .node(current)
                        .and_then(Node::as_directory)
                        .ok_or_else(not_found)?;
                    let child = dir.contents.get(*name).copied().ok_or_else(not_found)?;
                    let is_last = index + 1 == parts.len();
                    if !is_last && !self.node(child).is_some_and(Node::is_directory) {
                        return Err(not_found());
                    }
                    current = child;
                }
            }
        }
        Ok(current)
    }

    /// Resolve `path` relative to the current directory
    pub fn resolve_from_cwd(&self, path: &str) -> Result<NodeId, FsError> {
        self.resolve(path, self.current_dir())
    }

    /// Resolve `path` and require a directory
    pub(crate) fn resolve_directory(&self, path: &str) -> Result<NodeId, FsError> {
        let id = self.resolve_from_cwd(path)?;
        match self.node(id) {
            Some(Node::Directory(_)) => Ok(id),
            _ => Err(FsError::NotADirectory(path.to_string())),
        }
    }
}
