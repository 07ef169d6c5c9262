//! Node model: the tagged File/Directory union stored in the tree arena.

use crate::error::FsError;
use std::collections::BTreeMap;
use std::fmt;

/// Name of the root directory
pub const ROOT_NAME: &str = "/";

/// Opaque handle to a node stored in a [`Tree`](crate::tree::Tree).
///
/// Handles are never reused: once a node is released, its handle stops
/// resolving instead of aliasing a newer node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Node kind, exposed so presentation layers can style entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Directory,
    File,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Directory => "directory",
            NodeKind::File => "file",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Directory node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryNode {
    pub name: String,
    /// Owning directory; `None` only for the root
    pub parent: Option<NodeId>,
    /// Children keyed by name, iterated in byte order of the names
    pub contents: BTreeMap<String, NodeId>,
}

/// File node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNode {
    pub name: String,
    pub parent: Option<NodeId>,
    pub content: String,
}

/// A node in the namespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Directory(DirectoryNode),
    File(FileNode),
}

impl Node {
    pub fn directory(name: impl Into<String>, parent: Option<NodeId>) -> Self {
        Node::Directory(DirectoryNode {
            name: name.into(),
            parent,
            contents: BTreeMap::new(),
        })
    }

    pub fn file(name: impl Into<String>, parent: Option<NodeId>, content: impl Into<String>) -> Self {
        Node::File(FileNode {
            name: name.into(),
            parent,
            content: content.into(),
        })
    }

    pub fn name(&self) -> &str {
        match self {
            Node::Directory(dir) => &dir.name,
            Node::File(file) => &file.name,
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        match self {
            Node::Directory(dir) => dir.parent,
            Node::File(file) => file.parent,
        }
    }

    pub(crate) fn set_parent(&mut self, parent: Option<NodeId>) {
        match self {
            Node::Directory(dir) => dir.parent = parent,
            Node::File(file) => file.parent = parent,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Directory(_) => NodeKind::Directory,
            Node::File(_) => NodeKind::File,
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, Node::Directory(_))
    }

    pub fn as_directory(&self) -> Option<&DirectoryNode> {
        match self {
            Node::Directory(dir) => Some(dir),
            Node::File(_) => None,
        }
    }

    pub fn as_file(&self) -> Option<&FileNode> {
        match self {
            Node::File(file) => Some(file),
            Node::Directory(_) => None,
        }
    }

    pub(crate) fn as_directory_mut(&mut self) -> Option<&mut DirectoryNode> {
        match self {
            Node::Directory(dir) => Some(dir),
            Node::File(_) => None,
        }
    }

    pub(crate) fn as_file_mut(&mut self) -> Option<&mut FileNode> {
        match self {
            Node::File(file) => Some(file),
            Node::Directory(_) => None,
        }
    }
}

/// Check that `name` can be used as a directory entry.
///
/// Entry names must be resolvable by the path resolver: non-empty, free of
/// `/`, and neither `..` nor `~`.
pub fn validate_name(name: &str) -> Result<(), FsError> {
    if name.is_empty() {
        return Err(FsError::InvalidArgument("name must not be empty".to_string()));
    }
    if name.contains('/') {
        return Err(FsError::InvalidArgument(format!(
            "name '{}' must not contain '/'",
            name
        )));
    }
    if name == ".." || name == "~" {
        return Err(FsError::InvalidArgument(format!(
            "'{}' is reserved for path navigation",
            name
        )));
    }
    Ok(())
}
