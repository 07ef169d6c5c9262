//! Structural mutations: create, change directory, move, copy, delete
//!
//! Every operation validates completely before it touches a `contents` map
//! or a `parent` link, so a rejected operation leaves the tree unchanged.

use crate::error::FsError;
use crate::tree::node::{validate_name, Node, NodeId};
use crate::tree::Tree;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// What `mv` and `cp` do when the destination already holds an entry with
/// the source's name
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictPolicy {
    /// Replace the existing entry, releasing its subtree
    #[default]
    Overwrite,
    /// Fail with `AlreadyExists`
    Reject,
}

impl Tree {
    /// Create an empty directory in the current directory
    pub fn mkdir(&mut self, name: &str) -> Result<NodeId, FsError> {
        self.create_in_cwd(Node::directory(name, None))
    }

    /// Create an empty file in the current directory
    pub fn touch(&mut self, name: &str) -> Result<NodeId, FsError> {
        self.create_in_cwd(Node::file(name, None, ""))
    }

    /// Change the current directory
    pub fn cd(&mut self, path: &str) -> Result<NodeId, FsError> {
        let target = self.resolve_directory(path)?;
        self.set_current_dir(target);
        debug!(path, cwd = %self.pwd(), "Changed directory");
        Ok(target)
    }

    /// Move `source_path` into the directory at `dest_path`, keeping its name.
    ///
    /// Returns the moved node. Moving a node into the directory that already
    /// holds it succeeds without changes.
    pub fn mv(&mut self, source_path: &str, dest_path: &str) -> Result<NodeId, FsError> {
        let source = self.resolve_from_cwd(source_path)?;
        let dest = self.resolve_destination(dest_path)?;

        if source == dest {
            debug!(source_path, dest_path, "Rejected move onto itself");
            return Err(FsError::InvalidDestination(
                "source and destination are the same".to_string(),
            ));
        }
        if self.is_ancestor_or_self(source, dest) {
            debug!(source_path, dest_path, "Rejected move into own subtree");
            return Err(FsError::InvalidDestination(format!(
                "'{}' is inside '{}'",
                dest_path, source_path
            )));
        }

        let (name, old_parent) = match self.node(source) {
            Some(node) => (node.name().to_string(), node.parent()),
            None => return Err(FsError::NotFound(source_path.to_string())),
        };
        if old_parent == Some(dest) {
            return Ok(source);
        }

        let replaced = self.existing_entry(dest, &name);
        if let Some(existing) = replaced {
            self.check_replaceable(existing, Some(source), &name)?;
        }

        self.detach(source);
        if let Some(existing) = replaced {
            self.detach(existing);
            self.release_subtree(existing);
        }
        self.attach(dest, source);
        debug!(
            source_path,
            dest_path,
            replaced = replaced.is_some(),
            "Moved node"
        );
        Ok(source)
    }

    /// Deep-copy `source_path` into the directory at `dest_path`.
    ///
    /// Returns the root of the copy. Every copied node is new and its parent
    /// link points at the corresponding copied ancestor.
    pub fn cp(&mut self, source_path: &str, dest_path: &str) -> Result<NodeId, FsError> {
        let source = self.resolve_from_cwd(source_path)?;
        let dest = self.resolve_destination(dest_path)?;

        if source == self.root_id() {
            return Err(FsError::InvalidArgument(
                "cannot copy the root directory".to_string(),
            ));
        }
        let name = match self.node(source) {
            Some(node) => node.name().to_string(),
            None => return Err(FsError::NotFound(source_path.to_string())),
        };

        let replaced = self.existing_entry(dest, &name);
        if replaced == Some(source) {
            return Err(FsError::InvalidDestination(
                "source and destination are the same".to_string(),
            ));
        }
        if let Some(existing) = replaced {
            self.check_replaceable(existing, None, &name)?;
        }

        // Clone first: the source may live inside the entry being replaced.
        let copy = self.clone_subtree(source);
        if let Some(existing) = replaced {
            self.detach(existing);
            self.release_subtree(existing);
        }
        self.attach(dest, copy);
        debug!(
            source_path,
            dest_path,
            replaced = replaced.is_some(),
            "Copied node"
        );
        Ok(copy)
    }

    /// Remove the node at `path` together with its subtree
    pub fn rm(&mut self, path: &str) -> Result<(), FsError> {
        let target = self.resolve_from_cwd(path)?;
        if target == self.root_id() {
            debug!(path, "Rejected removal of the root");
            return Err(FsError::ProtectedNode("/".to_string()));
        }
        if self.is_ancestor_or_self(target, self.current_dir()) {
            debug!(path, "Rejected removal of an ancestor of the current directory");
            return Err(FsError::ProtectedNode(
                self.path_of(target).unwrap_or_else(|| path.to_string()),
            ));
        }

        self.detach(target);
        let released = self.release_subtree(target);
        debug!(path, released, "Removed node");
        Ok(())
    }

    fn create_in_cwd(&mut self, node: Node) -> Result<NodeId, FsError> {
        validate_name(node.name())?;
        let cwd = self.current_dir();
        if self.existing_entry(cwd, node.name()).is_some() {
            return Err(FsError::AlreadyExists(node.name().to_string()));
        }
        let kind = node.kind();
        let id = self.insert_child(cwd, node);
        debug!(%kind, path = ?self.path_of(id), "Created node");
        Ok(id)
    }

    fn resolve_destination(&self, dest_path: &str) -> Result<NodeId, FsError> {
        match self.resolve_directory(dest_path) {
            Ok(dest) => Ok(dest),
            Err(FsError::NotFound(_)) | Err(FsError::NotADirectory(_)) => Err(
                FsError::InvalidDestination(format!("'{}' is not a directory", dest_path)),
            ),
            Err(e) => Err(e),
        }
    }

    fn existing_entry(&self, dir: NodeId, name: &str) -> Option<NodeId> {
        self.directory(dir)
            .and_then(|d| d.contents.get(name))
            .copied()
    }

    /// Decide whether `existing` may be replaced by an incoming node.
    ///
    /// The current directory must stay live: replacing one of its ancestors is
    /// refused unless the walk up from the current directory meets `survivor`
    /// (the node being moved) first.
    fn check_replaceable(
        &self,
        existing: NodeId,
        survivor: Option<NodeId>,
        name: &str,
    ) -> Result<(), FsError> {
        if self.conflict_policy() == ConflictPolicy::Reject {
            debug!(name, "Rejected overwrite of existing entry");
            return Err(FsError::AlreadyExists(name.to_string()));
        }

        let mut current = Some(self.current_dir());
        while let Some(id) = current {
            if Some(id) == survivor {
                return Ok(());
            }
            if id == existing {
                debug!(name, "Rejected overwrite of an ancestor of the current directory");
                return Err(FsError::ProtectedNode(
                    self.path_of(existing).unwrap_or_else(|| name.to_string()),
                ));
            }
            current = self.node(id).and_then(Node::parent);
        }
        Ok(())
    }

    /// Copy the subtree rooted at `source` into new, detached nodes.
    ///
    /// The walk is pre-order, so every original parent is mapped to its clone
    /// before any of its children are visited.
    fn clone_subtree(&mut self, source: NodeId) -> NodeId {
        let order: Vec<NodeId> = self.walk(source).map(|entry| entry.id).collect();
        let mut clones: HashMap<NodeId, NodeId> = HashMap::with_capacity(order.len());

        for original in order {
            if clones.contains_key(&original) {
                continue;
            }
            let Some(node) = self.node(original) else {
                continue;
            };
            let cloned_parent = if original == source {
                None
            } else {
                node.parent().and_then(|p| clones.get(&p).copied())
            };
            let fresh = match node {
                Node::Directory(dir) => Node::directory(dir.name.clone(), None),
                Node::File(file) => Node::file(file.name.clone(), None, file.content.clone()),
            };
            let clone_id = match cloned_parent {
                Some(parent) => self.insert_child(parent, fresh),
                None => self.alloc(fresh),
            };
            clones.insert(original, clone_id);
        }

        clones.get(&source).copied().unwrap_or(source)
    }
}
