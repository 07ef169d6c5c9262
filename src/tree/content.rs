//! Content operations: listing, writing, dumping and searching files

use crate::error::FsError;
use crate::tree::node::{validate_name, Node, NodeId, NodeKind};
use crate::tree::path;
use crate::tree::Tree;
use tracing::debug;

/// One line of `ls` output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    /// Absolute path of the entry
    pub path: String,
    pub name: String,
    pub kind: NodeKind,
}

impl Tree {
    /// List a directory (default: the current one), or a single file.
    pub fn ls(&self, path: Option<&str>) -> Result<Vec<ListEntry>, FsError> {
        let target = self.resolve_from_cwd(path.unwrap_or(""))?;
        let target_path = self
            .path_of(target)
            .ok_or_else(|| FsError::NotFound(path.unwrap_or("").to_string()))?;

        match self.node(target) {
            Some(Node::Directory(dir)) => Ok(dir
                .contents
                .iter()
                .filter_map(|(name, child)| {
                    self.node(*child).map(|node| ListEntry {
                        path: path::join(&target_path, name),
                        name: name.clone(),
                        kind: node.kind(),
                    })
                })
                .collect()),
            Some(Node::File(file)) => Ok(vec![ListEntry {
                path: target_path,
                name: file.name.clone(),
                kind: NodeKind::File,
            }]),
            None => Err(FsError::NotFound(path.unwrap_or("").to_string())),
        }
    }

    /// Write `content` plus a newline to the file at `path`, replacing what
    /// was there. A missing file is created when its parent directory exists.
    pub fn echo(&mut self, content: &str, path: &str) -> Result<NodeId, FsError> {
        let text = format!("{}\n", content);

        match self.resolve_from_cwd(path) {
            Ok(id) => {
                return match self.node_mut(id).and_then(Node::as_file_mut) {
                    Some(file) => {
                        file.content = text;
                        debug!(path, bytes = file.content.len(), "Overwrote file");
                        Ok(id)
                    }
                    None => Err(FsError::NotAFile(path.to_string())),
                };
            }
            Err(FsError::NotFound(_)) => {}
            Err(e) => return Err(e),
        }

        let (parent_path, leaf) = path::split_leaf(path)
            .ok_or_else(|| FsError::InvalidArgument("missing file path".to_string()))?;
        validate_name(leaf)?;
        let parent = self
            .resolve_from_cwd(&parent_path)
            .map_err(|_| FsError::NotFound(path.to_string()))?;
        if self.directory(parent).is_none() {
            return Err(FsError::NotADirectory(parent_path));
        }

        let id = self.insert_child(parent, Node::file(leaf, None, text));
        debug!(path, "Created file");
        Ok(id)
    }

    /// Dump a file's content, or every entry below a directory.
    ///
    /// For a directory each descendant contributes a
    /// `"\nContents of <path>:\n\n"` header, followed by the content when it
    /// is a file.
    pub fn cat(&self, path: &str) -> Result<String, FsError> {
        let target = self.resolve_from_cwd(path)?;
        match self.node(target) {
            Some(Node::File(file)) => Ok(file.content.clone()),
            Some(Node::Directory(_)) => {
                let mut out = String::new();
                for entry in self.walk(target).skip(1) {
                    out.push_str("\nContents of ");
                    out.push_str(&entry.path);
                    out.push_str(":\n\n");
                    if let Node::File(file) = entry.node {
                        out.push_str(&file.content);
                    }
                }
                Ok(out)
            }
            None => Err(FsError::NotFound(path.to_string())),
        }
    }

    /// Lines of the file at `path` containing `pattern` as a literal substring
    pub fn grep(&self, pattern: &str, path: &str) -> Result<Vec<String>, FsError> {
        if pattern.is_empty() {
            return Err(FsError::InvalidArgument("pattern must not be empty".to_string()));
        }
        let target = self.resolve_from_cwd(path)?;
        let file = self
            .node(target)
            .and_then(Node::as_file)
            .ok_or_else(|| FsError::NotAFile(path.to_string()))?;

        Ok(file
            .content
            .split('\n')
            .filter(|line| line.contains(pattern))
            .map(str::to_string)
            .collect())
    }
}
