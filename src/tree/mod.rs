//! In-memory namespace tree
//!
//! An arena of directory and file nodes rooted at `/`, with a current
//! directory, path resolution and the structural and content operations the
//! shell exposes.

pub mod arena;
pub mod content;
pub mod mutate;
pub mod node;
pub mod path;
pub mod walker;

pub use arena::Tree;
pub use content::ListEntry;
pub use mutate::ConflictPolicy;
pub use node::{DirectoryNode, FileNode, Node, NodeId, NodeKind};
