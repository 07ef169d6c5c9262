//! State Store
//!
//! Saves and restores whole-tree snapshots. The tree is converted to its
//! external form by [`codec`] and written as one document by a store
//! implementation.

pub mod codec;
pub mod persistence;

pub use codec::SerializedNode;
pub use persistence::JsonFileStore;

use crate::error::PersistenceError;
use crate::tree::Tree;

/// Whole-tree snapshot storage
pub trait StateStore {
    /// Read the saved tree, or `None` when nothing has been saved yet
    fn load(&self) -> Result<Option<Tree>, PersistenceError>;

    /// Replace the saved snapshot with `tree`
    fn save(&self, tree: &Tree) -> Result<(), PersistenceError>;

    /// Human-readable location of the snapshot, for messages
    fn location(&self) -> String;
}
