//! memtree: an in-memory hierarchical namespace
//!
//! A tree of directories and files rooted at `/`, driven by shell-style
//! commands, with whole-tree JSON snapshots.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod store;
pub mod tree;
