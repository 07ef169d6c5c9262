//! CLI parse: clap types for the memtree binary. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// memtree - an in-memory file tree shell with JSON snapshots
#[derive(Parser, Debug)]
#[command(name = "memtree")]
#[command(about = "In-memory hierarchical namespace with a shell and JSON persistence")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path (replaces the per-user and workspace files)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Snapshot file used by save and load
    #[arg(long, global = true)]
    pub state_file: Option<PathBuf>,

    /// Load the saved state at startup without asking
    #[arg(long, global = true, conflicts_with = "no_load")]
    pub load: bool,

    /// Start with an empty tree without asking
    #[arg(long, global = true)]
    pub no_load: bool,

    /// Enable verbose logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Start the interactive shell (default)
    Shell,
    /// Run shell lines in order and exit; fails if any line failed
    Exec {
        /// Shell lines, one per argument (e.g. "mkdir docs" "ls")
        #[arg(required = true)]
        lines: Vec<String>,
    },
}
