//! Configuration System
//!
//! Layered configuration for the shell: built-in defaults, a per-user file,
//! a workspace file, environment overrides. Command-line flags are applied on
//! top by the binary.

use crate::error::ApiError;
use crate::logging::{parse_format, parse_output, LoggingConfig};
use crate::store::persistence::DEFAULT_STATE_FILE;
use crate::tree::ConflictPolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemtreeConfig {
    #[serde(default)]
    pub state: StateConfig,

    #[serde(default)]
    pub tree: TreeConfig,

    #[serde(default)]
    pub shell: ShellConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// When to act on a startup load or an exit save
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptPolicy {
    /// Ask on a terminal, treat as "no" otherwise
    #[default]
    Ask,
    Always,
    Never,
}

/// Snapshot file settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateConfig {
    /// Snapshot file, relative to the process working directory
    #[serde(default = "default_state_path")]
    pub path: PathBuf,

    #[serde(default)]
    pub load_on_start: PromptPolicy,

    #[serde(default)]
    pub save_on_exit: PromptPolicy,
}

fn default_state_path() -> PathBuf {
    PathBuf::from(DEFAULT_STATE_FILE)
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            path: default_state_path(),
            load_on_start: PromptPolicy::default(),
            save_on_exit: PromptPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TreeConfig {
    /// What mv/cp do when the destination already holds the name
    #[serde(default)]
    pub on_conflict: ConflictPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellConfig {
    /// Color listings and the prompt
    #[serde(default = "default_color")]
    pub color: bool,
}

fn default_color() -> bool {
    true
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            color: default_color(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    State(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::State(msg) => write!(f, "State: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl MemtreeConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.state.path.as_os_str().is_empty() {
            errors.push(ValidationError::State(
                "State file path cannot be empty".to_string(),
            ));
        }
        if let Err(e) = parse_format(&self.logging.format) {
            errors.push(ValidationError::Logging(e.to_string()));
        }
        if let Err(e) = parse_output(&self.logging.output) {
            errors.push(ValidationError::Logging(e.to_string()));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate, folding every problem into one error
    pub fn ensure_valid(&self) -> Result<(), ApiError> {
        self.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })
    }
}
