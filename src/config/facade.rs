//! Entry point for building a `MemtreeConfig` from its layers

use super::merge::merge_policy;
use super::sources::{global_file, workspace_file};
use super::MemtreeConfig;
use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, Environment, File};
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace directory.
    ///
    /// Layers, lowest first: defaults, the per-user file, the workspace
    /// files, then `MEMTREE__*` environment variables.
    pub fn load(workspace_root: &Path) -> Result<MemtreeConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        Self::finish(builder)
    }

    /// Load configuration from one explicit file instead of the file layers.
    /// The file must exist.
    pub fn load_from_file(path: &Path) -> Result<MemtreeConfig, ConfigError> {
        debug!(config_path = %path.display(), "Loading explicit configuration file");
        let builder = merge_policy::builder_with_defaults()?
            .add_source(File::from(path.to_path_buf()).required(true));
        Self::finish(builder)
    }

    /// Location of the per-user configuration file
    pub fn global_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<MemtreeConfig, ConfigError> {
        builder
            .add_source(
                Environment::with_prefix("MEMTREE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
