//! Per-user config file source: $XDG_CONFIG_HOME/memtree/config.toml

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use directories::ProjectDirs;
use std::path::PathBuf;
use tracing::debug;

/// Path to the per-user config file.
pub fn global_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "memtree").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Add the per-user config file to the builder if it exists.
pub fn add_to_builder(
    mut builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    if let Some(path) = global_config_path() {
        if path.exists() {
            builder = builder.add_source(File::from(path).required(false));
        } else {
            debug!(config_path = %path.display(), "No per-user configuration file");
        }
    }
    Ok(builder)
}
