//! Built-in defaults, the lowest configuration layer.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with the built-in defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("state.path", crate::store::persistence::DEFAULT_STATE_FILE)?
        .set_default("state.load_on_start", "ask")?
        .set_default("state.save_on_exit", "ask")?
        .set_default("tree.on_conflict", "overwrite")?
        .set_default("shell.color", true)
}
