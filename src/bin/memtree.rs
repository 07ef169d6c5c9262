//! memtree CLI Binary
//!
//! Interactive shell and scripted runner for the in-memory namespace.

use clap::Parser;
use memtree::cli::{map_error, run_interactive, run_script, Cli, Commands, Session, ShellOptions};
use memtree::config::{ConfigLoader, MemtreeConfig, PromptPolicy};
use memtree::error::ApiError;
use memtree::logging::{init_logging, LoggingConfig};
use memtree::store::JsonFileStore;
use std::path::Path;
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    };

    // Initialize logging early
    let logging_config = build_logging_config(&cli, &config);
    if let Err(e) = init_logging(&logging_config) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("memtree starting");

    let state_path = cli
        .state_file
        .clone()
        .unwrap_or_else(|| config.state.path.clone());
    info!(state_file = %state_path.display(), "Session initialized");
    let mut session = Session::new(
        Box::new(JsonFileStore::new(state_path)),
        config.tree.on_conflict,
    );
    let options = build_shell_options(&cli, &config);

    match cli.command.clone().unwrap_or(Commands::Shell) {
        Commands::Shell => {
            if let Err(e) = run_interactive(&mut session, options) {
                error!("Shell failed: {}", e);
                eprintln!("{}", map_error(&e));
                process::exit(1);
            }
        }
        Commands::Exec { lines } => {
            let stdout = std::io::stdout();
            let stderr = std::io::stderr();
            let result = run_script(
                &mut session,
                &lines,
                options,
                &mut stdout.lock(),
                &mut stderr.lock(),
            );
            match result {
                Ok(0) => info!("Script completed successfully"),
                Ok(failures) => {
                    error!(failures, "Script had failing lines");
                    process::exit(1);
                }
                Err(e) => {
                    error!("Script failed: {}", e);
                    eprintln!("{}", map_error(&e));
                    process::exit(1);
                }
            }
        }
    }
}

/// Load configuration: an explicit `--config` file, or the layered files
/// for the current directory. The result is validated.
fn load_config(cli: &Cli) -> Result<MemtreeConfig, ApiError> {
    let config = match cli.config {
        Some(ref config_path) => ConfigLoader::load_from_file(config_path)?,
        None => ConfigLoader::load(Path::new("."))?,
    };
    config.ensure_valid()?;
    Ok(config)
}

/// Build logging configuration from CLI args and the loaded config.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli, config: &MemtreeConfig) -> LoggingConfig {
    let mut logging = config.logging.clone();

    if cli.quiet {
        logging.enabled = false;
    }
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        logging.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        logging.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        logging.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        logging.file = Some(file.clone());
    }
    if cli.no_color {
        logging.color = false;
    }

    logging
}

fn build_shell_options(cli: &Cli, config: &MemtreeConfig) -> ShellOptions {
    let load_on_start = if cli.load {
        PromptPolicy::Always
    } else if cli.no_load {
        PromptPolicy::Never
    } else {
        config.state.load_on_start
    };

    ShellOptions {
        color: config.shell.color && !cli.no_color,
        load_on_start,
        save_on_exit: config.state.save_on_exit,
    }
}
