//! Shell drivers: the interactive loop and scripted execution.

use crate::cli::output::map_error;
use crate::cli::presentation::{format_prompt, render};
use crate::cli::route::{CommandOutput, Session};
use crate::config::PromptPolicy;
use crate::error::ApiError;
use dialoguer::Confirm;
use std::io::{self, BufRead, IsTerminal, Write};
use tracing::{info, warn};

/// Presentation and startup/exit behavior of a shell run
#[derive(Debug, Clone, Copy)]
pub struct ShellOptions {
    pub color: bool,
    pub load_on_start: PromptPolicy,
    pub save_on_exit: PromptPolicy,
}

impl Default for ShellOptions {
    fn default() -> Self {
        Self {
            color: true,
            load_on_start: PromptPolicy::Ask,
            save_on_exit: PromptPolicy::Ask,
        }
    }
}

/// Run the interactive shell on stdin/stdout until `exit` or end of input.
///
/// Off a terminal, `ask` policies resolve to "no" and no prompt is printed.
pub fn run_interactive(session: &mut Session, options: ShellOptions) -> Result<(), ApiError> {
    let interactive = io::stdin().is_terminal();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if decide(
        options.load_on_start,
        interactive,
        "Do you want to load previous state?",
    )? {
        report_load(session, &mut out)?;
    }

    // The stdin lock must be released before the exit prompt reads the terminal.
    {
        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();
        loop {
            if interactive {
                write!(out, "{}", format_prompt(&session.prompt_path(), options.color))
                    .map_err(io_error)?;
                out.flush().map_err(io_error)?;
            }
            let Some(line) = lines.next() else {
                break;
            };
            let line = line.map_err(io_error)?;

            match session.execute_line(&line) {
                Ok(CommandOutput::Exit) => break,
                Ok(output) => {
                    if let Some(text) = render(&output, options.color) {
                        writeln!(out, "{}", text).map_err(io_error)?;
                    }
                }
                Err(e) => writeln!(out, "{}", map_error(&e)).map_err(io_error)?,
            }
        }
    }

    if decide(
        options.save_on_exit,
        interactive,
        "Do you want to save the state before exit?",
    )? {
        match session.save_state() {
            Ok(()) => writeln!(out, "File system state saved successfully.").map_err(io_error)?,
            Err(e) => writeln!(out, "{}", map_error(&e)).map_err(io_error)?,
        }
    }
    writeln!(out, "Exiting CLI...").map_err(io_error)?;
    Ok(())
}

/// Run `lines` in order, writing results to `out` and errors to `err`.
///
/// Returns the number of lines that failed. An `exit` line stops early.
/// Startup load and exit save follow `options`, with `ask` treated as "no".
pub fn run_script(
    session: &mut Session,
    lines: &[String],
    options: ShellOptions,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<usize, ApiError> {
    if options.load_on_start == PromptPolicy::Always {
        if let Err(e) = session.load_state() {
            warn!(error = %e, "Startup load failed; starting with an empty tree");
            writeln!(err, "{}", map_error(&e)).map_err(io_error)?;
        }
    }

    let mut failures = 0;
    for line in lines {
        match session.execute_line(line) {
            Ok(CommandOutput::Exit) => break,
            Ok(output) => {
                if let Some(text) = render(&output, options.color) {
                    writeln!(out, "{}", text).map_err(io_error)?;
                }
            }
            Err(e) => {
                failures += 1;
                writeln!(err, "{}", map_error(&e)).map_err(io_error)?;
            }
        }
    }

    if options.save_on_exit == PromptPolicy::Always {
        if let Err(e) = session.save_state() {
            failures += 1;
            writeln!(err, "{}", map_error(&e)).map_err(io_error)?;
        }
    }
    info!(lines = lines.len(), failures, "Script finished");
    Ok(failures)
}

fn decide(policy: PromptPolicy, interactive: bool, question: &str) -> Result<bool, ApiError> {
    match policy {
        PromptPolicy::Always => Ok(true),
        PromptPolicy::Never => Ok(false),
        PromptPolicy::Ask if !interactive => Ok(false),
        PromptPolicy::Ask => Confirm::new()
            .with_prompt(question)
            .default(false)
            .interact()
            .map_err(|e| ApiError::InputError(format!("Prompt failed: {}", e))),
    }
}

fn report_load(session: &mut Session, out: &mut dyn Write) -> Result<(), ApiError> {
    match session.load_state() {
        Ok(true) => writeln!(out, "Loading previous state").map_err(io_error),
        Ok(false) => writeln!(out, "No saved state found; starting with an empty tree.")
            .map_err(io_error),
        Err(e) => {
            warn!(error = %e, "Startup load failed; starting with an empty tree");
            writeln!(out, "{}", map_error(&e)).map_err(io_error)
        }
    }
}

fn io_error(e: io::Error) -> ApiError {
    ApiError::InputError(format!("Terminal I/O failed: {}", e))
}
