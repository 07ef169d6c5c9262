//! CLI domain: command parsing, the session route table, help, output and
//! presentation, and the shell drivers.

mod command;
mod help;
mod output;
mod parse;
mod presentation;
mod route;
mod shell;

pub use command::{parse_line, tokenize, ShellCommand};
pub use help::{command_name, help_text};
pub use output::map_error;
pub use parse::{Cli, Commands};
pub use presentation::{format_prompt, render};
pub use route::{CommandOutput, Session};
pub use shell::{run_interactive, run_script, ShellOptions};
