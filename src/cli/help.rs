//! Shell help text and command-name contract for logging.

use crate::cli::command::ShellCommand;

/// Command name string used in log records (e.g. "mkdir", "save").
pub fn command_name(command: &ShellCommand) -> &'static str {
    match command {
        ShellCommand::Mkdir { .. } => "mkdir",
        ShellCommand::Cd { .. } => "cd",
        ShellCommand::Ls { .. } => "ls",
        ShellCommand::Cat { .. } => "cat",
        ShellCommand::Touch { .. } => "touch",
        ShellCommand::Echo { .. } => "echo",
        ShellCommand::Mv { .. } => "mv",
        ShellCommand::Cp { .. } => "cp",
        ShellCommand::Rm { .. } => "rm",
        ShellCommand::Grep { .. } => "grep",
        ShellCommand::Save => "save",
        ShellCommand::Load => "load",
        ShellCommand::Log => "log",
        ShellCommand::Help => "help",
        ShellCommand::Exit => "exit",
    }
}

const COMMANDS: &[(&str, &str)] = &[
    ("mkdir <name>", "Create a directory in the current directory"),
    ("cd <path>", "Change the current directory (~ is the root, .. the parent)"),
    ("ls [path]", "List a directory, or the current one"),
    ("cat <path>", "Print a file, or every entry below a directory"),
    ("touch <name>", "Create an empty file in the current directory"),
    ("echo <text...> <path>", "Write text to a file, replacing its content"),
    ("mv <source> <destination>", "Move an entry into a directory"),
    ("cp <source> <destination>", "Copy an entry into a directory"),
    ("rm <path>", "Remove a file or directory"),
    ("grep <pattern> <path>", "Print the lines of a file containing pattern"),
    ("save", "Save the tree to the state file"),
    ("load", "Replace the tree with the saved state"),
    ("log", "Print the whole tree as JSON"),
    ("help", "Show this help"),
    ("exit", "Leave the shell"),
];

/// Help listing for the `help` command
pub fn help_text() -> String {
    let width = COMMANDS.iter().map(|(usage, _)| usage.len()).max().unwrap_or(0);
    let mut out = String::from("Available commands:\n");
    for (usage, description) in COMMANDS {
        out.push_str(&format!("  {:<width$}  {}\n", usage, description, width = width));
    }
    out
}
