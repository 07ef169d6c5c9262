//! CLI presentation: turns command output into terminal text.

use crate::cli::route::CommandOutput;
use crate::tree::{ListEntry, NodeKind};
use owo_colors::OwoColorize;

/// Text for one command result, or `None` when there is nothing to print.
///
/// Listings show absolute paths, directories in green and files in yellow.
pub fn render(output: &CommandOutput, color: bool) -> Option<String> {
    match output {
        CommandOutput::None | CommandOutput::Exit => None,
        CommandOutput::Listing(entries) => {
            if entries.is_empty() {
                return None;
            }
            Some(
                entries
                    .iter()
                    .map(|entry| format_entry(entry, color))
                    .collect::<Vec<_>>()
                    .join("\n"),
            )
        }
        // An empty file still prints as one blank line.
        CommandOutput::Text(text) => Some(text.strip_suffix('\n').unwrap_or(text).to_string()),
        CommandOutput::Lines(lines) => {
            if lines.is_empty() {
                None
            } else {
                Some(lines.join("\n"))
            }
        }
        CommandOutput::Message(message) => Some(message.clone()),
    }
}

fn format_entry(entry: &ListEntry, color: bool) -> String {
    if !color {
        return entry.path.clone();
    }
    match entry.kind {
        NodeKind::Directory => entry.path.green().to_string(),
        NodeKind::File => entry.path.yellow().to_string(),
    }
}

/// Shell prompt: `<current path>> `
pub fn format_prompt(path: &str, color: bool) -> String {
    if color {
        format!("{}> ", path.green())
    } else {
        format!("{}> ", path)
    }
}
