//! CLI route: the session and its single route table.
//!
//! A `Session` owns the tree and the store it is saved to. Every shell
//! command is dispatched through `execute`, which returns a
//! `CommandOutput` for presentation and never prints.

use crate::cli::command::{parse_line, ShellCommand};
use crate::cli::help::{command_name, help_text};
use crate::error::ApiError;
use crate::store::{codec, StateStore};
use crate::tree::{ConflictPolicy, ListEntry, NodeId, Tree};
use std::time::Instant;
use tracing::{debug, info};

/// Result of one command, ready to be rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    /// Silent success
    None,
    /// `ls` entries
    Listing(Vec<ListEntry>),
    /// Raw text, printed as is
    Text(String),
    /// One item per line
    Lines(Vec<String>),
    /// Status message
    Message(String),
    /// The session should end
    Exit,
}

/// Interactive or scripted shell session over one tree
pub struct Session {
    tree: Tree,
    store: Box<dyn StateStore>,
    policy: ConflictPolicy,
}

impl Session {
    /// Start with an empty tree.
    pub fn new(store: Box<dyn StateStore>, policy: ConflictPolicy) -> Self {
        Self {
            tree: Tree::with_conflict_policy(policy),
            store,
            policy,
        }
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut Tree {
        &mut self.tree
    }

    /// Absolute path of the current directory, for the prompt
    pub fn prompt_path(&self) -> String {
        self.tree.pwd()
    }

    /// Replace the tree with the saved snapshot.
    ///
    /// Returns `false` and keeps the current tree when nothing is saved. A
    /// failed load also keeps the current tree.
    pub fn load_state(&mut self) -> Result<bool, ApiError> {
        match self.store.load()? {
            Some(mut tree) => {
                tree.set_conflict_policy(self.policy);
                self.tree = tree;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Write the tree to the store
    pub fn save_state(&self) -> Result<(), ApiError> {
        self.store.save(&self.tree)?;
        Ok(())
    }

    /// Parse and run one shell line. Blank lines produce no output.
    pub fn execute_line(&mut self, line: &str) -> Result<CommandOutput, ApiError> {
        match parse_line(line)? {
            Some(command) => self.execute(&command),
            None => Ok(CommandOutput::None),
        }
    }

    /// Execute a shell command via the single route table.
    pub fn execute(&mut self, command: &ShellCommand) -> Result<CommandOutput, ApiError> {
        let started = Instant::now();
        let result = self.execute_inner(command);
        match &result {
            Ok(_) => debug!(
                command = command_name(command),
                duration_us = started.elapsed().as_micros(),
                "Command completed"
            ),
            Err(e) => debug!(command = command_name(command), error = %e, "Command failed"),
        }
        result
    }

    fn execute_inner(&mut self, command: &ShellCommand) -> Result<CommandOutput, ApiError> {
        let output = match command {
            ShellCommand::Mkdir { name } => {
                self.tree.mkdir(name)?;
                CommandOutput::None
            }
            ShellCommand::Cd { path } => {
                self.tree.cd(path)?;
                CommandOutput::None
            }
            ShellCommand::Ls { path } => CommandOutput::Listing(self.tree.ls(path.as_deref())?),
            ShellCommand::Cat { path } => CommandOutput::Text(self.tree.cat(path)?),
            ShellCommand::Touch { name } => {
                self.tree.touch(name)?;
                CommandOutput::None
            }
            ShellCommand::Echo { text, path } => {
                self.tree.echo(text, path)?;
                CommandOutput::None
            }
            ShellCommand::Mv {
                source,
                destination,
            } => {
                let id = self.tree.mv(source, destination)?;
                CommandOutput::Message(self.transfer_message("Moved", id, destination))
            }
            ShellCommand::Cp {
                source,
                destination,
            } => {
                let id = self.tree.cp(source, destination)?;
                CommandOutput::Message(self.transfer_message("Copied", id, destination))
            }
            ShellCommand::Rm { path } => {
                self.tree.rm(path)?;
                CommandOutput::None
            }
            ShellCommand::Grep { pattern, path } => {
                CommandOutput::Lines(self.tree.grep(pattern, path)?)
            }
            ShellCommand::Save => {
                self.save_state()?;
                CommandOutput::Message("File system state saved successfully.".to_string())
            }
            ShellCommand::Load => {
                if self.load_state()? {
                    info!(location = %self.store.location(), "Session state replaced");
                    CommandOutput::Message("File system state loaded successfully.".to_string())
                } else {
                    CommandOutput::Message(format!(
                        "No saved state at {}; keeping the current tree.",
                        self.store.location()
                    ))
                }
            }
            ShellCommand::Log => {
                let document = codec::to_json(&self.tree)?;
                CommandOutput::Text(format!("Current File System State:\n{}\n", document))
            }
            ShellCommand::Help => CommandOutput::Text(help_text()),
            ShellCommand::Exit => CommandOutput::Exit,
        };
        Ok(output)
    }

    fn transfer_message(&self, verb: &str, id: NodeId, destination: &str) -> String {
        match self.tree.node(id) {
            Some(node) => format!(
                "{} {} \"{}\" to {}",
                verb,
                node.kind(),
                node.name(),
                destination
            ),
            None => format!("{} to {}", verb, destination),
        }
    }
}
