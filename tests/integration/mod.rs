//! Integration tests for the memtree namespace, store and shell

mod binary_exec;
mod config_integration;
mod scenarios;
mod session_commands;
