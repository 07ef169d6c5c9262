//! CLI output: error mapping from session errors to the text shown to the user.

use crate::error::{ApiError, PersistenceError};

/// Map session errors to a single line for the shell.
pub fn map_error(e: &ApiError) -> String {
    match e {
        ApiError::Persistence(PersistenceError::Io(io)) => {
            format!("Error accessing file system state: {}", io)
        }
        other => other.to_string(),
    }
}
