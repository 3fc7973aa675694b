//! Shell errors.

use std::io;

use thiserror::Error;

/// Errors that end the shell.
#[derive(Debug, Error)]
pub enum CliError {
    /// Terminal I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Runtime task panicked or was cancelled.
    #[error("runtime task failed: {0}")]
    Runtime(#[from] tokio::task::JoinError),
}
