use std::io;

use fintrack_config::ConfigError;
use fintrack_core::{CoreError, QueryParseError};
use rustyline::error::ReadlineError;
use thiserror::Error;

use crate::errors::TrackerError;

pub use super::shell_context::ShellContext;

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// Fatal errors that stop the shell.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Tracker(#[from] TrackerError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Readline error: {0}")]
    Readline(#[from] ReadlineError),
}

/// Errors raised by a single command. The shell reports them and keeps going.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<TrackerError> for CommandError {
    fn from(err: TrackerError) -> Self {
        match err {
            TrackerError::Core(err) => CommandError::Core(err),
            other => CommandError::Message(other.to_string()),
        }
    }
}

impl From<QueryParseError> for CommandError {
    fn from(err: QueryParseError) -> Self {
        CommandError::InvalidArguments(err.to_string())
    }
}
