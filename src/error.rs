//! Error types for the admission queue and the triage shell.

use std::io;
use thiserror::Error;

/// Failures signalled by [`PatientQueue`](crate::queue::PatientQueue).
///
/// None of these leave the queue modified.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueueError {
    /// The severity label is not one of the four recognised classes.
    #[error("invalid priority code {0:?}: expected one of immediate, emergency, urgent, minimal")]
    InvalidSeverity(String),

    /// `peek` or `extract` on a queue with no waiting entries.
    #[error("there are no patients in the waiting area")]
    Empty,

    /// The patient name is blank after trimming.
    #[error("no patient name given")]
    EmptyName,
}

/// Failures parsing one line of shell input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("unrecognized command: {0}")]
    UnknownCommand(String),

    #[error("no priority code given")]
    MissingSeverity,

    #[error("no patient name given")]
    MissingName,

    #[error("no file name given")]
    MissingPath,
}

/// Failures that stop a [`Session`](crate::triage::Session).
///
/// Everything the user can cause is reported inline instead; only the
/// input source or output sink failing ends up here.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("output error: {0}")]
    Io(#[from] io::Error),

    #[error("input error: {0}")]
    Input(#[source] io::Error),
}

/// Result type for queue operations
pub type Result<T> = std::result::Result<T, QueueError>;
