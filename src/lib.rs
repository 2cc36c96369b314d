//! Severity-ordered patient admission.
//!
//! - **Queue**: array-backed binary heap ordered by triage class
//!   (immediate, emergency, urgent, minimal) and then by arrival number.
//!   Admission and extraction are logarithmic; the next patient is
//!   visible in constant time.
//! - **Triage**: a small command shell (`add`, `peek`, `next`, `list`,
//!   `load`, `help`, `quit`) driving the queue, used by the `triage` binary.
//!
//! # Architecture
//!
//! The queue knows nothing about text commands or output formatting; the
//! shell only talks to it through its public operations.

pub mod error;
pub mod queue;
pub mod triage;

pub use error::{CommandError, QueueError, SessionError};
