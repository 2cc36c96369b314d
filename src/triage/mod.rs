//! Text shell over the admission queue.
//!
//! Translates lines such as `add urgent Sam Hamilton`, `next` or
//! `load day1.txt` into queue operations and renders the results.
//! Replayed files run through the same path as typed input.

mod command;
mod config;
mod session;

pub use command::{Command, HELP};
pub use config::SessionConfig;
pub use session::{Flow, Session};
