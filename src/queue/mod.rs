//! Severity-ordered admission queue.
//!
//! Patients wait in a binary heap ordered by triage class and, within a
//! class, by arrival:
//!
//! - **Immediate** before **Emergency** before **Urgent** before **Minimal**.
//! - Equal classes are served first-come, first-served using the arrival
//!   number the queue assigns at admission (1, 2, 3, ...).
//!
//! # Design
//!
//! The heap lives in a `Vec` addressed by index arithmetic. Admission and
//! extraction are `O(log n)`; peeking is `O(1)`. Listing the queue returns
//! the heap's layout order, which is not sorted beyond the first element.
//!
//! # References
//!
//! Williams (1964), "Algorithm 232: Heapsort", *Communications of the ACM* 7(6).

mod config;
mod heap;
mod types;

pub use config::QueueConfig;
pub use heap::{DrainByPriority, PatientQueue};
pub use types::{Entry, Severity, SnapshotRow};
