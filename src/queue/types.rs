//! Severity classes and queue entries.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::QueueError;

/// Triage class of a waiting patient.
///
/// Variants are declared most urgent first, so the derived `Ord` puts
/// `Immediate` lowest: a smaller severity is served earlier.
///
/// # Examples
///
/// ```
/// use u_triage::queue::Severity;
///
/// let s: Severity = "urgent".parse().unwrap();
/// assert_eq!(s, Severity::Urgent);
/// assert_eq!(s.rank(), 3);
/// assert!(Severity::Immediate < Severity::Minimal);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Severity {
    Immediate = 1,
    Emergency = 2,
    Urgent = 3,
    Minimal = 4,
}

impl Severity {
    /// All classes, most urgent first.
    pub const ALL: [Severity; 4] = [
        Severity::Immediate,
        Severity::Emergency,
        Severity::Urgent,
        Severity::Minimal,
    ];

    /// Numeric class, 1 (immediate) through 4 (minimal).
    pub fn rank(self) -> u8 {
        self as u8
    }

    /// The label accepted by [`FromStr`].
    pub fn label(self) -> &'static str {
        match self {
            Severity::Immediate => "immediate",
            Severity::Emergency => "emergency",
            Severity::Urgent => "urgent",
            Severity::Minimal => "minimal",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Severity {
    type Err = QueueError;

    /// Labels are case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Severity::ALL
            .into_iter()
            .find(|sev| sev.label() == s)
            .ok_or_else(|| QueueError::InvalidSeverity(s.to_string()))
    }
}

/// One waiting patient. Only [`PatientQueue`](super::PatientQueue) creates these.
/// With the `serde` feature it is `Serialize` only.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Entry {
    severity: Severity,
    name: String,
    sequence: u64,
}

impl Entry {
    pub(crate) fn new(severity: Severity, name: String, sequence: u64) -> Self {
        Self {
            severity,
            name,
            sequence,
        }
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Arrival number, starting at 1.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub(crate) fn into_name(self) -> String {
        self.name
    }

    /// Returns `true` if `self` must be served before `other`.
    ///
    /// Lower severity first; equal severities fall back to arrival order.
    /// Sequence numbers are unique, so for distinct entries exactly one of
    /// `a.outranks(b)` and `b.outranks(a)` holds.
    pub fn outranks(&self, other: &Entry) -> bool {
        self.priority_cmp(other) == Ordering::Less
    }

    /// Total order where `Less` means "served earlier".
    pub fn priority_cmp(&self, other: &Entry) -> Ordering {
        self.severity
            .cmp(&other.severity)
            .then(self.sequence.cmp(&other.sequence))
    }
}

/// A row of [`PatientQueue::snapshot`](super::PatientQueue::snapshot).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SnapshotRow {
    pub sequence: u64,
    pub severity: Severity,
    pub name: String,
}

impl SnapshotRow {
    pub fn label(&self) -> &'static str {
        self.severity.label()
    }
}

impl From<&Entry> for SnapshotRow {
    fn from(entry: &Entry) -> Self {
        Self {
            sequence: entry.sequence,
            severity: entry.severity,
            name: entry.name.clone(),
        }
    }
}
