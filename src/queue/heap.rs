//! Array-backed binary heap of waiting patients.
//!
//! # Layout
//!
//! The backing vector is a complete binary tree: root at index 0, children
//! of `i` at `2i + 1` and `2i + 2`, parent of `i` at `(i - 1) / 2`. No child
//! outranks its parent, so the root is always the next patient to be seen.
//!
//! Insertion appends and sifts up; extraction moves the last entry to the
//! root and sifts down. Both are `O(log n)`.

use tracing::{debug, trace, warn};

use super::config::QueueConfig;
use super::types::{Entry, Severity, SnapshotRow};
use crate::error::{QueueError, Result};

fn parent(i: usize) -> usize {
    (i - 1) / 2
}

fn left_child(i: usize) -> usize {
    2 * i + 1
}

/// Severity-ordered admission queue.
///
/// # Examples
///
/// ```
/// use u_triage::queue::{PatientQueue, Severity};
///
/// let mut queue = PatientQueue::new();
/// queue.admit(Severity::Urgent, "Ana Ruiz").unwrap();
/// queue.admit(Severity::Immediate, "Bo Chen").unwrap();
/// queue.admit(Severity::Urgent, "Cy Park").unwrap();
///
/// assert_eq!(queue.peek().unwrap(), "Bo Chen");
/// assert_eq!(queue.extract().unwrap(), "Bo Chen");
/// assert_eq!(queue.extract().unwrap(), "Ana Ruiz");
/// assert_eq!(queue.extract().unwrap(), "Cy Park");
/// assert!(queue.extract().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct PatientQueue {
    entries: Vec<Entry>,
    next_sequence: u64,
}

impl PatientQueue {
    /// Creates an empty queue whose first admission gets sequence 1.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_sequence: 1,
        }
    }

    /// Creates an empty queue using the given configuration.
    pub fn with_config(config: &QueueConfig) -> Self {
        let mut entries = Vec::new();
        if entries.try_reserve(config.initial_capacity).is_err() {
            warn!(
                initial_capacity = config.initial_capacity,
                "could not reserve queue capacity, growing on demand"
            );
        }
        Self {
            entries,
            next_sequence: 1,
        }
    }

    /// Admits a patient and returns the arrival number assigned to them.
    ///
    /// The name is stored trimmed. A blank name is rejected with
    /// [`QueueError::EmptyName`] and does not consume a sequence number.
    pub fn admit(&mut self, severity: Severity, name: &str) -> Result<u64> {
        let name = name.trim();
        if name.is_empty() {
            return Err(QueueError::EmptyName);
        }

        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.entries
            .push(Entry::new(severity, name.to_string(), sequence));
        self.sift_up(self.entries.len() - 1);

        debug!(sequence, %severity, size = self.entries.len(), "admitted patient");
        debug_assert!(self.heap_property_holds());
        Ok(sequence)
    }

    /// Admits a patient given the textual severity label.
    ///
    /// Unknown labels fail with [`QueueError::InvalidSeverity`] and leave the
    /// queue untouched.
    pub fn admit_labeled(&mut self, label: &str, name: &str) -> Result<u64> {
        let severity: Severity = label.parse()?;
        self.admit(severity, name)
    }

    /// Name of the patient who will be seen next.
    pub fn peek(&self) -> Result<&str> {
        self.peek_entry().map(Entry::name)
    }

    /// The entry at the root of the heap.
    pub fn peek_entry(&self) -> Result<&Entry> {
        self.entries.first().ok_or(QueueError::Empty)
    }

    /// Removes the highest-priority patient and returns their name.
    pub fn extract(&mut self) -> Result<String> {
        self.extract_entry().map(Entry::into_name)
    }

    /// Removes and returns the highest-priority entry.
    pub fn extract_entry(&mut self) -> Result<Entry> {
        if self.entries.is_empty() {
            return Err(QueueError::Empty);
        }
        let top = self.entries.swap_remove(0);
        self.sift_down(0);

        debug!(
            sequence = top.sequence(),
            severity = %top.severity(),
            size = self.entries.len(),
            "extracted patient"
        );
        debug_assert!(self.heap_property_holds());
        Ok(top)
    }

    /// Number of waiting patients.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The arrival number the next successful admission will receive.
    pub fn next_sequence(&self) -> u64 {
        self.next_sequence
    }

    /// Entries in heap layout order. Only the first is guaranteed to be the
    /// highest priority; the rest are not sorted.
    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    /// Owned rows in heap layout order, for display.
    pub fn snapshot(&self) -> Vec<SnapshotRow> {
        self.entries.iter().map(SnapshotRow::from).collect()
    }

    /// Extracts every entry, yielding them in service order.
    pub fn drain_by_priority(&mut self) -> DrainByPriority<'_> {
        DrainByPriority { queue: self }
    }

    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let p = parent(idx);
            if !self.entries[idx].outranks(&self.entries[p]) {
                break;
            }
            trace!(from = idx, to = p, "sift up");
            self.entries.swap(idx, p);
            idx = p;
        }
    }

    fn sift_down(&mut self, mut idx: usize) {
        let len = self.entries.len();
        loop {
            let left = left_child(idx);
            if left >= len {
                break;
            }
            let right = left + 1;
            let candidate = if right < len && self.entries[right].outranks(&self.entries[left]) {
                right
            } else {
                left
            };
            if self.entries[idx].outranks(&self.entries[candidate]) {
                break;
            }
            trace!(from = idx, to = candidate, "sift down");
            self.entries.swap(idx, candidate);
            idx = candidate;
        }
    }

    fn heap_property_holds(&self) -> bool {
        (1..self.entries.len()).all(|i| !self.entries[i].outranks(&self.entries[parent(i)]))
    }
}

impl Default for PatientQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a PatientQueue {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator returned by [`PatientQueue::drain_by_priority`].
///
/// Entries not consumed stay in the queue when the iterator is dropped.
#[derive(Debug)]
pub struct DrainByPriority<'a> {
    queue: &'a mut PatientQueue,
}

impl Iterator for DrainByPriority<'_> {
    type Item = Entry;

    fn next(&mut self) -> Option<Entry> {
        self.queue.extract_entry().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.queue.len(), Some(self.queue.len()))
    }
}

impl ExactSizeIterator for DrainByPriority<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn admit_all(queue: &mut PatientQueue, items: &[(Severity, &str)]) {
        for (sev, name) in items {
            queue.admit(*sev, name).unwrap();
        }
    }

    fn drain_names(queue: &mut PatientQueue) -> Vec<String> {
        let mut out = Vec::new();
        while let Ok(name) = queue.extract() {
            out.push(name);
        }
        out
    }

    #[test]
    fn test_one_of_each_severity() {
        let mut q = PatientQueue::new();
        admit_all(
            &mut q,
            &[
                (Severity::Immediate, "A"),
                (Severity::Emergency, "B"),
                (Severity::Urgent, "C"),
                (Severity::Minimal, "D"),
            ],
        );
        assert_eq!(drain_names(&mut q), vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_severity_beats_arrival_order() {
        let mut q = PatientQueue::new();
        admit_all(&mut q, &[(Severity::Emergency, "X"), (Severity::Immediate, "Y")]);
        assert_eq!(q.extract().unwrap(), "Y");
    }

    #[test]
    fn test_earlier_arrival_wins_tie() {
        let mut q = PatientQueue::new();
        admit_all(&mut q, &[(Severity::Immediate, "A1"), (Severity::Immediate, "A2")]);
        assert_eq!(q.extract().unwrap(), "A1");
        assert_eq!(q.extract().unwrap(), "A2");
    }

    #[test]
    fn test_peek_empty_then_admit() {
        let mut q = PatientQueue::new();
        assert_eq!(q.peek(), Err(QueueError::Empty));
        assert_eq!(q.len(), 0);
        assert_eq!(q.admit(Severity::Minimal, "Z").unwrap(), 1);
        assert_eq!(q.peek_entry().unwrap().sequence(), 1);
    }

    #[test]
    fn test_invalid_label_leaves_queue_unchanged() {
        let mut q = PatientQueue::new();
        q.admit(Severity::Urgent, "first").unwrap();
        let before = q.snapshot();

        let err = q.admit_labeled("bogus", "Z").unwrap_err();
        assert_eq!(err, QueueError::InvalidSeverity("bogus".into()));
        assert_eq!(q.len(), 1);
        assert_eq!(q.snapshot(), before);
        assert_eq!(q.next_sequence(), 2);
    }

    #[test]
    fn test_admit_labeled_accepts_known_labels() {
        let mut q = PatientQueue::new();
        q.admit_labeled("minimal", "m").unwrap();
        q.admit_labeled("emergency", "e").unwrap();
        assert_eq!(q.peek().unwrap(), "e");
    }

    #[test]
    fn test_blank_name_rejected_without_consuming_sequence() {
        let mut q = PatientQueue::new();
        assert_eq!(q.admit(Severity::Urgent, "   "), Err(QueueError::EmptyName));
        assert!(q.is_empty());
        assert_eq!(q.admit(Severity::Urgent, "  Sam Hamilton ").unwrap(), 1);
        assert_eq!(q.peek().unwrap(), "Sam Hamilton");
    }

    #[test]
    fn test_extract_empty() {
        let mut q = PatientQueue::new();
        assert_eq!(q.extract(), Err(QueueError::Empty));
        assert_eq!(q.next_sequence(), 1);
    }

    #[test]
    fn test_sequence_continues_after_extract() {
        let mut q = PatientQueue::new();
        q.admit(Severity::Urgent, "a").unwrap();
        q.extract().unwrap();
        q.extract().unwrap_err();
        assert_eq!(q.admit(Severity::Urgent, "b").unwrap(), 2);
    }

    #[test]
    fn test_snapshot_is_layout_order() {
        let mut q = PatientQueue::new();
        admit_all(
            &mut q,
            &[
                (Severity::Minimal, "m1"),
                (Severity::Minimal, "m2"),
                (Severity::Immediate, "i3"),
            ],
        );
        // i3 sifts up over m1; m1 lands in i3's old slot.
        let names: Vec<String> = q.snapshot().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["i3", "m2", "m1"]);
        let seqs: Vec<u64> = q.iter().map(Entry::sequence).collect();
        assert_eq!(seqs, vec![3, 2, 1]);
    }

    #[test]
    fn test_drain_by_priority() {
        let mut q = PatientQueue::new();
        admit_all(
            &mut q,
            &[
                (Severity::Urgent, "u1"),
                (Severity::Minimal, "m2"),
                (Severity::Immediate, "i3"),
                (Severity::Urgent, "u4"),
            ],
        );
        let drain = q.drain_by_priority();
        assert_eq!(drain.len(), 4);
        let names: Vec<String> = drain.map(Entry::into_name).collect();
        assert_eq!(names, vec!["i3", "u1", "u4", "m2"]);
        assert!(q.is_empty());
    }

    #[test]
    fn test_partial_drain_keeps_rest() {
        let mut q = PatientQueue::new();
        admit_all(&mut q, &[(Severity::Urgent, "a"), (Severity::Minimal, "b")]);
        let first = q.drain_by_priority().next().unwrap();
        assert_eq!(first.name(), "a");
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn test_with_config() {
        let q = PatientQueue::with_config(&QueueConfig::default().with_initial_capacity(32));
        assert!(q.is_empty());
        assert_eq!(q.next_sequence(), 1);
    }

    fn severity_strategy() -> impl Strategy<Value = Severity> {
        prop::sample::select(Severity::ALL.to_vec())
    }

    #[derive(Debug, Clone)]
    enum Op {
        Admit(Severity),
        Extract,
        Peek,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            3 => severity_strategy().prop_map(Op::Admit),
            2 => Just(Op::Extract),
            1 => Just(Op::Peek),
        ]
    }

    proptest! {
        #[test]
        fn prop_heap_invariant_and_accounting(ops in prop::collection::vec(op_strategy(), 0..200)) {
            let mut q = PatientQueue::new();
            let mut admitted = 0u64;
            for op in ops {
                let before = q.len();
                match op {
                    Op::Admit(sev) => {
                        let seq = q.admit(sev, "p").unwrap();
                        admitted += 1;
                        prop_assert_eq!(seq, admitted);
                        prop_assert_eq!(q.len(), before + 1);
                    }
                    Op::Extract => {
                        let res = q.extract();
                        if before == 0 {
                            prop_assert_eq!(res, Err(QueueError::Empty));
                            prop_assert_eq!(q.len(), 0);
                        } else {
                            prop_assert!(res.is_ok());
                            prop_assert_eq!(q.len(), before - 1);
                        }
                    }
                    Op::Peek => {
                        let _ = q.peek();
                        prop_assert_eq!(q.len(), before);
                    }
                }
                prop_assert!(q.heap_property_holds());
            }
        }

        #[test]
        fn prop_drain_is_sorted(sevs in prop::collection::vec(severity_strategy(), 0..150)) {
            let mut q = PatientQueue::new();
            for sev in &sevs {
                q.admit(*sev, "p").unwrap();
            }
            let drained: Vec<Entry> = q.drain_by_priority().collect();
            prop_assert_eq!(drained.len(), sevs.len());
            for pair in drained.windows(2) {
                prop_assert!(pair[0].outranks(&pair[1]));
            }
        }

        #[test]
        fn prop_root_outranks_all(sevs in prop::collection::vec(severity_strategy(), 1..100)) {
            let mut q = PatientQueue::new();
            for sev in &sevs {
                q.admit(*sev, "p").unwrap();
            }
            let root = q.peek_entry().unwrap();
            for entry in q.iter().skip(1) {
                prop_assert!(root.outranks(entry));
            }
        }
    }
}
