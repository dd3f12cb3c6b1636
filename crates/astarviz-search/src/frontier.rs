use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

use crate::pos::Pos;

/// A frontier entry, ordered by `(priority, seq)` for use in `BinaryHeap`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Entry {
    pub(crate) priority: f64,
    pub(crate) seq: u64,
    pub(crate) pos: Pos,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the max-heap pops the smallest priority first, and the
        // earliest insertion among equal priorities.
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Open set of a search: a min-priority queue plus a membership set kept in
/// lockstep with it.
///
/// There is no decrease-key. Callers are expected to insert a cell only when
/// [`contains`](Frontier::contains) is false, so each cell has at most one
/// live entry.
#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<Entry>,
    open: HashSet<Pos>,
    next_seq: u64,
}

impl Frontier {
    /// Create an empty frontier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue `pos` with the given priority and the next insertion sequence
    /// number, and record it as open.
    pub fn insert(&mut self, pos: Pos, priority: f64) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry { priority, seq, pos });
        self.open.insert(pos);
    }

    /// Remove and return the cell with the lowest priority. Ties go to the
    /// cell inserted first.
    pub fn pop_min(&mut self) -> Option<Pos> {
        let entry = self.heap.pop()?;
        self.open.remove(&entry.pos);
        Some(entry.pos)
    }

    /// Whether no entries remain.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of queued entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether `pos` currently has a live entry.
    #[inline]
    pub fn contains(&self, pos: Pos) -> bool {
        self.open.contains(&pos)
    }

    /// Number of insertions performed so far.
    #[inline]
    pub fn insertions(&self) -> u64 {
        self.next_seq
    }

    /// Drop all entries and restart the sequence counter.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.open.clear();
        self.next_seq = 0;
    }
}
