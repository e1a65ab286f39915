// Heap entry: priority first, then arrival sequence

use crate::domain::Priority;
use std::cmp::Ordering;

/// Wrapper stored in the max-heap.
///
/// The "greatest" entry is the one that pops first: lowest priority value,
/// and among equal priorities the lowest sequence number (FIFO).
pub(super) struct Entry<T> {
    pub(super) item: T,
    priority: Priority,
    seq: u64,
}

impl<T> Entry<T> {
    pub(super) fn new(item: T, priority: Priority, seq: u64) -> Self {
        Self {
            item,
            priority,
            seq,
        }
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Entry<T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BinaryHeap;

    #[test]
    fn test_lower_priority_value_pops_first() {
        let mut heap = BinaryHeap::new();
        heap.push(Entry::new("low", 5, 0));
        heap.push(Entry::new("high", 1, 1));
        heap.push(Entry::new("mid", 3, 2));

        let order: Vec<_> = std::iter::from_fn(|| heap.pop()).map(|e| e.item).collect();
        assert_eq!(order, vec!["high", "mid", "low"]);
    }

    #[test]
    fn test_equal_priority_is_fifo() {
        let mut heap = BinaryHeap::new();
        for (seq, name) in ["a", "b", "c", "d"].into_iter().enumerate() {
            heap.push(Entry::new(name, 2, seq as u64));
        }

        let order: Vec<_> = std::iter::from_fn(|| heap.pop()).map(|e| e.item).collect();
        assert_eq!(order, vec!["a", "b", "c", "d"]);
    }
}
