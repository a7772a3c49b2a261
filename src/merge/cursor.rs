use std::cmp::Ordering;

use crate::types::{MediaItem, SortOrder};

/// The head of one sub-collection during the merge.
///
/// Each non-exhausted sub-collection has exactly one slot in the merge heap.
/// Popping the greatest slot yields the next merged item; the slot is then
/// refilled from the same sub-collection and pushed back.
#[derive(Debug, Clone)]
pub struct MergeSlot {
    /// Input position of the sub-collection.
    pub source: usize,
    /// The next unconsumed item.
    pub head: MediaItem,
    order: SortOrder,
}

impl MergeSlot {
    pub fn new(source: usize, head: MediaItem, order: SortOrder) -> Self {
        MergeSlot {
            source,
            head,
            order,
        }
    }
}

// BinaryHeap is a max-heap, so "greater" means "merged first": the earlier
// timestamp in the slot's direction, then the lower input position.
impl Ord for MergeSlot {
    fn cmp(&self, other: &Self) -> Ordering {
        self.order
            .compare(&other.head.date_taken(), &self.head.date_taken())
            .then_with(|| other.source.cmp(&self.source))
    }
}

impl PartialOrd for MergeSlot {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for MergeSlot {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for MergeSlot {}
