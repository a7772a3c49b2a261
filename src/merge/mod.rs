pub mod cursor;
pub mod memo;

use std::collections::{BTreeMap, BinaryHeap};

use url::Url;

use crate::collection::MediaCollection;
use crate::error::{Error, Result};
use crate::types::{CollectionId, MediaItem, SortOrder};

use cursor::MergeSlot;
use memo::RunMemo;

/// A union of several sorted collections, presented as one sorted collection.
///
/// Merging is lazy. Nothing beyond the head of each sub-collection is read
/// until a position is asked for; then the merge runs just far enough to
/// produce it. Every merged position is recorded in a run-length memo, so
/// asking again (or asking for an earlier position) is answered from the
/// memo without touching the heap.
///
/// ```text
/// sources:   A = [1, 4, 5]     B = [2, 3]       (ascending)
///
/// get_at(2)  heap pops A1, B2, B3       memo: (A,1) (B,2)
/// get_at(1)  memo hit: run (B,2), local 0  ->  B[0] = 2
/// get_at(4)  heap pops A4, A5           memo: (A,1) (B,2) (A,2)
/// ```
///
/// Ordering: date taken in the list's direction; ties go to the source that
/// came first in the input. All sources must already be sorted in that same
/// direction. This is not checked.
///
/// Sources must only be mutated through this list. Removing an item behind
/// its back breaks the memo.
pub struct MergedMediaList {
    id: CollectionId,
    order: SortOrder,
    sources: Vec<Box<dyn MediaCollection>>,
    heap: BinaryHeap<MergeSlot>,
    /// Per source: local offset of its next unconsumed item.
    consumed: Vec<usize>,
    memo: RunMemo,
    closed: bool,
}

impl MergedMediaList {
    /// Merge `sources`, all sorted in `order`.
    ///
    /// Reads the first item of every non-empty source to seed the heap.
    pub fn new(sources: Vec<Box<dyn MediaCollection>>, order: SortOrder) -> Result<Self> {
        let mut list = MergedMediaList {
            id: CollectionId::next(),
            order,
            heap: BinaryHeap::with_capacity(sources.len()),
            consumed: vec![0; sources.len()],
            sources,
            memo: RunMemo::new(),
            closed: false,
        };
        for source in 0..list.sources.len() {
            list.refill(source)?;
        }
        log::debug!(
            "Merged {} collections ({} active, {} items, {:?})",
            list.sources.len(),
            list.heap.len(),
            list.count(),
            order
        );
        Ok(list)
    }

    /// The memo of merged positions resolved so far.
    pub fn memo(&self) -> &RunMemo {
        &self.memo
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            return Err(Error::Closed);
        }
        Ok(())
    }

    /// Infallible trait methods cannot report `Error::Closed`, so they panic.
    fn assert_open(&self) {
        assert!(!self.closed, "merged media list used after close");
    }

    /// Input position of the source that owns `item`.
    fn source_of(&self, item: &MediaItem) -> Result<usize> {
        self.sources
            .iter()
            .position(|source| source.owns(item))
            .ok_or(Error::UnknownItem)
    }

    /// Put the next unconsumed item of `source` on the heap, if it has one.
    fn refill(&mut self, source: usize) -> Result<()> {
        let offset = self.consumed[source];
        if offset >= self.sources[source].count() {
            return Ok(());
        }
        if let Some(head) = self.sources[source].get_at(offset)? {
            self.heap.push(MergeSlot::new(source, head, self.order));
        }
        Ok(())
    }

    /// Resolve the next merged position.
    ///
    /// Returns `(source, local offset, item)`, or None once every source is
    /// exhausted.
    fn advance(&mut self) -> Result<Option<(usize, usize, MediaItem)>> {
        let Some(slot) = self.heap.pop() else {
            return Ok(None);
        };
        let source = slot.source;
        let local = self.consumed[source];
        self.consumed[source] += 1;
        self.memo.push(source);
        log::trace!(
            "Merged position {} from source {} offset {}",
            self.memo.resolved() - 1,
            source,
            local
        );
        self.refill(source)?;
        Ok(Some((source, local, slot.head)))
    }

    /// Remove the item at merged position `index`, which must be resolved.
    ///
    /// The memo names the exact row, so the source deletes by offset and
    /// never has to search for an equal item.
    fn remove_resolved(&mut self, index: usize) -> Result<bool> {
        let Some((source, local)) = self.memo.locate(index) else {
            return Ok(false);
        };
        if !self.sources[source].remove_at(local)? {
            log::warn!("Source {} refused to remove offset {}", source, local);
            return Ok(false);
        }
        // The removed item was consumed, so the source's head moved down by one.
        if let Some(shrunk) = self.memo.shrink_at(index) {
            debug_assert_eq!(shrunk, source);
            self.consumed[shrunk] -= 1;
        }
        log::debug!("Removed position {} (source {} offset {})", index, source, local);
        Ok(true)
    }
}

impl MediaCollection for MergedMediaList {
    fn id(&self) -> CollectionId {
        self.id
    }

    /// Sum of the source counts.
    ///
    /// # Panics
    ///
    /// If the list has been closed.
    fn count(&self) -> usize {
        self.assert_open();
        self.sources.iter().map(|source| source.count()).sum()
    }

    fn is_empty(&self) -> bool {
        self.assert_open();
        self.sources.iter().all(|source| source.is_empty())
    }

    fn get_at(&mut self, index: usize) -> Result<Option<MediaItem>> {
        self.ensure_open()?;
        let count = self.count();
        if index >= count {
            return Err(Error::OutOfRange { index, count });
        }

        if let Some((source, local)) = self.memo.locate(index) {
            return self.sources[source].get_at(local);
        }

        // Not merged that far yet; the memo grows by one per step.
        while let Some((_, _, item)) = self.advance()? {
            if self.memo.resolved() == index + 1 {
                return Ok(Some(item));
            }
        }
        Ok(None)
    }

    fn get_for_uri(&self, uri: &Url) -> Result<Option<MediaItem>> {
        self.ensure_open()?;
        for source in &self.sources {
            if let Some(item) = source.get_for_uri(uri)? {
                return Ok(Some(item));
            }
        }
        Ok(None)
    }

    fn index_of(&mut self, item: &MediaItem) -> Result<Option<usize>> {
        self.ensure_open()?;
        let source = self.source_of(item)?;
        let Some(local) = self.sources[source].index_of(item)? else {
            return Ok(None);
        };

        if let Some(index) = self.memo.global_index(source, local) {
            return Ok(Some(index));
        }

        while let Some((picked, picked_local, _)) = self.advance()? {
            if picked == source && picked_local == local {
                return Ok(Some(self.memo.resolved() - 1));
            }
        }
        Ok(None)
    }

    fn owns(&self, item: &MediaItem) -> bool {
        self.assert_open();
        self.sources.iter().any(|source| source.owns(item))
    }

    fn remove(&mut self, item: &MediaItem) -> Result<bool> {
        self.ensure_open()?;
        match self.index_of(item)? {
            Some(index) => self.remove_resolved(index),
            None => Ok(false),
        }
    }

    fn remove_at(&mut self, index: usize) -> Result<bool> {
        self.ensure_open()?;
        match self.get_at(index)? {
            Some(_) => self.remove_resolved(index),
            None => Ok(false),
        }
    }

    fn bucket_ids(&self) -> BTreeMap<String, String> {
        self.assert_open();
        let mut buckets = BTreeMap::new();
        for source in &self.sources {
            buckets.extend(source.bucket_ids());
        }
        buckets
    }

    /// Close every source, even if one fails; the first failure is returned.
    fn close(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.closed = true;

        let mut first_error = None;
        for source in &mut self.sources {
            if let Err(e) = source.close() {
                first_error.get_or_insert(e);
            }
        }
        self.sources.clear();
        self.heap.clear();
        self.consumed.clear();
        self.memo.clear();
        log::debug!("Closed merged list");

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
