use std::collections::BTreeMap;

use url::Url;

use crate::collection::{MediaCollection, buckets_of};
use crate::error::Result;
use crate::types::{CollectionId, MediaItem, SortOrder};

/// In-memory collection holding the rows of one media query.
///
/// Items are sorted by date taken on construction. The sort is stable, so
/// items with equal timestamps keep the order they were given in, the same
/// way a database returns rows for `ORDER BY datetaken`.
pub struct VecCollection {
    id: CollectionId,
    order: SortOrder,
    items: Vec<MediaItem>,
}

impl VecCollection {
    /// Create a collection from `items`, sorted in `order`.
    pub fn new(order: SortOrder, items: impl IntoIterator<Item = MediaItem>) -> Self {
        let id = CollectionId::next();
        let mut items: Vec<MediaItem> = items.into_iter().map(|item| item.adopt(id)).collect();
        items.sort_by(|a, b| order.compare(&a.date_taken(), &b.date_taken()));
        VecCollection { id, order, items }
    }

    /// Direction the items are sorted in.
    pub fn order(&self) -> SortOrder {
        self.order
    }
}

impl MediaCollection for VecCollection {
    fn id(&self) -> CollectionId {
        self.id
    }

    fn count(&self) -> usize {
        self.items.len()
    }

    fn get_at(&mut self, index: usize) -> Result<Option<MediaItem>> {
        Ok(self.items.get(index).cloned())
    }

    fn get_for_uri(&self, uri: &Url) -> Result<Option<MediaItem>> {
        Ok(self.items.iter().find(|item| item.uri() == uri).cloned())
    }

    fn index_of(&mut self, item: &MediaItem) -> Result<Option<usize>> {
        Ok(self.items.iter().position(|candidate| candidate == item))
    }

    fn remove(&mut self, item: &MediaItem) -> Result<bool> {
        match self.items.iter().position(|candidate| candidate == item) {
            Some(index) => self.remove_at(index),
            None => Ok(false),
        }
    }

    fn remove_at(&mut self, index: usize) -> Result<bool> {
        if index >= self.items.len() {
            return Ok(false);
        }
        self.items.remove(index);
        Ok(true)
    }

    fn bucket_ids(&self) -> BTreeMap<String, String> {
        buckets_of(&self.items)
    }

    fn close(&mut self) -> Result<()> {
        self.items.clear();
        Ok(())
    }
}
