use std::collections::BTreeMap;

use url::Url;

use crate::collection::MediaCollection;
use crate::error::Result;
use crate::types::{CollectionId, MediaItem};

/// A collection with no items.
pub struct EmptyCollection {
    id: CollectionId,
}

impl EmptyCollection {
    pub fn new() -> Self {
        EmptyCollection {
            id: CollectionId::next(),
        }
    }
}

impl Default for EmptyCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaCollection for EmptyCollection {
    fn id(&self) -> CollectionId {
        self.id
    }

    fn count(&self) -> usize {
        0
    }

    fn get_at(&mut self, _index: usize) -> Result<Option<MediaItem>> {
        Ok(None)
    }

    fn get_for_uri(&self, _uri: &Url) -> Result<Option<MediaItem>> {
        Ok(None)
    }

    fn index_of(&mut self, _item: &MediaItem) -> Result<Option<usize>> {
        Ok(None)
    }

    fn remove(&mut self, _item: &MediaItem) -> Result<bool> {
        Ok(false)
    }

    fn remove_at(&mut self, _index: usize) -> Result<bool> {
        Ok(false)
    }

    fn bucket_ids(&self) -> BTreeMap<String, String> {
        BTreeMap::new()
    }

    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}
