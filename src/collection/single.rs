use std::collections::BTreeMap;

use url::Url;

use crate::collection::MediaCollection;
use crate::error::Result;
use crate::types::{CollectionId, MediaItem};

/// A collection of exactly one item, used when the gallery is opened on a
/// single uri. Read-only: removals are always refused.
pub struct SingleItemCollection {
    id: CollectionId,
    item: Option<MediaItem>,
}

impl SingleItemCollection {
    pub fn new(item: MediaItem) -> Self {
        let id = CollectionId::next();
        SingleItemCollection {
            id,
            item: Some(item.adopt(id)),
        }
    }
}

impl MediaCollection for SingleItemCollection {
    fn id(&self) -> CollectionId {
        self.id
    }

    fn count(&self) -> usize {
        usize::from(self.item.is_some())
    }

    fn get_at(&mut self, index: usize) -> Result<Option<MediaItem>> {
        Ok(if index == 0 { self.item.clone() } else { None })
    }

    fn get_for_uri(&self, uri: &Url) -> Result<Option<MediaItem>> {
        Ok(self.item.as_ref().filter(|item| item.uri() == uri).cloned())
    }

    fn index_of(&mut self, item: &MediaItem) -> Result<Option<usize>> {
        Ok((self.item.as_ref() == Some(item)).then_some(0))
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
        self.item = None;
        Ok(())
    }
}
