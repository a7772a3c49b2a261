use std::collections::HashMap;

use url::Url;

use crate::collection::{MediaCollection, VecCollection};
use crate::error::Result;
use crate::types::{MediaItem, MediaKind, SortOrder};

/// Storage volume a media table lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Volume {
    /// Device-internal storage.
    Internal,
    /// Removable or shared storage (the SD card).
    External,
}

/// Query side of a media database.
///
/// Each query returns one sorted collection; the list factory merges them.
pub trait MediaStore {
    /// Whether the external volume is mounted and readable.
    fn has_external_storage(&self) -> bool;

    /// All items of `kind` on `volume`, sorted by date taken in `order`,
    /// optionally restricted to one bucket.
    fn query(
        &self,
        volume: Volume,
        kind: MediaKind,
        order: SortOrder,
        bucket_id: Option<&str>,
    ) -> Result<Box<dyn MediaCollection>>;

    /// Look up a single item by uri on any volume.
    fn item_for_uri(&self, uri: &Url) -> Result<Option<MediaItem>>;
}

/// A media database held in memory.
pub struct MemoryStore {
    tables: HashMap<(Volume, MediaKind), Vec<MediaItem>>,
    external_mounted: bool,
}

impl MemoryStore {
    /// Create an empty store with the external volume mounted.
    pub fn new() -> Self {
        MemoryStore {
            tables: HashMap::new(),
            external_mounted: true,
        }
    }

    /// Simulate mounting or unmounting the external volume.
    pub fn set_external_storage(&mut self, mounted: bool) {
        self.external_mounted = mounted;
    }

    /// Add an item to the table for its kind on `volume`.
    pub fn insert(&mut self, volume: Volume, item: MediaItem) {
        self.tables
            .entry((volume, item.kind()))
            .or_default()
            .push(item);
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaStore for MemoryStore {
    fn has_external_storage(&self) -> bool {
        self.external_mounted
    }

    fn query(
        &self,
        volume: Volume,
        kind: MediaKind,
        order: SortOrder,
        bucket_id: Option<&str>,
    ) -> Result<Box<dyn MediaCollection>> {
        let rows = self
            .tables
            .get(&(volume, kind))
            .into_iter()
            .flatten()
            .filter(|item| match bucket_id {
                Some(wanted) => item.bucket().is_some_and(|bucket| bucket.id == wanted),
                None => true,
            })
            .cloned();
        let collection = VecCollection::new(order, rows);
        log::debug!(
            "Query {:?}/{:?} bucket={:?}: {} rows",
            volume,
            kind,
            bucket_id,
            collection.count()
        );
        Ok(Box::new(collection))
    }

    fn item_for_uri(&self, uri: &Url) -> Result<Option<MediaItem>> {
        Ok(self
            .tables
            .values()
            .flatten()
            .find(|item| item.uri() == uri)
            .cloned())
    }
}
