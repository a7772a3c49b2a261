pub mod dir;
pub mod empty;
pub mod single;
pub mod vec;

use std::collections::BTreeMap;

use url::Url;

use crate::error::Result;
use crate::types::{CollectionId, MediaItem};

pub use dir::DirectoryCollection;
pub use empty::EmptyCollection;
pub use single::SingleItemCollection;
pub use vec::VecCollection;

/// The central collection abstraction.
///
/// Every media source (query result, directory listing, single uri, merged
/// view) implements this trait. This enables composability: a
/// `MergedMediaList` takes `Vec<Box<dyn MediaCollection>>`, merges them, and
/// is itself a `MediaCollection`.
///
/// Implementations must keep their items sorted by date taken in one
/// direction. The merge relies on that and never checks it.
pub trait MediaCollection {
    /// Identity of this collection instance.
    fn id(&self) -> CollectionId;

    /// Number of items.
    fn count(&self) -> usize;

    /// Returns true if there are no items.
    fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// The item at `index`, or `None` if there is none.
    fn get_at(&mut self, index: usize) -> Result<Option<MediaItem>>;

    /// The item with the given uri, or `None` if not found.
    fn get_for_uri(&self, uri: &Url) -> Result<Option<MediaItem>>;

    /// Position of `item`, or `None` if it is not in this collection.
    fn index_of(&mut self, item: &MediaItem) -> Result<Option<usize>>;

    /// Whether `item` was produced by this collection (or one it wraps).
    fn owns(&self, item: &MediaItem) -> bool {
        item.container() == Some(self.id())
    }

    /// Remove `item`. Returns false if the collection refused or did not hold it.
    fn remove(&mut self, item: &MediaItem) -> Result<bool>;

    /// Remove the item at `index`. Returns false if the collection refused.
    fn remove_at(&mut self, index: usize) -> Result<bool>;

    /// Bucket id to display name for every bucket present.
    fn bucket_ids(&self) -> BTreeMap<String, String>;

    /// Release resources. No further operation is meaningful afterwards.
    fn close(&mut self) -> Result<()>;
}

/// Collect the buckets of a set of items.
pub(crate) fn buckets_of<'a>(items: impl IntoIterator<Item = &'a MediaItem>) -> BTreeMap<String, String> {
    items
        .into_iter()
        .filter_map(|item| item.bucket())
        .map(|bucket| (bucket.id.clone(), bucket.name.clone()))
        .collect()
}
