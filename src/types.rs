use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

static NEXT_COLLECTION_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of one collection instance.
///
/// Items remember the id of the collection that produced them, which is how
/// a merged list finds the owner of an item handed back to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollectionId(u64);

impl CollectionId {
    /// Allocate a fresh, process-unique id.
    pub fn next() -> Self {
        CollectionId(NEXT_COLLECTION_ID.fetch_add(1, AtomicOrdering::Relaxed))
    }
}

/// Direction shared by a merged list and every one of its sub-collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Earliest timestamp first.
    Ascending,
    /// Latest timestamp first.
    #[default]
    Descending,
}

impl SortOrder {
    /// Compare two timestamps in this direction. `Less` means `a` comes first.
    pub fn compare(self, a: &DateTime<Utc>, b: &DateTime<Utc>) -> Ordering {
        match self {
            SortOrder::Ascending => a.cmp(b),
            SortOrder::Descending => b.cmp(a),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    #[default]
    Image,
    Video,
}

/// A bucket is the folder an item was filed under by the media database.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bucket {
    pub id: String,
    pub name: String,
}

/// One media asset.
///
/// Only three facts matter to the merge: the date taken (ordering), the uri
/// (identity) and the owning collection. Everything else is carried along
/// for the presentation layer.
#[derive(Debug, Clone)]
pub struct MediaItem {
    uri: Url,
    date_taken: DateTime<Utc>,
    kind: MediaKind,
    mime_type: Option<String>,
    title: String,
    data_path: Option<PathBuf>,
    bucket: Option<Bucket>,
    container: Option<CollectionId>,
}

impl MediaItem {
    /// Create a detached item. It gets an owner once a collection adopts it.
    pub fn new(uri: Url, date_taken: DateTime<Utc>) -> Self {
        let title = uri
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .unwrap_or_default()
            .to_string();
        MediaItem {
            uri,
            date_taken,
            kind: MediaKind::Image,
            mime_type: None,
            title,
            data_path: None,
            bucket: None,
            container: None,
        }
    }

    pub fn with_kind(mut self, kind: MediaKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = Some(path.into());
        self
    }

    pub fn with_bucket(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.bucket = Some(Bucket {
            id: id.into(),
            name: name.into(),
        });
        self
    }

    /// Stamp the owning collection onto this item.
    pub(crate) fn adopt(mut self, owner: CollectionId) -> Self {
        self.container = Some(owner);
        self
    }

    pub fn uri(&self) -> &Url {
        &self.uri
    }

    pub fn date_taken(&self) -> DateTime<Utc> {
        self.date_taken
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    pub fn is_video(&self) -> bool {
        self.kind == MediaKind::Video
    }

    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn data_path(&self) -> Option<&Path> {
        self.data_path.as_deref()
    }

    pub fn bucket(&self) -> Option<&Bucket> {
        self.bucket.as_ref()
    }

    /// The collection this item came from, `None` while detached.
    pub fn container(&self) -> Option<CollectionId> {
        self.container
    }
}

impl PartialEq for MediaItem {
    fn eq(&self, other: &Self) -> bool {
        self.container == other.container && self.uri == other.uri
    }
}

impl Eq for MediaItem {}

impl Hash for MediaItem {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.container.hash(state);
        self.uri.hash(state);
    }
}
