use bitflags::bitflags;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::collection::{DirectoryCollection, EmptyCollection, MediaCollection, SingleItemCollection};
use crate::error::Result;
use crate::merge::MergedMediaList;
use crate::store::{MediaStore, Volume};
use crate::types::{MediaItem, MediaKind, SortOrder};

const DRM_PREFIX: &str = "content://drm";
const EXTERNAL_VIDEO_PREFIX: &str = "content://media/external/video";
const EXTERNAL_IMAGES_PREFIX: &str = "content://media/external/images/media";
const INTERNAL_IMAGES_PREFIX: &str = "content://media/internal/images/media";

/// Which volumes a list draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataLocation {
    None,
    Internal,
    External,
    /// A plain directory named by `ListParams::uri`.
    InternalData,
    #[default]
    All,
}

bitflags! {
    /// Media kinds a list includes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Inclusion: u8 {
        const IMAGES     = 0b0000_0001;
        const DRM_IMAGES = 0b0000_0010;
        const VIDEOS     = 0b0000_0100;
    }
}

impl Default for Inclusion {
    fn default() -> Self {
        Inclusion::IMAGES | Inclusion::VIDEOS
    }
}

/// Everything needed to build a media list, apart from the store itself.
///
/// Params are plain data so they can be encoded and handed from one screen
/// to the next; the receiver rebuilds the same list with [`make_list`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ListParams {
    pub location: DataLocation,
    pub inclusion: Inclusion,
    pub sort: SortOrder,
    pub bucket_id: Option<String>,
    /// A single item, or a directory when `location` is `InternalData`.
    pub uri: Option<Url>,
    /// Build an empty list regardless of everything else.
    pub empty: bool,
}

impl ListParams {
    pub fn new(
        location: DataLocation,
        inclusion: Inclusion,
        sort: SortOrder,
        bucket_id: Option<String>,
    ) -> Self {
        ListParams {
            location,
            inclusion,
            sort,
            bucket_id,
            ..Default::default()
        }
    }

    pub fn empty() -> Self {
        ListParams {
            empty: true,
            ..Default::default()
        }
    }

    pub fn single(uri: Url) -> Self {
        ListParams {
            uri: Some(uri),
            ..Default::default()
        }
    }

    /// A directory of loose files.
    pub fn internal_data(dir: Url, inclusion: Inclusion, sort: SortOrder) -> Self {
        ListParams {
            location: DataLocation::InternalData,
            inclusion,
            sort,
            uri: Some(dir),
            ..Default::default()
        }
    }

    /// Pick params for a list opened on `uri`.
    ///
    /// DRM and video uris open the whole table of that kind. Uris outside
    /// the image tables open just that one item. Image table uris open all
    /// images, narrowed to the `bucketId` query parameter if present.
    pub fn for_uri(uri: &Url, sort: SortOrder) -> Self {
        let text = uri.as_str();
        if text.starts_with(DRM_PREFIX) {
            ListParams::new(DataLocation::All, Inclusion::DRM_IMAGES, sort, None)
        } else if text.starts_with(EXTERNAL_VIDEO_PREFIX) {
            ListParams::new(DataLocation::External, Inclusion::VIDEOS, sort, None)
        } else if is_single_item_uri(text) {
            ListParams::single(uri.clone())
        } else {
            let bucket_id = uri
                .query_pairs()
                .find(|(key, _)| key == "bucketId")
                .map(|(_, value)| value.into_owned());
            ListParams::new(DataLocation::All, Inclusion::IMAGES, sort, bucket_id)
        }
    }

    /// Encode as JSON.
    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode from JSON produced by [`ListParams::encode`].
    pub fn decode(encoded: &str) -> Result<Self> {
        Ok(serde_json::from_str(encoded)?)
    }
}

fn is_single_item_uri(text: &str) -> bool {
    !text.starts_with(EXTERNAL_IMAGES_PREFIX) && !text.starts_with(INTERNAL_IMAGES_PREFIX)
}

/// Build the collection described by `params`.
///
/// Sources are queried per volume and kind. Empty ones are closed and
/// dropped; a single survivor is returned as is, several are merged.
pub fn make_list(store: &dyn MediaStore, params: &ListParams) -> Result<Box<dyn MediaCollection>> {
    if params.empty {
        return Ok(Box::new(EmptyCollection::new()));
    }

    if let Some(uri) = &params.uri {
        if params.location == DataLocation::InternalData {
            return Ok(Box::new(DirectoryCollection::open_uri(uri, params.sort)?));
        }
        let item = store
            .item_for_uri(uri)?
            .unwrap_or_else(|| MediaItem::new(uri.clone(), DateTime::<Utc>::UNIX_EPOCH));
        return Ok(Box::new(SingleItemCollection::new(item)));
    }

    let bucket_id = params.bucket_id.as_deref();
    let mut sources = Vec::new();
    if store.has_external_storage() && params.location != DataLocation::Internal {
        if params.inclusion.contains(Inclusion::IMAGES) {
            sources.push(store.query(Volume::External, MediaKind::Image, params.sort, bucket_id)?);
        }
        if params.inclusion.contains(Inclusion::VIDEOS) {
            sources.push(store.query(Volume::External, MediaKind::Video, params.sort, bucket_id)?);
        }
    }
    if matches!(params.location, DataLocation::Internal | DataLocation::All)
        && params.inclusion.contains(Inclusion::IMAGES)
    {
        sources.push(store.query(Volume::Internal, MediaKind::Image, params.sort, bucket_id)?);
    }
    // DRM_IMAGES has no backing table; it yields no source.

    let mut kept = Vec::with_capacity(sources.len());
    for mut source in sources {
        if source.is_empty() {
            source.close()?;
        } else {
            kept.push(source);
        }
    }
    log::debug!("make_list {:?}: {} non-empty sources", params, kept.len());

    if kept.len() > 1 {
        return Ok(Box::new(MergedMediaList::new(kept, params.sort)?));
    }
    Ok(kept
        .pop()
        .unwrap_or_else(|| Box::new(EmptyCollection::new()) as Box<dyn MediaCollection>))
}

/// Build the list a gallery opened on `uri` should show.
pub fn make_list_for_uri(
    store: &dyn MediaStore,
    uri: &Url,
    sort: SortOrder,
) -> Result<Box<dyn MediaCollection>> {
    make_list(store, &ListParams::for_uri(uri, sort))
}
