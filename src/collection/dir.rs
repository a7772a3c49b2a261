use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use mime_guess::mime;
use url::Url;
use xxhash_rust::xxh3::xxh3_64;

use crate::collection::{MediaCollection, buckets_of};
use crate::error::{Error, Result};
use crate::types::{CollectionId, MediaItem, MediaKind, SortOrder};

/// A collection backed by the regular files of one directory.
///
/// The directory is listed once, on open. An item's date taken is the file's
/// modification time. Files whose extension does not map to an image or
/// video mime type are skipped.
///
/// Removing an item only drops it from the listing. The file stays on disk.
pub struct DirectoryCollection {
    id: CollectionId,
    dir: PathBuf,
    items: Vec<MediaItem>,
}

impl DirectoryCollection {
    /// List `dir` and sort its media files by modification time in `order`.
    pub fn open(dir: &Path, order: SortOrder) -> Result<Self> {
        let id = CollectionId::next();
        let bucket_id = bucket_id_for(dir);
        let bucket_name = dir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut items = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let metadata = entry.metadata()?;
            if !metadata.is_file() {
                continue;
            }
            let path = entry.path();
            let Some(guessed) = mime_guess::from_path(&path).first() else {
                log::warn!("Skipping {:?}: unknown media type", path);
                continue;
            };
            let kind = if guessed.type_() == mime::IMAGE {
                MediaKind::Image
            } else if guessed.type_() == mime::VIDEO {
                MediaKind::Video
            } else {
                log::warn!("Skipping {:?}: {} is not image or video", path, guessed);
                continue;
            };
            let uri = Url::from_file_path(&path)
                .map_err(|()| Error::InvalidUri(path.display().to_string()))?;
            let modified: DateTime<Utc> = metadata.modified()?.into();

            log::debug!("Found: {:?}, modified={}", path, modified);
            items.push(
                MediaItem::new(uri, modified)
                    .with_kind(kind)
                    .with_mime_type(guessed.essence_str())
                    .with_title(entry.file_name().to_string_lossy())
                    .with_data_path(path.clone())
                    .with_bucket(bucket_id.clone(), bucket_name.clone())
                    .adopt(id),
            );
        }

        // read_dir order is unspecified; file name breaks timestamp ties
        items.sort_by(|a, b| a.title().cmp(b.title()));
        items.sort_by(|a, b| order.compare(&a.date_taken(), &b.date_taken()));

        Ok(DirectoryCollection {
            id,
            dir: dir.to_path_buf(),
            items,
        })
    }

    /// Open the directory named by a `file://` uri.
    pub fn open_uri(uri: &Url, order: SortOrder) -> Result<Self> {
        let dir = uri
            .to_file_path()
            .map_err(|()| Error::InvalidUri(uri.to_string()))?;
        Self::open(&dir, order)
    }
}

/// Bucket ids are a hash of the lower-cased directory path, so the same
/// folder always lands in the same bucket.
pub fn bucket_id_for(dir: &Path) -> String {
    let lowered = dir.to_string_lossy().to_lowercase();
    xxh3_64(lowered.as_bytes()).to_string()
}

impl MediaCollection for DirectoryCollection {
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
        let removed = self.items.remove(index);
        log::debug!("Dropped {} from listing of {:?}", removed.uri(), self.dir);
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
