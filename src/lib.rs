//! # Media Merge
//!
//! Sorted media collections, and a lazily merged view over several of them.
//!
//! ## Core idea
//! A gallery shows internal images, external images and videos as one
//! timeline. Each source is already sorted by date taken, so instead of
//! copying and re-sorting everything, `MergedMediaList` runs a k-way merge
//! on demand and remembers which source served each stretch of positions.
//! Random access then costs a walk over that short memo instead of a
//! re-merge.

pub mod collection;
pub mod error;
pub mod merge;
pub mod params;
pub mod store;
pub mod types;

// Public re-exports for the top-level API
pub use collection::MediaCollection;
pub use error::{Error, Result};
pub use merge::MergedMediaList;
pub use params::{DataLocation, Inclusion, ListParams, make_list, make_list_for_uri};
pub use store::{MediaStore, MemoryStore, Volume};
pub use types::{CollectionId, MediaItem, MediaKind, SortOrder};
