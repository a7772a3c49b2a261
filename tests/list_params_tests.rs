// ListParams and the list factory, against an in-memory media store.

use chrono::DateTime;
use url::Url;

use media_merge::collection::MediaCollection;
use media_merge::{
    DataLocation, Inclusion, ListParams, MediaItem, MediaKind, MemoryStore, SortOrder, Volume,
    make_list, make_list_for_uri,
};

fn image(id: u32, millis: i64) -> MediaItem {
    let uri = Url::parse(&format!("content://media/external/images/media/{id}")).unwrap();
    MediaItem::new(uri, DateTime::from_timestamp_millis(millis).unwrap())
}

fn video(id: u32, millis: i64) -> MediaItem {
    let uri = Url::parse(&format!("content://media/external/video/media/{id}")).unwrap();
    MediaItem::new(uri, DateTime::from_timestamp_millis(millis).unwrap()).with_kind(MediaKind::Video)
}

fn internal(id: u32, millis: i64) -> MediaItem {
    let uri = Url::parse(&format!("content://media/internal/images/media/{id}")).unwrap();
    MediaItem::new(uri, DateTime::from_timestamp_millis(millis).unwrap())
}

fn uris(list: &mut dyn MediaCollection) -> Vec<String> {
    (0..list.count())
        .map(|i| list.get_at(i).unwrap().unwrap().uri().to_string())
        .collect()
}

fn store() -> MemoryStore {
    let mut store = MemoryStore::new();
    store.insert(Volume::External, image(1, 100).with_bucket("cam", "Camera"));
    store.insert(Volume::External, image(2, 300).with_bucket("shots", "Screenshots"));
    store.insert(Volume::External, video(3, 200).with_bucket("cam", "Camera"));
    store.insert(Volume::Internal, internal(4, 250));
    store
}

// =============================================================================
// Test 1: Images, videos and internal images merge into one timeline
// =============================================================================
#[test]
fn all_locations_merge() {
    let store = store();
    let params = ListParams::new(DataLocation::All, Inclusion::default(), SortOrder::Descending, None);
    let mut list = make_list(&store, &params).unwrap();

    assert_eq!(
        uris(list.as_mut()),
        vec![
            "content://media/external/images/media/2",
            "content://media/internal/images/media/4",
            "content://media/external/video/media/3",
            "content://media/external/images/media/1",
        ]
    );
}

// =============================================================================
// Test 2: Bucket filter narrows every source
// =============================================================================
#[test]
fn bucket_filter() {
    let store = store();
    let params = ListParams::new(
        DataLocation::External,
        Inclusion::IMAGES | Inclusion::VIDEOS,
        SortOrder::Ascending,
        Some("cam".to_string()),
    );
    let mut list = make_list(&store, &params).unwrap();

    assert_eq!(
        uris(list.as_mut()),
        vec![
            "content://media/external/images/media/1",
            "content://media/external/video/media/3",
        ]
    );
    assert_eq!(list.bucket_ids().len(), 1);
}

// =============================================================================
// Test 3: Internal only skips the external volume
// =============================================================================
#[test]
fn internal_location_only() {
    let store = store();
    let params = ListParams::new(DataLocation::Internal, Inclusion::IMAGES, SortOrder::Ascending, None);
    let mut list = make_list(&store, &params).unwrap();
    assert_eq!(uris(list.as_mut()), vec!["content://media/internal/images/media/4"]);
}

// =============================================================================
// Test 4: Unmounted external storage contributes nothing
// =============================================================================
#[test]
fn unmounted_external_storage() {
    let mut store = store();
    store.set_external_storage(false);
    let params = ListParams::new(DataLocation::External, Inclusion::default(), SortOrder::Ascending, None);
    let list = make_list(&store, &params).unwrap();
    assert!(list.is_empty());
}

// =============================================================================
// Test 5: DRM images have no table
// =============================================================================
#[test]
fn drm_only_is_empty() {
    let store = store();
    let params = ListParams::new(DataLocation::All, Inclusion::DRM_IMAGES, SortOrder::Ascending, None);
    let list = make_list(&store, &params).unwrap();
    assert_eq!(list.count(), 0);
}

// =============================================================================
// Test 6: Empty params and single-item params
// =============================================================================
#[test]
fn empty_and_single_params() {
    let store = store();
    assert!(make_list(&store, &ListParams::empty()).unwrap().is_empty());

    let known = Url::parse("content://media/external/images/media/2").unwrap();
    let mut single = make_list(&store, &ListParams::single(known.clone())).unwrap();
    assert_eq!(single.count(), 1);
    let found = single.get_at(0).unwrap().unwrap();
    assert_eq!(found.date_taken().timestamp_millis(), 300);
    assert!(!single.remove_at(0).unwrap());

    let unknown = Url::parse("file:///sdcard/Download/picture.jpg").unwrap();
    let mut single = make_list(&store, &ListParams::single(unknown.clone())).unwrap();
    assert_eq!(single.get_for_uri(&unknown).unwrap().unwrap().title(), "picture.jpg");
}

// =============================================================================
// Test 7: Uri classification
// =============================================================================
#[test]
fn params_for_uri() {
    let sort = SortOrder::Descending;

    let drm = ListParams::for_uri(&Url::parse("content://drm/images/1").unwrap(), sort);
    assert_eq!(drm.inclusion, Inclusion::DRM_IMAGES);
    assert_eq!(drm.location, DataLocation::All);

    let video = ListParams::for_uri(&Url::parse("content://media/external/video/media/3").unwrap(), sort);
    assert_eq!(video.inclusion, Inclusion::VIDEOS);
    assert_eq!(video.location, DataLocation::External);

    let file = Url::parse("file:///sdcard/picture.jpg").unwrap();
    assert_eq!(ListParams::for_uri(&file, sort), ListParams::single(file.clone()));

    let bucket = Url::parse("content://media/external/images/media?bucketId=cam").unwrap();
    let params = ListParams::for_uri(&bucket, sort);
    assert_eq!(params.inclusion, Inclusion::IMAGES);
    assert_eq!(params.bucket_id.as_deref(), Some("cam"));
    assert_eq!(params.sort, sort);
}

// =============================================================================
// Test 8: Opening a video uri lists every external video
// =============================================================================
#[test]
fn list_for_video_uri() {
    let mut store = store();
    store.insert(Volume::External, video(5, 50));
    let uri = Url::parse("content://media/external/video/media/3").unwrap();
    let mut list = make_list_for_uri(&store, &uri, SortOrder::Ascending).unwrap();
    assert_eq!(
        uris(list.as_mut()),
        vec![
            "content://media/external/video/media/5",
            "content://media/external/video/media/3",
        ]
    );
}

// =============================================================================
// Test 9: Directory params
// =============================================================================
#[test]
fn internal_data_lists_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.jpg"), b"").unwrap();
    let uri = Url::from_directory_path(dir.path()).unwrap();

    let params = ListParams::internal_data(uri, Inclusion::IMAGES, SortOrder::Descending);
    let list = make_list(&MemoryStore::new(), &params).unwrap();
    assert_eq!(list.count(), 1);
}

// =============================================================================
// Test 10: Params survive encoding
// =============================================================================
#[test]
fn params_encode_decode() {
    let params = ListParams::new(
        DataLocation::External,
        Inclusion::IMAGES | Inclusion::VIDEOS,
        SortOrder::Ascending,
        Some("cam".to_string()),
    );
    let encoded = params.encode().unwrap();
    assert_eq!(ListParams::decode(&encoded).unwrap(), params);

    // Missing fields take their defaults.
    let partial = ListParams::decode(r#"{"empty":true}"#).unwrap();
    assert_eq!(partial, ListParams::empty());

    assert!(ListParams::decode("not json").is_err());
}
