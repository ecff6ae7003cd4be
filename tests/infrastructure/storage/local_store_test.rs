use std::io::Write;
use std::time::Duration;

use bytes::Bytes;
use futures::TryStreamExt;

use mediaforge::application::ports::{MediaStore, MediaStoreError};
use mediaforge::domain::{ContentId, ObjectKey};
use mediaforge::infrastructure::storage::LocalMediaStore;

fn create_test_store() -> (tempfile::TempDir, LocalMediaStore) {
    let dir = tempfile::TempDir::new().unwrap();
    let store = LocalMediaStore::new(dir.path().to_path_buf(), "media").unwrap();
    (dir, store)
}

async fn fetch(store: &LocalMediaStore, key: &ObjectKey) -> Vec<u8> {
    let chunks: Vec<Bytes> = store
        .get_stream(key)
        .await
        .unwrap()
        .try_collect()
        .await
        .unwrap();
    chunks.concat()
}

#[tokio::test]
async fn given_bytes_when_putting_then_object_is_readable_as_stream() {
    let (_dir, store) = create_test_store();
    let key = ObjectKey::generated(ContentId::new(1), "wav");

    store
        .put(&key, Bytes::from_static(b"RIFF...."), "audio/wav")
        .await
        .unwrap();

    assert_eq!(fetch(&store, &key).await, b"RIFF....");
}

#[tokio::test]
async fn given_new_store_when_created_then_bucket_directory_exists() {
    let (dir, store) = create_test_store();

    store.ensure_bucket().await.unwrap();

    assert!(dir.path().join("media").is_dir());
    assert_eq!(store.bucket(), "media");
}

#[tokio::test]
async fn given_removed_bucket_directory_when_checking_existence_then_it_is_not_recreated() {
    let (dir, store) = create_test_store();
    std::fs::remove_dir_all(dir.path().join("media")).unwrap();

    let exists = store.bucket_exists().await.unwrap();

    assert!(!exists);
    assert!(!dir.path().join("media").exists());
}

#[tokio::test]
async fn given_local_file_when_putting_file_then_size_and_content_match() {
    let (_dir, store) = create_test_store();
    let mut source = tempfile::NamedTempFile::new().unwrap();
    source.write_all(&vec![42u8; 10_000]).unwrap();
    let key = ObjectKey::named(ContentId::new(2), "video_1.mp4");

    let size = store
        .put_file(&key, source.path(), "video/mp4")
        .await
        .unwrap();

    assert_eq!(size, 10_000);
    assert_eq!(fetch(&store, &key).await, vec![42u8; 10_000]);
}

#[tokio::test]
async fn given_missing_object_when_streaming_then_not_found_is_returned() {
    let (_dir, store) = create_test_store();

    let result = store.get_stream(&ObjectKey::from_raw("9/missing.png")).await;

    assert!(matches!(result, Err(MediaStoreError::NotFound(_))));
}

#[tokio::test]
async fn given_stored_object_when_presigning_then_file_url_points_into_bucket() {
    let (_dir, store) = create_test_store();
    let key = ObjectKey::named(ContentId::new(3), "clip.mp4");
    store
        .put(&key, Bytes::from_static(b"x"), "video/mp4")
        .await
        .unwrap();

    let url = store
        .presigned_url(&key, Duration::from_secs(60))
        .await
        .unwrap();

    assert!(url.starts_with("file://"));
    assert!(url.ends_with("3/clip.mp4"));
}
