use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;

use mediaforge::application::ports::{MediaRepository, VideoComposerError};
use mediaforge::application::services::{UploadedFile, VideoService, VideoServiceError};
use mediaforge::domain::{ContentId, MediaFileType};
use mediaforge::infrastructure::persistence::InMemoryMediaRepository;
use mediaforge::infrastructure::storage::LocalMediaStore;

use crate::helpers::mocks::{FailingMediaStore, MockComposer};

fn upload(name: &str, data: &'static [u8]) -> UploadedFile {
    UploadedFile {
        file_name: name.to_string(),
        data: Bytes::from_static(data),
    }
}

#[tokio::test]
async fn given_audio_and_images_when_creating_video_then_it_is_published() {
    let dir = tempfile::TempDir::new().unwrap();
    let composer = Arc::new(MockComposer::default());
    let media = Arc::new(InMemoryMediaRepository::default());
    let service = VideoService::new(
        composer.clone(),
        Arc::new(LocalMediaStore::new(dir.path().join("store"), "media").unwrap()),
        media.clone(),
        dir.path().join("work"),
        Duration::from_secs(60),
    );

    let video = service
        .create_video(
            ContentId::new(9),
            upload("voice.wav", b"RIFF"),
            vec![upload("a.png", b"a"), upload("../../b.png", b"b")],
        )
        .await
        .unwrap();

    assert!(video.file_name.starts_with("video_"));
    assert!(video.file_name.ends_with(".mp4"));
    assert!(video.video_url.unwrap().starts_with("file://"));

    let calls = composer.calls.lock().unwrap().clone();
    assert_eq!(calls.len(), 1);
    let (_, images) = &calls[0];
    assert!(images[0].ends_with("image_0_a.png"));
    assert!(images[1].ends_with("image_1_b.png"));

    let rows = media
        .list_by_content(ContentId::new(9), Some(MediaFileType::Video))
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].file_name, format!("9/{}", video.file_name));
}

#[tokio::test]
async fn given_no_images_when_creating_video_then_error_is_returned() {
    let dir = tempfile::TempDir::new().unwrap();
    let service = VideoService::new(
        Arc::new(MockComposer::default()),
        Arc::new(FailingMediaStore),
        Arc::new(InMemoryMediaRepository::default()),
        dir.path().to_path_buf(),
        Duration::from_secs(60),
    );

    let result = service
        .create_video(ContentId::new(1), upload("a.wav", b"x"), Vec::new())
        .await;

    assert!(matches!(
        result,
        Err(VideoServiceError::Composition(VideoComposerError::NoImages))
    ));
}

#[tokio::test]
async fn given_failing_store_when_creating_video_then_it_succeeds_without_url() {
    let dir = tempfile::TempDir::new().unwrap();
    let media = Arc::new(InMemoryMediaRepository::default());
    let service = VideoService::new(
        Arc::new(MockComposer::default()),
        Arc::new(FailingMediaStore),
        media.clone(),
        dir.path().to_path_buf(),
        Duration::from_secs(60),
    );

    let video = service
        .create_video(ContentId::new(1), upload("a.wav", b"x"), vec![upload("i.png", b"i")])
        .await
        .unwrap();

    assert!(video.video_url.is_none());
    assert!(
        media
            .list_by_content(ContentId::new(1), None)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn given_finished_request_when_checking_work_dir_then_scratch_is_removed() {
    let dir = tempfile::TempDir::new().unwrap();
    let work = dir.path().join("work");
    let service = VideoService::new(
        Arc::new(MockComposer::default()),
        Arc::new(FailingMediaStore),
        Arc::new(InMemoryMediaRepository::default()),
        work.clone(),
        Duration::from_secs(60),
    );

    service
        .create_video(ContentId::new(1), upload("a.wav", b"x"), vec![upload("i.png", b"i")])
        .await
        .unwrap();

    assert_eq!(std::fs::read_dir(&work).unwrap().count(), 0);
}
