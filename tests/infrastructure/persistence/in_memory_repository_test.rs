use mediaforge::application::ports::{CategoryRepository, MediaRepository};
use mediaforge::domain::{ContentId, MediaFileType, NewMediaFile};
use mediaforge::infrastructure::persistence::{
    InMemoryCategoryRepository, InMemoryMediaRepository,
};

use crate::helpers::mocks::sample_category;

#[tokio::test]
async fn given_categories_when_picking_repeatedly_then_they_rotate() {
    let repository = InMemoryCategoryRepository::new(vec![
        sample_category(1, "Finance"),
        sample_category(2, "Health"),
        sample_category(3, "Travel"),
    ]);

    let mut picked = Vec::new();
    for _ in 0..4 {
        let category = repository.next_round_robin().await.unwrap().unwrap();
        assert!(category.last_picked_at.is_some());
        picked.push(category.id.as_i64());
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    }

    assert_eq!(picked, vec![1, 2, 3, 1]);
}

#[tokio::test]
async fn given_no_categories_when_picking_then_none_is_returned() {
    let repository = InMemoryCategoryRepository::default();

    assert!(repository.next_round_robin().await.unwrap().is_none());
}

#[tokio::test]
async fn given_media_for_several_contents_when_listing_then_only_matching_rows_are_returned() {
    let repository = InMemoryMediaRepository::default();
    for (content, file_type) in [
        (1, MediaFileType::Audio),
        (2, MediaFileType::Audio),
        (1, MediaFileType::Image),
    ] {
        repository
            .insert(&NewMediaFile {
                content_id: ContentId::new(content),
                file_type,
                file_name: format!("{}/{}", content, file_type),
                file_url: String::new(),
            })
            .await
            .unwrap();
    }

    let rows = repository
        .list_by_content(ContentId::new(1), None)
        .await
        .unwrap();
    let audio = repository
        .list_by_content(ContentId::new(1), Some(MediaFileType::Audio))
        .await
        .unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].file_type, MediaFileType::Image);
    assert_eq!(audio.len(), 1);
}
