use std::sync::Arc;

use mediaforge::application::ports::{ContentRepository, GeneratorError};
use mediaforge::application::services::{ContentService, ContentServiceError};
use mediaforge::domain::{CategoryId, ContentStatus};
use mediaforge::infrastructure::persistence::{
    InMemoryCategoryRepository, InMemoryContentRepository,
};

use crate::helpers::mocks::{MockGenerator, sample_category};

fn service(generator: MockGenerator) -> (ContentService, Arc<InMemoryContentRepository>) {
    let contents = Arc::new(InMemoryContentRepository::default());
    let service = ContentService::new(
        Arc::new(InMemoryCategoryRepository::new(vec![sample_category(1, "Finance")])),
        contents.clone(),
        Arc::new(generator),
    );
    (service, contents)
}

#[tokio::test]
async fn given_known_category_when_generating_then_content_is_saved_as_pending() {
    let (service, contents) = service(MockGenerator::default());

    let content = service
        .generate_for_category(CategoryId::new(1))
        .await
        .unwrap();

    assert_eq!(content.status, ContentStatus::Pending);
    assert_eq!(content.category_id, CategoryId::new(1));
    assert_eq!(content.prompt_image(), Some("A warm living room at dusk"));
    assert!(contents.get_by_id(content.id).await.unwrap().is_some());
}

#[tokio::test]
async fn given_unknown_category_when_generating_then_not_found_is_returned() {
    let (service, _) = service(MockGenerator::default());

    let result = service.generate_for_category(CategoryId::new(99)).await;

    assert!(matches!(
        result,
        Err(ContentServiceError::CategoryNotFound(id)) if id == CategoryId::new(99)
    ));
}

#[tokio::test]
async fn given_rate_limited_generator_when_generating_then_error_is_propagated() {
    let (service, _) = service(MockGenerator::rate_limited());

    let result = service.generate_for_category(CategoryId::new(1)).await;

    assert!(matches!(
        result,
        Err(ContentServiceError::Generation(GeneratorError::RateLimited))
    ));
}
