mod in_memory_repository;
mod pg_category_repository;
mod pg_content_repository;
mod pg_media_repository;
mod rows;

pub use in_memory_repository::{
    InMemoryCategoryRepository, InMemoryContentRepository, InMemoryMediaRepository,
};
pub use pg_category_repository::PgCategoryRepository;
pub use pg_content_repository::PgContentRepository;
pub use pg_media_repository::PgMediaRepository;
