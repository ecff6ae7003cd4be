mod category_repository;
mod content_generator;
mod content_repository;
mod media_repository;
mod media_store;
mod repository_error;
mod video_composer;

pub use category_repository::CategoryRepository;
pub use content_generator::{ContentGenerator, GeneratorError};
pub use content_repository::ContentRepository;
pub use media_repository::MediaRepository;
pub use media_store::{MediaStore, MediaStoreError, ObjectStream};
pub use repository_error::RepositoryError;
pub use video_composer::{VideoComposer, VideoComposerError};
