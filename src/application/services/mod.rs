mod content_service;
mod media_service;
mod video_service;

pub use content_service::{ContentService, ContentServiceError};
pub use media_service::{MediaService, MediaServiceError, StoredMedia};
pub use video_service::{RenderedVideo, UploadedFile, VideoService, VideoServiceError};
