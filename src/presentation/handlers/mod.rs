mod category;
mod generate;
mod health;
mod media;
pub mod responses;
mod video;

pub use category::{CategoryResponse, next_category_handler};
pub use generate::{
    ContentResponse, GeneratedMediaResponse, generate_audio_handler, generate_content_handler,
    generate_image_handler,
};
pub use health::{HealthResponse, health_handler};
pub use media::{MediaFileResponse, download_media_handler, list_media_handler};
pub use video::{VideoResponse, create_video_handler};
