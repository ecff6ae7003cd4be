mod audio_format;
mod category;
mod content;
mod content_status;
mod generated_media;
mod media_file;
mod object_key;
mod response_chunk;
pub mod wav_container;

pub use audio_format::AudioFormat;
pub use category::{Category, CategoryId};
pub use content::{Content, ContentId, GeneratedContent};
pub use content_status::ContentStatus;
pub use generated_media::{GeneratedMedia, extension_for, mime_for_file_name};
pub use media_file::{MediaFile, MediaFileId, MediaFileType, NewMediaFile};
pub use object_key::ObjectKey;
pub use response_chunk::ResponseChunk;
pub use wav_container::{WAV_HEADER_LEN, WavContainer, WavHeader};
