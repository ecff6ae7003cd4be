use bytes::Bytes;

use super::GeneratedMedia;

/// One part of a (possibly streamed) model response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseChunk {
    Text(String),
    Binary { mime_type: String, data: Bytes },
}

impl ResponseChunk {
    pub fn into_media(self) -> Option<GeneratedMedia> {
        match self {
            ResponseChunk::Binary { mime_type, data } => Some(GeneratedMedia::new(data, mime_type)),
            ResponseChunk::Text(_) => None,
        }
    }
}
