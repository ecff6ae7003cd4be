use bytes::Bytes;

/// Binary artifact returned by a generation call, with its declared MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedMedia {
    pub data: Bytes,
    pub mime_type: String,
}

impl GeneratedMedia {
    pub fn new(data: impl Into<Bytes>, mime_type: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            mime_type: mime_type.into(),
        }
    }

    /// MIME type without parameters, lowercased.
    pub fn essence(&self) -> String {
        essence(&self.mime_type)
    }

    pub fn is_audio(&self) -> bool {
        self.essence().starts_with("audio/")
    }

    /// File extension for containers that can be written as-is. Raw PCM
    /// (`audio/L16` and friends) has none and must be wrapped first.
    pub fn extension(&self) -> Option<&'static str> {
        extension_for(&self.mime_type)
    }
}

pub fn extension_for(mime_type: &str) -> Option<&'static str> {
    match essence(mime_type).as_str() {
        "audio/wav" | "audio/x-wav" | "audio/wave" => Some("wav"),
        "audio/mpeg" | "audio/mp3" => Some("mp3"),
        "audio/ogg" => Some("ogg"),
        "audio/flac" => Some("flac"),
        "image/png" => Some("png"),
        "image/jpeg" => Some("jpg"),
        "image/webp" => Some("webp"),
        "video/mp4" => Some("mp4"),
        _ => None,
    }
}

fn essence(mime_type: &str) -> String {
    mime_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Content type to serve a stored object with, judged by its file name.
pub fn mime_for_file_name(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "wav" => "audio/wav",
        "mp3" => "audio/mpeg",
        "ogg" => "audio/ogg",
        "flac" => "audio/flac",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "mp4" => "video/mp4",
        _ => "application/octet-stream",
    }
}
