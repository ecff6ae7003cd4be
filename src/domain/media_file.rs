use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use super::ContentId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MediaFileId(i64);

impl MediaFileId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for MediaFileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaFileType {
    Audio,
    Image,
    Video,
}

impl MediaFileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaFileType::Audio => "audio",
            MediaFileType::Image => "image",
            MediaFileType::Video => "video",
        }
    }
}

impl FromStr for MediaFileType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "audio" => Ok(MediaFileType::Audio),
            "image" => Ok(MediaFileType::Image),
            "video" => Ok(MediaFileType::Video),
            _ => Err(format!("Invalid media file type: {}", s)),
        }
    }
}

impl fmt::Display for MediaFileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMediaFile {
    pub content_id: ContentId,
    pub file_type: MediaFileType,
    pub file_name: String,
    pub file_url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MediaFile {
    pub id: MediaFileId,
    pub content_id: ContentId,
    pub file_type: MediaFileType,
    pub file_name: String,
    pub file_url: String,
    pub created_at: DateTime<Utc>,
}

impl MediaFile {
    /// Name offered to browsers when the object is downloaded.
    pub fn download_name(&self) -> &str {
        self.file_name
            .rsplit('/')
            .next()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.file_name)
    }
}
