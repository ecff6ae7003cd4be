use std::fmt;

use uuid::Uuid;

use super::ContentId;

/// Location of an artifact inside the media bucket, always namespaced by
/// the owning content id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectKey(String);

impl ObjectKey {
    pub fn generated(content_id: ContentId, extension: &str) -> Self {
        Self(format!("{}/{}.{}", content_id, Uuid::new_v4(), extension))
    }

    pub fn named(content_id: ContentId, file_name: &str) -> Self {
        Self(format!("{}/{}", content_id, file_name))
    }

    pub fn from_raw(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    /// Path under which the API advertises the object.
    pub fn public_url(&self, bucket: &str) -> String {
        format!("/files/{}/{}", bucket, self.0)
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
