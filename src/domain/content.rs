use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CategoryId, ContentStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentId(i64);

impl ContentId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Script and visual prompt returned by the model, shaped as the JSON the
/// prompt asks for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedContent {
    pub title: String,
    pub caption: String,
    pub script_text: String,
    pub prompt_image: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Content {
    pub id: ContentId,
    pub category_id: CategoryId,
    pub title: String,
    pub caption: String,
    pub script_text: String,
    pub metadata: serde_json::Value,
    pub status: ContentStatus,
    pub created_at: DateTime<Utc>,
}

impl Content {
    pub fn prompt_image(&self) -> Option<&str> {
        self.metadata.get("promptImage").and_then(|v| v.as_str())
    }
}

impl GeneratedContent {
    pub fn metadata(&self) -> serde_json::Value {
        serde_json::json!({ "promptImage": self.prompt_image })
    }
}
