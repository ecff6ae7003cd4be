use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentStatus {
    Pending,
    Processing,
    Published,
    Failed,
}

impl ContentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentStatus::Pending => "pending",
            ContentStatus::Processing => "processing",
            ContentStatus::Published => "published",
            ContentStatus::Failed => "failed",
        }
    }
}

impl FromStr for ContentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ContentStatus::Pending),
            "processing" => Ok(ContentStatus::Processing),
            "published" => Ok(ContentStatus::Published),
            "failed" => Ok(ContentStatus::Failed),
            _ => Err(format!("Invalid content status: {}", s)),
        }
    }
}

impl fmt::Display for ContentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
