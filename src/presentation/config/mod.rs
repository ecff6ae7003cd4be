mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    ContentSettings, DatabaseSettings, GeminiSettings, LoggingSettings, ServerSettings, Settings,
    StorageProvider, StorageSettings, VideoSettings,
};
