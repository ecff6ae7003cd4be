mod ffmpeg_composer;

pub use ffmpeg_composer::{FfmpegVideoComposer, segment_filter};
