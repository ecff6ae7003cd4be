use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::{VideoComposer, VideoComposerError};
use crate::presentation::config::VideoSettings;

const CONCAT_LIST: &str = "segments.txt";
const MAX_ZOOM: f64 = 1.3;
const ZOOM_STEP: f64 = 0.002;

/// Renders slideshow videos by shelling out to `ffmpeg` and `ffprobe`.
pub struct FfmpegVideoComposer {
    ffmpeg: PathBuf,
    ffprobe: PathBuf,
    fps: u32,
    width: u32,
    height: u32,
}

impl FfmpegVideoComposer {
    pub fn new(settings: &VideoSettings) -> Self {
        Self {
            ffmpeg: PathBuf::from(&settings.ffmpeg_path),
            ffprobe: PathBuf::from(&settings.ffprobe_path),
            fps: settings.fps,
            width: settings.width,
            height: settings.height,
        }
    }

    #[tracing::instrument(skip(self))]
    async fn audio_duration(&self, audio: &Path) -> Result<f64, VideoComposerError> {
        let output = Command::new(&self.ffprobe)
            .args(["-v", "error", "-show_entries", "format=duration", "-of", "csv=p=0"])
            .arg(audio)
            .output()
            .await?;

        if !output.status.success() {
            return Err(VideoComposerError::Probe(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        stdout
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|d| d.is_finite() && *d > 0.0)
            .ok_or_else(|| VideoComposerError::Probe(format!("unparseable duration '{}'", stdout.trim())))
    }

    async fn render_segment(
        &self,
        index: usize,
        image: &Path,
        seconds: f64,
        output: &Path,
    ) -> Result<(), VideoComposerError> {
        let frames = (seconds * f64::from(self.fps)) as u32;
        let filter = segment_filter(self.width, self.height, self.fps, frames);

        let result = Command::new(&self.ffmpeg)
            .args(["-loop", "1", "-i"])
            .arg(image)
            .args(["-t", &format!("{:.2}", seconds), "-vf", &filter])
            .args(["-c:v", "libx264", "-pix_fmt", "yuv420p", "-preset", "medium", "-crf", "23", "-y"])
            .arg(output)
            .output()
            .await?;

        if !result.status.success() {
            return Err(VideoComposerError::Segment {
                index,
                reason: String::from_utf8_lossy(&result.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}

/// Scales and crops to the target frame, then applies a slow centred zoom.
pub fn segment_filter(width: u32, height: u32, fps: u32, frames: u32) -> String {
    format!(
        "scale={w}:{h}:force_original_aspect_ratio=increase,crop={w}:{h},\
         zoompan=z='min(1+{step}*on,{max})':d={frames}:x='iw/2-(iw/zoom/2)':y='ih/2-(ih/zoom/2)':s={w}x{h}:fps={fps}",
        w = width,
        h = height,
        step = ZOOM_STEP,
        max = MAX_ZOOM,
        frames = frames,
        fps = fps,
    )
}

#[async_trait]
impl VideoComposer for FfmpegVideoComposer {
    #[tracing::instrument(skip(self, images), fields(images = images.len()))]
    async fn compose(
        &self,
        audio: &Path,
        images: &[PathBuf],
        output: &Path,
    ) -> Result<(), VideoComposerError> {
        if images.is_empty() {
            return Err(VideoComposerError::NoImages);
        }

        let duration = self.audio_duration(audio).await?;
        let per_image = duration / images.len() as f64;
        tracing::debug!(duration, per_image, "Rendering segments");

        let work_dir = output.parent().unwrap_or_else(|| Path::new("."));
        let mut list = String::new();
        for (index, image) in images.iter().enumerate() {
            let segment = work_dir.join(format!("segment_{}.mp4", index));
            self.render_segment(index, image, per_image, &segment).await?;
            list.push_str(&format!("file '{}'\n", segment.display()));
        }

        let list_path = work_dir.join(CONCAT_LIST);
        tokio::fs::write(&list_path, list).await?;

        let result = Command::new(&self.ffmpeg)
            .args(["-f", "concat", "-safe", "0", "-i"])
            .arg(&list_path)
            .arg("-i")
            .arg(audio)
            .args(["-c:v", "copy", "-c:a", "aac", "-shortest", "-movflags", "+faststart", "-y"])
            .arg(output)
            .output()
            .await?;

        if !result.status.success() {
            return Err(VideoComposerError::Merge(
                String::from_utf8_lossy(&result.stderr).trim().to_string(),
            ));
        }

        tracing::info!(output = %output.display(), "Video rendered");
        Ok(())
    }

    fn is_available(&self) -> bool {
        which::which(&self.ffmpeg).is_ok() && which::which(&self.ffprobe).is_ok()
    }
}
