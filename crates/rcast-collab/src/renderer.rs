//! FFmpeg renderer for videos and thumbnails.
//!
//! Renders a 1080x1920 short from the script title over a solid background,
//! and a single-frame thumbnail, into the configured output directory. The
//! returned paths are handed through the pipeline unchanged.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use chrono::Utc;
use tokio::process::Command;
use tracing::{debug, info};

use rcast_models::Script;
use rcast_pipeline::{CollaboratorError, CollaboratorResult, VideoRenderer};

use crate::error::{CollabError, CollabResult};

const BACKGROUND: &str = "0x101020";
const VIDEO_SIZE: &str = "1080x1920";
const THUMBNAIL_SIZE: &str = "1280x720";

/// Renders artifacts by shelling out to `ffmpeg`.
pub struct FfmpegRenderer {
    output_dir: PathBuf,
    duration_secs: u32,
}

impl FfmpegRenderer {
    pub fn new(output_dir: impl Into<PathBuf>, duration_secs: u32) -> Self {
        Self {
            output_dir: output_dir.into(),
            duration_secs,
        }
    }

    /// Create from `RENDER_OUTPUT_DIR` and `RENDER_DURATION_SECS`.
    pub fn from_env() -> CollabResult<Self> {
        let output_dir =
            std::env::var("RENDER_OUTPUT_DIR").unwrap_or_else(|_| "/tmp/reelcast".to_string());
        let duration_secs = std::env::var("RENDER_DURATION_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(45);
        std::fs::create_dir_all(&output_dir)?;
        Ok(Self::new(output_dir, duration_secs))
    }

    async fn render_video_file(&self, script: &Script) -> CollabResult<PathBuf> {
        let output = self.output_path(&script.title, "mp4");
        let args = video_args(script, self.duration_secs, &output);
        info!("Rendering video to {}", output.display());
        run_ffmpeg(&args).await?;
        Ok(output)
    }

    async fn render_thumbnail_file(&self, script: &Script) -> CollabResult<PathBuf> {
        let output = self.output_path(&script.title, "png");
        let args = thumbnail_args(script, &output);
        info!("Rendering thumbnail to {}", output.display());
        run_ffmpeg(&args).await?;
        Ok(output)
    }

    fn output_path(&self, title: &str, extension: &str) -> PathBuf {
        let name = format!(
            "{}-{}.{}",
            slug(title),
            Utc::now().timestamp_millis(),
            extension
        );
        self.output_dir.join(name)
    }
}

fn video_args(script: &Script, duration_secs: u32, output: &Path) -> Vec<String> {
    vec![
        "-y".to_string(),
        "-loglevel".to_string(),
        "error".to_string(),
        "-f".to_string(),
        "lavfi".to_string(),
        "-i".to_string(),
        format!(
            "color=c={}:s={}:d={}",
            BACKGROUND, VIDEO_SIZE, duration_secs
        ),
        "-vf".to_string(),
        title_filter(&script.title, 64),
        "-c:v".to_string(),
        "libx264".to_string(),
        "-pix_fmt".to_string(),
        "yuv420p".to_string(),
        output.display().to_string(),
    ]
}

fn thumbnail_args(script: &Script, output: &Path) -> Vec<String> {
    vec![
        "-y".to_string(),
        "-loglevel".to_string(),
        "error".to_string(),
        "-f".to_string(),
        "lavfi".to_string(),
        "-i".to_string(),
        format!("color=c={}:s={}:d=1", BACKGROUND, THUMBNAIL_SIZE),
        "-frames:v".to_string(),
        "1".to_string(),
        "-vf".to_string(),
        title_filter(&script.title, 48),
        output.display().to_string(),
    ]
}

fn title_filter(title: &str, font_size: u32) -> String {
    format!(
        "drawtext=text='{}':fontcolor=white:fontsize={}:x=(w-text_w)/2:y=(h-text_h)/2",
        escape_drawtext(title),
        font_size
    )
}

/// Escape characters with meaning inside an ffmpeg drawtext value.
fn escape_drawtext(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '\'' | ':' | '%' => {
                escaped.push('\\');
                escaped.push(c);
            }
            _ => escaped.push(c),
        }
    }
    escaped
}

/// File-safe slug of a script title.
fn slug(title: &str) -> String {
    let mut slug = String::new();
    let mut last_dash = true;
    for c in title.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
        if slug.len() >= 40 {
            break;
        }
    }
    let slug = slug.trim_matches('-').to_string();
    if slug.is_empty() {
        "reel".to_string()
    } else {
        slug
    }
}

async fn run_ffmpeg(args: &[String]) -> CollabResult<()> {
    debug!("ffmpeg {}", args.join(" "));
    let output = Command::new("ffmpeg")
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let tail: String = stderr
            .lines()
            .rev()
            .take(3)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect::<Vec<_>>()
            .join("; ");
        return Err(CollabError::Ffmpeg(format!(
            "exit status {}: {}",
            output.status, tail
        )));
    }
    Ok(())
}

#[async_trait]
impl VideoRenderer for FfmpegRenderer {
    async fn render_video(&self, script: &Script) -> CollaboratorResult<PathBuf> {
        self.render_video_file(script)
            .await
            .map_err(CollaboratorError::from)
    }

    async fn render_thumbnail(&self, script: &Script) -> CollaboratorResult<PathBuf> {
        self.render_thumbnail_file(script)
            .await
            .map_err(CollaboratorError::from)
    }
}
