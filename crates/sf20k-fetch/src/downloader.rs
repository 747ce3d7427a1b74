//! The downloader seam and its `yt-dlp` implementation.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use sf20k_core::{Error, Resolution, Result, VideoRef};

use crate::options::DownloadOptions;

/// Default program name of the external downloader.
pub const YT_DLP: &str = "yt-dlp";

/// Something that can fetch one video to a destination file.
#[async_trait]
pub trait Downloader: Send + Sync {
    /// Downloads `video` to `dest`.
    async fn fetch(&self, video: &VideoRef, dest: &Path) -> Result<()>;

    /// Short name used in log lines.
    fn name(&self) -> &str;
}

/// Downloads videos by running `yt-dlp`.
///
/// Format sorting prefers H.264 video with M4A audio so the output plays
/// in QuickTime and decodes quickly.
#[derive(Debug, Clone)]
pub struct YtDlp {
    program: PathBuf,
    resolution: Resolution,
    threads: usize,
    silence_errors: bool,
}

impl YtDlp {
    /// Creates a downloader honouring the resolution, fragment threads, and
    /// error silencing of `options`.
    pub fn new(options: &DownloadOptions) -> Self {
        Self {
            program: PathBuf::from(YT_DLP),
            resolution: options.resolution,
            threads: options.threads,
            silence_errors: options.silence_errors,
        }
    }

    /// Uses a specific `yt-dlp` executable instead of the one on `PATH`.
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Program that will be executed.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Command-line arguments for one download.
    pub fn args(&self, video: &VideoRef, dest: &Path) -> Vec<String> {
        let height = self.resolution.height();
        let mut args = vec![
            "-S".to_string(),
            "vcodec:h264,res,acodec:m4a".to_string(),
            "-f".to_string(),
            format!("bestvideo[height<={height}]+bestaudio/best[height<={height}]"),
            "-o".to_string(),
            dest.to_string_lossy().into_owned(),
            "--concurrent-fragments".to_string(),
            self.threads.to_string(),
        ];
        if self.silence_errors {
            args.push("--no-warnings".to_string());
            args.push("--ignore-errors".to_string());
        }
        args.push(video.video_url.clone());
        args
    }
}

#[async_trait]
impl Downloader for YtDlp {
    async fn fetch(&self, video: &VideoRef, dest: &Path) -> Result<()> {
        let args = self.args(video, dest);
        tracing::debug!(
            video_id = %video.video_id,
            program = %self.program.display(),
            "Spawning downloader"
        );

        let output = tokio::process::Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => Error::ToolNotFound {
                    tool: self.program.display().to_string(),
                },
                _ => Error::Io(e),
            })?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let message = last_line(&stderr)
            .map(str::to_string)
            .unwrap_or_else(|| output.status.to_string());
        Err(Error::download(video.video_id.as_str(), message))
    }

    fn name(&self) -> &str {
        YT_DLP
    }
}

/// Last non-blank line of a diagnostic stream.
fn last_line(text: &str) -> Option<&str> {
    text.lines().map(str::trim).rfind(|line| !line.is_empty())
}
