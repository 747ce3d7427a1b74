//! Download options and target paths.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use sf20k_core::{Error, Resolution, Result, VideoId};

/// Extension of downloaded files.
pub const VIDEO_EXTENSION: &str = "mp4";

/// How a download run behaves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadOptions {
    /// Root directory; videos land in `<video_dir>/<height>p/`
    pub video_dir: PathBuf,
    /// Maximum video height to request
    pub resolution: Resolution,
    /// Leave videos that already exist on disk untouched
    pub skip_existing: bool,
    /// Ask the downloader to suppress warnings and skip recoverable errors
    pub silence_errors: bool,
    /// Concurrent fragment downloads within one video
    pub threads: usize,
    /// Videos downloaded in parallel
    pub workers: usize,
    /// Stop after this many videos (debug runs)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_videos: Option<usize>,
    /// Extra attempts for retryable failures
    pub retries: usize,
    /// Initial backoff between attempts, in milliseconds
    pub retry_delay_ms: u64,
    /// Abandon a single download attempt after this many seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            video_dir: PathBuf::from("data/videos"),
            resolution: Resolution::default(),
            skip_existing: false,
            silence_errors: false,
            threads: 1,
            workers: 1,
            max_videos: None,
            retries: 0,
            retry_delay_ms: 1000,
            timeout_secs: None,
        }
    }
}

impl DownloadOptions {
    /// Creates options writing under `video_dir` with defaults elsewhere.
    pub fn new(video_dir: impl Into<PathBuf>) -> Self {
        Self {
            video_dir: video_dir.into(),
            ..Self::default()
        }
    }

    /// Directory for the configured resolution.
    pub fn target_dir(&self) -> PathBuf {
        self.video_dir.join(self.resolution.to_string())
    }

    /// Destination file for a video.
    pub fn video_path(&self, video_id: &VideoId) -> PathBuf {
        self.target_dir().join(video_id.file_name(VIDEO_EXTENSION))
    }

    /// Initial retry backoff.
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    /// Per-attempt download timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Rejects option combinations that cannot run.
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(Error::validation_field("workers", "must be at least 1"));
        }
        if self.threads == 0 {
            return Err(Error::validation_field("threads", "must be at least 1"));
        }
        if self.timeout_secs == Some(0) {
            return Err(Error::validation_field("timeout_secs", "must be at least 1"));
        }
        Ok(())
    }
}
