//! Common test utilities and harness for sf20k-fetch integration tests.

use async_trait::async_trait;
use sf20k_core::{Error, Result, VideoRef};
use sf20k_fetch::{DownloadOptions, Downloader};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tempfile::TempDir;

/// Scripted behaviour for one video.
#[derive(Debug, Clone)]
pub enum Script {
    /// Fail with a retryable error this many times, then succeed
    FailTimes(usize),
    /// Always fail with a retryable error
    AlwaysFail,
    /// Fail with a non-retryable error
    Fatal,
}

/// Downloader that writes placeholder files instead of running yt-dlp.
#[derive(Default)]
pub struct MockDownloader {
    scripts: HashMap<String, Script>,
    attempts: Mutex<HashMap<String, usize>>,
    delay: Duration,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockDownloader {
    /// Creates a downloader that succeeds for every video.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the behaviour for one video ID.
    pub fn with_script(mut self, video_id: &str, script: Script) -> Self {
        self.scripts.insert(video_id.to_string(), script);
        self
    }

    /// Makes every fetch take `delay`.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Number of fetch calls made for a video.
    pub fn attempts(&self, video_id: &str) -> usize {
        self.attempts
            .lock()
            .unwrap()
            .get(video_id)
            .copied()
            .unwrap_or(0)
    }

    /// Highest number of simultaneous fetches observed.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Downloader for MockDownloader {
    async fn fetch(&self, video: &VideoRef, dest: &Path) -> Result<()> {
        let attempt = {
            let mut attempts = self.attempts.lock().unwrap();
            let count = attempts.entry(video.video_id.to_string()).or_insert(0);
            *count += 1;
            *count
        };

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match self.scripts.get(video.video_id.as_str()) {
            Some(Script::FailTimes(n)) if attempt <= *n => {
                Err(Error::download(video.video_id.as_str(), "HTTP Error 503"))
            }
            Some(Script::AlwaysFail) => Err(Error::download(
                video.video_id.as_str(),
                "ERROR: Video unavailable",
            )),
            Some(Script::Fatal) => Err(Error::ToolNotFound {
                tool: "yt-dlp".to_string(),
            }),
            _ => {
                tokio::fs::write(dest, b"mp4").await?;
                Ok(())
            }
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Temporary output directory plus options pointing at it.
pub struct TestHarness {
    /// Keeps the directory alive
    pub dir: TempDir,
    /// Options rooted in `dir`
    pub options: DownloadOptions,
}

impl TestHarness {
    /// Creates a harness with default options and near-zero retry delay.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let options = DownloadOptions {
            retry_delay_ms: 1,
            ..DownloadOptions::new(dir.path().join("videos"))
        };
        Self { dir, options }
    }

    /// Builds a harness with customised options.
    pub fn with_options(f: impl FnOnce(DownloadOptions) -> DownloadOptions) -> Self {
        let mut harness = Self::new();
        harness.options = f(harness.options);
        harness
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// `count` distinct videos named `v0`, `v1`, ...
pub fn videos(count: usize) -> Vec<VideoRef> {
    (0..count)
        .map(|i| VideoRef::new(format!("v{i}"), format!("https://www.youtube.com/watch?v=v{i}")))
        .collect()
}
