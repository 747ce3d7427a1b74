//! Bounded parallel download runner.

use backon::{ExponentialBuilder, Retryable};
use chrono::Utc;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use sf20k_core::{Error, Result, VideoRef};

use crate::downloader::Downloader;
use crate::options::DownloadOptions;
use crate::report::{DownloadReport, VideoOutcome};

/// Runs downloads for a set of videos with at most `workers` in flight.
///
/// A failing video is recorded and never aborts the run.
#[derive(Clone)]
pub struct DownloadRunner {
    downloader: Arc<dyn Downloader>,
    options: Arc<DownloadOptions>,
}

impl DownloadRunner {
    /// Creates a new runner.
    pub fn new(downloader: Arc<dyn Downloader>, options: DownloadOptions) -> Self {
        Self {
            downloader,
            options: Arc::new(options),
        }
    }

    /// Options this runner was built with.
    pub fn options(&self) -> &DownloadOptions {
        &self.options
    }

    /// Downloads `videos` and reports what happened to each.
    pub async fn run(&self, mut videos: Vec<VideoRef>) -> Result<DownloadReport> {
        self.options.validate()?;
        let started_at = Utc::now();

        let target_dir = self.options.target_dir();
        tokio::fs::create_dir_all(&target_dir).await?;

        if let Some(max) = self.options.max_videos {
            videos.truncate(max);
        }
        let total = videos.len();

        tracing::info!(
            downloader = self.downloader.name(),
            total,
            workers = self.options.workers,
            resolution = %self.options.resolution,
            target_dir = %target_dir.display(),
            "Starting downloads"
        );

        let permits = Arc::new(Semaphore::new(self.options.workers));
        let mut tasks = JoinSet::new();
        for (position, video) in videos.into_iter().enumerate() {
            let permits = Arc::clone(&permits);
            let downloader = Arc::clone(&self.downloader);
            let options = Arc::clone(&self.options);
            tasks.spawn(async move {
                let Ok(_permit) = permits.acquire_owned().await else {
                    return (position, VideoOutcome::failed(video, "worker pool closed"));
                };
                (position, process_video(downloader, &options, video).await)
            });
        }

        let mut outcomes: Vec<Option<VideoOutcome>> = vec![None; total];
        let mut done = 0usize;
        while let Some(joined) = tasks.join_next().await {
            let (position, outcome) = joined.map_err(|e| {
                Error::Io(std::io::Error::other(format!("download task aborted: {e}")))
            })?;
            done += 1;
            tracing::info!(
                done,
                total,
                video_id = %outcome.video.video_id,
                status = %outcome.status,
                "Video finished"
            );
            outcomes[position] = Some(outcome);
        }

        let outcomes: Vec<VideoOutcome> = outcomes.into_iter().flatten().collect();
        let report = DownloadReport::from_outcomes(
            self.options.resolution,
            target_dir,
            &outcomes,
            started_at,
        );

        tracing::info!(
            downloaded = report.downloaded,
            skipped = report.skipped,
            failed = report.failed_count(),
            "Downloads finished"
        );
        Ok(report)
    }
}

/// One download attempt, abandoned after `timeout` when set.
///
/// Dropping the fetch future kills the child process.
async fn fetch_with_timeout(
    downloader: &dyn Downloader,
    video: &VideoRef,
    dest: &Path,
    timeout: Option<Duration>,
) -> Result<()> {
    let Some(limit) = timeout else {
        return downloader.fetch(video, dest).await;
    };
    tokio::time::timeout(limit, downloader.fetch(video, dest))
        .await
        .map_err(|_| Error::Timeout {
            seconds: limit.as_secs(),
        })?
}

/// Skips, downloads, or retries one video.
async fn process_video(
    downloader: Arc<dyn Downloader>,
    options: &DownloadOptions,
    video: VideoRef,
) -> VideoOutcome {
    let dest = options.video_path(&video.video_id);

    if options.skip_existing && tokio::fs::try_exists(&dest).await.unwrap_or(false) {
        tracing::debug!(video_id = %video.video_id, "Already on disk, skipping");
        return VideoOutcome::skipped(video);
    }

    let backoff = ExponentialBuilder::default()
        .with_min_delay(options.retry_delay())
        .with_max_times(options.retries);

    let downloader = downloader.as_ref();
    let target = &video;
    let path = dest.as_path();
    let timeout = options.timeout();
    let result = (move || async move {
        fetch_with_timeout(downloader, target, path, timeout).await
    })
        .retry(backoff)
        .when(|e: &Error| e.is_retryable())
        .notify(|e: &Error, delay: Duration| {
            tracing::warn!(
                video_id = %target.video_id,
                error = %e,
                ?delay,
                "Download failed, retrying"
            );
        })
        .await;

    match result {
        Ok(()) => VideoOutcome::downloaded(video),
        Err(e) => {
            tracing::warn!(video_id = %video.video_id, error = %e, "Download failed");
            VideoOutcome::failed(video, e.to_string())
        }
    }
}
