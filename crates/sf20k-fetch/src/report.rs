//! Per-video outcomes and the run summary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use sf20k_core::{Resolution, Result, VideoId, VideoRef};

/// What happened to one video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DownloadStatus {
    /// Fetched in this run
    Downloaded,
    /// Already on disk and skipping was requested
    Skipped,
    /// Every attempt failed
    Failed,
}

impl fmt::Display for DownloadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadStatus::Downloaded => write!(f, "downloaded"),
            DownloadStatus::Skipped => write!(f, "skipped"),
            DownloadStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Outcome of processing one video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoOutcome {
    /// The video
    pub video: VideoRef,
    /// Final status
    pub status: DownloadStatus,
    /// Last error, for failures
    pub error: Option<String>,
}

impl VideoOutcome {
    /// A successful download.
    pub fn downloaded(video: VideoRef) -> Self {
        Self {
            video,
            status: DownloadStatus::Downloaded,
            error: None,
        }
    }

    /// A video left in place.
    pub fn skipped(video: VideoRef) -> Self {
        Self {
            video,
            status: DownloadStatus::Skipped,
            error: None,
        }
    }

    /// A failed download.
    pub fn failed(video: VideoRef, error: impl Into<String>) -> Self {
        Self {
            video,
            status: DownloadStatus::Failed,
            error: Some(error.into()),
        }
    }
}

/// A video that could not be downloaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedVideo {
    /// Video ID
    pub video_id: VideoId,
    /// Source URL
    pub video_url: String,
    /// Last error reported
    pub reason: String,
}

/// Summary of a download run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadReport {
    /// Requested resolution
    pub resolution: Resolution,
    /// Directory the videos were written to
    pub target_dir: PathBuf,
    /// Videos considered in this run
    pub total: usize,
    /// Videos fetched
    pub downloaded: usize,
    /// Videos already present
    pub skipped: usize,
    /// Videos that failed, in input order
    pub failed: Vec<FailedVideo>,
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// When the run finished
    pub finished_at: DateTime<Utc>,
}

impl DownloadReport {
    /// Builds a report from outcomes listed in input order.
    pub fn from_outcomes(
        resolution: Resolution,
        target_dir: PathBuf,
        outcomes: &[VideoOutcome],
        started_at: DateTime<Utc>,
    ) -> Self {
        let count = |status: DownloadStatus| outcomes.iter().filter(|o| o.status == status).count();
        let failed = outcomes
            .iter()
            .filter(|o| o.status == DownloadStatus::Failed)
            .map(|o| FailedVideo {
                video_id: o.video.video_id.clone(),
                video_url: o.video.video_url.clone(),
                reason: o.error.clone().unwrap_or_default(),
            })
            .collect();

        Self {
            resolution,
            target_dir,
            total: outcomes.len(),
            downloaded: count(DownloadStatus::Downloaded),
            skipped: count(DownloadStatus::Skipped),
            failed,
            started_at,
            finished_at: Utc::now(),
        }
    }

    /// Number of failed videos.
    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }

    /// Returns `true` if every video is now on disk.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// Writes the report as pretty-printed JSON.
    pub async fn write_json(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }
}

impl fmt::Display for DownloadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(50);
        let thin = "-".repeat(25);
        writeln!(f, "{rule}")?;
        writeln!(f, "DOWNLOAD SUMMARY")?;
        writeln!(f, "{rule}")?;
        writeln!(f, "Target Resolution:      {}", self.resolution)?;
        writeln!(f, "Output Directory:       {}", self.target_dir.display())?;
        writeln!(f, "Total Videos:           {}", self.total)?;
        writeln!(f, "{thin}")?;
        writeln!(f, "Downloaded:             {}", self.downloaded)?;
        writeln!(f, "Skipped (existing):     {}", self.skipped)?;
        writeln!(f, "Failed:                 {}", self.failed_count())?;
        writeln!(f, "{thin}")?;
        if !self.failed.is_empty() {
            writeln!(f, "Failed video IDs and URLs:")?;
            for failure in &self.failed {
                writeln!(f, "  - {}: {}", failure.video_id, failure.video_url)?;
            }
        }
        write!(f, "{rule}")
    }
}
