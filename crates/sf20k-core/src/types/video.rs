//! Video references, the unit of download work.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::types::ids::VideoId;
use crate::types::sample::QaSample;

/// A movie to fetch: its ID and where it lives.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VideoRef {
    /// Unique identifier of the movie
    pub video_id: VideoId,
    /// Source location of the movie
    pub video_url: String,
}

impl VideoRef {
    /// Creates a new video reference.
    pub fn new(video_id: impl Into<VideoId>, video_url: impl Into<String>) -> Self {
        Self {
            video_id: video_id.into(),
            video_url: video_url.into(),
        }
    }
}

/// Distinct videos referenced by `samples`, in first-occurrence order.
///
/// Deduplication is by `video_id`; if a video appears with different URLs
/// the first one wins.
pub fn unique_videos(samples: &[QaSample]) -> Vec<VideoRef> {
    let mut seen = HashSet::new();
    samples
        .iter()
        .filter(|s| seen.insert(s.video_id.clone()))
        .map(QaSample::video)
        .collect()
}
