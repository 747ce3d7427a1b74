//! Whole-split validation.

use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::types::{QaSample, QuestionId, VideoId};

/// A single problem found in a split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Zero-based position of the offending record
    pub row: usize,
    /// Question the issue belongs to
    pub question_id: QuestionId,
    /// What is wrong
    pub message: String,
}

/// Result of validating every record of a split.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    /// Number of records checked
    pub records: usize,
    /// Number of distinct videos referenced
    pub distinct_videos: usize,
    /// Problems found, in record order
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Returns `true` when no issues were found.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Records checked:  {}", self.records)?;
        writeln!(f, "Distinct videos:  {}", self.distinct_videos)?;
        writeln!(f, "Issues found:     {}", self.issues.len())?;
        for issue in &self.issues {
            writeln!(
                f,
                "  - row {} ({}): {}",
                issue.row, issue.question_id, issue.message
            )?;
        }
        Ok(())
    }
}

/// Validates every record and cross-record consistency.
///
/// Besides each record's own invariants this flags repeated question IDs
/// and a video ID that maps to more than one URL.
pub fn validate_samples(samples: &[QaSample]) -> ValidationReport {
    let mut issues = Vec::new();
    let mut question_ids: HashSet<&QuestionId> = HashSet::new();
    let mut video_urls: HashMap<&VideoId, &str> = HashMap::new();

    for (row, sample) in samples.iter().enumerate() {
        let mut push = |message: String| {
            issues.push(ValidationIssue {
                row,
                question_id: sample.question_id.clone(),
                message,
            });
        };

        if let Err(e) = sample.validate() {
            push(e.to_string());
        }

        if !question_ids.insert(&sample.question_id) {
            push(format!("duplicate question_id {}", sample.question_id));
        }

        match video_urls.get(&sample.video_id) {
            Some(url) if *url != sample.video_url => push(format!(
                "video {} has conflicting urls: {} and {}",
                sample.video_id, url, sample.video_url
            )),
            Some(_) => {}
            None => {
                video_urls.insert(&sample.video_id, &sample.video_url);
            }
        }
    }

    if !issues.is_empty() {
        tracing::warn!(issues = issues.len(), "Validation found problems");
    }

    ValidationReport {
        records: samples.len(),
        distinct_videos: video_urls.len(),
        issues,
    }
}
