//! Local dataset exports: CSV, JSON Lines, and JSON arrays.

use async_trait::async_trait;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::dataset::source::RecordSource;
use crate::error::{Error, Result};
use crate::types::{QaSample, Split};

/// Placeholder substituted with the split name in file source paths.
pub const SPLIT_PLACEHOLDER: &str = "{split}";

/// On-disk format of a dataset export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    /// Comma-separated values with a header row
    Csv,
    /// One JSON object per line
    JsonLines,
    /// A single JSON array of objects
    Json,
}

impl DatasetFormat {
    /// Infers the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("csv") => Ok(DatasetFormat::Csv),
            Some("jsonl") | Some("ndjson") => Ok(DatasetFormat::JsonLines),
            Some("json") => Ok(DatasetFormat::Json),
            _ => Err(Error::config(format!(
                "cannot infer dataset format of {} (expected .csv, .jsonl, .ndjson or .json)",
                path.display()
            ))),
        }
    }

    /// Parses `content` in this format.
    pub fn parse(&self, content: &str) -> Result<Vec<QaSample>> {
        match self {
            DatasetFormat::Csv => parse_csv(content),
            DatasetFormat::JsonLines => parse_json_lines(content),
            DatasetFormat::Json => parse_json(content),
        }
    }
}

impl fmt::Display for DatasetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetFormat::Csv => write!(f, "csv"),
            DatasetFormat::JsonLines => write!(f, "jsonl"),
            DatasetFormat::Json => write!(f, "json"),
        }
    }
}

/// Parses a CSV export whose header uses the schema field names.
pub fn parse_csv(content: &str) -> Result<Vec<QaSample>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(content.as_bytes());
    let mut samples = Vec::new();
    for record in reader.deserialize::<QaSample>() {
        samples.push(record?);
    }
    Ok(samples)
}

/// Parses JSON Lines, skipping blank lines.
pub fn parse_json_lines(content: &str) -> Result<Vec<QaSample>> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str(line)
                .map_err(|e| Error::validation(format!("line {}: {e}", i + 1)))
        })
        .collect()
}

/// Parses a JSON array of records.
pub fn parse_json(content: &str) -> Result<Vec<QaSample>> {
    Ok(serde_json::from_str(content)?)
}

/// Records loaded from a local export file.
///
/// The path may contain `{split}`, e.g. `data/sf20k_{split}.jsonl`.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Creates a source for the given path template.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Concrete path for `split`.
    pub fn resolve(&self, split: Split) -> PathBuf {
        let template = self.path.to_string_lossy();
        if template.contains(SPLIT_PLACEHOLDER) {
            PathBuf::from(template.replace(SPLIT_PLACEHOLDER, split.as_str()))
        } else {
            self.path.clone()
        }
    }
}

#[async_trait]
impl RecordSource for FileSource {
    async fn load(&self, split: Split) -> Result<Vec<QaSample>> {
        let path = self.resolve(split);
        let format = DatasetFormat::from_path(&path)?;
        tracing::debug!(path = %path.display(), %format, "Reading dataset export");

        let content = tokio::fs::read_to_string(&path).await.map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("{}: {e}", path.display()),
            ))
        })?;
        let samples = format.parse(&content)?;

        tracing::info!(path = %path.display(), %split, records = samples.len(), "Loaded records");
        Ok(samples)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}
