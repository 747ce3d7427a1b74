#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! SF20K Fetch Library
//!
//! Parallel video downloading for SF20K records.

pub mod downloader;
pub mod options;
pub mod report;
pub mod runner;

pub use downloader::{Downloader, YtDlp};
pub use options::DownloadOptions;
pub use report::{DownloadReport, DownloadStatus, FailedVideo, VideoOutcome};
pub use runner::DownloadRunner;

// Re-export core types
pub use sf20k_core::{Error, Result};
