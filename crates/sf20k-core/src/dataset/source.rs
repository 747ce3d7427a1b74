//! The record source seam.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{QaSample, Split};

/// Somewhere SF20K records can be loaded from.
///
/// Implementations exist for local exports ([`FileSource`](super::FileSource))
/// and the Hugging Face datasets server ([`HubSource`](super::HubSource)).
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Loads every record of `split`.
    async fn load(&self, split: Split) -> Result<Vec<QaSample>>;

    /// Human-readable description, used in log lines.
    fn describe(&self) -> String;
}
