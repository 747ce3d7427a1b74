//! Records fetched from the Hugging Face datasets server.
//!
//! The rows API is paginated; each page carries at most
//! [`MAX_PAGE_SIZE`] rows plus the split's total row count.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use crate::dataset::source::RecordSource;
use crate::error::{Error, Result};
use crate::types::{QaSample, Split};

/// Public datasets server endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://datasets-server.huggingface.co";

/// Repository of the published dataset.
pub const DEFAULT_DATASET: &str = "rghermi/sf20k";

/// Largest page the rows API serves.
pub const MAX_PAGE_SIZE: usize = 100;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// One page of the rows API response.
#[derive(Debug, Deserialize)]
pub struct RowsPage {
    /// Rows on this page
    pub rows: Vec<RowEntry>,
    /// Total rows in the split
    pub num_rows_total: usize,
}

/// A row wrapper as returned by the rows API.
#[derive(Debug, Deserialize)]
pub struct RowEntry {
    /// Position of the row in the split
    pub row_idx: usize,
    /// The record itself
    pub row: QaSample,
}

impl RowsPage {
    /// Parses a rows API response body.
    pub fn parse(body: &str) -> Result<Self> {
        Ok(serde_json::from_str(body)?)
    }
}

/// Records loaded over HTTP from the datasets server.
#[derive(Debug, Clone)]
pub struct HubSource {
    client: reqwest::Client,
    endpoint: String,
    dataset: String,
    config: String,
    page_size: usize,
}

impl HubSource {
    /// Creates a source for the published dataset on the public endpoint.
    pub fn new() -> Result<Self> {
        Self::with_endpoint(DEFAULT_ENDPOINT, DEFAULT_DATASET)
    }

    /// Creates a source for `dataset` served from `endpoint`.
    pub fn with_endpoint(endpoint: impl Into<String>, dataset: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::http_with_source("failed to build HTTP client", e))?;
        Ok(Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            dataset: dataset.into(),
            config: "default".to_string(),
            page_size: MAX_PAGE_SIZE,
        })
    }

    /// Sets the dataset config name (defaults to `default`).
    pub fn with_config(mut self, config: impl Into<String>) -> Self {
        self.config = config.into();
        self
    }

    /// Sets the page size, clamped to `1..=MAX_PAGE_SIZE`.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self
    }

    /// URL of the page starting at `offset`.
    pub fn page_url(&self, split: Split, offset: usize) -> String {
        format!(
            "{}/rows?dataset={}&config={}&split={}&offset={offset}&length={}",
            self.endpoint, self.dataset, self.config, split, self.page_size
        )
    }

    async fn fetch_page(&self, split: Split, offset: usize) -> Result<RowsPage> {
        let url = self.page_url(split, offset);
        tracing::debug!(%url, "Fetching rows page");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::http_with_source(format!("request to {url} failed"), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::http(format!("{url} returned {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::http_with_source(format!("reading body of {url} failed"), e))?;
        RowsPage::parse(&body)
    }
}

#[async_trait]
impl RecordSource for HubSource {
    async fn load(&self, split: Split) -> Result<Vec<QaSample>> {
        let mut samples = Vec::new();
        loop {
            let page = self.fetch_page(split, samples.len()).await?;
            if page.rows.is_empty() {
                break;
            }
            samples.extend(page.rows.into_iter().map(|entry| entry.row));
            if samples.len() >= page.num_rows_total {
                break;
            }
        }

        tracing::info!(dataset = %self.dataset, %split, records = samples.len(), "Loaded records");
        Ok(samples)
    }

    fn describe(&self) -> String {
        format!("hub {} ({})", self.dataset, self.endpoint)
    }
}
