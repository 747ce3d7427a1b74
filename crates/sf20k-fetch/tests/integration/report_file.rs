//! Integration tests for persisting run reports.

use sf20k_fetch::{DownloadReport, DownloadRunner};
use std::sync::Arc;

use crate::common::{MockDownloader, Script, TestHarness, videos};

#[tokio::test]
async fn test_report_written_and_read_back() {
    let harness = TestHarness::new();
    let mock = Arc::new(MockDownloader::new().with_script("v2", Script::AlwaysFail));
    let runner = DownloadRunner::new(mock, harness.options.clone());

    let report = runner.run(videos(3)).await.unwrap();
    let path = harness.dir.path().join("reports").join("test_expert.json");
    report.write_json(&path).await.unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let back: DownloadReport = serde_json::from_str(&content).unwrap();
    assert_eq!(back, report);
    assert!(back.finished_at >= back.started_at);
    assert_eq!(back.failed[0].video_id.as_str(), "v2");
}
