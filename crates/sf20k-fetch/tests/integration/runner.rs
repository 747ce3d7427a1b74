//! Integration tests for the download runner.

use sf20k_core::Resolution;
use sf20k_fetch::{DownloadOptions, DownloadRunner};
use std::sync::Arc;
use std::time::Duration;

use crate::common::{MockDownloader, Script, TestHarness, videos};

#[tokio::test]
async fn test_all_videos_downloaded() {
    let harness = TestHarness::new();
    let mock = Arc::new(MockDownloader::new());
    let runner = DownloadRunner::new(mock.clone(), harness.options.clone());

    let report = runner.run(videos(3)).await.expect("run should succeed");

    assert_eq!(report.total, 3);
    assert_eq!(report.downloaded, 3);
    assert_eq!(report.skipped, 0);
    assert!(report.is_complete());
    for id in ["v0", "v1", "v2"] {
        let path = harness.options.target_dir().join(format!("{id}.mp4"));
        assert!(path.exists(), "{} should exist", path.display());
    }
}

#[tokio::test]
async fn test_target_dir_is_resolution_specific() {
    let harness = TestHarness::with_options(|o| DownloadOptions {
        resolution: Resolution::P1080,
        ..o
    });
    let runner = DownloadRunner::new(Arc::new(MockDownloader::new()), harness.options.clone());

    let report = runner.run(Vec::new()).await.unwrap();

    assert_eq!(report.total, 0);
    assert!(report.target_dir.ends_with("1080p"));
    assert!(report.target_dir.is_dir(), "target dir should be created");
}

#[tokio::test]
async fn test_existing_videos_skipped_when_requested() {
    let harness = TestHarness::with_options(|o| DownloadOptions {
        skip_existing: true,
        ..o
    });
    std::fs::create_dir_all(harness.options.target_dir()).unwrap();
    std::fs::write(harness.options.target_dir().join("v1.mp4"), b"old").unwrap();

    let mock = Arc::new(MockDownloader::new());
    let runner = DownloadRunner::new(mock.clone(), harness.options.clone());
    let report = runner.run(videos(3)).await.unwrap();

    assert_eq!(report.skipped, 1);
    assert_eq!(report.downloaded, 2);
    assert_eq!(mock.attempts("v1"), 0, "skipped video must not be fetched");
    let content = std::fs::read(harness.options.target_dir().join("v1.mp4")).unwrap();
    assert_eq!(content, b"old");
}

#[tokio::test]
async fn test_existing_videos_refetched_without_skip() {
    let harness = TestHarness::new();
    std::fs::create_dir_all(harness.options.target_dir()).unwrap();
    std::fs::write(harness.options.target_dir().join("v0.mp4"), b"old").unwrap();

    let mock = Arc::new(MockDownloader::new());
    let runner = DownloadRunner::new(mock.clone(), harness.options.clone());
    let report = runner.run(videos(1)).await.unwrap();

    assert_eq!(report.downloaded, 1);
    assert_eq!(mock.attempts("v0"), 1);
}

#[tokio::test]
async fn test_failures_do_not_abort_and_keep_input_order() {
    let harness = TestHarness::with_options(|o| DownloadOptions { workers: 4, ..o });
    let mock = Arc::new(
        MockDownloader::new()
            .with_script("v3", Script::AlwaysFail)
            .with_script("v1", Script::AlwaysFail),
    );
    let runner = DownloadRunner::new(mock, harness.options.clone());

    let report = runner.run(videos(5)).await.unwrap();

    assert_eq!(report.downloaded, 3);
    assert_eq!(report.failed_count(), 2);
    let failed: Vec<_> = report.failed.iter().map(|f| f.video_id.to_string()).collect();
    assert_eq!(failed, vec!["v1", "v3"]);
    assert!(report.failed[0].reason.contains("Video unavailable"));
    assert!(report.to_string().contains("  - v3: https://www.youtube.com/watch?v=v3"));
}

#[tokio::test]
async fn test_max_videos_caps_the_run() {
    let harness = TestHarness::with_options(|o| DownloadOptions {
        max_videos: Some(2),
        ..o
    });
    let mock = Arc::new(MockDownloader::new());
    let runner = DownloadRunner::new(mock.clone(), harness.options.clone());

    let report = runner.run(videos(5)).await.unwrap();

    assert_eq!(report.total, 2);
    assert_eq!(mock.attempts("v0"), 1);
    assert_eq!(mock.attempts("v1"), 1);
    assert_eq!(mock.attempts("v2"), 0);
}

#[tokio::test]
async fn test_worker_bound_respected() {
    let harness = TestHarness::with_options(|o| DownloadOptions { workers: 3, ..o });
    let mock = Arc::new(MockDownloader::new().with_delay(Duration::from_millis(20)));
    let runner = DownloadRunner::new(mock.clone(), harness.options.clone());

    let report = runner.run(videos(9)).await.unwrap();

    assert_eq!(report.downloaded, 9);
    assert!(mock.max_in_flight() <= 3, "saw {} in flight", mock.max_in_flight());
    assert!(mock.max_in_flight() >= 2, "downloads should overlap");
}

#[tokio::test]
async fn test_single_worker_is_sequential() {
    let harness = TestHarness::new();
    let mock = Arc::new(MockDownloader::new().with_delay(Duration::from_millis(5)));
    let runner = DownloadRunner::new(mock.clone(), harness.options.clone());

    runner.run(videos(4)).await.unwrap();

    assert_eq!(mock.max_in_flight(), 1);
}

#[tokio::test]
async fn test_transient_failures_retried() {
    let harness = TestHarness::with_options(|o| DownloadOptions { retries: 2, ..o });
    let mock = Arc::new(MockDownloader::new().with_script("v0", Script::FailTimes(2)));
    let runner = DownloadRunner::new(mock.clone(), harness.options.clone());

    let report = runner.run(videos(1)).await.unwrap();

    assert_eq!(report.downloaded, 1);
    assert_eq!(mock.attempts("v0"), 3);
}

#[tokio::test]
async fn test_retries_exhausted() {
    let harness = TestHarness::with_options(|o| DownloadOptions { retries: 1, ..o });
    let mock = Arc::new(MockDownloader::new().with_script("v0", Script::FailTimes(5)));
    let runner = DownloadRunner::new(mock.clone(), harness.options.clone());

    let report = runner.run(videos(1)).await.unwrap();

    assert_eq!(report.failed_count(), 1);
    assert_eq!(mock.attempts("v0"), 2);
}

#[tokio::test]
async fn test_no_retries_by_default() {
    let harness = TestHarness::new();
    let mock = Arc::new(MockDownloader::new().with_script("v0", Script::FailTimes(1)));
    let runner = DownloadRunner::new(mock.clone(), harness.options.clone());

    let report = runner.run(videos(1)).await.unwrap();

    assert_eq!(report.failed_count(), 1);
    assert_eq!(mock.attempts("v0"), 1);
}

#[tokio::test]
async fn test_fatal_errors_not_retried() {
    let harness = TestHarness::with_options(|o| DownloadOptions { retries: 3, ..o });
    let mock = Arc::new(MockDownloader::new().with_script("v0", Script::Fatal));
    let runner = DownloadRunner::new(mock.clone(), harness.options.clone());

    let report = runner.run(videos(2)).await.unwrap();

    assert_eq!(mock.attempts("v0"), 1);
    assert_eq!(report.failed_count(), 1);
    assert_eq!(report.downloaded, 1);
    assert!(report.failed[0].reason.contains("Required tool not found"));
}

#[tokio::test]
async fn test_zero_workers_rejected_before_any_work() {
    let harness = TestHarness::with_options(|o| DownloadOptions { workers: 0, ..o });
    let mock = Arc::new(MockDownloader::new());
    let runner = DownloadRunner::new(mock.clone(), harness.options.clone());

    let result = runner.run(videos(2)).await;

    assert!(result.is_err());
    assert_eq!(mock.attempts("v0"), 0);
    assert!(!harness.options.target_dir().exists());
}

#[tokio::test(start_paused = true)]
async fn test_slow_download_times_out_and_is_retried() {
    let harness = TestHarness::with_options(|o| DownloadOptions {
        retries: 1,
        timeout_secs: Some(5),
        ..o
    });
    let mock = Arc::new(MockDownloader::new().with_delay(Duration::from_secs(600)));
    let runner = DownloadRunner::new(mock.clone(), harness.options.clone());

    let report = runner.run(videos(1)).await.unwrap();

    assert_eq!(report.failed_count(), 1);
    assert_eq!(mock.attempts("v0"), 2, "timeouts are retryable");
    assert!(report.failed[0].reason.contains("timed out after 5s"));
}

#[tokio::test(start_paused = true)]
async fn test_download_within_timeout_succeeds() {
    let harness = TestHarness::with_options(|o| DownloadOptions {
        timeout_secs: Some(60),
        ..o
    });
    let mock = Arc::new(MockDownloader::new().with_delay(Duration::from_secs(30)));
    let runner = DownloadRunner::new(mock.clone(), harness.options.clone());

    let report = runner.run(videos(2)).await.unwrap();

    assert_eq!(report.downloaded, 2);
    assert_eq!(mock.attempts("v0"), 1);
}
