//! Tests for error classification as seen by download callers.

use sf20k_core::{Error, Resolution, VideoRef};
use sf20k_fetch::{DownloadOptions, YtDlp};
use std::path::Path;

#[test]
fn test_download_error_is_retryable() {
    let err = Error::download("v1", "HTTP Error 429: Too Many Requests");
    assert!(err.is_retryable(), "Download errors should be retryable");
    assert!(err.to_string().contains("v1"));
}

#[test]
fn test_tool_not_found_is_permanent() {
    let err = Error::ToolNotFound {
        tool: "yt-dlp".to_string(),
    };
    assert!(!err.is_retryable(), "Missing tools are not retryable");
}

#[test]
fn test_option_validation_errors_carry_field() {
    let options = DownloadOptions {
        workers: 0,
        ..DownloadOptions::default()
    };
    match options.validate() {
        Err(Error::Validation { field, .. }) => assert_eq!(field.as_deref(), Some("workers")),
        other => unreachable!("Expected Validation error, got {other:?}"),
    }
}

#[test]
fn test_ytdlp_uses_requested_height() {
    let options = DownloadOptions {
        resolution: Resolution::P144,
        ..DownloadOptions::default()
    };
    let args = YtDlp::new(&options).args(&VideoRef::new("v", "https://vimeo.com/1"), Path::new("v.mp4"));
    assert!(args.iter().any(|a| a == "bestvideo[height<=144]+bestaudio/best[height<=144]"));
}

#[test]
fn test_ytdlp_program_override() {
    let downloader = YtDlp::new(&DownloadOptions::default()).with_program("/opt/bin/yt-dlp");
    assert_eq!(downloader.program(), Path::new("/opt/bin/yt-dlp"));
}
