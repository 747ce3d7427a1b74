//! Handler functions for CLI commands.

use std::path::Path;
use std::sync::Arc;

use sf20k_core::dataset::{FileSource, HubSource, RecordSource, validate_samples};
use sf20k_core::{Error, Result, Split, VideoRef, unique_videos};
use sf20k_fetch::{DownloadRunner, YtDlp};

use crate::cli::{Cli, Command, ConfigAction, DownloadArgs, SourceArgs, VideosArgs};
use crate::config::{Sf20kConfig, expand_path};

// ============================================================================
// Command dispatch
// ============================================================================

/// Runs the parsed command line.
pub async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();
    match cli.command {
        Command::Config { action } => handle_config_command(config_path, action),
        Command::Download(args) => cmd_download(&Sf20kConfig::load(config_path)?, &args).await,
        Command::Validate(args) => cmd_validate(&Sf20kConfig::load(config_path)?, &args).await,
        Command::Videos(args) => cmd_videos(&Sf20kConfig::load(config_path)?, &args).await,
    }
}

// ============================================================================
// Record sources
// ============================================================================

/// Picks the record source: `--dataset`, then the configured file, then the Hub.
pub fn build_source(config: &Sf20kConfig, args: &SourceArgs) -> Result<Box<dyn RecordSource>> {
    let file = args
        .dataset
        .as_deref()
        .map(expand_path)
        .or_else(|| config.dataset.file.clone());

    match file {
        Some(path) => Ok(Box::new(FileSource::new(path))),
        None => Ok(Box::new(HubSource::with_endpoint(
            config.dataset.hub_endpoint.clone(),
            config.dataset.hub_dataset.clone(),
        )?)),
    }
}

fn effective_split(config: &Sf20kConfig, args: &SourceArgs) -> Split {
    args.split.unwrap_or(config.dataset.split)
}

// ============================================================================
// Command handlers
// ============================================================================

/// Downloads every distinct video of a split.
///
/// Individual download failures are reported in the summary and do not
/// make the command fail.
pub async fn cmd_download(config: &Sf20kConfig, args: &DownloadArgs) -> Result<()> {
    let options = args.apply(config.download.clone());
    let split = effective_split(config, &args.source);
    let source = build_source(config, &args.source)?;

    tracing::info!(source = %source.describe(), %split, "Loading records");
    let samples = source.load(split).await?;
    let videos = unique_videos(&samples);
    tracing::info!(records = samples.len(), videos = videos.len(), "Collected videos");

    let downloader = YtDlp::new(&options).with_program(config.tools.yt_dlp.clone());
    let runner = DownloadRunner::new(Arc::new(downloader), options);
    let report = runner.run(videos).await?;

    println!("{report}");

    if let Some(path) = &args.report {
        let path = expand_path(path);
        report.write_json(&path).await?;
        tracing::info!(path = %path.display(), "Wrote report");
    }
    Ok(())
}

/// Validates every record of a split; fails when any issue is found.
pub async fn cmd_validate(config: &Sf20kConfig, args: &SourceArgs) -> Result<()> {
    let split = effective_split(config, args);
    let source = build_source(config, args)?;

    tracing::info!(source = %source.describe(), %split, "Loading records");
    let samples = source.load(split).await?;
    let report = validate_samples(&samples);

    print!("{report}");

    if report.is_clean() {
        Ok(())
    } else {
        Err(Error::validation(format!(
            "{} issue(s) in split {split}",
            report.issues.len()
        )))
    }
}

/// Lists the distinct videos of a split.
pub async fn cmd_videos(config: &Sf20kConfig, args: &VideosArgs) -> Result<()> {
    let videos = list_videos(config, &args.source).await?;
    print!("{}", render_videos(&videos, args.json)?);
    Ok(())
}

/// Loads a split and returns its distinct videos in first-seen order.
pub async fn list_videos(config: &Sf20kConfig, args: &SourceArgs) -> Result<Vec<VideoRef>> {
    let split = effective_split(config, args);
    let source = build_source(config, args)?;
    let samples = source.load(split).await?;
    Ok(unique_videos(&samples))
}

/// Formats videos as `id<TAB>url` lines, or as a pretty JSON array.
pub fn render_videos(videos: &[VideoRef], json: bool) -> Result<String> {
    if json {
        let mut out = serde_json::to_string_pretty(videos)?;
        out.push('\n');
        return Ok(out);
    }
    Ok(videos
        .iter()
        .map(|video| format!("{}\t{}\n", video.video_id, video.video_url))
        .collect())
}

// ============================================================================
// Config commands
// ============================================================================

/// Handles a config subcommand.
pub fn handle_config_command(config_path: Option<&Path>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Path => cmd_config_path(config_path),
        ConfigAction::Init { force } => cmd_config_init(config_path, force),
        ConfigAction::Show => {
            let config = Sf20kConfig::load(config_path)?;
            print!("{}", config.to_toml_string()?);
            Ok(())
        }
    }
}

/// Shows the resolved config file path.
pub fn cmd_config_path(config_path: Option<&Path>) -> Result<()> {
    let path = Sf20kConfig::resolve_path(config_path)
        .ok_or_else(|| Error::config("Could not determine config directory for this platform"))?;
    println!("{}", path.display());
    if !path.exists() {
        eprintln!("(file does not exist; run `sf20k config init` to create it)");
    }
    Ok(())
}

/// Writes a default configuration file.
pub fn cmd_config_init(config_path: Option<&Path>, force: bool) -> Result<()> {
    let path = Sf20kConfig::resolve_path(config_path)
        .ok_or_else(|| Error::config("Could not determine config directory"))?;

    if path.exists() && !force {
        return Err(Error::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, Sf20kConfig::default().to_toml_string()?)?;

    println!("Config file created at {}", path.display());
    Ok(())
}
