//! Command-line argument definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use sf20k_core::{Resolution, Split};
use sf20k_fetch::DownloadOptions;

/// SF20K dataset toolkit
#[derive(Parser, Debug)]
#[command(name = "sf20k", author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "SF20K_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Download the videos referenced by a split
    Download(DownloadArgs),
    /// Check every record of a split against the schema invariants
    Validate(SourceArgs),
    /// List the distinct videos of a split
    Videos(VideosArgs),
    /// Configuration file management
    Config {
        /// Config action
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Where records come from.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Dataset split
    #[arg(long)]
    pub split: Option<Split>,

    /// Local export (CSV, JSONL or JSON; `{split}` is substituted).
    /// Records are fetched from the Hub when neither this nor the
    /// config names a file.
    #[arg(long)]
    pub dataset: Option<PathBuf>,
}

/// Arguments of `sf20k download`.
#[derive(Args, Debug, Clone, Default)]
pub struct DownloadArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Root directory for downloaded videos
    #[arg(long)]
    pub video_dir: Option<PathBuf>,

    /// Maximum video height (144, 240, 360, 480, 720, 1080)
    #[arg(long)]
    pub resolution: Option<Resolution>,

    /// Skip videos that already exist in the target directory
    #[arg(long, overrides_with = "no_skip_existing")]
    pub skip_existing: bool,

    /// Re-download existing videos even if the config enables skipping
    #[arg(long, overrides_with = "skip_existing")]
    pub no_skip_existing: bool,

    /// Silence downloader warnings and recoverable errors
    #[arg(long, overrides_with = "no_silence_errors")]
    pub silence_errors: bool,

    /// Show downloader warnings even if the config silences them
    #[arg(long, overrides_with = "silence_errors")]
    pub no_silence_errors: bool,

    /// Concurrent fragment downloads per video
    #[arg(long)]
    pub threads: Option<usize>,

    /// Number of videos downloaded in parallel
    #[arg(long)]
    pub workers: Option<usize>,

    /// Maximum number of videos to download (for debug runs)
    #[arg(long)]
    pub max_videos: Option<usize>,

    /// Extra attempts for transient download failures
    #[arg(long)]
    pub retries: Option<usize>,

    /// Abandon a download attempt after this many seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Write the run report as JSON to this file
    #[arg(long)]
    pub report: Option<PathBuf>,
}

impl DownloadArgs {
    /// Layers these flags over options loaded from configuration.
    pub fn apply(&self, base: DownloadOptions) -> DownloadOptions {
        DownloadOptions {
            video_dir: self.video_dir.clone().unwrap_or(base.video_dir),
            resolution: self.resolution.unwrap_or(base.resolution),
            skip_existing: switch(self.skip_existing, self.no_skip_existing, base.skip_existing),
            silence_errors: switch(
                self.silence_errors,
                self.no_silence_errors,
                base.silence_errors,
            ),
            threads: self.threads.unwrap_or(base.threads),
            workers: self.workers.unwrap_or(base.workers),
            max_videos: self.max_videos.or(base.max_videos),
            retries: self.retries.unwrap_or(base.retries),
            retry_delay_ms: base.retry_delay_ms,
            timeout_secs: self.timeout.or(base.timeout_secs),
        }
    }
}

/// Resolves an `--x` / `--no-x` flag pair over a configured value.
fn switch(on: bool, off: bool, configured: bool) -> bool {
    match (on, off) {
        (true, _) => true,
        (_, true) => false,
        _ => configured,
    }
}

/// Arguments of `sf20k videos`.
#[derive(Args, Debug, Clone, Default)]
pub struct VideosArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Print a JSON array instead of tab-separated lines
    #[arg(long)]
    pub json: bool,
}

/// Config subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show the resolved config file path
    Path,
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the effective configuration
    Show,
}
