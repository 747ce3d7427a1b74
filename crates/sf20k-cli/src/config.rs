//! Configuration file handling.
//!
//! The config file is TOML. Every key is optional; missing keys take the
//! built-in defaults, and command-line flags override both.
//!
//! ```toml
//! [dataset]
//! split = "test_expert"
//! file = "~/data/sf20k/{split}.jsonl"
//!
//! [download]
//! video_dir = "~/data/sf20k/videos"
//! resolution = 360
//! workers = 4
//!
//! [tools]
//! yt_dlp = "yt-dlp"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use sf20k_core::dataset::hub::{DEFAULT_DATASET, DEFAULT_ENDPOINT};
use sf20k_core::{Error, Result, Split};
use sf20k_fetch::DownloadOptions;
use sf20k_fetch::downloader::YT_DLP;

/// Project name, used for the config directory.
pub const PROJECT_NAME: &str = "sf20k";

/// Config file name inside the project config directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sf20kConfig {
    /// Where records come from
    pub dataset: DatasetConfig,
    /// How videos are downloaded
    pub download: DownloadOptions,
    /// External programs
    pub tools: ToolsConfig,
}

/// Record source settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Default split
    pub split: Split,
    /// Local export path template; the Hub is used when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Datasets server endpoint
    pub hub_endpoint: String,
    /// Dataset repository on the Hub
    pub hub_dataset: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            split: Split::default(),
            file: None,
            hub_endpoint: DEFAULT_ENDPOINT.to_string(),
            hub_dataset: DEFAULT_DATASET.to_string(),
        }
    }
}

/// External program locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// `yt-dlp` executable
    pub yt_dlp: PathBuf,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            yt_dlp: PathBuf::from(YT_DLP),
        }
    }
}

impl Sf20kConfig {
    /// Default config file location (`<config dir>/sf20k/config.toml`).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(PROJECT_NAME).join(CONFIG_FILE))
    }

    /// Resolves an explicit path, falling back to [`Sf20kConfig::default_path`].
    pub fn resolve_path(explicit: Option<&Path>) -> Option<PathBuf> {
        explicit.map(expand_path).or_else(Self::default_path)
    }

    /// Loads the configuration.
    ///
    /// An explicitly named file must exist. A missing file at the default
    /// location yields the built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let Some(path) = Self::resolve_path(explicit) else {
            tracing::debug!("No config directory on this platform, using defaults");
            return Ok(Self::default());
        };

        if !path.exists() {
            if explicit.is_some() {
                return Err(Error::config(format!(
                    "config file {} does not exist",
                    path.display()
                )));
            }
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        let config = Self::from_toml_str(&content)
            .map_err(|e| Error::config(format!("failed to parse {}: {e}", path.display())))?;
        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Parses TOML and expands `~` in path settings.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(|e| Error::config(e.to_string()))?;
        config.expand_paths();
        Ok(config)
    }

    /// Serializes to pretty TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    fn expand_paths(&mut self) {
        self.download.video_dir = expand_path(&self.download.video_dir);
        self.tools.yt_dlp = expand_path(&self.tools.yt_dlp);
        if let Some(file) = &self.dataset.file {
            self.dataset.file = Some(expand_path(file));
        }
    }
}

/// Expands a leading `~` in a path.
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    PathBuf::from(shellexpand::tilde(raw.as_ref()).into_owned())
}
