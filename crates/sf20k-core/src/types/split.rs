//! Dataset splits and download resolutions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A published split of the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Split {
    /// Training split
    Train,
    /// Public test split
    Test,
    /// Test split restricted to films without dialogue
    TestSilent,
    /// Expert-annotated test split
    #[default]
    TestExpert,
}

impl Split {
    /// All splits in publication order.
    pub const ALL: [Split; 4] = [
        Split::Train,
        Split::Test,
        Split::TestSilent,
        Split::TestExpert,
    ];

    /// Split name as used by the dataset host.
    pub fn as_str(&self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Test => "test",
            Split::TestSilent => "test_silent",
            Split::TestExpert => "test_expert",
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Split {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Split::ALL
            .into_iter()
            .find(|split| split.as_str() == s.trim())
            .ok_or_else(|| {
                Error::validation_field(
                    "split",
                    format!("unknown split '{s}' (expected train, test, test_silent, test_expert)"),
                )
            })
    }
}

/// Maximum video height requested from the downloader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Resolution {
    /// 144p
    P144,
    /// 240p
    P240,
    /// 360p
    #[default]
    P360,
    /// 480p
    P480,
    /// 720p
    P720,
    /// 1080p
    P1080,
}

impl Resolution {
    /// All supported resolutions, lowest first.
    pub const ALL: [Resolution; 6] = [
        Resolution::P144,
        Resolution::P240,
        Resolution::P360,
        Resolution::P480,
        Resolution::P720,
        Resolution::P1080,
    ];

    /// Pixel height of this resolution.
    pub fn height(&self) -> u32 {
        match self {
            Resolution::P144 => 144,
            Resolution::P240 => 240,
            Resolution::P360 => 360,
            Resolution::P480 => 480,
            Resolution::P720 => 720,
            Resolution::P1080 => 1080,
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}p", self.height())
    }
}

impl TryFrom<u32> for Resolution {
    type Error = Error;

    fn try_from(height: u32) -> Result<Self, Self::Error> {
        Resolution::ALL
            .into_iter()
            .find(|r| r.height() == height)
            .ok_or_else(|| {
                Error::validation_field(
                    "resolution",
                    format!("unsupported resolution {height} (expected 144, 240, 360, 480, 720, 1080)"),
                )
            })
    }
}

impl From<Resolution> for u32 {
    fn from(r: Resolution) -> Self {
        r.height()
    }
}

impl FromStr for Resolution {
    type Err = Error;

    /// Accepts `360` as well as `360p`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_suffix(['p', 'P']).unwrap_or(trimmed);
        let height: u32 = digits.parse().map_err(|_| {
            Error::validation_field("resolution", format!("invalid resolution '{s}'"))
        })?;
        Resolution::try_from(height)
    }
}
