#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! SF20K Core Library
//!
//! Record types, record sources, and validation for the SF20K
//! short-film question-answering dataset.

pub mod dataset;
pub mod error;
pub mod types;

// Re-exports for convenience
pub use error::{Error, Result};
pub use types::{
    OptionLetter, QaSample, QuestionId, Resolution, Split, VideoId, VideoRef, unique_videos,
};
