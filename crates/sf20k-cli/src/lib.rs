//! # sf20k-cli
//!
//! Command-line tools for the SF20K dataset:
//! - Downloading the videos of a split
//! - Validating records against the schema invariants
//! - Listing distinct videos
//! - Config file management

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod config;

pub use sf20k_core::{Error, Result};
