//! Loading and validating dataset records.
//!
//! # Modules
//!
//! - [`source`]: the [`RecordSource`] trait
//! - [`file`]: local CSV / JSON Lines / JSON exports
//! - [`hub`]: the Hugging Face datasets server rows API
//! - [`validate`]: whole-split validation reports

pub mod file;
pub mod hub;
pub mod source;
pub mod validate;

pub use file::{DatasetFormat, FileSource};
pub use hub::HubSource;
pub use source::RecordSource;
pub use validate::{ValidationIssue, ValidationReport, validate_samples};
