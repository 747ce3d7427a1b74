//! Core types for SF20K records.

mod ids;
mod proptests;
pub(crate) mod sample;
mod split;
mod video;

pub use ids::{QuestionId, VideoId};
pub use sample::{OPTION_COUNT, OptionLetter, QaSample};
pub use split::{Resolution, Split};
pub use video::{VideoRef, unique_videos};
