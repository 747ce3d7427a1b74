//! The question-answer record type.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::types::ids::{QuestionId, VideoId};
use crate::types::video::VideoRef;

/// Number of multiple-choice options per question.
pub const OPTION_COUNT: usize = 5;

/// Letter naming one of the five multiple-choice options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OptionLetter {
    /// `option_0`
    A,
    /// `option_1`
    B,
    /// `option_2`
    C,
    /// `option_3`
    D,
    /// `option_4`
    E,
}

impl OptionLetter {
    /// All letters in option order.
    pub const ALL: [OptionLetter; OPTION_COUNT] = [
        OptionLetter::A,
        OptionLetter::B,
        OptionLetter::C,
        OptionLetter::D,
        OptionLetter::E,
    ];

    /// Letter for a zero-based option index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Zero-based option index.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// The letter as a `char`.
    pub fn as_char(&self) -> char {
        match self {
            OptionLetter::A => 'A',
            OptionLetter::B => 'B',
            OptionLetter::C => 'C',
            OptionLetter::D => 'D',
            OptionLetter::E => 'E',
        }
    }
}

impl fmt::Display for OptionLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for OptionLetter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.trim().chars();
        let letter = match (chars.next(), chars.next()) {
            (Some(c), None) => c.to_ascii_uppercase(),
            _ => {
                return Err(Error::validation_field(
                    "correct_letter",
                    format!("'{s}' is not a single option letter"),
                ));
            }
        };
        Self::ALL
            .into_iter()
            .find(|l| l.as_char() == letter)
            .ok_or_else(|| {
                Error::validation_field(
                    "correct_letter",
                    format!("'{s}' is not one of A-E"),
                )
            })
    }
}

/// A question-answer sample over one movie.
///
/// Field names match the published schema exactly, so records load from
/// CSV headers and JSON objects without renaming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaSample {
    /// Unique identifier of the question
    pub question_id: QuestionId,
    /// Unique identifier of the movie
    pub video_id: VideoId,
    /// Source location of the movie
    pub video_url: String,
    /// Natural-language question text
    pub question: String,
    /// Ground-truth free-text answer
    pub answer: String,
    /// Candidate answer A
    pub option_0: String,
    /// Candidate answer B
    pub option_1: String,
    /// Candidate answer C
    pub option_2: String,
    /// Candidate answer D
    pub option_3: String,
    /// Candidate answer E
    pub option_4: String,
    /// Index of the correct option, kept as published (`"0"`..`"4"`)
    #[serde(deserialize_with = "string_or_number")]
    pub correct_answer: String,
    /// Letter of the correct option (`"A"`..`"E"`)
    pub correct_letter: String,
}

impl QaSample {
    /// The five candidate answers in option order.
    pub fn options(&self) -> [&str; OPTION_COUNT] {
        [
            &self.option_0,
            &self.option_1,
            &self.option_2,
            &self.option_3,
            &self.option_4,
        ]
    }

    /// Candidate answer at `index`, if in range.
    pub fn option(&self, index: usize) -> Option<&str> {
        self.options().get(index).copied()
    }

    /// Parses `correct_answer` into a zero-based option index.
    pub fn correct_index(&self) -> Result<usize> {
        let raw = self.correct_answer.trim();
        let index: usize = raw.parse().map_err(|_| {
            Error::validation_field(
                "correct_answer",
                format!("'{}' is not an option index", self.correct_answer),
            )
        })?;
        if index >= OPTION_COUNT {
            return Err(Error::validation_field(
                "correct_answer",
                format!("index {index} is out of range 0..={}", OPTION_COUNT - 1),
            ));
        }
        Ok(index)
    }

    /// Parses `correct_letter`.
    pub fn correct_letter(&self) -> Result<OptionLetter> {
        self.correct_letter.parse()
    }

    /// Text of the correct option.
    ///
    /// Fails if the record does not pass [`QaSample::validate`].
    pub fn correct_option(&self) -> Result<&str> {
        self.validate()?;
        let index = self.correct_index()?;
        self.option(index)
            .ok_or_else(|| Error::validation_field("correct_answer", "index out of range"))
    }

    /// The video this question is about.
    pub fn video(&self) -> VideoRef {
        VideoRef::new(self.video_id.clone(), self.video_url.clone())
    }

    /// Checks the record's schema invariants.
    ///
    /// Exactly one option is correct, and `correct_answer` and
    /// `correct_letter` must name that same option.
    pub fn validate(&self) -> Result<()> {
        if self.question_id.is_blank() {
            return Err(Error::validation_field("question_id", "must not be empty"));
        }
        if self.video_id.is_blank() {
            return Err(Error::validation_field("video_id", "must not be empty"));
        }
        if self.video_url.trim().is_empty() {
            return Err(Error::validation_field("video_url", "must not be empty"));
        }

        let index = self.correct_index()?;
        let letter = self.correct_letter()?;
        if letter.index() != index {
            return Err(Error::validation_field(
                "correct_letter",
                format!(
                    "letter {letter} names option {} but correct_answer is {index}",
                    letter.index()
                ),
            ));
        }

        if self.options()[index].trim().is_empty() {
            return Err(Error::validation_field(
                format!("option_{index}"),
                "correct option has no text",
            ));
        }

        Ok(())
    }
}

/// Accepts `correct_answer` as either a string or an integer.
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct StringOrNumber;

    impl Visitor<'_> for StringOrNumber {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an option index as a string or integer")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<String, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<String, E> {
            Ok(v.to_string())
        }
    }

    deserializer.deserialize_any(StringOrNumber)
}
