use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Highest contribution a single question can make to the score.
pub const MAX_QUESTION_SCORE: u8 = 3;

/// A forced-choice answer already validated to lie in `1..=4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub struct Choice(u8);

impl Choice {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 4;

    pub fn new(value: u8) -> Result<Self, InvalidChoice> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(InvalidChoice::OutOfRange(value.to_string()))
        }
    }

    /// Parse raw user input, trimming surrounding whitespace.
    ///
    /// Any integer literal is a number, even one too large for a machine
    /// integer, so it is reported as out of range rather than as garbage.
    pub fn parse(raw: &str) -> Result<Self, InvalidChoice> {
        let trimmed = raw.trim();
        if !is_integer_literal(trimmed) {
            return Err(InvalidChoice::NotANumber(trimmed.to_string()));
        }
        trimmed
            .parse::<u8>()
            .ok()
            .and_then(|value| Self::new(value).ok())
            .ok_or_else(|| InvalidChoice::OutOfRange(trimmed.to_string()))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

fn is_integer_literal(text: &str) -> bool {
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|byte| byte.is_ascii_digit())
}

impl From<Choice> for u8 {
    fn from(choice: Choice) -> Self {
        choice.0
    }
}

impl<'de> Deserialize<'de> for Choice {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = u8::deserialize(deserializer)?;
        Choice::new(value).map_err(serde::de::Error::custom)
    }
}

impl FromStr for Choice {
    type Err = InvalidChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidChoice {
    #[error("'{0}' is not a number")]
    NotANumber(String),
    #[error("{0} is outside the accepted range 1-4")]
    OutOfRange(String),
}

/// Coarse productivity classification derived from the total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Profile {
    #[serde(rename = "Focused Achiever")]
    FocusedAchiever,
    #[serde(rename = "Moderately Distracted")]
    ModeratelyDistracted,
    #[serde(rename = "Burnout Risk")]
    BurnoutRisk,
}

impl Profile {
    pub const ALL: [Profile; 3] = [
        Profile::FocusedAchiever,
        Profile::ModeratelyDistracted,
        Profile::BurnoutRisk,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Profile::FocusedAchiever => "Focused Achiever",
            Profile::ModeratelyDistracted => "Moderately Distracted",
            Profile::BurnoutRisk => "Burnout Risk",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown profile '{0}'")]
pub struct UnknownProfile(pub String);

impl FromStr for Profile {
    type Err = UnknownProfile;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Profile::ALL
            .into_iter()
            .find(|profile| profile.label().eq_ignore_ascii_case(needle))
            .ok_or_else(|| UnknownProfile(needle.to_string()))
    }
}

/// Contribution of one answer: `choice - 1`, inverted for reversed questions.
pub fn question_score(choice: Choice, reversed: bool) -> u8 {
    let raw = choice.value() - Choice::MIN;
    if reversed {
        MAX_QUESTION_SCORE - raw
    } else {
        raw
    }
}

pub fn score<I>(answers: I) -> u32
where
    I: IntoIterator<Item = (Choice, bool)>,
{
    answers
        .into_iter()
        .map(|(choice, reversed)| u32::from(question_score(choice, reversed)))
        .sum()
}

/// Buckets a score against thirds of the maximum `3 * question_count`.
///
/// The comparisons are `score <= max / 3` and `score <= 2 * max / 3` over the
/// reals, evaluated as `3 * score <= max` so no rounding creeps in.
pub fn profile_for(score: u32, question_count: usize) -> Profile {
    let max = u64::from(MAX_QUESTION_SCORE) * question_count as u64;
    let scaled = 3 * u64::from(score);

    if scaled <= max {
        Profile::FocusedAchiever
    } else if scaled <= 2 * max {
        Profile::ModeratelyDistracted
    } else {
        Profile::BurnoutRisk
    }
}
