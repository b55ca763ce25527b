use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

pub static POSITIVE_WORDS: [&str; 12] = [
    "focused",
    "productive",
    "energized",
    "motivated",
    "accomplished",
    "clear",
    "organized",
    "efficient",
    "great",
    "good",
    "calm",
    "ready",
];

pub static NEGATIVE_WORDS: [&str; 12] = [
    "distracted",
    "overwhelmed",
    "procrastinating",
    "anxious",
    "stressed",
    "tired",
    "exhausted",
    "stuck",
    "unmotivated",
    "messy",
    "late",
    "pressure",
];

/// Behavioral pattern detected in free text.
///
/// Ordering follows declaration order, so tag sets always render the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BehavioralTag {
    #[serde(rename = "procrastination")]
    Procrastination,
    #[serde(rename = "time anxiety")]
    TimeAnxiety,
    #[serde(rename = "distraction")]
    Distraction,
    #[serde(rename = "burnout")]
    Burnout,
    #[serde(rename = "planning")]
    Planning,
}

impl BehavioralTag {
    pub const ALL: [BehavioralTag; 5] = [
        BehavioralTag::Procrastination,
        BehavioralTag::TimeAnxiety,
        BehavioralTag::Distraction,
        BehavioralTag::Burnout,
        BehavioralTag::Planning,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            BehavioralTag::Procrastination => "procrastination",
            BehavioralTag::TimeAnxiety => "time anxiety",
            BehavioralTag::Distraction => "distraction",
            BehavioralTag::Burnout => "burnout",
            BehavioralTag::Planning => "planning",
        }
    }

    /// Lower-case substrings that trigger this tag.
    pub fn triggers(&self) -> &'static [&'static str] {
        match self {
            BehavioralTag::Procrastination => &[
                "procrastinate",
                "procrastinating",
                "delay",
                "put off",
                "avoid",
                "can't start",
            ],
            BehavioralTag::TimeAnxiety => &["deadline", "pressure", "no time", "rushed", "late"],
            BehavioralTag::Distraction => &[
                "notifications",
                "social media",
                "phone",
                "distracted",
                "interruptions",
            ],
            BehavioralTag::Burnout => &["exhausted", "overwhelmed", "tired", "drained", "no energy"],
            BehavioralTag::Planning => &["plan", "schedule", "list", "organize", "morning routine"],
        }
    }
}

impl fmt::Display for BehavioralTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown behavioral tag '{0}'")]
pub struct UnknownTag(pub String);

impl FromStr for BehavioralTag {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        BehavioralTag::ALL
            .into_iter()
            .find(|tag| tag.label().eq_ignore_ascii_case(needle))
            .ok_or_else(|| UnknownTag(needle.to_string()))
    }
}

/// Tags whose triggers appear anywhere in the text.
///
/// Matching is raw substring containment on the lower-cased text, so a
/// trigger also fires inside longer words ("plan" in "explanation").
pub fn tags(text: &str) -> BTreeSet<BehavioralTag> {
    let lowered = text.to_lowercase();
    BehavioralTag::ALL
        .into_iter()
        .filter(|tag| {
            tag.triggers()
                .iter()
                .any(|trigger| lowered.contains(trigger))
        })
        .collect()
}
