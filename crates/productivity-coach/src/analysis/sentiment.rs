use super::lexicon::{NEGATIVE_WORDS, POSITIVE_WORDS};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn label(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Counts how many lexicon words occur in `lowered`; each word counts once.
fn lexicon_hits(lowered: &str, lexicon: &[&str]) -> usize {
    lexicon.iter().filter(|word| lowered.contains(*word)).count()
}

pub fn sentiment(text: &str) -> Sentiment {
    let lowered = text.to_lowercase();
    let positive = lexicon_hits(&lowered, &POSITIVE_WORDS);
    let negative = lexicon_hits(&lowered, &NEGATIVE_WORDS);

    if negative > positive {
        Sentiment::Negative
    } else if positive > negative {
        Sentiment::Positive
    } else {
        Sentiment::Neutral
    }
}
