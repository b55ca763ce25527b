//! Keyword-based analysis of free-text answers: sentiment, top keywords, and
//! behavioral tags. Everything here is a pure function over static tables
//! plus the analyzer's stopword set.

mod keywords;
mod lexicon;
mod sentiment;
mod stopwords;

pub use keywords::{extract_keywords, keywords, DEFAULT_KEYWORD_LIMIT};
pub use lexicon::{tags, BehavioralTag, UnknownTag, NEGATIVE_WORDS, POSITIVE_WORDS};
pub use sentiment::{sentiment, Sentiment};
pub use stopwords::{StopwordError, Stopwords};

use crate::config::AnalysisConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::info;

/// Raw answer to a descriptive question, keyed by the question identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeTextAnswer {
    pub key: String,
    pub text: String,
}

impl FreeTextAnswer {
    pub fn new(key: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            text: text.into(),
        }
    }
}

/// Analysis of a single piece of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextAnalysis {
    pub sentiment: Sentiment,
    pub keywords: Vec<String>,
    pub tags: BTreeSet<BehavioralTag>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionAnalysis {
    pub question: String,
    #[serde(flatten)]
    pub analysis: TextAnalysis,
}

/// Combined view over all answers plus the per-question breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub all_tags: BTreeSet<BehavioralTag>,
    pub all_keywords: Vec<String>,
    pub individual_analysis: Vec<QuestionAnalysis>,
}

/// Text analysis bound to one stopword set.
#[derive(Debug, Clone)]
pub struct TextAnalyzer {
    stopwords: Stopwords,
    keyword_limit: usize,
}

impl TextAnalyzer {
    pub fn new(stopwords: Stopwords) -> Self {
        Self {
            stopwords,
            keyword_limit: DEFAULT_KEYWORD_LIMIT,
        }
    }

    /// Build the analyzer for this process, loading any configured override.
    ///
    /// A broken override is fatal for the whole run, so callers should build
    /// the analyzer once at startup.
    pub fn from_config(config: &AnalysisConfig) -> Result<Self, StopwordError> {
        let stopwords = match &config.stopwords_path {
            Some(path) => {
                let stopwords = Stopwords::from_path(path)?;
                info!(path = %path.display(), words = stopwords.len(), "loaded stopword override");
                stopwords
            }
            None => Stopwords::english().clone(),
        };
        Ok(Self::new(stopwords).with_keyword_limit(config.keyword_limit))
    }

    pub fn with_keyword_limit(mut self, limit: usize) -> Self {
        self.keyword_limit = limit;
        self
    }

    pub fn keywords(&self, text: &str) -> Vec<String> {
        extract_keywords(text, &self.stopwords, self.keyword_limit)
    }

    pub fn analyze_text(&self, text: &str) -> TextAnalysis {
        TextAnalysis {
            sentiment: sentiment(text),
            keywords: self.keywords(text),
            tags: tags(text),
        }
    }

    /// Analyze every answer independently and their space-joined concatenation.
    pub fn analyze(&self, answers: &[FreeTextAnswer]) -> AnalysisReport {
        let combined = answers
            .iter()
            .map(|answer| answer.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        let individual_analysis = answers
            .iter()
            .map(|answer| QuestionAnalysis {
                question: answer.key.clone(),
                analysis: self.analyze_text(&answer.text),
            })
            .collect();

        AnalysisReport {
            all_tags: tags(&combined),
            all_keywords: self.keywords(&combined),
            individual_analysis,
        }
    }
}

impl Default for TextAnalyzer {
    fn default() -> Self {
        Self::new(Stopwords::english().clone())
    }
}
