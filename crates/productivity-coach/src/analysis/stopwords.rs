use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// NLTK's English stopword corpus.
static ENGLISH: [&str; 179] = [
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

#[derive(Debug, thiserror::Error)]
pub enum StopwordError {
    #[error(
        "unable to read stopword list {path}: {source}; point APP_STOPWORDS_PATH at a \
         newline-delimited word list or unset it to use the built-in English list"
    )]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(
        "stopword list {path} contains no words; add one word per line or unset \
         APP_STOPWORDS_PATH to use the built-in English list"
    )]
    Empty { path: PathBuf },
}

/// Words ignored by keyword extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stopwords {
    words: HashSet<String>,
}

impl Stopwords {
    /// Shared copy of the built-in English list.
    pub fn english() -> &'static Stopwords {
        static SHARED: OnceLock<Stopwords> = OnceLock::new();
        SHARED.get_or_init(|| Stopwords::from_words(ENGLISH))
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|word| word.as_ref().trim().to_lowercase())
            .filter(|word| !word.is_empty())
            .collect();
        Self { words }
    }

    /// Load a newline-delimited list; blank lines and `#` comments are skipped.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, StopwordError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| StopwordError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let stopwords = Self::from_words(
            raw.lines()
                .map(str::trim)
                .filter(|line| !line.starts_with('#')),
        );
        if stopwords.is_empty() {
            return Err(StopwordError::Empty {
                path: path.to_path_buf(),
            });
        }
        Ok(stopwords)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for Stopwords {
    fn default() -> Self {
        Self::english().clone()
    }
}
