use super::stopwords::Stopwords;
use std::collections::HashMap;

pub const DEFAULT_KEYWORD_LIMIT: usize = 5;

/// Most frequent non-stopword tokens, most frequent first.
///
/// Text is lower-cased and stripped of ASCII punctuation, so "can't" becomes
/// "cant". Any other non-alphanumeric character (curly quotes, dashes,
/// ellipses) separates words like whitespace does. Only purely alphabetic
/// tokens count. Ties keep the order in which the words first appeared.
pub fn extract_keywords(text: &str, stopwords: &Stopwords, limit: usize) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|ch| !ch.is_ascii_punctuation())
        .map(|ch| if ch.is_alphanumeric() { ch } else { ' ' })
        .collect();

    let mut counts: Vec<(&str, usize)> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();
    for token in cleaned.split_whitespace() {
        if !token.chars().all(char::is_alphabetic) || stopwords.contains(token) {
            continue;
        }
        match positions.get(token) {
            Some(&position) => counts[position].1 += 1,
            None => {
                positions.insert(token, counts.len());
                counts.push((token, 1));
            }
        }
    }

    // stable sort keeps first-seen order among equal counts
    counts.sort_by(|left, right| right.1.cmp(&left.1));
    counts
        .into_iter()
        .take(limit)
        .map(|(word, _)| word.to_string())
        .collect()
}

/// [`extract_keywords`] with the built-in English stopwords and limit.
pub fn keywords(text: &str) -> Vec<String> {
    extract_keywords(text, Stopwords::english(), DEFAULT_KEYWORD_LIMIT)
}
