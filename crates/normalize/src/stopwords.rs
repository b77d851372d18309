//! English stopword list.
//!
//! Contractions are omitted: the normalizer replaces apostrophes with spaces
//! before the lookup, so only their alphabetic fragments (`don`, `ll`, `ve`,
//! ...) can ever reach it.

use std::fs;
use std::path::Path;

use fxhash::FxHashSet;

use crate::error::NormalizeError;

pub(crate) const ENGLISH: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
    "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself",
    "it", "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "this", "that", "these", "those", "am", "is", "are", "was", "were", "be",
    "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an",
    "the", "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by",
    "for", "with", "about", "against", "between", "into", "through", "during", "before",
    "after", "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over",
    "under", "again", "further", "then", "once", "here", "there", "when", "where", "why",
    "how", "all", "any", "both", "each", "few", "more", "most", "other", "some", "such", "no",
    "nor", "not", "only", "own", "same", "so", "than", "too", "very", "s", "t", "can", "will",
    "just", "don", "should", "now", "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren",
    "couldn", "didn", "doesn", "hadn", "hasn", "haven", "isn", "ma", "mightn", "mustn",
    "needn", "shan", "shouldn", "wasn", "weren", "won", "wouldn",
];

pub(crate) fn english() -> FxHashSet<String> {
    ENGLISH.iter().map(|w| (*w).to_string()).collect()
}

/// Reads a newline-separated stopword list. Blank lines and `#` comments are
/// skipped; entries are lowercased.
pub(crate) fn read_stopword_file(path: &Path) -> Result<FxHashSet<String>, NormalizeError> {
    let raw = fs::read_to_string(path)?;
    let words: FxHashSet<String> = raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_ascii_lowercase)
        .collect();

    if words.is_empty() {
        return Err(NormalizeError::EmptyStopwords(path.display().to_string()));
    }
    Ok(words)
}
