use std::path::Path;

use fxhash::FxHashSet;
use once_cell::sync::Lazy;

use crate::config::NormalizerConfig;
use crate::error::NormalizeError;
use crate::lemma::Lemmatizer;
use crate::stopwords;

static DEFAULT_NORMALIZER: Lazy<TextNormalizer> = Lazy::new(TextNormalizer::default);

/// Normalizes `text` with the default English normalizer.
///
/// Accepts either a `&str` or an `Option<&str>`; absent input yields `""`.
///
/// ```rust
/// use normalize::normalize_text;
///
/// assert_eq!(normalize_text("The 3 Aliens!"), "alien");
/// assert_eq!(normalize_text(None), "");
/// ```
pub fn normalize_text<'a>(text: impl Into<Option<&'a str>>) -> String {
    DEFAULT_NORMALIZER.normalize(text)
}

/// Turns free text into the space-joined token stream the vectorizer was
/// trained on.
///
/// Steps, in order: every character outside `A-Z`/`a-z` becomes a space, the
/// text is lowercased and split on whitespace, stopwords and short tokens are
/// dropped, survivors are lemmatized.
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    stopwords: FxHashSet<String>,
    lemmatizer: Lemmatizer,
    config: NormalizerConfig,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new(NormalizerConfig::default())
    }
}

impl TextNormalizer {
    /// English stopwords with the given config.
    pub fn new(config: NormalizerConfig) -> Self {
        Self::with_stopwords(stopwords::english(), config)
    }

    /// Uses `stopwords` instead of the built-in English list. Entries are
    /// expected in lowercase.
    pub fn with_stopwords<I, S>(stopwords: I, config: NormalizerConfig) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            stopwords: stopwords.into_iter().map(Into::into).collect(),
            lemmatizer: Lemmatizer::new(config.min_token_len),
            config,
        }
    }

    /// Loads a newline-separated stopword list from `path`.
    pub fn from_stopword_file(
        path: impl AsRef<Path>,
        config: NormalizerConfig,
    ) -> Result<Self, NormalizeError> {
        let words = stopwords::read_stopword_file(path.as_ref())?;
        Ok(Self::with_stopwords(words, config))
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(token)
    }

    /// Normalized tokens in input order.
    pub fn tokens<'a>(&self, text: impl Into<Option<&'a str>>) -> Vec<String> {
        let Some(text) = text.into() else {
            return Vec::new();
        };

        let letters_only: String = text
            .chars()
            .map(|ch| {
                if ch.is_ascii_alphabetic() {
                    ch.to_ascii_lowercase()
                } else {
                    ' '
                }
            })
            .collect();

        letters_only
            .split_whitespace()
            .filter(|token| token.len() >= self.config.min_token_len && !self.is_stopword(token))
            .map(|token| {
                if self.config.lemmatize {
                    self.lemmatizer.lemmatize(token).into_owned()
                } else {
                    token.to_string()
                }
            })
            .collect()
    }

    /// Normalized tokens joined by single spaces.
    pub fn normalize<'a>(&self, text: impl Into<Option<&'a str>>) -> String {
        self.tokens(text).join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_non_letters_and_lowercases() {
        let normalizer = TextNormalizer::default();
        assert_eq!(
            normalizer.normalize("A rogue AI-driven spaceship, 2049!"),
            "rogue driven spaceship"
        );
    }

    #[test]
    fn digits_split_words() {
        let normalizer = TextNormalizer::default();
        assert_eq!(normalizer.normalize("robot42killer"), "robot killer");
    }

    #[test]
    fn drops_stopwords_and_short_tokens() {
        let normalizer = TextNormalizer::default();
        assert_eq!(normalizer.normalize("He is on an old ship with her"), "old ship");
    }

    #[test]
    fn stopword_check_happens_before_lemmatization() {
        // "ours" is a stopword; "hours" is not and lemmatizes to "hour".
        let normalizer = TextNormalizer::default();
        assert_eq!(normalizer.normalize("ours hours"), "hour");
    }

    #[test]
    fn lemmatizes_survivors() {
        let normalizer = TextNormalizer::default();
        assert_eq!(
            normalizer.normalize("Two detectives chase thieves across cities"),
            "two detective chase thief across city"
        );
    }

    #[test]
    fn lemmatization_can_be_disabled() {
        let normalizer = TextNormalizer::new(NormalizerConfig {
            lemmatize: false,
            ..Default::default()
        });
        assert_eq!(normalizer.normalize("detectives"), "detectives");
    }

    #[test]
    fn empty_and_absent_inputs() {
        let normalizer = TextNormalizer::default();
        assert_eq!(normalizer.normalize(""), "");
        assert_eq!(normalizer.normalize(None), "");
        assert_eq!(normalizer.normalize("   \t\n"), "");
        assert_eq!(normalizer.normalize("!!! 123 ???"), "");
    }

    #[test]
    fn non_ascii_letters_are_separators() {
        let normalizer = TextNormalizer::default();
        assert_eq!(normalizer.normalize("café über naïve"), "caf ber");
    }

    #[test]
    fn custom_stopwords_replace_defaults() {
        let normalizer = TextNormalizer::with_stopwords(["movie"], NormalizerConfig::default());
        assert_eq!(normalizer.normalize("the movie about dragons"), "the about dragon");
    }

    #[test]
    fn free_function_uses_english_defaults() {
        assert_eq!(normalize_text("The Wolves of the North"), "wolf north");
        assert_eq!(normalize_text(None), "");
    }
}
