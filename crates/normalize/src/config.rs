//! Configuration for the synopsis normalizer.
//!
//! # Examples
//!
//! ```rust
//! use normalize::NormalizerConfig;
//!
//! let config = NormalizerConfig::default();
//! assert_eq!(config.min_token_len, 3);
//! assert!(config.lemmatize);
//! ```

use serde::{Deserialize, Serialize};

/// Controls which tokens survive normalization.
///
/// The defaults match the preprocessing the shipped classifier was trained
/// with; changing them changes the features the vectorizer sees.
///
/// ```json
/// {
///   "min_token_len": 3,
///   "lemmatize": true
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Tokens shorter than this are dropped. Lemmatization never shortens a
    /// token below this length either.
    pub min_token_len: usize,

    /// Reduce surviving tokens to their noun base form.
    pub lemmatize: bool,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            min_token_len: 3,
            lemmatize: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_keeps_three_letter_tokens() {
        let cfg = NormalizerConfig::default();
        assert_eq!(cfg.min_token_len, 3);
        assert!(cfg.lemmatize);
    }

    #[test]
    fn struct_update_overrides_single_field() {
        let cfg = NormalizerConfig {
            lemmatize: false,
            ..Default::default()
        };
        assert_eq!(cfg.min_token_len, 3);
        assert!(!cfg.lemmatize);
    }
}
