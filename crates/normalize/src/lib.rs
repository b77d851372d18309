//! Synopsis normalization for the Cinematch genre classifier.
//!
//! Raw synopses go through the exact cleanup the vectorizer was trained on,
//! so this crate is the contract between user text and model features.
//!
//! ## What we do
//!
//! - Replace everything that is not an ASCII letter with a space
//! - Lowercase and split on whitespace
//! - Drop English stopwords and tokens shorter than three letters
//! - Lemmatize the survivors to their noun base form
//!
//! ## Pure function guarantee
//!
//! No I/O after construction, no locale dependence, never fails. Empty or
//! absent input normalizes to an empty string; junk input normalizes to few
//! or no tokens.
//!
//! ```rust
//! use normalize::TextNormalizer;
//!
//! let normalizer = TextNormalizer::default();
//! assert_eq!(
//!     normalizer.normalize("Astronauts find an alien ship orbiting Saturn's moons."),
//!     "astronaut find alien ship orbiting saturn moon"
//! );
//! ```

mod config;
mod error;
mod lemma;
mod pipeline;
mod stopwords;

pub use crate::config::NormalizerConfig;
pub use crate::error::NormalizeError;
pub use crate::lemma::Lemmatizer;
pub use crate::pipeline::{normalize_text, TextNormalizer};
