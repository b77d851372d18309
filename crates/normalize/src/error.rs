use std::io;
use thiserror::Error;

/// Errors raised while building a normalizer from external resources.
///
/// Normalizing text itself never fails; malformed input just produces fewer
/// tokens.
#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("failed to read stopword list: {0}")]
    Io(#[from] io::Error),
    #[error("stopword list {0} contains no words")]
    EmptyStopwords(String),
}
