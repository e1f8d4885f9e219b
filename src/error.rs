
use thiserror::Error;

// typed failures shared across the crate. artifact loading, vocabulary
// lookups and the training loop all surface one of these, the pipeline
// decides whether to stop.

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EmbedError {

    #[error("unknown word: {0}")]
    UnknownWord(String),

    #[error("shape mismatch: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("index {index} out of range for vocabulary of size {vocab_size}")]
    IndexOutOfRange { index: i64, vocab_size: usize },

    #[error("loss became non-finite in epoch {epoch}")]
    NumericalInstability { epoch: usize },
}
