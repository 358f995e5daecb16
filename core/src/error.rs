use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// `build` was given a different number of texts and titles.
    #[error("length of texts ({texts}) is not equal to length of titles ({titles})")]
    LengthMismatch { texts: usize, titles: usize },

    /// Serialized index text does not follow the index format.
    /// `line` is 1-based; 0 means the document as a whole.
    #[error("invalid index format at line {line}: {reason}")]
    Format { line: usize, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("store error: {0}")]
    Store(#[from] sled::Error),

    /// A store row exists but could not be decoded.
    #[error("corrupt store row: {0}")]
    Corrupt(String),
}

impl Error {
    pub(crate) fn format(line: usize, reason: impl Into<String>) -> Self {
        Error::Format { line, reason: reason.into() }
    }
}
