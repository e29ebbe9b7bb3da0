//! Error and result types.

use std::io;

use ndarray::ShapeError;
use thiserror::Error;

/// `Result` type alias for operations that can fail.
pub type Result<T> = ::std::result::Result<T, Error>;

/// Errors of embedding lookups, evaluations, and I/O.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A word is not in the vocabulary of the embedding model.
    #[error("Unknown word: {word}")]
    UnknownWord { word: String },

    /// An argument is outside of its domain.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Evaluation of a benchmark row failed.
    #[error("Cannot evaluate row {idx}: {source}")]
    Row {
        idx: usize,
        #[source]
        source: Box<Error>,
    },

    /// Invalid file format.
    #[error("{0}")]
    Format(String),

    /// I/O error.
    #[error("{desc}: {error}")]
    Io {
        desc: String,
        #[source]
        error: io::Error,
    },

    /// `ndarray` shape error.
    #[error(transparent)]
    Shape(#[from] ShapeError),
}

impl Error {
    pub fn io_error(desc: impl Into<String>, error: io::Error) -> Self {
        Error::Io {
            desc: desc.into(),
            error,
        }
    }

    pub fn invalid_argument(desc: impl Into<String>) -> Self {
        Error::InvalidArgument(desc.into())
    }

    pub fn unknown_word(word: impl Into<String>) -> Self {
        Error::UnknownWord { word: word.into() }
    }

    /// Attach the index of the benchmark row that caused the error.
    pub fn in_row(self, idx: usize) -> Self {
        Error::Row {
            idx,
            source: Box::new(self),
        }
    }

    /// Get the underlying error of a row error.
    pub fn root(&self) -> &Error {
        match self {
            Error::Row { source, .. } => source.root(),
            err => err,
        }
    }

    /// Returns `true` if the root cause is an out-of-vocabulary word.
    pub fn is_unknown_word(&self) -> bool {
        matches!(self.root(), Error::UnknownWord { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn row_error_names_row_and_word() {
        let err = Error::unknown_word("reina").in_row(7);
        assert_eq!(err.to_string(), "Cannot evaluate row 7: Unknown word: reina");
        assert!(err.is_unknown_word());
    }

    #[test]
    fn root_of_plain_error_is_itself() {
        let err = Error::invalid_argument("k must be at least 1");
        assert!(!err.is_unknown_word());
        assert!(matches!(err.root(), Error::InvalidArgument(_)));
    }
}
