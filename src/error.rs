//! Error types shared by every stage of the codec.

use std::io;
use thiserror::Error;

/// Errors produced while scanning, encoding or decoding an archive.
#[derive(Debug, Error)]
pub enum Error {
    /// The underlying source or sink failed.
    #[error("I/O error: {0}")]
    Io(#[source] io::Error),

    /// The source ran out before the expected data was read.
    #[error("unexpected end of input")]
    EndOfInput,

    /// The archive header names a dictionary format this crate cannot read.
    #[error("unsupported format version: {0}")]
    UnsupportedFormatVersion(u16),

    /// The dictionary does not describe a valid code tree.
    #[error("corrupt dictionary: {0}")]
    CorruptDictionary(String),

    /// Caller-supplied data or options the codec cannot encode.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Builds a [`Error::CorruptDictionary`] from anything printable.
    pub fn corrupt(msg: impl Into<String>) -> Self {
        Error::CorruptDictionary(msg.into())
    }

    /// Builds an [`Error::InvalidInput`] from anything printable.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }
}

// A short read is the one I/O failure the codec gives its own name.
impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            Error::EndOfInput
        } else {
            Error::Io(err)
        }
    }
}

impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Io(err) => err,
            Error::EndOfInput => io::Error::from(io::ErrorKind::UnexpectedEof),
            other => io::Error::new(io::ErrorKind::InvalidData, other),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_converts() {
        let err: Error = io::Error::new(io::ErrorKind::BrokenPipe, "gone").into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("gone"));
    }

    #[test]
    fn test_unexpected_eof_becomes_end_of_input() {
        let err: Error = io::Error::from(io::ErrorKind::UnexpectedEof).into();
        assert!(matches!(err, Error::EndOfInput));

        let back: io::Error = Error::EndOfInput.into();
        assert_eq!(back.kind(), io::ErrorKind::UnexpectedEof);
        assert!(matches!(Error::from(back), Error::EndOfInput));
    }

    #[test]
    fn test_format_errors_map_to_invalid_data() {
        let err: io::Error = Error::UnsupportedFormatVersion(9).into();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            Error::UnsupportedFormatVersion(7).to_string(),
            "unsupported format version: 7"
        );
        assert_eq!(
            Error::corrupt("bad trie").to_string(),
            "corrupt dictionary: bad trie"
        );
        assert_eq!(Error::EndOfInput.to_string(), "unexpected end of input");
    }
}
