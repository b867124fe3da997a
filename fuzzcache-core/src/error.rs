//! Error types for fuzzcache operations

use std::io;
use std::path::PathBuf;

/// Syntax errors raised while unquoting a payload token
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QuoteError {
    /// Token is shorter than an empty literal
    #[error("Quoted token too short: {0} bytes")]
    TooShort(usize),

    /// Token does not start and end with the same quote character
    #[error("Token is not a quoted literal")]
    MismatchedQuotes,

    /// A quote character appears unescaped inside the literal
    #[error("Unescaped quote at offset {0}")]
    UnescapedQuote(usize),

    /// A raw line break appears inside an interpreted literal
    #[error("Raw newline at offset {0}")]
    Newline(usize),

    /// An escape sequence is unknown or malformed
    #[error("Invalid escape sequence at offset {0}")]
    InvalidEscape(usize),

    /// An escape sequence is cut off by the end of the literal
    #[error("Truncated escape sequence at offset {0}")]
    TruncatedEscape(usize),

    /// A `\u`/`\U` escape names something that is not a Unicode scalar value
    #[error("Invalid code point U+{0:X}")]
    InvalidCodePoint(u32),

    /// The token bytes are not valid UTF-8
    #[error("Token is not valid UTF-8")]
    NotUtf8,
}

/// Errors that can occur while reading or writing seed corpora
#[derive(thiserror::Error, Debug)]
pub enum CorpusError {
    /// Filesystem failure, with the path that caused it
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        /// The file or directory being accessed.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: io::Error,
    },

    /// A payload token could not be unquoted
    ///
    /// The readers in this crate log and skip undecodable lines, so this is
    /// only produced when callers apply `?` to [`crate::quote::decode`].
    #[error("Format error: {0}")]
    Quote(#[from] QuoteError),

    /// A native cache entry has no `[]byte(...)` line
    #[error("No []byte payload line in {}", .path.display())]
    MissingPayload {
        /// The offending entry file.
        path: PathBuf,
    },

    /// A target name cannot be used as a single path component
    #[error("Invalid target name: {0:?}")]
    InvalidTargetName(String),
}

impl CorpusError {
    /// Wraps an IO error together with the path it occurred on
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        CorpusError::Io {
            path: path.into(),
            source,
        }
    }

    /// True when the error is an IO error of kind `NotFound`
    pub fn is_not_found(&self) -> bool {
        matches!(self, CorpusError::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}
