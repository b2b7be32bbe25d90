//! Error types for catalog decoding.

use thiserror::Error;

/// Errors that can occur when decoding a catalog.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Common library error.
    #[error("{0}")]
    Common(#[from] herodex_common::Error),

    /// A record inside a counted section failed to decode.
    #[error("failed to decode {kind} #{index}: {source}")]
    Record {
        kind: &'static str,
        index: usize,
        #[source]
        source: herodex_common::Error,
    },
}

impl Error {
    /// Wrap a read error with the record it occurred in.
    pub(crate) fn record(kind: &'static str, index: usize) -> impl FnOnce(herodex_common::Error) -> Self {
        move |source| Self::Record { kind, index, source }
    }
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, Error>;
