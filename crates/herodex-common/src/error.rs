//! Error types for herodex-common.

use thiserror::Error;

/// Low-level read error.
///
/// Every variant is fatal for the decode that produced it: the blob is
/// either corrupt or uses a layout this reader does not understand.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A read would cross the end of the buffer.
    #[error("unexpected end of buffer: needed {needed} bytes but only {available} available")]
    UnexpectedEof { needed: usize, available: usize },

    /// A var-length prefix ran past its maximum width or overflowed 32 bits.
    #[error("var-length prefix at offset {position} does not fit in 32 bits")]
    VarLengthOverflow { position: usize },
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
