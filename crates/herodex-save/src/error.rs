//! Error types for save decoding.

use std::fmt;

use thiserror::Error;

/// The envelope stage a format error was raised in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Split,
    HexDecode,
    Decompress,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Split => "split",
            Self::HexDecode => "hex decode",
            Self::Decompress => "decompress",
        })
    }
}

/// Errors that can occur when decoding a save.
#[derive(Debug, Error)]
pub enum Error {
    /// The save string is structurally malformed.
    #[error("invalid save string ({stage}): {message}")]
    Format { stage: Stage, message: String },

    /// The payload was written by a newer schema than this decoder knows.
    #[error("save schema version {found} is newer than supported version {max}")]
    VersionTooNew { found: i32, max: i32 },

    /// A read ran past the end of the payload.
    #[error("payload read failed: {0}")]
    Range(#[from] herodex_common::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn format(stage: Stage, message: impl Into<String>) -> Self {
        Self::Format {
            stage,
            message: message.into(),
        }
    }

    /// Whether this is a structural error raised before the binary decode.
    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format { .. })
    }
}

/// Result type for save operations.
pub type Result<T> = std::result::Result<T, Error>;
