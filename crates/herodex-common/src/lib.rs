//! Common utilities for Herodex.
//!
//! This crate provides the foundational binary plumbing shared by the
//! catalog and save decoders:
//!
//! - [`BinaryReader`] - Forward-only little-endian cursor over a byte slice
//! - [`BinaryWriter`] - The append-only inverse, used to build payloads
//!
//! Both sides agree on two conventions used throughout the formats:
//! text is a base-128 length prefix followed by single-byte characters, and
//! repeated collections store their element count minus one.

mod error;
mod reader;
mod writer;

pub use error::{Error, Result};
pub use reader::BinaryReader;
pub use writer::BinaryWriter;

/// Maximum number of bytes a var-length prefix may occupy.
pub const MAX_VAR_LENGTH_BYTES: usize = 5;

/// Upper bound on elements reserved up front for a counted collection.
pub const MAX_PREALLOCATED_ITEMS: usize = 1024;
