//! Binary reader for forward-only parsing of byte slices.
//!
//! This module provides [`BinaryReader`], the cursor every decoder in the
//! workspace is driven by. It only ever moves forward, and every read is
//! bounds-checked before the position changes.

use byteorder::{ByteOrder, LittleEndian};

use crate::{Error, Result, MAX_PREALLOCATED_ITEMS, MAX_VAR_LENGTH_BYTES};

/// A forward-only little-endian reader over a byte slice.
///
/// The reader never seeks backward. A failed read leaves the position
/// untouched, but callers are expected to abandon the whole decode.
///
/// # Example
///
/// ```
/// use herodex_common::BinaryReader;
///
/// let data = [0x01, 0x02, 0x03, 0x04, 0x81, 0x01];
/// let mut reader = BinaryReader::new(&data);
///
/// assert_eq!(reader.read_u32().unwrap(), 0x04030201);
/// assert_eq!(reader.read_var_length().unwrap(), 129);
/// assert!(reader.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct BinaryReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> BinaryReader<'a> {
    /// Create a new reader from a byte slice.
    #[inline]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Get the current position in the buffer.
    #[inline]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Get the total length of the underlying buffer.
    #[inline]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Get the number of bytes remaining to read.
    #[inline]
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Check if there are no more bytes to read.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.position >= self.data.len()
    }

    /// Get the remaining bytes as a slice.
    #[inline]
    pub fn remaining_bytes(&self) -> &'a [u8] {
        &self.data[self.position.min(self.data.len())..]
    }

    /// Peek at bytes without advancing the position.
    #[inline]
    pub fn peek_bytes(&self, count: usize) -> Result<&'a [u8]> {
        if self.remaining() < count {
            return Err(Error::UnexpectedEof {
                needed: count,
                available: self.remaining(),
            });
        }
        Ok(&self.data[self.position..self.position + count])
    }

    /// Read bytes and advance the position.
    #[inline]
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        let bytes = self.peek_bytes(count)?;
        self.position += count;
        Ok(bytes)
    }

    /// Skip `count` bytes.
    #[inline]
    pub fn skip(&mut self, count: usize) -> Result<()> {
        self.read_bytes(count).map(|_| ())
    }

    /// Read a single byte.
    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        self.read_bytes(1).map(|b| b[0])
    }

    /// Read a signed byte.
    #[inline]
    pub fn read_i8(&mut self) -> Result<i8> {
        self.read_u8().map(|b| b as i8)
    }

    /// Read a boolean (non-zero = true).
    #[inline]
    pub fn read_bool(&mut self) -> Result<bool> {
        self.read_u8().map(|b| b != 0)
    }

    /// Read a little-endian u16.
    #[inline]
    pub fn read_u16(&mut self) -> Result<u16> {
        self.read_bytes(2).map(LittleEndian::read_u16)
    }

    /// Read a little-endian i16.
    #[inline]
    pub fn read_i16(&mut self) -> Result<i16> {
        self.read_bytes(2).map(LittleEndian::read_i16)
    }

    /// Read a little-endian u32.
    #[inline]
    pub fn read_u32(&mut self) -> Result<u32> {
        self.read_bytes(4).map(LittleEndian::read_u32)
    }

    /// Read a little-endian i32.
    #[inline]
    pub fn read_i32(&mut self) -> Result<i32> {
        self.read_bytes(4).map(LittleEndian::read_i32)
    }

    /// Read a little-endian u64.
    #[inline]
    pub fn read_u64(&mut self) -> Result<u64> {
        self.read_bytes(8).map(LittleEndian::read_u64)
    }

    /// Read a little-endian i64.
    #[inline]
    pub fn read_i64(&mut self) -> Result<i64> {
        self.read_bytes(8).map(LittleEndian::read_i64)
    }

    /// Read a little-endian f32.
    #[inline]
    pub fn read_f32(&mut self) -> Result<f32> {
        self.read_bytes(4).map(LittleEndian::read_f32)
    }

    /// Read a little-endian f64.
    #[inline]
    pub fn read_f64(&mut self) -> Result<f64> {
        self.read_bytes(8).map(LittleEndian::read_f64)
    }

    /// Read a base-128 var-length integer.
    ///
    /// Seven data bits per byte, least significant group first, with the
    /// high bit set on every byte except the last. Used only as a text
    /// length prefix.
    pub fn read_var_length(&mut self) -> Result<usize> {
        let start = self.position;
        let mut result: u64 = 0;

        for index in 0..MAX_VAR_LENGTH_BYTES {
            let byte = match self.read_u8() {
                Ok(byte) => byte,
                Err(e) => {
                    self.position = start;
                    return Err(e);
                }
            };
            result |= u64::from(byte & 0x7F) << (index * 7);

            if byte & 0x80 == 0 {
                if result > u64::from(u32::MAX) {
                    break;
                }
                return Ok(result as usize);
            }
        }

        self.position = start;
        Err(Error::VarLengthOverflow { position: start })
    }

    /// Read a var-length-prefixed string of single-byte characters.
    ///
    /// Each byte maps to the code point of the same value, so any byte
    /// sequence decodes without error.
    pub fn read_text(&mut self) -> Result<String> {
        let start = self.position;
        let length = self.read_var_length()?;
        match self.read_bytes(length) {
            Ok(bytes) => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
            Err(e) => {
                self.position = start;
                Err(e)
            }
        }
    }

    /// Read an i32 element count stored as `count - 1`.
    ///
    /// Stored values below -1 yield an empty collection.
    #[inline]
    pub fn read_count(&mut self) -> Result<usize> {
        self.read_i32().map(|stored| (i64::from(stored) + 1).max(0) as usize)
    }

    /// Read an i8 element count stored as `count - 1`.
    #[inline]
    pub fn read_count_i8(&mut self) -> Result<usize> {
        self.read_i8().map(|stored| (i16::from(stored) + 1).max(0) as usize)
    }

    /// Capacity to reserve for `count` elements about to be read.
    ///
    /// Every element takes at least one byte, and the reservation never
    /// exceeds [`MAX_PREALLOCATED_ITEMS`]. A corrupt count then fails on
    /// the first short read instead of allocating.
    #[inline]
    pub fn capacity_for(&self, count: usize) -> usize {
        count.min(self.remaining()).min(MAX_PREALLOCATED_ITEMS)
    }

    /// Read a count-prefixed list, calling `read_item` once per element.
    pub fn read_list<T, F>(&mut self, mut read_item: F) -> Result<Vec<T>>
    where
        F: FnMut(&mut Self) -> Result<T>,
    {
        let count = self.read_count()?;
        let mut items = Vec::with_capacity(self.capacity_for(count));
        for _ in 0..count {
            items.push(read_item(self)?);
        }
        Ok(items)
    }

    /// Read a count-prefixed list of i32 values.
    pub fn read_i32_list(&mut self) -> Result<Vec<i32>> {
        self.read_list(|reader| reader.read_i32())
    }

    /// Read a count-prefixed list of strings.
    pub fn read_text_list(&mut self) -> Result<Vec<String>> {
        self.read_list(|reader| reader.read_text())
    }
}
