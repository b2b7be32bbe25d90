//! Binary writer, the inverse of [`BinaryReader`](crate::BinaryReader).
//!
//! Used to assemble save payloads and synthetic catalog buffers.

use byteorder::{LittleEndian, WriteBytesExt};

/// An append-only little-endian writer.
///
/// # Example
///
/// ```
/// use herodex_common::{BinaryReader, BinaryWriter};
///
/// let mut writer = BinaryWriter::new();
/// writer.write_text("Blaster").write_count(3);
///
/// let bytes = writer.into_bytes();
/// let mut reader = BinaryReader::new(&bytes);
/// assert_eq!(reader.read_text().unwrap(), "Blaster");
/// assert_eq!(reader.read_count().unwrap(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BinaryWriter {
    bytes: Vec<u8>,
}

impl BinaryWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Check if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Borrow the written bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume the writer and return the written bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Append raw bytes.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.bytes.extend_from_slice(bytes);
        self
    }

    pub fn write_u8(&mut self, value: u8) -> &mut Self {
        self.bytes.push(value);
        self
    }

    pub fn write_i8(&mut self, value: i8) -> &mut Self {
        self.write_u8(value as u8)
    }

    pub fn write_bool(&mut self, value: bool) -> &mut Self {
        self.write_u8(u8::from(value))
    }

    // Writes into a Vec cannot fail.
    pub fn write_u16(&mut self, value: u16) -> &mut Self {
        let _ = self.bytes.write_u16::<LittleEndian>(value);
        self
    }

    pub fn write_i16(&mut self, value: i16) -> &mut Self {
        let _ = self.bytes.write_i16::<LittleEndian>(value);
        self
    }

    pub fn write_u32(&mut self, value: u32) -> &mut Self {
        let _ = self.bytes.write_u32::<LittleEndian>(value);
        self
    }

    pub fn write_i32(&mut self, value: i32) -> &mut Self {
        let _ = self.bytes.write_i32::<LittleEndian>(value);
        self
    }

    pub fn write_u64(&mut self, value: u64) -> &mut Self {
        let _ = self.bytes.write_u64::<LittleEndian>(value);
        self
    }

    pub fn write_i64(&mut self, value: i64) -> &mut Self {
        let _ = self.bytes.write_i64::<LittleEndian>(value);
        self
    }

    pub fn write_f32(&mut self, value: f32) -> &mut Self {
        let _ = self.bytes.write_f32::<LittleEndian>(value);
        self
    }

    pub fn write_f64(&mut self, value: f64) -> &mut Self {
        let _ = self.bytes.write_f64::<LittleEndian>(value);
        self
    }

    /// Append a base-128 var-length integer.
    pub fn write_var_length(&mut self, mut value: usize) -> &mut Self {
        loop {
            let byte = (value & 0x7F) as u8;
            value >>= 7;
            if value == 0 {
                self.bytes.push(byte);
                return self;
            }
            self.bytes.push(byte | 0x80);
        }
    }

    /// Append a var-length-prefixed string of single-byte characters.
    ///
    /// Characters above U+00FF do not fit the format and are written as `?`.
    pub fn write_text(&mut self, text: &str) -> &mut Self {
        let encoded: Vec<u8> = text
            .chars()
            .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
            .collect();
        self.write_var_length(encoded.len());
        self.write_bytes(&encoded)
    }

    /// Append an i32 element count using the `count - 1` convention.
    pub fn write_count(&mut self, count: usize) -> &mut Self {
        self.write_i32(count as i32 - 1)
    }

    /// Append an i8 element count using the `count - 1` convention.
    pub fn write_count_i8(&mut self, count: usize) -> &mut Self {
        self.write_i8((count as i32 - 1) as i8)
    }

    /// Append a count-prefixed list of strings.
    pub fn write_text_list<S: AsRef<str>>(&mut self, items: &[S]) -> &mut Self {
        self.write_count(items.len());
        for item in items {
            self.write_text(item.as_ref());
        }
        self
    }

    /// Append a count-prefixed list of i32 values.
    pub fn write_i32_list(&mut self, items: &[i32]) -> &mut Self {
        self.write_count(items.len());
        for &item in items {
            self.write_i32(item);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BinaryReader;

    #[test]
    fn test_var_length_encoding() {
        let mut writer = BinaryWriter::new();
        writer.write_var_length(129);
        assert_eq!(writer.as_bytes(), &[0x81, 0x01]);

        let mut writer = BinaryWriter::new();
        writer.write_var_length(0);
        assert_eq!(writer.as_bytes(), &[0x00]);
    }

    #[test]
    fn test_empty_list_is_minus_one() {
        let mut writer = BinaryWriter::new();
        writer.write_i32_list(&[]);
        assert_eq!(writer.as_bytes(), &(-1i32).to_le_bytes());
    }

    #[test]
    fn test_long_text_prefix() {
        let text = "x".repeat(300);
        let mut writer = BinaryWriter::new();
        writer.write_text(&text);

        let bytes = writer.into_bytes();
        assert_eq!(&bytes[..2], &[0xAC, 0x02]);

        let mut reader = BinaryReader::new(&bytes);
        assert_eq!(reader.read_text().unwrap(), text);
    }
}
