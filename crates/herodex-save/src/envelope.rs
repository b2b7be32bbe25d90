//! The text envelope around a save payload.
//!
//! A save string looks like
//! `<magic>;<inflated>;<compressed>;<unused>;<encoding>;<hex body>`, where
//! the hex body decodes to a deflate stream holding the binary payload.
//! Whitespace and `|` characters may appear anywhere and are ignored.

use std::io::{Read, Write};

use flate2::read::{DeflateDecoder, ZlibDecoder};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use tracing::{debug, warn};

use crate::error::{Error, Result, Stage};

const FIELD_COUNT: usize = 6;

/// A save string split into its header fields and inflated payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveEnvelope {
    pub magic: String,
    pub inflated_size: Option<usize>,
    pub compressed_size: Option<usize>,
    pub unused_size: Option<usize>,
    pub encoding: String,
    /// The decompressed binary payload.
    pub payload: Vec<u8>,
}

impl SaveEnvelope {
    /// Normalize, split, hex-decode and inflate a save string.
    pub fn parse(save: &str) -> Result<Self> {
        let normalized: String = save
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '|')
            .collect();

        let fields: Vec<&str> = normalized.split(';').collect();
        if fields.len() != FIELD_COUNT {
            return Err(Error::format(
                Stage::Split,
                format!("expected {} fields, found {}", FIELD_COUNT, fields.len()),
            ));
        }
        let [magic, inflated, compressed, unused, encoding, body] = [
            fields[0], fields[1], fields[2], fields[3], fields[4], fields[5],
        ];

        let compressed_bytes = decode_hex(body)?;
        let payload = inflate(&compressed_bytes)?;

        let inflated_size = inflated.parse().ok();
        if let Some(expected) = inflated_size {
            if expected != payload.len() {
                warn!(
                    expected,
                    actual = payload.len(),
                    "inflated size does not match save header"
                );
            }
        }
        debug!(
            magic,
            encoding,
            compressed = compressed_bytes.len(),
            inflated = payload.len(),
            "decoded save envelope"
        );

        Ok(Self {
            magic: magic.to_string(),
            inflated_size,
            compressed_size: compressed.parse().ok(),
            unused_size: unused.parse().ok(),
            encoding: encoding.to_string(),
            payload,
        })
    }

    /// Build a save string around a binary payload.
    ///
    /// The payload is zlib-compressed and hex-encoded in upper case.
    pub fn encode(magic: &str, encoding: &str, payload: &[u8]) -> Result<String> {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(payload)?;
        let compressed = encoder.finish()?;

        let mut hex = String::with_capacity(compressed.len() * 2);
        for byte in &compressed {
            hex.push(HEX_DIGITS[usize::from(byte >> 4)] as char);
            hex.push(HEX_DIGITS[usize::from(byte & 0x0F)] as char);
        }

        Ok(format!(
            "{};{};{};{};{};{}",
            magic,
            payload.len(),
            compressed.len(),
            hex.len(),
            encoding,
            hex
        ))
    }
}

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

fn decode_hex(body: &str) -> Result<Vec<u8>> {
    if body.len() % 2 != 0 {
        return Err(Error::format(
            Stage::HexDecode,
            format!("odd number of hex characters ({})", body.len()),
        ));
    }

    body.as_bytes()
        .chunks_exact(2)
        .enumerate()
        .map(|(index, pair)| {
            nibble(pair[0])
                .zip(nibble(pair[1]))
                .map(|(high, low)| high << 4 | low)
                .ok_or_else(|| {
                    Error::format(
                        Stage::HexDecode,
                        format!("invalid hex digits at offset {}", index * 2),
                    )
                })
        })
        .collect()
}

fn nibble(digit: u8) -> Option<u8> {
    char::from(digit).to_digit(16).map(|value| value as u8)
}

/// Inflate a zlib stream, falling back to raw deflate.
fn inflate(compressed: &[u8]) -> Result<Vec<u8>> {
    let mut payload = Vec::new();
    let zlib_err = match ZlibDecoder::new(compressed).read_to_end(&mut payload) {
        Ok(_) => return Ok(payload),
        Err(e) => e,
    };

    payload.clear();
    DeflateDecoder::new(compressed)
        .read_to_end(&mut payload)
        .map_err(|deflate_err| {
            Error::format(
                Stage::Decompress,
                format!(
                    "corrupt deflate stream (zlib error: {}; deflate error: {})",
                    zlib_err, deflate_err
                ),
            )
        })?;
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_then_parse() {
        let payload = b"MxDz\x00\x00\x00\x40 some payload bytes".to_vec();
        let save = SaveEnvelope::encode("MxDz", "HEX", &payload).unwrap();
        let envelope = SaveEnvelope::parse(&save).unwrap();

        assert_eq!(envelope.magic, "MxDz");
        assert_eq!(envelope.encoding, "HEX");
        assert_eq!(envelope.inflated_size, Some(payload.len()));
        assert_eq!(envelope.payload, payload);
    }

    #[test]
    fn test_whitespace_and_pipes_ignored() {
        let save = SaveEnvelope::encode("MxDz", "HEX", b"abc").unwrap();
        let (head, body) = save.split_at(save.rfind(';').unwrap() + 1);
        let (left, right) = body.split_at(body.len() / 2 & !1);
        let mangled = format!("|{}\n  {}|\r\n{} |", head, left, right);

        let envelope = SaveEnvelope::parse(&mangled).unwrap();
        assert_eq!(envelope.payload, b"abc");
    }

    #[test]
    fn test_wrong_field_count() {
        for save in ["", "a;b;c;d;e", "a;b;c;d;e;00;extra"] {
            let err = SaveEnvelope::parse(save).unwrap_err();
            assert!(matches!(err, Error::Format { stage: Stage::Split, .. }));
        }
    }

    #[test]
    fn test_odd_hex_length() {
        let err = SaveEnvelope::parse("MxDz;1;1;1;HEX;ABC").unwrap_err();
        assert!(matches!(err, Error::Format { stage: Stage::HexDecode, .. }));
    }

    #[test]
    fn test_invalid_hex_digit() {
        let err = SaveEnvelope::parse("MxDz;1;1;1;HEX;ABZZ").unwrap_err();
        assert!(matches!(err, Error::Format { stage: Stage::HexDecode, .. }));
    }

    #[test]
    fn test_corrupt_stream() {
        let err = SaveEnvelope::parse("MxDz;1;1;1;HEX;FFFFFFFF").unwrap_err();
        assert!(matches!(err, Error::Format { stage: Stage::Decompress, .. }));
    }

    #[test]
    fn test_raw_deflate_fallback() {
        use flate2::write::DeflateEncoder;

        let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"raw deflate payload").unwrap();
        let compressed = encoder.finish().unwrap();
        let hex: String = compressed.iter().map(|b| format!("{:02x}", b)).collect();

        let save = format!("MxDz;19;{};0;HEX;{}", compressed.len(), hex);
        let envelope = SaveEnvelope::parse(&save).unwrap();
        assert_eq!(envelope.payload, b"raw deflate payload");
        assert_eq!(envelope.unused_size, Some(0));
    }

    #[test]
    fn test_lenient_size_fields() {
        let save = SaveEnvelope::encode("MxDz", "HEX", b"xyz").unwrap();
        let mut fields: Vec<&str> = save.split(';').collect();
        fields[1] = "n/a";
        let envelope = SaveEnvelope::parse(&fields.join(";")).unwrap();
        assert_eq!(envelope.inflated_size, None);
        assert_eq!(envelope.payload, b"xyz");
    }
}
