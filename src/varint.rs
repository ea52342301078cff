//! Variable-length 7-bit unsigned integer encoding.
//!
//! Each octet has a continuation bit (MSB) and 7 data bits. The least
//! significant group is written first. The last octet has continuation = 0.
//!
//! Signed values are stored as their two's complement bit pattern, without a
//! zigzag transform, so every negative `i64` takes the full 10 bytes.

use log::warn;

use crate::bytestream::{ByteReader, ByteWriter};
use crate::{Error, Result};

/// Maximum encoded length of a `u64` (ceil(64 / 7)).
pub const MAX_LEN: usize = 10;

/// Encodes a `u64` and returns the number of bytes written.
#[inline]
pub fn encode(writer: &mut ByteWriter, value: u64) -> usize {
    if value < 128 {
        // Fast-Path: Single-Byte (haeufigster Fall, kleine Laengen und Indizes)
        writer.write_byte(value as u8);
        return 1;
    }
    let mut v = value;
    let mut written = 0;
    loop {
        let low7 = (v & 0x7F) as u8;
        v >>= 7;
        written += 1;
        if v == 0 {
            writer.write_byte(low7);
            return written;
        }
        writer.write_byte(0x80 | low7);
    }
}

/// Encodes an `i64` by reinterpreting its bits as `u64`.
#[inline]
pub fn encode_signed(writer: &mut ByteWriter, value: i64) -> usize {
    encode(writer, value as u64)
}

/// Number of bytes [`encode`] would write for `value`.
pub fn encoded_len(value: u64) -> usize {
    if value == 0 {
        1
    } else {
        (64 - value.leading_zeros() as usize).div_ceil(7)
    }
}

/// Decodes a varint leniently: bits beyond 64 are dropped and logged.
#[inline]
pub fn decode(reader: &mut ByteReader) -> Result<u64> {
    decode_with(reader, false)
}

/// Decodes a varint.
///
/// With `strict = false` a varint longer than 64 bits is truncated: the
/// continuation bytes are still consumed so the stream stays in sync, but
/// their data bits are discarded and a warning is logged. With
/// `strict = true` the same input fails with [`Error::IntegerOverflow`].
pub fn decode_with(reader: &mut ByteReader, strict: bool) -> Result<u64> {
    let byte = reader.read_byte()?;
    if byte & 0x80 == 0 {
        return Ok(u64::from(byte));
    }
    // Multi-Byte: erstes Byte bereits gelesen
    let mut result = u64::from(byte & 0x7F);
    let mut shift: u32 = 7;
    let mut truncated = false;
    loop {
        let byte = reader.read_byte()?;
        let data = u64::from(byte & 0x7F);
        if shift >= 64 {
            truncated |= data != 0;
        } else {
            // Bei shift 63 (10. Byte) passt nur Daten-Bit 0 in ein u64.
            if shift == 63 && data > 1 {
                truncated = true;
            }
            result |= data << shift;
        }
        if byte & 0x80 == 0 {
            break;
        }
        shift = shift.saturating_add(7);
        if shift >= 64 && strict {
            return Err(Error::IntegerOverflow);
        }
    }
    if truncated {
        if strict {
            return Err(Error::IntegerOverflow);
        }
        warn!(
            "varint overflow at byte {}: bits beyond 64 dropped, value truncated to {result}",
            reader.position()
        );
    }
    Ok(result)
}

/// Decodes a varint and reinterprets the 64 bits as `i64`.
#[inline]
pub fn decode_signed(reader: &mut ByteReader, strict: bool) -> Result<i64> {
    decode_with(reader, strict).map(|v| v as i64)
}
