//! Hex transcoding for encoded records.
//!
//! Output is uppercase, two characters per byte. Input is case-insensitive;
//! ASCII whitespace anywhere in the input is ignored, so line-wrapped dumps
//! decode as one stream.

use crate::{Error, Result};

const HEX_UPPER: &[u8; 16] = b"0123456789ABCDEF";

/// Encodes bytes as an uppercase hex string.
pub fn encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for &b in bytes {
        out.push(HEX_UPPER[usize::from(b >> 4)] as char);
        out.push(HEX_UPPER[usize::from(b & 0x0F)] as char);
    }
    out
}

/// Decodes a hex string into bytes.
pub fn decode(input: &str) -> Result<Vec<u8>> {
    let digits: Vec<u8> = input.bytes().filter(|b| !b.is_ascii_whitespace()).collect();
    if !digits.len().is_multiple_of(2) {
        return Err(Error::InvalidHex(format!("odd number of digits ({})", digits.len())));
    }
    digits
        .chunks_exact(2)
        .enumerate()
        .map(|(i, pair)| {
            let hi = nibble(pair[0]);
            let lo = nibble(pair[1]);
            match (hi, lo) {
                (Some(hi), Some(lo)) => Ok((hi << 4) | lo),
                _ => Err(Error::InvalidHex(format!(
                    "invalid digit pair '{}' at offset {}",
                    String::from_utf8_lossy(pair),
                    i * 2
                ))),
            }
        })
        .collect()
}

fn nibble(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_uppercase() {
        assert_eq!(encode(&[0x00, 0xAC, 0x02, 0xFF]), "00AC02FF");
        assert_eq!(encode(&[]), "");
    }

    #[test]
    fn decode_mixed_case() {
        assert_eq!(decode("00ac02Ff").unwrap(), vec![0x00, 0xAC, 0x02, 0xFF]);
    }

    #[test]
    fn decode_trims_whitespace() {
        assert_eq!(decode("  0A04\n").unwrap(), vec![0x0A, 0x04]);
    }

    #[test]
    fn decode_skips_interior_whitespace() {
        assert_eq!(decode("0A04\n576A").unwrap(), vec![0x0A, 0x04, 0x57, 0x6A]);
        assert_eq!(decode("0A 04\r\n\t57 6A\n").unwrap(), vec![0x0A, 0x04, 0x57, 0x6A]);
        // Auch zwischen den Ziffern eines Bytes.
        assert_eq!(decode("0 A").unwrap(), vec![0x0A]);
    }

    #[test]
    fn decode_empty() {
        assert_eq!(decode("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn decode_rejects_odd_length() {
        let err = decode("ABC").unwrap_err();
        assert!(matches!(err, Error::InvalidHex(ref m) if m.contains("odd")), "{err}");
    }

    #[test]
    fn decode_rejects_non_hex() {
        let err = decode("00G1").unwrap_err();
        assert!(matches!(err, Error::InvalidHex(ref m) if m.contains("offset 2")), "{err}");
    }

    #[test]
    fn decode_rejects_multibyte_chars() {
        assert!(decode("ü0").is_err());
    }
}
