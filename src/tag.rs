//! Tag value model.
//!
//! The type space is fixed at eight 3-bit codes. Only two of them have a
//! payload format: [`TagType::VarInt`] (one varint holding an `i64` bit
//! pattern) and [`TagType::Text`] (varint byte length + raw bytes). The other
//! six codes are reserved. A decoder cannot know how many bytes such an entry
//! occupies, so they exist only as [`TagType`] values and never as a
//! [`TagValue`].

use core::fmt;

use crate::bytestream::{ByteReader, ByteWriter};
use crate::options::CodecOptions;
use crate::{Error, Result, varint};

/// Field slot within a record. Encodable range is `0..=31`.
pub type TagIndex = u32;

/// 3-bit type code of a header byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum TagType {
    VarInt = 0,
    Unknown1 = 1,
    Text = 2,
    Unknown3 = 3,
    Unknown4 = 4,
    Unknown5 = 5,
    Unknown6 = 6,
    Unknown7 = 7,
}

impl TagType {
    /// Maps the low 3 bits of `code` to a type. Higher bits are ignored.
    pub fn from_code(code: u8) -> Self {
        match code & 0x07 {
            0 => Self::VarInt,
            1 => Self::Unknown1,
            2 => Self::Text,
            3 => Self::Unknown3,
            4 => Self::Unknown4,
            5 => Self::Unknown5,
            6 => Self::Unknown6,
            _ => Self::Unknown7,
        }
    }

    /// Numeric type code (0..=7).
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// `true` for the types with a defined payload format.
    pub fn has_payload_format(self) -> bool {
        matches!(self, Self::VarInt | Self::Text)
    }
}

impl fmt::Display for TagType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VarInt => write!(f, "VarInt"),
            Self::Text => write!(f, "Text"),
            other => write!(f, "Unknown{}", other.code()),
        }
    }
}

/// A typed tag value with its owned payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TagValue {
    /// Signed 64-bit integer, stored as varint of its bit pattern.
    Integer(i64),
    /// Raw byte string. Not required to be UTF-8.
    Text(Vec<u8>),
}

impl TagValue {
    /// Creates a text value from anything byte-like.
    pub fn text(value: impl Into<Vec<u8>>) -> Self {
        Self::Text(value.into())
    }

    /// Type code written into the header byte.
    pub fn tag_type(&self) -> TagType {
        match self {
            Self::Integer(_) => TagType::VarInt,
            Self::Text(_) => TagType::Text,
        }
    }

    /// Returns the integer, if this is an integer value.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(v) => Some(*v),
            Self::Text(_) => None,
        }
    }

    /// Returns the raw text bytes, if this is a text value.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Text(bytes) => Some(bytes),
            Self::Integer(_) => None,
        }
    }

    /// Returns the text as `&str` if it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        self.as_bytes().and_then(|b| std::str::from_utf8(b).ok())
    }

    /// Writes the payload (without header) and returns the bytes written.
    pub fn write(&self, writer: &mut ByteWriter) -> usize {
        match self {
            Self::Integer(v) => varint::encode_signed(writer, *v),
            Self::Text(bytes) => {
                let len = varint::encode(writer, bytes.len() as u64);
                writer.write_bytes(bytes);
                len + bytes.len()
            }
        }
    }

    /// Payload length in bytes, without header.
    pub fn encoded_len(&self) -> usize {
        match self {
            Self::Integer(v) => varint::encoded_len(*v as u64),
            Self::Text(bytes) => varint::encoded_len(bytes.len() as u64) + bytes.len(),
        }
    }

    /// Reads the payload of an entry of type `tag_type`.
    ///
    /// Reserved types fail with [`Error::UnknownTypeCode`]. A text whose
    /// declared length exceeds the remaining input fails with
    /// [`Error::PrematureEndOfStream`] before anything is allocated.
    pub fn read(tag_type: TagType, reader: &mut ByteReader, options: &CodecOptions) -> Result<Self> {
        if !tag_type.has_payload_format() {
            return Err(Error::UnknownTypeCode(tag_type.code()));
        }
        match tag_type {
            TagType::VarInt => varint::decode_signed(reader, options.strict()).map(Self::Integer),
            _ => read_text(reader, options),
        }
    }
}

fn read_text(reader: &mut ByteReader, options: &CodecOptions) -> Result<TagValue> {
    let length = varint::decode_with(reader, options.strict())?;
    if let Some(max) = options.max_text_length() {
        if length > u64::from(max) {
            return Err(Error::TextLengthExceeded { length, max });
        }
    }
    if length > reader.remaining() as u64 {
        log::debug!(
            "text underflow at byte {}: declared {length}, remaining {}",
            reader.position(),
            reader.remaining()
        );
        return Err(Error::PrematureEndOfStream);
    }
    let bytes = reader.read_bytes(length as usize)?;
    Ok(TagValue::Text(bytes.to_vec()))
}

impl From<i64> for TagValue {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<&str> for TagValue {
    fn from(v: &str) -> Self {
        Self::Text(v.as_bytes().to_vec())
    }
}

impl From<String> for TagValue {
    fn from(v: String) -> Self {
        Self::Text(v.into_bytes())
    }
}

impl From<Vec<u8>> for TagValue {
    fn from(v: Vec<u8>) -> Self {
        Self::Text(v)
    }
}
