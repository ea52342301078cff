//! Header byte packing.
//!
//! Every record entry starts with one header byte:
//!
//! ```text
//!   7   6   5   4   3   2   1   0
//! +---+---+---+---+---+---+---+---+
//! |       index (5 bit)   | type  |
//! +---+---+---+---+---+---+---+---+
//! ```
//!
//! # Beispiel
//!
//! ```
//! use tstag::header::{pack, unpack};
//! use tstag::TagType;
//!
//! let byte = pack(TagType::Text, 1).unwrap();
//! assert_eq!(byte, 0x0A);
//! assert_eq!(unpack(byte), (TagType::Text, 1));
//! ```

use crate::tag::{TagIndex, TagType};
use crate::{Error, Result};

/// Number of bits holding the type code.
pub const TYPE_BITS: u32 = 3;

/// Mask selecting the type code from a header byte.
pub const TYPE_MASK: u8 = 0x07;

/// Largest index that fits into the 5 index bits.
pub const MAX_INDEX: TagIndex = 31;

/// Packs a (type, index) pair into a header byte.
///
/// Fails with [`Error::IndexOutOfRange`] if `index > 31`; the index is never
/// truncated into the type bits.
pub fn pack(tag_type: TagType, index: TagIndex) -> Result<u8> {
    check_index(index)?;
    Ok(((index as u8) << TYPE_BITS) | (tag_type.code() & TYPE_MASK))
}

/// Splits a header byte into its type and index.
#[inline]
pub fn unpack(byte: u8) -> (TagType, TagIndex) {
    (TagType::from_code(byte & TYPE_MASK), TagIndex::from(byte >> TYPE_BITS))
}

/// Checks that `index` is encodable.
#[inline]
pub fn check_index(index: TagIndex) -> Result<()> {
    if index > MAX_INDEX {
        return Err(Error::IndexOutOfRange(index));
    }
    Ok(())
}
