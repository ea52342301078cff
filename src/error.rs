//! Central error type for the TSTag codec.
//!
//! Every failure is local to a single decode/encode call. Nothing is retried
//! and nothing is silently turned into a default value, with the one exception
//! of the lenient varint overflow (see [`crate::varint`]), which is logged.

use core::fmt;

/// All errors produced by the codec and its adapters.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The input ended before a varint terminated or before the declared
    /// number of text bytes was available.
    PrematureEndOfStream,
    /// A header byte carries a type code without a defined payload shape.
    UnknownTypeCode(u8),
    /// An index does not fit into the 5 index bits of a header byte.
    IndexOutOfRange(u32),
    /// A varint carries more than 64 significant bits (strict mode only).
    IntegerOverflow,
    /// A declared text length exceeds the configured maximum.
    TextLengthExceeded { length: u64, max: u32 },
    /// The hex adapter received malformed input.
    InvalidHex(String),
    /// The JSON adapter received a malformed document.
    InvalidJson(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PrematureEndOfStream => write!(f, "premature end of stream (underflow)"),
            Self::UnknownTypeCode(code) => write!(f, "unknown tag type code {code}"),
            Self::IndexOutOfRange(index) => {
                write!(f, "tag index {index} out of range (0..={})", crate::header::MAX_INDEX)
            }
            Self::IntegerOverflow => write!(f, "varint exceeds 64 bits"),
            Self::TextLengthExceeded { length, max } => {
                write!(f, "text length {length} exceeds maximum {max}")
            }
            Self::InvalidHex(msg) => write!(f, "invalid hex string: {msg}"),
            Self::InvalidJson(msg) => write!(f, "invalid JSON record: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

/// A convenience `Result` type alias using [`Error`].
pub type Result<T> = core::result::Result<T, Error>;
