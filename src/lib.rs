//! tstag – codec for the compact TSTag binary record format
//!
//! A record is a sequence of `(index, typed value)` entries. Each entry is a
//! header byte (5 bit index, 3 bit type code) followed by its payload: a
//! varint for integers, a varint length plus raw bytes for text.
//!
//! # Beispiel
//!
//! ```
//! use tstag::{Record, TagValue};
//!
//! let mut record = Record::new();
//! record.insert(0, TagValue::Integer(300));
//! record.insert(1, "ab");
//!
//! let bytes = tstag::encode(&record).unwrap();
//! assert_eq!(tstag::hex::encode(&bytes), "00AC020A026162");
//!
//! let decoded = tstag::decode(&bytes).unwrap();
//! assert_eq!(decoded, record);
//! ```

pub mod bytestream;
pub mod error;
pub mod header;
pub mod hex;
pub mod json;
pub mod options;
pub mod record;
pub mod tag;
pub mod varint;

pub use error::{Error, Result};

// Public API: Datenmodell
pub use record::Record;
pub use tag::{TagIndex, TagType, TagValue};

// Public API: Codec
pub use options::CodecOptions;
pub use record::{Entries, decode, decode_with_options, encode, encode_into, encoded_len};
