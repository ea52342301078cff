//! Record container codec.
//!
//! A record is an ordered map from [`TagIndex`] to [`TagValue`]. The encoded
//! form is the concatenation of `header byte + payload` for every entry in
//! ascending index order, with no framing around it: the record simply ends
//! where the input ends.
//!
//! # Beispiel
//!
//! ```
//! use tstag::{Record, TagValue, decode, encode};
//!
//! let mut record = Record::new();
//! record.insert(0, TagValue::Integer(300));
//! record.insert(1, TagValue::from("ab"));
//!
//! let bytes = encode(&record).unwrap();
//! assert_eq!(bytes, [0x00, 0xAC, 0x02, 0x0A, 0x02, 0x61, 0x62]);
//! assert_eq!(decode(&bytes).unwrap(), record);
//! ```

use std::collections::BTreeMap;
use std::collections::btree_map;

use log::{debug, trace};

use crate::bytestream::{ByteReader, ByteWriter};
use crate::header;
use crate::options::CodecOptions;
use crate::tag::{TagIndex, TagValue};
use crate::Result;

/// Ordered mapping from tag index to tag value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    entries: BTreeMap<TagIndex, TagValue>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, returning the one it replaced.
    ///
    /// Any index is accepted here; [`encode`] rejects indices above 31.
    pub fn insert(&mut self, index: TagIndex, value: impl Into<TagValue>) -> Option<TagValue> {
        self.entries.insert(index, value.into())
    }

    pub fn get(&self, index: TagIndex) -> Option<&TagValue> {
        self.entries.get(&index)
    }

    pub fn remove(&mut self, index: TagIndex) -> Option<TagValue> {
        self.entries.remove(&index)
    }

    pub fn contains(&self, index: TagIndex) -> bool {
        self.entries.contains_key(&index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in ascending index order (the wire order).
    pub fn iter(&self) -> btree_map::Iter<'_, TagIndex, TagValue> {
        self.entries.iter()
    }

    /// Highest index present, if any.
    pub fn max_index(&self) -> Option<TagIndex> {
        self.entries.last_key_value().map(|(&k, _)| k)
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = (&'a TagIndex, &'a TagValue);
    type IntoIter = btree_map::Iter<'a, TagIndex, TagValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for Record {
    type Item = (TagIndex, TagValue);
    type IntoIter = btree_map::IntoIter<TagIndex, TagValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<V: Into<TagValue>> FromIterator<(TagIndex, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (TagIndex, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (index, value) in iter {
            record.insert(index, value);
        }
        record
    }
}

impl<V: Into<TagValue>> Extend<(TagIndex, V)> for Record {
    fn extend<I: IntoIterator<Item = (TagIndex, V)>>(&mut self, iter: I) {
        for (index, value) in iter {
            self.insert(index, value);
        }
    }
}

// ============================================================================
// Decode
// ============================================================================

/// Lazy iterator over the raw entries of an encoded record.
///
/// Yields entries in stream order, including repeated indices. After the
/// first error the iterator is exhausted.
pub struct Entries<'a> {
    reader: ByteReader<'a>,
    options: CodecOptions,
    failed: bool,
}

impl<'a> Entries<'a> {
    /// Creates an iterator with default options.
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_options(data, CodecOptions::default())
    }

    pub fn with_options(data: &'a [u8], options: CodecOptions) -> Self {
        Self {
            reader: ByteReader::new(data),
            options,
            failed: false,
        }
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.reader.position()
    }

    fn read_entry(&mut self, head: u8) -> Result<(TagIndex, TagValue)> {
        let (tag_type, index) = header::unpack(head);
        trace!("entry header 0x{head:02X}: type {tag_type}, index {index}");
        let value = TagValue::read(tag_type, &mut self.reader, &self.options)?;
        Ok((index, value))
    }
}

impl Iterator for Entries<'_> {
    type Item = Result<(TagIndex, TagValue)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        // Kein Header-Byte mehr: regulaeres Ende, kein Fehler.
        let head = self.reader.next_byte()?;
        let start = self.reader.position() - 1;
        let entry = self.read_entry(head);
        if let Err(ref e) = entry {
            debug!("record decode aborted at byte {start}: {e}");
            self.failed = true;
        }
        Some(entry)
    }
}

impl std::iter::FusedIterator for Entries<'_> {}

/// Decodes a complete record with default options.
///
/// All-or-nothing: any malformed entry fails the whole record. Empty input
/// decodes to an empty record.
pub fn decode(data: &[u8]) -> Result<Record> {
    decode_with_options(data, CodecOptions::default())
}

/// Decodes a complete record. Later entries overwrite earlier ones with the
/// same index.
pub fn decode_with_options(data: &[u8], options: CodecOptions) -> Result<Record> {
    let mut record = Record::new();
    for entry in Entries::with_options(data, options) {
        let (index, value) = entry?;
        if let Some(old) = record.entries.insert(index, value) {
            debug!("index {index} repeated, replacing {} value", old.tag_type());
        }
    }
    Ok(record)
}

// ============================================================================
// Encode
// ============================================================================

/// Encodes a record into a new buffer.
pub fn encode(record: &Record) -> Result<Vec<u8>> {
    let mut writer = ByteWriter::with_capacity(encoded_len(record));
    encode_into(record, &mut writer)?;
    Ok(writer.into_vec())
}

/// Appends the encoded record to `writer` and returns the bytes written.
///
/// Every index is validated before the first byte is written, so on error
/// `writer` is left untouched.
pub fn encode_into(record: &Record, writer: &mut ByteWriter) -> Result<usize> {
    // BTreeMap ist aufsteigend sortiert: der groesste Key reicht zur Pruefung.
    if let Some(max) = record.max_index() {
        header::check_index(max)?;
    }
    let start = writer.len();
    for (&index, value) in record {
        writer.write_byte(header::pack(value.tag_type(), index)?);
        value.write(writer);
    }
    Ok(writer.len() - start)
}

/// Exact size of the encoded record in bytes.
pub fn encoded_len(record: &Record) -> usize {
    record.iter().map(|(_, v)| 1 + v.encoded_len()).sum()
}
