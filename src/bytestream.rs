//! Byte-level stream reader and writer over in-memory buffers.
//!
//! TSTag records are always byte aligned, so unlike a bit packer the reader
//! hands out whole octets. Every read past the end of the data reports
//! [`Error::PrematureEndOfStream`].

use crate::{Error, Result};

/// Appends bytes to a growable buffer.
#[derive(Debug, Default, Clone)]
pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    /// Creates a new empty `ByteWriter`.
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Creates a writer with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Writes a single byte.
    #[inline(always)]
    pub fn write_byte(&mut self, val: u8) {
        self.buf.push(val);
    }

    /// Writes a byte slice.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// `true` if nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Returns a reference to the written bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the writer and returns the written bytes.
    pub fn into_vec(self) -> Vec<u8> {
        self.buf
    }
}

/// Reads bytes from a borrowed slice.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    /// Nächstes ungelesenes Byte in data.
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Creates a reader positioned at the first byte of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Reads one byte.
    #[inline(always)]
    pub fn read_byte(&mut self) -> Result<u8> {
        let byte = *self.data.get(self.pos).ok_or(Error::PrematureEndOfStream)?;
        self.pos += 1;
        Ok(byte)
    }

    /// Reads one byte, or `None` at the end of the data.
    ///
    /// Used at record boundaries where running out of input is the normal
    /// termination condition rather than an underflow.
    #[inline]
    pub fn next_byte(&mut self) -> Option<u8> {
        let byte = *self.data.get(self.pos)?;
        self.pos += 1;
        Some(byte)
    }

    /// Reads exactly `n` bytes and returns them as a borrowed slice.
    ///
    /// The bounds are checked before anything is consumed: on failure the
    /// reader position is unchanged.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        if n > self.remaining() {
            return Err(Error::PrematureEndOfStream);
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Number of bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of bytes still unread.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// `true` if every byte has been consumed.
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.data.len()
    }
}
