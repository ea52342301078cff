//! Decoder configuration.
//!
//! The wire format itself has no options; these only control how forgiving
//! the decoder is. The defaults reproduce the reference behaviour: oversized
//! varints are truncated (and logged), text length is unbounded apart from
//! the input size.

/// Options that control record decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CodecOptions {
    /// Varint mit mehr als 64 Bit ist ein harter Fehler statt Truncation.
    strict: bool,
    /// Obergrenze fuer deklarierte Text-Laengen (None = nur durch Input begrenzt).
    max_text_length: Option<u32>,
}

impl CodecOptions {
    // --- Getter ---

    /// Oversized varints fail with [`crate::Error::IntegerOverflow`].
    pub fn strict(&self) -> bool { self.strict }
    /// Maximum accepted declared text length in bytes.
    pub fn max_text_length(&self) -> Option<u32> { self.max_text_length }

    // --- Builder ---

    /// Enables strict varint decoding.
    pub fn with_strict(mut self) -> Self { self.strict = true; self }
    /// Limits the declared length of text payloads.
    pub fn with_max_text_length(mut self, len: u32) -> Self { self.max_text_length = Some(len); self }

    // --- Setter ---

    /// Sets strict varint decoding.
    pub fn set_strict(&mut self, val: bool) { self.strict = val; }
    /// Sets or clears the text length limit.
    pub fn set_max_text_length(&mut self, len: Option<u32>) { self.max_text_length = len; }
}
