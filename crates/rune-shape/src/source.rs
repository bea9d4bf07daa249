//! Input text view.
//!
//! A [`TextSource`] holds the caller's text in one of three code-unit
//! encodings, borrowed where possible. All offsets and lengths handed out
//! by the pipeline are in code units of that text, never in bytes of an
//! intermediate copy.

use std::borrow::Cow;
use core::ops::Range;

use crate::error::{LayoutError, Result};

/// Code-unit encoding of a [`TextSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    Utf8,
    Utf16,
    Utf32,
}

impl Encoding {
    /// Width of one code unit in bytes.
    pub fn unit_width(self) -> usize {
        match self {
            Encoding::Utf8 => 1,
            Encoding::Utf16 => 2,
            Encoding::Utf32 => 4,
        }
    }

    /// Numeric tag of this encoding (0 = UTF-8, 1 = UTF-16, 2 = UTF-32).
    pub fn tag(self) -> u32 {
        match self {
            Encoding::Utf8 => 0,
            Encoding::Utf16 => 1,
            Encoding::Utf32 => 2,
        }
    }
}

impl TryFrom<u32> for Encoding {
    type Error = LayoutError;

    fn try_from(tag: u32) -> Result<Self> {
        match tag {
            0 => Ok(Encoding::Utf8),
            1 => Ok(Encoding::Utf16),
            2 => Ok(Encoding::Utf32),
            other => Err(LayoutError::InvalidEncoding(other)),
        }
    }
}

/// Offsets are `u32`, so a source may hold at most `u32::MAX` code units.
pub(crate) fn unit_count(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| LayoutError::TextTooLong { len })
}

/// Immutable view over the text to lay out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextSource<'a> {
    Utf8(Cow<'a, [u8]>),
    Utf16(Cow<'a, [u16]>),
    Utf32(Cow<'a, [u32]>),
}

impl<'a> TextSource<'a> {
    /// View a UTF-8 string.
    pub fn utf8(text: &'a str) -> Self {
        TextSource::Utf8(Cow::Borrowed(text.as_bytes()))
    }

    /// View UTF-16 code units.
    pub fn utf16(units: &'a [u16]) -> Self {
        TextSource::Utf16(Cow::Borrowed(units))
    }

    /// View UTF-32 code units.
    pub fn utf32(units: &'a [u32]) -> Self {
        TextSource::Utf32(Cow::Borrowed(units))
    }

    /// View a raw native-endian byte buffer as code units of the encoding
    /// named by `tag`.
    ///
    /// The length must be a whole number of code units. Buffers that are
    /// not aligned for the unit type are copied instead of borrowed.
    pub fn from_ne_bytes(tag: u32, bytes: &'a [u8]) -> Result<Self> {
        let encoding = Encoding::try_from(tag)?;
        if bytes.len() % encoding.unit_width() != 0 {
            return Err(LayoutError::TruncatedBuffer {
                encoding,
                len: bytes.len(),
            });
        }
        unit_count(bytes.len() / encoding.unit_width())?;
        Ok(match encoding {
            Encoding::Utf8 => TextSource::Utf8(Cow::Borrowed(bytes)),
            Encoding::Utf16 => TextSource::Utf16(cast_units(bytes)),
            Encoding::Utf32 => TextSource::Utf32(cast_units(bytes)),
        })
    }

    pub fn encoding(&self) -> Encoding {
        match self {
            TextSource::Utf8(_) => Encoding::Utf8,
            TextSource::Utf16(_) => Encoding::Utf16,
            TextSource::Utf32(_) => Encoding::Utf32,
        }
    }

    /// Length in code units.
    pub fn len(&self) -> usize {
        match self {
            TextSource::Utf8(units) => units.len(),
            TextSource::Utf16(units) => units.len(),
            TextSource::Utf32(units) => units.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when the code units point into the caller's buffer.
    pub fn is_borrowed(&self) -> bool {
        match self {
            TextSource::Utf8(units) => matches!(units, Cow::Borrowed(_)),
            TextSource::Utf16(units) => matches!(units, Cow::Borrowed(_)),
            TextSource::Utf32(units) => matches!(units, Cow::Borrowed(_)),
        }
    }

    /// Decode into scalar values, keeping a map back to code-unit offsets.
    ///
    /// Ill-formed sequences become U+FFFD spanning the offending units.
    pub(crate) fn decode(&self) -> Result<DecodedText> {
        let len = unit_count(self.len())?;
        let mut decoded = DecodedText::with_capacity(self.len());
        match self {
            TextSource::Utf8(bytes) => {
                let mut unit = 0u32;
                for chunk in bytes.utf8_chunks() {
                    for ch in chunk.valid().chars() {
                        decoded.push(ch, unit);
                        unit += ch.len_utf8() as u32;
                    }
                    if !chunk.invalid().is_empty() {
                        decoded.push(char::REPLACEMENT_CHARACTER, unit);
                        unit += chunk.invalid().len() as u32;
                    }
                }
            }
            TextSource::Utf16(units) => {
                let mut unit = 0u32;
                for result in char::decode_utf16(units.iter().copied()) {
                    match result {
                        Ok(ch) => {
                            decoded.push(ch, unit);
                            unit += ch.len_utf16() as u32;
                        }
                        Err(_) => {
                            decoded.push(char::REPLACEMENT_CHARACTER, unit);
                            unit += 1;
                        }
                    }
                }
            }
            TextSource::Utf32(units) => {
                for (unit, &value) in (0u32..).zip(units.iter()) {
                    let ch = char::from_u32(value).unwrap_or(char::REPLACEMENT_CHARACTER);
                    decoded.push(ch, unit);
                }
            }
        }
        decoded.finish(len);
        Ok(decoded)
    }
}

/// Borrow `bytes` as code units when aligned, copy them otherwise.
fn cast_units<T: bytemuck::Pod>(bytes: &[u8]) -> Cow<'_, [T]> {
    match bytemuck::try_cast_slice(bytes) {
        Ok(units) => Cow::Borrowed(units),
        Err(_) => Cow::Owned(bytemuck::pod_collect_to_vec(bytes)),
    }
}

/// UTF-8 copy of a [`TextSource`] used by the bidi, script and shaping
/// stages, with a byte → source code-unit offset map.
#[derive(Debug, Clone, Default)]
pub(crate) struct DecodedText {
    text: String,
    /// `units[b]` is the source offset of the scalar owning byte `b`;
    /// one extra trailing entry holds the source length.
    units: Vec<u32>,
}

impl DecodedText {
    fn with_capacity(units: usize) -> Self {
        Self {
            text: String::with_capacity(units),
            units: Vec::with_capacity(units + 1),
        }
    }

    fn push(&mut self, ch: char, unit: u32) {
        self.text.push(ch);
        self.units.extend(core::iter::repeat_n(unit, ch.len_utf8()));
    }

    fn finish(&mut self, source_len: u32) {
        self.units.push(source_len);
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.text
    }

    /// Source code-unit offset at a UTF-8 byte boundary.
    pub(crate) fn unit_at(&self, byte: usize) -> u32 {
        self.units[byte]
    }

    /// Convert a byte range into a source `(offset, length)` pair.
    pub(crate) fn unit_span(&self, bytes: &Range<usize>) -> (u32, u32) {
        let start = self.unit_at(bytes.start);
        let end = self.unit_at(bytes.end);
        (start, end - start)
    }
}
