//! Text values paired with their on-wire layout.

use crate::core::serializable::{Encodable, WireValue};
use crate::core::stream::{LengthType, ReadStream, WriteStream};
use crate::core::text::{decode_latin1, encode_latin1};
use crate::error::{constants, ProtocolError, Result};

/// How a string is framed on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringLayout {
    /// No framing; only valid for writing
    Raw,
    /// Exactly this many bytes, zero padded or truncated
    Fixed(usize),
    /// Explicit length of the given width, then the bytes
    Prefixed(LengthType),
}

/// A single-byte string and its layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CString {
    pub text: String,
    pub layout: StringLayout,
}

impl CString {
    pub fn new(text: impl Into<String>, layout: StringLayout) -> Self {
        Self {
            text: text.into(),
            layout,
        }
    }

    /// Text padded or truncated to `allocated_length` bytes
    pub fn fixed(text: impl Into<String>, allocated_length: usize) -> Self {
        Self::new(text, StringLayout::Fixed(allocated_length))
    }

    /// Text preceded by a length of width `length_type`
    pub fn prefixed(text: impl Into<String>, length_type: LengthType) -> Self {
        Self::new(text, StringLayout::Prefixed(length_type))
    }

    /// Read a string framed by `layout`
    pub fn read(stream: &mut ReadStream, layout: StringLayout) -> Result<Self> {
        let raw = match layout {
            StringLayout::Fixed(allocated_length) => stream.read_fixed(allocated_length)?,
            StringLayout::Prefixed(length_type) => stream.read_prefixed(length_type)?,
            StringLayout::Raw => {
                return Err(ProtocolError::InvalidLength(
                    constants::ERR_UNBOUNDED_STRING.to_string(),
                ))
            }
        };
        Ok(Self::new(decode_latin1(&raw), layout))
    }

    /// Read just the text of a string framed by `layout`
    pub fn read_text(stream: &mut ReadStream, layout: StringLayout) -> Result<String> {
        Self::read(stream, layout).map(|s| s.text)
    }
}

impl Encodable for CString {
    fn encode(&self, stream: &mut WriteStream) -> Result<()> {
        let bytes = encode_latin1(&self.text)?;
        match self.layout {
            StringLayout::Raw => stream.write_bytes(&bytes),
            StringLayout::Fixed(allocated_length) => stream.write_fixed(&bytes, allocated_length),
            StringLayout::Prefixed(length_type) => stream.write_prefixed(&bytes, length_type)?,
        }
        Ok(())
    }
}

impl WireValue for CString {
    fn type_name(&self) -> &'static str {
        "CString"
    }

    fn encode_dyn(&self, stream: &mut WriteStream) -> Result<()> {
        self.encode(stream)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::config::ByteOrder;

    #[test]
    fn test_prefixed_layout_bytes() {
        let mut w = WriteStream::new(ByteOrder::Little);
        w.write(&CString::prefixed("zone", LengthType::U32)).unwrap();
        assert_eq!(w.as_slice(), &[4, 0, 0, 0, b'z', b'o', b'n', b'e']);
    }

    #[test]
    fn test_raw_layout_cannot_be_read() {
        let mut r = ReadStream::new(vec![b'a'], ByteOrder::Little);
        let err = CString::read(&mut r, StringLayout::Raw).unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidLength(_)));
        assert_eq!(r.position(), 0);
    }

    #[test]
    fn test_fixed_round_trip_keeps_short_text() {
        let original = CString::fixed("Brick", 33);
        let mut w = WriteStream::new(ByteOrder::Little);
        w.write(&original).unwrap();
        assert_eq!(w.len(), 33);

        let mut r = ReadStream::new(w.into_bytes(), ByteOrder::Little);
        let read = CString::read(&mut r, StringLayout::Fixed(33)).unwrap();
        assert_eq!(read, original);
    }

    #[test]
    fn test_unencodable_text_writes_nothing() {
        let mut w = WriteStream::new(ByteOrder::Little);
        let err = w
            .write(&CString::prefixed("\u{4e16}", LengthType::U8))
            .unwrap_err();
        assert!(matches!(err, ProtocolError::Encoding(_)));
        assert!(w.is_empty());
    }
}
