//! # Byte Streams
//!
//! Ordered byte cursors with typed, fixed-width reads and writes.
//!
//! A stream is either a [`ReadStream`] or a [`WriteStream`]; the two modes never
//! share a buffer. Both carry the [`StreamConfig`] they were built from, so the
//! byte order is decided once per stream and never per field.
//!
//! ## String Layouts
//! - **Fixed**: exactly `allocated_length` bytes, zero padded or truncated on write,
//!   cut at the first NUL on read
//! - **Prefixed**: an unsigned length of width [`LengthType`] followed by the bytes
//! - **Raw**: bytes with no framing (write only)
//!
//! ## Failure Model
//! Every read checks the remaining buffer first. Asking for more bytes than remain,
//! including through a length prefix, is a hard [`ProtocolError::Truncated`].
//! Streams are single-owner: methods take `&mut self` and neither type is `Clone`.

use crate::config::{ByteOrder, StreamConfig};
use crate::core::serializable::{Decodable, Encodable};
use crate::error::{ProtocolError, Result};
use bytes::{Buf, BufMut, Bytes, BytesMut};

/// Width of an explicit length prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthType {
    U8,
    U16,
    U32,
}

impl LengthType {
    /// Prefix size in bytes
    pub fn width(self) -> usize {
        match self {
            LengthType::U8 => 1,
            LengthType::U16 => 2,
            LengthType::U32 => 4,
        }
    }

    /// Largest length the prefix can carry
    pub fn max_length(self) -> usize {
        match self {
            LengthType::U8 => u8::MAX as usize,
            LengthType::U16 => u16::MAX as usize,
            LengthType::U32 => u32::MAX as usize,
        }
    }
}

macro_rules! read_fixed_width {
    ($(#[$doc:meta])* $name:ident, $ty:ty, $size:expr, $le:ident, $be:ident) => {
        $(#[$doc])*
        pub fn $name(&mut self) -> Result<$ty> {
            self.ensure($size)?;
            Ok(match self.config.byte_order {
                ByteOrder::Little => self.buf.$le(),
                ByteOrder::Big => self.buf.$be(),
            })
        }
    };
}

macro_rules! write_fixed_width {
    ($(#[$doc:meta])* $name:ident, $ty:ty, $le:ident, $be:ident) => {
        $(#[$doc])*
        pub fn $name(&mut self, value: $ty) {
            match self.config.byte_order {
                ByteOrder::Little => self.buf.$le(value),
                ByteOrder::Big => self.buf.$be(value),
            }
        }
    };
}

/// Read cursor over an immutable byte buffer
#[derive(Debug)]
pub struct ReadStream {
    buf: Bytes,
    total: usize,
    config: StreamConfig,
}

impl ReadStream {
    /// Create a read stream with default limits and the given byte order
    pub fn new(data: impl Into<Bytes>, byte_order: ByteOrder) -> Self {
        Self::with_config(data, StreamConfig::with_byte_order(byte_order))
    }

    /// Create a read stream from a full stream configuration
    pub fn with_config(data: impl Into<Bytes>, config: StreamConfig) -> Self {
        let buf = data.into();
        let total = buf.len();
        Self { buf, total, config }
    }

    /// The configuration this stream was built from
    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    /// Bytes consumed so far
    pub fn position(&self) -> usize {
        self.total - self.buf.remaining()
    }

    /// Bytes left to read
    pub fn remaining(&self) -> usize {
        self.buf.remaining()
    }

    /// Whether every byte has been consumed
    pub fn is_empty(&self) -> bool {
        !self.buf.has_remaining()
    }

    fn ensure(&self, needed: usize) -> Result<()> {
        let remaining = self.buf.remaining();
        if needed > remaining {
            return Err(ProtocolError::Truncated { needed, remaining });
        }
        Ok(())
    }

    /// Read a single byte
    pub fn read_u8(&mut self) -> Result<u8> {
        self.ensure(1)?;
        Ok(self.buf.get_u8())
    }

    /// Read a one-byte boolean; any non-zero byte is `true`
    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_u8()? != 0)
    }

    read_fixed_width!(
        /// Read a u16 in the stream's byte order
        read_u16, u16, 2, get_u16_le, get_u16
    );
    read_fixed_width!(
        /// Read a u32 in the stream's byte order
        read_u32, u32, 4, get_u32_le, get_u32
    );
    read_fixed_width!(
        /// Read a u64 in the stream's byte order
        read_u64, u64, 8, get_u64_le, get_u64
    );
    read_fixed_width!(
        /// Read an i32 in the stream's byte order
        read_i32, i32, 4, get_i32_le, get_i32
    );
    read_fixed_width!(
        /// Read an i64 in the stream's byte order
        read_i64, i64, 8, get_i64_le, get_i64
    );
    read_fixed_width!(
        /// Read an f32 in the stream's byte order
        read_f32, f32, 4, get_f32_le, get_f32
    );

    /// Read exactly `length` raw bytes
    pub fn read_bytes(&mut self, length: usize) -> Result<Bytes> {
        self.ensure(length)?;
        Ok(self.buf.split_to(length))
    }

    /// Discard exactly `length` bytes (reserved or padding regions)
    pub fn skip(&mut self, length: usize) -> Result<()> {
        self.ensure(length)?;
        self.buf.advance(length);
        Ok(())
    }

    /// Read an explicit length of the given width
    pub fn read_length(&mut self, length_type: LengthType) -> Result<usize> {
        Ok(match length_type {
            LengthType::U8 => self.read_u8()? as usize,
            LengthType::U16 => self.read_u16()? as usize,
            LengthType::U32 => self.read_u32()? as usize,
        })
    }

    /// Read a length prefix and then exactly that many bytes
    pub fn read_prefixed(&mut self, length_type: LengthType) -> Result<Bytes> {
        let length = self.read_length(length_type)?;
        if length > self.config.max_string_length {
            return Err(ProtocolError::InvalidLength(format!(
                "prefix declares {length} bytes, limit is {}",
                self.config.max_string_length
            )));
        }
        self.read_bytes(length)
    }

    /// Read an `allocated_length` byte field and cut it at the first NUL
    pub fn read_fixed(&mut self, allocated_length: usize) -> Result<Bytes> {
        let raw = self.read_bytes(allocated_length)?;
        let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
        Ok(raw.slice(..end))
    }

    /// Decode any [`Decodable`] value at the cursor
    pub fn read<T: Decodable>(&mut self) -> Result<T> {
        T::decode(self)
    }
}

/// Append-only write cursor over a growable buffer
#[derive(Debug)]
pub struct WriteStream {
    buf: BytesMut,
    config: StreamConfig,
}

impl WriteStream {
    /// Create a write stream with default limits and the given byte order
    pub fn new(byte_order: ByteOrder) -> Self {
        Self::with_config(StreamConfig::with_byte_order(byte_order))
    }

    /// Create a write stream from a full stream configuration
    pub fn with_config(config: StreamConfig) -> Self {
        Self {
            buf: BytesMut::new(),
            config,
        }
    }

    /// Create a write stream with room for `capacity` bytes
    pub fn with_capacity(capacity: usize, config: StreamConfig) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
            config,
        }
    }

    /// The configuration this stream was built from
    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    /// Bytes written so far
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether nothing has been written yet
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// View of the bytes written so far
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// Finish writing and hand off the buffer
    pub fn into_bytes(self) -> Bytes {
        self.buf.freeze()
    }

    /// Write a single byte
    pub fn write_u8(&mut self, value: u8) {
        self.buf.put_u8(value);
    }

    /// Write a one-byte boolean
    pub fn write_bool(&mut self, value: bool) {
        self.buf.put_u8(u8::from(value));
    }

    write_fixed_width!(
        /// Write a u16 in the stream's byte order
        write_u16, u16, put_u16_le, put_u16
    );
    write_fixed_width!(
        /// Write a u32 in the stream's byte order
        write_u32, u32, put_u32_le, put_u32
    );
    write_fixed_width!(
        /// Write a u64 in the stream's byte order
        write_u64, u64, put_u64_le, put_u64
    );
    write_fixed_width!(
        /// Write an i32 in the stream's byte order
        write_i32, i32, put_i32_le, put_i32
    );
    write_fixed_width!(
        /// Write an i64 in the stream's byte order
        write_i64, i64, put_i64_le, put_i64
    );
    write_fixed_width!(
        /// Write an f32 in the stream's byte order
        write_f32, f32, put_f32_le, put_f32
    );

    /// Write bytes verbatim with no framing
    pub fn write_bytes(&mut self, data: &[u8]) {
        self.buf.put_slice(data);
    }

    /// Write exactly `allocated_length` bytes, truncating or zero padding `data`
    pub fn write_fixed(&mut self, data: &[u8], allocated_length: usize) {
        let used = data.len().min(allocated_length);
        self.buf.put_slice(&data[..used]);
        self.buf.put_bytes(0, allocated_length - used);
    }

    /// Write an explicit length of the given width
    pub fn write_length(&mut self, length: usize, length_type: LengthType) -> Result<()> {
        let max = length_type.max_length();
        if length > max {
            return Err(ProtocolError::LengthOverflow { length, max });
        }
        match length_type {
            LengthType::U8 => self.write_u8(length as u8),
            LengthType::U16 => self.write_u16(length as u16),
            LengthType::U32 => self.write_u32(length as u32),
        }
        Ok(())
    }

    /// Write a length prefix and then `data`
    pub fn write_prefixed(&mut self, data: &[u8], length_type: LengthType) -> Result<()> {
        self.write_length(data.len(), length_type)?;
        self.buf.put_slice(data);
        Ok(())
    }

    /// Encode any [`Encodable`] value at the end of the stream
    pub fn write<T: Encodable + ?Sized>(&mut self, value: &T) -> Result<()> {
        value.encode(self)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn test_integer_byte_order() {
        let mut le = WriteStream::new(ByteOrder::Little);
        le.write_u32(0x0102_0304);
        assert_eq!(le.as_slice(), &[0x04, 0x03, 0x02, 0x01]);

        let mut be = WriteStream::new(ByteOrder::Big);
        be.write_u32(0x0102_0304);
        assert_eq!(be.as_slice(), &[0x01, 0x02, 0x03, 0x04]);
    }

    #[test]
    fn test_fixed_width_round_trip_both_orders() {
        for order in [ByteOrder::Little, ByteOrder::Big] {
            let mut w = WriteStream::new(order);
            w.write_u8(7);
            w.write_u16(0xBEEF);
            w.write_u64(u64::MAX - 1);
            w.write_i32(-42);
            w.write_i64(i64::MIN);
            w.write_f32(1.5);
            w.write_bool(true);

            let mut r = ReadStream::new(w.into_bytes(), order);
            assert_eq!(r.read_u8().unwrap(), 7);
            assert_eq!(r.read_u16().unwrap(), 0xBEEF);
            assert_eq!(r.read_u64().unwrap(), u64::MAX - 1);
            assert_eq!(r.read_i32().unwrap(), -42);
            assert_eq!(r.read_i64().unwrap(), i64::MIN);
            assert_eq!(r.read_f32().unwrap(), 1.5);
            assert!(r.read_bool().unwrap());
            assert!(r.is_empty());
        }
    }

    #[test]
    fn test_truncated_read_does_not_advance() {
        let mut r = ReadStream::new(vec![1u8, 2, 3], ByteOrder::Little);
        let err = r.read_u32().unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::Truncated {
                needed: 4,
                remaining: 3
            }
        ));
        assert_eq!(r.position(), 0);
    }

    #[test]
    fn test_fixed_pads_and_truncates() {
        let mut w = WriteStream::new(ByteOrder::Little);
        w.write_fixed(b"abc", 5);
        w.write_fixed(b"abcdefgh", 4);
        assert_eq!(w.as_slice(), b"abc\0\0abcd");

        let mut r = ReadStream::new(w.into_bytes(), ByteOrder::Little);
        assert_eq!(&r.read_fixed(5).unwrap()[..], b"abc");
        assert_eq!(&r.read_fixed(4).unwrap()[..], b"abcd");
    }

    #[test]
    fn test_prefix_overflow() {
        let mut w = WriteStream::new(ByteOrder::Little);
        let long = vec![b'x'; 256];
        let err = w.write_prefixed(&long, LengthType::U8).unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::LengthOverflow {
                length: 256,
                max: 255
            }
        ));
        assert!(w.is_empty());
    }

    #[test]
    fn test_prefix_exceeding_remaining_is_truncated() {
        let mut r = ReadStream::new(vec![10u8, b'a', b'b'], ByteOrder::Little);
        assert!(matches!(
            r.read_prefixed(LengthType::U8),
            Err(ProtocolError::Truncated { needed: 10, .. })
        ));
    }

    #[test]
    fn test_prefix_over_limit_is_invalid_length() {
        let config = StreamConfig {
            max_string_length: 64,
            ..StreamConfig::default()
        };
        let mut data = 100u32.to_le_bytes().to_vec();
        data.extend(vec![0u8; 100]);
        let mut r = ReadStream::with_config(data, config);
        assert!(matches!(
            r.read_prefixed(LengthType::U32),
            Err(ProtocolError::InvalidLength(_))
        ));
    }

    #[test]
    fn test_skip_advances_cursor() {
        let mut r = ReadStream::new(vec![0u8, 0, 0, 9], ByteOrder::Little);
        r.skip(3).unwrap();
        assert_eq!(r.position(), 3);
        assert_eq!(r.read_u8().unwrap(), 9);
        assert!(r.skip(1).is_err());
    }
}
