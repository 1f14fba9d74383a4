//! # Serializable Contract
//!
//! Encoding and decoding are two independent capabilities.
//!
//! A wire value implements [`Encodable`], [`Decodable`], or both. A read-only
//! format such as a zone file simply has no `encode` method, and the compiler
//! rejects any attempt to write one.
//!
//! Some call sites only learn the value they hold at runtime (a list of records
//! queued for one packet, a record kind picked from the command line). Those go
//! through the object-safe [`WireValue`] trait, whose default `encode_dyn` fails
//! with [`ProtocolError::UnsupportedDirection`] before touching the stream.
//!
//! ## Usage
//! ```rust
//! use world_protocol::config::ByteOrder;
//! use world_protocol::core::serializable::{encode_all, WireValue};
//! use world_protocol::core::vector::{Vector3, Vector4};
//! use world_protocol::config::StreamConfig;
//!
//! let position = Vector3::new(1.0, 2.0, 3.0);
//! let rotation = Vector4::new(0.0, 0.0, 0.0, 1.0);
//! let values: [&dyn WireValue; 2] = [&position, &rotation];
//!
//! let bytes = encode_all(&values, StreamConfig::with_byte_order(ByteOrder::Little)).unwrap();
//! assert_eq!(bytes.len(), 28);
//! ```

use crate::config::StreamConfig;
use crate::core::stream::{ReadStream, WriteStream};
use crate::error::{Direction, ProtocolError, Result};
use bytes::Bytes;

/// Values that can be written to a [`WriteStream`]
pub trait Encodable {
    /// Append this value's wire form to `stream`
    fn encode(&self, stream: &mut WriteStream) -> Result<()>;

    /// Encode into a fresh buffer
    fn to_bytes(&self, config: StreamConfig) -> Result<Bytes> {
        let mut stream = WriteStream::with_config(config);
        self.encode(&mut stream)?;
        Ok(stream.into_bytes())
    }
}

/// Values that can be read from a [`ReadStream`]
pub trait Decodable: Sized {
    /// Read one value at the stream's cursor
    fn decode(stream: &mut ReadStream) -> Result<Self>;

    /// Decode from a whole buffer; trailing bytes are left unread
    fn from_bytes(data: impl Into<Bytes>, config: StreamConfig) -> Result<Self> {
        let mut stream = ReadStream::with_config(data, config);
        Self::decode(&mut stream)
    }
}

/// Object-safe view of a wire value whose direction support is checked at runtime
pub trait WireValue {
    /// Name used in error messages and logs
    fn type_name(&self) -> &'static str;

    /// Encode through dynamic dispatch.
    ///
    /// The default rejects the call; encodable types override it.
    fn encode_dyn(&self, _stream: &mut WriteStream) -> Result<()> {
        Err(ProtocolError::unsupported(self.type_name(), Direction::Encode))
    }
}

/// Encode a heterogeneous sequence into one buffer.
///
/// Stops at the first failure and returns no bytes at all in that case.
pub fn encode_all(values: &[&dyn WireValue], config: StreamConfig) -> Result<Bytes> {
    let mut stream = WriteStream::with_config(config);
    for value in values {
        value.encode_dyn(&mut stream)?;
    }
    Ok(stream.into_bytes())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::config::ByteOrder;
    use crate::core::vector::Vector3;

    struct ReadOnly;

    impl WireValue for ReadOnly {
        fn type_name(&self) -> &'static str {
            "ReadOnly"
        }
    }

    #[test]
    fn test_default_encode_dyn_rejects() {
        let mut stream = WriteStream::new(ByteOrder::Little);
        let err = ReadOnly.encode_dyn(&mut stream).unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::UnsupportedDirection {
                type_name: "ReadOnly",
                direction: Direction::Encode
            }
        ));
        assert!(stream.is_empty());
    }

    #[test]
    fn test_encode_all_fails_whole_batch() {
        let v = Vector3::new(1.0, 1.0, 1.0);
        let values: [&dyn WireValue; 2] = [&v, &ReadOnly];
        let result = encode_all(&values, StreamConfig::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_to_bytes_and_from_bytes() {
        let v = Vector3::new(4.0, 5.0, 6.0);
        let config = StreamConfig::with_byte_order(ByteOrder::Big);
        let bytes = v.to_bytes(config).unwrap();
        assert_eq!(&bytes[..4], &4.0f32.to_be_bytes());
        assert_eq!(Vector3::from_bytes(bytes, config).unwrap(), v);
    }
}
