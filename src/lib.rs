//! # World Protocol
//!
//! Byte-exact codecs for game client packets and legacy world files.
//!
//! Every record is built from the same primitives: a byte cursor with a
//! per-stream byte order, fixed-width integers and floats, single-byte text
//! and 3/4 component vectors. On top of those sit the record types:
//!
//! - **Zone files**: versioned world descriptions, decode only
//! - **Property lists**: named, typed object properties, encode only
//! - **Character summaries**: the character list entry, encode only, plus
//!   construction from the object catalog and persistence to the store
//! - **Object ids**: random 64-bit ids carrying reserved flag bits
//!
//! Whether a record can be read, written or both is part of its type:
//! [`Encodable`] and [`Decodable`] are separate traits. Callers that choose a
//! record at runtime go through [`WireValue`] or the [`Dispatcher`] and get
//! [`ProtocolError::UnsupportedDirection`] for the missing half.
//!
//! ## Example
//! ```rust
//! use world_protocol::config::StreamConfig;
//! use world_protocol::{Encodable, PropertyList, PropertyValue};
//!
//! let mut props = PropertyList::new();
//! props.push("test", PropertyValue::I32(42));
//! let bytes = props.to_bytes(StreamConfig::default()).unwrap();
//! assert_eq!(bytes.len(), 4 + 1 + 8 + 1 + 4);
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod protocol;
pub mod service;
pub mod utils;

pub use crate::config::{ByteOrder, CodecConfig, StreamConfig};
pub use crate::core::serializable::{encode_all, Decodable, Encodable, WireValue};
pub use crate::core::stream::{LengthType, ReadStream, WriteStream};
pub use crate::core::string::{CString, StringLayout};
pub use crate::core::vector::{Vector3, Vector4};
pub use crate::error::{Direction, ProtocolError, Result};
pub use crate::protocol::{
    decode_record, CharacterSummary, Dispatcher, ObjectId, ObjectIdFlags, PropertyList,
    PropertyValue, Record, RecordKind, SceneRecord, XmlElement, ZoneDocument,
};
