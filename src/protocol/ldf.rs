//! # Property Lists
//!
//! Write-only encoder for named, typed object properties.
//!
//! ## Wire Format
//! ```text
//! u32 count
//! repeat count:
//!     u8   name byte length (2 per character)
//!     [u8, 0] per name character
//!     u8   type tag
//!     ...  value, by tag
//! ```
//!
//! | tag | value |
//! |-----|-------|
//! | 0 | u32-prefixed single-byte text |
//! | 1 | i32 |
//! | 3 | f32 |
//! | 5 | u32 |
//! | 7 | bool (1 byte) |
//! | 8 | i64 |
//! | 9 | i64 object id |
//! | 13 | u32 length, header literal, markup |
//!
//! Any other tag writes the tag byte and nothing else.
//!
//! ## Usage
//! ```rust
//! use world_protocol::config::StreamConfig;
//! use world_protocol::core::serializable::Encodable;
//! use world_protocol::protocol::ldf::{PropertyList, PropertyValue};
//!
//! let mut props = PropertyList::new();
//! props.push("test", PropertyValue::I32(42));
//!
//! let bytes = props.to_bytes(StreamConfig::default()).unwrap();
//! assert_eq!(bytes[4], 8);
//! ```

use crate::config::XML_HEADER;
use crate::core::serializable::{Encodable, WireValue};
use crate::core::stream::{LengthType, WriteStream};
use crate::core::text::encode_latin1;
use crate::error::{constants, ProtocolError, Result};
use crate::protocol::object_id::ObjectId;
use crate::protocol::xml::XmlElement;
use crate::utils::metrics;
use tracing::{instrument, trace};

pub const TAG_TEXT: u8 = 0;
pub const TAG_I32: u8 = 1;
pub const TAG_F32: u8 = 3;
pub const TAG_U32: u8 = 5;
pub const TAG_BOOL: u8 = 7;
pub const TAG_I64: u8 = 8;
pub const TAG_OBJECT_ID: u8 = 9;
pub const TAG_XML: u8 = 13;

/// A typed property value; one variant per wire tag
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Text(String),
    I32(i32),
    F32(f32),
    U32(u32),
    Bool(bool),
    I64(i64),
    /// Same wire form as `I64`, different meaning
    ObjectId(i64),
    Xml(XmlElement),
    /// A tag with no known value encoding; only the tag byte is written.
    /// Encoding fails if the tag is one of the known ones.
    Unknown(u8),
}

impl PropertyValue {
    /// The wire tag for this value
    pub fn tag(&self) -> u8 {
        match self {
            PropertyValue::Text(_) => TAG_TEXT,
            PropertyValue::I32(_) => TAG_I32,
            PropertyValue::F32(_) => TAG_F32,
            PropertyValue::U32(_) => TAG_U32,
            PropertyValue::Bool(_) => TAG_BOOL,
            PropertyValue::I64(_) => TAG_I64,
            PropertyValue::ObjectId(_) => TAG_OBJECT_ID,
            PropertyValue::Xml(_) => TAG_XML,
            PropertyValue::Unknown(tag) => *tag,
        }
    }

    fn encode_value(&self, stream: &mut WriteStream) -> Result<()> {
        match self {
            PropertyValue::Text(text) => {
                stream.write_prefixed(&encode_latin1(text)?, LengthType::U32)?
            }
            PropertyValue::I32(v) => stream.write_i32(*v),
            PropertyValue::F32(v) => stream.write_f32(*v),
            PropertyValue::U32(v) => stream.write_u32(*v),
            PropertyValue::Bool(v) => stream.write_bool(*v),
            PropertyValue::I64(v) | PropertyValue::ObjectId(v) => stream.write_i64(*v),
            PropertyValue::Xml(doc) => {
                let markup = format!("{XML_HEADER}{}", doc.to_markup());
                stream.write_prefixed(markup.as_bytes(), LengthType::U32)?
            }
            PropertyValue::Unknown(tag) if is_known_tag(*tag) => {
                return Err(ProtocolError::Encoding(format!(
                    "tag {tag} carries a value and cannot be written bare"
                )))
            }
            PropertyValue::Unknown(tag) => write_passthrough_tag(*tag)?,
        }
        Ok(())
    }
}

impl From<ObjectId> for PropertyValue {
    fn from(id: ObjectId) -> Self {
        PropertyValue::ObjectId(id.as_u64() as i64)
    }
}

impl From<XmlElement> for PropertyValue {
    fn from(doc: XmlElement) -> Self {
        PropertyValue::Xml(doc)
    }
}

/// Whether `tag` has a value encoding of its own
pub fn is_known_tag(tag: u8) -> bool {
    matches!(
        tag,
        TAG_TEXT | TAG_I32 | TAG_F32 | TAG_U32 | TAG_BOOL | TAG_I64 | TAG_OBJECT_ID | TAG_XML
    )
}

/// Value encoding for an unrecognized tag.
///
/// Legacy producers emit a bare tag byte here, so this writes nothing and
/// succeeds. Return an error instead to make unknown tags fatal.
fn write_passthrough_tag(tag: u8) -> Result<()> {
    trace!(tag, "Unknown property tag written without a value");
    metrics::global().unknown_tag_passed();
    Ok(())
}

/// A named property
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: String,
    pub value: PropertyValue,
}

/// Ordered property list; insertion order is wire order and names may repeat
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PropertyList {
    entries: Vec<Property>,
}

impl PropertyList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a property
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<PropertyValue>) {
        self.entries.push(Property {
            name: name.into(),
            value: value.into(),
        });
    }

    /// Alias of [`PropertyList::push`]
    pub fn register_key(&mut self, name: impl Into<String>, value: impl Into<PropertyValue>) {
        self.push(name, value);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Property> {
        self.entries.iter()
    }
}

impl<N: Into<String>> FromIterator<(N, PropertyValue)> for PropertyList {
    fn from_iter<I: IntoIterator<Item = (N, PropertyValue)>>(iter: I) -> Self {
        let mut list = PropertyList::new();
        for (name, value) in iter {
            list.push(name, value);
        }
        list
    }
}

/// Name as (byte, 0) pairs behind a u8 byte length
fn write_wide_name(stream: &mut WriteStream, name: &str) -> Result<()> {
    let bytes = encode_latin1(name)?;
    let byte_length = bytes.len() * 2;
    if byte_length > u8::MAX as usize {
        return Err(ProtocolError::Encoding(format!(
            "{}: '{name}' is {byte_length} bytes",
            constants::ERR_NAME_TOO_LONG
        )));
    }
    stream.write_u8(byte_length as u8);
    for b in bytes {
        stream.write_u8(b);
        stream.write_u8(0);
    }
    Ok(())
}

impl Encodable for PropertyList {
    #[instrument(skip_all, fields(entries = self.entries.len()))]
    fn encode(&self, stream: &mut WriteStream) -> Result<()> {
        let count = u32::try_from(self.entries.len()).map_err(|_| ProtocolError::LengthOverflow {
            length: self.entries.len(),
            max: u32::MAX as usize,
        })?;
        // Entries go to a scratch buffer so a failure leaves `stream` as it was
        let mut scratch = WriteStream::with_config(*stream.config());
        scratch.write_u32(count);
        for entry in &self.entries {
            write_wide_name(&mut scratch, &entry.name)?;
            scratch.write_u8(entry.value.tag());
            entry.value.encode_value(&mut scratch)?;
        }
        stream.write_bytes(scratch.as_slice());
        metrics::global().record_encoded(scratch.len());
        Ok(())
    }
}

impl WireValue for PropertyList {
    fn type_name(&self) -> &'static str {
        "PropertyList"
    }

    fn encode_dyn(&self, stream: &mut WriteStream) -> Result<()> {
        self.encode(stream)
    }
}

impl From<&str> for PropertyValue {
    fn from(text: &str) -> Self {
        PropertyValue::Text(text.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(text: String) -> Self {
        PropertyValue::Text(text)
    }
}

impl From<i32> for PropertyValue {
    fn from(v: i32) -> Self {
        PropertyValue::I32(v)
    }
}

impl From<f32> for PropertyValue {
    fn from(v: f32) -> Self {
        PropertyValue::F32(v)
    }
}

impl From<u32> for PropertyValue {
    fn from(v: u32) -> Self {
        PropertyValue::U32(v)
    }
}

impl From<bool> for PropertyValue {
    fn from(v: bool) -> Self {
        PropertyValue::Bool(v)
    }
}

impl From<i64> for PropertyValue {
    fn from(v: i64) -> Self {
        PropertyValue::I64(v)
    }
}
