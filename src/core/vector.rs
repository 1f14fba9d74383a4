//! Fixed-width float aggregates used for positions and rotations.

use crate::core::serializable::{Decodable, Encodable, WireValue};
use crate::core::stream::{ReadStream, WriteStream};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// Three f32 components, 12 bytes on the wire
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl Add for Vector3 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Vector3 {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.z)
    }
}

impl Encodable for Vector3 {
    fn encode(&self, stream: &mut WriteStream) -> Result<()> {
        stream.write_f32(self.x);
        stream.write_f32(self.y);
        stream.write_f32(self.z);
        Ok(())
    }
}

impl WireValue for Vector3 {
    fn type_name(&self) -> &'static str {
        "Vector3"
    }

    fn encode_dyn(&self, stream: &mut WriteStream) -> Result<()> {
        self.encode(stream)
    }
}

impl Decodable for Vector3 {
    fn decode(stream: &mut ReadStream) -> Result<Self> {
        Ok(Self {
            x: stream.read_f32()?,
            y: stream.read_f32()?,
            z: stream.read_f32()?,
        })
    }
}

/// Four f32 components, 16 bytes on the wire
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vector4 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }
}

impl Add for Vector4 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(
            self.x + other.x,
            self.y + other.y,
            self.z + other.z,
            self.w + other.w,
        )
    }
}

impl Sub for Vector4 {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(
            self.x - other.x,
            self.y - other.y,
            self.z - other.z,
            self.w - other.w,
        )
    }
}

impl fmt::Display for Vector4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.x, self.y, self.z, self.w)
    }
}

impl Encodable for Vector4 {
    fn encode(&self, stream: &mut WriteStream) -> Result<()> {
        stream.write_f32(self.x);
        stream.write_f32(self.y);
        stream.write_f32(self.z);
        stream.write_f32(self.w);
        Ok(())
    }
}

impl WireValue for Vector4 {
    fn type_name(&self) -> &'static str {
        "Vector4"
    }

    fn encode_dyn(&self, stream: &mut WriteStream) -> Result<()> {
        self.encode(stream)
    }
}

impl Decodable for Vector4 {
    fn decode(stream: &mut ReadStream) -> Result<Self> {
        Ok(Self {
            x: stream.read_f32()?,
            y: stream.read_f32()?,
            z: stream.read_f32()?,
            w: stream.read_f32()?,
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::config::ByteOrder;

    #[test]
    fn test_vector_arithmetic() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(0.5, 0.5, 0.5);
        assert_eq!(a + b, Vector3::new(1.5, 2.5, 3.5));
        assert_eq!(a - b, Vector3::new(0.5, 1.5, 2.5));

        let q = Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert_eq!(q + q, Vector4::new(0.0, 0.0, 0.0, 2.0));
        assert_eq!(q - q, Vector4::ZERO);
    }

    #[test]
    fn test_display_matches_text_columns() {
        assert_eq!(Vector3::ZERO.to_string(), "0,0,0");
        assert_eq!(Vector4::ZERO.to_string(), "0,0,0,0");
        assert_eq!(Vector3::new(1.5, -2.0, 3.0).to_string(), "1.5,-2,3");
    }

    #[test]
    fn test_wire_sizes() {
        let mut w = WriteStream::new(ByteOrder::Little);
        w.write(&Vector3::new(1.0, 2.0, 3.0)).unwrap();
        assert_eq!(w.len(), 12);
        w.write(&Vector4::new(0.0, 0.0, 0.0, 1.0)).unwrap();
        assert_eq!(w.len(), 28);
        assert_eq!(&w.as_slice()[..4], &1.0f32.to_le_bytes());
    }
}
