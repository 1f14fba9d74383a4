//! # Core Codec Components
//!
//! Byte cursors, the serializable contract, and the primitive wire types every
//! record is built from.
//!
//! ## Components
//! - **Streams**: `ReadStream` / `WriteStream` with a per-stream byte order
//! - **Serializable**: `Encodable`, `Decodable` and the runtime `WireValue` view
//! - **Strings**: `CString` with fixed, prefixed or raw layouts over latin1 text
//! - **Vectors**: `Vector3` / `Vector4` positions and rotations
//!
//! ## Wire Conventions
//! ```text
//! integers   fixed width, one byte order for the whole format
//! bool       one byte, 0 or 1
//! text       one byte per character
//! ```

pub mod serializable;
pub mod stream;
pub mod string;
pub mod text;
pub mod vector;
