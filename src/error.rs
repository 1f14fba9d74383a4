//! # Error Types
//!
//! Error handling for every codec in the crate.
//!
//! This module defines all error variants that can occur while reading or writing
//! wire values, from truncated buffers to calls on the missing half of a read-only
//! or write-only format.
//!
//! ## Error Categories
//! - **Direction Errors**: encoding a decode-only record, or decoding an encode-only one
//! - **Malformed Input**: truncated buffers, oversized length prefixes, impossible counts
//! - **Encode Errors**: text outside the single-byte character set, prefix overflow
//! - **Collaborator Errors**: catalog misses and store failures
//! - **Configuration Errors**: unreadable or invalid configuration
//!
//! Unknown property tags are deliberately absent from this list: they encode as a
//! bare tag byte and never fail.
//!
//! ## Example Usage
//! ```rust
//! use world_protocol::error::{ProtocolError, Result};
//! use world_protocol::core::stream::ReadStream;
//! use world_protocol::config::ByteOrder;
//!
//! fn first_word(data: &[u8]) -> Result<u32> {
//!     let mut stream = ReadStream::new(data.to_vec(), ByteOrder::Little);
//!     stream.read_u32()
//! }
//!
//! assert!(matches!(first_word(&[1, 2]), Err(ProtocolError::Truncated { .. })));
//! ```

use std::fmt;
use std::io;
use thiserror::Error;

/// Error message constants to reduce allocations in error paths.
pub mod constants {
    /// Stream errors
    pub const ERR_UNBOUNDED_STRING: &str = "Cannot read a string without a fixed or prefixed length";
    pub const ERR_NAME_TOO_LONG: &str = "Property name does not fit a one-byte length";

    /// Collaborator errors
    pub const ERR_STORE_CLOSED: &str = "Store connection closed";

    /// Logging errors
    pub const ERR_LOGGING_INITIALIZED: &str = "Logging already initialized";
}

/// Which half of a codec was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Encode,
    Decode,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Encode => f.write_str("encoded"),
            Direction::Decode => f.write_str("decoded"),
        }
    }
}

// ProtocolError is the primary error type for all codec operations
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{type_name} cannot be {direction}")]
    UnsupportedDirection {
        type_name: &'static str,
        direction: Direction,
    },

    #[error("Truncated input: needed {needed} bytes, {remaining} remaining")]
    Truncated { needed: usize, remaining: usize },

    #[error("Invalid length: {0}")]
    InvalidLength(String),

    #[error("Declared count {declared} cannot fit in {remaining} remaining bytes")]
    CountMismatch { declared: usize, remaining: usize },

    #[error("Length {length} exceeds prefix maximum {max}")]
    LengthOverflow { length: usize, max: usize },

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Catalog has no object with lot {0}")]
    CatalogMiss(u32),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Custom error: {0}")]
    Custom(String),
}

impl ProtocolError {
    /// Error for the missing half of an asymmetric format.
    pub fn unsupported(type_name: &'static str, direction: Direction) -> Self {
        ProtocolError::UnsupportedDirection {
            type_name,
            direction,
        }
    }

    /// Whether this error came from malformed decode input.
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            ProtocolError::Truncated { .. }
                | ProtocolError::InvalidLength(_)
                | ProtocolError::CountMismatch { .. }
        )
    }
}

/// Type alias for Results using ProtocolError
pub type Result<T> = std::result::Result<T, ProtocolError>;
