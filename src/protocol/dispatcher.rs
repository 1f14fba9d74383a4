//! Record-kind dispatch for callers that pick a decoder at runtime.
//!
//! Handlers are keyed by [`RecordKind`]. Kinds without a registered decoder are
//! write-only and fail with [`ProtocolError::UnsupportedDirection`] before the
//! stream is touched.

use crate::core::serializable::Decodable;
use crate::core::stream::ReadStream;
use crate::core::vector::{Vector3, Vector4};
use crate::error::{Direction, ProtocolError, Result};
use crate::protocol::zone::{SceneRecord, ZoneDocument};
use crate::utils::metrics;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, OnceLock, RwLock};
use tracing::debug;

/// Every wire value the crate knows by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Zone,
    Scene,
    Vector3,
    Vector4,
    PropertyList,
    CharacterSummary,
}

impl RecordKind {
    pub const ALL: [RecordKind; 6] = [
        RecordKind::Zone,
        RecordKind::Scene,
        RecordKind::Vector3,
        RecordKind::Vector4,
        RecordKind::PropertyList,
        RecordKind::CharacterSummary,
    ];

    /// Type name used in errors and on the command line
    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            RecordKind::Zone => "ZoneDocument",
            RecordKind::Scene => "SceneRecord",
            RecordKind::Vector3 => "Vector3",
            RecordKind::Vector4 => "Vector4",
            RecordKind::PropertyList => "PropertyList",
            RecordKind::CharacterSummary => "CharacterSummary",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RecordKind {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "zone" | "zonedocument" | "luz" => Ok(RecordKind::Zone),
            "scene" | "scenerecord" => Ok(RecordKind::Scene),
            "vector3" | "vec3" => Ok(RecordKind::Vector3),
            "vector4" | "vec4" => Ok(RecordKind::Vector4),
            "propertylist" | "ldf" => Ok(RecordKind::PropertyList),
            "charactersummary" | "character" => Ok(RecordKind::CharacterSummary),
            other => Err(ProtocolError::Custom(format!("Unknown record kind: {other}"))),
        }
    }
}

/// A decoded value of any readable kind
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value")]
pub enum Record {
    Zone(ZoneDocument),
    Scene(SceneRecord),
    Vector3(Vector3),
    Vector4(Vector4),
}

type DecoderFn = dyn Fn(&mut ReadStream) -> Result<Record> + Send + Sync + 'static;

/// Decoder table keyed by record kind
pub struct Dispatcher {
    decoders: Arc<RwLock<HashMap<RecordKind, Box<DecoderFn>>>>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    /// A dispatcher with every built-in decodable kind registered
    pub fn new() -> Self {
        let mut decoders: HashMap<RecordKind, Box<DecoderFn>> = HashMap::new();
        decoders.insert(
            RecordKind::Zone,
            Box::new(|s: &mut ReadStream| ZoneDocument::decode(s).map(Record::Zone)),
        );
        decoders.insert(
            RecordKind::Scene,
            Box::new(|s: &mut ReadStream| SceneRecord::decode(s).map(Record::Scene)),
        );
        decoders.insert(
            RecordKind::Vector3,
            Box::new(|s: &mut ReadStream| Vector3::decode(s).map(Record::Vector3)),
        );
        decoders.insert(
            RecordKind::Vector4,
            Box::new(|s: &mut ReadStream| Vector4::decode(s).map(Record::Vector4)),
        );
        Self {
            decoders: Arc::new(RwLock::new(decoders)),
        }
    }

    /// A dispatcher with no decoders
    pub fn empty() -> Self {
        Self {
            decoders: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Install or replace the decoder for `kind`
    pub fn register<F>(&self, kind: RecordKind, decoder: F) -> Result<()>
    where
        F: Fn(&mut ReadStream) -> Result<Record> + Send + Sync + 'static,
    {
        let mut decoders = self.decoders.write().map_err(|_| {
            ProtocolError::Custom("Failed to acquire write lock on dispatcher".to_string())
        })?;
        decoders.insert(kind, Box::new(decoder));
        Ok(())
    }

    /// Whether `kind` can be decoded
    pub fn supports(&self, kind: RecordKind) -> bool {
        self.decoders
            .read()
            .map(|decoders| decoders.contains_key(&kind))
            .unwrap_or(false)
    }

    /// Decode one record of `kind` at the stream's cursor
    pub fn dispatch(&self, kind: RecordKind, stream: &mut ReadStream) -> Result<Record> {
        let decoders = self.decoders.read().map_err(|_| {
            ProtocolError::Custom("Failed to acquire read lock on dispatcher".to_string())
        })?;

        let Some(decoder) = decoders.get(&kind) else {
            metrics::global().unsupported_direction();
            debug!(%kind, "No decoder registered");
            return Err(ProtocolError::unsupported(kind.name(), Direction::Decode));
        };

        let start = stream.position();
        let result = decoder(stream);
        match &result {
            Ok(_) => metrics::global().record_decoded(stream.position() - start),
            Err(_) => metrics::global().decode_failed(),
        }
        result
    }
}

static BUILTIN: OnceLock<Dispatcher> = OnceLock::new();

/// Shared dispatcher holding the built-in decoders
pub fn builtin() -> &'static Dispatcher {
    BUILTIN.get_or_init(Dispatcher::new)
}

/// Decode one record of `kind` with the built-in decoders
pub fn decode_record(kind: RecordKind, stream: &mut ReadStream) -> Result<Record> {
    builtin().dispatch(kind, stream)
}
