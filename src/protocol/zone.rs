//! # Zone Files
//!
//! Decoder for versioned world description files.
//!
//! ## Layout
//! ```text
//! u32 version
//! u32 reserved                     version >= 0x24
//! u32 world_id
//! Vector3 spawn_position           version >= 0x26
//! Vector4 spawn_rotation           version >= 0x26
//! u8 | u32 scene_count             u8 below 0x25, u32 from 0x25
//! SceneRecord * scene_count
//! ```
//!
//! Each scene record:
//! ```text
//! u8-prefixed filename, u8 id, [3] reserved, [1] reserved, [3] reserved,
//! u8-prefixed name, [3] reserved
//! ```
//!
//! The format is read-only here: the tool that produces zone files lives outside
//! this crate, so neither type implements `Encodable`.

use crate::config::{
    StreamConfig, ZONE_VERSION_RESERVED_WORD, ZONE_VERSION_SPAWN_POINT,
    ZONE_VERSION_WIDE_SCENE_COUNT,
};
use crate::core::serializable::{Decodable, WireValue};
use crate::core::stream::{LengthType, ReadStream};
use crate::core::string::{CString, StringLayout};
use crate::core::vector::{Vector3, Vector4};
use crate::error::{ProtocolError, Result};
use crate::utils::metrics;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, instrument, trace};

/// Smallest possible encoded scene: two empty names, the id and 10 reserved bytes
pub const MIN_SCENE_RECORD_SIZE: usize = 1 + 1 + 3 + 1 + 3 + 1 + 3;

/// One scene entry of a zone file
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SceneRecord {
    pub filename: String,
    pub id: u8,
    pub name: String,
}

impl Decodable for SceneRecord {
    fn decode(stream: &mut ReadStream) -> Result<Self> {
        let filename = CString::read_text(stream, StringLayout::Prefixed(LengthType::U8))?;
        let id = stream.read_u8()?;
        stream.skip(3)?;
        stream.skip(1)?;
        stream.skip(3)?;
        let name = CString::read_text(stream, StringLayout::Prefixed(LengthType::U8))?;
        stream.skip(3)?;

        trace!(%filename, id, %name, "Decoded scene record");
        Ok(Self { filename, id, name })
    }
}

impl WireValue for SceneRecord {
    fn type_name(&self) -> &'static str {
        "SceneRecord"
    }
}

/// A decoded world description
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ZoneDocument {
    pub version: u32,
    pub world_id: u32,
    pub spawn_position: Vector3,
    pub spawn_rotation: Vector4,
    pub scenes: Vec<SceneRecord>,
}

impl ZoneDocument {
    /// Parse a whole zone file already held in memory
    pub fn parse(data: impl Into<Bytes>, config: StreamConfig) -> Result<Self> {
        let mut stream = ReadStream::with_config(data, config);
        let result = Self::decode(&mut stream);
        match &result {
            Ok(_) => metrics::global().record_decoded(stream.position()),
            Err(_) => metrics::global().decode_failed(),
        }
        result
    }

    /// Read and parse a zone file from disk
    pub fn load<P: AsRef<Path>>(path: P, config: StreamConfig) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::parse(data, config)
    }

    /// Whether this version carries the reserved word after the version
    pub fn has_reserved_word(version: u32) -> bool {
        version >= ZONE_VERSION_RESERVED_WORD
    }

    /// Whether this version carries the spawn point
    pub fn has_spawn_point(version: u32) -> bool {
        version >= ZONE_VERSION_SPAWN_POINT
    }

    /// Width of the scene count for this version
    pub fn scene_count_type(version: u32) -> LengthType {
        if version < ZONE_VERSION_WIDE_SCENE_COUNT {
            LengthType::U8
        } else {
            LengthType::U32
        }
    }

    /// Look up a scene by its id
    pub fn scene(&self, id: u8) -> Option<&SceneRecord> {
        self.scenes.iter().find(|scene| scene.id == id)
    }
}

impl Decodable for ZoneDocument {
    #[instrument(skip(stream), fields(offset = stream.position()))]
    fn decode(stream: &mut ReadStream) -> Result<Self> {
        let version = stream.read_u32()?;
        if Self::has_reserved_word(version) {
            stream.skip(4)?;
        }
        let world_id = stream.read_u32()?;

        let (spawn_position, spawn_rotation) = if Self::has_spawn_point(version) {
            (stream.read::<Vector3>()?, stream.read::<Vector4>()?)
        } else {
            (Vector3::ZERO, Vector4::ZERO)
        };

        let scene_count = stream.read_length(Self::scene_count_type(version))?;
        let limit = stream.config().max_scene_count;
        if scene_count > limit {
            return Err(ProtocolError::InvalidLength(format!(
                "zone declares {scene_count} scenes, limit is {limit}"
            )));
        }
        let remaining = stream.remaining();
        if scene_count > remaining / MIN_SCENE_RECORD_SIZE {
            return Err(ProtocolError::CountMismatch {
                declared: scene_count,
                remaining,
            });
        }

        let mut scenes = Vec::with_capacity(scene_count);
        for _ in 0..scene_count {
            scenes.push(stream.read::<SceneRecord>()?);
        }

        debug!(version, world_id, scene_count, "Decoded zone document");
        Ok(Self {
            version,
            world_id,
            spawn_position,
            spawn_rotation,
            scenes,
        })
    }
}

impl WireValue for ZoneDocument {
    fn type_name(&self) -> &'static str {
        "ZoneDocument"
    }
}
