//! # Game Records
//!
//! The record types built on the core primitives, and the runtime dispatcher that
//! picks a decoder by name.
//!
//! | record | direction |
//! |--------|-----------|
//! | `ZoneDocument`, `SceneRecord` | decode |
//! | `PropertyList` | encode |
//! | `CharacterSummary` | encode |

pub mod character;
pub mod dispatcher;
pub mod ldf;
pub mod object_id;
pub mod xml;
pub mod zone;

pub use character::CharacterSummary;
pub use dispatcher::{decode_record, Dispatcher, Record, RecordKind};
pub use ldf::{Property, PropertyList, PropertyValue};
pub use object_id::{ObjectId, ObjectIdFlags};
pub use xml::XmlElement;
pub use zone::{SceneRecord, ZoneDocument};
