//! # Object Catalog
//!
//! Read-only lookup of game object definitions by numeric type id (lot).
//!
//! The catalog itself is an external data source; this module only defines the
//! shape of what a lookup returns and an in-memory implementation.

use crate::error::Result;
use std::collections::{BTreeMap, HashMap};

/// Component type of an object's starting inventory
pub const INVENTORY_COMPONENT: u32 = 17;

/// Component type of a minifigure's appearance
pub const MINIFIG_COMPONENT: u32 = 35;

/// Attribute key holding an object's display name
pub const DISPLAY_NAME_ATTRIBUTE: &str = "displayName";

/// A loosely typed catalog attribute
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Int(i64),
    Float(f64),
    Text(String),
    Null,
}

impl AttributeValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// One row of an object's inventory component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InventoryItem {
    pub itemid: u32,
    pub equip: bool,
}

/// Appearance row of the minifigure component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MinifigAppearance {
    pub head: u32,
    pub chest: u32,
    pub legs: u32,
    pub hairstyle: u32,
    pub haircolor: u32,
    pub chestdecal: u32,
    pub headcolor: u32,
    pub lefthand: u32,
    pub righthand: u32,
    pub eyebrowstyle: u32,
    pub eyesstyle: u32,
    pub mouthstyle: u32,
}

/// Component-specific record(s)
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentRecord {
    Inventory(Vec<InventoryItem>),
    Minifig(MinifigAppearance),
    Attributes(BTreeMap<String, AttributeValue>),
}

/// Everything the catalog knows about one lot
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CatalogEntry {
    pub attributes: BTreeMap<String, AttributeValue>,
    pub components: HashMap<u32, ComponentRecord>,
}

impl CatalogEntry {
    pub fn attribute(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(key)
    }

    /// Inventory rows in catalog order, if the object has an inventory component
    pub fn inventory(&self) -> Option<&[InventoryItem]> {
        match self.components.get(&INVENTORY_COMPONENT) {
            Some(ComponentRecord::Inventory(items)) => Some(items),
            _ => None,
        }
    }

    /// Appearance, if the object has a minifigure component
    pub fn minifig(&self) -> Option<&MinifigAppearance> {
        match self.components.get(&MINIFIG_COMPONENT) {
            Some(ComponentRecord::Minifig(appearance)) => Some(appearance),
            _ => None,
        }
    }
}

/// Lookup-by-lot access to object definitions
pub trait Catalog {
    /// `Ok(None)` when the lot is unknown
    fn lookup(&self, lot: u32) -> Result<Option<CatalogEntry>>;
}

/// Catalog backed by a map; for fixtures and offline tooling
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    entries: HashMap<u32, CatalogEntry>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, lot: u32, entry: CatalogEntry) {
        self.entries.insert(lot, entry);
    }
}

impl Catalog for MemoryCatalog {
    fn lookup(&self, lot: u32) -> Result<Option<CatalogEntry>> {
        Ok(self.entries.get(&lot).cloned())
    }
}
