//! # Character Summary
//!
//! The per-character record repeated in the character list packet.
//!
//! ## Wire Format
//! ```text
//! u64 object_id          u32 0
//! [33] current_name      [33] unapproved_name
//! bool name_rejected     bool is_free_trial
//! u32 head_color         u16 0
//! u32 head, chest_color, chest, legs, hair_style, hair_color,
//!     left_hand, right_hand, eyebrow_style, eye_style, mouth_style
//! u32 0
//! u16 last_zone          u16 last_map_instance      u32 last_map_clone
//! u64 0
//! u16 equipped count     u32 * count item lots
//! ```
//!
//! The record is write-only. It is built either empty or from a catalog entry, and
//! persisted through [`CharacterSummary::save_to_store`].

use crate::config::CHARACTER_NAME_LENGTH;
use crate::core::serializable::{Encodable, WireValue};
use crate::core::stream::WriteStream;
use crate::core::text::encode_latin1;
use crate::error::{ProtocolError, Result};
use crate::protocol::object_id::{ObjectId, ObjectIdFlags};
use crate::service::catalog::{Catalog, DISPLAY_NAME_ATTRIBUTE};
use crate::service::store::{SqlValue, Statement, Store};
use crate::utils::metrics;
use rand::Rng;
use tracing::{debug, info, instrument};

/// Object id of a record that has not been minted yet
pub const PLACEHOLDER_OBJECT_ID: u64 = 1124;

pub const INSERT_CHARACTER: &str = concat!(
    "INSERT INTO wlus.character (character_id, current_name, requested_name, head_color,",
    " head, chest_color, chest, legs, hair_style, hair_color, left_hand, right_hand,",
    " eyebrow_style, eye_style, mouth_style, account_id, zone) VALUES (%s, %s, %s, %s, %s, %s, %s, ",
    "%s, %s, %s, %s, %s, %s, %s, %s, %s, 0)",
);

pub const INSERT_CHARACTER_INFO: &str = concat!(
    "INSERT INTO `wlus`.`character_info` (`player_id`,`position`,`rotation`,`health`,`max_health`,",
    "`armor`,`max_armor`,`imagination`,`max_imagination`,`backpack_space`,`currency`,`universe_score`",
    ",`level`) VALUES (%s,\"0,0,0\",\"0,0,0,0\",4,4,0,0,0,0,20,0,0,0);",
);

pub const INSERT_CHARACTER_STATS: &str = concat!(
    "INSERT INTO `wlus`.`character_stats`(`currency_collected`,`bricks_collected`,",
    "`smashables_smashed`,`quick_builds_done`,`enemies_smashed`,`rockets_used`,`pets_tamed`,",
    "`imagination_collected`,`health_collected`,`armor_collected`,`distance_traveled`,`times_died`,",
    "`damage_taken`,`damage_healed`,`armor_repaired`,`imagination_restored`,`imagination_used`,",
    "`distance_driven`,`time_airborne_in_car`,`racing_imagination_collected`,",
    "`racing_imagination_crates_smashed`,`race_car_boosts`,`car_wrecks`,`racing_smashables_smashed`,",
    "`races_finished`,`races_won`,`player_id`) VALUES ",
    "(0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,%s);",
);

pub const INSERT_INVENTORY_ITEM: &str = concat!(
    "INSERT INTO wlus.inventory (object_id, lot, slot, equipped, linked, quantity, player_id)",
    "VALUES (%s, %s, %s, 1, 1, 1, %s)",
);

/// Display, appearance and equipment state of one character
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterSummary {
    pub object_id: ObjectId,
    pub current_name: String,
    /// Name requested by the player and awaiting approval
    pub unapproved_name: String,
    pub name_rejected: bool,
    pub is_free_trial: bool,
    pub head_color: u32,
    pub head: u32,
    pub chest_color: u32,
    pub chest: u32,
    pub legs: u32,
    pub hair_style: u32,
    pub hair_color: u32,
    pub left_hand: u32,
    pub right_hand: u32,
    pub eyebrow_style: u32,
    pub eye_style: u32,
    pub mouth_style: u32,
    pub last_zone: u16,
    pub last_map_instance: u16,
    pub last_map_clone: u32,
    /// Equipped item lots, in equip order
    pub equipped_items: Vec<u32>,
}

impl Default for CharacterSummary {
    fn default() -> Self {
        Self {
            object_id: ObjectId(PLACEHOLDER_OBJECT_ID),
            current_name: String::new(),
            unapproved_name: String::new(),
            name_rejected: false,
            is_free_trial: false,
            head_color: 0,
            head: 0,
            chest_color: 0,
            chest: 0,
            legs: 0,
            hair_style: 0,
            hair_color: 0,
            left_hand: 0,
            right_hand: 0,
            eyebrow_style: 0,
            eye_style: 0,
            mouth_style: 0,
            last_zone: 0,
            last_map_instance: 0,
            last_map_clone: 0,
            equipped_items: Vec::new(),
        }
    }
}

impl CharacterSummary {
    /// Build a summary from the catalog definition of `lot`
    pub fn from_catalog<C: Catalog + ?Sized>(catalog: &C, lot: u32) -> Result<Self> {
        Self::from_catalog_with_rng(catalog, lot, &mut rand::rng())
    }

    /// [`CharacterSummary::from_catalog`] with a caller-supplied RNG for the object id
    #[instrument(skip(catalog, rng))]
    pub fn from_catalog_with_rng<C, R>(catalog: &C, lot: u32, rng: &mut R) -> Result<Self>
    where
        C: Catalog + ?Sized,
        R: Rng + ?Sized,
    {
        let entry = catalog.lookup(lot)?.ok_or(ProtocolError::CatalogMiss(lot))?;
        let mut summary = Self::default();

        let display_name = entry
            .attribute(DISPLAY_NAME_ATTRIBUTE)
            .and_then(|value| value.as_text())
            .unwrap_or_default();
        summary.current_name = display_name
            .split_once('-')
            .map_or(display_name, |(prefix, _)| prefix)
            .to_string();

        if let Some(items) = entry.inventory() {
            summary.equipped_items = items
                .iter()
                .filter(|item| item.equip)
                .map(|item| item.itemid)
                .collect();
        }

        if let Some(minifig) = entry.minifig() {
            summary.head = minifig.head;
            summary.chest_color = minifig.chestdecal;
            summary.legs = minifig.legs;
            summary.hair_style = minifig.hairstyle;
            summary.hair_color = minifig.haircolor;
            summary.chest = minifig.chest;
            summary.head_color = minifig.headcolor;
            summary.left_hand = minifig.lefthand;
            summary.right_hand = minifig.righthand;
            summary.eyebrow_style = minifig.eyebrowstyle;
            summary.eye_style = minifig.eyesstyle;
            summary.mouth_style = minifig.mouthstyle;
        }

        summary.object_id =
            ObjectId::generate_with(rng, ObjectIdFlags::PERSISTENT | ObjectIdFlags::CHARACTER);

        debug!(
            object_id = %summary.object_id,
            name = %summary.current_name,
            equipped = summary.equipped_items.len(),
            "Built character summary from catalog"
        );
        Ok(summary)
    }

    /// The statements that persist this character, in execution order
    pub fn store_statements(&self, account_id: u64) -> Vec<Statement> {
        let id = self.object_id.as_u64();
        let mut statements = Vec::with_capacity(3 + self.equipped_items.len());

        statements.push(Statement::new(
            INSERT_CHARACTER,
            vec![
                id.into(),
                self.current_name.as_str().into(),
                self.unapproved_name.as_str().into(),
                self.head_color.into(),
                self.head.into(),
                self.chest_color.into(),
                self.chest.into(),
                self.legs.into(),
                self.hair_style.into(),
                self.hair_color.into(),
                self.left_hand.into(),
                self.right_hand.into(),
                self.eyebrow_style.into(),
                self.eye_style.into(),
                self.mouth_style.into(),
                account_id.into(),
            ],
        ));
        statements.push(Statement::new(INSERT_CHARACTER_INFO, vec![id.into()]));
        statements.push(Statement::new(INSERT_CHARACTER_STATS, vec![id.into()]));

        for (slot, lot) in self.equipped_items.iter().enumerate() {
            let item_id = ObjectId::generate(ObjectIdFlags::empty());
            statements.push(Statement::new(
                INSERT_INVENTORY_ITEM,
                vec![
                    item_id.as_u64().into(),
                    (*lot).into(),
                    SqlValue::from(slot),
                    id.into(),
                ],
            ));
        }

        statements
    }

    /// Insert the character, its info and stats rows and one row per equipped item, then commit
    #[instrument(skip(self, store), fields(object_id = %self.object_id))]
    pub fn save_to_store<S: Store + ?Sized>(&self, account_id: u64, store: &mut S) -> Result<()> {
        for statement in self.store_statements(account_id) {
            store.execute(&statement)?;
        }
        store.commit()?;

        info!(
            items = self.equipped_items.len(),
            "Persisted new character"
        );
        Ok(())
    }
}

impl Encodable for CharacterSummary {
    fn encode(&self, stream: &mut WriteStream) -> Result<()> {
        let item_count =
            u16::try_from(self.equipped_items.len()).map_err(|_| ProtocolError::LengthOverflow {
                length: self.equipped_items.len(),
                max: u16::MAX as usize,
            })?;
        // Both names are checked before the first byte goes out
        let current_name = encode_latin1(&self.current_name)?;
        let unapproved_name = encode_latin1(&self.unapproved_name)?;
        let start = stream.len();

        stream.write_u64(self.object_id.as_u64());
        stream.write_u32(0);
        stream.write_fixed(&current_name, CHARACTER_NAME_LENGTH);
        stream.write_fixed(&unapproved_name, CHARACTER_NAME_LENGTH);
        stream.write_bool(self.name_rejected);
        stream.write_bool(self.is_free_trial);
        stream.write_u32(self.head_color);
        stream.write_u16(0);
        for style in [
            self.head,
            self.chest_color,
            self.chest,
            self.legs,
            self.hair_style,
            self.hair_color,
            self.left_hand,
            self.right_hand,
            self.eyebrow_style,
            self.eye_style,
            self.mouth_style,
        ] {
            stream.write_u32(style);
        }
        stream.write_u32(0);
        stream.write_u16(self.last_zone);
        stream.write_u16(self.last_map_instance);
        stream.write_u32(self.last_map_clone);
        stream.write_u64(0);
        stream.write_u16(item_count);
        for item in &self.equipped_items {
            stream.write_u32(*item);
        }

        metrics::global().record_encoded(stream.len() - start);
        Ok(())
    }
}

impl WireValue for CharacterSummary {
    fn type_name(&self) -> &'static str {
        "CharacterSummary"
    }

    fn encode_dyn(&self, stream: &mut WriteStream) -> Result<()> {
        self.encode(stream)
    }
}
