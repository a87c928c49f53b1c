//! Items and equipment slots.

use crate::stat_id::StatId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// The fixed equipment slots.
///
/// Older content uses `main_hand` and `ring`; both are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquipmentSlot {
    #[serde(alias = "main_hand")]
    Weapon,
    #[serde(alias = "armor")]
    Body,
    #[serde(alias = "ring")]
    Accessory,
}

impl EquipmentSlot {
    pub const ALL: [EquipmentSlot; 3] = [
        EquipmentSlot::Weapon,
        EquipmentSlot::Body,
        EquipmentSlot::Accessory,
    ];
}

impl std::fmt::Display for EquipmentSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EquipmentSlot::Weapon => write!(f, "weapon"),
            EquipmentSlot::Body => write!(f, "body"),
            EquipmentSlot::Accessory => write!(f, "accessory"),
        }
    }
}

/// An immutable item definition.
///
/// Items are shared with `Arc`; equipping one stores a reference to the
/// same definition rather than a copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Content tables supply the id as the record key.
    #[serde(default)]
    pub id: String,
    pub name: String,
    /// Free-form classification ("weapon", "armor", "accessory", ...).
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Where the item goes; `None` means it cannot be equipped.
    #[serde(default)]
    pub slot: Option<EquipmentSlot>,
    /// Attribute bonuses granted while equipped.
    #[serde(default)]
    pub bonus_stats: BTreeMap<StatId, i64>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: u32,
}

impl Item {
    pub fn new(id: impl Into<String>, name: impl Into<String>, slot: EquipmentSlot) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: slot.to_string(),
            slot: Some(slot),
            bonus_stats: BTreeMap::new(),
            description: String::new(),
            price: 0,
        }
    }

    pub fn with_bonus(mut self, stat: &str, value: i64) -> Self {
        *self.bonus_stats.entry(StatId::from_str(stat)).or_insert(0) += value;
        self
    }

    pub fn bonus(&self, stat: &StatId) -> i64 {
        self.bonus_stats.get(stat).copied().unwrap_or(0)
    }
}

/// What an actor is wearing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    #[serde(default)]
    pub weapon: Option<Arc<Item>>,
    #[serde(default)]
    pub body: Option<Arc<Item>>,
    #[serde(default)]
    pub accessory: Option<Arc<Item>>,
}

impl Equipment {
    pub fn get(&self, slot: EquipmentSlot) -> Option<&Arc<Item>> {
        match slot {
            EquipmentSlot::Weapon => self.weapon.as_ref(),
            EquipmentSlot::Body => self.body.as_ref(),
            EquipmentSlot::Accessory => self.accessory.as_ref(),
        }
    }

    pub(crate) fn slot_mut(&mut self, slot: EquipmentSlot) -> &mut Option<Arc<Item>> {
        match slot {
            EquipmentSlot::Weapon => &mut self.weapon,
            EquipmentSlot::Body => &mut self.body,
            EquipmentSlot::Accessory => &mut self.accessory,
        }
    }

    /// Equipped items in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Item>> {
        [&self.weapon, &self.body, &self.accessory]
            .into_iter()
            .filter_map(|slot| slot.as_ref())
    }
}
