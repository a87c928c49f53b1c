//! Actor model.
//!
//! An `Actor` is a player character or monster: identity, level, base
//! attributes, equipment, resources, status effects, and the derived-stat
//! cache. Anything that changes derived stats goes through
//! [`Actor::invalidate`]; combat damage only touches [`Resources`].

use crate::cache::StatCache;
use crate::item::{Equipment, EquipmentSlot, Item};
use crate::mastery::Keystone;
use crate::stat_id::{names, StatId};
use crate::status::StatusSet;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// Base value of a primary attribute nobody has set.
pub const DEFAULT_ATTRIBUTE: i64 = 10;

/// Current and maximum HP/MP.
///
/// `hp <= max_hp` and `mp <= max_mp` hold after every refresh; damage
/// and costs saturate at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resources {
    pub hp: u32,
    pub max_hp: u32,
    pub mp: u32,
    pub max_mp: u32,
}

impl Resources {
    /// Remove HP, stopping at zero. Returns the amount actually lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.hp);
        self.hp -= lost;
        lost
    }

    /// Restore HP up to the maximum. Returns the amount actually healed.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let healed = amount.min(self.max_hp.saturating_sub(self.hp));
        self.hp += healed;
        healed
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }
}

/// A combatant.
///
/// # Examples
///
/// ```rust
/// use skirmish::{Actor, GrowthSystem, Rules};
///
/// let rules = Rules::default();
/// let growth = GrowthSystem::new(&rules.growth);
///
/// let mut hero = Actor::new("p1", "Hero").with_base_stat("strength", 16);
/// growth.refresh(&mut hero);
///
/// assert!(hero.resources.hp > 0);
/// assert_eq!(hero.resources.hp, hero.resources.max_hp);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub race_id: String,
    #[serde(default)]
    pub class_id: String,
    level: u32,
    base_stats: BTreeMap<StatId, i64>,
    #[serde(default)]
    equipment: Equipment,
    #[serde(default)]
    pub inventory: Vec<Arc<Item>>,
    #[serde(default)]
    pub resources: Resources,
    #[serde(default)]
    pub status: StatusSet,
    /// Keystones granted by class or monster data.
    #[serde(default)]
    pub keystones: BTreeSet<Keystone>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(skip)]
    cache: StatCache,
    #[serde(skip)]
    equipment_revision: u64,
}

impl Actor {
    /// A level 1 actor with every primary attribute at the default.
    ///
    /// Resources stay at zero until the growth system refreshes the actor.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            race_id: String::new(),
            class_id: String::new(),
            level: 1,
            base_stats: names::PRIMARY
                .iter()
                .map(|n| (StatId::from_str(n), DEFAULT_ATTRIBUTE))
                .collect(),
            equipment: Equipment::default(),
            inventory: Vec::new(),
            resources: Resources::default(),
            status: StatusSet::default(),
            keystones: BTreeSet::new(),
            skills: Vec::new(),
            cache: StatCache::default(),
            equipment_revision: 0,
        }
    }

    /// Set the starting level (at least 1). Use
    /// [`GrowthSystem::set_level`](crate::growth::GrowthSystem::set_level)
    /// on a live actor.
    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level.max(1);
        self.invalidate();
        self
    }

    pub fn with_base_stat(mut self, name: &str, value: i64) -> Self {
        self.set_base_stat(name, value);
        self
    }

    pub fn with_keystone(mut self, keystone: Keystone) -> Self {
        self.keystones.insert(keystone);
        self
    }

    pub fn with_skill(mut self, skill: impl Into<String>) -> Self {
        self.skills.push(skill.into());
        self
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn base_stats(&self) -> &BTreeMap<StatId, i64> {
        &self.base_stats
    }

    pub fn base_stat(&self, name: &str) -> i64 {
        self.base_stats
            .get(&StatId::from_str(name))
            .copied()
            .unwrap_or(0)
    }

    /// Overwrite a base attribute and invalidate derived stats.
    pub fn set_base_stat(&mut self, name: &str, value: i64) {
        self.base_stats.insert(StatId::from_str(name), value);
        self.invalidate();
    }

    /// Add to a base attribute and invalidate derived stats.
    pub fn add_base_stat(&mut self, name: &str, delta: i64) {
        *self.base_stats.entry(StatId::from_str(name)).or_insert(0) += delta;
        self.invalidate();
    }

    pub fn equipment(&self) -> &Equipment {
        &self.equipment
    }

    pub fn equipped(&self, slot: EquipmentSlot) -> Option<&Arc<Item>> {
        self.equipment.get(slot)
    }

    /// The single invalidation entry point for derived stats.
    pub fn invalidate(&mut self) {
        self.cache.invalidate();
    }

    pub fn cache(&self) -> &StatCache {
        &self.cache
    }

    pub fn is_alive(&self) -> bool {
        self.resources.is_alive()
    }

    pub(crate) fn cache_mut(&mut self) -> &mut StatCache {
        &mut self.cache
    }

    pub(crate) fn equipment_revision(&self) -> u64 {
        self.equipment_revision
    }

    pub(crate) fn set_level_unchecked(&mut self, level: u32) {
        self.level = level;
        self.invalidate();
    }

    /// Replace what is in `slot`, returning the previous occupant.
    ///
    /// Bumps the equipment revision but does not invalidate; callers pair
    /// this with [`invalidate`](Self::invalidate) and a refresh.
    pub(crate) fn replace_equipment(
        &mut self,
        slot: EquipmentSlot,
        item: Option<Arc<Item>>,
    ) -> Option<Arc<Item>> {
        self.equipment_revision += 1;
        std::mem::replace(self.equipment.slot_mut(slot), item)
    }
}
