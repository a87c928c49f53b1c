//! Inventory and equipment changes.
//!
//! Equipping and unequipping are the main invalidation triggers: both
//! go through [`Actor::invalidate`] and then refresh, so maximum HP/MP
//! follow the new bonuses immediately.

use crate::actor::Actor;
use crate::error::{CombatError, Result};
use crate::growth::GrowthSystem;
use crate::item::{EquipmentSlot, Item};
use std::sync::Arc;

/// Put an item in the actor's bag. Derived stats are unaffected.
pub fn add_item(actor: &mut Actor, item: Arc<Item>) {
    actor.inventory.push(item);
}

/// Equip the inventory item with id `item_id`.
///
/// Whatever occupied the slot goes back into the inventory. Fails with
/// [`CombatError::UnknownReference`] if the actor doesn't carry the item
/// and [`CombatError::ConfigurationMissing`] if it has no slot; neither
/// failure changes the actor.
///
/// # Examples
///
/// ```rust
/// use skirmish::{inventory, Actor, EquipmentSlot, GrowthSystem, Item, Rules};
/// use std::sync::Arc;
///
/// let rules = Rules::default();
/// let growth = GrowthSystem::new(&rules.growth);
/// let mut actor = Actor::new("a", "Alice");
/// growth.refresh(&mut actor);
/// let before = actor.resources.max_hp;
///
/// let mail = Item::new("mail", "Chain Mail", EquipmentSlot::Body).with_bonus("constitution", 5);
/// inventory::add_item(&mut actor, Arc::new(mail));
/// inventory::equip_item(&growth, &mut actor, "mail").unwrap();
///
/// assert_eq!(actor.resources.max_hp, before + 200);
/// assert!(actor.inventory.is_empty());
/// ```
pub fn equip_item(growth: &GrowthSystem<'_>, actor: &mut Actor, item_id: &str) -> Result<()> {
    let pos = actor
        .inventory
        .iter()
        .position(|i| i.id == item_id)
        .ok_or_else(|| CombatError::UnknownReference {
            kind: "item",
            id: item_id.to_string(),
        })?;
    let slot = actor.inventory[pos]
        .slot
        .ok_or_else(|| CombatError::ConfigurationMissing {
            record: "item",
            id: item_id.to_string(),
            field: "slot",
        })?;

    let item = actor.inventory.remove(pos);
    if let Some(previous) = actor.replace_equipment(slot, Some(item)) {
        actor.inventory.push(previous);
    }
    actor.invalidate();
    growth.refresh(actor);

    tracing::debug!(actor = %actor.id, item = item_id, %slot, "equipped item");
    Ok(())
}

/// Move the item in `slot` back to the inventory.
///
/// Returns `false` if the slot was empty.
pub fn unequip_item(growth: &GrowthSystem<'_>, actor: &mut Actor, slot: EquipmentSlot) -> bool {
    if actor.equipped(slot).is_none() {
        return false;
    }
    if let Some(item) = actor.replace_equipment(slot, None) {
        actor.inventory.push(item);
    }
    actor.invalidate();
    growth.refresh(actor);

    tracing::debug!(actor = %actor.id, %slot, "unequipped item");
    true
}
