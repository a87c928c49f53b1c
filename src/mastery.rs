//! Masteries (keystones).
//!
//! A keystone is a boolean trait that bends the combat rules. It is either
//! granted by class data or unlocked when the matching derived attribute
//! reaches the mastery threshold.

use crate::stat_id::names;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Keystone {
    /// Strength: never misses, hits harder, cannot crit, ignores reflection.
    ResoluteTechnique,
    /// Dexterity: armor penetration, higher crit cap, bleeds, takes more damage.
    DeadlyArts,
    /// Constitution: cannot dodge, tougher armor, reflects, regenerates.
    IronFortress,
}

impl Keystone {
    pub const ALL: [Keystone; 3] = [
        Keystone::ResoluteTechnique,
        Keystone::DeadlyArts,
        Keystone::IronFortress,
    ];

    /// The attribute whose threshold unlocks this keystone.
    pub fn attribute(self) -> &'static str {
        match self {
            Keystone::ResoluteTechnique => names::STRENGTH,
            Keystone::DeadlyArts => names::DEXTERITY,
            Keystone::IronFortress => names::CONSTITUTION,
        }
    }
}

/// The keystones active for one actor during one action.
///
/// The accessors name the rule each keystone changes so the resolver
/// reads as a list of rules rather than a list of trait names.
///
/// # Examples
///
/// ```rust
/// use skirmish::mastery::{Keystone, Masteries};
///
/// let m = Masteries::from_keystones([Keystone::IronFortress]);
/// assert!(m.cannot_be_evaded());
/// assert!(m.reflects_damage());
/// assert!(!m.guarantees_hit());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Masteries {
    pub resolute_technique: bool,
    pub deadly_arts: bool,
    pub iron_fortress: bool,
}

impl Masteries {
    pub fn from_keystones(keystones: impl IntoIterator<Item = Keystone>) -> Self {
        let mut m = Self::default();
        for k in keystones {
            m.set(k);
        }
        m
    }

    /// Combine threshold unlocks with granted keystones.
    ///
    /// `stat` returns the derived value of an attribute by name.
    pub fn resolve(
        granted: &BTreeSet<Keystone>,
        threshold: i64,
        mut stat: impl FnMut(&str) -> i64,
    ) -> Self {
        let mut m = Self::from_keystones(granted.iter().copied());
        for k in Keystone::ALL {
            if stat(k.attribute()) >= threshold {
                m.set(k);
            }
        }
        m
    }

    fn set(&mut self, keystone: Keystone) {
        match keystone {
            Keystone::ResoluteTechnique => self.resolute_technique = true,
            Keystone::DeadlyArts => self.deadly_arts = true,
            Keystone::IronFortress => self.iron_fortress = true,
        }
    }

    pub fn has(&self, keystone: Keystone) -> bool {
        match keystone {
            Keystone::ResoluteTechnique => self.resolute_technique,
            Keystone::DeadlyArts => self.deadly_arts,
            Keystone::IronFortress => self.iron_fortress,
        }
    }

    pub fn active(&self) -> impl Iterator<Item = Keystone> + '_ {
        Keystone::ALL.into_iter().filter(|k| self.has(*k))
    }

    // Attacker-side rules

    pub fn guarantees_hit(&self) -> bool {
        self.resolute_technique
    }

    pub fn stance_bonus(&self) -> bool {
        self.resolute_technique
    }

    pub fn penetrates_armor(&self) -> bool {
        self.deadly_arts
    }

    pub fn never_crits(&self) -> bool {
        self.resolute_technique
    }

    pub fn raises_crit_cap(&self) -> bool {
        self.deadly_arts
    }

    pub fn ignores_reflection(&self) -> bool {
        self.resolute_technique
    }

    pub fn inflicts_bleed(&self) -> bool {
        self.deadly_arts
    }

    // Defender-side rules

    pub fn cannot_be_evaded(&self) -> bool {
        self.iron_fortress
    }

    pub fn amplifies_armor(&self) -> bool {
        self.iron_fortress
    }

    pub fn reduces_damage_taken(&self) -> bool {
        self.iron_fortress
    }

    pub fn takes_extra_damage(&self) -> bool {
        self.deadly_arts
    }

    pub fn reflects_damage(&self) -> bool {
        self.iron_fortress
    }

    pub fn regenerates(&self) -> bool {
        self.iron_fortress
    }
}
