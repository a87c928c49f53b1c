//! Content records and the library that holds them.
//!
//! Races, classes, items, skills and monsters arrive as already-decoded
//! JSON tables keyed by id. Each record is checked for its required keys
//! before decoding so a missing field reports as
//! [`CombatError::ConfigurationMissing`] rather than a generic decode error.

use crate::error::{CombatError, Result};
use crate::item::Item;
use crate::mastery::Keystone;
use crate::stat_id::StatId;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Skill id every actor can use without content.
pub const BASIC_ATTACK: &str = "basic_attack";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceRecord {
    pub name: String,
    /// Replaces the default value of each listed attribute.
    #[serde(default)]
    pub base_stats: BTreeMap<StatId, i64>,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassRecord {
    pub name: String,
    /// Added on top of the race's attributes.
    #[serde(default)]
    pub base_stats: BTreeMap<StatId, i64>,
    #[serde(default)]
    pub keystones: Vec<Keystone>,
    #[serde(default)]
    pub initial_skills: Vec<String>,
    #[serde(default)]
    pub description: String,
}

/// Damage classification of a skill. Informational; every kind runs
/// through the same mitigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DamageKind {
    Physical,
    Magic,
    Hybrid,
}

/// Attack-power and magic-power coefficients of a skill.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scaling {
    #[serde(default)]
    pub ap: f64,
    #[serde(default)]
    pub sp: f64,
}

impl Default for Scaling {
    fn default() -> Self {
        Self { ap: 1.0, sp: 0.0 }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cost {
    #[serde(default)]
    pub mp: u32,
    #[serde(default)]
    pub hp: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: DamageKind,
    #[serde(default)]
    pub scaling: Scaling,
    #[serde(default)]
    pub cost: Cost,
    #[serde(default)]
    pub description: String,
}

impl SkillRecord {
    pub fn new(name: impl Into<String>, kind: DamageKind) -> Self {
        Self {
            name: name.into(),
            kind,
            scaling: Scaling::default(),
            cost: Cost::default(),
            description: String::new(),
        }
    }

    pub fn with_scaling(mut self, ap: f64, sp: f64) -> Self {
        self.scaling = Scaling { ap, sp };
        self
    }

    pub fn with_cost(mut self, mp: u32, hp: u32) -> Self {
        self.cost = Cost { mp, hp };
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonsterRecord {
    pub name: String,
    pub level: u32,
    #[serde(default)]
    pub base_stats: BTreeMap<StatId, i64>,
    #[serde(default)]
    pub keystones: Vec<Keystone>,
    #[serde(default)]
    pub skills: Vec<String>,
}

/// All loaded content, looked up by id.
///
/// # Examples
///
/// ```rust
/// use skirmish::content::ContentLibrary;
/// use serde_json::json;
///
/// let mut content = ContentLibrary::new();
/// content
///     .load_skills(&json!({
///         "power_strike": { "name": "Power Strike", "type": "physical", "cost": { "mp": 5 } }
///     }))
///     .unwrap();
///
/// let skill = content.skill("power_strike").unwrap();
/// assert_eq!(skill.cost.mp, 5);
/// assert_eq!(skill.scaling.ap, 1.0); // default scaling
/// assert!(content.skill("fireball").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ContentLibrary {
    races: HashMap<String, RaceRecord>,
    classes: HashMap<String, ClassRecord>,
    items: HashMap<String, Arc<Item>>,
    skills: HashMap<String, SkillRecord>,
    monsters: HashMap<String, MonsterRecord>,
}

impl ContentLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a whole library from `{"races": {...}, "classes": {...}, ...}`.
    ///
    /// Every table is optional.
    pub fn from_value(value: &Value) -> Result<Self> {
        let mut library = Self::new();
        let tables: [(&str, fn(&mut Self, &Value) -> Result<usize>); 5] = [
            ("races", Self::load_races),
            ("classes", Self::load_classes),
            ("items", Self::load_items),
            ("skills", Self::load_skills),
            ("monsters", Self::load_monsters),
        ];
        for (key, load) in tables {
            if let Some(table) = value.get(key) {
                load(&mut library, table)?;
            }
        }
        Ok(library)
    }

    pub fn load_races(&mut self, table: &Value) -> Result<usize> {
        load_table(table, "race", &["name"], &mut self.races, |_, r| r)
    }

    pub fn load_classes(&mut self, table: &Value) -> Result<usize> {
        load_table(table, "class", &["name"], &mut self.classes, |_, r| r)
    }

    /// Item ids come from the table keys, not the records.
    pub fn load_items(&mut self, table: &Value) -> Result<usize> {
        load_table(
            table,
            "item",
            &["name"],
            &mut self.items,
            |id, mut item: Item| {
                item.id = id.to_string();
                Arc::new(item)
            },
        )
    }

    pub fn load_skills(&mut self, table: &Value) -> Result<usize> {
        load_table(table, "skill", &["name", "type"], &mut self.skills, |_, r| r)
    }

    pub fn load_monsters(&mut self, table: &Value) -> Result<usize> {
        load_table(
            table,
            "monster",
            &["name", "level"],
            &mut self.monsters,
            |_, r| r,
        )
    }

    pub fn insert_race(&mut self, id: impl Into<String>, race: RaceRecord) {
        self.races.insert(id.into(), race);
    }

    pub fn insert_class(&mut self, id: impl Into<String>, class: ClassRecord) {
        self.classes.insert(id.into(), class);
    }

    pub fn insert_item(&mut self, item: Item) {
        self.items.insert(item.id.clone(), Arc::new(item));
    }

    pub fn insert_skill(&mut self, id: impl Into<String>, skill: SkillRecord) {
        self.skills.insert(id.into(), skill);
    }

    pub fn insert_monster(&mut self, id: impl Into<String>, monster: MonsterRecord) {
        self.monsters.insert(id.into(), monster);
    }

    pub fn race(&self, id: &str) -> Result<&RaceRecord> {
        self.races.get(id).ok_or_else(|| unknown("race", id))
    }

    pub fn class(&self, id: &str) -> Result<&ClassRecord> {
        self.classes.get(id).ok_or_else(|| unknown("class", id))
    }

    /// A shared handle to an item definition.
    pub fn item(&self, id: &str) -> Result<Arc<Item>> {
        self.items.get(id).cloned().ok_or_else(|| unknown("item", id))
    }

    pub fn skill(&self, id: &str) -> Result<&SkillRecord> {
        self.skills.get(id).ok_or_else(|| unknown("skill", id))
    }

    pub fn monster(&self, id: &str) -> Result<&MonsterRecord> {
        self.monsters.get(id).ok_or_else(|| unknown("monster", id))
    }

    pub fn monster_ids(&self) -> impl Iterator<Item = &str> {
        self.monsters.keys().map(String::as_str)
    }
}

fn unknown(kind: &'static str, id: &str) -> CombatError {
    CombatError::UnknownReference {
        kind,
        id: id.to_string(),
    }
}

/// Decode one record after checking its required keys.
pub fn decode_record<T: DeserializeOwned>(
    record: &'static str,
    id: &str,
    value: &Value,
    required: &[&'static str],
) -> Result<T> {
    let object = value.as_object().ok_or_else(|| CombatError::MalformedRecord {
        record,
        id: id.to_string(),
        reason: "expected an object".to_string(),
    })?;
    if let Some(field) = required.iter().copied().find(|f| !object.contains_key(*f)) {
        return Err(CombatError::ConfigurationMissing {
            record,
            id: id.to_string(),
            field,
        });
    }
    serde_json::from_value(value.clone()).map_err(|e| CombatError::MalformedRecord {
        record,
        id: id.to_string(),
        reason: e.to_string(),
    })
}

// All-or-nothing: nothing is inserted unless every record decodes.
fn load_table<T: DeserializeOwned, V>(
    table: &Value,
    record: &'static str,
    required: &[&'static str],
    into: &mut HashMap<String, V>,
    finish: impl Fn(&str, T) -> V,
) -> Result<usize> {
    let entries = table.as_object().ok_or_else(|| CombatError::MalformedRecord {
        record,
        id: "*".to_string(),
        reason: "expected a table keyed by id".to_string(),
    })?;

    let mut decoded = Vec::with_capacity(entries.len());
    for (id, value) in entries {
        let parsed: T = decode_record(record, id, value, required)?;
        decoded.push((id.clone(), finish(id, parsed)));
    }

    let count = decoded.len();
    into.extend(decoded);
    tracing::debug!(record, count, "loaded content table");
    Ok(count)
}
