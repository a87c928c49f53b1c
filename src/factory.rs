//! Building actors and items from content.

use crate::actor::Actor;
use crate::content::{ContentLibrary, BASIC_ATTACK};
use crate::error::Result;
use crate::growth::GrowthSystem;
use crate::item::Item;
use std::sync::Arc;

/// Turns content records into ready-to-fight actors.
///
/// Every actor it returns has been refreshed: HP and MP are at their
/// maxima and the derived-stat cache is clean.
///
/// # Examples
///
/// ```rust
/// use skirmish::{ContentLibrary, Factory, GrowthSystem, Rules};
/// use serde_json::json;
///
/// let content = ContentLibrary::from_value(&json!({
///     "races": { "orc": { "name": "Orc", "base_stats": { "strength": 14 } } },
///     "classes": { "warrior": {
///         "name": "Warrior",
///         "base_stats": { "strength": 2 },
///         "initial_skills": ["power_strike"]
///     } }
/// }))
/// .unwrap();
///
/// let rules = Rules::default();
/// let factory = Factory::new(&content, GrowthSystem::new(&rules.growth));
/// let hero = factory.create_player("p1", "Grom", "orc", "warrior").unwrap();
///
/// assert_eq!(hero.base_stat("strength"), 16);
/// assert_eq!(hero.skills, vec!["basic_attack", "power_strike"]);
/// assert_eq!(hero.resources.hp, hero.resources.max_hp);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Factory<'a> {
    content: &'a ContentLibrary,
    growth: GrowthSystem<'a>,
}

impl<'a> Factory<'a> {
    pub fn new(content: &'a ContentLibrary, growth: GrowthSystem<'a>) -> Self {
        Self { content, growth }
    }

    /// Create a level 1 player character.
    ///
    /// Race attributes replace the defaults, class attributes add on top,
    /// and the class grants its keystones and initial skills.
    pub fn create_player(
        &self,
        id: impl Into<String>,
        name: impl Into<String>,
        race_id: &str,
        class_id: &str,
    ) -> Result<Actor> {
        let race = self.content.race(race_id)?;
        let class = self.content.class(class_id)?;

        let mut actor = Actor::new(id, name);
        actor.race_id = race_id.to_string();
        actor.class_id = class_id.to_string();

        for (stat, value) in &race.base_stats {
            actor.set_base_stat(stat.as_str(), *value);
        }
        for (stat, value) in &class.base_stats {
            actor.add_base_stat(stat.as_str(), *value);
        }
        actor.keystones.extend(class.keystones.iter().copied());

        actor.skills.push(BASIC_ATTACK.to_string());
        for skill in &class.initial_skills {
            if !actor.skills.contains(skill) {
                actor.skills.push(skill.clone());
            }
        }

        self.growth.refresh(&mut actor);
        tracing::debug!(actor = %actor.id, race = race_id, class = class_id, "created player");
        Ok(actor)
    }

    /// Create a monster from its record. `instance_id` tells apart several
    /// monsters of the same kind in one encounter.
    pub fn create_monster(&self, monster_id: &str, instance_id: impl Into<String>) -> Result<Actor> {
        let record = self.content.monster(monster_id)?;

        let mut actor = Actor::new(instance_id, record.name.clone());
        for (stat, value) in &record.base_stats {
            actor.set_base_stat(stat.as_str(), *value);
        }
        actor.keystones.extend(record.keystones.iter().copied());
        actor.skills = record.skills.clone();

        self.growth.set_level(&mut actor, record.level);
        tracing::debug!(actor = %actor.id, monster = monster_id, level = actor.level(), "created monster");
        Ok(actor)
    }

    pub fn create_item(&self, item_id: &str) -> Result<Arc<Item>> {
        self.content.item(item_id)
    }
}
