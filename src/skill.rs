//! Actions, skill costs and skill damage.

use crate::actor::Actor;
use crate::content::{ContentLibrary, Cost, DamageKind, SkillRecord, BASIC_ATTACK};
use crate::error::{CombatError, Resource, Result};
use crate::growth::GrowthSystem;
use crate::stat_id::names;
use serde::{Deserialize, Serialize};

/// Id that selects [`Action::Defend`].
pub const DEFEND: &str = "defend";

/// What an actor does on its turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Weapon attack; base damage is the `weapon_damage` rating.
    BasicAttack,
    /// A skill from content; base damage scales with attack and magic power.
    Skill(String),
    /// Brace and recover a fraction of max HP. Never rolls.
    Defend,
}

impl Action {
    /// Map an action id as a driver would send it.
    ///
    /// ```rust
    /// use skirmish::Action;
    ///
    /// assert_eq!(Action::from_id("basic_attack"), Action::BasicAttack);
    /// assert_eq!(Action::from_id("defend"), Action::Defend);
    /// assert_eq!(Action::from_id("fireball"), Action::Skill("fireball".into()));
    /// ```
    pub fn from_id(id: &str) -> Self {
        match id {
            BASIC_ATTACK => Action::BasicAttack,
            DEFEND => Action::Defend,
            other => Action::Skill(other.to_string()),
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Action::BasicAttack => BASIC_ATTACK,
            Action::Defend => DEFEND,
            Action::Skill(id) => id.as_str(),
        }
    }
}

/// Check that `actor` can pay `cost` without spending anything.
///
/// MP must cover the cost. An HP cost must leave the actor alive, so
/// current HP has to exceed it.
pub fn check_cost(actor: &Actor, cost: &Cost) -> Result<()> {
    let r = &actor.resources;
    if r.mp < cost.mp {
        return Err(CombatError::InsufficientResource {
            actor: actor.name.clone(),
            resource: Resource::Mp,
            required: cost.mp,
            available: r.mp,
        });
    }
    if cost.hp > 0 && r.hp <= cost.hp {
        return Err(CombatError::InsufficientResource {
            actor: actor.name.clone(),
            resource: Resource::Hp,
            required: cost.hp.saturating_add(1),
            available: r.hp,
        });
    }
    Ok(())
}

/// Check and pay in one step; nothing is deducted on failure.
pub fn pay_cost(actor: &mut Actor, cost: &Cost) -> Result<()> {
    check_cost(actor, cost)?;
    actor.resources.mp -= cost.mp;
    actor.resources.hp -= cost.hp;
    Ok(())
}

/// Unmitigated skill damage before scale and variance.
pub fn scaled_damage(growth: &GrowthSystem<'_>, actor: &mut Actor, skill: &SkillRecord) -> f64 {
    let ap = growth.attack_power(actor) as f64;
    let sp = growth.magic_power(actor) as f64;
    ap * skill.scaling.ap + sp * skill.scaling.sp
}

/// Base damage an action feeds into the damage pipeline.
pub fn base_damage(
    growth: &GrowthSystem<'_>,
    content: &ContentLibrary,
    actor: &mut Actor,
    action: &Action,
) -> Result<f64> {
    match action {
        Action::BasicAttack => Ok(growth.rating(actor, names::WEAPON_DAMAGE)),
        Action::Skill(id) => {
            let skill = content.skill(id)?;
            Ok(scaled_damage(growth, actor, skill))
        }
        Action::Defend => Ok(0.0),
    }
}

/// Preview of a skill, as shown in a skill menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillDamage {
    pub skill_name: String,
    pub damage: i64,
    pub kind: DamageKind,
    pub cost: Cost,
}

/// Damage `actor` would deal with `skill_id` before defenses.
///
/// Fails if the skill is unknown or the actor can't afford it right now.
///
/// ```rust
/// use skirmish::content::{ContentLibrary, DamageKind, SkillRecord};
/// use skirmish::{skill, Actor, GrowthSystem, Rules};
///
/// let rules = Rules::default();
/// let growth = GrowthSystem::new(&rules.growth);
/// let mut content = ContentLibrary::new();
/// content.insert_skill("cleave", SkillRecord::new("Cleave", DamageKind::Physical).with_scaling(1.5, 0.0));
///
/// let mut actor = Actor::new("a", "Alice");
/// growth.refresh(&mut actor);
///
/// let preview = skill::skill_damage(&growth, &content, &mut actor, "cleave").unwrap();
/// assert_eq!(preview.damage, 61); // 41 attack power * 1.5
/// ```
pub fn skill_damage(
    growth: &GrowthSystem<'_>,
    content: &ContentLibrary,
    actor: &mut Actor,
    skill_id: &str,
) -> Result<SkillDamage> {
    let skill = content.skill(skill_id)?;
    check_cost(actor, &skill.cost)?;
    let damage = scaled_damage(growth, actor, skill).trunc() as i64;
    Ok(SkillDamage {
        skill_name: skill.name.clone(),
        damage,
        kind: skill.kind,
        cost: skill.cost,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GrowthConfig;

    fn ready_actor(growth: &GrowthSystem<'_>) -> Actor {
        let mut actor = Actor::new("a", "Alice");
        growth.refresh(&mut actor);
        actor
    }

    #[test]
    fn test_insufficient_mp_deducts_nothing() {
        let config = GrowthConfig::default();
        let growth = GrowthSystem::new(&config);
        let mut actor = ready_actor(&growth);
        let before = actor.resources;

        let cost = Cost {
            mp: before.mp + 1,
            hp: 5,
        };
        let err = pay_cost(&mut actor, &cost).unwrap_err();
        assert!(matches!(
            err,
            CombatError::InsufficientResource {
                resource: Resource::Mp,
                ..
            }
        ));
        assert_eq!(actor.resources, before);
    }

    #[test]
    fn test_hp_cost_cannot_be_lethal() {
        let config = GrowthConfig::default();
        let growth = GrowthSystem::new(&config);
        let mut actor = ready_actor(&growth);
        actor.resources.hp = 10;

        assert!(check_cost(&actor, &Cost { mp: 0, hp: 10 }).is_err());
        pay_cost(&mut actor, &Cost { mp: 0, hp: 9 }).unwrap();
        assert_eq!(actor.resources.hp, 1);
    }

    #[test]
    fn test_skill_damage_uses_both_powers() {
        let config = GrowthConfig::default();
        let growth = GrowthSystem::new(&config);
        let mut content = ContentLibrary::new();
        content.insert_skill(
            "spellblade",
            SkillRecord::new("Spellblade", DamageKind::Hybrid).with_scaling(1.0, 1.0),
        );
        let mut actor = ready_actor(&growth);

        let ap = growth.attack_power(&mut actor);
        let sp = growth.magic_power(&mut actor);
        let preview = skill_damage(&growth, &content, &mut actor, "spellblade").unwrap();
        assert_eq!(preview.damage, ap + sp);
        assert_eq!(preview.kind, DamageKind::Hybrid);
    }

    #[test]
    fn test_unknown_skill() {
        let config = GrowthConfig::default();
        let growth = GrowthSystem::new(&config);
        let content = ContentLibrary::new();
        let mut actor = ready_actor(&growth);

        let err = base_damage(&growth, &content, &mut actor, &Action::from_id("meteor")).unwrap_err();
        assert_eq!(
            err,
            CombatError::UnknownReference {
                kind: "skill",
                id: "meteor".into()
            }
        );
        // Basic attacks need no content
        assert!(base_damage(&growth, &content, &mut actor, &Action::BasicAttack).unwrap() > 0.0);
    }
}
