//! Turn resolution.
//!
//! [`TurnResolver::resolve_action`] runs one attacker action against one
//! defender through a fixed sequence of stages:
//!
//! ```text
//! status check → cost → hit roll → [miss] → compose → mitigate
//!     → crit roll → finalize → reflect → outcome
//! ```
//!
//! The resolver mutates only the two actors it is given and the log. All
//! randomness comes from the caller's `Rng`, so a seeded generator makes
//! every exchange reproducible.

use crate::accumulator::StatAccumulator;
use crate::actor::Actor;
use crate::breakdown::DamageBreakdown;
use crate::config::Rules;
use crate::content::ContentLibrary;
use crate::error::Result;
use crate::growth::GrowthSystem;
use crate::log::{CombatEvent, CombatLog};
use crate::mastery::Masteries;
use crate::probability;
use crate::skill::{self, Action};
use crate::stat_id::names;
use crate::status::{StatusEffect, StatusKind};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// How an action left the fight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Continue,
    AttackerWins,
    DefenderWins,
}

/// Everything one action did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionResult {
    pub action: Action,
    /// The attacker was stunned and lost the action.
    pub stunned: bool,
    pub hit: bool,
    /// Chance the hit roll was made against; 1.0 when a trait bypassed it.
    pub hit_chance: f64,
    pub critical: bool,
    /// Damage dealt to the defender.
    pub damage: u32,
    /// Damage bounced back onto the attacker.
    pub reflected: u32,
    /// HP the defender regenerated after the hit.
    pub regenerated: u32,
    /// HP the attacker recovered by defending.
    pub healed: u32,
    pub bleed_applied: bool,
    /// A class proc multiplied the composed damage.
    pub power_strike: bool,
    pub breakdown: DamageBreakdown,
    pub outcome: Outcome,
}

impl ActionResult {
    fn new(action: &Action) -> Self {
        Self {
            action: action.clone(),
            stunned: false,
            hit: false,
            hit_chance: 0.0,
            critical: false,
            damage: 0,
            reflected: 0,
            regenerated: 0,
            healed: 0,
            bleed_applied: false,
            power_strike: false,
            breakdown: DamageBreakdown::default(),
            outcome: Outcome::Continue,
        }
    }
}

/// Stats one side needs for an exchange, read once per action.
#[derive(Debug, Clone, Copy)]
struct Combatant {
    level: u32,
    dexterity: f64,
    constitution: f64,
    accuracy: f64,
    evasion: f64,
    armor: f64,
    max_hp: u32,
    masteries: Masteries,
}

impl Combatant {
    fn read(growth: &GrowthSystem<'_>, actor: &mut Actor, threshold: i64) -> Self {
        Self {
            level: actor.level(),
            dexterity: growth.get_scaled_stat(actor, names::DEXTERITY) as f64,
            constitution: growth.get_scaled_stat(actor, names::CONSTITUTION) as f64,
            accuracy: growth.rating(actor, names::ACCURACY),
            evasion: growth.rating(actor, names::EVASION),
            armor: growth.rating(actor, names::ARMOR),
            max_hp: actor.resources.max_hp,
            masteries: growth.masteries(actor, threshold),
        }
    }
}

/// Resolves single actions under a ruleset.
///
/// # Examples
///
/// ```rust
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use skirmish::{Action, Actor, CombatLog, ContentLibrary, GrowthSystem, Rules, TurnResolver};
///
/// let rules = Rules::default();
/// let content = ContentLibrary::new();
/// let growth = GrowthSystem::new(&rules.growth);
///
/// let mut alice = Actor::new("alice", "Alice");
/// let mut bob = Actor::new("bob", "Bob");
/// growth.refresh(&mut alice);
/// growth.refresh(&mut bob);
///
/// let resolver = TurnResolver::new(&rules, &content);
/// let mut log = CombatLog::new(rules.combat.log_capacity);
/// let mut rng = ChaCha8Rng::seed_from_u64(7);
///
/// let result = resolver
///     .resolve_action(&mut alice, &mut bob, &Action::BasicAttack, &mut log, &mut rng)
///     .unwrap();
/// if result.hit {
///     assert!(result.damage >= 1);
///     assert_eq!(bob.resources.hp, bob.resources.max_hp - result.damage);
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TurnResolver<'a> {
    rules: &'a Rules,
    content: &'a ContentLibrary,
}

impl<'a> TurnResolver<'a> {
    pub fn new(rules: &'a Rules, content: &'a ContentLibrary) -> Self {
        Self { rules, content }
    }

    pub fn rules(&self) -> &'a Rules {
        self.rules
    }

    pub fn content(&self) -> &'a ContentLibrary {
        self.content
    }

    pub fn growth(&self) -> GrowthSystem<'a> {
        GrowthSystem::new(&self.rules.growth)
    }

    /// Resolve one action of `attacker` against `defender`.
    ///
    /// Unknown skills and unaffordable costs fail before anything is
    /// spent or rolled; the failure is logged and returned, and neither
    /// actor changes.
    pub fn resolve_action(
        &self,
        attacker: &mut Actor,
        defender: &mut Actor,
        action: &Action,
        log: &mut CombatLog,
        rng: &mut impl Rng,
    ) -> Result<ActionResult> {
        let result = self.resolve(attacker, defender, action, log, rng);
        match &result {
            Ok(r) => tracing::debug!(
                attacker = %attacker.id,
                defender = %defender.id,
                action = action.id(),
                hit = r.hit,
                critical = r.critical,
                damage = r.damage,
                reflected = r.reflected,
                outcome = ?r.outcome,
                "resolved action"
            ),
            Err(e) => {
                tracing::debug!(attacker = %attacker.id, action = action.id(), error = %e, "action failed");
                log.push(CombatEvent::ActionFailed {
                    actor: attacker.name.clone(),
                    reason: e.to_string(),
                });
            }
        }
        result
    }

    fn resolve(
        &self,
        attacker: &mut Actor,
        defender: &mut Actor,
        action: &Action,
        log: &mut CombatLog,
        rng: &mut impl Rng,
    ) -> Result<ActionResult> {
        let cfg = &self.rules.combat;
        let growth = self.growth();
        let mut result = ActionResult::new(action);

        // Status check
        if attacker.status.take(StatusKind::Stun).is_some() {
            result.stunned = true;
            log.push(CombatEvent::Stunned {
                actor: attacker.name.clone(),
            });
            return Ok(result);
        }

        // Cost
        match action {
            Action::Defend => {
                let amount = (f64::from(attacker.resources.max_hp) * cfg.defend_heal_fraction) as u32;
                result.healed = attacker.resources.heal(amount);
                log.push(CombatEvent::Defended {
                    actor: attacker.name.clone(),
                    healed: result.healed,
                });
                return Ok(result);
            }
            Action::Skill(id) => {
                let skill = self.content.skill(id)?;
                skill::pay_cost(attacker, &skill.cost)?;
                log.push(CombatEvent::SkillUsed {
                    actor: attacker.name.clone(),
                    skill: skill.name.clone(),
                });
            }
            Action::BasicAttack => {}
        }

        let a = Combatant::read(&growth, attacker, cfg.mastery_threshold);
        let d = Combatant::read(&growth, defender, cfg.mastery_threshold);

        // Hit roll
        let certain = a.masteries.guarantees_hit() || d.masteries.cannot_be_evaded();
        result.hit_chance = if certain {
            1.0
        } else {
            probability::hit_chance(a.accuracy, d.evasion, cfg.eva_factor, cfg.min_hit_chance)
        };
        if !certain && rng.gen::<f64>() >= result.hit_chance {
            log.push(CombatEvent::Missed {
                attacker: attacker.name.clone(),
                defender: defender.name.clone(),
                hit_chance: result.hit_chance,
            });
            return Ok(result);
        }
        result.hit = true;

        // Compose
        let base = skill::base_damage(&growth, self.content, attacker, action)?;
        let bd = &mut result.breakdown;
        bd.add_source(action.id(), base);

        let mut pipeline = StatAccumulator::new(base);
        if a.masteries.stance_bonus() {
            pipeline.add_more(cfg.resolute_more);
        }
        if a.masteries.penetrates_armor() {
            pipeline.add_more(probability::penetration_multiplier(
                a.dexterity,
                cfg.penetration_constant,
            ));
        }
        if cfg.power_strike_classes.contains(&attacker.class_id)
            && rng.gen::<f64>() < cfg.power_strike_chance
        {
            result.power_strike = true;
            pipeline.add_more(cfg.power_strike_more);
            log.push(CombatEvent::PowerStrike {
                actor: attacker.name.clone(),
            });
        }
        let mut damage = pipeline.calculate();
        bd.add_stage("pipeline", damage);

        damage *= cfg.global_damage_scale;
        bd.add_stage("scale", damage);

        let variance = cfg.variance_min + (cfg.variance_max - cfg.variance_min) * rng.gen::<f64>();
        damage *= variance;
        bd.add_stage("variance", damage);

        // Mitigate
        let armor = if d.masteries.amplifies_armor() {
            d.armor * cfg.fortress_armor_multiplier
        } else {
            d.armor
        };
        let dr = probability::defense_dr(armor, a.level, cfg.dr_base_k, cfg.dr_per_level_k);
        let resilience = probability::resilience(d.constitution, cfg.resilience_constant);
        damage *= (1.0 - dr) * (1.0 - resilience);
        bd.add_stage("mitigation", damage);

        if d.masteries.reduces_damage_taken() {
            damage *= cfg.fortress_damage_taken;
            bd.add_stage("fortress", damage);
        }

        // Crit roll
        if !a.masteries.never_crits() {
            let cap = if a.masteries.raises_crit_cap() {
                cfg.crit_chance_cap_specialized
            } else {
                cfg.crit_chance_cap
            };
            let chance = probability::crit_chance(a.dexterity, cfg.crit_chance_factor, cap);
            if rng.gen::<f64>() < chance {
                result.critical = true;
                damage *= probability::crit_multiplier(
                    a.dexterity,
                    cfg.crit_base_multiplier,
                    cfg.crit_multiplier_per_dex,
                    cfg.crit_multiplier_cap,
                );
                bd.add_stage("critical", damage);
            }
        }

        // Finalize
        let mut final_damage = if damage >= 1.0 {
            damage.min(f64::from(u32::MAX)) as u32
        } else {
            1
        };
        if d.masteries.takes_extra_damage() {
            final_damage = (f64::from(final_damage) * cfg.glass_cannon_damage_taken) as u32;
        }
        bd.add_stage("final", f64::from(final_damage));

        // Reflect
        let mut reflected = 0;
        if d.masteries.reflects_damage() && !a.masteries.ignores_reflection() {
            let rate = probability::reflect_rate(d.constitution, cfg.reflect_constant, cfg.reflect_cap)
                * cfg.fortress_reflect_multiplier;
            reflected = (f64::from(final_damage) * rate) as u32;
        }

        // Outcome
        result.damage = defender.resources.take_damage(final_damage);
        result.reflected = attacker.resources.take_damage(reflected);
        log.push(CombatEvent::Hit {
            attacker: attacker.name.clone(),
            defender: defender.name.clone(),
            damage: result.damage,
            critical: result.critical,
        });
        if result.reflected > 0 {
            log.push(CombatEvent::Reflected {
                actor: attacker.name.clone(),
                source: defender.name.clone(),
                damage: result.reflected,
            });
        }

        if defender.is_alive() && d.masteries.regenerates() {
            let amount = (f64::from(d.max_hp) * cfg.fortress_regen_fraction) as u32;
            result.regenerated = defender.resources.heal(amount);
            if result.regenerated > 0 {
                log.push(CombatEvent::Regenerated {
                    actor: defender.name.clone(),
                    amount: result.regenerated,
                });
            }
        }

        if defender.is_alive() && a.masteries.inflicts_bleed() && rng.gen::<f64>() < cfg.bleed_chance {
            let magnitude = ((f64::from(d.max_hp) * cfg.bleed_fraction) as u32).max(1);
            if defender
                .status
                .insert(StatusEffect::bleed(magnitude, cfg.bleed_duration))
            {
                result.bleed_applied = true;
                log.push(CombatEvent::StatusApplied {
                    actor: defender.name.clone(),
                    status: StatusKind::Bleed,
                });
            }
        }

        debug_assert!(defender.resources.hp <= defender.resources.max_hp);
        debug_assert!(attacker.resources.hp <= attacker.resources.max_hp);

        // Defender first: a double knockout goes to the attacker
        result.outcome = if !defender.is_alive() {
            log.push(CombatEvent::Defeated {
                actor: defender.name.clone(),
            });
            if !attacker.is_alive() {
                log.push(CombatEvent::Defeated {
                    actor: attacker.name.clone(),
                });
            }
            Outcome::AttackerWins
        } else if !attacker.is_alive() {
            log.push(CombatEvent::Defeated {
                actor: attacker.name.clone(),
            });
            Outcome::DefenderWins
        } else {
            Outcome::Continue
        };

        Ok(result)
    }
}
