//! Attribute growth and derived stats.
//!
//! [`GrowthSystem`] is the only writer of an actor's [`StatCache`]. Reads
//! recompute when the cache is dirty and are otherwise served from it, so
//! any number of reads between two mutations cost one recompute.
//!
//! # Examples
//!
//! ```rust
//! use skirmish::{Actor, GrowthSystem, Rules};
//!
//! let rules = Rules::default();
//! let growth = GrowthSystem::new(&rules.growth);
//! let mut actor = Actor::new("a", "Alice");
//!
//! // 10 + 10 * 0.5 * ln(2) = 13.47, truncated
//! assert_eq!(growth.get_scaled_stat(&mut actor, "strength"), 13);
//! assert_eq!(growth.get_scaled_stat(&mut actor, "luck"), 0);
//! ```
//!
//! [`StatCache`]: crate::cache::StatCache

use crate::actor::Actor;
use crate::config::GrowthConfig;
use crate::mastery::Masteries;
use crate::probability::log_growth;
use crate::stat_id::{names, StatId};
use std::collections::HashMap;

/// Computes derived attributes and ratings for actors.
#[derive(Debug, Clone, Copy)]
pub struct GrowthSystem<'a> {
    config: &'a GrowthConfig,
}

impl<'a> GrowthSystem<'a> {
    pub fn new(config: &'a GrowthConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &'a GrowthConfig {
        self.config
    }

    /// Derived value of an attribute by name. Unknown names read 0.
    pub fn get_scaled_stat(&self, actor: &mut Actor, attribute: &str) -> i64 {
        self.attribute(actor, &StatId::from_str(attribute))
    }

    pub fn attribute(&self, actor: &mut Actor, id: &StatId) -> i64 {
        self.ensure_fresh(actor);
        actor.cache().attribute(id)
    }

    /// Value of a rating formula by name. Unknown ratings read 0.
    pub fn rating(&self, actor: &mut Actor, rating: &str) -> f64 {
        self.ensure_fresh(actor);
        actor.cache().rating(&StatId::from_str(rating))
    }

    pub fn max_hp(&self, actor: &mut Actor) -> u32 {
        to_resource(self.rating(actor, names::MAX_HP)).max(1)
    }

    pub fn max_mp(&self, actor: &mut Actor) -> u32 {
        to_resource(self.rating(actor, names::MAX_MP))
    }

    pub fn attack_power(&self, actor: &mut Actor) -> i64 {
        self.rating(actor, names::ATTACK_POWER) as i64
    }

    pub fn magic_power(&self, actor: &mut Actor) -> i64 {
        self.rating(actor, names::MAGIC_POWER) as i64
    }

    /// Keystones active for `actor`: those granted outright plus those
    /// whose attribute has reached `threshold`.
    pub fn masteries(&self, actor: &mut Actor, threshold: i64) -> Masteries {
        self.ensure_fresh(actor);
        let cache = actor.cache();
        Masteries::resolve(&actor.keystones, threshold, |attr| {
            cache.attribute(&StatId::from_str(attr))
        })
    }

    /// Recompute everything and bring resources back within their maxima.
    ///
    /// Current HP lands in `[1, max_hp]` and MP in `[0, max_mp]`. A value
    /// already in range is kept; a value of zero is treated as
    /// uninitialized and set to the maximum.
    pub fn refresh(&self, actor: &mut Actor) {
        actor.invalidate();
        let max_hp = self.max_hp(actor);
        let max_mp = self.max_mp(actor);

        let r = &mut actor.resources;
        r.max_hp = max_hp;
        r.max_mp = max_mp;
        if r.hp == 0 {
            r.hp = max_hp;
        }
        r.hp = r.hp.min(max_hp);
        if r.mp == 0 {
            r.mp = max_mp;
        }
        r.mp = r.mp.min(max_mp);

        debug_assert!(r.hp >= 1 && r.hp <= r.max_hp);
        tracing::debug!(
            actor = %actor.id,
            level = actor.level(),
            max_hp,
            max_mp,
            "refreshed resources"
        );
    }

    /// Move `actor` to `level`, clamped to `[1, max_level]`, and refresh.
    ///
    /// Returns the level actually applied.
    pub fn set_level(&self, actor: &mut Actor, level: u32) -> u32 {
        let level = level.clamp(1, self.config.max_level);
        if level != actor.level() {
            actor.set_level_unchecked(level);
        }
        self.refresh(actor);
        level
    }

    /// Gain one level. Returns `false` at the level cap.
    pub fn level_up(&self, actor: &mut Actor) -> bool {
        if actor.level() >= self.config.max_level {
            return false;
        }
        let level = self.set_level(actor, actor.level() + 1);
        tracing::info!(actor = %actor.id, level, "level up");
        true
    }

    fn ensure_fresh(&self, actor: &mut Actor) {
        debug_assert!(
            actor.cache().is_dirty() || actor.cache().revision() == actor.equipment_revision(),
            "derived stats of '{}' read after an equipment change without invalidation",
            actor.id
        );
        if actor.cache().is_dirty() {
            self.recompute(actor);
        }
    }

    fn recompute(&self, actor: &mut Actor) {
        let level = actor.level();
        let mut scaled: HashMap<StatId, f64> = HashMap::new();

        for id in &self.config.tracked_attributes {
            let base = actor
                .base_stats()
                .get(id)
                .copied()
                .unwrap_or(self.config.default_attribute);
            scaled.insert(
                id.clone(),
                log_growth(base as f64, level, self.config.growth_rate),
            );
        }

        // Bonuses on attributes without growth still count, on a base of 0
        for item in actor.equipment().iter() {
            for (stat, bonus) in &item.bonus_stats {
                *scaled.entry(stat.clone()).or_insert(0.0) += *bonus as f64;
            }
        }

        let attributes: HashMap<StatId, i64> = scaled
            .into_iter()
            .map(|(id, value)| (id, value.trunc() as i64))
            .collect();
        let ratings = self.config.formulas.evaluate_all(level, &attributes);

        tracing::trace!(actor = %actor.id, level, "recomputed derived stats");
        let revision = actor.equipment_revision();
        actor.cache_mut().store(attributes, ratings, revision);
    }
}

fn to_resource(value: f64) -> u32 {
    if value <= 0.0 {
        0
    } else {
        value.min(f64::from(u32::MAX)) as u32
    }
}
