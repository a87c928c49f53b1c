//! Ruleset configuration.
//!
//! All tuning constants live here so a ruleset can be replaced without
//! touching the engine. Every field has a default; a JSON document only
//! needs to name what it overrides.

use crate::error::CombatError;
use crate::formula::FormulaSet;
use crate::stat_id::{names, StatId};
use serde::{Deserialize, Serialize};

/// The complete ruleset handed to the growth system and the resolver.
///
/// # Examples
///
/// ```rust
/// use skirmish::Rules;
///
/// let rules = Rules::from_json(r#"{ "combat": { "min_hit_chance": 0.75 } }"#).unwrap();
/// assert_eq!(rules.combat.min_hit_chance, 0.75);
/// // Untouched fields keep their defaults
/// assert_eq!(rules.combat.eva_factor, 0.55);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    pub growth: GrowthConfig,
    pub combat: CombatConfig,
}

impl Rules {
    /// Parse and validate a ruleset from JSON.
    pub fn from_json(json: &str) -> Result<Self, CombatError> {
        let rules: Rules =
            serde_json::from_str(json).map_err(|e| CombatError::InvalidConfig(e.to_string()))?;
        rules.validate()?;
        Ok(rules)
    }

    /// Reject values that would break an invariant of the engine.
    pub fn validate(&self) -> Result<(), CombatError> {
        self.growth.validate()?;
        self.combat.validate()
    }
}

/// Attribute growth and rating formulas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthConfig {
    /// Multiplier on `ln(level + 1)` in the level-growth formula.
    pub growth_rate: f64,
    /// Attributes that receive level growth.
    pub tracked_attributes: Vec<StatId>,
    /// Value given to a tracked attribute an actor doesn't define.
    pub default_attribute: i64,
    pub max_level: u32,
    pub formulas: FormulaSet,
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self {
            growth_rate: 0.5,
            tracked_attributes: names::PRIMARY.iter().map(|s| StatId::from_str(s)).collect(),
            default_attribute: 10,
            max_level: 50,
            formulas: FormulaSet::standard(),
        }
    }
}

impl GrowthConfig {
    fn validate(&self) -> Result<(), CombatError> {
        if self.max_level == 0 {
            return Err(CombatError::InvalidConfig("max_level must be at least 1".into()));
        }
        if !self.growth_rate.is_finite() {
            return Err(CombatError::InvalidConfig("growth_rate must be finite".into()));
        }
        for required in [names::MAX_HP, names::MAX_MP] {
            if self.formulas.get(&StatId::from_str(required)).is_none() {
                return Err(CombatError::InvalidConfig(format!(
                    "formulas must define '{}'",
                    required
                )));
            }
        }
        Ok(())
    }
}

/// Combat constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    // Hit
    pub eva_factor: f64,
    pub min_hit_chance: f64,

    // Damage
    pub global_damage_scale: f64,
    pub variance_min: f64,
    pub variance_max: f64,

    // Mitigation
    pub dr_base_k: f64,
    pub dr_per_level_k: f64,
    pub resilience_constant: f64,

    // Critical
    pub crit_chance_factor: f64,
    pub crit_chance_cap: f64,
    pub crit_chance_cap_specialized: f64,
    pub crit_base_multiplier: f64,
    pub crit_multiplier_per_dex: f64,
    pub crit_multiplier_cap: f64,

    // Reflection
    pub reflect_constant: f64,
    pub reflect_cap: f64,

    // Masteries
    pub mastery_threshold: i64,
    pub resolute_more: f64,
    pub penetration_constant: f64,
    pub fortress_armor_multiplier: f64,
    pub fortress_damage_taken: f64,
    pub fortress_reflect_multiplier: f64,
    pub fortress_regen_fraction: f64,
    pub glass_cannon_damage_taken: f64,

    // Class procs
    /// Classes whose attacks can land a Power Strike.
    pub power_strike_classes: Vec<String>,
    pub power_strike_chance: f64,
    pub power_strike_more: f64,

    // Status effects
    pub bleed_chance: f64,
    pub bleed_fraction: f64,
    pub bleed_duration: u32,

    // Actions
    pub defend_heal_fraction: f64,

    // Session
    pub initiative_dex_weight: f64,
    pub initiative_die: u32,
    pub max_rounds: u32,
    pub log_capacity: usize,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            eva_factor: 0.55,
            min_hit_chance: 0.60,

            global_damage_scale: 0.50,
            variance_min: 0.95,
            variance_max: 1.05,

            dr_base_k: 400.0,
            dr_per_level_k: 85.0,
            resilience_constant: 120.0,

            crit_chance_factor: 0.012,
            crit_chance_cap: 0.40,
            crit_chance_cap_specialized: 0.80,
            crit_base_multiplier: 1.5,
            crit_multiplier_per_dex: 0.015,
            crit_multiplier_cap: 2.5,

            reflect_constant: 100.0,
            reflect_cap: 0.25,

            mastery_threshold: 20,
            resolute_more: 1.30,
            penetration_constant: 40.0,
            fortress_armor_multiplier: 1.5,
            fortress_damage_taken: 0.90,
            fortress_reflect_multiplier: 1.5,
            fortress_regen_fraction: 0.03,
            glass_cannon_damage_taken: 1.15,

            power_strike_classes: vec!["warrior".into()],
            power_strike_chance: 0.15,
            power_strike_more: 1.5,

            bleed_chance: 0.20,
            bleed_fraction: 0.03,
            bleed_duration: 3,

            defend_heal_fraction: 0.10,

            initiative_dex_weight: 1.0,
            initiative_die: 20,
            max_rounds: 100,
            log_capacity: 10,
        }
    }
}

impl CombatConfig {
    fn validate(&self) -> Result<(), CombatError> {
        let unit = |name: &str, v: f64| {
            if (0.0..=1.0).contains(&v) {
                Ok(())
            } else {
                Err(CombatError::InvalidConfig(format!(
                    "{} must be within [0, 1], got {}",
                    name, v
                )))
            }
        };
        unit("min_hit_chance", self.min_hit_chance)?;
        unit("crit_chance_cap", self.crit_chance_cap)?;
        unit("crit_chance_cap_specialized", self.crit_chance_cap_specialized)?;
        unit("reflect_cap", self.reflect_cap)?;
        unit("bleed_chance", self.bleed_chance)?;
        unit("power_strike_chance", self.power_strike_chance)?;

        if self.variance_min >= self.variance_max {
            return Err(CombatError::InvalidConfig(
                "variance_min must be below variance_max".into(),
            ));
        }
        if self.dr_base_k <= 0.0 || self.dr_per_level_k < 0.0 {
            return Err(CombatError::InvalidConfig(
                "damage reduction constants must keep K positive".into(),
            ));
        }
        if self.initiative_die == 0 || self.max_rounds == 0 || self.log_capacity == 0 {
            return Err(CombatError::InvalidConfig(
                "initiative_die, max_rounds and log_capacity must be positive".into(),
            ));
        }
        Ok(())
    }
}
