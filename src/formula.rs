//! Rating formulas.
//!
//! Ratings (max HP, accuracy, armor, ...) are sums of simple terms over
//! derived attributes and level. They are declared as data so a ruleset
//! can be swapped without touching the engine, and they may read each
//! other; [`FormulaSet`] orders them with a [`FormulaGraph`].

use crate::error::CombatError;
use crate::graph::FormulaGraph;
use crate::stat_id::{names, StatId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// One additive term of a rating formula.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Term {
    /// A fixed amount.
    Constant { value: f64 },
    /// `coeff * stat`
    Stat { stat: StatId, coeff: f64 },
    /// `coeff * stat ^ exponent`; negative stats count as zero.
    Power {
        stat: StatId,
        exponent: f64,
        coeff: f64,
    },
    /// `coeff * level`
    Level { coeff: f64 },
    /// `coeff * level * ln(level + 1)`
    LevelLog { coeff: f64 },
}

impl Term {
    pub fn constant(value: f64) -> Self {
        Term::Constant { value }
    }

    pub fn stat(stat: &str, coeff: f64) -> Self {
        Term::Stat {
            stat: StatId::from_str(stat),
            coeff,
        }
    }

    pub fn power(stat: &str, exponent: f64, coeff: f64) -> Self {
        Term::Power {
            stat: StatId::from_str(stat),
            exponent,
            coeff,
        }
    }

    pub fn level(coeff: f64) -> Self {
        Term::Level { coeff }
    }

    pub fn level_log(coeff: f64) -> Self {
        Term::LevelLog { coeff }
    }

    /// The stat this term reads, if any.
    pub fn reads(&self) -> Option<&StatId> {
        match self {
            Term::Stat { stat, .. } | Term::Power { stat, .. } => Some(stat),
            _ => None,
        }
    }

    fn evaluate(&self, level: u32, lookup: &impl Fn(&StatId) -> f64) -> f64 {
        let level = f64::from(level);
        match self {
            Term::Constant { value } => *value,
            Term::Stat { stat, coeff } => coeff * lookup(stat),
            Term::Power {
                stat,
                exponent,
                coeff,
            } => coeff * lookup(stat).max(0.0).powf(*exponent),
            Term::Level { coeff } => coeff * level,
            Term::LevelLog { coeff } => coeff * level * (level + 1.0).ln(),
        }
    }
}

/// A rating formula: the sum of its terms, optionally floored and
/// truncated to an integer.
///
/// # Examples
///
/// ```rust
/// use skirmish::formula::{Formula, Term};
///
/// // max(20, wis^2 / 5.5)
/// let max_mp = Formula::new(vec![Term::power("wisdom", 2.0, 1.0 / 5.5)])
///     .with_floor(20.0)
///     .integral();
///
/// assert_eq!(max_mp.evaluate(1, |_| 13.0), 30.0);
/// assert_eq!(max_mp.evaluate(1, |_| 5.0), 20.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Formula {
    pub terms: Vec<Term>,
    #[serde(default)]
    pub floor: Option<f64>,
    #[serde(default)]
    pub integral: bool,
}

impl Formula {
    pub fn new(terms: Vec<Term>) -> Self {
        Self {
            terms,
            floor: None,
            integral: false,
        }
    }

    pub fn with_floor(mut self, floor: f64) -> Self {
        self.floor = Some(floor);
        self
    }

    /// Truncate the result toward zero.
    pub fn integral(mut self) -> Self {
        self.integral = true;
        self
    }

    pub fn evaluate(&self, level: u32, lookup: impl Fn(&StatId) -> f64) -> f64 {
        let sum: f64 = self.terms.iter().map(|t| t.evaluate(level, &lookup)).sum();
        let floored = match self.floor {
            Some(floor) => sum.max(floor),
            None => sum,
        };
        if self.integral {
            floored.trunc()
        } else {
            floored
        }
    }
}

/// A validated set of rating formulas with a fixed evaluation order.
///
/// Construction fails with [`CombatError::Cycle`] if formulas read each
/// other in a loop. Terms that name something other than a rating in the
/// set are treated as attribute reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<StatId, Formula>",
    into = "BTreeMap<StatId, Formula>"
)]
pub struct FormulaSet {
    formulas: BTreeMap<StatId, Formula>,
    order: Vec<StatId>,
}

impl FormulaSet {
    pub fn new(formulas: BTreeMap<StatId, Formula>) -> Result<Self, CombatError> {
        let order = Self::evaluation_order(&formulas)?;
        Ok(Self { formulas, order })
    }

    /// Order ratings so every rating comes after the ratings it reads.
    fn evaluation_order(formulas: &BTreeMap<StatId, Formula>) -> Result<Vec<StatId>, CombatError> {
        let mut graph = FormulaGraph::new();
        for (id, formula) in formulas {
            graph.add_node(id.clone());
            for read in formula.terms.iter().filter_map(Term::reads) {
                if formulas.contains_key(read) {
                    graph.add_dependency(id.clone(), read.clone());
                }
            }
        }
        graph.evaluation_order()
    }

    /// The default ruleset's ratings.
    ///
    /// | rating | formula |
    /// |---|---|
    /// | `max_hp` | `trunc(50 + 40·con + 5·lv·ln(lv+1))` |
    /// | `max_mp` | `trunc(max(20, wis² / 5.5))` |
    /// | `attack_power` | `trunc(2.5·str + 0.5·dex + 2·lv)` |
    /// | `magic_power` | `trunc(int^1.5 / 2 + 0.8·wis)` |
    /// | `accuracy` | `3·dex + 0.5·str` |
    /// | `evasion` | `2·dex` |
    /// | `armor` | `1.5·con + 0.2·str` |
    /// | `weapon_damage` | `2·str + 0.5·dex` |
    pub fn standard() -> Self {
        use names::*;

        let formulas: BTreeMap<StatId, Formula> = [
            (
                MAX_HP,
                Formula::new(vec![
                    Term::constant(50.0),
                    Term::stat(CONSTITUTION, 40.0),
                    Term::level_log(5.0),
                ])
                .integral(),
            ),
            (
                MAX_MP,
                Formula::new(vec![Term::power(WISDOM, 2.0, 1.0 / 5.5)])
                    .with_floor(20.0)
                    .integral(),
            ),
            (
                ATTACK_POWER,
                Formula::new(vec![
                    Term::stat(STRENGTH, 2.5),
                    Term::stat(DEXTERITY, 0.5),
                    Term::level(2.0),
                ])
                .integral(),
            ),
            (
                MAGIC_POWER,
                Formula::new(vec![
                    Term::power(INTELLIGENCE, 1.5, 0.5),
                    Term::stat(WISDOM, 0.8),
                ])
                .integral(),
            ),
            (
                ACCURACY,
                Formula::new(vec![Term::stat(DEXTERITY, 3.0), Term::stat(STRENGTH, 0.5)]),
            ),
            (EVASION, Formula::new(vec![Term::stat(DEXTERITY, 2.0)])),
            (
                ARMOR,
                Formula::new(vec![
                    Term::stat(CONSTITUTION, 1.5),
                    Term::stat(STRENGTH, 0.2),
                ]),
            ),
            (
                WEAPON_DAMAGE,
                Formula::new(vec![Term::stat(STRENGTH, 2.0), Term::stat(DEXTERITY, 0.5)]),
            ),
        ]
        .into_iter()
        .map(|(id, f)| (StatId::from_str(id), f))
        .collect();

        // No standard rating reads another, so the graph has no cycle to report
        let order = Self::evaluation_order(&formulas)
            .unwrap_or_else(|_| formulas.keys().cloned().collect());
        Self { formulas, order }
    }

    pub fn get(&self, id: &StatId) -> Option<&Formula> {
        self.formulas.get(id)
    }

    pub fn len(&self) -> usize {
        self.formulas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formulas.is_empty()
    }

    /// Rating ids in evaluation order.
    pub fn order(&self) -> &[StatId] {
        &self.order
    }

    /// Evaluate every rating against a set of derived attributes.
    ///
    /// Rating reads take precedence over attribute reads of the same name;
    /// anything unknown reads as zero.
    pub fn evaluate_all(
        &self,
        level: u32,
        attributes: &HashMap<StatId, i64>,
    ) -> HashMap<StatId, f64> {
        let mut ratings: HashMap<StatId, f64> = HashMap::with_capacity(self.formulas.len());
        for id in &self.order {
            let formula = &self.formulas[id];
            let value = formula.evaluate(level, |stat| {
                ratings
                    .get(stat)
                    .copied()
                    .or_else(|| attributes.get(stat).map(|v| *v as f64))
                    .unwrap_or(0.0)
            });
            ratings.insert(id.clone(), value);
        }
        ratings
    }
}

impl Default for FormulaSet {
    fn default() -> Self {
        Self::standard()
    }
}

impl TryFrom<BTreeMap<StatId, Formula>> for FormulaSet {
    type Error = CombatError;

    fn try_from(formulas: BTreeMap<StatId, Formula>) -> Result<Self, Self::Error> {
        Self::new(formulas)
    }
}

impl From<FormulaSet> for BTreeMap<StatId, Formula> {
    fn from(set: FormulaSet) -> Self {
        set.formulas
    }
}
