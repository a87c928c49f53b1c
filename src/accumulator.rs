//! Damage pipeline module.
//!
//! `StatAccumulator` composes a base value through three modifier phases
//! in a fixed order: flat additions, summed "increased" fractions, and
//! compounding "more" multipliers.
//!
//! ```text
//! (base + Σ flat) × (1 + Σ increased) × Π more
//! ```
//!
//! The order is part of the numeric contract. All additive resolution
//! happens before any multiplicative resolution.

use serde::{Deserialize, Serialize};

/// Phase a modifier is applied in.
///
/// Phases are applied in declaration order. Within `Flat` and `Increased`
/// modifiers sum, so their order does not matter; `More` factors are
/// applied in insertion order.
///
/// # Examples
///
/// ```rust
/// use skirmish::accumulator::ModifierPhase;
///
/// assert!(ModifierPhase::Flat < ModifierPhase::Increased);
/// assert!(ModifierPhase::Increased < ModifierPhase::More);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ModifierPhase {
    /// Added to the base before any scaling.
    Flat,
    /// Summed percentage, e.g. `0.2` for 20% increased.
    Increased,
    /// Compounding multiplier, e.g. `1.3` for 30% more.
    More,
}

/// Transient accumulator for the Base → Flat → Increased → More pipeline.
///
/// Constructed per computation and discarded after [`calculate`](Self::calculate).
/// There are no error conditions; intermediate values may be negative and
/// callers clamp the final result where it matters.
///
/// # Examples
///
/// ```rust
/// use skirmish::StatAccumulator;
///
/// let mut acc = StatAccumulator::new(50.0);
/// acc.add_flat(10.0).add_increased(0.5).add_more(2.0);
///
/// // (50 + 10) * 1.5 * 2.0
/// assert_eq!(acc.calculate(), 180.0);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StatAccumulator {
    base: f64,
    flat: f64,
    increased: f64,
    more: Vec<f64>,
}

impl StatAccumulator {
    /// Create an accumulator with no modifiers.
    pub fn new(base: f64) -> Self {
        Self {
            base,
            ..Self::default()
        }
    }

    /// Add a flat bonus (summed with other flat bonuses).
    pub fn add_flat(&mut self, value: f64) -> &mut Self {
        self.flat += value;
        self
    }

    /// Add an "increased" fraction (summed with other increases).
    pub fn add_increased(&mut self, fraction: f64) -> &mut Self {
        self.increased += fraction;
        self
    }

    /// Append a "more" multiplier.
    pub fn add_more(&mut self, factor: f64) -> &mut Self {
        self.more.push(factor);
        self
    }

    /// Add a modifier by phase.
    ///
    /// `Increased` values are fractions and `More` values are factors,
    /// matching the dedicated methods.
    pub fn add(&mut self, phase: ModifierPhase, value: f64) -> &mut Self {
        match phase {
            ModifierPhase::Flat => self.add_flat(value),
            ModifierPhase::Increased => self.add_increased(value),
            ModifierPhase::More => self.add_more(value),
        }
    }

    pub fn base(&self) -> f64 {
        self.base
    }

    pub fn flat(&self) -> f64 {
        self.flat
    }

    pub fn increased(&self) -> f64 {
        self.increased
    }

    /// The "more" factors in insertion order.
    pub fn more(&self) -> &[f64] {
        &self.more
    }

    /// Evaluate the pipeline.
    pub fn calculate(&self) -> f64 {
        let mut value = (self.base + self.flat) * (1.0 + self.increased);
        for factor in &self.more {
            value *= factor;
        }
        value
    }

    /// The running value after each phase, in phase order.
    ///
    /// Useful for breakdowns: the last entry always equals
    /// [`calculate`](Self::calculate).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use skirmish::StatAccumulator;
    /// use skirmish::accumulator::ModifierPhase;
    ///
    /// let mut acc = StatAccumulator::new(10.0);
    /// acc.add_flat(5.0).add_increased(1.0).add_more(3.0);
    ///
    /// let phases = acc.phase_values();
    /// assert_eq!(phases[0], (ModifierPhase::Flat, 15.0));
    /// assert_eq!(phases[1], (ModifierPhase::Increased, 30.0));
    /// assert_eq!(phases[2], (ModifierPhase::More, 90.0));
    /// ```
    pub fn phase_values(&self) -> [(ModifierPhase, f64); 3] {
        let after_flat = self.base + self.flat;
        let after_increased = after_flat * (1.0 + self.increased);
        let after_more = self.more.iter().fold(after_increased, |v, m| v * m);
        [
            (ModifierPhase::Flat, after_flat),
            (ModifierPhase::Increased, after_increased),
            (ModifierPhase::More, after_more),
        ]
    }
}
