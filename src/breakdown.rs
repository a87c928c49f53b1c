//! Damage breakdown.
//!
//! Records how a hit's damage was built, stage by stage, so a driver or
//! a test can see where every point came from.

use serde::{Deserialize, Serialize};

/// Stage-by-stage record of one damage calculation.
///
/// `sources` lists what went into the base value; `stages` lists each
/// step of the pipeline with the running value after that step.
///
/// # Examples
///
/// ```rust
/// use skirmish::DamageBreakdown;
///
/// let mut breakdown = DamageBreakdown::default();
/// breakdown.add_source("weapon damage", 32.5);
/// breakdown.add_stage("stance", 42.25);
/// breakdown.add_stage("scale", 21.125);
///
/// assert_eq!(breakdown.base(), 32.5);
/// assert_eq!(breakdown.stage("stance"), Some(42.25));
/// assert_eq!(breakdown.last(), Some(21.125));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DamageBreakdown {
    /// `(description, contribution)` in the order they were added.
    pub sources: Vec<(String, f64)>,

    /// `(description, value_after_stage)` in the order they were applied.
    pub stages: Vec<(String, f64)>,
}

impl DamageBreakdown {
    pub fn add_source(&mut self, description: impl Into<String>, value: f64) {
        self.sources.push((description.into(), value));
    }

    pub fn add_stage(&mut self, description: impl Into<String>, value: f64) {
        self.stages.push((description.into(), value));
    }

    /// Sum of the sources.
    pub fn base(&self) -> f64 {
        self.sources.iter().map(|(_, v)| v).sum()
    }

    /// Value after the named stage, if it ran.
    pub fn stage(&self, description: &str) -> Option<f64> {
        self.stages
            .iter()
            .find(|(d, _)| d == description)
            .map(|(_, v)| *v)
    }

    pub fn last(&self) -> Option<f64> {
        self.stages.last().map(|(_, v)| *v)
    }
}

impl std::fmt::Display for DamageBreakdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "base {:.2}", self.base())?;
        for (description, value) in &self.stages {
            write!(f, " -> {} {:.2}", description, value)?;
        }
        Ok(())
    }
}
