//! Derived-stat cache.
//!
//! The cache is two fields, the computed values and a dirty flag, with a
//! single invalidation entry point. Only the growth system fills it
//! (see [`GrowthSystem`](crate::growth::GrowthSystem)); everything else
//! either invalidates it or reads through the growth system, which
//! recomputes first when dirty.

use crate::stat_id::StatId;
use std::collections::HashMap;

/// Per-actor cache of derived attributes and ratings.
///
/// A fresh cache starts dirty, so the first read always computes. The
/// cache is not serialized; a restored actor recomputes on first read.
#[derive(Debug, Clone, PartialEq)]
pub struct StatCache {
    attributes: HashMap<StatId, i64>,
    ratings: HashMap<StatId, f64>,
    dirty: bool,
    /// Equipment revision the values were computed against.
    revision: u64,
}

impl Default for StatCache {
    fn default() -> Self {
        Self {
            attributes: HashMap::new(),
            ratings: HashMap::new(),
            dirty: true,
            revision: 0,
        }
    }
}

impl StatCache {
    /// Mark every cached value stale.
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub(crate) fn store(
        &mut self,
        attributes: HashMap<StatId, i64>,
        ratings: HashMap<StatId, f64>,
        revision: u64,
    ) {
        self.attributes = attributes;
        self.ratings = ratings;
        self.revision = revision;
        self.dirty = false;
    }

    pub(crate) fn revision(&self) -> u64 {
        self.revision
    }

    /// Cached attribute value without recomputing.
    ///
    /// Returns `None` when dirty; go through the growth system to read a
    /// guaranteed-fresh value.
    pub fn peek_attribute(&self, id: &StatId) -> Option<i64> {
        if self.dirty {
            return None;
        }
        Some(self.attributes.get(id).copied().unwrap_or(0))
    }

    pub(crate) fn attribute(&self, id: &StatId) -> i64 {
        self.attributes.get(id).copied().unwrap_or(0)
    }

    pub(crate) fn rating(&self, id: &StatId) -> f64 {
        self.ratings.get(id).copied().unwrap_or(0.0)
    }

    pub(crate) fn attributes(&self) -> &HashMap<StatId, i64> {
        &self.attributes
    }
}
