//! Status effects.
//!
//! Every actor carries a `StatusSet`, empty by default. A set holds at
//! most one effect of each kind.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    /// Skips the afflicted actor's next action.
    Stun,
    /// Loses `magnitude` HP at the start of each of the afflicted actor's turns.
    Bleed,
}

impl std::fmt::Display for StatusKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusKind::Stun => write!(f, "stun"),
            StatusKind::Bleed => write!(f, "bleed"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub kind: StatusKind,
    /// Remaining turns; `None` lasts until consumed or removed.
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub magnitude: Option<u32>,
}

impl StatusEffect {
    pub fn stun() -> Self {
        Self {
            kind: StatusKind::Stun,
            duration: None,
            magnitude: None,
        }
    }

    pub fn bleed(magnitude: u32, duration: u32) -> Self {
        Self {
            kind: StatusKind::Bleed,
            duration: Some(duration),
            magnitude: Some(magnitude),
        }
    }
}

/// The conditions currently affecting an actor.
///
/// # Examples
///
/// ```rust
/// use skirmish::status::{StatusEffect, StatusKind, StatusSet};
///
/// let mut status = StatusSet::default();
/// assert!(status.insert(StatusEffect::stun()));
/// assert!(!status.insert(StatusEffect::stun())); // already stunned
///
/// assert!(status.take(StatusKind::Stun).is_some());
/// assert!(status.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusSet(Vec<StatusEffect>);

impl StatusSet {
    pub fn has(&self, kind: StatusKind) -> bool {
        self.0.iter().any(|e| e.kind == kind)
    }

    pub fn get(&self, kind: StatusKind) -> Option<&StatusEffect> {
        self.0.iter().find(|e| e.kind == kind)
    }

    /// Add an effect unless one of the same kind is already present.
    pub fn insert(&mut self, effect: StatusEffect) -> bool {
        if self.has(effect.kind) {
            return false;
        }
        self.0.push(effect);
        true
    }

    /// Remove and return the effect of the given kind.
    pub fn take(&mut self, kind: StatusKind) -> Option<StatusEffect> {
        let pos = self.0.iter().position(|e| e.kind == kind)?;
        Some(self.0.remove(pos))
    }

    /// Spend one turn of a timed effect.
    ///
    /// Returns the effect as it was before ticking. Effects whose duration
    /// reaches zero are removed; untimed effects are left alone.
    pub fn tick(&mut self, kind: StatusKind) -> Option<StatusEffect> {
        let pos = self.0.iter().position(|e| e.kind == kind)?;
        let before = self.0[pos];
        let expired = match self.0[pos].duration.as_mut() {
            Some(remaining) => {
                *remaining = remaining.saturating_sub(1);
                *remaining == 0
            }
            None => false,
        };
        if expired {
            self.0.remove(pos);
        }
        Some(before)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.0.iter()
    }
}
