//! Combat events and the bounded log that keeps them.

use crate::session::Side;
use crate::status::StatusKind;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Something that happened during an encounter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CombatEvent {
    Stunned {
        actor: String,
    },
    SkillUsed {
        actor: String,
        skill: String,
    },
    PowerStrike {
        actor: String,
    },
    Missed {
        attacker: String,
        defender: String,
        hit_chance: f64,
    },
    Hit {
        attacker: String,
        defender: String,
        damage: u32,
        critical: bool,
    },
    /// `actor` took `damage` bounced back by `source`.
    Reflected {
        actor: String,
        source: String,
        damage: u32,
    },
    Regenerated {
        actor: String,
        amount: u32,
    },
    StatusApplied {
        actor: String,
        status: StatusKind,
    },
    StatusDamage {
        actor: String,
        status: StatusKind,
        damage: u32,
    },
    Defended {
        actor: String,
        healed: u32,
    },
    /// A recoverable failure; nothing was spent or changed.
    ActionFailed {
        actor: String,
        reason: String,
    },
    Defeated {
        actor: String,
    },
    /// `winner` is `None` for a draw.
    Finished {
        winner: Option<Side>,
        rounds: u32,
    },
}

impl std::fmt::Display for CombatEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CombatEvent::Stunned { actor } => write!(f, "{} is stunned and cannot act", actor),
            CombatEvent::SkillUsed { actor, skill } => write!(f, "{} uses {}", actor, skill),
            CombatEvent::PowerStrike { actor } => write!(f, "{} unleashes a Power Strike", actor),
            CombatEvent::Missed {
                attacker,
                defender,
                hit_chance,
            } => write!(
                f,
                "{} misses {} ({:.0}% to hit)",
                attacker,
                defender,
                hit_chance * 100.0
            ),
            CombatEvent::Hit {
                attacker,
                defender,
                damage,
                critical: true,
            } => write!(f, "CRITICAL! {} hits {} for {}", attacker, defender, damage),
            CombatEvent::Hit {
                attacker,
                defender,
                damage,
                ..
            } => write!(f, "{} hits {} for {}", attacker, defender, damage),
            CombatEvent::Reflected {
                actor,
                source,
                damage,
            } => write!(f, "{} takes {} reflected by {}", actor, damage, source),
            CombatEvent::Regenerated { actor, amount } => {
                write!(f, "{} regenerates {} HP", actor, amount)
            }
            CombatEvent::StatusApplied { actor, status } => {
                write!(f, "{} is afflicted with {}", actor, status)
            }
            CombatEvent::StatusDamage {
                actor,
                status,
                damage,
            } => write!(f, "{} takes {} from {}", actor, damage, status),
            CombatEvent::Defended { actor, healed } => {
                write!(f, "{} braces and recovers {} HP", actor, healed)
            }
            CombatEvent::ActionFailed { actor, reason } => write!(f, "{}: {}", actor, reason),
            CombatEvent::Defeated { actor } => write!(f, "{} is defeated", actor),
            CombatEvent::Finished {
                winner: Some(side),
                rounds,
            } => write!(f, "{} win after {} rounds", side, rounds),
            CombatEvent::Finished { winner: None, rounds } => {
                write!(f, "Draw after {} rounds", rounds)
            }
        }
    }
}

/// Fixed-capacity event log; the oldest entry is evicted first.
///
/// # Examples
///
/// ```rust
/// use skirmish::log::{CombatEvent, CombatLog};
///
/// let mut log = CombatLog::new(2);
/// for actor in ["a", "b", "c"] {
///     log.push(CombatEvent::Defeated { actor: actor.into() });
/// }
///
/// assert_eq!(log.len(), 2);
/// assert_eq!(log.total(), 3);
/// assert_eq!(log.lines(), vec!["b is defeated", "c is defeated"]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatLog {
    entries: VecDeque<CombatEvent>,
    capacity: usize,
    /// Events pushed over the log's lifetime, evicted ones included.
    total: u64,
}

impl CombatLog {
    /// A log holding at most `capacity` events (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            total: 0,
        }
    }

    pub fn push(&mut self, event: CombatEvent) {
        tracing::trace!(%event, "combat event");
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(event);
        self.total += 1;
    }

    pub fn iter(&self) -> impl Iterator<Item = &CombatEvent> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&CombatEvent> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Owned copy of the retained events, oldest first.
    pub fn snapshot(&self) -> Vec<CombatEvent> {
        self.entries.iter().cloned().collect()
    }

    /// Retained events rendered as text, oldest first.
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }
}

impl Default for CombatLog {
    fn default() -> Self {
        Self::new(10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eviction_keeps_newest() {
        let mut log = CombatLog::new(3);
        for i in 0..5u32 {
            log.push(CombatEvent::Regenerated {
                actor: "a".into(),
                amount: i,
            });
        }
        assert_eq!(log.len(), 3);
        assert_eq!(
            log.iter().next(),
            Some(&CombatEvent::Regenerated {
                actor: "a".into(),
                amount: 2
            })
        );
        assert_eq!(
            log.latest(),
            Some(&CombatEvent::Regenerated {
                actor: "a".into(),
                amount: 4
            })
        );
    }

    #[test]
    fn test_zero_capacity_holds_one() {
        let mut log = CombatLog::new(0);
        log.push(CombatEvent::Stunned { actor: "a".into() });
        log.push(CombatEvent::Stunned { actor: "b".into() });
        assert_eq!(log.capacity(), 1);
        assert_eq!(log.snapshot(), vec![CombatEvent::Stunned { actor: "b".into() }]);
    }

    #[test]
    fn test_event_text() {
        let hit = CombatEvent::Hit {
            attacker: "Alice".into(),
            defender: "Bob".into(),
            damage: 12,
            critical: true,
        };
        assert_eq!(hit.to_string(), "CRITICAL! Alice hits Bob for 12");

        let draw = CombatEvent::Finished {
            winner: None,
            rounds: 100,
        };
        assert_eq!(draw.to_string(), "Draw after 100 rounds");

        let miss = CombatEvent::Missed {
            attacker: "Alice".into(),
            defender: "Bob".into(),
            hit_chance: 0.6,
        };
        assert_eq!(miss.to_string(), "Alice misses Bob (60% to hit)");

        let proc = CombatEvent::PowerStrike { actor: "Alice".into() };
        assert_eq!(proc.to_string(), "Alice unleashes a Power Strike");
    }

    #[test]
    fn test_event_serde_tag() {
        let event = CombatEvent::Defeated { actor: "Bob".into() };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "defeated");
        assert_eq!(json["actor"], "Bob");
    }
}
