//! Stat identifier module.
//!
//! Provides the `StatId` type, an interned, case-normalized identifier for
//! attributes ("strength") and ratings ("max_hp"). Uses `Arc<str>` so ids
//! are cheap to clone and compare.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::sync::Arc;

/// Interned identifier for attributes and ratings.
///
/// Content data is not consistent about casing ("Strength", "STRENGTH"),
/// so identifiers are lower-cased on construction.
///
/// # Examples
///
/// ```rust
/// use skirmish::StatId;
///
/// let str_id = StatId::from_str("Strength");
/// let str2: StatId = "strength".into();
///
/// assert_eq!(str_id, str2);
/// assert_eq!(str_id.as_str(), "strength");
/// ```
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct StatId(Arc<str>);

impl Serialize for StatId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.as_ref().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for StatId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(StatId::from(s))
    }
}

impl StatId {
    /// Create a new `StatId` from a string slice.
    pub fn from_str(s: &str) -> Self {
        Self(Arc::from(s.trim().to_ascii_lowercase()))
    }

    /// Get the string representation of this `StatId`.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StatId {
    fn from(s: &str) -> Self {
        Self::from_str(s)
    }
}

impl From<String> for StatId {
    fn from(s: String) -> Self {
        Self::from_str(&s)
    }
}

impl std::fmt::Display for StatId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Well-known attribute and rating names.
///
/// Nothing in the engine requires these to exist except where noted on
/// the consuming function; they are the names the default rules use.
pub mod names {
    pub const STRENGTH: &str = "strength";
    pub const DEXTERITY: &str = "dexterity";
    pub const CONSTITUTION: &str = "constitution";
    pub const INTELLIGENCE: &str = "intelligence";
    pub const WISDOM: &str = "wisdom";

    /// The five primary attributes every actor carries.
    pub const PRIMARY: [&str; 5] = [STRENGTH, DEXTERITY, CONSTITUTION, INTELLIGENCE, WISDOM];

    pub const MAX_HP: &str = "max_hp";
    pub const MAX_MP: &str = "max_mp";
    pub const ATTACK_POWER: &str = "attack_power";
    pub const MAGIC_POWER: &str = "magic_power";
    pub const ACCURACY: &str = "accuracy";
    pub const EVASION: &str = "evasion";
    pub const ARMOR: &str = "armor";
    pub const WEAPON_DAMAGE: &str = "weapon_damage";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_id_creation() {
        let id1 = StatId::from_str("strength");
        let id2 = StatId::from_str("strength");
        assert_eq!(id1, id2);
        assert_eq!(id1.as_str(), "strength");
    }

    #[test]
    fn test_stat_id_normalizes_case() {
        let id: StatId = "  DEXTERITY ".into();
        assert_eq!(id.as_str(), "dexterity");
        assert_eq!(id, StatId::from(String::from("Dexterity")));
    }

    #[test]
    fn test_stat_id_serde() {
        let id = StatId::from_str("wisdom");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"wisdom\"");

        let back: StatId = serde_json::from_str("\"WISDOM\"").unwrap();
        assert_eq!(back, id);
    }
}
