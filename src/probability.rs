//! Probability and mitigation formulas.
//!
//! Everything here is a pure function of its arguments: no hidden state,
//! no randomness. Constants are passed in by the caller (normally from
//! [`CombatConfig`](crate::config::CombatConfig)) so each formula can be
//! checked against literal input/output pairs.

/// Chance for an attack to land.
///
/// `accuracy / (accuracy + evasion * eva_factor)`, clamped to
/// `[min_chance, 1.0]`. Non-positive accuracy short-circuits to
/// `min_chance`.
///
/// # Examples
///
/// ```rust
/// use skirmish::probability::hit_chance;
///
/// assert_eq!(hit_chance(100.0, 0.0, 0.55, 0.60), 1.0);
/// assert_eq!(hit_chance(0.0, 50.0, 0.55, 0.60), 0.60);
/// ```
pub fn hit_chance(accuracy: f64, evasion: f64, eva_factor: f64, min_chance: f64) -> f64 {
    if accuracy <= 0.0 {
        return min_chance;
    }
    let denominator = accuracy + evasion.max(0.0) * eva_factor;
    (accuracy / denominator).clamp(min_chance, 1.0)
}

/// Hyperbolic damage reduction.
///
/// `armor / (armor + K)` with `K = base_k + per_level_k * attacker_level`.
/// Higher attacker levels raise `K`, so the same armor blocks less.
///
/// # Examples
///
/// ```rust
/// use skirmish::probability::defense_dr;
///
/// // K = 400 + 85 * 20 = 2100
/// let dr = defense_dr(100.0, 20, 400.0, 85.0);
/// assert!((dr - 100.0 / 2200.0).abs() < 1e-12);
/// assert_eq!(defense_dr(0.0, 20, 400.0, 85.0), 0.0);
/// ```
pub fn defense_dr(armor: f64, attacker_level: u32, base_k: f64, per_level_k: f64) -> f64 {
    if armor <= 0.0 {
        return 0.0;
    }
    let k = base_k + per_level_k * f64::from(attacker_level);
    armor / (armor + k)
}

/// Critical strike chance, `min(cap, dexterity * factor)`, never negative.
pub fn crit_chance(dexterity: f64, factor: f64, cap: f64) -> f64 {
    (dexterity * factor).clamp(0.0, cap)
}

/// Critical damage multiplier, `min(cap, base + dexterity * per_point)`.
pub fn crit_multiplier(dexterity: f64, base: f64, per_point: f64, cap: f64) -> f64 {
    (base + dexterity.max(0.0) * per_point).min(cap)
}

/// Constitution-based resilience fraction, `con / (con + constant)`.
///
/// Used both as an extra mitigation layer and as the reflection base.
pub fn resilience(constitution: f64, constant: f64) -> f64 {
    if constitution <= 0.0 {
        return 0.0;
    }
    constitution / (constitution + constant)
}

/// Share of final damage reflected back, `min(cap, resilience)`.
pub fn reflect_rate(constitution: f64, constant: f64, cap: f64) -> f64 {
    resilience(constitution, constant).min(cap)
}

/// Armor penetration multiplier, `1 + dex / (dex + constant)`.
///
/// Approaches 2.0 as dexterity grows.
pub fn penetration_multiplier(dexterity: f64, constant: f64) -> f64 {
    1.0 + resilience(dexterity, constant)
}

/// Logarithmic level growth, `base + base * rate * ln(level + 1)`.
///
/// # Examples
///
/// ```rust
/// use skirmish::probability::log_growth;
///
/// // Level 0 has no growth
/// assert_eq!(log_growth(10.0, 0, 0.5), 10.0);
/// assert!((log_growth(10.0, 1, 0.5) - (10.0 + 5.0 * 2f64.ln())).abs() < 1e-12);
/// ```
pub fn log_growth(base: f64, level: u32, rate: f64) -> f64 {
    base + base * rate * (f64::from(level) + 1.0).ln()
}

/// Initiative score, `dexterity * weight + roll`.
pub fn initiative(dexterity: f64, weight: f64, roll: u32) -> f64 {
    dexterity * weight + f64::from(roll)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EVA_FACTOR: f64 = 0.55;
    const MIN_HIT: f64 = 0.60;

    #[test]
    fn test_hit_chance_no_evasion_is_certain() {
        assert_eq!(hit_chance(100.0, 0.0, EVA_FACTOR, MIN_HIT), 1.0);
    }

    #[test]
    fn test_hit_chance_formula() {
        // 90 / (90 + 40 * 0.55) = 90 / 112
        let chance = hit_chance(90.0, 40.0, EVA_FACTOR, MIN_HIT);
        assert!((chance - 90.0 / 112.0).abs() < 1e-12);
    }

    #[test]
    fn test_hit_chance_floor() {
        let chance = hit_chance(10.0, 1000.0, EVA_FACTOR, MIN_HIT);
        assert_eq!(chance, MIN_HIT);
    }

    #[test]
    fn test_hit_chance_non_positive_accuracy() {
        assert_eq!(hit_chance(0.0, 0.0, EVA_FACTOR, MIN_HIT), MIN_HIT);
        assert_eq!(hit_chance(-5.0, 10.0, EVA_FACTOR, MIN_HIT), MIN_HIT);
    }

    #[test]
    fn test_defense_dr_literal() {
        let dr = defense_dr(100.0, 20, 400.0, 85.0);
        assert!((dr - 0.045454545454545456).abs() < 1e-12);
    }

    #[test]
    fn test_defense_dr_non_positive_armor() {
        assert_eq!(defense_dr(-10.0, 5, 400.0, 85.0), 0.0);
    }

    #[test]
    fn test_defense_dr_level_lowers_reduction() {
        let low = defense_dr(300.0, 1, 400.0, 85.0);
        let high = defense_dr(300.0, 40, 400.0, 85.0);
        assert!(high < low);
    }

    #[test]
    fn test_crit_chance_cap() {
        assert!((crit_chance(20.0, 0.012, 0.40) - 0.24).abs() < 1e-12);
        assert_eq!(crit_chance(100.0, 0.012, 0.40), 0.40);
        assert_eq!(crit_chance(100.0, 0.012, 0.80), 0.80);
    }

    #[test]
    fn test_crit_multiplier_cap() {
        assert!((crit_multiplier(20.0, 1.5, 0.015, 2.5) - 1.8).abs() < 1e-12);
        assert_eq!(crit_multiplier(200.0, 1.5, 0.015, 2.5), 2.5);
    }

    #[test]
    fn test_reflect_rate_cap() {
        // 25 / 125 = 0.2
        assert!((reflect_rate(25.0, 100.0, 0.25) - 0.2).abs() < 1e-12);
        assert_eq!(reflect_rate(1000.0, 100.0, 0.25), 0.25);
        assert_eq!(reflect_rate(0.0, 100.0, 0.25), 0.0);
    }

    #[test]
    fn test_penetration_multiplier() {
        // 1 + 40 / 80
        assert_eq!(penetration_multiplier(40.0, 40.0), 1.5);
        assert_eq!(penetration_multiplier(0.0, 40.0), 1.0);
    }

    #[test]
    fn test_initiative() {
        assert_eq!(initiative(25.0, 1.0, 7), 32.0);
    }
}
