//! Batch duel simulation for balance checks.
//!
//! Runs many seeded one-on-one encounters between two builds and
//! summarises them: win rate, time to kill, hit and crit rates, and the
//! spread of hit damage.

use crate::actor::Actor;
use crate::error::{CombatError, Result};
use crate::resolver::TurnResolver;
use crate::session::{CombatSession, Side};
use crate::skill::Action;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Aggregate results of [`simulate_duels`], from the challenger's side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuelReport {
    pub battles: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    /// Fraction of battles won, in `[0, 1]`.
    pub win_rate: f64,
    /// Mean rounds per battle (time to kill).
    pub avg_rounds: f64,
    /// Landed hits over attack attempts, both sides.
    pub hit_rate: f64,
    /// Critical hits over landed hits, both sides.
    pub crit_rate: f64,
    pub avg_damage: f64,
    /// Coefficient of variation of hit damage; 0 with fewer than two hits.
    pub damage_cv: f64,
    /// Mean reflected damage per landed hit.
    pub avg_reflected: f64,
}

#[derive(Default)]
struct Tally {
    wins: u32,
    losses: u32,
    draws: u32,
    rounds: u64,
    attempts: u64,
    crits: u64,
    reflected: u64,
    damages: Vec<f64>,
}

/// Pit `challenger` (allies) against `opponent` (enemies) `battles` times.
///
/// Battle `i` runs on `ChaCha8Rng::seed_from_u64(seed + i)`, so a report
/// is reproducible from its seed. Both actors are cloned fresh for every
/// battle and act through the session's own action choice.
///
/// # Examples
///
/// ```rust
/// use skirmish::simulation::simulate_duels;
/// use skirmish::{Actor, ContentLibrary, Rules, TurnResolver};
///
/// let rules = Rules::default();
/// let content = ContentLibrary::new();
/// let resolver = TurnResolver::new(&rules, &content);
///
/// let brute = Actor::new("brute", "Brute").with_base_stat("strength", 25);
/// let mob = Actor::new("mob", "Mob").with_base_stat("strength", 6);
///
/// let report = simulate_duels(&resolver, &brute, &mob, 20, 7).unwrap();
/// assert_eq!(report.wins + report.losses + report.draws, 20);
/// assert!(report.win_rate > 0.5);
/// ```
pub fn simulate_duels(
    resolver: &TurnResolver<'_>,
    challenger: &Actor,
    opponent: &Actor,
    battles: u32,
    seed: u64,
) -> Result<DuelReport> {
    if battles == 0 {
        return Err(CombatError::InvalidConfig(
            "a simulation needs at least one battle".into(),
        ));
    }

    let mut tally = Tally::default();
    for i in 0..battles {
        let mut rng = ChaCha8Rng::seed_from_u64(seed.wrapping_add(u64::from(i)));
        let mut session = CombatSession::initialize(
            vec![challenger.clone()],
            vec![opponent.clone()],
            resolver.rules(),
            &mut rng,
        )?;

        while !session.is_finished() {
            let report = session.process_turn(resolver, &mut rng)?;
            let Some(result) = report.result else {
                continue;
            };
            if result.stunned || result.action == Action::Defend {
                continue;
            }
            tally.attempts += 1;
            if result.hit {
                tally.damages.push(f64::from(result.damage));
                tally.reflected += u64::from(result.reflected);
                if result.critical {
                    tally.crits += 1;
                }
            }
        }

        match session.winner_side() {
            Some(Side::Allies) => tally.wins += 1,
            Some(Side::Enemies) => tally.losses += 1,
            None => tally.draws += 1,
        }
        tally.rounds += u64::from(session.round());
    }

    let report = summarize(battles, &tally);
    tracing::info!(
        challenger = %challenger.id,
        opponent = %opponent.id,
        battles,
        win_rate = report.win_rate,
        avg_rounds = report.avg_rounds,
        "duel simulation finished"
    );
    Ok(report)
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

fn summarize(battles: u32, tally: &Tally) -> DuelReport {
    let hits = tally.damages.len() as f64;
    let avg_damage = ratio(tally.damages.iter().sum(), hits);
    let damage_cv = if tally.damages.len() > 1 && avg_damage > 0.0 {
        let variance = tally
            .damages
            .iter()
            .map(|d| (d - avg_damage).powi(2))
            .sum::<f64>()
            / (hits - 1.0);
        variance.sqrt() / avg_damage
    } else {
        0.0
    };

    let battles_f = f64::from(battles);
    DuelReport {
        battles,
        wins: tally.wins,
        losses: tally.losses,
        draws: tally.draws,
        win_rate: ratio(f64::from(tally.wins), battles_f),
        avg_rounds: ratio(tally.rounds as f64, battles_f),
        hit_rate: ratio(hits, tally.attempts as f64),
        crit_rate: ratio(tally.crits as f64, hits),
        avg_damage,
        damage_cv,
        avg_reflected: ratio(tally.reflected as f64, hits),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Rules;
    use crate::content::ContentLibrary;
    use crate::mastery::Keystone;

    #[test]
    fn test_zero_battles_rejected() {
        let rules = Rules::default();
        let content = ContentLibrary::new();
        let resolver = TurnResolver::new(&rules, &content);
        let a = Actor::new("a", "A");
        let b = Actor::new("b", "B");
        assert!(matches!(
            simulate_duels(&resolver, &a, &b, 0, 1),
            Err(CombatError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_report_is_reproducible_and_bounded() {
        let rules = Rules::default();
        let content = ContentLibrary::new();
        let resolver = TurnResolver::new(&rules, &content);
        let a = Actor::new("a", "A").with_base_stat("dexterity", 18);
        let b = Actor::new("b", "B").with_base_stat("constitution", 18);

        let first = simulate_duels(&resolver, &a, &b, 25, 99).unwrap();
        let second = simulate_duels(&resolver, &a, &b, 25, 99).unwrap();
        assert_eq!(first, second);

        assert_eq!(first.battles, 25);
        assert_eq!(first.wins + first.losses + first.draws, 25);
        for rate in [first.win_rate, first.hit_rate, first.crit_rate] {
            assert!((0.0..=1.0).contains(&rate));
        }
        assert!(first.avg_rounds >= 1.0);
        assert!(first.avg_rounds <= f64::from(rules.combat.max_rounds));
        assert!(first.avg_damage >= 1.0);
    }

    #[test]
    fn test_reflection_only_against_fortress() {
        let rules = Rules::default();
        let content = ContentLibrary::new();
        let resolver = TurnResolver::new(&rules, &content);
        let a = Actor::new("a", "A");
        let plain = Actor::new("b", "B");
        let fortress = Actor::new("b", "B").with_keystone(Keystone::IronFortress);

        let open = simulate_duels(&resolver, &a, &plain, 10, 3).unwrap();
        assert_eq!(open.avg_reflected, 0.0);

        let walled = simulate_duels(&resolver, &a, &fortress, 10, 3).unwrap();
        assert!(walled.avg_reflected > 0.0);
    }
}
