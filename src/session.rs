//! Combat sessions.
//!
//! A [`CombatSession`] owns the participants of one encounter, their
//! turn order, and the bounded event log. The session advances turns
//! itself: the driver only asks it to process the next turn, optionally
//! naming the action and target, and reads the state back.

use crate::actor::Actor;
use crate::config::Rules;
use crate::content::BASIC_ATTACK;
use crate::error::{CombatError, Result};
use crate::growth::GrowthSystem;
use crate::log::{CombatEvent, CombatLog};
use crate::probability;
use crate::resolver::{ActionResult, Outcome, TurnResolver};
use crate::skill::{self, Action};
use crate::stat_id::names;
use crate::status::StatusKind;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Allies,
    Enemies,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Allies => Side::Enemies,
            Side::Enemies => Side::Allies,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Allies => write!(f, "Allies"),
            Side::Enemies => write!(f, "Enemies"),
        }
    }
}

/// What happened during one processed turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnReport {
    pub actor: String,
    pub side: Side,
    /// HP lost to bleeding at the start of the turn.
    pub bleed_damage: u32,
    pub target: Option<String>,
    /// `None` when the actor bled out before acting.
    pub result: Option<ActionResult>,
}

/// One encounter between two sides.
///
/// # Examples
///
/// ```rust
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use skirmish::{Actor, CombatSession, ContentLibrary, Rules, TurnResolver};
///
/// let rules = Rules::default();
/// let content = ContentLibrary::new();
/// let resolver = TurnResolver::new(&rules, &content);
/// let mut rng = ChaCha8Rng::seed_from_u64(42);
///
/// let mut session = CombatSession::initialize(
///     vec![Actor::new("hero", "Hero").with_base_stat("strength", 16)],
///     vec![Actor::new("rat", "Rat").with_base_stat("constitution", 4)],
///     &rules,
///     &mut rng,
/// )
/// .unwrap();
///
/// session.run(&resolver, &mut rng).unwrap();
/// assert!(session.is_finished());
/// assert!(session.round() <= rules.combat.max_rounds);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatSession {
    allies: Vec<Actor>,
    enemies: Vec<Actor>,
    turn_order: Vec<String>,
    current_turn_index: usize,
    round: u32,
    turns_taken: u64,
    finished: bool,
    winner_side: Option<Side>,
    winner: Option<String>,
    log: CombatLog,
    /// Start-of-turn effects already applied to the current turn.
    turn_started: bool,
}

impl CombatSession {
    /// Start an encounter.
    ///
    /// Every participant is refreshed, then ranked by initiative
    /// (`dexterity * weight + d20`, highest first; ties keep allies-then-
    /// enemies insertion order). Fails if a side is empty or two
    /// participants share an id.
    pub fn initialize(
        allies: Vec<Actor>,
        enemies: Vec<Actor>,
        rules: &Rules,
        rng: &mut impl Rng,
    ) -> Result<Self> {
        if allies.is_empty() || enemies.is_empty() {
            return Err(CombatError::InvalidConfig(
                "an encounter needs at least one actor on each side".into(),
            ));
        }
        let mut seen = HashSet::new();
        for actor in allies.iter().chain(&enemies) {
            if !seen.insert(actor.id.as_str()) {
                return Err(CombatError::InvalidConfig(format!(
                    "duplicate actor id '{}' in encounter",
                    actor.id
                )));
            }
        }

        let mut session = Self {
            allies,
            enemies,
            turn_order: Vec::new(),
            current_turn_index: 0,
            round: 1,
            turns_taken: 0,
            finished: false,
            winner_side: None,
            winner: None,
            log: CombatLog::new(rules.combat.log_capacity),
            turn_started: false,
        };

        let growth = GrowthSystem::new(&rules.growth);
        let cfg = &rules.combat;
        let mut ranked = Vec::with_capacity(session.allies.len() + session.enemies.len());
        for actor in session.allies.iter_mut().chain(session.enemies.iter_mut()) {
            growth.refresh(actor);
            let dex = growth.get_scaled_stat(actor, names::DEXTERITY) as f64;
            let roll = rng.gen_range(1..=cfg.initiative_die.max(1));
            let score = probability::initiative(dex, cfg.initiative_dex_weight, roll);
            ranked.push((actor.id.clone(), score));
        }
        // Stable: equal scores keep insertion order
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        session.turn_order = ranked.into_iter().map(|(id, _)| id).collect();

        tracing::info!(
            allies = session.allies.len(),
            enemies = session.enemies.len(),
            order = ?session.turn_order,
            "encounter started"
        );
        Ok(session)
    }

    pub fn allies(&self) -> &[Actor] {
        &self.allies
    }

    pub fn enemies(&self) -> &[Actor] {
        &self.enemies
    }

    pub fn actor(&self, id: &str) -> Option<&Actor> {
        self.allies.iter().chain(&self.enemies).find(|a| a.id == id)
    }

    pub fn turn_order(&self) -> &[String] {
        &self.turn_order
    }

    pub fn current_turn_index(&self) -> usize {
        self.current_turn_index
    }

    /// Id of the actor whose turn it is.
    pub fn current_actor_id(&self) -> Option<&str> {
        self.turn_order
            .get(self.current_turn_index)
            .map(String::as_str)
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn turns_taken(&self) -> u64 {
        self.turns_taken
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Winning side; `None` while running and after a draw.
    pub fn winner_side(&self) -> Option<Side> {
        self.winner_side
    }

    /// Id of the actor credited with the win.
    pub fn winner(&self) -> Option<&str> {
        self.winner.as_deref()
    }

    pub fn log(&self) -> &CombatLog {
        &self.log
    }

    /// Hand the participants back once the encounter is over.
    pub fn into_participants(self) -> (Vec<Actor>, Vec<Actor>) {
        (self.allies, self.enemies)
    }

    /// Process the current turn, choosing the action and target.
    ///
    /// The actor uses its first known skill it can afford, otherwise a
    /// basic attack, against the first living opponent.
    pub fn process_turn(&mut self, resolver: &TurnResolver<'_>, rng: &mut impl Rng) -> Result<TurnReport> {
        self.turn(resolver, None, None, rng)
    }

    /// Process the current turn with a driver-chosen action and target.
    ///
    /// A failed action (unknown skill or target, unaffordable cost) is
    /// logged and returned as an error; the turn is not consumed and the
    /// driver may pick again.
    pub fn process_turn_with(
        &mut self,
        resolver: &TurnResolver<'_>,
        action: Action,
        target: Option<&str>,
        rng: &mut impl Rng,
    ) -> Result<TurnReport> {
        self.turn(resolver, Some(action), target, rng)
    }

    /// Process turns until the encounter ends. Returns the winning side,
    /// or `None` for a draw.
    pub fn run(&mut self, resolver: &TurnResolver<'_>, rng: &mut impl Rng) -> Result<Option<Side>> {
        while !self.finished {
            self.process_turn(resolver, rng)?;
        }
        Ok(self.winner_side)
    }

    fn turn(
        &mut self,
        resolver: &TurnResolver<'_>,
        action: Option<Action>,
        target: Option<&str>,
        rng: &mut impl Rng,
    ) -> Result<TurnReport> {
        if self.finished {
            return Err(CombatError::EncounterFinished);
        }
        let max_rounds = resolver.rules().combat.max_rounds;
        self.skip_dead(max_rounds);
        if self.finished {
            return Err(CombatError::EncounterFinished);
        }

        let actor_id = self
            .current_actor_id()
            .map(str::to_string)
            .ok_or(CombatError::EncounterFinished)?;
        let (side, index) = self
            .locate(&actor_id)
            .ok_or_else(|| CombatError::UnknownActor(actor_id.clone()))?;

        let mut report = TurnReport {
            actor: actor_id.clone(),
            side,
            bleed_damage: 0,
            target: None,
            result: None,
        };

        // Start of turn
        if !self.turn_started {
            self.turn_started = true;
            let actor = &mut self.side_mut(side)[index];
            let bled = match actor.status.tick(StatusKind::Bleed) {
                Some(bleed) => {
                    let damage = actor.resources.take_damage(bleed.magnitude.unwrap_or(1));
                    Some((actor.name.clone(), damage, actor.is_alive()))
                }
                None => None,
            };
            if let Some((name, damage, alive)) = bled {
                report.bleed_damage = damage;
                self.log.push(CombatEvent::StatusDamage {
                    actor: name.clone(),
                    status: StatusKind::Bleed,
                    damage,
                });
                if !alive {
                    self.log.push(CombatEvent::Defeated { actor: name });
                    self.check_victory(side, None);
                    self.end_turn(max_rounds);
                    return Ok(report);
                }
            }
        }

        let target_index = match target {
            Some(id) => match self
                .side(side.opponent())
                .iter()
                .position(|a| a.id == id && a.is_alive())
            {
                Some(target_index) => target_index,
                None => {
                    let err = CombatError::UnknownActor(id.to_string());
                    tracing::debug!(attacker = %actor_id, target = id, error = %err, "action failed");
                    let actor = self.side(side)[index].name.clone();
                    self.log.push(CombatEvent::ActionFailed {
                        actor,
                        reason: err.to_string(),
                    });
                    return Err(err);
                }
            },
            None => self
                .side(side.opponent())
                .iter()
                .position(Actor::is_alive)
                .ok_or(CombatError::EncounterFinished)?,
        };

        let action = match action {
            Some(action) => action,
            None => self.choose_action(resolver, side, index),
        };

        let (attackers, defenders) = match side {
            Side::Allies => (&mut self.allies, &mut self.enemies),
            Side::Enemies => (&mut self.enemies, &mut self.allies),
        };
        let attacker = &mut attackers[index];
        let defender = &mut defenders[target_index];
        report.target = Some(defender.id.clone());

        let result = resolver.resolve_action(attacker, defender, &action, &mut self.log, rng)?;
        let credited = match result.outcome {
            Outcome::AttackerWins => Some(attacker.id.clone()),
            Outcome::DefenderWins => Some(defender.id.clone()),
            Outcome::Continue => None,
        };
        report.result = Some(result);

        self.check_victory(side, credited);
        self.end_turn(max_rounds);
        Ok(report)
    }

    fn choose_action(&self, resolver: &TurnResolver<'_>, side: Side, index: usize) -> Action {
        let actor = &self.side(side)[index];
        actor
            .skills
            .iter()
            .filter(|id| id.as_str() != BASIC_ATTACK)
            .find(|id| {
                resolver
                    .content()
                    .skill(id)
                    .map(|s| skill::check_cost(actor, &s.cost).is_ok())
                    .unwrap_or(false)
            })
            .map(|id| Action::Skill(id.clone()))
            .unwrap_or(Action::BasicAttack)
    }

    fn side(&self, side: Side) -> &[Actor] {
        match side {
            Side::Allies => &self.allies,
            Side::Enemies => &self.enemies,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut [Actor] {
        match side {
            Side::Allies => &mut self.allies,
            Side::Enemies => &mut self.enemies,
        }
    }

    fn locate(&self, id: &str) -> Option<(Side, usize)> {
        if let Some(i) = self.allies.iter().position(|a| a.id == id) {
            return Some((Side::Allies, i));
        }
        self.enemies
            .iter()
            .position(|a| a.id == id)
            .map(|i| (Side::Enemies, i))
    }

    fn is_alive(&self, id: &str) -> bool {
        self.actor(id).map(Actor::is_alive).unwrap_or(false)
    }

    // Advance past dead actors; a full lap without a living one ends it.
    fn skip_dead(&mut self, max_rounds: u32) {
        for _ in 0..self.turn_order.len() {
            if self.finished {
                return;
            }
            let alive = self
                .current_actor_id()
                .map(|id| self.is_alive(id))
                .unwrap_or(false);
            if alive {
                return;
            }
            self.step(max_rounds);
        }
        if !self.finished {
            self.finish(None, None);
        }
    }

    /// Decide the encounter after `acting` side's turn.
    ///
    /// The opposing side is checked first, so a turn that wipes out both
    /// sides goes to the acting side.
    fn check_victory(&mut self, acting: Side, credited: Option<String>) {
        let wiped = |actors: &[Actor]| actors.iter().all(|a| !a.is_alive());
        let winner = if wiped(self.side(acting.opponent())) {
            Some(acting)
        } else if wiped(self.side(acting)) {
            Some(acting.opponent())
        } else {
            None
        };

        if let Some(side) = winner {
            // Only a survivor on the winning side can take the credit
            let survivors = self.side(side);
            let credited = credited
                .filter(|id| survivors.iter().any(|a| &a.id == id && a.is_alive()))
                .or_else(|| survivors.iter().find(|a| a.is_alive()).map(|a| a.id.clone()));
            self.finish(Some(side), credited);
        }
    }

    fn finish(&mut self, side: Option<Side>, winner: Option<String>) {
        self.finished = true;
        self.winner_side = side;
        self.winner = winner;
        self.log.push(CombatEvent::Finished {
            winner: side,
            rounds: self.round,
        });
        tracing::info!(winner = ?side, rounds = self.round, turns = self.turns_taken, "encounter finished");
    }

    fn end_turn(&mut self, max_rounds: u32) {
        self.turns_taken += 1;
        if !self.finished {
            self.step(max_rounds);
        }
    }

    fn step(&mut self, max_rounds: u32) {
        self.turn_started = false;
        self.current_turn_index += 1;
        if self.current_turn_index >= self.turn_order.len() {
            self.current_turn_index = 0;
            if self.round >= max_rounds {
                self.finish(None, None);
                return;
            }
            self.round += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentLibrary, DamageKind, SkillRecord};
    use crate::mastery::Keystone;
    use crate::status::StatusEffect;
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn duel(rules: &Rules, rng: &mut impl Rng) -> CombatSession {
        CombatSession::initialize(
            vec![Actor::new("hero", "Hero")],
            vec![Actor::new("goblin", "Goblin")],
            rules,
            rng,
        )
        .unwrap()
    }

    #[test]
    fn test_initiative_ties_keep_insertion_order() {
        let rules = Rules::default();
        // Every d20 rolls 1, so equal dexterity ties
        let session = duel(&rules, &mut StepRng::new(0, 0));
        assert_eq!(session.turn_order(), ["hero", "goblin"]);
        assert_eq!(session.round(), 1);
        assert_eq!(session.current_actor_id(), Some("hero"));
    }

    #[test]
    fn test_initiative_prefers_dexterity() {
        let rules = Rules::default();
        let session = CombatSession::initialize(
            vec![Actor::new("slow", "Slow").with_base_stat("dexterity", 5)],
            vec![Actor::new("quick", "Quick").with_base_stat("dexterity", 40)],
            &rules,
            &mut StepRng::new(0, 0),
        )
        .unwrap();
        assert_eq!(session.turn_order(), ["quick", "slow"]);
    }

    #[test]
    fn test_rejects_bad_rosters() {
        let rules = Rules::default();
        let mut rng = StepRng::new(0, 0);
        assert!(matches!(
            CombatSession::initialize(vec![], vec![Actor::new("e", "E")], &rules, &mut rng),
            Err(CombatError::InvalidConfig(_))
        ));
        assert!(matches!(
            CombatSession::initialize(
                vec![Actor::new("x", "A")],
                vec![Actor::new("x", "B")],
                &rules,
                &mut rng
            ),
            Err(CombatError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_turns_advance_rounds() {
        let rules = Rules::default();
        let content = ContentLibrary::new();
        let resolver = TurnResolver::new(&rules, &content);
        let mut session = duel(&rules, &mut StepRng::new(0, 0));

        // High rolls: everybody misses
        let mut rng = StepRng::new(u64::MAX, 0);
        let first = session.process_turn(&resolver, &mut rng).unwrap();
        assert_eq!(first.target.as_deref(), Some(session.turn_order()[1].as_str()));
        assert_eq!(session.current_turn_index(), 1);
        session.process_turn(&resolver, &mut rng).unwrap();
        assert_eq!(session.current_turn_index(), 0);
        assert_eq!(session.round(), 2);
        assert_eq!(session.turns_taken(), 2);
    }

    #[test]
    fn test_stalemate_is_a_draw() {
        let mut rules = Rules::default();
        rules.combat.max_rounds = 3;
        let content = ContentLibrary::new();
        let resolver = TurnResolver::new(&rules, &content);
        let mut session = duel(&rules, &mut StepRng::new(0, 0));
        let mut rng = StepRng::new(u64::MAX, 0);

        assert_eq!(session.run(&resolver, &mut rng).unwrap(), None);
        assert!(session.is_finished());
        assert_eq!(session.round(), 3);
        assert_eq!(session.turns_taken(), 6);
        assert_eq!(
            session.log().latest(),
            Some(&CombatEvent::Finished {
                winner: None,
                rounds: 3
            })
        );
        assert!(matches!(
            session.process_turn(&resolver, &mut rng),
            Err(CombatError::EncounterFinished)
        ));
    }

    #[test]
    fn test_failed_action_does_not_consume_turn() {
        let rules = Rules::default();
        let content = ContentLibrary::new();
        let resolver = TurnResolver::new(&rules, &content);
        let mut rng = StepRng::new(0, 0);
        let mut session = duel(&rules, &mut rng);

        let err = session
            .process_turn_with(&resolver, Action::Skill("fireball".into()), None, &mut rng)
            .unwrap_err();
        assert!(matches!(err, CombatError::UnknownReference { .. }));
        let err = session
            .process_turn_with(&resolver, Action::BasicAttack, Some("nobody"), &mut rng)
            .unwrap_err();
        assert_eq!(err, CombatError::UnknownActor("nobody".into()));
        assert_eq!(
            session.log().latest(),
            Some(&CombatEvent::ActionFailed {
                actor: "Hero".into(),
                reason: "Unknown actor in encounter: nobody".into(),
            })
        );
        assert_eq!(session.current_turn_index(), 0);
        assert_eq!(session.turns_taken(), 0);

        let report = session
            .process_turn_with(&resolver, Action::BasicAttack, Some("goblin"), &mut rng)
            .unwrap();
        assert!(report.result.unwrap().hit);
        assert_eq!(session.current_turn_index(), 1);
    }

    #[test]
    fn test_stunned_turn_still_advances() {
        let rules = Rules::default();
        let content = ContentLibrary::new();
        let resolver = TurnResolver::new(&rules, &content);
        let mut rng = StepRng::new(0, 0);
        let mut session = duel(&rules, &mut rng);
        session.allies[0].status.insert(StatusEffect::stun());

        let report = session.process_turn(&resolver, &mut rng).unwrap();
        assert!(report.result.unwrap().stunned);
        assert_eq!(
            session.log().latest(),
            Some(&CombatEvent::Stunned {
                actor: "Hero".into()
            })
        );
        assert_eq!(session.current_turn_index(), 1);
        assert_eq!(session.turns_taken(), 1);
        assert_eq!(session.current_actor_id(), Some("goblin"));
        let goblin = session.actor("goblin").unwrap();
        assert_eq!(goblin.resources.hp, goblin.resources.max_hp);
        assert!(session.allies[0].status.get(StatusKind::Stun).is_none());
    }

    #[test]
    fn test_reflected_knockout_credits_a_survivor() {
        let rules = Rules::default();
        let content = ContentLibrary::new();
        let resolver = TurnResolver::new(&rules, &content);
        let mut rng = StepRng::new(0, 0);
        let mut session = CombatSession::initialize(
            vec![Actor::new("hero", "Hero")],
            vec![
                Actor::new("wall", "Wall").with_keystone(Keystone::IronFortress),
                Actor::new("spare", "Spare"),
            ],
            &rules,
            &mut rng,
        )
        .unwrap();
        assert_eq!(session.turn_order(), ["hero", "wall", "spare"]);

        // Measure the exchange on copies, then leave both sides one hit from death
        let (mut hero, mut wall) = (session.allies[0].clone(), session.enemies[0].clone());
        let dry = resolver
            .resolve_action(
                &mut hero,
                &mut wall,
                &Action::BasicAttack,
                &mut CombatLog::default(),
                &mut StepRng::new(0, 0),
            )
            .unwrap();
        assert!(dry.reflected > 0);
        session.enemies[0].resources.hp = dry.damage;
        session.allies[0].resources.hp = dry.reflected;

        let report = session.process_turn(&resolver, &mut rng).unwrap();
        assert_eq!(report.result.unwrap().outcome, Outcome::AttackerWins);
        assert!(session.is_finished());
        assert_eq!(session.winner_side(), Some(Side::Enemies));
        assert_eq!(session.winner(), Some("spare"));
    }

    #[test]
    fn test_bleed_ticks_once_per_turn() {
        let rules = Rules::default();
        let content = ContentLibrary::new();
        let resolver = TurnResolver::new(&rules, &content);
        let mut rng = StepRng::new(u64::MAX, 0);
        let mut hero = Actor::new("hero", "Hero");
        hero.status.insert(StatusEffect::bleed(7, 2));
        let mut session = CombatSession::initialize(
            vec![hero],
            vec![Actor::new("goblin", "Goblin")],
            &rules,
            &mut StepRng::new(0, 0),
        )
        .unwrap();

        // The retry after a failed action must not bleed again
        assert!(session
            .process_turn_with(&resolver, Action::Skill("nope".into()), None, &mut rng)
            .is_err());
        let report = session.process_turn(&resolver, &mut rng).unwrap();
        assert_eq!(report.bleed_damage, 0);
        let hero = session.actor("hero").unwrap();
        assert_eq!(hero.resources.hp, hero.resources.max_hp - 7);
        assert_eq!(hero.status.get(StatusKind::Bleed).unwrap().duration, Some(1));
    }

    #[test]
    fn test_bleed_out_ends_encounter() {
        let rules = Rules::default();
        let content = ContentLibrary::new();
        let resolver = TurnResolver::new(&rules, &content);
        let mut rng = StepRng::new(u64::MAX, 0);
        let mut session = duel(&rules, &mut StepRng::new(0, 0));
        session.allies[0].resources.hp = 3;
        session.allies[0].status.insert(StatusEffect::bleed(5, 3));

        let report = session.process_turn(&resolver, &mut rng).unwrap();
        assert_eq!(report.bleed_damage, 3);
        assert!(report.result.is_none());
        assert!(session.is_finished());
        assert_eq!(session.winner_side(), Some(Side::Enemies));
        assert_eq!(session.winner(), Some("goblin"));
    }

    #[test]
    fn test_ai_prefers_affordable_skill() {
        let rules = Rules::default();
        let mut content = ContentLibrary::new();
        content.insert_skill(
            "too_costly",
            SkillRecord::new("Too Costly", DamageKind::Magic).with_cost(10_000, 0),
        );
        content.insert_skill(
            "jab",
            SkillRecord::new("Jab", DamageKind::Physical).with_cost(1, 0),
        );
        let resolver = TurnResolver::new(&rules, &content);
        let mut rng = StepRng::new(0, 0);
        let mut session = CombatSession::initialize(
            vec![Actor::new("hero", "Hero")
                .with_skill("basic_attack")
                .with_skill("too_costly")
                .with_skill("jab")],
            vec![Actor::new("goblin", "Goblin")],
            &rules,
            &mut rng,
        )
        .unwrap();

        let report = session.process_turn(&resolver, &mut rng).unwrap();
        assert_eq!(report.result.unwrap().action, Action::Skill("jab".into()));
    }

    #[test]
    fn test_seeded_duel_is_reproducible() {
        let rules = Rules::default();
        let content = ContentLibrary::new();
        let resolver = TurnResolver::new(&rules, &content);

        let play = |seed: u64| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut session = duel(&rules, &mut rng);
            let winner = session.run(&resolver, &mut rng).unwrap();
            (winner, session.winner().map(str::to_string), session.round(), session.turns_taken())
        };

        let first = play(1234);
        assert_eq!(first, play(1234));
        assert!(first.0.is_some());
    }
}
