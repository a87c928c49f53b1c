use rand::rngs::mock::StepRng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde_json::json;
use skirmish::inventory;
use skirmish::probability::{defense_dr, hit_chance};
use skirmish::*;

fn content() -> ContentLibrary {
    ContentLibrary::from_value(&json!({
        "races": {
            "human": { "name": "Human", "base_stats": { "strength": 12, "dexterity": 12, "constitution": 12 } },
            "elf": { "name": "Elf", "base_stats": { "dexterity": 16, "intelligence": 14 } }
        },
        "classes": {
            "warrior": {
                "name": "Warrior",
                "base_stats": { "strength": 4, "constitution": 2 },
                "initial_skills": ["power_strike"]
            },
            "mage": {
                "name": "Mage",
                "base_stats": { "intelligence": 6, "wisdom": 4 },
                "initial_skills": ["fireball"]
            }
        },
        "items": {
            "iron_sword": { "name": "Iron Sword", "type": "weapon", "slot": "weapon", "bonus_stats": { "strength": 3 } },
            "chain_mail": { "name": "Chain Mail", "type": "armor", "slot": "body", "bonus_stats": { "constitution": 5 } },
            "potion": { "name": "Potion", "type": "consumable" }
        },
        "skills": {
            "power_strike": { "name": "Power Strike", "type": "physical", "scaling": { "ap": 1.4 }, "cost": { "mp": 5 } },
            "fireball": { "name": "Fireball", "type": "magic", "scaling": { "ap": 0.0, "sp": 1.8 }, "cost": { "mp": 8 } }
        },
        "monsters": {
            "goblin": { "name": "Goblin", "level": 2, "base_stats": { "strength": 9, "dexterity": 12 } },
            "golem": {
                "name": "Stone Golem",
                "level": 3,
                "base_stats": { "constitution": 14 },
                "keystones": ["IRON_FORTRESS"]
            }
        }
    }))
    .unwrap()
}

/// Play a full player-versus-monster encounter from one seed.
fn play(rules: &Rules, content: &ContentLibrary, seed: u64) -> (Option<Side>, u32, u64, Vec<String>) {
    let factory = Factory::new(content, GrowthSystem::new(&rules.growth));
    let resolver = TurnResolver::new(rules, content);
    let hero = factory.create_player("p1", "Hero", "human", "warrior").unwrap();
    let goblin = factory.create_monster("goblin", "m1").unwrap();

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut session = CombatSession::initialize(vec![hero], vec![goblin], rules, &mut rng).unwrap();
    let winner = session.run(&resolver, &mut rng).unwrap();
    (
        winner,
        session.round(),
        session.turns_taken(),
        session.log().lines(),
    )
}

/// Same seed, same encounter: winner, rounds and log all match.
#[test]
fn test_seeded_encounter_is_reproducible() {
    let rules = Rules::default();
    let content = content();

    let first = play(&rules, &content, 77);
    let second = play(&rules, &content, 77);
    assert_eq!(first, second);
    assert!(first.1 >= 1 && first.1 <= rules.combat.max_rounds);
    assert!(!first.3.is_empty());
}

/// Two identical actors under a fixed seed always produce the same result.
#[test]
fn test_equal_actors_fixed_seed() {
    let rules = Rules::default();
    let content = ContentLibrary::new();
    let resolver = TurnResolver::new(&rules, &content);

    let run = || {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut session = CombatSession::initialize(
            vec![Actor::new("left", "Left")],
            vec![Actor::new("right", "Right")],
            &rules,
            &mut rng,
        )
        .unwrap();
        let side = session.run(&resolver, &mut rng).unwrap();
        (side, session.winner().map(str::to_string), session.round())
    };

    let (side, winner, rounds) = run();
    assert_eq!((side, winner.clone(), rounds), run());
    assert!(side.is_some());
    assert!(winner.is_some());
}

/// Equipping raises max HP by the constitution bonus; HP never exceeds max.
#[test]
fn test_equip_refresh_invariant() {
    let rules = Rules::default();
    let content = content();
    let growth = GrowthSystem::new(&rules.growth);
    let factory = Factory::new(&content, growth);

    let mut hero = factory.create_player("p1", "Hero", "human", "warrior").unwrap();
    let base_max = hero.resources.max_hp;
    assert_eq!(hero.resources.hp, base_max);

    inventory::add_item(&mut hero, factory.create_item("chain_mail").unwrap());
    inventory::equip_item(&growth, &mut hero, "chain_mail").unwrap();
    // +5 constitution, 40 HP per point
    assert_eq!(hero.resources.max_hp, base_max + 200);
    assert!(hero.resources.hp <= hero.resources.max_hp);
    assert!(!hero.cache().is_dirty());

    assert!(inventory::unequip_item(&growth, &mut hero, EquipmentSlot::Body));
    assert_eq!(hero.resources.max_hp, base_max);
    assert!(hero.resources.hp <= hero.resources.max_hp);
    assert_eq!(hero.inventory.len(), 1);
}

/// Items without a slot cannot be equipped.
#[test]
fn test_unequippable_item() {
    let rules = Rules::default();
    let content = content();
    let growth = GrowthSystem::new(&rules.growth);
    let mut hero = Actor::new("p1", "Hero");
    growth.refresh(&mut hero);

    inventory::add_item(&mut hero, content.item("potion").unwrap());
    let err = inventory::equip_item(&growth, &mut hero, "potion").unwrap_err();
    assert!(matches!(err, CombatError::ConfigurationMissing { field: "slot", .. }));
    assert_eq!(hero.inventory.len(), 1);
}

/// Granted keystones from monster data take effect in combat.
#[test]
fn test_golem_cannot_dodge_and_reflects() {
    let rules = Rules::default();
    let content = content();
    let factory = Factory::new(&content, GrowthSystem::new(&rules.growth));
    let resolver = TurnResolver::new(&rules, &content);

    // A plain attacker; a warrior's strength would ignore reflection
    let mut hero = Actor::new("p1", "Hero");
    GrowthSystem::new(&rules.growth).refresh(&mut hero);
    let mut golem = factory.create_monster("golem", "m1").unwrap();
    let mut log = CombatLog::default();

    // High rolls would miss anyone who can dodge
    let result = resolver
        .resolve_action(
            &mut hero,
            &mut golem,
            &Action::BasicAttack,
            &mut log,
            &mut StepRng::new(u64::MAX, 0),
        )
        .unwrap();
    assert!(result.hit);
    assert_eq!(result.hit_chance, 1.0);
    assert!(result.reflected > 0);
    assert_eq!(hero.resources.hp, hero.resources.max_hp - result.reflected);
}

/// A driver's failed skill is logged, spends nothing and keeps the turn.
#[test]
fn test_driver_failure_keeps_turn() {
    let rules = Rules::default();
    let content = content();
    let factory = Factory::new(&content, GrowthSystem::new(&rules.growth));
    let resolver = TurnResolver::new(&rules, &content);

    let mut mage = factory.create_player("p1", "Mage", "elf", "mage").unwrap();
    mage.resources.mp = 3;
    let goblin = factory.create_monster("goblin", "m1").unwrap();

    let mut rng = StepRng::new(0, 0);
    // Equal d20 rolls leave dexterity to decide the order
    let mut session = CombatSession::initialize(vec![mage], vec![goblin], &rules, &mut rng).unwrap();
    assert_eq!(session.current_actor_id(), Some("p1"));

    let err = session
        .process_turn_with(&resolver, Action::from_id("fireball"), None, &mut rng)
        .unwrap_err();
    assert!(matches!(err, CombatError::InsufficientResource { .. }));
    assert!(matches!(
        session.log().latest(),
        Some(CombatEvent::ActionFailed { .. })
    ));
    assert_eq!(session.current_actor_id(), Some("p1"));
    assert_eq!(session.actor("p1").unwrap().resources.mp, 3);

    session
        .process_turn_with(&resolver, Action::Defend, None, &mut rng)
        .unwrap();
    assert_eq!(session.current_actor_id(), Some("m1"));
}

/// A fully starved attacker still deals exactly one damage.
#[test]
fn test_minimum_damage_is_one() {
    let rules = Rules::default();
    let content = ContentLibrary::new();
    let growth = GrowthSystem::new(&rules.growth);
    let resolver = TurnResolver::new(&rules, &content);

    let mut weakling = Actor::new("w", "Weakling")
        .with_base_stat("strength", 0)
        .with_base_stat("dexterity", 0);
    let mut wall = Actor::new("d", "Wall");
    growth.refresh(&mut weakling);
    growth.refresh(&mut wall);
    let mut log = CombatLog::default();

    let result = resolver
        .resolve_action(
            &mut weakling,
            &mut wall,
            &Action::BasicAttack,
            &mut log,
            &mut StepRng::new(0, 0),
        )
        .unwrap();
    assert!(result.hit);
    assert_eq!(result.damage, 1);
    assert_eq!(wall.resources.hp, wall.resources.max_hp - 1);
}

/// Worked examples for the pure combat math.
#[test]
fn test_probability_scenarios() {
    let rules = Rules::default();
    let cfg = &rules.combat;

    assert_eq!(hit_chance(100.0, 0.0, cfg.eva_factor, cfg.min_hit_chance), 1.0);

    let dr = defense_dr(100.0, 20, cfg.dr_base_k, cfg.dr_per_level_k);
    assert!((dr - 100.0 / 2200.0).abs() < 1e-12);

    assert_eq!(StatAccumulator::new(50.0).add_more(1.3).calculate(), 65.0);
    assert_eq!(StatAccumulator::new(10.0).add_more(2.0).calculate(), 20.0);
}

/// Actor state survives JSON; the cache comes back dirty and recomputes.
#[test]
fn test_actor_serde_restores_dirty_cache() {
    let rules = Rules::default();
    let content = content();
    let growth = GrowthSystem::new(&rules.growth);
    let factory = Factory::new(&content, growth);

    let mut hero = factory.create_player("p1", "Hero", "human", "warrior").unwrap();
    inventory::add_item(&mut hero, factory.create_item("iron_sword").unwrap());
    inventory::equip_item(&growth, &mut hero, "iron_sword").unwrap();
    let strength = growth.get_scaled_stat(&mut hero, "strength");

    let json = serde_json::to_string(&hero).unwrap();
    let mut restored: Actor = serde_json::from_str(&json).unwrap();
    assert!(restored.cache().is_dirty());
    assert_eq!(restored.resources, hero.resources);
    assert_eq!(growth.get_scaled_stat(&mut restored, "strength"), strength);
}

/// Rules load from partial JSON with defaults elsewhere.
#[test]
fn test_rules_from_json() {
    let rules = Rules::from_json(r#"{ "combat": { "max_rounds": 5 } }"#).unwrap();
    assert_eq!(rules.combat.max_rounds, 5);
    assert_eq!(rules.combat.log_capacity, 10);
    assert_eq!(rules.growth.max_level, 50);
}

/// The session log stays bounded however long the fight runs.
#[test]
fn test_log_stays_bounded() {
    let rules = Rules::default();
    let content = content();
    let factory = Factory::new(&content, GrowthSystem::new(&rules.growth));
    let resolver = TurnResolver::new(&rules, &content);

    let hero = factory.create_player("p1", "Hero", "human", "warrior").unwrap();
    let golem = factory.create_monster("golem", "m1").unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let mut session = CombatSession::initialize(vec![hero], vec![golem], &rules, &mut rng).unwrap();
    session.run(&resolver, &mut rng).unwrap();

    assert!(session.log().len() <= rules.combat.log_capacity);
    assert!(session.log().total() > session.log().len() as u64);
    assert!(matches!(
        session.log().latest(),
        Some(CombatEvent::Finished { .. })
    ));
}
