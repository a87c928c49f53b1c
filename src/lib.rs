//! # skirmish - Deterministic Turn-Based RPG Combat Engine
//!
//! Derives character stats from base attributes, level and equipment, and
//! resolves turn-based combat between actors:
//! - **Cached** derived stats, recomputed in one pass only when invalidated
//! - **Data-driven** ratings: max HP, accuracy, armor and the rest are
//!   formulas in the rules, ordered by their dependencies
//! - **Seedable**: every roll comes from a caller-supplied `Rng`
//! - **Traceable**: each hit carries a stage-by-stage damage breakdown
//!
//! ## Core Concepts
//!
//! ### Stat derivation
//!
//! ```text
//! base attributes → log growth by level → + equipment → ratings (formulas)
//! ```
//!
//! Results live in the actor's [`StatCache`](cache::StatCache). Equipping,
//! unequipping and level changes invalidate it; reads after that recompute
//! everything once.
//!
//! ### Turn resolution
//!
//! ```text
//! status → cost → hit → compose → mitigate → crit → finalize → reflect → outcome
//! ```
//!
//! Damage composes with the flat / increased / more model of
//! [`StatAccumulator`]. Masteries ([`Keystone`](mastery::Keystone)s and
//! attribute thresholds) toggle stages on and off.
//!
//! ## Example
//!
//! ```rust
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use skirmish::*;
//!
//! let rules = Rules::default();
//! let content = ContentLibrary::new();
//! let resolver = TurnResolver::new(&rules, &content);
//! let mut rng = ChaCha8Rng::seed_from_u64(2024);
//!
//! let mut session = CombatSession::initialize(
//!     vec![Actor::new("knight", "Knight").with_base_stat("constitution", 18)],
//!     vec![Actor::new("bandit", "Bandit")],
//!     &rules,
//!     &mut rng,
//! )
//! .unwrap();
//!
//! let winner = session.run(&resolver, &mut rng).unwrap();
//! assert!(session.is_finished());
//! assert_eq!(winner, session.winner_side());
//! ```
//!
//! ## Modules
//!
//! - [`stat_id`] - Attribute and rating identifiers
//! - [`accumulator`] - Flat / increased / more modifier pipeline
//! - [`formula`], [`graph`] - Rating formulas and their dependency order
//! - [`growth`], [`cache`] - Derived stats and their cache
//! - [`probability`] - Pure combat math
//! - [`resolver`] - Single action resolution
//! - [`session`] - Turn order and encounter lifecycle
//! - [`content`], [`factory`], [`inventory`] - Content tables and actor construction
//! - [`config`] - Tunable rules
//! - [`error`] - Error types

pub mod accumulator;
pub mod actor;
pub mod breakdown;
pub mod cache;
pub mod config;
pub mod content;
pub mod error;
pub mod factory;
pub mod formula;
pub mod graph;
pub mod growth;
pub mod inventory;
pub mod item;
pub mod log;
pub mod mastery;
pub mod probability;
pub mod resolver;
pub mod session;
pub mod simulation;
pub mod skill;
pub mod stat_id;
pub mod status;

// Re-export main types for convenience
pub use accumulator::{ModifierPhase, StatAccumulator};
pub use actor::{Actor, Resources};
pub use breakdown::DamageBreakdown;
pub use config::{CombatConfig, GrowthConfig, Rules};
pub use content::ContentLibrary;
pub use error::{CombatError, Result};
pub use factory::Factory;
pub use growth::GrowthSystem;
pub use item::{EquipmentSlot, Item};
pub use log::{CombatEvent, CombatLog};
pub use resolver::{ActionResult, Outcome, TurnResolver};
pub use session::{CombatSession, Side, TurnReport};
pub use skill::Action;
pub use stat_id::StatId;
