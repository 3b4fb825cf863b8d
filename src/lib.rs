//! # Menagerie
//!
//! Deterministic game-logic core for a creature-collecting RPG: element
//! type chart, creature model, progression, combat, economy, authenticated
//! trading, and a facade that sequences them.
//!
//! ## Design
//!
//! - **Deterministic**: every random draw flows through a seedable
//!   [`core::GameRng`]; a fixed seed reproduces damage rolls and encounters
//!   exactly.
//! - **Gate before mutate**: currency, item, capture, and evolution checks
//!   all run before any state changes, so a refused action leaves the world
//!   untouched.
//! - **Pluggable edges**: the generative content backend
//!   ([`content::ContentGenerator`]) and persistence
//!   ([`storage::Store`]) are traits; the crate ships a safe offline
//!   generator and an in-memory store.
//! - **Authenticated trades**: creatures travel between profiles as
//!   HMAC-signed text codes ([`trade::TradeCodec`]); stats cannot be forged
//!   without the key.
//!
//! ## Quick start
//!
//! ```
//! use menagerie::content::FallbackGenerator;
//! use menagerie::core::{GameConfig, GameRng};
//! use menagerie::game::Game;
//! use menagerie::storage::MemoryStore;
//!
//! let mut game = Game::new(
//!     GameConfig::default(),
//!     FallbackGenerator,
//!     MemoryStore::with_balance(1000),
//! )
//! .with_rng(GameRng::new(42));
//!
//! let starter = game.draft_creature()?;
//! assert_eq!(starter.level, 1);
//!
//! let mut session = game.start_encounter()?;
//! game.player_turn(&mut session, None)?;
//! # Ok::<(), menagerie::core::GameError>(())
//! ```

pub mod combat;
pub mod content;
pub mod core;
pub mod creatures;
pub mod economy;
pub mod elements;
pub mod game;
pub mod progression;
pub mod storage;
pub mod trade;

pub use crate::combat::{BoostKind, CombatSession, Encounter};
pub use crate::content::{ContentGenerator, FallbackGenerator};
pub use crate::core::{GameConfig, GameError, GameRng};
pub use crate::creatures::{Ability, AbilityPool, Creature, StatBlock};
pub use crate::elements::{Element, TypeChart};
pub use crate::game::{Game, TurnOutcome};
pub use crate::storage::{MemoryStore, Store};
pub use crate::trade::{TradeCodec, TradeError, TradeKey};
