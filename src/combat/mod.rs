//! Combat: damage resolution, encounter generation, and session state.

mod encounter;
mod session;
mod turn;

pub use encounter::{generate_encounter, Encounter, CLONE_LEVEL_SCALING, CLONE_VARIANCE};
pub use session::{AttackReport, BoostKind, CombatSession, BOOST_FACTOR};
pub use turn::{resolve_attack, DAMAGE_VARIANCE};
