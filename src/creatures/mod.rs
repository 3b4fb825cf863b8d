//! Entity model: creatures, abilities, and the shared ability pool.

mod ability;
mod creature;
mod pool;

pub use ability::Ability;
pub use creature::{BattleState, Creature, StatBlock};
pub use pool::AbilityPool;
