//! Core infrastructure: configuration, deterministic RNG, error taxonomy.

mod config;
mod error;
mod rng;

pub use config::{GameConfig, EVOLUTION_LEVEL_1, EVOLUTION_LEVEL_2, MAX_LEVEL};
pub use error::GameError;
pub use rng::GameRng;
