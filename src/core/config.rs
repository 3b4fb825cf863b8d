//! Game configuration.
//!
//! All gameplay tunables live in [`GameConfig`] so the engine never reaches
//! for hidden module globals. Defaults mirror the shipped balance values;
//! hosts can override individual fields with the builder-style setters.

use serde::{Deserialize, Serialize};

/// Hard level cap. Leveling stops here regardless of accumulated experience.
pub const MAX_LEVEL: u32 = 100;

/// Level required for the first evolution (stage 0 -> 1).
pub const EVOLUTION_LEVEL_1: u32 = 45;

/// Level required for the second evolution (stage 1 -> 2).
pub const EVOLUTION_LEVEL_2: u32 = 90;

/// Gameplay tunables.
///
/// ```
/// use menagerie::core::GameConfig;
///
/// let config = GameConfig::default().with_boss_probability(0.05);
/// assert_eq!(config.max_team_size, 3);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Maximum creatures fielded in one combat session.
    pub max_team_size: usize,

    /// Chance that an encounter is a boss.
    pub boss_probability: f64,

    /// Stat multiplier applied to boss encounters (hp/attack/defense/speed).
    pub boss_stat_multiplier: i32,

    /// Inclusive encounter level range.
    pub encounter_level_min: u32,
    /// Inclusive encounter level range.
    pub encounter_level_max: u32,

    /// Flat capture success chance, independent of rarity.
    pub capture_success: f64,

    /// Power used when attacking with no ability (the "struggle" fallback).
    pub struggle_power: i32,

    /// Currency cost of drafting a fresh level-1 creature.
    pub draft_cost: i64,

    /// Experience awarded per enemy level on victory.
    pub xp_per_enemy_level: u64,

    /// Abilities requested from the generator for a new creature.
    pub abilities_per_creature: usize,

    /// Currency balance granted on a fresh or wiped profile.
    pub starting_balance: i64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_team_size: 3,
            boss_probability: 0.01,
            boss_stat_multiplier: 10,
            encounter_level_min: 2,
            encounter_level_max: 80,
            capture_success: 0.7,
            struggle_power: 50,
            draft_cost: 500,
            xp_per_enemy_level: 10,
            abilities_per_creature: 4,
            starting_balance: 1000,
        }
    }
}

impl GameConfig {
    /// Create a config with default balance values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the boss encounter probability.
    #[must_use]
    pub fn with_boss_probability(mut self, p: f64) -> Self {
        assert!((0.0..=1.0).contains(&p), "probability must be in [0, 1]");
        self.boss_probability = p;
        self
    }

    /// Set the flat capture success chance.
    #[must_use]
    pub fn with_capture_success(mut self, p: f64) -> Self {
        assert!((0.0..=1.0).contains(&p), "probability must be in [0, 1]");
        self.capture_success = p;
        self
    }

    /// Set the encounter level range (inclusive).
    #[must_use]
    pub fn with_encounter_levels(mut self, min: u32, max: u32) -> Self {
        assert!(min >= 1 && min <= max && max <= MAX_LEVEL);
        self.encounter_level_min = min;
        self.encounter_level_max = max;
        self
    }

    /// Set the draft cost.
    #[must_use]
    pub fn with_draft_cost(mut self, cost: i64) -> Self {
        self.draft_cost = cost;
        self
    }
}
