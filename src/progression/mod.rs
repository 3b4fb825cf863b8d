//! Progression engine: experience curve, level-ups, evolution gating.
//!
//! Mutations are applied in place on the passed creature; the only
//! externally observable signal from [`gain_experience`] is whether at
//! least one level-up occurred (for UI notification).
//!
//! Evolution is split in two: the *gate* ([`evolution_gate`]) validates the
//! level/stage preconditions without mutating, and [`apply_evolution`]
//! writes externally supplied stats and advances the stage. The numeric
//! values of an evolved form come from the content generator; the engine
//! only validates and records.

use crate::core::{GameError, EVOLUTION_LEVEL_1, EVOLUTION_LEVEL_2, MAX_LEVEL};
use crate::creatures::{Creature, StatBlock};

/// Stat growth per level-up.
pub const LEVEL_GROWTH_FACTOR: f64 = 1.05;

/// Growth band the generator applies for the stage 0 -> 1 evolution.
pub const STAGE_1_GROWTH_BAND: (f64, f64) = (1.05, 1.15);

/// Growth band for stage 1 -> 2 and beyond.
pub const STAGE_2_GROWTH_BAND: (f64, f64) = (1.10, 1.25);

/// Experience required to advance from `level` to `level + 1`.
///
/// `floor(100 * level^1.5)`: level 1 -> 2 needs 100, level 99 -> 100 needs
/// 98_503.
#[must_use]
pub fn xp_to_next_level(level: u32) -> u64 {
    (100.0 * (level as f64).powf(1.5)).floor() as u64
}

/// Add experience and process any resulting level-ups.
///
/// While the accumulated total meets the next-level requirement and the
/// creature is below the level cap: subtract the requirement, increment the
/// level, grow all five base stats by [`LEVEL_GROWTH_FACTOR`], and fully
/// restore current health/resource to the new maxima.
///
/// Returns `true` if at least one level-up occurred.
///
/// Invariant on exit: `xp < xp_to_next_level(level)`. At the level cap the
/// surplus is clamped so the invariant holds there too.
pub fn gain_experience(creature: &mut Creature, amount: u64) -> bool {
    creature.xp += amount;
    let mut leveled_up = false;

    while creature.level < MAX_LEVEL && creature.xp >= xp_to_next_level(creature.level) {
        creature.xp -= xp_to_next_level(creature.level);
        creature.level += 1;
        creature.stats = creature.stats.scaled(LEVEL_GROWTH_FACTOR);

        // Heal on level up.
        creature.battle.current_hp = creature.stats.hp_max;
        creature.battle.current_mp = creature.stats.mp_max;

        leveled_up = true;
    }

    if creature.level == MAX_LEVEL {
        creature.xp = creature.xp.min(xp_to_next_level(MAX_LEVEL) - 1);
    }

    leveled_up
}

/// Validate the evolution preconditions without mutating.
///
/// Returns the target stage on success:
/// - stage 0 -> 1 requires level >= 45
/// - stage 1 -> 2 requires level >= 90
/// - beyond stage 2 only mythical creatures may continue
pub fn evolution_gate(creature: &Creature) -> Result<u8, GameError> {
    match creature.evolution_stage {
        0 if creature.level < EVOLUTION_LEVEL_1 => Err(GameError::EvolutionLevelTooLow {
            target_stage: 1,
            required: EVOLUTION_LEVEL_1,
            level: creature.level,
        }),
        1 if creature.level < EVOLUTION_LEVEL_2 => Err(GameError::EvolutionLevelTooLow {
            target_stage: 2,
            required: EVOLUTION_LEVEL_2,
            level: creature.level,
        }),
        stage if stage >= 2 && !creature.is_mythical => Err(GameError::FinalStageReached),
        stage => Ok(stage + 1),
    }
}

/// Write generator-supplied evolved stats and advance the stage.
///
/// The caller must have passed [`evolution_gate`] first; this function does
/// not re-check it. Stats never shrink: each evolved stat is floored at its
/// pre-evolution value. Battle state is restored to the new maxima.
pub fn apply_evolution(creature: &mut Creature, new_name: Option<String>, new_stats: StatBlock) {
    if let Some(name) = new_name {
        creature.name = name;
    }
    creature.stats = StatBlock {
        hp_max: new_stats.hp_max.max(creature.stats.hp_max),
        mp_max: new_stats.mp_max.max(creature.stats.mp_max),
        attack: new_stats.attack.max(creature.stats.attack),
        defense: new_stats.defense.max(creature.stats.defense),
        speed: new_stats.speed.max(creature.stats.speed),
    };
    creature.evolution_stage += 1;
    creature.restore();
}
