//! Creature value objects.
//!
//! A [`Creature`] splits cleanly into persisted identity/progression fields
//! and a battle-transient [`BattleState`] that is never written to storage
//! or trade codes. Stat boosts from consumables live in `BattleState` as
//! explicit overrides, not as mutations of the base stats.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use uuid::Uuid;

use crate::elements::Element;
use crate::progression;

/// The five base stats. All positive; non-decreasing under normal play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBlock {
    pub hp_max: i32,
    pub mp_max: i32,
    pub attack: i32,
    pub defense: i32,
    pub speed: i32,
}

impl StatBlock {
    /// Multiply every stat by `factor`, truncating to integer.
    ///
    /// Never lets a stat shrink: level-up and evolution growth are
    /// monotonically non-decreasing even when truncation would round a
    /// small stat back down.
    #[must_use]
    pub fn scaled(self, factor: f64) -> StatBlock {
        let grow = |v: i32| ((v as f64 * factor) as i32).max(v);
        StatBlock {
            hp_max: grow(self.hp_max),
            mp_max: grow(self.mp_max),
            attack: grow(self.attack),
            defense: grow(self.defense),
            speed: grow(self.speed),
        }
    }
}

/// In-battle transient state. Not persisted, not traded.
///
/// Reset to full via [`Creature::restore`] whenever a creature leaves or
/// enters combat.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BattleState {
    pub current_hp: i32,
    pub current_mp: i32,
    /// Attack override from a consumable boost, if any.
    pub attack_override: Option<i32>,
    /// Defense override from a consumable boost, if any.
    pub defense_override: Option<i32>,
    /// Speed override from a consumable boost, if any.
    pub speed_override: Option<i32>,
    /// Per-ability cooldown counters, keyed by ability name.
    pub cooldowns: FxHashMap<String, u8>,
}

impl BattleState {
    /// Fresh battle state at full health and resource.
    #[must_use]
    pub fn full(stats: &StatBlock) -> Self {
        Self {
            current_hp: stats.hp_max,
            current_mp: stats.mp_max,
            ..Self::default()
        }
    }
}

/// A game creature: the unit owned, battled, and traded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Creature {
    /// Globally unique, stable trade identifier. Immutable once persisted.
    pub trade_id: Uuid,
    /// Local storage identifier, assigned by the repository.
    #[serde(default)]
    pub storage_id: Option<u64>,
    pub name: String,
    pub is_mythical: bool,
    pub element_primary: Element,
    pub element_secondary: Option<Element>,
    /// Level in `1..=100`.
    pub level: u32,
    /// Accumulated experience; invariant: always below the next-level
    /// requirement after progression runs.
    pub xp: u64,
    /// Evolution stage 0, 1, or 2. Never decreases.
    pub evolution_stage: u8,
    pub stats: StatBlock,
    /// Generated artwork handle; opaque to the engine.
    pub image_path: Option<String>,
    /// Names of known abilities, referencing the shared pool.
    pub abilities: SmallVec<[String; 4]>,
    /// Battle-transient state. Skipped by serialization; hydrate with
    /// [`Creature::restore`] after constructing from stored/traded data.
    #[serde(skip)]
    pub battle: BattleState,
}

impl Creature {
    /// Create a creature with a fresh trade identifier and full battle state.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        element_primary: Element,
        level: u32,
        stats: StatBlock,
    ) -> Self {
        let battle = BattleState::full(&stats);
        Self {
            trade_id: Uuid::new_v4(),
            storage_id: None,
            name: name.into(),
            is_mythical: false,
            element_primary,
            element_secondary: None,
            level,
            xp: 0,
            evolution_stage: 0,
            stats,
            image_path: None,
            abilities: SmallVec::new(),
            battle,
        }
    }

    /// Experience needed to reach the next level from the current one.
    #[must_use]
    pub fn xp_to_next_level(&self) -> u64 {
        progression::xp_to_next_level(self.level)
    }

    /// Effective attack: boost override if present, else base stat.
    #[must_use]
    pub fn effective_attack(&self) -> i32 {
        self.battle.attack_override.unwrap_or(self.stats.attack)
    }

    /// Effective defense: boost override if present, else base stat.
    #[must_use]
    pub fn effective_defense(&self) -> i32 {
        self.battle.defense_override.unwrap_or(self.stats.defense)
    }

    /// Effective speed: boost override if present, else base stat.
    #[must_use]
    pub fn effective_speed(&self) -> i32 {
        self.battle.speed_override.unwrap_or(self.stats.speed)
    }

    /// True when current health has reached zero.
    #[must_use]
    pub fn is_fainted(&self) -> bool {
        self.battle.current_hp <= 0
    }

    /// Reset battle state: full health/resource, overrides and cooldowns
    /// cleared.
    pub fn restore(&mut self) {
        self.battle = BattleState::full(&self.stats);
    }

    /// True if this creature shares an element with `other`.
    ///
    /// Compatibility rule for ability copying: the source's primary element
    /// must match either of the target's element slots.
    #[must_use]
    pub fn shares_element_with(&self, other: &Creature) -> bool {
        self.element_primary == other.element_primary
            || Some(self.element_primary) == other.element_secondary
    }

    /// Whether this creature already knows the named ability.
    #[must_use]
    pub fn knows_ability(&self, name: &str) -> bool {
        self.abilities.iter().any(|a| a == name)
    }
}
