//! Content generator interface.
//!
//! The generative backend (an LLM producing stat blocks, ability lists, and
//! artwork) lives outside this crate; the engine consumes it through the
//! [`ContentGenerator`] trait. Generator calls are the only long-latency
//! operations in the system and every call site degrades to a deterministic
//! safe fallback on failure, so a dead backend never crashes gameplay.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::creatures::{Ability, Creature, StatBlock};
use crate::elements::Element;
use crate::progression::{STAGE_1_GROWTH_BAND, STAGE_2_GROWTH_BAND};

/// Failures from the generative backend.
///
/// Recovered locally via fallback values; never fatal.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The backend could not be reached.
    #[error("content generator unavailable: {0}")]
    Unavailable(String),
    /// The backend answered with output the engine could not use.
    #[error("content generator returned malformed output: {0}")]
    Malformed(String),
}

/// Prompt context for stat generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatContext {
    /// A wild encounter.
    Wild,
    /// A boss encounter; the engine applies the stat multiplier itself.
    Boss,
    /// A weak level-1 starter from the recruitment shop.
    Starter,
}

/// Stat block for a newly generated creature.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeneratedStats {
    pub name: String,
    pub is_mythical: bool,
    pub element_primary: Element,
    pub element_secondary: Option<Element>,
    pub hp_max: i32,
    pub mp_max: i32,
    pub attack: i32,
    pub defense: i32,
    pub speed: i32,
    /// Visual description, forwarded to artwork generation.
    pub description: String,
}

/// One generated ability.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeneratedAbility {
    pub name: String,
    pub description: String,
    pub element: Element,
    pub damage: i32,
    pub heal: i32,
    pub cost_mp: i32,
    pub cost_hp: i32,
    pub cooldown_local: u8,
    pub cooldown_global: u8,
    pub stun_duration: u8,
    pub drain_percent: u8,
    pub is_legendary: bool,
    pub visual_description: String,
}

/// Generator output for an evolved form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvolvedStats {
    pub name: String,
    pub hp_max: i32,
    pub mp_max: i32,
    pub attack: i32,
    pub defense: i32,
    pub speed: i32,
    pub description: String,
}

/// The generative-content backend, as seen by the engine.
///
/// Implementations may block on network calls; they must not hold any
/// engine resource while doing so. All four operations are fallible and
/// callers substitute fallbacks rather than propagate.
pub trait ContentGenerator {
    /// Produce a stat block appropriate for `level` in the given context.
    fn generate_stats(
        &mut self,
        level: u32,
        context: StatContext,
    ) -> Result<GeneratedStats, ContentError>;

    /// Produce `count` abilities themed around `element`.
    fn generate_abilities(
        &mut self,
        element: Element,
        count: usize,
    ) -> Result<Vec<GeneratedAbility>, ContentError>;

    /// Produce artwork for `description`, filed under `key`.
    ///
    /// Returns an opaque path/handle; the engine never opens it.
    fn generate_artwork(&mut self, description: &str, key: &str) -> Result<String, ContentError>;

    /// Produce the evolved form of a creature advancing past `stage`.
    fn evolve_stats(&mut self, creature: &Creature, stage: u8)
        -> Result<EvolvedStats, ContentError>;
}

impl GeneratedStats {
    /// Deterministic minimal-stat fallback used when generation fails.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            name: "Glitch".into(),
            is_mythical: false,
            element_primary: Element::Normal,
            element_secondary: None,
            hp_max: 20,
            mp_max: 10,
            attack: 5,
            defense: 5,
            speed: 5,
            description: "A glitchy pixelated blob.".into(),
        }
    }

    /// Build a creature at `level` from this stat block.
    ///
    /// The creature gets a fresh trade identifier and full battle state.
    #[must_use]
    pub fn into_creature(self, level: u32) -> Creature {
        let mut creature = Creature::new(
            self.name,
            self.element_primary,
            level,
            StatBlock {
                hp_max: self.hp_max,
                mp_max: self.mp_max,
                attack: self.attack,
                defense: self.defense,
                speed: self.speed,
            },
        );
        creature.is_mythical = self.is_mythical;
        creature.element_secondary = self.element_secondary;
        creature
    }
}

impl From<GeneratedAbility> for Ability {
    fn from(g: GeneratedAbility) -> Self {
        Ability {
            name: g.name,
            description: g.description,
            element: g.element,
            damage: g.damage,
            heal: g.heal,
            cost_mp: g.cost_mp,
            cost_hp: g.cost_hp,
            cooldown_local: g.cooldown_local,
            cooldown_global: g.cooldown_global,
            stun_duration: g.stun_duration,
            drain_percent: g.drain_percent,
            is_legendary: g.is_legendary,
            image_path: None,
        }
    }
}

/// Placeholder artwork handle for failed or offline generation.
pub const PLACEHOLDER_ARTWORK: &str = "assets/placeholder.png";

/// Offline generator producing deterministic safe content.
///
/// Ships with the crate for tests and for playing without a backend:
/// minimal "Glitch" stats, an empty ability list, placeholder artwork, and
/// evolutions that grow by the minimum of the stage's growth band.
#[derive(Clone, Copy, Debug, Default)]
pub struct FallbackGenerator;

impl ContentGenerator for FallbackGenerator {
    fn generate_stats(
        &mut self,
        _level: u32,
        _context: StatContext,
    ) -> Result<GeneratedStats, ContentError> {
        Ok(GeneratedStats::fallback())
    }

    fn generate_abilities(
        &mut self,
        _element: Element,
        _count: usize,
    ) -> Result<Vec<GeneratedAbility>, ContentError> {
        Ok(Vec::new())
    }

    fn generate_artwork(&mut self, _description: &str, _key: &str) -> Result<String, ContentError> {
        Ok(PLACEHOLDER_ARTWORK.to_string())
    }

    fn evolve_stats(
        &mut self,
        creature: &Creature,
        stage: u8,
    ) -> Result<EvolvedStats, ContentError> {
        let band = if stage == 0 {
            STAGE_1_GROWTH_BAND
        } else {
            STAGE_2_GROWTH_BAND
        };
        let grown = creature.stats.scaled(band.0);
        Ok(EvolvedStats {
            name: creature.name.clone(),
            hp_max: grown.hp_max,
            mp_max: grown.mp_max,
            attack: grown.attack,
            defense: grown.defense,
            speed: grown.speed,
            description: format!("An evolved form of {}.", creature.name),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_stats_are_minimal_and_fixed() {
        let a = GeneratedStats::fallback();
        let b = GeneratedStats::fallback();
        assert_eq!(a, b);
        assert_eq!(a.name, "Glitch");
        assert_eq!(a.hp_max, 20);
        assert_eq!(a.element_primary, Element::Normal);
        assert!(!a.is_mythical);
    }

    #[test]
    fn test_into_creature_sets_level_and_battle_state() {
        let c = GeneratedStats::fallback().into_creature(7);
        assert_eq!(c.level, 7);
        assert_eq!(c.stats.hp_max, 20);
        assert_eq!(c.battle.current_hp, 20);
        assert_eq!(c.evolution_stage, 0);
    }

    #[test]
    fn test_fallback_generator_is_total() {
        let mut g = FallbackGenerator;
        assert!(g.generate_stats(10, StatContext::Wild).is_ok());
        assert!(g
            .generate_abilities(Element::Fire, 4)
            .unwrap()
            .is_empty());
        assert_eq!(
            g.generate_artwork("anything", "key").unwrap(),
            PLACEHOLDER_ARTWORK
        );
    }

    #[test]
    fn test_fallback_evolution_grows_by_band_minimum() {
        let creature = GeneratedStats::fallback().into_creature(45);
        let mut g = FallbackGenerator;

        let evolved = g.evolve_stats(&creature, 0).unwrap();
        // 20 * 1.05 = 21.
        assert_eq!(evolved.hp_max, 21);
        assert!(evolved.attack >= creature.stats.attack);
    }
}
