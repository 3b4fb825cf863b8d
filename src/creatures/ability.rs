//! Ability definitions.
//!
//! Abilities are shared: one definition lives in the [`AbilityPool`] and
//! every creature that knows the move references it by name. Battle-only
//! cooldown counters live in the creature's [`BattleState`], never here.
//!
//! [`AbilityPool`]: super::AbilityPool
//! [`BattleState`]: super::BattleState

use serde::{Deserialize, Serialize};

use crate::elements::Element;

/// A combat ability definition.
///
/// `name` is the unique key within the global ability pool.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ability {
    pub name: String,
    pub description: String,
    pub element: Element,
    /// Base power when attacking. 0 for pure utility moves.
    pub damage: i32,
    /// Health restored to the user.
    pub heal: i32,
    /// Resource (mana) cost per use.
    pub cost_mp: i32,
    /// Health cost per use (sacrificial moves).
    pub cost_hp: i32,
    /// Turns before this ability can be reused.
    pub cooldown_local: u8,
    /// Turns before the user can act again after this ability.
    pub cooldown_global: u8,
    /// Turns the target is stunned.
    pub stun_duration: u8,
    /// Percentage of dealt damage returned to the user as health.
    pub drain_percent: u8,
    pub is_legendary: bool,
    /// Generated artwork handle; opaque to the engine.
    pub image_path: Option<String>,
}

impl Ability {
    /// Create a plain damaging ability. Other fields default to zero.
    #[must_use]
    pub fn damaging(name: impl Into<String>, element: Element, damage: i32) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            element,
            damage,
            heal: 0,
            cost_mp: 0,
            cost_hp: 0,
            cooldown_local: 0,
            cooldown_global: 0,
            stun_duration: 0,
            drain_percent: 0,
            is_legendary: false,
            image_path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damaging_constructor() {
        let a = Ability::damaging("Tidal Crush", Element::Water, 60);
        assert_eq!(a.name, "Tidal Crush");
        assert_eq!(a.element, Element::Water);
        assert_eq!(a.damage, 60);
        assert_eq!(a.heal, 0);
        assert!(!a.is_legendary);
    }

    #[test]
    fn test_serde_round_trip() {
        let a = Ability::damaging("Ember", Element::Fire, 30);
        let json = serde_json::to_string(&a).unwrap();
        let back: Ability = serde_json::from_str(&json).unwrap();
        assert_eq!(a, back);
    }
}
