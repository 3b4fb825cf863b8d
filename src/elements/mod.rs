//! Elemental types and the effectiveness chart.

mod chart;

pub use chart::TypeChart;

use serde::{Deserialize, Serialize};

/// Elemental type of a creature or ability.
///
/// The chart in [`TypeChart`] defines how these interact; the enum itself
/// carries no behavior beyond identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    Water,
    Fire,
    Electric,
    Plant,
    Stone,
    Space,
    Time,
    Light,
    Dark,
    Psychic,
    Ghost,
    Poison,
    Metal,
    Beast,
    Normal,
}

impl Element {
    /// All elements, in chart order.
    pub const ALL: [Element; 15] = [
        Element::Water,
        Element::Fire,
        Element::Electric,
        Element::Plant,
        Element::Stone,
        Element::Space,
        Element::Time,
        Element::Light,
        Element::Dark,
        Element::Psychic,
        Element::Ghost,
        Element::Poison,
        Element::Metal,
        Element::Beast,
        Element::Normal,
    ];
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Element::Water => "Water",
            Element::Fire => "Fire",
            Element::Electric => "Electric",
            Element::Plant => "Plant",
            Element::Stone => "Stone",
            Element::Space => "Space",
            Element::Time => "Time",
            Element::Light => "Light",
            Element::Dark => "Dark",
            Element::Psychic => "Psychic",
            Element::Ghost => "Ghost",
            Element::Poison => "Poison",
            Element::Metal => "Metal",
            Element::Beast => "Beast",
            Element::Normal => "Normal",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_exhaustive() {
        assert_eq!(Element::ALL.len(), 15);
        // No duplicates.
        let mut seen = std::collections::HashSet::new();
        for e in Element::ALL {
            assert!(seen.insert(e));
        }
    }

    #[test]
    fn test_serde_round_trip() {
        let json = serde_json::to_string(&Element::Psychic).unwrap();
        let back: Element = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Element::Psychic);
    }
}
