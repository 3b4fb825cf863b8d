//! Static elemental effectiveness chart.
//!
//! The chart is a lookup from (attacker element, defender element) to a
//! damage multiplier. It is deliberately asymmetric (Water dominates Fire
//! without Fire resisting Water by the same amount) and sparse: unspecified
//! pairs default to 1.0. A multiplier of 0.0 is full immunity and a valid,
//! non-error outcome for callers.

use rustc_hash::FxHashMap;
use std::sync::OnceLock;

use super::Element;

use Element::*;

/// (attacker, defender, multiplier) rows. Everything absent is 1.0.
const CHART: &[(Element, Element, f64)] = &[
    (Water, Fire, 2.0),
    (Water, Stone, 2.0),
    (Water, Beast, 2.0),
    (Water, Plant, 0.5),
    (Water, Electric, 0.5),
    (Fire, Plant, 2.0),
    (Fire, Metal, 2.0),
    (Fire, Beast, 2.0),
    (Fire, Water, 0.5),
    (Fire, Stone, 0.5),
    (Plant, Water, 2.0),
    (Plant, Stone, 2.0),
    (Plant, Psychic, 1.5),
    (Plant, Fire, 0.5),
    (Plant, Poison, 0.5),
    (Electric, Water, 2.0),
    (Electric, Metal, 2.0),
    (Electric, Stone, 0.5),
    (Electric, Plant, 0.5),
    (Stone, Fire, 2.0),
    (Stone, Electric, 2.0),
    (Stone, Poison, 2.0),
    (Stone, Metal, 0.5),
    (Stone, Water, 0.5),
    (Space, Time, 2.0),
    (Space, Dark, 1.5),
    (Space, Space, 0.5),
    (Time, Light, 2.0),
    (Time, Poison, 2.0),
    (Time, Time, 0.5),
    (Light, Dark, 2.0),
    (Light, Ghost, 2.0),
    (Light, Light, 0.5),
    (Light, Time, 0.5),
    (Dark, Psychic, 2.0),
    (Dark, Ghost, 2.0),
    (Dark, Light, 2.0),
    (Dark, Dark, 0.5),
    (Psychic, Beast, 2.0),
    (Psychic, Poison, 2.0),
    (Psychic, Dark, 0.5),
    (Psychic, Metal, 0.5),
    (Ghost, Psychic, 2.0),
    (Ghost, Normal, 0.0),
    (Ghost, Dark, 0.5),
    (Poison, Plant, 2.0),
    (Poison, Beast, 2.0),
    (Poison, Metal, 0.5),
    (Poison, Stone, 0.5),
    (Metal, Plant, 2.0),
    (Metal, Stone, 2.0),
    (Metal, Ghost, 2.0),
    (Metal, Fire, 0.5),
    (Metal, Electric, 0.5),
    (Beast, Normal, 2.0),
    (Beast, Psychic, 0.5),
    (Beast, Poison, 0.5),
    (Normal, Ghost, 0.0),
    (Normal, Metal, 0.5),
];

/// Elemental effectiveness lookup.
///
/// Built once from the static chart data and immutable thereafter.
///
/// ```
/// use menagerie::elements::{Element, TypeChart};
///
/// let chart = TypeChart::global();
/// assert_eq!(chart.effectiveness(Element::Water, Element::Fire, None), 2.0);
/// // Dual-typed defenders multiply both rows.
/// let vs_dual = chart.effectiveness(Element::Water, Element::Fire, Some(Element::Stone));
/// assert_eq!(vs_dual, 4.0);
/// ```
#[derive(Clone, Debug)]
pub struct TypeChart {
    multipliers: FxHashMap<(Element, Element), f64>,
}

impl TypeChart {
    /// Build the chart from the static table.
    #[must_use]
    pub fn new() -> Self {
        let mut multipliers = FxHashMap::default();
        for &(attacker, defender, m) in CHART {
            multipliers.insert((attacker, defender), m);
        }
        Self { multipliers }
    }

    /// Process-wide shared chart instance.
    #[must_use]
    pub fn global() -> &'static TypeChart {
        static CHART: OnceLock<TypeChart> = OnceLock::new();
        CHART.get_or_init(TypeChart::new)
    }

    /// Raw multiplier for one attacker/defender pair. Defaults to 1.0.
    #[must_use]
    pub fn multiplier(&self, attacker: Element, defender: Element) -> f64 {
        self.multipliers
            .get(&(attacker, defender))
            .copied()
            .unwrap_or(1.0)
    }

    /// Effectiveness against a possibly dual-typed defender.
    ///
    /// The primary and (if present) secondary multipliers are multiplied
    /// together, so 2.0 x 2.0 = 4.0 and 2.0 x 0.0 = 0.0.
    #[must_use]
    pub fn effectiveness(
        &self,
        attacker: Element,
        defender_primary: Element,
        defender_secondary: Option<Element>,
    ) -> f64 {
        let mut mult = self.multiplier(attacker, defender_primary);
        if let Some(secondary) = defender_secondary {
            mult *= self.multiplier(attacker, secondary);
        }
        mult
    }
}

impl Default for TypeChart {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_pairs() {
        let chart = TypeChart::new();
        assert_eq!(chart.multiplier(Water, Fire), 2.0);
        assert_eq!(chart.multiplier(Fire, Water), 0.5);
        assert_eq!(chart.multiplier(Ghost, Normal), 0.0);
        assert_eq!(chart.multiplier(Normal, Ghost), 0.0);
        assert_eq!(chart.multiplier(Plant, Psychic), 1.5);
    }

    #[test]
    fn test_unspecified_pairs_default_to_neutral() {
        let chart = TypeChart::new();
        assert_eq!(chart.multiplier(Water, Space), 1.0);
        assert_eq!(chart.multiplier(Normal, Normal), 1.0);
    }

    #[test]
    fn test_all_multipliers_in_allowed_set() {
        let chart = TypeChart::new();
        let allowed = [0.0, 0.5, 1.0, 1.5, 2.0];
        for attacker in Element::ALL {
            for defender in Element::ALL {
                let m = chart.multiplier(attacker, defender);
                assert!(
                    allowed.contains(&m),
                    "{attacker} vs {defender} = {m} not in allowed set"
                );
            }
        }
    }

    #[test]
    fn test_chart_is_asymmetric() {
        let chart = TypeChart::new();
        // Water beats Fire 2.0, but Fire only resists at 0.5 - not mirrored.
        assert_ne!(chart.multiplier(Water, Fire), chart.multiplier(Fire, Water));
    }

    #[test]
    fn test_dual_type_multiplies() {
        let chart = TypeChart::new();
        assert_eq!(chart.effectiveness(Water, Fire, Some(Stone)), 4.0);
        assert_eq!(chart.effectiveness(Water, Fire, None), 2.0);
        // Immunity on either defending type zeroes the whole attack.
        assert_eq!(chart.effectiveness(Ghost, Psychic, Some(Normal)), 0.0);
    }

    #[test]
    fn test_effectiveness_is_deterministic() {
        let chart = TypeChart::global();
        for _ in 0..3 {
            assert_eq!(chart.effectiveness(Dark, Light, None), 2.0);
        }
    }
}
