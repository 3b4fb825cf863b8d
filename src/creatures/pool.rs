//! Shared ability pool.
//!
//! The pool interns one [`Ability`] definition per name. Creatures store
//! names only, so two creatures that know "Tidal Crush" reference the same
//! definition rather than carrying copies.

use rustc_hash::FxHashMap;

use super::Ability;

/// Interning registry of ability definitions, keyed by name.
///
/// ## Example
///
/// ```
/// use menagerie::creatures::{Ability, AbilityPool};
/// use menagerie::elements::Element;
///
/// let mut pool = AbilityPool::new();
/// pool.intern(Ability::damaging("Spark", Element::Electric, 25));
///
/// let spark = pool.get("Spark").unwrap();
/// assert_eq!(spark.damage, 25);
/// ```
#[derive(Clone, Debug, Default)]
pub struct AbilityPool {
    abilities: FxHashMap<String, Ability>,
}

impl AbilityPool {
    /// Create an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a definition, returning the interned name.
    ///
    /// Re-interning an existing name keeps the pool as the single source of
    /// truth for that ability's parameters.
    pub fn intern(&mut self, ability: Ability) -> String {
        let name = ability.name.clone();
        self.abilities.insert(name.clone(), ability);
        name
    }

    /// Look up a definition by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Ability> {
        self.abilities.get(name)
    }

    /// Check whether a name is interned.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.abilities.contains_key(name)
    }

    /// Number of interned definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.abilities.len()
    }

    /// Whether the pool is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.abilities.is_empty()
    }

    /// Iterate over all definitions.
    pub fn iter(&self) -> impl Iterator<Item = &Ability> {
        self.abilities.values()
    }

    /// Resolve a list of names to definitions, skipping unknown ones.
    pub fn resolve<'a>(
        &'a self,
        names: impl IntoIterator<Item = &'a str> + 'a,
    ) -> impl Iterator<Item = &'a Ability> + 'a {
        names.into_iter().filter_map(|n| self.get(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::Element;

    #[test]
    fn test_intern_and_get() {
        let mut pool = AbilityPool::new();
        pool.intern(Ability::damaging("Ember", Element::Fire, 30));

        assert!(pool.contains("Ember"));
        assert_eq!(pool.get("Ember").unwrap().damage, 30);
        assert!(pool.get("Missing").is_none());
    }

    #[test]
    fn test_reintern_replaces_definition() {
        let mut pool = AbilityPool::new();
        pool.intern(Ability::damaging("Ember", Element::Fire, 30));
        pool.intern(Ability::damaging("Ember", Element::Fire, 45));

        assert_eq!(pool.len(), 1);
        assert_eq!(pool.get("Ember").unwrap().damage, 45);
    }

    #[test]
    fn test_resolve_skips_unknown_names() {
        let mut pool = AbilityPool::new();
        pool.intern(Ability::damaging("A", Element::Normal, 10));
        pool.intern(Ability::damaging("B", Element::Normal, 20));

        let names = ["A", "ghost-move", "B"];
        let resolved: Vec<_> = pool.resolve(names.iter().copied()).collect();
        assert_eq!(resolved.len(), 2);
    }

    #[test]
    fn test_shared_not_duplicated() {
        let mut pool = AbilityPool::new();
        let name = pool.intern(Ability::damaging("Shared", Element::Psychic, 40));

        // Two creatures referencing the same name see the same definition.
        let first = pool.get(&name).unwrap() as *const Ability;
        let second = pool.get(&name).unwrap() as *const Ability;
        assert_eq!(first, second);
    }
}
