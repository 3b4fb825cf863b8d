//! Persistent storage interface.
//!
//! The real game persists to a relational store; the engine only ever talks
//! to the [`Store`] trait. Creatures are keyed by their stable trade
//! identifier (upsert semantics), abilities by name with a many-to-many
//! link carried on the creature side, and the single player profile holds
//! the currency balance and inventory.
//!
//! [`MemoryStore`] is the in-crate implementation used by tests and
//! offline/single-profile play. The facade owns its store mutably, so
//! read-then-write sequences (deduct currency, grant item) are serialized
//! by construction.

use rustc_hash::FxHashMap;
use uuid::Uuid;

use crate::creatures::{Ability, Creature};
use crate::economy::{ItemCategory, ItemStack};

/// Repository interface for the single player profile.
pub trait Store {
    /// Insert the creature if its trade id is unknown, otherwise update the
    /// stored record's mutable fields. Returns the local storage id.
    ///
    /// Battle-transient state is never persisted; stored copies are always
    /// at full health.
    fn upsert_creature(&mut self, creature: &Creature) -> u64;

    /// Fetch one creature by trade id, battle-ready (full health).
    fn creature_by_trade_id(&self, trade_id: Uuid) -> Option<Creature>;

    /// All owned creatures in acquisition order, battle-ready.
    fn creatures(&self) -> Vec<Creature>;

    /// Count of owned creatures.
    fn creature_count(&self) -> usize;

    /// Insert or update an ability definition in the shared pool.
    fn upsert_ability(&mut self, ability: &Ability);

    /// Fetch one ability definition by name.
    fn ability(&self, name: &str) -> Option<Ability>;

    /// All pooled ability definitions.
    fn abilities(&self) -> Vec<Ability>;

    /// Current stock of an item (0 if unknown).
    fn item_quantity(&self, id: &str) -> u32;

    /// Category metadata for an item, if the record exists.
    fn item_category(&self, id: &str) -> Option<ItemCategory>;

    /// Write an item's stock, creating the record with `category` if new.
    fn set_item(&mut self, id: &str, quantity: u32, category: ItemCategory);

    /// All inventory lines with stock remaining.
    fn items(&self) -> Vec<ItemStack>;

    /// Player currency balance.
    fn balance(&self) -> i64;

    /// Overwrite the player currency balance.
    fn set_balance(&mut self, balance: i64);

    /// Full-profile wipe: creatures, abilities, inventory; balance reset to
    /// `starting_balance`.
    fn wipe(&mut self, starting_balance: i64);
}

/// In-memory store backing tests and offline play.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    creatures: FxHashMap<Uuid, Creature>,
    /// Acquisition order; the first entries form the default team.
    order: Vec<Uuid>,
    abilities: FxHashMap<String, Ability>,
    inventory: FxHashMap<String, ItemStack>,
    balance: i64,
    next_storage_id: u64,
}

impl MemoryStore {
    /// Create an empty store with a zero balance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store with the given starting balance.
    #[must_use]
    pub fn with_balance(balance: i64) -> Self {
        Self {
            balance,
            ..Self::default()
        }
    }
}

impl Store for MemoryStore {
    fn upsert_creature(&mut self, creature: &Creature) -> u64 {
        let mut stored = creature.clone();
        stored.restore();

        match self.creatures.get(&creature.trade_id) {
            Some(existing) => {
                // Update path: local id and acquisition order are stable.
                let id = existing.storage_id.unwrap_or(0);
                stored.storage_id = existing.storage_id;
                self.creatures.insert(creature.trade_id, stored);
                id
            }
            None => {
                self.next_storage_id += 1;
                let id = self.next_storage_id;
                stored.storage_id = Some(id);
                self.creatures.insert(creature.trade_id, stored);
                self.order.push(creature.trade_id);
                id
            }
        }
    }

    fn creature_by_trade_id(&self, trade_id: Uuid) -> Option<Creature> {
        self.creatures.get(&trade_id).cloned()
    }

    fn creatures(&self) -> Vec<Creature> {
        self.order
            .iter()
            .filter_map(|id| self.creatures.get(id))
            .cloned()
            .collect()
    }

    fn creature_count(&self) -> usize {
        self.creatures.len()
    }

    fn upsert_ability(&mut self, ability: &Ability) {
        self.abilities.insert(ability.name.clone(), ability.clone());
    }

    fn ability(&self, name: &str) -> Option<Ability> {
        self.abilities.get(name).cloned()
    }

    fn abilities(&self) -> Vec<Ability> {
        self.abilities.values().cloned().collect()
    }

    fn item_quantity(&self, id: &str) -> u32 {
        self.inventory.get(id).map_or(0, |s| s.quantity)
    }

    fn item_category(&self, id: &str) -> Option<ItemCategory> {
        self.inventory.get(id).map(|s| s.category)
    }

    fn set_item(&mut self, id: &str, quantity: u32, category: ItemCategory) {
        self.inventory.insert(
            id.to_string(),
            ItemStack {
                id: id.to_string(),
                quantity,
                category,
            },
        );
    }

    fn items(&self) -> Vec<ItemStack> {
        let mut items: Vec<_> = self
            .inventory
            .values()
            .filter(|s| s.quantity > 0)
            .cloned()
            .collect();
        items.sort_by(|a, b| a.id.cmp(&b.id));
        items
    }

    fn balance(&self) -> i64 {
        self.balance
    }

    fn set_balance(&mut self, balance: i64) {
        self.balance = balance;
    }

    fn wipe(&mut self, starting_balance: i64) {
        self.creatures.clear();
        self.order.clear();
        self.abilities.clear();
        self.inventory.clear();
        self.balance = starting_balance;
        self.next_storage_id = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creatures::StatBlock;
    use crate::elements::Element;

    fn creature(name: &str) -> Creature {
        Creature::new(
            name,
            Element::Water,
            5,
            StatBlock {
                hp_max: 50,
                mp_max: 20,
                attack: 10,
                defense: 10,
                speed: 10,
            },
        )
    }

    #[test]
    fn test_insert_assigns_storage_id() {
        let mut store = MemoryStore::new();
        let c = creature("First");
        let id = store.upsert_creature(&c);
        assert_eq!(id, 1);

        let fetched = store.creature_by_trade_id(c.trade_id).unwrap();
        assert_eq!(fetched.storage_id, Some(1));
        assert_eq!(fetched.name, "First");
    }

    #[test]
    fn test_upsert_updates_in_place() {
        let mut store = MemoryStore::new();
        let mut c = creature("Mon");
        let id = store.upsert_creature(&c);

        c.level = 20;
        c.name = "Mon Prime".into();
        let id2 = store.upsert_creature(&c);

        assert_eq!(id, id2);
        assert_eq!(store.creature_count(), 1);
        let fetched = store.creature_by_trade_id(c.trade_id).unwrap();
        assert_eq!(fetched.level, 20);
        assert_eq!(fetched.name, "Mon Prime");
    }

    #[test]
    fn test_stored_creatures_are_battle_ready() {
        let mut store = MemoryStore::new();
        let mut c = creature("Hurt");
        c.battle.current_hp = 1;
        store.upsert_creature(&c);

        let fetched = store.creature_by_trade_id(c.trade_id).unwrap();
        assert_eq!(fetched.battle.current_hp, fetched.stats.hp_max);
    }

    #[test]
    fn test_creatures_preserve_acquisition_order() {
        let mut store = MemoryStore::new();
        for name in ["A", "B", "C"] {
            store.upsert_creature(&creature(name));
        }

        let names: Vec<_> = store.creatures().into_iter().map(|c| c.name).collect();
        assert_eq!(names, ["A", "B", "C"]);
    }

    #[test]
    fn test_ability_pool_upsert_by_name() {
        let mut store = MemoryStore::new();
        store.upsert_ability(&Ability::damaging("Spark", Element::Electric, 25));
        store.upsert_ability(&Ability::damaging("Spark", Element::Electric, 40));

        assert_eq!(store.abilities().len(), 1);
        assert_eq!(store.ability("Spark").unwrap().damage, 40);
    }

    #[test]
    fn test_items_lists_only_in_stock() {
        let mut store = MemoryStore::new();
        store.set_item("ball", 2, ItemCategory::Ball);
        store.set_item("potion", 0, ItemCategory::Potion);

        let items = store.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "ball");
    }

    #[test]
    fn test_wipe_resets_everything() {
        let mut store = MemoryStore::with_balance(5000);
        store.upsert_creature(&creature("Gone"));
        store.set_item("ball", 3, ItemCategory::Ball);
        store.upsert_ability(&Ability::damaging("Lost", Element::Dark, 10));

        store.wipe(1000);

        assert_eq!(store.creature_count(), 0);
        assert!(store.abilities().is_empty());
        assert!(store.items().is_empty());
        assert_eq!(store.balance(), 1000);
    }
}
