//! Economy and inventory service.
//!
//! Two gating primitives guard every purchasable action in the game:
//! [`afford_and_deduct`] for currency and [`consume_item`] for item stock.
//! Both check-then-mutate atomically and report denial as `false` with no
//! state change, so callers gate first and act second - never act and roll
//! back.

use serde::{Deserialize, Serialize};

use crate::storage::Store;

/// Inventory item category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemCategory {
    /// Capture devices.
    Ball,
    /// Health restoratives usable on conscious creatures.
    Potion,
    /// Restoratives usable on fainted creatures.
    Revive,
    /// Transient combat stat boosts.
    Boost,
    /// Copies an ability between same-element creatures.
    AbilityCopier,
}

/// One inventory line: item id, stock, and category metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    pub id: String,
    pub quantity: u32,
    pub category: ItemCategory,
}

/// One purchasable shop line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShopEntry {
    pub id: &'static str,
    pub cost: i64,
    pub category: ItemCategory,
}

/// The item shop catalog.
pub const CATALOG: &[ShopEntry] = &[
    ShopEntry {
        id: "ball",
        cost: 100,
        category: ItemCategory::Ball,
    },
    ShopEntry {
        id: "potion",
        cost: 50,
        category: ItemCategory::Potion,
    },
    ShopEntry {
        id: "revive",
        cost: 200,
        category: ItemCategory::Revive,
    },
    ShopEntry {
        id: "boost_atk",
        cost: 150,
        category: ItemCategory::Boost,
    },
    ShopEntry {
        id: "boost_spd",
        cost: 150,
        category: ItemCategory::Boost,
    },
    ShopEntry {
        id: "ability_copier",
        cost: 1000,
        category: ItemCategory::AbilityCopier,
    },
];

/// Look up a catalog entry by item id.
#[must_use]
pub fn catalog_entry(id: &str) -> Option<&'static ShopEntry> {
    CATALOG.iter().find(|e| e.id == id)
}

/// Atomically check affordability and deduct.
///
/// Returns `false` with no mutation if the balance is short. The balance
/// can never go negative through this path.
pub fn afford_and_deduct<S: Store>(store: &mut S, cost: i64) -> bool {
    let balance = store.balance();
    if balance < cost {
        log::debug!("purchase denied: cost {cost}, balance {balance}");
        return false;
    }
    store.set_balance(balance - cost);
    true
}

/// Consume one unit of an item if any is in stock.
///
/// Returns `false` with no mutation when the item is absent or exhausted.
pub fn consume_item<S: Store>(store: &mut S, id: &str) -> bool {
    let quantity = store.item_quantity(id);
    if quantity == 0 {
        log::debug!("item '{id}' not available");
        return false;
    }
    let Some(category) = store.item_category(id) else {
        return false;
    };
    store.set_item(id, quantity - 1, category);
    true
}

/// Add one unit of an item, creating the record if new.
pub fn add_item<S: Store>(store: &mut S, id: &str, category: ItemCategory) {
    let quantity = store.item_quantity(id);
    store.set_item(id, quantity + 1, category);
}

/// Buy one unit: currency gate, then stock increment.
///
/// Returns `false` with nothing deducted and nothing granted when the
/// balance is short.
pub fn buy_item<S: Store>(store: &mut S, id: &str, cost: i64, category: ItemCategory) -> bool {
    if !afford_and_deduct(store, cost) {
        return false;
    }
    add_item(store, id, category);
    true
}
