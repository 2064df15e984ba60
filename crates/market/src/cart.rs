//! Consumer cart arena.
//!
//! A cart holds the units a consumer session has reserved but not yet
//! bought, each tagged with the producer it came from so a release can put
//! it back where it belongs. Like the inventory arena, carts are reached
//! only through the coordinator's cart lock.

use bazaar_core::{CartId, Product, ProducerId};

/// One reserved, unpurchased unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservedItem {
    pub product: Product,
    /// The producer whose inventory supplied this unit.
    pub source: ProducerId,
}

/// A consumer session's reservation list, in reservation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<ReservedItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[ReservedItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn add(&mut self, product: Product, source: ProducerId) {
        self.items.push(ReservedItem { product, source });
    }

    /// Remove the first reserved entry matching `product`, if any.
    pub fn remove_first(&mut self, product: &Product) -> Option<ReservedItem> {
        let index = self.items.iter().position(|i| i.product == *product)?;
        Some(self.items.remove(index))
    }

    /// Swap the contents out for checkout, leaving the slot empty and
    /// reusable.
    pub fn drain_all(&mut self) -> Vec<ReservedItem> {
        core::mem::take(&mut self.items)
    }
}

/// Append-only arena of carts, indexed by `CartId`.
#[derive(Debug, Default)]
pub struct CartArena {
    carts: Vec<Cart>,
}

impl CartArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next cart slot. Ids are dense and never reused.
    pub fn create(&mut self) -> CartId {
        self.carts.push(Cart::new());
        CartId::new(self.carts.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.carts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.carts.is_empty()
    }

    pub fn get(&self, id: CartId) -> Option<&Cart> {
        self.carts.get(id.index())
    }

    pub fn get_mut(&mut self, id: CartId) -> Option<&mut Cart> {
        self.carts.get_mut(id.index())
    }
}
