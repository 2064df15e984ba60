//! Producer inventory arena.
//!
//! Each registered producer owns a bounded collection of (product, quantity)
//! entries plus a cached total of queued units. Records are only ever
//! reached through the arena, and the arena is only ever reached through
//! the coordinator's inventory lock, so none of this is synchronized here.

use bazaar_core::{Product, ProducerId};

/// One (product, quantity) line in a producer's inventory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockEntry {
    pub product: Product,
    pub quantity: u32,
}

/// A single producer's queued stock.
///
/// Invariant: `total_queued` equals the sum of all entry quantities and
/// never exceeds the configured per-producer capacity. Every mutation on
/// this type maintains both halves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProducerRecord {
    entries: Vec<StockEntry>,
    total_queued: u32,
}

impl ProducerRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_queued(&self) -> u32 {
        self.total_queued
    }

    pub fn entries(&self) -> &[StockEntry] {
        &self.entries
    }

    /// Queued quantity of one product (0 when there is no entry for it).
    pub fn quantity_of(&self, product: &Product) -> u32 {
        self.entries
            .iter()
            .find(|e| e.product == *product)
            .map_or(0, |e| e.quantity)
    }

    /// Queue one unit, bounded by `capacity`.
    ///
    /// Returns false without touching anything when the producer is already
    /// at capacity. Matching is by product value; a new entry is appended
    /// only when no entry for this product exists yet.
    pub fn publish(&mut self, product: &Product, capacity: usize) -> bool {
        if self.total_queued as usize >= capacity {
            return false;
        }
        match self.entries.iter_mut().find(|e| e.product == *product) {
            Some(entry) => entry.quantity += 1,
            None => self.entries.push(StockEntry {
                product: product.clone(),
                quantity: 1,
            }),
        }
        self.total_queued += 1;
        true
    }

    /// Take one unit of `product` out of the queue, if any entry holds one.
    ///
    /// Entries are scanned in insertion order; the first entry with a
    /// positive quantity wins. Drained entries stay in place so entry order
    /// is stable across reserve/restock cycles.
    pub fn reserve(&mut self, product: &Product) -> bool {
        let Some(entry) = self
            .entries
            .iter_mut()
            .find(|e| e.product == *product && e.quantity > 0)
        else {
            return false;
        };
        entry.quantity -= 1;
        self.total_queued -= 1;
        true
    }

    /// Return one previously reserved unit to the queue.
    ///
    /// Used on cart release only, so this is never bounded by capacity: the
    /// unit already counted against this producer when it was published,
    /// and release must not fail. When a publish has refilled the headroom
    /// the reservation freed, the total lands above capacity until
    /// reservations catch up again; capacity only gates admission in
    /// [`ProducerRecord::publish`]. Recreates the entry if it no longer
    /// exists.
    pub fn restock(&mut self, product: &Product) {
        match self.entries.iter_mut().find(|e| e.product == *product) {
            Some(entry) => entry.quantity += 1,
            None => self.entries.push(StockEntry {
                product: product.clone(),
                quantity: 1,
            }),
        }
        self.total_queued += 1;
    }

    /// Recompute the quantity sum from scratch (invariant checks in tests).
    pub fn quantity_sum(&self) -> u32 {
        self.entries.iter().map(|e| e.quantity).sum()
    }
}

/// Append-only arena of producer records, indexed by `ProducerId`.
#[derive(Debug, Default)]
pub struct InventoryArena {
    producers: Vec<ProducerRecord>,
}

impl InventoryArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next producer slot. Ids are dense and never reused.
    pub fn register(&mut self) -> ProducerId {
        self.producers.push(ProducerRecord::new());
        ProducerId::new(self.producers.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.producers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.producers.is_empty()
    }

    pub fn get(&self, id: ProducerId) -> Option<&ProducerRecord> {
        self.producers.get(id.index())
    }

    pub fn get_mut(&mut self, id: ProducerId) -> Option<&mut ProducerRecord> {
        self.producers.get_mut(id.index())
    }

    /// Reserve one unit of `product` from the first producer holding one.
    ///
    /// Producers are scanned in id order, entries in insertion order, so
    /// the outcome is deterministic for a given arena state. Returns the
    /// id of the supplying producer, or `None` when no unit is available
    /// anywhere (the caller's retry-later case).
    pub fn reserve(&mut self, product: &Product) -> Option<ProducerId> {
        for (index, record) in self.producers.iter_mut().enumerate() {
            if record.reserve(product) {
                return Some(ProducerId::new(index));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn milk() -> Product {
        Product::new("milk", 350)
    }

    fn eggs() -> Product {
        Product::new("eggs", 220)
    }

    #[test]
    fn publish_groups_equal_products_into_one_entry() {
        let mut record = ProducerRecord::new();
        assert!(record.publish(&milk(), 10));
        assert!(record.publish(&milk(), 10));
        assert!(record.publish(&eggs(), 10));

        assert_eq!(record.entries().len(), 2);
        assert_eq!(record.quantity_of(&milk()), 2);
        assert_eq!(record.quantity_of(&eggs()), 1);
        assert_eq!(record.total_queued(), 3);
    }

    #[test]
    fn publish_refuses_beyond_capacity() {
        let mut record = ProducerRecord::new();
        assert!(record.publish(&milk(), 2));
        assert!(record.publish(&eggs(), 2));
        assert!(!record.publish(&milk(), 2));

        assert_eq!(record.total_queued(), 2);
        assert_eq!(record.quantity_sum(), 2);
    }

    #[test]
    fn reserve_skips_drained_entries() {
        let mut record = ProducerRecord::new();
        record.publish(&milk(), 10);
        record.publish(&eggs(), 10);

        assert!(record.reserve(&milk()));
        assert!(!record.reserve(&milk()));
        assert!(record.reserve(&eggs()));
        assert_eq!(record.total_queued(), 0);
        // Drained entries remain, order preserved.
        assert_eq!(record.entries().len(), 2);
    }

    #[test]
    fn restock_may_push_total_past_capacity_but_publish_still_gates() {
        let mut record = ProducerRecord::new();
        assert!(record.publish(&milk(), 2));
        assert!(record.publish(&milk(), 2));
        assert!(record.reserve(&milk()));
        // A publish refills the headroom the reservation freed...
        assert!(record.publish(&eggs(), 2));
        // ...so the unconditional restore lands above capacity.
        record.restock(&milk());

        assert_eq!(record.total_queued(), 3);
        assert_eq!(record.quantity_sum(), 3);
        assert!(!record.publish(&milk(), 2));
    }

    #[test]
    fn restock_recreates_missing_entry() {
        let mut record = ProducerRecord::new();
        record.restock(&milk());
        assert_eq!(record.quantity_of(&milk()), 1);
        assert_eq!(record.total_queued(), 1);
    }

    #[test]
    fn arena_reserves_from_lowest_producer_id_first() {
        let mut arena = InventoryArena::new();
        let first = arena.register();
        let second = arena.register();
        arena.get_mut(first).unwrap().publish(&milk(), 10);
        arena.get_mut(second).unwrap().publish(&milk(), 10);

        assert_eq!(arena.reserve(&milk()), Some(first));
        assert_eq!(arena.reserve(&milk()), Some(second));
        assert_eq!(arena.reserve(&milk()), None);
    }

    #[test]
    fn arena_ids_are_dense_and_monotonic() {
        let mut arena = InventoryArena::new();
        for expected in 0..5 {
            assert_eq!(arena.register(), ProducerId::new(expected));
        }
        assert_eq!(arena.len(), 5);
    }
}
