//! The marketplace coordinator.
//!
//! A single `Marketplace` is shared (behind `Arc`) by every producer and
//! consumer thread. Three protected regions exist: the inventory arena, the
//! cart arena, and the purchase notifier. Operations that span both arenas
//! (reserve, release) always lock inventory first, then carts; the notifier
//! lock is never held together with an arena lock. Every public call is
//! audit-logged on entry and exit with the calling thread's identity.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use bazaar_core::{CartId, MarketConfig, Product, ProducerId};

use crate::cart::{CartArena, ReservedItem};
use crate::inventory::InventoryArena;
use crate::notify::PurchaseNotifier;

/// Finalized purchase returned by [`Marketplace::place_order`].
///
/// `products` is the cart's reserved sequence at the moment of the call, in
/// reservation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderReceipt {
    pub cart_id: CartId,
    pub buyer: String,
    pub placed_at: DateTime<Utc>,
    pub products: Vec<Product>,
}

/// The shared marketplace coordinator.
///
/// Registration, publishing, reservation, release, and checkout all go
/// through this one object; it enforces the per-producer capacity bound and
/// the rule that a unit is counted in exactly one place at a time (a
/// producer's queue, a cart, or sold). No operation blocks waiting for
/// availability: `publish` and `add_to_cart` fail fast and the caller
/// retries after its configured wait.
#[derive(Debug)]
pub struct Marketplace {
    capacity_per_producer: usize,
    inventory: Mutex<InventoryArena>,
    carts: Mutex<CartArena>,
    notifier: PurchaseNotifier,
}

/// Identity of the calling thread, as carried in audit logs and purchase
/// lines. Driver threads are spawned with names; anything else falls back
/// to a placeholder.
fn thread_name() -> String {
    std::thread::current()
        .name()
        .unwrap_or("anonymous")
        .to_string()
}

impl Marketplace {
    /// Coordinator writing purchase notifications to stdout.
    pub fn new(config: &MarketConfig) -> Self {
        Self::with_notifier(config, PurchaseNotifier::stdout())
    }

    pub fn with_notifier(config: &MarketConfig, notifier: PurchaseNotifier) -> Self {
        Self {
            capacity_per_producer: config.capacity_per_producer,
            inventory: Mutex::new(InventoryArena::new()),
            carts: Mutex::new(CartArena::new()),
            notifier,
        }
    }

    pub fn capacity_per_producer(&self) -> usize {
        self.capacity_per_producer
    }

    /// Allocate a new producer slot and return its id.
    ///
    /// Always succeeds. Ids form a contiguous range starting at 0 even
    /// under concurrent registration.
    pub fn register_producer(&self) -> ProducerId {
        debug!(thread = %thread_name(), "register_producer: enter");
        let id = self.inventory.lock().unwrap().register();
        debug!(thread = %thread_name(), producer_id = %id, "register_producer: exit");
        id
    }

    /// Queue one unit of `product` with the given producer.
    ///
    /// Returns false, with no state change, when the id is out of range or
    /// the producer is at capacity; the caller should wait and retry. The
    /// capacity check and the increment happen under one inventory lock
    /// acquisition, so concurrent publishes cannot overshoot the bound.
    pub fn publish(&self, producer_id: ProducerId, product: &Product) -> bool {
        debug!(thread = %thread_name(), %producer_id, %product, "publish: enter");
        let published = {
            let mut inventory = self.inventory.lock().unwrap();
            match inventory.get_mut(producer_id) {
                Some(record) => record.publish(product, self.capacity_per_producer),
                None => false,
            }
        };
        debug!(thread = %thread_name(), %producer_id, %product, published, "publish: exit");
        published
    }

    /// Allocate a new, empty cart and return its id.
    pub fn new_cart(&self) -> CartId {
        debug!(thread = %thread_name(), "new_cart: enter");
        let id = self.carts.lock().unwrap().create();
        debug!(thread = %thread_name(), cart_id = %id, "new_cart: exit");
        id
    }

    /// Reserve one unit of `product` into the cart.
    ///
    /// Scans producers in id order and takes the first available unit,
    /// moving it from that producer's queue into the cart in one atomic
    /// step: no two concurrent callers can reserve the same unit. Returns
    /// false when the cart id is out of range or no producer currently
    /// holds the product - the expected outcome while stock is exhausted,
    /// recovered by retrying after a wait.
    pub fn add_to_cart(&self, cart_id: CartId, product: &Product) -> bool {
        debug!(thread = %thread_name(), %cart_id, %product, "add_to_cart: enter");
        let reserved = {
            // Lock order: inventory before carts, always.
            let mut inventory = self.inventory.lock().unwrap();
            let mut carts = self.carts.lock().unwrap();
            match carts.get_mut(cart_id) {
                Some(cart) => match inventory.reserve(product) {
                    Some(source) => {
                        cart.add(product.clone(), source);
                        true
                    }
                    None => false,
                },
                None => false,
            }
        };
        debug!(thread = %thread_name(), %cart_id, %product, reserved, "add_to_cart: exit");
        reserved
    }

    /// Release the first reserved unit of `product` from the cart back to
    /// the producer that supplied it, recreating the inventory entry if it
    /// has since disappeared.
    ///
    /// An out-of-range cart id or a product not present in the cart is a
    /// silent no-op. The no-match case is guarded explicitly: the restock
    /// only ever targets the producer recorded on the removed item, never
    /// a sentinel index.
    pub fn remove_from_cart(&self, cart_id: CartId, product: &Product) {
        debug!(thread = %thread_name(), %cart_id, %product, "remove_from_cart: enter");
        {
            // Same lock order as add_to_cart, so a concurrent reserve and
            // release can never deadlock.
            let mut inventory = self.inventory.lock().unwrap();
            let mut carts = self.carts.lock().unwrap();
            if let Some(cart) = carts.get_mut(cart_id) {
                if let Some(item) = cart.remove_first(product) {
                    match inventory.get_mut(item.source) {
                        Some(record) => record.restock(&item.product),
                        // Unreachable while the arena is append-only; keep
                        // the unit rather than credit the wrong producer.
                        None => warn!(
                            source = %item.source,
                            %product,
                            "release found no producer for reserved item"
                        ),
                    }
                }
            }
        }
        debug!(thread = %thread_name(), %cart_id, %product, "remove_from_cart: exit");
    }

    /// Check out the cart: atomically capture and empty its reserved
    /// sequence, then emit one purchase notification per item in
    /// reservation order.
    ///
    /// Returns `None` when the cart id is out of range. The cart slot
    /// itself survives checkout and can be reused. Notification lines from
    /// concurrent checkouts may interleave, but each line is atomic.
    pub fn place_order(&self, cart_id: CartId) -> Option<OrderReceipt> {
        debug!(thread = %thread_name(), %cart_id, "place_order: enter");
        let drained: Vec<ReservedItem> = {
            let mut carts = self.carts.lock().unwrap();
            match carts.get_mut(cart_id) {
                Some(cart) => cart.drain_all(),
                None => {
                    debug!(thread = %thread_name(), %cart_id, "place_order: exit (invalid cart)");
                    return None;
                }
            }
        };

        // The cart lock is released before any IO happens.
        let buyer = thread_name();
        for item in &drained {
            self.notifier.purchased(&buyer, &item.product);
        }

        let receipt = OrderReceipt {
            cart_id,
            buyer,
            placed_at: Utc::now(),
            products: drained.into_iter().map(|item| item.product).collect(),
        };
        debug!(
            thread = %thread_name(),
            %cart_id,
            items = receipt.products.len(),
            "place_order: exit"
        );
        Some(receipt)
    }

    // Read-only observers, used by tests and the simulation summary. Each
    // takes a single lock acquisition, so the values are a consistent
    // snapshot of one arena.

    pub fn producer_count(&self) -> usize {
        self.inventory.lock().unwrap().len()
    }

    pub fn cart_count(&self) -> usize {
        self.carts.lock().unwrap().len()
    }

    pub fn producer_total_queued(&self, producer_id: ProducerId) -> Option<u32> {
        self.inventory
            .lock()
            .unwrap()
            .get(producer_id)
            .map(|r| r.total_queued())
    }

    pub fn producer_quantity(&self, producer_id: ProducerId, product: &Product) -> Option<u32> {
        self.inventory
            .lock()
            .unwrap()
            .get(producer_id)
            .map(|r| r.quantity_of(product))
    }

    /// Recomputed quantity sum for one producer (invariant checks).
    pub fn producer_quantity_sum(&self, producer_id: ProducerId) -> Option<u32> {
        self.inventory
            .lock()
            .unwrap()
            .get(producer_id)
            .map(|r| r.quantity_sum())
    }

    pub fn cart_items(&self, cart_id: CartId) -> Option<Vec<ReservedItem>> {
        self.carts
            .lock()
            .unwrap()
            .get(cart_id)
            .map(|c| c.items().to_vec())
    }
}
