//! `bazaar-market` — the shared marketplace coordinator.
//!
//! One `Marketplace` instance is shared by every producer and consumer
//! thread. It owns two append-only arenas (producer inventories, consumer
//! carts), each behind its own lock, plus a serialized purchase notifier.
//! All atomicity and ordering guarantees live here; the driver loops in
//! `bazaar-drivers` are deliberately dumb.

pub mod cart;
pub mod inventory;
pub mod marketplace;
pub mod notify;

pub use cart::{Cart, CartArena, ReservedItem};
pub use inventory::{InventoryArena, ProducerRecord, StockEntry};
pub use marketplace::{Marketplace, OrderReceipt};
pub use notify::{PurchaseNotifier, SharedBuffer};
