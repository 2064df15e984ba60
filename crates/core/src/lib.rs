//! `bazaar-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no locking, no IO).

pub mod config;
pub mod error;
pub mod id;
pub mod product;
pub mod value_object;

pub use config::MarketConfig;
pub use error::{DomainError, DomainResult};
pub use id::{CartId, ProducerId};
pub use product::Product;
pub use value_object::ValueObject;
