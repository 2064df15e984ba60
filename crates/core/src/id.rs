//! Strongly-typed identifiers used across the domain.
//!
//! Producer and cart ids are dense arena indices: assigned monotonically
//! starting at 0, never reused, stable for the lifetime of the coordinator.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a registered producer (index into the inventory arena).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProducerId(usize);

/// Identifier of a consumer cart (index into the cart arena).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartId(usize);

macro_rules! impl_index_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            pub fn new(index: usize) -> Self {
                Self(index)
            }

            /// The raw arena index.
            pub fn index(&self) -> usize {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<usize> for $t {
            fn from(value: usize) -> Self {
                Self(value)
            }
        }

        impl From<$t> for usize {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let index = usize::from_str(s)
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Ok(Self(index))
            }
        }
    };
}

impl_index_newtype!(ProducerId, "ProducerId");
impl_index_newtype!(CartId, "CartId");
