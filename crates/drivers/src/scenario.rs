//! Simulation scenario loading.
//!
//! A scenario file is a JSON document describing the marketplace
//! configuration, what each producer keeps publishing, and the cart script
//! each consumer runs. The `bazaar-sim` binary loads one of these and
//! spawns a thread per plan.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use bazaar_core::{DomainError, MarketConfig, Product};

/// A full simulation run: shared market config plus one plan per thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub market: MarketConfig,
    pub producers: Vec<ProducerPlan>,
    pub consumers: Vec<ConsumerPlan>,
}

/// What one producer thread publishes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProducerPlan {
    /// Thread name; shows up in the audit log.
    pub name: String,
    /// How many times to cycle through the supply list.
    pub rounds: u32,
    pub supply: Vec<SupplyItem>,
}

/// One line of a producer's supply list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplyItem {
    pub product: Product,
    /// Units to publish per round.
    pub quantity: u32,
    /// Pause after each successfully published unit.
    #[serde(default)]
    pub publish_wait_ms: u64,
}

/// What one consumer thread does: a sequence of carts, each a list of ops
/// ending in an implicit checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumerPlan {
    /// Thread name; shows up in the audit log and in purchase lines.
    pub name: String,
    pub carts: Vec<Vec<CartOp>>,
}

/// A single scripted cart operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum CartOp {
    /// Reserve `quantity` units, retrying each until it succeeds.
    Add { product: Product, quantity: u32 },
    /// Release up to `quantity` previously reserved units (never retried -
    /// releasing an absent item is a no-op).
    Remove { product: Product, quantity: u32 },
}

/// Scenario loading/validation failure.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse scenario JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] DomainError),
}

impl Scenario {
    /// Parse and validate a scenario from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ScenarioError> {
        let scenario: Self = serde_json::from_str(json)?;
        scenario.market.validate()?;
        Ok(scenario)
    }

    /// Load a scenario from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        Self::from_json(&fs::read_to_string(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO_JSON: &str = r#"{
        "market": { "capacity_per_producer": 3, "retry_wait_ms": 20 },
        "producers": [
            {
                "name": "prod-0",
                "rounds": 2,
                "supply": [
                    { "product": { "name": "milk", "unit_price": 350 }, "quantity": 3 }
                ]
            }
        ],
        "consumers": [
            {
                "name": "cons-0",
                "carts": [
                    [
                        { "op": "add", "product": { "name": "milk", "unit_price": 350 }, "quantity": 2 },
                        { "op": "remove", "product": { "name": "milk", "unit_price": 350 }, "quantity": 1 }
                    ]
                ]
            }
        ]
    }"#;

    #[test]
    fn parses_a_full_scenario() {
        let scenario = Scenario::from_json(SCENARIO_JSON).unwrap();
        assert_eq!(scenario.market.capacity_per_producer, 3);
        assert_eq!(scenario.producers.len(), 1);
        assert_eq!(scenario.producers[0].supply[0].quantity, 3);
        // publish_wait_ms defaults to 0 when omitted.
        assert_eq!(scenario.producers[0].supply[0].publish_wait_ms, 0);
        assert_eq!(scenario.consumers[0].carts[0].len(), 2);
        match &scenario.consumers[0].carts[0][1] {
            CartOp::Remove { quantity, .. } => assert_eq!(*quantity, 1),
            other => panic!("expected a remove op, got {other:?}"),
        }
    }

    #[test]
    fn rejects_zero_capacity() {
        let json = SCENARIO_JSON.replace("\"capacity_per_producer\": 3", "\"capacity_per_producer\": 0");
        match Scenario::from_json(&json) {
            Err(ScenarioError::Invalid(DomainError::Validation(_))) => {}
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_op_tag() {
        let json = SCENARIO_JSON.replace("\"op\": \"remove\"", "\"op\": \"discard\"");
        assert!(matches!(
            Scenario::from_json(&json),
            Err(ScenarioError::Parse(_))
        ));
    }
}
