//! `bazaar-drivers` — producer and consumer driver threads.
//!
//! Drivers are deliberately thin: they call the coordinator in a loop and,
//! on an unavailability result, sleep the configured retry wait and try
//! again. All correctness lives in `bazaar-market`; nothing here holds
//! state the coordinator cares about.

pub mod consumer;
pub mod producer;
pub mod scenario;

pub use consumer::ConsumerDriver;
pub use producer::ProducerDriver;
pub use scenario::{CartOp, ConsumerPlan, ProducerPlan, Scenario, ScenarioError, SupplyItem};
