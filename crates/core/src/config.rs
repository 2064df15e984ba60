//! Marketplace configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Externally supplied coordinator/driver configuration.
///
/// The coordinator itself only consumes `capacity_per_producer`; the retry
/// wait belongs to the driver loops (the coordinator never sleeps).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketConfig {
    /// Maximum total queued units a single producer may hold at once.
    pub capacity_per_producer: usize,
    /// How long drivers wait between failed publish/reserve attempts.
    pub retry_wait_ms: u64,
}

impl MarketConfig {
    pub fn new(capacity_per_producer: usize, retry_wait_ms: u64) -> DomainResult<Self> {
        let config = Self {
            capacity_per_producer,
            retry_wait_ms,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration invariants.
    pub fn validate(&self) -> DomainResult<()> {
        if self.capacity_per_producer == 0 {
            return Err(DomainError::validation(
                "capacity_per_producer must be at least 1",
            ));
        }
        Ok(())
    }

    pub fn retry_wait(&self) -> Duration {
        Duration::from_millis(self.retry_wait_ms)
    }
}
