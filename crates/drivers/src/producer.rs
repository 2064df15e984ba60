//! Producer driver thread.

use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::info;

use bazaar_market::Marketplace;

use crate::scenario::ProducerPlan;

/// Thin loop that registers a producer and keeps its inventory stocked.
///
/// Every failed `publish` (producer at capacity) is retried after the
/// configured wait; the coordinator never blocks on our behalf.
pub struct ProducerDriver {
    market: Arc<Marketplace>,
    plan: ProducerPlan,
    retry_wait: Duration,
}

impl ProducerDriver {
    /// Spawn the driver on a named OS thread.
    pub fn spawn(
        market: Arc<Marketplace>,
        plan: ProducerPlan,
        retry_wait: Duration,
    ) -> io::Result<JoinHandle<()>> {
        let name = plan.name.clone();
        thread::Builder::new().name(name).spawn(move || {
            Self {
                market,
                plan,
                retry_wait,
            }
            .run();
        })
    }

    fn run(self) {
        let id = self.market.register_producer();
        info!(producer = %self.plan.name, %id, "producer registered");

        let mut published = 0u64;
        for _ in 0..self.plan.rounds {
            for item in &self.plan.supply {
                for _ in 0..item.quantity {
                    while !self.market.publish(id, &item.product) {
                        thread::sleep(self.retry_wait);
                    }
                    published += 1;
                    if item.publish_wait_ms > 0 {
                        thread::sleep(Duration::from_millis(item.publish_wait_ms));
                    }
                }
            }
        }

        info!(producer = %self.plan.name, %id, published, "producer finished");
    }
}
