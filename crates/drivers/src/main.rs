//! `bazaar-sim` — run a marketplace simulation from a scenario file.
//!
//! Usage: `bazaar-sim <scenario.json>`. Purchase lines go to stdout; the
//! audit trail is available via `RUST_LOG=bazaar_market=debug`.

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use bazaar_drivers::{ConsumerDriver, ProducerDriver, Scenario};
use bazaar_market::Marketplace;

fn main() -> anyhow::Result<()> {
    bazaar_observability::init();

    let path = std::env::args()
        .nth(1)
        .context("usage: bazaar-sim <scenario.json>")?;
    let scenario = Scenario::load(&path)
        .with_context(|| format!("failed to load scenario from {path}"))?;

    let market = Arc::new(Marketplace::new(&scenario.market));
    let retry_wait = scenario.market.retry_wait();
    info!(
        producers = scenario.producers.len(),
        consumers = scenario.consumers.len(),
        capacity = scenario.market.capacity_per_producer,
        "starting simulation"
    );

    let producer_handles: Vec<_> = scenario
        .producers
        .into_iter()
        .map(|plan| ProducerDriver::spawn(Arc::clone(&market), plan, retry_wait))
        .collect::<Result<_, _>>()
        .context("failed to spawn producer thread")?;
    let consumer_handles: Vec<_> = scenario
        .consumers
        .into_iter()
        .map(|plan| ConsumerDriver::spawn(Arc::clone(&market), plan, retry_wait))
        .collect::<Result<_, _>>()
        .context("failed to spawn consumer thread")?;

    let mut bought = 0u64;
    for handle in consumer_handles {
        bought += handle
            .join()
            .map_err(|_| anyhow::anyhow!("consumer thread panicked"))?;
    }
    for handle in producer_handles {
        handle
            .join()
            .map_err(|_| anyhow::anyhow!("producer thread panicked"))?;
    }

    info!(
        producers = market.producer_count(),
        carts = market.cart_count(),
        bought,
        "simulation complete"
    );
    Ok(())
}
