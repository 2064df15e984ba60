//! Consumer driver thread.

use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::info;

use bazaar_market::Marketplace;

use crate::scenario::{CartOp, ConsumerPlan};

/// Thin loop that runs a consumer's scripted carts against the market.
///
/// `add` ops retry after the configured wait until each requested unit is
/// reserved; `remove` ops never retry because releasing an absent item is
/// defined as a no-op. Each cart script ends with a checkout.
pub struct ConsumerDriver {
    market: Arc<Marketplace>,
    plan: ConsumerPlan,
    retry_wait: Duration,
}

impl ConsumerDriver {
    /// Spawn the driver on a named OS thread. The thread name doubles as
    /// the consumer identity in purchase lines.
    pub fn spawn(
        market: Arc<Marketplace>,
        plan: ConsumerPlan,
        retry_wait: Duration,
    ) -> io::Result<JoinHandle<u64>> {
        let name = plan.name.clone();
        thread::Builder::new().name(name).spawn(move || {
            Self {
                market,
                plan,
                retry_wait,
            }
            .run()
        })
    }

    /// Returns the total number of units bought across all carts.
    fn run(self) -> u64 {
        let mut bought = 0u64;

        for script in &self.plan.carts {
            let cart = self.market.new_cart();

            for op in script {
                match op {
                    CartOp::Add { product, quantity } => {
                        for _ in 0..*quantity {
                            while !self.market.add_to_cart(cart, product) {
                                thread::sleep(self.retry_wait);
                            }
                        }
                    }
                    CartOp::Remove { product, quantity } => {
                        for _ in 0..*quantity {
                            self.market.remove_from_cart(cart, product);
                        }
                    }
                }
            }

            if let Some(receipt) = self.market.place_order(cart) {
                bought += receipt.products.len() as u64;
                info!(
                    consumer = %self.plan.name,
                    %cart,
                    items = receipt.products.len(),
                    "order placed"
                );
            }
        }

        bought
    }
}
