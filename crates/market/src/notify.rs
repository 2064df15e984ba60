//! Purchase notification sink.
//!
//! Checkout emits one user-visible line per sold item. The sink has its own
//! lock, independent of the arena locks: it serializes output lines and
//! nothing else, so slow IO never blocks inventory or cart mutation.

use std::io::Write;
use std::sync::{Arc, Mutex};

use bazaar_core::Product;

/// Serialized writer for "{buyer} bought {product}" lines.
pub struct PurchaseNotifier {
    out: Mutex<Box<dyn Write + Send>>,
}

impl PurchaseNotifier {
    pub fn new(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Notifier writing to process stdout (the simulation default).
    pub fn stdout() -> Self {
        Self::new(Box::new(std::io::stdout()))
    }

    /// Emit one purchase line. The line is written and flushed under the
    /// output lock, so concurrent checkouts interleave by whole lines only.
    pub fn purchased(&self, buyer: &str, product: &Product) {
        let mut out = self.out.lock().unwrap();
        if let Err(err) = writeln!(out, "{buyer} bought {product}").and_then(|()| out.flush()) {
            tracing::warn!(%buyer, %product, "failed to write purchase notification: {err}");
        }
    }
}

impl core::fmt::Debug for PurchaseNotifier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PurchaseNotifier").finish_non_exhaustive()
    }
}

impl Default for PurchaseNotifier {
    fn default() -> Self {
        Self::stdout()
    }
}

/// Cloneable in-memory sink for capturing notifier output in tests and
/// demos.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.inner.lock().unwrap()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.inner.lock().unwrap().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn purchased_writes_one_line_per_call() {
        let buffer = SharedBuffer::new();
        let notifier = PurchaseNotifier::new(Box::new(buffer.clone()));

        notifier.purchased("cons-1", &Product::new("milk", 350));
        notifier.purchased("cons-2", &Product::new("eggs", 220));

        assert_eq!(buffer.contents(), "cons-1 bought milk\ncons-2 bought eggs\n");
    }
}
