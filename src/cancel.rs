use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A shared stop flag for long-running batches.
///
/// Batches check it between rows. Rows finished before the flag was raised
/// keep their results; nothing after that point is started.
#[derive(Debug, Clone, Default)]
pub struct Cancellation(Arc<AtomicBool>);

impl Cancellation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
