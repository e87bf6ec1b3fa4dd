use std::sync::atomic::{AtomicUsize, Ordering};

/// Counts finished batches against the number expected.
#[derive(Debug)]
pub struct CompletionCounter {
    total: usize,
    completed: AtomicUsize,
}

impl CompletionCounter {
    /// Creates a counter expecting `total` completions.
    pub fn new(total: usize) -> Self {
        Self {
            total,
            completed: AtomicUsize::new(0),
        }
    }

    /// Marks one batch as finished. Returns `true` only for the call which brings the count to
    /// the total.
    pub fn complete(&self) -> bool {
        self.completed.fetch_add(1, Ordering::AcqRel) + 1 == self.total
    }

    /// The number of completions so far. Can exceed the total.
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::Acquire)
    }

    /// The number of completions expected.
    pub fn total(&self) -> usize {
        self.total
    }
}
