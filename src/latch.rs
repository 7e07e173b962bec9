use crossbeam::sync::WaitGroup;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Countdown barrier that releases its waiter once every worker has exited.
pub struct CompletionLatch {
    wait_group: WaitGroup,
    remaining: Arc<AtomicUsize>,
}

/// Held by exactly one worker. Dropping it counts that worker as done,
/// including when the worker unwinds.
pub struct LatchGuard {
    remaining: Arc<AtomicUsize>,
    _wait_group: WaitGroup,
}

impl CompletionLatch {
    pub fn new(count: usize) -> (Self, Vec<LatchGuard>) {
        let wait_group = WaitGroup::new();
        let remaining = Arc::new(AtomicUsize::new(count));

        let guards = (0..count)
            .map(|_| LatchGuard {
                remaining: Arc::clone(&remaining),
                _wait_group: wait_group.clone(),
            })
            .collect();

        (
            Self {
                wait_group,
                remaining,
            },
            guards,
        )
    }

    pub fn remaining(&self) -> usize {
        self.remaining.load(Ordering::Acquire)
    }

    /// Blocks until every guard has been dropped.
    pub fn wait(self) {
        self.wait_group.wait();
    }
}

impl Drop for LatchGuard {
    fn drop(&mut self) {
        // Runs before the wait group handle is released.
        self.remaining.fetch_sub(1, Ordering::AcqRel);
    }
}
