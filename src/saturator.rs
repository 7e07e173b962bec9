use anyhow::{Context, Result};
use log::{debug, error, info};
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::any::Any;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use crate::config::SaturatorConfig;
use crate::latch::CompletionLatch;

/// Keeps one core busy forever. Never yields, never allocates.
pub fn busy_loop() {
    loop {
        std::hint::spin_loop();
    }
}

/// Owns a worker pool sized to the configured concurrency ceiling.
pub struct Saturator {
    config: SaturatorConfig,
    pool: ThreadPool,
}

/// Workers launched by [`Saturator::launch`].
pub struct Running {
    latch: CompletionLatch,
    started: Arc<AtomicUsize>,
}

impl Saturator {
    pub fn new(config: SaturatorConfig) -> Result<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(config.workers())
            .thread_name(|index| format!("saturator-{index}"))
            .panic_handler(log_worker_panic)
            .build()
            .with_context(|| {
                format!("Failed to build pool of {} worker threads", config.workers())
            })?;

        Ok(Self { config, pool })
    }

    pub fn config(&self) -> &SaturatorConfig {
        &self.config
    }

    pub fn workers(&self) -> usize {
        self.config.workers()
    }

    /// Spawns one job per pool thread, each running `work` while holding a
    /// latch guard.
    pub fn launch<F>(&self, work: F) -> Running
    where
        F: Fn() + Send + Sync + 'static,
    {
        let work = Arc::new(work);
        let started = Arc::new(AtomicUsize::new(0));
        let (latch, guards) = CompletionLatch::new(self.workers());

        for (index, guard) in guards.into_iter().enumerate() {
            let work = Arc::clone(&work);
            let started = Arc::clone(&started);

            self.pool.spawn(move || {
                let _guard = guard;
                started.fetch_add(1, Ordering::AcqRel);
                debug!(
                    "Worker {} running on {}",
                    index,
                    thread::current().name().unwrap_or("unnamed")
                );
                work();
            });
        }

        Running { latch, started }
    }

    /// Busy-loops every worker and blocks until they all exit, which they don't.
    pub fn run(&self) {
        info!(
            "Saturating {} of {} logical cores",
            self.workers(),
            self.config.cores()
        );
        self.launch(busy_loop).wait();
    }
}

impl Running {
    pub fn started(&self) -> usize {
        self.started.load(Ordering::Acquire)
    }

    pub fn remaining(&self) -> usize {
        self.latch.remaining()
    }

    pub fn wait(self) {
        self.latch.wait();
    }
}

fn log_worker_panic(payload: Box<dyn Any + Send>) {
    let message = if let Some(message) = payload.downcast_ref::<&str>() {
        *message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "unknown panic payload"
    };

    error!("Worker panicked: {}", message);
}
