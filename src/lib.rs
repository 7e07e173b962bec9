//! Saturates every logical CPU core with busy-wait loops until the process is
//! killed.

pub mod config;
pub mod latch;
pub mod progress;
pub mod saturator;

pub use config::SaturatorConfig;
pub use latch::{CompletionLatch, LatchGuard};
pub use saturator::{busy_loop, Running, Saturator};
