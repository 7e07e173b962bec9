use anyhow::{bail, Result};
use std::num::NonZeroUsize;

/// Startup configuration: how many logical cores the host reports and how
/// many busy workers to run on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaturatorConfig {
    cores: NonZeroUsize,
    workers: NonZeroUsize,
}

impl SaturatorConfig {
    /// Reads the logical core count once and sizes the worker pool to match.
    pub fn detect() -> Self {
        // num_cpus never reports fewer than one logical processor
        let cores = NonZeroUsize::new(num_cpus::get()).unwrap_or(NonZeroUsize::MIN);

        Self {
            cores,
            workers: cores,
        }
    }

    pub fn with_workers(self, workers: Option<usize>) -> Result<Self> {
        let Some(requested) = workers else {
            return Ok(self);
        };

        let Some(workers) = NonZeroUsize::new(requested) else {
            bail!("Invalid worker count: {} (must be at least 1)", requested);
        };

        Ok(Self { workers, ..self })
    }

    pub fn cores(&self) -> usize {
        self.cores.get()
    }

    /// Concurrency ceiling of the worker pool, equal to the number of workers.
    pub fn workers(&self) -> usize {
        self.workers.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_matches_logical_cores() {
        let config = SaturatorConfig::detect();
        assert_eq!(config.cores(), num_cpus::get());
        assert_eq!(config.workers(), config.cores());
        assert!(config.workers() >= 1);
    }

    #[test]
    fn test_no_override_keeps_detected_count() {
        let detected = SaturatorConfig::detect();
        let config = detected.with_workers(None).unwrap();
        assert_eq!(config, detected);
    }

    #[test]
    fn test_override_worker_count() {
        let config = SaturatorConfig::detect().with_workers(Some(4)).unwrap();
        assert_eq!(config.workers(), 4);
        assert_eq!(config.cores(), num_cpus::get());
    }

    #[test]
    fn test_zero_workers_rejected() {
        let err = SaturatorConfig::detect().with_workers(Some(0)).unwrap_err();
        assert!(err.to_string().contains("at least 1"));
    }
}
