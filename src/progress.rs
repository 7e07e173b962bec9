use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// `pluralize(1, "busy worker")` is "1 busy worker", any other count adds an "s".
pub fn pluralize(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

/// Spinner showing how long the cores have been saturated. Ticks on its own
/// thread so it keeps moving while the caller is blocked.
pub fn create_spinner(workers: usize) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?,
    );
    pb.set_message(format!("{} (Ctrl-C to stop)", pluralize(workers, "busy worker")));
    pb.enable_steady_tick(Duration::from_millis(500));
    Ok(pb)
}
