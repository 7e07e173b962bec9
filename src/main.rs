use anyhow::Result;
use clap::Parser;

use cpusat::progress::{create_spinner, pluralize};
use cpusat::{Saturator, SaturatorConfig};

#[derive(Parser, Debug)]
#[command(name = "cpusat", version)]
#[command(about = "Keep every logical CPU core at 100% until killed", long_about = None)]
struct Args {
    /// Number of busy workers (defaults to number of logical CPU cores)
    #[arg(short = 'j', long)]
    threads: Option<usize>,

    /// Print a status line and show an elapsed-time spinner
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = SaturatorConfig::detect().with_workers(args.threads)?;
    let saturator = Saturator::new(config)?;

    let spinner = if args.verbose {
        println!(
            "Saturating {} with {}",
            pluralize(saturator.config().cores(), "logical core"),
            pluralize(saturator.workers(), "busy worker")
        );
        Some(create_spinner(saturator.workers())?)
    } else {
        None
    };

    saturator.run();

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    Ok(())
}
