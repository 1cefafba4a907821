//! Create a normalised assessment criteria (NAC) plot from metric files.
//!
//! # Usage
//!
//! ```bash
//! plot_norm_ac \
//!   --exp expt1,expt2 --file-exp expt1.csv,expt2.csv \
//!   --ref control --file-ref control.csv \
//!   --file-obs obs.csv --file-var var.csv \
//!   --plot plots/nac.svg --title "Global metrics"
//! ```

use autoassess::cli::{run, Args};
use clap::Parser;
use tracing::Level;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    run(&args)
}
