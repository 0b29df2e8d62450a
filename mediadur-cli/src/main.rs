// mediadur-cli/src/main.rs
//
// Entry point for the `mediadur` binary.
//
// Responsibilities include:
// - Parsing command-line arguments with clap.
// - Initialising env_logger according to --debug / RUST_LOG.
// - Running the tally command from the library half of this crate.
// - Printing fatal errors to stderr and exiting with status 1.

use clap::Parser;
use console::style;
use mediadur_cli::{Cli, logging, run_tally};
use std::process;

fn main() {
    let args = Cli::parse();
    logging::init(args.debug);

    if let Err(e) = run_tally(&args) {
        log::debug!("Fatal error: {e:?}");
        eprintln!("{} {}", style("Error:").red().bold(), e);
        process::exit(1);
    }
}
