//! Function for running the command line program.

use super::{build, propagate::run_propagate_subcommand};
use clap::ArgMatches;
use std::time::Instant;

/// Runs the `gyrostep` command line program.
pub fn run() {
    run_with_args(build::build().get_matches());
}

/// Runs the `gyrostep` command line program with the given parsed arguments.
pub fn run_with_args(arguments: ArgMatches) {
    let start_instant = Instant::now();

    if let Some(propagate_arguments) = arguments.subcommand_matches("propagate") {
        run_propagate_subcommand(propagate_arguments);
    }

    if arguments.get_flag("timing") {
        println!("Elapsed time: {} s", start_instant.elapsed().as_secs_f64());
    }
}
