//! Command line interface for step size control.

use crate::{
    cli::utils,
    constants::KPC_TO_M,
    exit_on_error,
    propagation::{fpr, stepping::StepSizeConfig},
};
use clap::{Arg, ArgMatches, Command};

/// Adds arguments for parameters used by the step size control.
pub fn add_step_size_arguments_to_subcommand(command: Command) -> Command {
    command
        .arg(
            Arg::new("tolerance")
                .long("tolerance")
                .value_name("VALUE")
                .help("Target error for adaptive step size control, in the range [0, 1]")
                .next_line_help(true)
                .default_value("0.42"),
        )
        .arg(
            Arg::new("min-step")
                .long("min-step")
                .value_name("VALUE")
                .help("Minimum step length [kpc] [default: same as maximum step length]")
                .next_line_help(true),
        )
        .arg(
            Arg::new("max-step")
                .long("max-step")
                .value_name("VALUE")
                .help("Maximum step length [kpc]")
                .next_line_help(true)
                .default_value("1"),
        )
}

/// Creates a step size configuration based on present arguments.
///
/// The step length is fixed when no minimum step length is given.
pub fn configure_step_size_from_arguments(arguments: &ArgMatches) -> StepSizeConfig {
    let tolerance = utils::get_finite_float_value_from_required_parseable_argument(
        arguments,
        "tolerance",
    );
    let max_step =
        utils::get_finite_float_value_from_required_parseable_argument::<fpr>(
            arguments, "max-step",
        ) * KPC_TO_M;
    let min_step = utils::get_value_from_parseable_argument(arguments, "min-step")
        .map_or(max_step, |min_step: fpr| min_step * KPC_TO_M);

    exit_on_error!(
        StepSizeConfig::adaptive(tolerance, min_step, max_step),
        "Error: Invalid step size configuration: {}"
    )
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::propagation::stepping::StepSizePolicy;

    fn matches(args: &[&str]) -> ArgMatches {
        add_step_size_arguments_to_subcommand(Command::new("test"))
            .try_get_matches_from(std::iter::once("test").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn step_length_is_fixed_without_minimum() {
        let config = configure_step_size_from_arguments(&matches(&["--max-step", "2"]));
        assert_eq!(
            config.policy(),
            StepSizePolicy::Fixed {
                step: 2.0 * KPC_TO_M
            }
        );
    }

    #[test]
    fn step_length_is_adaptive_with_minimum() {
        let config = configure_step_size_from_arguments(&matches(&[
            "--tolerance",
            "0.1",
            "--min-step",
            "0.5",
            "--max-step",
            "4",
        ]));
        assert_eq!(config.tolerance(), 0.1);
        assert_eq!(config.min_step(), 0.5 * KPC_TO_M);
        assert_eq!(config.max_step(), 4.0 * KPC_TO_M);
    }
}
