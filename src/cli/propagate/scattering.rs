//! Command line interface for scattering.

use crate::{
    cli::utils,
    constants::{KPC_TO_M, NANOGAUSS_TO_T},
    exit_on_error,
    geometry::Point3,
    propagation::{
        fpr,
        scattering::{
            isotropic::IsotropicScattering,
            pitch_angle::PitchAngleScattering,
            regime::{ExpandingRegime, ScatteringKernel},
            ScatteringConfig, ScatteringModel,
        },
    },
};
use clap::{builder::PossibleValuesParser, Arg, ArgMatches, Command};

/// Adds arguments for parameters used by scattering.
pub fn add_scattering_arguments_to_subcommand(command: Command) -> Command {
    command
        .arg(
            Arg::new("scattering")
                .long("scattering")
                .value_name("MODEL")
                .help("Scattering model to apply after each step")
                .next_line_help(true)
                .value_parser(PossibleValuesParser::new([
                    "off",
                    "isotropic",
                    "pitch-angle",
                    "expanding",
                ]))
                .default_value("off"),
        )
        .arg(
            Arg::new("scatter-rate")
                .long("scatter-rate")
                .value_name("VALUE")
                .help("Nominal scattering rate [1/s]")
                .next_line_help(true)
                .default_value("0"),
        )
        .arg(
            Arg::new("min-field-strength")
                .long("min-field-strength")
                .value_name("VALUE")
                .help("Smallest field strength where scattering is applied [nG]")
                .next_line_help(true)
                .default_value("0"),
        )
        .arg(
            Arg::new("expansion-kernel")
                .long("expansion-kernel")
                .value_name("MODEL")
                .help("Rotation used by the expanding model")
                .next_line_help(true)
                .value_parser(PossibleValuesParser::new(["isotropic", "pitch-angle"]))
                .default_value("isotropic"),
        )
        .arg(
            Arg::new("expansion-factor")
                .long("expansion-factor")
                .value_name("VALUE")
                .help("Growth of the source region radius per travelled distance")
                .next_line_help(true)
                .default_value("1"),
        )
        .arg(
            Arg::new("expansion-start")
                .long("expansion-start")
                .value_name("VALUE")
                .help("Initial radius of the source region [kpc]")
                .next_line_help(true)
                .default_value("0"),
        )
        .arg(
            Arg::new("external-scatter-rate")
                .long("external-scatter-rate")
                .value_name("VALUE")
                .help("Scattering rate outside of the source region [1/s]")
                .next_line_help(true)
                .default_value("0"),
        )
}

/// Creates a scattering configuration based on present arguments, or `None`
/// if scattering is turned off.
///
/// The source region of the expanding model is centered on the initial
/// position of the particles.
pub fn configure_scattering_from_arguments(
    arguments: &ArgMatches,
    origin: &Point3<fpr>,
) -> Option<ScatteringConfig> {
    let model = match arguments
        .get_one::<String>("scattering")
        .map(String::as_str)
    {
        Some("isotropic") => ScatteringModel::Isotropic(IsotropicScattering),
        Some("pitch-angle") => ScatteringModel::PitchAngle(PitchAngleScattering),
        Some("expanding") => {
            let kernel = match arguments
                .get_one::<String>("expansion-kernel")
                .map(String::as_str)
            {
                Some("pitch-angle") => ScatteringKernel::PitchAngle(PitchAngleScattering),
                _ => ScatteringKernel::Isotropic(IsotropicScattering),
            };
            ScatteringModel::RegimeSwitching(ExpandingRegime::new(
                origin.clone(),
                utils::get_finite_float_value_from_required_parseable_argument(
                    arguments,
                    "expansion-factor",
                ),
                utils::get_finite_float_value_from_required_parseable_argument::<fpr>(
                    arguments,
                    "expansion-start",
                ) * KPC_TO_M,
                utils::get_finite_float_value_from_required_parseable_argument(
                    arguments,
                    "external-scatter-rate",
                ),
                kernel,
            ))
        }
        _ => return None,
    };

    let scatter_rate =
        utils::get_finite_float_value_from_required_parseable_argument(arguments, "scatter-rate");
    let min_field_strength = utils::get_finite_float_value_from_required_parseable_argument::<
        fpr,
    >(arguments, "min-field-strength")
        * NANOGAUSS_TO_T;

    Some(exit_on_error!(
        ScatteringConfig::new(scatter_rate, min_field_strength, model),
        "Error: Invalid scattering configuration: {}"
    ))
}

#[cfg(test)]
mod tests {

    use super::*;

    fn configure(args: &[&str]) -> Option<ScatteringConfig> {
        let arguments = add_scattering_arguments_to_subcommand(Command::new("test"))
            .try_get_matches_from(std::iter::once("test").chain(args.iter().copied()))
            .unwrap();
        configure_scattering_from_arguments(&arguments, &Point3::origin())
    }

    #[test]
    fn scattering_is_off_by_default() {
        assert_eq!(configure(&[]), None);
    }

    #[test]
    fn expanding_model_uses_selected_kernel() {
        let config = configure(&[
            "--scattering",
            "expanding",
            "--expansion-kernel",
            "pitch-angle",
            "--scatter-rate",
            "1e-3",
            "--external-scatter-rate",
            "2e-3",
        ])
        .unwrap();
        assert_eq!(config.scatter_rate(), 1e-3);
        match config.model() {
            ScatteringModel::RegimeSwitching(regime) => {
                assert_eq!(
                    regime.kernel(),
                    &ScatteringKernel::PitchAngle(PitchAngleScattering)
                );
                assert_eq!(regime.external_rate(), 2e-3);
                assert_eq!(regime.expansion_factor(), 1.0);
            }
            model => panic!("unexpected model {}", model),
        }
    }

    #[test]
    fn unknown_model_is_rejected_by_parser() {
        assert!(add_scattering_arguments_to_subcommand(Command::new("test"))
            .try_get_matches_from(["test", "--scattering", "slab"])
            .is_err());
    }
}
