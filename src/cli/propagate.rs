//! Command line interface for propagating particles through a uniform field.

pub mod scattering;
pub mod stepping;

use self::{
    scattering::{add_scattering_arguments_to_subcommand, configure_scattering_from_arguments},
    stepping::{add_step_size_arguments_to_subcommand, configure_step_size_from_arguments},
};
use crate::{
    cli::utils,
    constants::{EEV_TO_J, ELEMENTARY_CHARGE, KPC_TO_M, NANOGAUSS_TO_T},
    exit_with_error,
    field::UniformField,
    geometry::{Dim3, Vec3},
    propagation::{
        candidate::{Candidate, ParticleState},
        fpr, BorisPropagator,
    },
    random::SeedStrategy,
};
use clap::{Arg, ArgMatches, Command};
use log::info;

/// Creates a subcommand for propagating particles.
pub fn create_propagate_subcommand() -> Command {
    let command = Command::new("propagate")
        .about("Propagate charged particles through a uniform magnetic field")
        .long_about(
            "Propagate charged particles through a uniform magnetic field.\n\
             Each particle is advanced for the given number of iterations, and one\n\
             line with its position, direction and step length is printed per iteration.",
        )
        .arg(
            Arg::new("field")
                .long("field")
                .value_name("BX,BY,BZ")
                .value_delimiter(',')
                .allow_hyphen_values(true)
                .help("Components of the uniform magnetic field [nG]")
                .default_value("0,0,1"),
        )
        .arg(
            Arg::new("position")
                .long("position")
                .value_name("X,Y,Z")
                .value_delimiter(',')
                .allow_hyphen_values(true)
                .help("Initial position of the particles [kpc]")
                .default_value("0,0,0"),
        )
        .arg(
            Arg::new("direction")
                .long("direction")
                .value_name("UX,UY,UZ")
                .value_delimiter(',')
                .allow_hyphen_values(true)
                .help("Initial direction of the particles (will be normalized)")
                .default_value("1,0,0"),
        )
        .arg(
            Arg::new("energy")
                .long("energy")
                .value_name("VALUE")
                .help("Energy of the particles [EeV]")
                .default_value("1"),
        )
        .arg(
            Arg::new("charge")
                .long("charge")
                .value_name("NUMBER")
                .allow_negative_numbers(true)
                .help("Charge of the particles [elementary charges]")
                .default_value("1"),
        )
        .arg(
            Arg::new("redshift")
                .long("redshift")
                .value_name("VALUE")
                .help("Redshift at which the field is sampled")
                .default_value("0"),
        )
        .arg(
            Arg::new("particles")
                .short('n')
                .long("particles")
                .value_name("NUMBER")
                .help("Number of particles to propagate")
                .default_value("1"),
        )
        .arg(
            Arg::new("iterations")
                .short('i')
                .long("iterations")
                .value_name("NUMBER")
                .help("Number of steps to take for each particle")
                .default_value("100"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_name("NUMBER")
                .help("Base seed for the random streams of the particles [default: from entropy]"),
        );
    let command = add_step_size_arguments_to_subcommand(command);
    add_scattering_arguments_to_subcommand(command)
}

/// Runs actions for the `propagate` subcommand using the given arguments.
pub fn run_propagate_subcommand(arguments: &ArgMatches) {
    let field = UniformField::new(vec3_from_argument(arguments, "field") * NANOGAUSS_TO_T);
    let position = (vec3_from_argument(arguments, "position") * KPC_TO_M).to_point3();
    let direction = vec3_from_argument(arguments, "direction");
    if direction.is_zero() {
        exit_with_error!("Error: direction must not be the zero vector");
    }

    let energy =
        utils::get_finite_float_value_from_required_parseable_argument::<fpr>(arguments, "energy")
            * EEV_TO_J;
    if energy <= 0.0 {
        exit_with_error!("Error: energy must be larger than zero");
    }
    let charge =
        utils::get_finite_float_value_from_required_parseable_argument::<fpr>(arguments, "charge")
            * ELEMENTARY_CHARGE;
    let redshift =
        utils::get_finite_float_value_from_required_parseable_argument(arguments, "redshift");

    let n_particles: u64 = utils::get_value_from_required_parseable_argument(arguments, "particles");
    let n_iterations: u64 =
        utils::get_value_from_required_parseable_argument(arguments, "iterations");
    let seed_strategy = utils::get_value_from_parseable_argument(arguments, "seed")
        .map_or(SeedStrategy::Entropy, SeedStrategy::Fixed);

    let step_size = configure_step_size_from_arguments(arguments);
    let mut propagator = BorisPropagator::new(Some(field), step_size);
    propagator.set_scattering(configure_scattering_from_arguments(arguments, &position));

    info!("{}", propagator);
    info!("Random streams seeded from {}", seed_strategy);

    for particle_index in 0..n_particles {
        let mut rng = seed_strategy.stream_for_particle(particle_index);
        let mut candidate = Candidate::new(
            ParticleState::new(position.clone(), direction.clone(), energy, charge),
            redshift,
        );
        for iteration in 0..n_iterations {
            if let Err(err) = propagator.process(&mut candidate, &mut rng) {
                exit_with_error!(
                    "Error: Could not propagate particle {} in iteration {}: {}",
                    particle_index,
                    iteration,
                    err
                );
            }
            print_candidate(particle_index, iteration, &candidate);
        }
    }
}

fn vec3_from_argument(arguments: &ArgMatches, argument_name: &str) -> Vec3<fpr> {
    let components =
        utils::get_finite_float_3d_value_from_required_parseable_argument(arguments, argument_name);
    Vec3::with_each_component(|dim| components[dim])
}

fn print_candidate(particle_index: u64, iteration: u64, candidate: &Candidate) {
    let position = candidate.current.position();
    let direction = candidate.current.direction();
    println!(
        "{} {} {:e} {:e} {:e} {} {} {} {:e} {}",
        particle_index,
        iteration,
        position[Dim3::X] / KPC_TO_M,
        position[Dim3::Y] / KPC_TO_M,
        position[Dim3::Z] / KPC_TO_M,
        direction[Dim3::X],
        direction[Dim3::Y],
        direction[Dim3::Z],
        candidate.current_step() / KPC_TO_M,
        candidate.current.scatter_count()
    );
}
