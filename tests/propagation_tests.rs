mod common;

use approx::{assert_abs_diff_eq, assert_relative_eq};
use common::{candidate_at_origin, proton_at_origin, proton_gyro_radius, uniform_field_along_z};
use gyrostep::{
    error::FieldSampleError,
    field::UniformField,
    geometry::{Dim3, Point3, Vec3},
    propagation::{
        fpr,
        scattering::{
            isotropic::IsotropicScattering,
            pitch_angle::PitchAngleScattering,
            regime::{ExpandingRegime, ScatteringKernel},
            standalone::ScatterModule,
            ScatteringConfig, ScatteringModel,
        },
        stepping::StepSizeConfig,
        BorisPropagator,
    },
    random::SeedStrategy,
};
use rand::{rngs::StdRng, SeedableRng};

#[test]
fn neutral_particle_moves_exactly_along_its_direction() {
    let propagator =
        BorisPropagator::adaptive(uniform_field_along_z(), 0.42, 2.0, 8.0).unwrap();
    let mut rng = StdRng::seed_from_u64(0);
    let mut candidate = candidate_at_origin(0.0, Vec3::new(0.0, 0.6, -0.8));
    let direction = candidate.current.direction().clone();
    candidate.set_next_step(5.0);

    propagator.process(&mut candidate, &mut rng).unwrap();

    assert_eq!(candidate.current.direction(), &direction);
    assert_eq!(candidate.current.position(), &(direction * 5.0).to_point3());
    assert_eq!(candidate.current_step(), 5.0);
    assert_eq!(candidate.next_step(), 8.0);
    assert_eq!(candidate.current.scatter_count(), 0);
}

#[test]
fn fixed_step_mode_keeps_step_length() {
    let step = 0.1 * proton_gyro_radius();
    let propagator = BorisPropagator::fixed(uniform_field_along_z(), step).unwrap();
    let mut rng = StdRng::seed_from_u64(0);
    let mut candidate = proton_at_origin(Vec3::new(1.0, 0.0, 0.0));
    candidate.set_next_step(0.5 * step);

    for _ in 0..50 {
        propagator.process(&mut candidate, &mut rng).unwrap();
        assert_eq!(candidate.current_step(), step);
        assert_eq!(candidate.next_step(), step);
    }
    assert_relative_eq!(candidate.trajectory_length(), 50.0 * step, max_relative = 1e-12);
}

#[test]
fn fixed_steps_follow_gyration_orbit() {
    let gyro_radius = proton_gyro_radius();
    let propagator = BorisPropagator::fixed(uniform_field_along_z(), 0.01 * gyro_radius).unwrap();
    let mut rng = StdRng::seed_from_u64(0);
    let mut candidate = proton_at_origin(Vec3::new(1.0, 0.0, 0.0));

    // Protons moving along x in a field along z gyrate around a center on the negative y-axis
    let center = Point3::new(0.0, -gyro_radius, 0.0);
    for _ in 0..1000 {
        propagator.process(&mut candidate, &mut rng).unwrap();
        assert_relative_eq!(
            candidate.current.position().distance_to(&center),
            gyro_radius,
            max_relative = 1e-3
        );
        assert_abs_diff_eq!(candidate.current.direction().length(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(candidate.current.position()[Dim3::Z], 0.0);
    }
}

#[test]
fn adaptive_steps_never_shrink_in_uniform_field() {
    let max_step = 0.2 * proton_gyro_radius();
    let min_step = 1e-6 * max_step;
    let propagator =
        BorisPropagator::adaptive(uniform_field_along_z(), 0.1, min_step, max_step).unwrap();
    let mut rng = StdRng::seed_from_u64(0);
    let mut candidate = proton_at_origin(Vec3::new(1.0, 0.0, 0.0));

    propagator.process(&mut candidate, &mut rng).unwrap();
    assert_eq!(candidate.current_step(), min_step);

    let mut previous_step = candidate.current_step();
    for _ in 0..30 {
        propagator.process(&mut candidate, &mut rng).unwrap();
        assert!(candidate.current_step() >= previous_step);
        assert!(candidate.next_step() >= candidate.current_step());
        previous_step = candidate.current_step();
    }
    assert_eq!(candidate.current_step(), max_step);
    assert_eq!(candidate.next_step(), max_step);
}

#[test]
fn saturated_minimum_step_is_accepted() {
    let gyro_radius = proton_gyro_radius();
    let (min_step, max_step) = (10.0 * gyro_radius, 1000.0 * gyro_radius);
    let propagator =
        BorisPropagator::adaptive(uniform_field_along_z(), 1e-6, min_step, max_step).unwrap();
    let mut rng = StdRng::seed_from_u64(0);
    let mut candidate = proton_at_origin(Vec3::new(1.0, 0.0, 0.0));
    candidate.set_next_step(max_step);

    propagator.process(&mut candidate, &mut rng).unwrap();

    assert_eq!(candidate.current_step(), min_step);
    assert_eq!(candidate.next_step(), min_step);
    assert_abs_diff_eq!(candidate.current.direction().length(), 1.0, epsilon = 1e-12);
}

#[test]
fn failing_field_samples_degrade_to_rectilinear_steps() {
    let field = |position: &Point3<fpr>, _: fpr| -> Result<Vec3<fpr>, FieldSampleError> {
        if position[Dim3::X] > 0.0 {
            Err(FieldSampleError::new("position outside of field model"))
        } else {
            Ok(Vec3::new(0.0, 0.0, 1.0))
        }
    };
    let propagator = BorisPropagator::fixed(field, 2.0).unwrap();
    let mut rng = StdRng::seed_from_u64(0);
    let mut candidate = proton_at_origin(Vec3::new(1.0, 0.0, 0.0));

    for _ in 0..3 {
        propagator.process(&mut candidate, &mut rng).unwrap();
    }
    assert_eq!(candidate.current.position(), &Point3::new(6.0, 0.0, 0.0));
    assert_eq!(candidate.current.direction(), &Vec3::new(1.0, 0.0, 0.0));
}

#[test]
fn scattered_directions_stay_normalized() {
    let step = 0.05 * proton_gyro_radius();
    let models = [
        ScatteringModel::Isotropic(IsotropicScattering),
        ScatteringModel::PitchAngle(PitchAngleScattering),
        ScatteringModel::RegimeSwitching(ExpandingRegime::new(
            Point3::origin(),
            0.5,
            0.0,
            2e-19,
            ScatteringKernel::PitchAngle(PitchAngleScattering),
        )),
    ];
    for model in models {
        let scattering = ScatteringConfig::new(1e-19, 0.0, model).unwrap();
        let propagator = BorisPropagator::adaptive(uniform_field_along_z(), 0.1, 0.1 * step, step)
            .unwrap()
            .with_scattering(scattering);
        let mut rng = StdRng::seed_from_u64(21);
        let mut candidate = proton_at_origin(Vec3::new(1.0, 1.0, 1.0));
        for _ in 0..200 {
            propagator.process(&mut candidate, &mut rng).unwrap();
            assert_abs_diff_eq!(candidate.current.direction().length(), 1.0, epsilon = 1e-12);
        }
        assert_eq!(candidate.current.scatter_count(), 200);
    }
}

#[test]
fn zero_scatter_rate_does_not_rotate() {
    let step = 0.05 * proton_gyro_radius();
    let plain = BorisPropagator::fixed(uniform_field_along_z(), step).unwrap();
    let scattered = plain.clone().with_scattering(
        ScatteringConfig::new(0.0, 0.0, ScatteringModel::Isotropic(IsotropicScattering)).unwrap(),
    );
    let mut rng = StdRng::seed_from_u64(5);
    let mut a = proton_at_origin(Vec3::new(0.0, 1.0, 1.0));
    let mut b = a.clone();

    for _ in 0..20 {
        plain.process(&mut a, &mut rng).unwrap();
        scattered.process(&mut b, &mut rng).unwrap();
        assert_eq!(a.current.direction(), b.current.direction());
    }
}

#[test]
fn fixed_seed_streams_reproduce_scattered_trajectories() {
    let step = 0.05 * proton_gyro_radius();
    let propagator = BorisPropagator::fixed(uniform_field_along_z(), step)
        .unwrap()
        .with_scattering(
            ScatteringConfig::new(1e-15, 0.0, ScatteringModel::Isotropic(IsotropicScattering))
                .unwrap(),
        );
    let seeds = SeedStrategy::Fixed(2024);

    let trajectory = |particle_index| {
        let mut rng = seeds.stream_for_particle(particle_index);
        let mut candidate = proton_at_origin(Vec3::new(1.0, 0.0, 0.0));
        (0..25)
            .map(|_| {
                propagator.process(&mut candidate, &mut rng).unwrap();
                candidate.current.direction().clone()
            })
            .collect::<Vec<_>>()
    };

    assert_eq!(trajectory(0), trajectory(0));
    assert_ne!(trajectory(0), trajectory(1));
}

#[test]
fn propagator_without_field_moves_charged_particles_straight() {
    let propagator = BorisPropagator::<UniformField>::new(
        None,
        StepSizeConfig::adaptive(0.42, 1.0, 4.0).unwrap(),
    );
    let mut rng = StdRng::seed_from_u64(0);
    let mut candidate = proton_at_origin(Vec3::new(0.0, 0.0, 1.0));

    propagator.process(&mut candidate, &mut rng).unwrap();
    propagator.process(&mut candidate, &mut rng).unwrap();

    // No error in a zero field, so the step grows by the largest allowed factor
    assert_eq!(candidate.trajectory_length(), 1.0 + 4.0);
    assert_eq!(candidate.current.position(), &Point3::new(0.0, 0.0, 5.0));
}

#[test]
fn scatter_module_deflects_after_propagation() {
    let step = 0.05 * proton_gyro_radius();
    let propagator = BorisPropagator::fixed(uniform_field_along_z(), step).unwrap();
    let module = ScatterModule::new(1e-15).unwrap();
    let mut rng = StdRng::seed_from_u64(8);
    let mut candidate = proton_at_origin(Vec3::new(1.0, 0.0, 0.0));

    propagator.process(&mut candidate, &mut rng).unwrap();
    let propagated_direction = candidate.current.direction().clone();
    module.process(&mut candidate, &mut rng);

    assert_abs_diff_eq!(
        candidate.current.direction().angle_to(&propagated_direction),
        module.deflection_angle(step),
        epsilon = 1e-9
    );
    assert_eq!(candidate.next_step(), step);
}
