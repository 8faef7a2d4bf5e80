#![allow(dead_code)]

use gyrostep::{
    constants::{C_LIGHT, EEV_TO_J, ELEMENTARY_CHARGE, NANOGAUSS_TO_T},
    field::UniformField,
    geometry::{Point3, Vec3},
    propagation::{
        candidate::{Candidate, ParticleState},
        fpr,
    },
};

#[cfg(feature = "cli")]
use std::ffi::OsString;

pub const ENERGY: fpr = EEV_TO_J;
pub const FIELD_STRENGTH: fpr = NANOGAUSS_TO_T;

/// Radius of the gyration orbit of a proton with energy `ENERGY` moving
/// perpendicular to a field of strength `FIELD_STRENGTH`.
pub fn proton_gyro_radius() -> fpr {
    ENERGY / (ELEMENTARY_CHARGE * C_LIGHT * FIELD_STRENGTH)
}

pub fn uniform_field_along_z() -> UniformField {
    UniformField::new(Vec3::new(0.0, 0.0, FIELD_STRENGTH))
}

pub fn candidate_at_origin(charge: fpr, direction: Vec3<fpr>) -> Candidate {
    Candidate::new(
        ParticleState::new(Point3::origin(), direction, ENERGY, charge),
        0.0,
    )
}

pub fn proton_at_origin(direction: Vec3<fpr>) -> Candidate {
    candidate_at_origin(ELEMENTARY_CHARGE, direction)
}

#[cfg(feature = "cli")]
pub fn run<I, T>(args: I)
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    gyrostep::cli::run::run_with_args(gyrostep::cli::build::build().get_matches_from(
        std::iter::once(OsString::from("gyrostep")).chain(args.into_iter().map(Into::into)),
    ));
}
