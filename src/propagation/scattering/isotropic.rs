//! Isotropic small-angle scattering.

use super::{DirectionPerturber, ScatteringContext};
use crate::{
    constants::C_LIGHT,
    error::ScatteringError,
    geometry::Vec3,
    propagation::fpr,
    random::{random_unit_vector, standard_normal},
};
use rand::Rng;
use std::fmt;

/// Rotates the direction by a normally distributed angle about a random
/// axis perpendicular to it.
///
/// The width of the angle distribution is `sqrt(step*rate/c)`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct IsotropicScattering;

impl IsotropicScattering {
    /// Returns the standard deviation of the rotation angle for the given step and rate.
    pub fn angle_scale(step: fpr, scatter_rate: fpr) -> fpr {
        fpr::sqrt(step * scatter_rate / C_LIGHT)
    }
}

impl DirectionPerturber for IsotropicScattering {
    fn perturb<R: Rng + ?Sized>(
        &self,
        direction: &Vec3<fpr>,
        step: fpr,
        scatter_rate: fpr,
        _context: &ScatteringContext,
        rng: &mut R,
    ) -> Result<Vec3<fpr>, ScatteringError> {
        if scatter_rate == 0.0 {
            return Ok(direction.clone());
        }
        let delta_phi = Self::angle_scale(step, scatter_rate) * standard_normal(rng);
        let axis = direction.cross(&random_unit_vector(rng));
        Ok(rotate_and_normalize(direction, &axis, delta_phi))
    }
}

impl fmt::Display for IsotropicScattering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Isotropic scattering with a normally distributed deflection angle")
    }
}

/// Rotates the direction about the given axis, returning the result with unit
/// length. A zero axis leaves the direction unchanged.
pub(super) fn rotate_and_normalize(
    direction: &Vec3<fpr>,
    axis: &Vec3<fpr>,
    angle: fpr,
) -> Vec3<fpr> {
    let rotated = direction.rotated(axis, angle);
    if rotated.is_zero() {
        rotated
    } else {
        rotated.normalized()
    }
}
