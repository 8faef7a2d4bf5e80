//! Field-coupled scattering as a random walk in the pitch-angle cosine.

use super::{isotropic::rotate_and_normalize, DirectionPerturber, ScatteringContext};
use crate::{
    constants::C_LIGHT, error::ScatteringError, geometry::Vec3, propagation::fpr,
    random::random_azimuth,
};
use rand::Rng;
use std::fmt;

/// Perturbs the cosine `mu` of the pitch angle by
/// `2*sqrt(rate*(1 - mu^2)*step/c)*sin(phi)` with `phi` uniform in `[0, 2pi)`,
/// and rotates the direction in the plane spanned by the direction and the
/// local field to the new pitch angle.
///
/// A perturbed cosine beyond `-1` or `1` is reflected back into `[-1, 1]`.
/// The change itself must not exceed one in magnitude, which holds as long as
/// the rate is below `c/(4*step)`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PitchAngleScattering;

impl PitchAngleScattering {
    /// Computes the change in pitch-angle cosine for the given azimuth.
    pub fn cosine_change(cosine: fpr, step: fpr, scatter_rate: fpr, azimuth: fpr) -> fpr {
        let sine_squared = fpr::max(0.0, 1.0 - cosine * cosine);
        2.0 * fpr::sqrt(scatter_rate * sine_squared * step / C_LIGHT) * azimuth.sin()
    }
}

impl DirectionPerturber for PitchAngleScattering {
    fn perturb<R: Rng + ?Sized>(
        &self,
        direction: &Vec3<fpr>,
        step: fpr,
        scatter_rate: fpr,
        context: &ScatteringContext,
        rng: &mut R,
    ) -> Result<Vec3<fpr>, ScatteringError> {
        let field = context.field;
        if scatter_rate == 0.0 || field.is_zero() {
            return Ok(direction.clone());
        }

        let azimuth = random_azimuth(rng);

        let pitch_angle = direction.angle_to(field);
        let cosine = pitch_angle.cos();
        let change = Self::cosine_change(cosine, step, scatter_rate, azimuth);
        if change.abs() > 1.0 {
            return Err(ScatteringError::CosineOutOfRange { change });
        }
        let new_cosine = reflect_into_unit_range(cosine + change);

        // Rotating about direction x field turns the direction towards the field
        let axis = direction.cross(field);
        Ok(rotate_and_normalize(
            direction,
            &axis,
            pitch_angle - new_cosine.acos(),
        ))
    }
}

fn reflect_into_unit_range(cosine: fpr) -> fpr {
    if cosine > 1.0 {
        2.0 - cosine
    } else if cosine < -1.0 {
        -2.0 - cosine
    } else {
        cosine
    }
}

impl fmt::Display for PitchAngleScattering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Pitch-angle scattering relative to the local magnetic field")
    }
}
