//! The relativistic Boris push, a leapfrog scheme that splits each step into
//! two half drifts of the position around a rotation of the direction.

use super::fpr;
use crate::{
    constants::C_LIGHT,
    field::{self, FieldSampler},
    geometry::{Point3, Vec3},
};

/// Result of a single Boris push.
#[derive(Clone, Debug, PartialEq)]
pub struct BorisPush {
    /// Position after the full step.
    pub position: Point3<fpr>,
    /// Direction after the rotation.
    pub direction: Vec3<fpr>,
    /// Field sampled at the midpoint of the step.
    pub field: Vec3<fpr>,
}

/// Performs Boris pushes in a magnetic field.
///
/// A stepper without a field pushes through a zero field.
pub struct BorisStepper<'a, S: ?Sized> {
    field: Option<&'a S>,
}

impl<'a, S> BorisStepper<'a, S>
where
    S: FieldSampler + ?Sized,
{
    pub fn new(field: Option<&'a S>) -> Self {
        Self { field }
    }

    /// Performs one Boris push.
    ///
    /// # Parameters
    ///
    /// - `position`: Position at the start of the step [m].
    /// - `direction`: Unit direction at the start of the step.
    /// - `step_length`: Length of the step [m].
    /// - `redshift`: Redshift at which to sample the field.
    /// - `charge`: Charge of the particle [C]. Must be non-zero for the push to be meaningful.
    /// - `mass`: Relativistic mass of the particle [kg].
    ///
    /// # Returns
    ///
    /// A `BorisPush` holding the new position and direction together with
    /// the field that was sampled.
    pub fn step(
        &self,
        position: &Point3<fpr>,
        direction: &Vec3<fpr>,
        step_length: fpr,
        redshift: fpr,
        charge: fpr,
        mass: fpr,
    ) -> BorisPush {
        let half_step = 0.5 * step_length;

        let midpoint = position + &(direction * half_step);
        let field = field::sample_field_or_zero(self.field, &midpoint, redshift);

        let t = &field * (charge / (2.0 * mass) * step_length / C_LIGHT);
        let s = &t * (2.0 / (1.0 + t.dot(&t)));

        let v_help = direction + &direction.cross(&t);
        let new_direction = direction + &v_help.cross(&s);

        let new_position = &midpoint + &(&new_direction * half_step);

        BorisPush {
            position: new_position,
            direction: new_direction,
            field,
        }
    }
}
