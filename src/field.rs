//! Sampling of external magnetic field models.

use crate::{
    error::FieldSampleError,
    geometry::{Point3, Vec3},
    propagation::fpr,
};
use log::error;

/// Defines the properties of a magnetic field model that can be sampled
/// during propagation.
///
/// Implementations must be safe to sample from several threads at once.
pub trait FieldSampler: Sync {
    /// Returns the magnetic field vector [T] at the given position [m] and redshift.
    fn sample(&self, position: &Point3<fpr>, redshift: fpr) -> Result<Vec3<fpr>, FieldSampleError>;
}

impl<S> FieldSampler for S
where
    S: Fn(&Point3<fpr>, fpr) -> Result<Vec3<fpr>, FieldSampleError> + Sync,
{
    fn sample(&self, position: &Point3<fpr>, redshift: fpr) -> Result<Vec3<fpr>, FieldSampleError> {
        self(position, redshift)
    }
}

/// A field that has the same value everywhere.
#[derive(Clone, Debug)]
pub struct UniformField {
    value: Vec3<fpr>,
}

impl UniformField {
    pub fn new(value: Vec3<fpr>) -> Self {
        Self { value }
    }

    pub fn value(&self) -> &Vec3<fpr> {
        &self.value
    }
}

impl FieldSampler for UniformField {
    fn sample(&self, _position: &Point3<fpr>, _redshift: fpr) -> Result<Vec3<fpr>, FieldSampleError> {
        Ok(self.value.clone())
    }
}

/// Samples the given field, degrading to a zero field when no field is present
/// or when sampling fails.
///
/// Failures are logged and never propagated, so a single bad sample makes the
/// affected micro-step rectilinear instead of aborting the run.
pub fn sample_field_or_zero<S>(field: Option<&S>, position: &Point3<fpr>, redshift: fpr) -> Vec3<fpr>
where
    S: FieldSampler + ?Sized,
{
    match field.map(|field| field.sample(position, redshift)) {
        Some(Ok(value)) => value,
        Some(Err(err)) => {
            error!(
                "Could not sample magnetic field at {} (z = {}), using zero field instead: {}",
                position, redshift, err
            );
            Vec3::zero()
        }
        None => Vec3::zero(),
    }
}
