//! Scattering in an expanding source region, where particles that have left
//! the region scatter with an external rate.

use super::{
    isotropic::IsotropicScattering, pitch_angle::PitchAngleScattering, DirectionPerturber,
    ScatteringContext,
};
use crate::{
    error::{ConfigError, ScatteringError},
    geometry::{Point3, Vec3},
    propagation::fpr,
};
use rand::Rng;
use std::fmt;

/// Rotation used once a scattering rate has been selected.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScatteringKernel {
    Isotropic(IsotropicScattering),
    PitchAngle(PitchAngleScattering),
}

impl DirectionPerturber for ScatteringKernel {
    fn perturb<R: Rng + ?Sized>(
        &self,
        direction: &Vec3<fpr>,
        step: fpr,
        scatter_rate: fpr,
        context: &ScatteringContext,
        rng: &mut R,
    ) -> Result<Vec3<fpr>, ScatteringError> {
        match self {
            Self::Isotropic(kernel) => kernel.perturb(direction, step, scatter_rate, context, rng),
            Self::PitchAngle(kernel) => kernel.perturb(direction, step, scatter_rate, context, rng),
        }
    }
}

/// A spherical region around `origin` whose radius grows as
/// `trajectory_length*expansion_factor + expansion_start`.
///
/// Inside the region the nominal scattering rate applies, outside it
/// `external_rate` is used instead.
#[derive(Clone, Debug, PartialEq)]
pub struct ExpandingRegime {
    origin: Point3<fpr>,
    expansion_factor: fpr,
    expansion_start: fpr,
    external_rate: fpr,
    kernel: ScatteringKernel,
}

impl ExpandingRegime {
    pub fn new(
        origin: Point3<fpr>,
        expansion_factor: fpr,
        expansion_start: fpr,
        external_rate: fpr,
        kernel: ScatteringKernel,
    ) -> Self {
        Self {
            origin,
            expansion_factor,
            expansion_start,
            external_rate,
            kernel,
        }
    }

    pub(super) fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("expansion_factor", self.expansion_factor),
            ("expansion_start", self.expansion_start),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidExpansion { name, value });
            }
        }
        if self.external_rate.is_nan() || self.external_rate < 0.0 {
            return Err(ConfigError::NegativeScatterRate {
                name: "external_rate",
                value: self.external_rate,
            });
        }
        Ok(())
    }

    pub fn origin(&self) -> &Point3<fpr> {
        &self.origin
    }

    pub fn expansion_factor(&self) -> fpr {
        self.expansion_factor
    }

    pub fn expansion_start(&self) -> fpr {
        self.expansion_start
    }

    pub fn external_rate(&self) -> fpr {
        self.external_rate
    }

    pub fn kernel(&self) -> &ScatteringKernel {
        &self.kernel
    }

    /// Computes the radius of the region after the given trajectory length [m].
    pub fn boundary_radius(&self, trajectory_length: fpr) -> fpr {
        trajectory_length * self.expansion_factor + self.expansion_start
    }

    /// Selects the scattering rate that applies in the given context.
    pub fn select_rate(&self, nominal_rate: fpr, context: &ScatteringContext) -> fpr {
        let distance = context.position.distance_to(&self.origin);
        if distance > self.boundary_radius(context.trajectory_length) {
            self.external_rate
        } else {
            nominal_rate
        }
    }
}

impl DirectionPerturber for ExpandingRegime {
    fn perturb<R: Rng + ?Sized>(
        &self,
        direction: &Vec3<fpr>,
        step: fpr,
        scatter_rate: fpr,
        context: &ScatteringContext,
        rng: &mut R,
    ) -> Result<Vec3<fpr>, ScatteringError> {
        let rate = self.select_rate(scatter_rate, context);
        self.kernel.perturb(direction, step, rate, context, rng)
    }
}

impl fmt::Display for ScatteringKernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Isotropic(kernel) => kernel.fmt(f),
            Self::PitchAngle(kernel) => kernel.fmt(f),
        }
    }
}

impl fmt::Display for ExpandingRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} in a region around {} expanding by a factor {} from {} m, external scatter rate: {} 1/s",
            self.kernel, self.origin, self.expansion_factor, self.expansion_start, self.external_rate
        )
    }
}
