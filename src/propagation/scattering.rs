//! Stochastic perturbation of the direction of motion, modelling a diffusive
//! random walk in pitch angle or direction.

pub mod isotropic;
pub mod pitch_angle;
pub mod regime;
pub mod standalone;

use self::{
    isotropic::IsotropicScattering, pitch_angle::PitchAngleScattering, regime::ExpandingRegime,
};
use super::fpr;
use crate::{
    error::{ConfigError, ScatteringError},
    geometry::{Point3, Vec3},
};
use rand::Rng;
use std::fmt;

/// Local conditions that a perturbation may depend on.
#[derive(Clone, Debug)]
pub struct ScatteringContext<'a> {
    /// Position of the particle after the step [m].
    pub position: &'a Point3<fpr>,
    /// Magnetic field sampled during the step [T].
    pub field: &'a Vec3<fpr>,
    /// Distance travelled before the step [m].
    pub trajectory_length: fpr,
}

/// Defines the properties of a stochastic direction perturbation.
pub trait DirectionPerturber {
    /// Computes a randomly perturbed direction.
    ///
    /// # Parameters
    ///
    /// - `direction`: Unit direction before the perturbation.
    /// - `step`: Length of the step over which scattering occurs [m].
    /// - `scatter_rate`: Nominal scattering rate [1/s].
    /// - `context`: Local conditions at the particle.
    /// - `rng`: Random stream of the particle.
    ///
    /// # Returns
    ///
    /// A `Result` which is either:
    ///
    /// - `Ok`: Contains the perturbed unit direction.
    /// - `Err`: Contains a `ScatteringError` if the perturbation would be unphysical.
    fn perturb<R: Rng + ?Sized>(
        &self,
        direction: &Vec3<fpr>,
        step: fpr,
        scatter_rate: fpr,
        context: &ScatteringContext,
        rng: &mut R,
    ) -> Result<Vec3<fpr>, ScatteringError>;
}

/// The available scattering models.
#[derive(Clone, Debug, PartialEq)]
pub enum ScatteringModel {
    Isotropic(IsotropicScattering),
    PitchAngle(PitchAngleScattering),
    RegimeSwitching(ExpandingRegime),
}

impl ScatteringModel {
    fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Self::Isotropic(_) | Self::PitchAngle(_) => Ok(()),
            Self::RegimeSwitching(model) => model.validate(),
        }
    }
}

impl DirectionPerturber for ScatteringModel {
    fn perturb<R: Rng + ?Sized>(
        &self,
        direction: &Vec3<fpr>,
        step: fpr,
        scatter_rate: fpr,
        context: &ScatteringContext,
        rng: &mut R,
    ) -> Result<Vec3<fpr>, ScatteringError> {
        match self {
            Self::Isotropic(model) => model.perturb(direction, step, scatter_rate, context, rng),
            Self::PitchAngle(model) => model.perturb(direction, step, scatter_rate, context, rng),
            Self::RegimeSwitching(model) => {
                model.perturb(direction, step, scatter_rate, context, rng)
            }
        }
    }
}

impl fmt::Display for ScatteringModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Isotropic(model) => model.fmt(f),
            Self::PitchAngle(model) => model.fmt(f),
            Self::RegimeSwitching(model) => model.fmt(f),
        }
    }
}

/// Configuration of the scattering applied during propagation.
#[derive(Clone, Debug, PartialEq)]
pub struct ScatteringConfig {
    scatter_rate: fpr,
    min_field_strength: fpr,
    model: ScatteringModel,
}

impl ScatteringConfig {
    /// Creates a new scattering configuration.
    ///
    /// # Parameters
    ///
    /// - `scatter_rate`: Nominal scattering rate [1/s].
    /// - `min_field_strength`: Scattering is only applied where the field strength is at least this large [T].
    /// - `model`: How a scattering rate is turned into a perturbation.
    pub fn new(
        scatter_rate: fpr,
        min_field_strength: fpr,
        model: ScatteringModel,
    ) -> Result<Self, ConfigError> {
        if scatter_rate.is_nan() || scatter_rate < 0.0 {
            return Err(ConfigError::NegativeScatterRate {
                name: "scatter_rate",
                value: scatter_rate,
            });
        }
        if min_field_strength.is_nan() || min_field_strength < 0.0 {
            return Err(ConfigError::NegativeFieldThreshold(min_field_strength));
        }
        model.validate()?;
        Ok(Self {
            scatter_rate,
            min_field_strength,
            model,
        })
    }

    pub fn scatter_rate(&self) -> fpr {
        self.scatter_rate
    }

    pub fn min_field_strength(&self) -> fpr {
        self.min_field_strength
    }

    pub fn model(&self) -> &ScatteringModel {
        &self.model
    }

    /// Whether scattering applies in a field of the given strength.
    pub fn applies_in_field(&self, field: &Vec3<fpr>) -> bool {
        field.length() >= self.min_field_strength
    }

    /// Perturbs the given direction with the configured model and rate.
    pub fn perturb<R: Rng + ?Sized>(
        &self,
        direction: &Vec3<fpr>,
        step: fpr,
        context: &ScatteringContext,
        rng: &mut R,
    ) -> Result<Vec3<fpr>, ScatteringError> {
        self.model
            .perturb(direction, step, self.scatter_rate, context, rng)
    }
}

impl fmt::Display for ScatteringConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, scatter rate: {} 1/s, minimum field strength: {} T",
            self.model, self.scatter_rate, self.min_field_strength
        )
    }
}
