//! Scattering applied as a separate processing stage after propagation.

use crate::{
    constants::C_LIGHT,
    error::ConfigError,
    propagation::{candidate::Candidate, fpr},
    random::random_unit_vector,
};
use rand::Rng;
use std::fmt;

/// Deflects the direction of a candidate by a fixed angle
/// `sqrt(2*step*rate/c)` about a random axis perpendicular to it, where
/// `step` is the length of the step the candidate just took.
///
/// The next step is proposed to be as long as the current one.
#[derive(Clone, Debug, PartialEq)]
pub struct ScatterModule {
    scatter_rate: fpr,
}

impl ScatterModule {
    pub fn new(scatter_rate: fpr) -> Result<Self, ConfigError> {
        let mut module = Self { scatter_rate: 0.0 };
        module.set_scatter_rate(scatter_rate)?;
        Ok(module)
    }

    pub fn scatter_rate(&self) -> fpr {
        self.scatter_rate
    }

    pub fn set_scatter_rate(&mut self, scatter_rate: fpr) -> Result<(), ConfigError> {
        if scatter_rate.is_nan() || scatter_rate < 0.0 {
            return Err(ConfigError::NegativeScatterRate {
                name: "scatter_rate",
                value: scatter_rate,
            });
        }
        self.scatter_rate = scatter_rate;
        Ok(())
    }

    /// Returns the deflection angle for a step of the given length.
    pub fn deflection_angle(&self, step: fpr) -> fpr {
        fpr::sqrt(2.0 * step * self.scatter_rate / C_LIGHT)
    }

    /// Deflects the current direction of the candidate.
    pub fn process<R: Rng + ?Sized>(&self, candidate: &mut Candidate, rng: &mut R) {
        let step = candidate.current_step();
        let direction = candidate.current.direction();

        let axis = direction.cross(&random_unit_vector(rng));
        let deflected = direction.rotated(&axis, self.deflection_angle(step));

        if !deflected.is_zero() {
            candidate.current.set_direction(deflected);
        }
        candidate.set_next_step(step);
    }
}

impl fmt::Display for ScatterModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Scattering module to change the direction due to a general scattering process. Scatter rate: {} 1/s",
            self.scatter_rate
        )
    }
}
