//! Step length control for the Boris push.
//!
//! In adaptive mode the local truncation error is estimated by step doubling:
//! one full step is compared with two consecutive half steps, and the step
//! length is shrunk until the error is within the tolerance or the minimum
//! step length is reached.

use super::fpr;
use crate::{
    constants::KPC_TO_M,
    error::ConfigError,
    geometry::{Point3, Vec3},
};
use log::{debug, trace};
use std::fmt;

/// Limits and error tolerance for the step length.
#[derive(Clone, Debug, PartialEq)]
pub struct StepSizeConfig {
    tolerance: fpr,
    min_step: fpr,
    max_step: fpr,
}

/// How the step length is chosen, derived from a `StepSizeConfig`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StepSizePolicy {
    /// Every step has the same length and no error estimation is performed.
    Fixed { step: fpr },
    /// The step length is adapted to keep the estimated error within the tolerance.
    Adaptive {
        tolerance: fpr,
        min_step: fpr,
        max_step: fpr,
    },
}

/// Outcome of a single step attempt, as seen by the step size controller.
#[derive(Clone, Debug)]
pub struct StepAttempt<T> {
    /// Whatever the attempted step produced.
    pub result: T,
    /// Estimated error of the attempted step.
    pub error: Vec3<fpr>,
}

/// An accepted step together with the step lengths to record.
#[derive(Clone, Debug)]
pub struct AcceptedStep<T> {
    pub result: T,
    /// Length of the accepted step.
    pub step: fpr,
    /// Step length proposed for the next call.
    pub next_step: fpr,
    /// Number of attempts that were needed.
    pub n_attempts: u32,
}

impl StepSizeConfig {
    pub const DEFAULT_TOLERANCE: fpr = 0.42;
    /// Scaling factor for the optimal step length to reduce oscillations.
    pub const SAFETY_FACTOR: fpr = 0.95;
    /// Exponent applied to the error ratio when computing a new step length.
    pub const ERROR_EXPONENT: fpr = -0.2;
    /// Smallest allowed scaling of the step length when a step is rejected.
    pub const MIN_STEP_SCALE: fpr = 0.1;
    /// Largest allowed scaling of the step length when a step is accepted.
    pub const MAX_STEP_SCALE: fpr = 5.0;

    /// Creates a configuration for fixed steps of the given length,
    /// with the default tolerance.
    pub fn fixed(step: fpr) -> Result<Self, ConfigError> {
        Self::adaptive(Self::DEFAULT_TOLERANCE, step, step)
    }

    /// Creates a configuration for adaptive steps.
    ///
    /// Equal minimum and maximum step lengths result in fixed steps.
    pub fn adaptive(tolerance: fpr, min_step: fpr, max_step: fpr) -> Result<Self, ConfigError> {
        let mut config = Self {
            tolerance: Self::DEFAULT_TOLERANCE,
            min_step: 0.0,
            max_step: 0.0,
        };
        config.set_tolerance(tolerance)?;
        config.set_maximum_step(max_step)?;
        config.set_minimum_step(min_step)?;
        Ok(config)
    }

    pub fn tolerance(&self) -> fpr {
        self.tolerance
    }

    pub fn min_step(&self) -> fpr {
        self.min_step
    }

    pub fn max_step(&self) -> fpr {
        self.max_step
    }

    /// Sets the target error, which must lie in `[0, 1]`.
    pub fn set_tolerance(&mut self, tolerance: fpr) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&tolerance) {
            return Err(ConfigError::ToleranceOutOfRange(tolerance));
        }
        self.tolerance = tolerance;
        Ok(())
    }

    /// Sets the minimum step length, which must be non-negative and not
    /// exceed the current maximum step length.
    pub fn set_minimum_step(&mut self, min_step: fpr) -> Result<(), ConfigError> {
        if min_step.is_nan() || min_step < 0.0 {
            return Err(ConfigError::NegativeMinimumStep(min_step));
        }
        if min_step > self.max_step {
            return Err(ConfigError::MinimumStepExceedsMaximum {
                min_step,
                max_step: self.max_step,
            });
        }
        self.min_step = min_step;
        Ok(())
    }

    /// Sets the maximum step length, which must not be smaller than the
    /// current minimum step length.
    pub fn set_maximum_step(&mut self, max_step: fpr) -> Result<(), ConfigError> {
        if max_step.is_nan() || max_step < self.min_step {
            return Err(ConfigError::MaximumStepBelowMinimum {
                min_step: self.min_step,
                max_step,
            });
        }
        self.max_step = max_step;
        Ok(())
    }

    /// Determines the step size policy implied by the configuration.
    pub fn policy(&self) -> StepSizePolicy {
        #![allow(clippy::float_cmp)]
        if self.min_step == self.max_step {
            StepSizePolicy::Fixed {
                step: self.max_step,
            }
        } else {
            StepSizePolicy::Adaptive {
                tolerance: self.tolerance,
                min_step: self.min_step,
                max_step: self.max_step,
            }
        }
    }

    /// Computes the step length to retry with after a step with the given
    /// error ratio (> 1) was rejected.
    ///
    /// The result is at least a tenth of the rejected step and at least the
    /// minimum step length.
    pub fn compute_step_length_rejected(&self, step: fpr, error_ratio: fpr) -> fpr {
        let new_step = step * Self::SAFETY_FACTOR * error_ratio.powf(Self::ERROR_EXPONENT);
        let new_step = fpr::max(new_step, Self::MIN_STEP_SCALE * step);
        fpr::max(new_step, self.min_step)
    }

    /// Computes the step length to propose for the next step after a step
    /// with the given error ratio (<= 1) was accepted.
    ///
    /// The result lies between the accepted step and five times it, and never
    /// exceeds the maximum step length.
    pub fn compute_step_length_accepted(&self, step: fpr, error_ratio: fpr) -> fpr {
        let new_step = step * Self::SAFETY_FACTOR * error_ratio.powf(Self::ERROR_EXPONENT);
        let new_step = fpr::max(new_step, step);
        let new_step = fpr::min(new_step, Self::MAX_STEP_SCALE * step);
        fpr::min(new_step, self.max_step)
    }

    /// Repeatedly attempts a step until its error is acceptable or the step
    /// length can not be reduced further.
    ///
    /// # Parameters
    ///
    /// - `initial_step`: Step length to try first (should lie within the limits).
    /// - `attempt_step`: Closure performing a step of the given length and estimating its error.
    ///
    /// # Returns
    ///
    /// The accepted step, along with the step length to propose for the next call.
    pub fn adapt_step<T, A>(&self, initial_step: fpr, mut attempt_step: A) -> AcceptedStep<T>
    where
        A: FnMut(fpr) -> StepAttempt<T>,
    {
        #![allow(clippy::float_cmp)]
        let mut step = initial_step;
        let mut next_step = step;
        let mut n_attempts = 0;

        loop {
            let attempt = attempt_step(step);
            n_attempts += 1;

            let error_ratio = attempt.error.length() / self.tolerance;

            if error_ratio > 1.0 {
                if step == self.min_step {
                    debug!(
                        "Accepting step of minimum length {} with error ratio {}",
                        step, error_ratio
                    );
                    return AcceptedStep {
                        result: attempt.result,
                        step,
                        next_step,
                        n_attempts,
                    };
                }
                step = self.compute_step_length_rejected(step, error_ratio);
                next_step = step;
            } else {
                if step != self.max_step {
                    next_step = self.compute_step_length_accepted(step, error_ratio);
                }
                trace!(
                    "Accepted step of length {} with error ratio {} after {} attempt(s)",
                    step,
                    error_ratio,
                    n_attempts
                );
                return AcceptedStep {
                    result: attempt.result,
                    step,
                    next_step,
                    n_attempts,
                };
            }
        }
    }
}

impl fmt::Display for StepSizeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Target error: {}, Minimum Step: {} kpc, Maximum Step: {} kpc",
            self.tolerance,
            self.min_step / KPC_TO_M,
            self.max_step / KPC_TO_M
        )
    }
}

/// Estimates the error of a second order step from the positions reached by
/// one full step and by two half steps.
///
/// The scalar estimate `|x_full - x_half| / (h (1 - 1/4))` is broadcast to
/// all three components of the returned vector.
pub fn estimate_step_doubling_error(
    full_step_position: &Point3<fpr>,
    half_steps_position: &Point3<fpr>,
    step: fpr,
) -> Vec3<fpr> {
    let difference = full_step_position - half_steps_position;
    let error = difference.length() / (step * (1.0 - 1.0 / 4.0));
    Vec3::equal_components(error)
}
