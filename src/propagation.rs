//! Propagation of charged particles through magnetic fields.

pub mod boris;
pub mod candidate;
pub mod scattering;
pub mod stepping;

use self::{
    boris::{BorisPush, BorisStepper},
    candidate::Candidate,
    scattering::{ScatteringConfig, ScatteringContext},
    stepping::{estimate_step_doubling_error, StepAttempt, StepSizeConfig, StepSizePolicy},
};
use crate::{
    error::{ConfigError, PropagationError},
    field::FieldSampler,
    geometry::{Point3, Vec3},
    num,
};
use rand::Rng;
use std::fmt;

/// Floating-point precision to use for propagation.
#[allow(non_camel_case_types)]
pub type fpr = f64;

/// Propagates candidates with the Boris push, using either a fixed or an
/// adaptive step length, and optionally scatters their direction after
/// each step.
///
/// # Type parameters
///
/// - `S`: Type of field sampler.
#[derive(Clone, Debug)]
pub struct BorisPropagator<S> {
    field: Option<S>,
    step_size: StepSizeConfig,
    scattering: Option<ScatteringConfig>,
}

impl<S: FieldSampler> BorisPropagator<S> {
    /// Creates a new propagator with the given step size configuration.
    ///
    /// Without a field, charged particles are pushed through a zero field.
    pub fn new(field: Option<S>, step_size: StepSizeConfig) -> Self {
        Self {
            field,
            step_size,
            scattering: None,
        }
    }

    /// Creates a new propagator that always takes steps of the given length [m].
    pub fn fixed(field: S, step: fpr) -> Result<Self, ConfigError> {
        Ok(Self::new(Some(field), StepSizeConfig::fixed(step)?))
    }

    /// Creates a new propagator adapting its step length between the given
    /// limits [m] to keep the estimated error below the tolerance.
    pub fn adaptive(
        field: S,
        tolerance: fpr,
        min_step: fpr,
        max_step: fpr,
    ) -> Result<Self, ConfigError> {
        Ok(Self::new(
            Some(field),
            StepSizeConfig::adaptive(tolerance, min_step, max_step)?,
        ))
    }

    /// Enables scattering of charged particles after each step.
    pub fn with_scattering(mut self, scattering: ScatteringConfig) -> Self {
        self.scattering = Some(scattering);
        self
    }

    pub fn field(&self) -> Option<&S> {
        self.field.as_ref()
    }

    pub fn set_field(&mut self, field: Option<S>) {
        self.field = field;
    }

    pub fn step_size(&self) -> &StepSizeConfig {
        &self.step_size
    }

    pub fn step_size_mut(&mut self) -> &mut StepSizeConfig {
        &mut self.step_size
    }

    pub fn scattering(&self) -> Option<&ScatteringConfig> {
        self.scattering.as_ref()
    }

    pub fn set_scattering(&mut self, scattering: Option<ScatteringConfig>) {
        self.scattering = scattering;
    }

    /// Advances the candidate by one step.
    ///
    /// The current state is first stored as the previous state. Neutral
    /// particles move in a straight line, while charged particles are pushed
    /// through the field and then scattered if scattering is enabled and the
    /// sampled field is strong enough.
    ///
    /// # Parameters
    ///
    /// - `candidate`: Candidate to advance.
    /// - `rng`: Random stream of the candidate, used for scattering.
    ///
    /// # Returns
    ///
    /// A `Result` which is either:
    ///
    /// - `Ok`: The candidate was advanced.
    /// - `Err`: Contains a `PropagationError` if scattering produced an unphysical
    /// direction. The current state of the candidate is then left as it was.
    pub fn process<R: Rng + ?Sized>(
        &self,
        candidate: &mut Candidate,
        rng: &mut R,
    ) -> Result<(), PropagationError> {
        #![allow(clippy::float_cmp)]
        candidate.previous = candidate.current.clone();

        let charge = candidate.current.charge();
        if charge == 0.0 {
            self.propagate_rectilinear(candidate);
            return Ok(());
        }

        let position = candidate.current.position().clone();
        let direction = candidate.current.direction().clone();
        let redshift = candidate.redshift();
        let mass = candidate.current.mass();

        let stepper = BorisStepper::new(self.field.as_ref());

        let (push, step, next_step) = match self.step_size.policy() {
            StepSizePolicy::Fixed { step } => (
                stepper.step(&position, &direction, step, redshift, charge, mass),
                step,
                step,
            ),
            StepSizePolicy::Adaptive {
                min_step, max_step, ..
            } => {
                let initial_step = num::clip(candidate.next_step(), min_step, max_step);
                let accepted = self.step_size.adapt_step(initial_step, |step_length| {
                    Self::attempt_doubled_step(
                        &stepper,
                        &position,
                        &direction,
                        step_length,
                        redshift,
                        charge,
                        mass,
                    )
                });
                (accepted.result, accepted.step, accepted.next_step)
            }
        };

        let BorisPush {
            position: new_position,
            direction: mut new_direction,
            field,
        } = push;

        if let Some(scattering) = &self.scattering {
            if scattering.applies_in_field(&field) {
                let context = ScatteringContext {
                    position: &new_position,
                    field: &field,
                    trajectory_length: candidate.trajectory_length(),
                };
                new_direction = scattering.perturb(&new_direction, step, &context, rng)?;
                candidate.current.increment_scatter_count();
            }
        }

        candidate.current.set_position(new_position);
        if !new_direction.is_zero() {
            candidate.current.set_direction(new_direction);
        }
        candidate.set_current_step(step);
        candidate.set_next_step(next_step);
        Ok(())
    }

    fn propagate_rectilinear(&self, candidate: &mut Candidate) {
        let step = num::clip(
            candidate.next_step(),
            self.step_size.min_step(),
            self.step_size.max_step(),
        );
        let new_position = candidate.current.position() + &(candidate.current.direction() * step);
        candidate.current.set_position(new_position);
        candidate.set_current_step(step);
        candidate.set_next_step(self.step_size.max_step());
    }

    /// Performs one full push and two consecutive half pushes, and estimates
    /// the error of the full push from the difference.
    fn attempt_doubled_step(
        stepper: &BorisStepper<'_, S>,
        position: &Point3<fpr>,
        direction: &Vec3<fpr>,
        step_length: fpr,
        redshift: fpr,
        charge: fpr,
        mass: fpr,
    ) -> StepAttempt<BorisPush> {
        let half_step_length = 0.5 * step_length;

        let full = stepper.step(position, direction, step_length, redshift, charge, mass);
        let first_half = stepper.step(
            position,
            direction,
            half_step_length,
            redshift,
            charge,
            mass,
        );
        let second_half = stepper.step(
            &first_half.position,
            &first_half.direction,
            half_step_length,
            redshift,
            charge,
            mass,
        );

        let error =
            estimate_step_doubling_error(&full.position, &second_half.position, step_length);
        StepAttempt {
            result: full,
            error,
        }
    }
}

impl<S> fmt::Display for BorisPropagator<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Propagation in magnetic fields using the adaptive Boris push method. {}",
            self.step_size
        )?;
        if self.field.is_none() {
            f.write_str(", no field")?;
        }
        if let Some(scattering) = &self.scattering {
            write!(f, ". Scattering: {}", scattering)?;
        }
        Ok(())
    }
}
