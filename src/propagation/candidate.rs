//! State of a propagated particle.

use super::fpr;
use crate::{
    constants::C_LIGHT,
    geometry::{Point3, Vec3},
};

#[cfg(feature = "serialization")]
use serde::Serialize;

/// Kinematic state of a particle at one point of its trajectory.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize))]
pub struct ParticleState {
    position: Point3<fpr>,
    direction: Vec3<fpr>,
    energy: fpr,
    charge: fpr,
    scatter_count: u64,
}

impl ParticleState {
    /// Creates a new particle state.
    ///
    /// # Parameters
    ///
    /// - `position`: Position of the particle [m].
    /// - `direction`: Direction of motion (will be normalized).
    /// - `energy`: Total energy of the particle [J].
    /// - `charge`: Electric charge of the particle [C].
    ///
    /// # Panics
    ///
    /// If `energy` is not larger than zero (including NaN).
    pub fn new(position: Point3<fpr>, direction: Vec3<fpr>, energy: fpr, charge: fpr) -> Self {
        assert!(energy > 0.0, "Particle energy must be larger than zero.");
        Self {
            position,
            direction: direction.normalized(),
            energy,
            charge,
            scatter_count: 0,
        }
    }

    pub fn position(&self) -> &Point3<fpr> {
        &self.position
    }

    pub fn set_position(&mut self, position: Point3<fpr>) {
        self.position = position;
    }

    /// Returns the unit direction of motion.
    pub fn direction(&self) -> &Vec3<fpr> {
        &self.direction
    }

    /// Sets the direction of motion, normalizing it to unit length.
    pub fn set_direction(&mut self, direction: Vec3<fpr>) {
        self.direction = direction.normalized();
    }

    pub fn energy(&self) -> fpr {
        self.energy
    }

    pub fn charge(&self) -> fpr {
        self.charge
    }

    /// Returns the relativistic mass `E/c^2` [kg].
    pub fn mass(&self) -> fpr {
        self.energy / (C_LIGHT * C_LIGHT)
    }

    /// Returns how many times the direction has been scattered.
    pub fn scatter_count(&self) -> u64 {
        self.scatter_count
    }

    pub fn increment_scatter_count(&mut self) {
        self.scatter_count += 1;
    }
}

/// A particle being propagated, together with the bookkeeping the
/// propagator needs between calls.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize))]
pub struct Candidate {
    /// State after the most recent propagation step.
    pub current: ParticleState,
    /// State at the start of the most recent propagation step.
    pub previous: ParticleState,
    current_step: fpr,
    next_step: fpr,
    trajectory_length: fpr,
    redshift: fpr,
}

impl Candidate {
    /// Creates a new candidate starting in the given state at the given redshift.
    ///
    /// No step has been proposed yet, so the first adaptive step starts at the
    /// minimum step length.
    pub fn new(state: ParticleState, redshift: fpr) -> Self {
        Self {
            previous: state.clone(),
            current: state,
            current_step: 0.0,
            next_step: 0.0,
            trajectory_length: 0.0,
            redshift,
        }
    }

    /// Returns the length of the most recent step [m].
    pub fn current_step(&self) -> fpr {
        self.current_step
    }

    /// Records the length of the step just taken, which is also added to the
    /// trajectory length.
    pub fn set_current_step(&mut self, step: fpr) {
        self.current_step = step;
        self.trajectory_length += step;
    }

    /// Returns the step length proposed for the next step [m].
    pub fn next_step(&self) -> fpr {
        self.next_step
    }

    pub fn set_next_step(&mut self, step: fpr) {
        self.next_step = step;
    }

    /// Returns the total distance travelled so far [m].
    pub fn trajectory_length(&self) -> fpr {
        self.trajectory_length
    }

    pub fn redshift(&self) -> fpr {
        self.redshift
    }

    pub fn set_redshift(&mut self, redshift: fpr) {
        self.redshift = redshift;
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::constants::EEV_TO_J;
    use approx::assert_relative_eq;

    #[test]
    fn direction_is_normalized() {
        let mut state = ParticleState::new(Point3::origin(), Vec3::new(3.0, 0.0, 4.0), 1.0, 0.0);
        assert_relative_eq!(state.direction().length(), 1.0);
        state.set_direction(Vec3::new(0.0, -2.0, 0.0));
        assert_eq!(state.direction(), &Vec3::new(0.0, -1.0, 0.0));
    }

    #[test]
    fn mass_follows_from_energy() {
        let state = ParticleState::new(Point3::origin(), Vec3::new(1.0, 0.0, 0.0), EEV_TO_J, 1.0);
        assert_relative_eq!(state.mass() * C_LIGHT * C_LIGHT, EEV_TO_J);
    }

    #[test]
    fn current_steps_accumulate_into_trajectory_length() {
        let state = ParticleState::new(Point3::origin(), Vec3::new(1.0, 0.0, 0.0), 1.0, 0.0);
        let mut candidate = Candidate::new(state, 0.0);
        candidate.set_current_step(2.0);
        candidate.set_current_step(3.5);
        assert_eq!(candidate.current_step(), 3.5);
        assert_eq!(candidate.trajectory_length(), 5.5);
        assert_eq!(candidate.next_step(), 0.0);
    }

    #[test]
    #[should_panic]
    fn zero_energy_is_rejected() {
        ParticleState::new(Point3::origin(), Vec3::new(1.0, 0.0, 0.0), 0.0, 1.0);
    }

    #[test]
    #[should_panic]
    fn nan_energy_is_rejected() {
        ParticleState::new(Point3::origin(), Vec3::new(1.0, 0.0, 0.0), fpr::NAN, 1.0);
    }
}
