//! The `gyrostep` crate propagates relativistic charged particles through
//! magnetic fields with an adaptive Boris push, optionally perturbing their
//! direction by stochastic scattering.

pub mod constants;
pub mod error;
pub mod field;
pub mod geometry;
pub mod num;
pub mod propagation;
pub mod random;

#[cfg(feature = "cli")]
pub mod cli;
