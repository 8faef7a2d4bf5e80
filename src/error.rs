//! Error types.
//!
//! Misconfiguration is reported through [`ConfigError`] when a configuration is
//! built, and must be fixed before propagation can start. Failing field samples
//! are reported through [`FieldSampleError`], which the propagator recovers from.
//! Physically invalid states reached while scattering are reported through
//! [`ScatteringError`] and abort the processing of the affected candidate.

use crate::propagation::fpr;
use thiserror::Error;

#[cfg(not(feature = "for-testing"))]
#[macro_export]
macro_rules! exit_with_error {
    ($($print_arg:tt)*) => {{
        eprintln!($($print_arg)*);
        quit::with_code(1);
    }};
}

#[cfg(feature = "for-testing")]
#[macro_export]
macro_rules! exit_with_error {
    ($($print_arg:tt)*) => {{
        panic!($($print_arg)*);
    }};
}

/// Unwraps the given result, or prints the given message with the error
/// appended as the last format argument and exits.
#[macro_export]
macro_rules! exit_on_error {
    ($result:expr, $($print_arg:tt)*) => {
        match $result {
            Ok(value) => value,
            Err(err) => {
                $crate::exit_with_error!($($print_arg)*, err)
            }
        }
    };
}

/// Errors produced when validating propagation or scattering parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("tolerance must be in the range [0, 1], got {0}")]
    ToleranceOutOfRange(fpr),

    #[error("minimum step must not be negative, got {0}")]
    NegativeMinimumStep(fpr),

    #[error("minimum step {min_step} exceeds maximum step {max_step}")]
    MinimumStepExceedsMaximum { min_step: fpr, max_step: fpr },

    #[error("maximum step {max_step} is smaller than minimum step {min_step}")]
    MaximumStepBelowMinimum { min_step: fpr, max_step: fpr },

    #[error("scatter rate '{name}' must not be negative, got {value}")]
    NegativeScatterRate { name: &'static str, value: fpr },

    #[error("minimum field strength for scattering must not be negative, got {0}")]
    NegativeFieldThreshold(fpr),

    #[error("expansion parameter '{name}' must be finite and non-negative, got {value}")]
    InvalidExpansion { name: &'static str, value: fpr },
}

/// Error reported by a field model that could not produce a sample.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("field sampling failed: {0}")]
pub struct FieldSampleError(pub String);

impl FieldSampleError {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self(message.into())
    }
}

/// Errors produced when a scattering perturbation would leave the physical domain.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScatteringError {
    #[error(
        "pitch-angle cosine change {change} is outside [-1, 1]; reduce the scatter rate or the step size"
    )]
    CosineOutOfRange { change: fpr },
}

/// Errors that abort the processing of a single candidate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PropagationError {
    #[error(transparent)]
    Scattering(#[from] ScatteringError),
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn config_errors_name_the_offending_parameter() {
        let msg = format!("{}", ConfigError::ToleranceOutOfRange(1.5));
        assert!(msg.contains("tolerance") && msg.contains("1.5"), "got: {msg}");

        let msg = format!(
            "{}",
            ConfigError::MinimumStepExceedsMaximum {
                min_step: 3.0,
                max_step: 2.0
            }
        );
        assert!(msg.contains("minimum step 3"), "got: {msg}");
        assert!(msg.contains("maximum step 2"), "got: {msg}");

        let msg = format!(
            "{}",
            ConfigError::NegativeScatterRate {
                name: "external_rate",
                value: -1.0
            }
        );
        assert!(msg.contains("external_rate"), "got: {msg}");
    }

    #[test]
    fn scattering_error_passes_through_propagation_error() {
        let err = PropagationError::from(ScatteringError::CosineOutOfRange { change: 1.25 });
        let msg = format!("{err}");
        assert!(msg.contains("1.25") && msg.contains("scatter rate"), "got: {msg}");
    }

    #[test]
    fn errors_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync + std::error::Error>() {}
        assert_send_sync::<ConfigError>();
        assert_send_sync::<FieldSampleError>();
        assert_send_sync::<ScatteringError>();
        assert_send_sync::<PropagationError>();
    }
}
