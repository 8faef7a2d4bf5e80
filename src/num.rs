//! Utilities related to numbers.

use num;
use std::fmt;

/// Floating point marker trait for easier control over trait bounds.
pub trait BFloat: Sync + Send + num::Float + num::cast::FromPrimitive + fmt::Debug {}

impl BFloat for f32 {}
impl BFloat for f64 {}

/// Restricts the given value to the closed interval `[lower, upper]`.
///
/// The lower bound wins if the bounds are inverted.
pub fn clip<F: BFloat>(value: F, lower: F, upper: F) -> F {
    F::max(lower, F::min(value, upper))
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn clipping_keeps_values_inside_bounds() {
        assert_eq!(clip(0.5, 1.0, 10.0), 1.0);
        assert_eq!(clip(4.0, 1.0, 10.0), 4.0);
        assert_eq!(clip(12.0, 1.0, 10.0), 10.0);
        assert_eq!(clip(3.0_f32, 3.0, 3.0), 3.0);
    }
}
