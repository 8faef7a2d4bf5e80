//! Utilities related to random numbers.
//!
//! Nothing in this crate owns a random number generator. Every stochastic
//! operation borrows one from the caller, and [`SeedStrategy`] decides how
//! each particle obtains its own independent stream.

use crate::{geometry::Vec3, propagation::fpr};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_distr::StandardNormal;
use std::{f64::consts::PI, fmt};

/// How the random stream of each particle is seeded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedStrategy {
    /// Reproducible streams derived from a base seed and the particle index.
    Fixed(u64),
    /// Streams seeded from operating system entropy.
    Entropy,
}

impl SeedStrategy {
    /// Multiplier used to spread consecutive particle indices over the seed space.
    const INDEX_SPREAD: u64 = 0x9E37_79B9_7F4A_7C15;

    /// Creates the random stream for the particle with the given index.
    ///
    /// With `Fixed`, the same base seed and index always yield the same stream,
    /// while different indices yield different streams.
    pub fn stream_for_particle(&self, particle_index: u64) -> StdRng {
        match *self {
            Self::Fixed(base_seed) => StdRng::seed_from_u64(
                base_seed ^ particle_index.wrapping_add(1).wrapping_mul(Self::INDEX_SPREAD),
            ),
            Self::Entropy => StdRng::from_entropy(),
        }
    }
}

impl fmt::Display for SeedStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(seed) => write!(f, "fixed base seed {}", seed),
            Self::Entropy => f.write_str("entropy"),
        }
    }
}

/// Draws a direction uniformly distributed on the unit sphere.
pub fn random_unit_vector<R: Rng + ?Sized>(rng: &mut R) -> Vec3<fpr> {
    let cos_theta: fpr = rng.gen_range(-1.0..=1.0);
    let phi = random_azimuth(rng);
    let sin_theta = fpr::sqrt(fpr::max(0.0, 1.0 - cos_theta * cos_theta));
    Vec3::new(sin_theta * phi.cos(), sin_theta * phi.sin(), cos_theta)
}

/// Draws an angle uniformly distributed in `[0, 2pi)`.
pub fn random_azimuth<R: Rng + ?Sized>(rng: &mut R) -> fpr {
    2.0 * PI * rng.gen::<fpr>()
}

/// Draws a normally distributed number with zero mean and unit variance.
pub fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> fpr {
    rng.sample(StandardNormal)
}

#[cfg(test)]
mod tests {

    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn fixed_seed_streams_are_reproducible_and_distinct() {
        let strategy = SeedStrategy::Fixed(1);
        let a: Vec<u64> = strategy.stream_for_particle(3).sample_iter(rand::distributions::Standard).take(4).collect();
        let b: Vec<u64> = strategy.stream_for_particle(3).sample_iter(rand::distributions::Standard).take(4).collect();
        let c: Vec<u64> = strategy.stream_for_particle(4).sample_iter(rand::distributions::Standard).take(4).collect();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn random_unit_vectors_have_unit_length() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            assert_abs_diff_eq!(random_unit_vector(&mut rng).length(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn random_unit_vectors_are_isotropic_on_average() {
        let mut rng = StdRng::seed_from_u64(7);
        let n = 20_000;
        let mut sum = Vec3::zero();
        for _ in 0..n {
            sum = sum + random_unit_vector(&mut rng);
        }
        let mean = sum / (n as fpr);
        assert!(mean.length() < 0.03, "mean direction {} is not close to zero", mean);
    }

    #[test]
    fn standard_normal_has_unit_variance() {
        let mut rng = StdRng::seed_from_u64(11);
        let n = 20_000;
        let samples: Vec<fpr> = (0..n).map(|_| standard_normal(&mut rng)).collect();
        let mean = samples.iter().sum::<fpr>() / (n as fpr);
        let variance = samples.iter().map(|x| (x - mean) * (x - mean)).sum::<fpr>() / (n as fpr);
        assert!(mean.abs() < 0.05);
        assert!((variance - 1.0).abs() < 0.05);
    }
}
