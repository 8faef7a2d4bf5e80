//! Physical constants and unit conversion factors (SI).

/// Floating-point precision to use for constants.
#[allow(non_camel_case_types)]
pub type fcn = f64;

// Physical constants

/// Speed of light in vacuum [m/s].
pub const C_LIGHT: fcn = 2.997_924_58e8;
/// Elementary charge [C].
pub const ELEMENTARY_CHARGE: fcn = 1.602_176_634e-19;

// Unit conversion factors

/// Conversion factor from electron volts to Joules.
pub const EV_TO_J: fcn = ELEMENTARY_CHARGE;
/// Conversion factor from exa electron volts to Joules.
pub const EEV_TO_J: fcn = EV_TO_J * 1e18;
/// Conversion factor from gauss to tesla.
pub const GAUSS_TO_T: fcn = 1e-4;
/// Conversion factor from nanogauss to tesla.
pub const NANOGAUSS_TO_T: fcn = GAUSS_TO_T * 1e-9;
/// Conversion factor from parsecs to meters.
pub const PC_TO_M: fcn = 3.085_677_581_49e16;
/// Conversion factor from kiloparsecs to meters.
pub const KPC_TO_M: fcn = PC_TO_M * 1e3;
/// Conversion factor from megaparsecs to meters.
pub const MPC_TO_M: fcn = PC_TO_M * 1e6;
