//! Command line interface.

pub mod build;
pub mod propagate;
pub mod run;
pub mod utils;
