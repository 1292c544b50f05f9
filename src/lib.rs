//! Training and testing data for physics-informed operator learning.
//!
//! Every sampled input function is paired with every collocation point, the
//! boundary/initial condition rows are laid out first and the interior rows
//! last, and `PdeOperator::losses` reads the model outputs back through that
//! same layout.

pub mod config;
pub mod data;
pub mod error;
pub mod function_space;
pub mod loss;
pub mod model;
pub mod problem;

pub use config::{FunctionSpaceSpec, LossSpec, OperatorSpec};
pub use data::{DataRef, PairedBlock, PairedInputs, PdeOperator};
pub use error::{OperatorErr, Result};

/// Floating point precision of every array the crate produces.
#[cfg(not(feature = "f64"))]
pub type Real = f32;

/// Floating point precision of every array the crate produces.
#[cfg(feature = "f64")]
pub type Real = f64;
