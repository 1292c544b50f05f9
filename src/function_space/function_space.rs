use ndarray::{Array2, ArrayView2};
use rand::Rng;

use crate::{Real, Result};

/// A parameterized distribution over functions that can be evaluated pointwise.
pub trait FunctionSpace {
    /// An opaque handle describing one sampled function.
    type Feature;

    /// Draws `n` functions from the space.
    ///
    /// # Arguments
    /// * `n` - The amount of functions to draw.
    /// * `rng` - A random number generator.
    ///
    /// # Returns
    /// The `n` sampled handles or an error if the space could not be sampled.
    fn random<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Result<Vec<Self::Feature>>;

    /// Evaluates every function at every point.
    ///
    /// # Arguments
    /// * `features` - The sampled functions.
    /// * `xs` - The points, one per row, in the space's own coordinates.
    ///
    /// # Returns
    /// A `features.len()` x `xs.nrows()` matrix or an error if the points can't be evaluated.
    fn eval_batch(&self, features: &[Self::Feature], xs: ArrayView2<Real>)
    -> Result<Array2<Real>>;
}
