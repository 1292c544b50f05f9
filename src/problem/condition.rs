use std::ops::Range;

use ndarray::{Array2, ArrayView2};

use crate::{Real, Result};

/// A boundary or initial condition.
pub trait Condition {
    /// Computes how far the model outputs are from satisfying the condition.
    ///
    /// # Arguments
    /// * `x_full` - The trunk input of the whole dataset.
    /// * `inputs` - The trunk input the model was fed.
    /// * `outputs` - The model outputs.
    /// * `rows` - The rows of the dataset that belong to this condition.
    /// * `aux` - The paired function values of the whole dataset.
    ///
    /// # Returns
    /// The error at each of the condition's rows, zero where the condition holds.
    fn error(
        &self,
        x_full: ArrayView2<Real>,
        inputs: ArrayView2<Real>,
        outputs: ArrayView2<Real>,
        rows: Range<usize>,
        aux: ArrayView2<Real>,
    ) -> Result<Array2<Real>>;
}
