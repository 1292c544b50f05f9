use log::debug;
use ndarray::{Array2, ArrayView2, Axis};

use super::{
    inputs::{PairedBlock, PairedInputs},
    layout::BlockLayout,
};
use crate::{OperatorErr, Real, Result, function_space::FunctionSpace};

/// Pairs every sampled function with every point of a point set.
pub struct InputAssembler<'a, S: FunctionSpace> {
    space: &'a S,
    func_vars: &'a [usize],
}

impl<'a, S: FunctionSpace> InputAssembler<'a, S> {
    /// Creates a new `InputAssembler`.
    ///
    /// # Arguments
    /// * `space` - The function space the functions were sampled from.
    /// * `func_vars` - The coordinate columns the functions depend on.
    ///
    /// # Returns
    /// A new `InputAssembler` instance.
    pub fn new(space: &'a S, func_vars: &'a [usize]) -> Self {
        Self { space, func_vars }
    }

    /// Builds the `(v, x, vx)` block for `features` and `points`.
    ///
    /// With `N` functions and `M` points the block has `N * M` rows laid out by
    /// `BlockLayout::new(N, M)`: row `n * M + m` holds `func_vals[n]`, `points[m]`
    /// and function `n` evaluated at `points[m]` restricted to the function variables.
    ///
    /// # Arguments
    /// * `features` - The sampled functions.
    /// * `func_vals` - The functions evaluated at the evaluation points, one row each.
    /// * `points` - The coordinate points, one per row.
    ///
    /// # Returns
    /// The assembled block or an error if the shapes disagree or the evaluation fails.
    pub fn assemble(
        &self,
        features: &[S::Feature],
        func_vals: ArrayView2<Real>,
        points: ArrayView2<Real>,
    ) -> Result<PairedBlock> {
        let n = features.len();
        let m = points.nrows();

        if func_vals.nrows() != n {
            return Err(OperatorErr::ShapeMismatch {
                what: "function value rows",
                got: func_vals.nrows(),
                expected: n,
            });
        }

        if let Some(&index) = self.func_vars.iter().find(|&&i| i >= points.ncols()) {
            return Err(OperatorErr::VariableOutOfRange {
                index,
                dim: points.ncols(),
            });
        }

        let layout = BlockLayout::new(n, m);

        let v = Array2::from_shape_fn((layout.len(), func_vals.ncols()), |(row, j)| {
            func_vals[[row / m, j]]
        });
        let x = Array2::from_shape_fn((layout.len(), points.ncols()), |(row, j)| {
            points[[row % m, j]]
        });

        let projected = points.select(Axis(1), self.func_vars);
        let vals = self.space.eval_batch(features, projected.view())?;
        if vals.dim() != (n, m) {
            return Err(OperatorErr::ShapeMismatch {
                what: "pointwise evaluations",
                got: vals.len(),
                expected: layout.len(),
            });
        }
        let vx = Array2::from_shape_fn((layout.len(), 1), |(row, _)| vals[[row / m, row % m]]);

        debug!(funcs = n, points = m; "assembled paired block");

        Ok(PairedBlock::new(layout, PairedInputs::new(v, x, vx)?))
    }
}
