use ndarray::{Array2, ArrayView2};

use super::Condition;
use crate::{Real, Result};

/// The interior equation of a problem.
pub trait Residual {
    /// Evaluates the equation at every row.
    ///
    /// # Arguments
    /// * `x` - The trunk input the model was fed.
    /// * `outputs` - The model outputs for those rows.
    /// * `aux` - The paired function values for those rows.
    ///
    /// # Returns
    /// One array per equation component, each with one row per input row.
    fn residual(
        &self,
        x: ArrayView2<Real>,
        outputs: ArrayView2<Real>,
        aux: ArrayView2<Real>,
    ) -> Result<Vec<Array2<Real>>>;
}

/// A differential equation problem: its equation, its boundary/initial conditions and
/// the fixed collocation points both are enforced at.
pub trait Problem {
    /// The dimension of the problem's domain.
    fn dim(&self) -> usize;

    /// The interior equation, `None` when only conditions are enforced.
    fn residual(&self) -> Option<&dyn Residual>;

    /// The boundary/initial conditions in declaration order.
    fn conditions(&self) -> &[Box<dyn Condition>];

    /// The amount of training points of each condition, in declaration order.
    fn num_bcs(&self) -> &[usize];

    /// The training points of every condition, stacked in declaration order.
    fn train_points_bc(&self) -> ArrayView2<'_, Real>;

    /// The training points the equation is enforced at.
    fn train_points_interior(&self) -> ArrayView2<'_, Real>;

    /// The testing points: the condition points first, then the interior testing points.
    fn test_points(&self) -> ArrayView2<'_, Real>;
}
