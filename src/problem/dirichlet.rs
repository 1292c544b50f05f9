use std::ops::Range;

use ndarray::{Array2, ArrayView2, s};

use super::Condition;
use crate::{OperatorErr, Real, Result};

/// Fixes one output component to a prescribed value: `y_component(x) = g(x, v(x))`.
///
/// `g` receives only the condition's own rows of the trunk input and of the paired
/// values, and must return one target per row as a single column.
pub struct DirichletCondition<F> {
    component: usize,
    func: F,
}

impl<F> DirichletCondition<F> {
    /// Creates a new `DirichletCondition`.
    ///
    /// # Arguments
    /// * `component` - The output column the condition constrains.
    /// * `func` - The prescribed value `g(x, v(x))`.
    ///
    /// # Returns
    /// A new `DirichletCondition` instance.
    pub fn new(component: usize, func: F) -> Self
    where
        F: Fn(ArrayView2<Real>, ArrayView2<Real>) -> Array2<Real>,
    {
        Self { component, func }
    }
}

impl<F> Condition for DirichletCondition<F>
where
    F: Fn(ArrayView2<Real>, ArrayView2<Real>) -> Array2<Real>,
{
    fn error(
        &self,
        x_full: ArrayView2<Real>,
        _inputs: ArrayView2<Real>,
        outputs: ArrayView2<Real>,
        rows: Range<usize>,
        aux: ArrayView2<Real>,
    ) -> Result<Array2<Real>> {
        let available = outputs.nrows().min(x_full.nrows()).min(aux.nrows());
        if rows.end > available {
            return Err(OperatorErr::ShapeMismatch {
                what: "condition rows",
                got: available,
                expected: rows.end,
            });
        }

        if self.component >= outputs.ncols() {
            return Err(OperatorErr::ShapeMismatch {
                what: "output components",
                got: outputs.ncols(),
                expected: self.component + 1,
            });
        }

        let target = (self.func)(
            x_full.slice(s![rows.clone(), ..]),
            aux.slice(s![rows.clone(), ..]),
        );
        if target.dim() != (rows.len(), 1) {
            return Err(OperatorErr::ShapeMismatch {
                what: "prescribed values",
                got: target.len(),
                expected: rows.len(),
            });
        }

        let c = self.component;
        Ok(&outputs.slice(s![rows, c..c + 1]) - &target)
    }
}
