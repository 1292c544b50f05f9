use ndarray::{Array2, ArrayView2, Axis, concatenate};

use super::{Condition, Problem, Residual};
use crate::{OperatorErr, Real, Result};

/// A `Residual` backed by a closure.
pub struct FnResidual<F>(F);

impl<F> Residual for FnResidual<F>
where
    F: Fn(ArrayView2<Real>, ArrayView2<Real>, ArrayView2<Real>) -> Result<Vec<Array2<Real>>>,
{
    fn residual(
        &self,
        x: ArrayView2<Real>,
        outputs: ArrayView2<Real>,
        aux: ArrayView2<Real>,
    ) -> Result<Vec<Array2<Real>>> {
        (self.0)(x, outputs, aux)
    }
}

/// A `Problem` whose collocation points are given up front.
///
/// Conditions are added one at a time together with their training points; the
/// points are stacked in the order the conditions were added.
pub struct CollocationProblem {
    dim: usize,
    residual: Option<Box<dyn Residual>>,
    conditions: Vec<Box<dyn Condition>>,
    num_bcs: Vec<usize>,
    train_bc: Array2<Real>,
    train_interior: Array2<Real>,
    test_interior: Array2<Real>,
    test: Array2<Real>,
}

impl CollocationProblem {
    /// Creates a new `CollocationProblem` without equation nor conditions.
    ///
    /// # Arguments
    /// * `dim` - The dimension of the domain.
    /// * `train_interior` - The training points the equation is enforced at.
    /// * `test_interior` - The testing points the equation is enforced at.
    ///
    /// # Returns
    /// A new `CollocationProblem` or an error if the points are not `dim`-dimensional.
    pub fn new(dim: usize, train_interior: Array2<Real>, test_interior: Array2<Real>) -> Result<Self> {
        check_dim("interior training points", &train_interior, dim)?;
        check_dim("interior testing points", &test_interior, dim)?;

        Ok(Self {
            dim,
            residual: None,
            conditions: Vec::new(),
            num_bcs: Vec::new(),
            train_bc: Array2::zeros((0, dim)),
            test: test_interior.clone(),
            train_interior,
            test_interior,
        })
    }

    /// Sets the interior equation.
    ///
    /// # Arguments
    /// * `func` - Maps `(x, outputs, aux)` to one residual array per equation component.
    pub fn with_residual<F>(mut self, func: F) -> Self
    where
        F: Fn(ArrayView2<Real>, ArrayView2<Real>, ArrayView2<Real>) -> Result<Vec<Array2<Real>>>
            + 'static,
    {
        self.residual = Some(Box::new(FnResidual(func)));
        self
    }

    /// Appends a condition.
    ///
    /// # Arguments
    /// * `points` - The training points of the condition.
    /// * `condition` - The condition itself.
    ///
    /// # Returns
    /// The extended problem or an error if the points are not `dim`-dimensional.
    pub fn with_condition<C>(mut self, points: Array2<Real>, condition: C) -> Result<Self>
    where
        C: Condition + 'static,
    {
        check_dim("condition points", &points, self.dim)?;

        self.num_bcs.push(points.nrows());
        self.train_bc.append(Axis(0), points.view())?;
        self.test = concatenate(Axis(0), &[self.train_bc.view(), self.test_interior.view()])?;
        self.conditions.push(Box::new(condition));

        Ok(self)
    }
}

impl Problem for CollocationProblem {
    fn dim(&self) -> usize {
        self.dim
    }

    fn residual(&self) -> Option<&dyn Residual> {
        self.residual.as_deref()
    }

    fn conditions(&self) -> &[Box<dyn Condition>] {
        &self.conditions
    }

    fn num_bcs(&self) -> &[usize] {
        &self.num_bcs
    }

    fn train_points_bc(&self) -> ArrayView2<'_, Real> {
        self.train_bc.view()
    }

    fn train_points_interior(&self) -> ArrayView2<'_, Real> {
        self.train_interior.view()
    }

    fn test_points(&self) -> ArrayView2<'_, Real> {
        self.test.view()
    }
}

fn check_dim(what: &'static str, points: &Array2<Real>, dim: usize) -> Result<()> {
    if points.ncols() != dim {
        return Err(OperatorErr::ShapeMismatch {
            what,
            got: points.ncols(),
            expected: dim,
        });
    }

    Ok(())
}
