use std::cell::Cell;

use ndarray::{Array2, ArrayView2};
use rand::Rng;

use crate::{OperatorErr, Real, Result, function_space::FunctionSpace};

/// Functions `f(x) = a + b * (x_0 + x_1 + ...)`, handy for checking row alignment.
pub struct AffineSpace;

impl FunctionSpace for AffineSpace {
    type Feature = (Real, Real);

    fn random<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Result<Vec<Self::Feature>> {
        Ok((0..n)
            .map(|_| (rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0)))
            .collect())
    }

    fn eval_batch(
        &self,
        features: &[Self::Feature],
        xs: ArrayView2<Real>,
    ) -> Result<Array2<Real>> {
        Ok(Array2::from_shape_fn(
            (features.len(), xs.nrows()),
            |(f, p)| {
                let (a, b) = features[f];
                a + b * xs.row(p).sum()
            },
        ))
    }
}

/// An `AffineSpace` that fails the next evaluation over exactly `rows` points once armed.
pub struct FlakySpace {
    pub rows: usize,
    pub armed: Cell<bool>,
}

impl FunctionSpace for FlakySpace {
    type Feature = (Real, Real);

    fn random<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Result<Vec<Self::Feature>> {
        AffineSpace.random(n, rng)
    }

    fn eval_batch(
        &self,
        features: &[Self::Feature],
        xs: ArrayView2<Real>,
    ) -> Result<Array2<Real>> {
        if xs.nrows() == self.rows && self.armed.replace(false) {
            return Err(OperatorErr::collaborator("evaluation failed"));
        }

        AffineSpace.eval_batch(features, xs)
    }
}
