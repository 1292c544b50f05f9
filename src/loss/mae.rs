use ndarray::ArrayView2;

use super::LossFn;
use crate::Real;

/// Mean absolute error loss function.
#[derive(Debug, Default, Clone, Copy)]
pub struct Mae;

impl LossFn for Mae {
    fn loss(&self, y_pred: ArrayView2<Real>, y: ArrayView2<Real>) -> Real {
        (&y_pred - &y)
            .mapv(Real::abs)
            .mean()
            .unwrap_or_default()
    }
}
