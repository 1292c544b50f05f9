use ndarray::ArrayView2;

use crate::Real;

/// Reduces the difference between an expected and an obtained array to a scalar.
pub trait LossFn {
    fn loss(&self, y_pred: ArrayView2<Real>, y: ArrayView2<Real>) -> Real;
}
