use std::num::NonZeroUsize;

use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};

use crate::{
    Real, Result,
    function_space::{Basis, PolynomialSpace},
    loss::{LossFn, Mae, Mse},
};

/// The specification of a `PdeOperator` dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct OperatorSpec {
    /// The amount of functions sampled for training.
    pub num_function: NonZeroUsize,
    /// The coordinate columns the sampled functions depend on, all of them when absent.
    #[serde(default)]
    pub function_variables: Option<Vec<usize>>,
    /// The amount of functions sampled for testing the equation, the training
    /// functions are reused when absent. Condition rows always come from training.
    #[serde(default)]
    pub num_test: Option<NonZeroUsize>,
}

impl OperatorSpec {
    /// Creates a new `OperatorSpec` where functions depend on every coordinate and the
    /// test set aliases the training set.
    pub fn new(num_function: NonZeroUsize) -> Self {
        Self {
            num_function,
            function_variables: None,
            num_test: None,
        }
    }

    pub fn with_function_variables(mut self, function_variables: Vec<usize>) -> Self {
        self.function_variables = Some(function_variables);
        self
    }

    pub fn with_num_test(mut self, num_test: NonZeroUsize) -> Self {
        self.num_test = Some(num_test);
        self
    }

    /// Parses a spec from its json representation.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// The specification of a `PolynomialSpace`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FunctionSpaceSpec {
    pub basis: Basis,
    pub n: usize,
    pub m: Real,
}

impl FunctionSpaceSpec {
    /// Builds the described function space.
    ///
    /// # Returns
    /// The function space or an error if the parameters are invalid.
    pub fn build(&self) -> Result<PolynomialSpace> {
        PolynomialSpace::new(self.basis, self.n, self.m)
    }
}

/// The loss function reducing each residual and condition error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossSpec {
    #[default]
    Mse,
    Mae,
}

impl LossFn for LossSpec {
    fn loss(&self, y_pred: ArrayView2<Real>, y: ArrayView2<Real>) -> Real {
        match self {
            LossSpec::Mse => Mse.loss(y_pred, y),
            LossSpec::Mae => Mae.loss(y_pred, y),
        }
    }
}
