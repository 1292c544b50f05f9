use ndarray::{Array1, Array2, ArrayView2};
use ndarray_rand::RandomExt;
use rand::Rng;
use rand_distr::Uniform;
use serde::{Deserialize, Serialize};

use super::FunctionSpace;
use crate::{OperatorErr, Real, Result};

/// The polynomial basis a `PolynomialSpace` expands its functions in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Basis {
    /// Monomials `1, x, x^2, ...`.
    Power,
    /// Chebyshev polynomials of the first kind `T_0, T_1, ...`, meant for `x` in `[-1, 1]`.
    Chebyshev,
}

/// One-dimensional functions `f(x) = sum_i a_i b_i(x)` with `n` coefficients drawn
/// uniformly from `[-m, m)`.
#[derive(Debug, Clone, Copy)]
pub struct PolynomialSpace {
    basis: Basis,
    n: usize,
    m: Real,
}

impl PolynomialSpace {
    /// Creates a new `PolynomialSpace`.
    ///
    /// # Arguments
    /// * `basis` - The basis functions.
    /// * `n` - The amount of coefficients (the degree plus one).
    /// * `m` - The bound of every coefficient.
    ///
    /// # Returns
    /// A new `PolynomialSpace` or an error if `n` is zero or `m` is not a positive number.
    pub fn new(basis: Basis, n: usize, m: Real) -> Result<Self> {
        if n == 0 {
            return Err(OperatorErr::InvalidSpec(
                "a polynomial space needs at least one coefficient".into(),
            ));
        }

        if !(m.is_finite() && m > 0.) {
            return Err(OperatorErr::InvalidSpec(format!(
                "the coefficient bound must be a positive number, got {m}"
            )));
        }

        Ok(Self { basis, n, m })
    }

    /// A power series space, see `new`.
    pub fn power_series(n: usize, m: Real) -> Result<Self> {
        Self::new(Basis::Power, n, m)
    }

    /// A Chebyshev series space, see `new`.
    pub fn chebyshev(n: usize, m: Real) -> Result<Self> {
        Self::new(Basis::Chebyshev, n, m)
    }

    #[inline]
    pub fn basis(&self) -> Basis {
        self.basis
    }

    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    // Row i holds b_i evaluated at every point.
    fn basis_matrix(&self, xs: &[Real]) -> Array2<Real> {
        let mut mat = Array2::ones((self.n, xs.len()));

        for i in 1..self.n {
            for (j, &x) in xs.iter().enumerate() {
                mat[[i, j]] = match self.basis {
                    Basis::Power => mat[[i - 1, j]] * x,
                    Basis::Chebyshev if i == 1 => x,
                    Basis::Chebyshev => 2. * x * mat[[i - 1, j]] - mat[[i - 2, j]],
                };
            }
        }

        mat
    }
}

impl FunctionSpace for PolynomialSpace {
    type Feature = Array1<Real>;

    fn random<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Result<Vec<Self::Feature>> {
        let dist = Uniform::new(-self.m, self.m)?;
        let coeffs = Array2::random_using((n, self.n), dist, rng);

        Ok(coeffs.rows().into_iter().map(|row| row.to_owned()).collect())
    }

    fn eval_batch(
        &self,
        features: &[Self::Feature],
        xs: ArrayView2<Real>,
    ) -> Result<Array2<Real>> {
        if xs.ncols() != 1 {
            return Err(OperatorErr::ShapeMismatch {
                what: "polynomial input dimension",
                got: xs.ncols(),
                expected: 1,
            });
        }

        if let Some(bad) = features.iter().find(|f| f.len() != self.n) {
            return Err(OperatorErr::ShapeMismatch {
                what: "polynomial coefficients",
                got: bad.len(),
                expected: self.n,
            });
        }

        let points: Vec<Real> = xs.column(0).to_vec();
        let coeffs = Array2::from_shape_fn((features.len(), self.n), |(f, i)| features[f][i]);

        Ok(coeffs.dot(&self.basis_matrix(&points)))
    }
}
