mod function_space;
mod polynomial;

pub use function_space::FunctionSpace;
pub use polynomial::{Basis, PolynomialSpace};
