use std::{
    error::Error,
    fmt::{self, Display},
};

use ndarray::ShapeError;

/// The result type used in the entire crate.
pub type Result<T> = std::result::Result<T, OperatorErr>;

/// The crate's error type.
#[derive(Debug)]
pub enum OperatorErr {
    /// Two arrays (or an array and a declared count) disagree on a dimension.
    ShapeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    /// Stacking arrays failed inside ndarray.
    Shape(ShapeError),
    /// A function variable does not name a column of the coordinates.
    VariableOutOfRange { index: usize, dim: usize },
    /// A cached dataset slot was read while empty.
    NotPopulated { slot: &'static str },
    InvalidSpec(String),
    Distribution(String),
    Json(serde_json::Error),
    /// Raised by a function space, residual or condition. Never retried.
    Collaborator(Box<dyn Error + Send + Sync>),
}

impl OperatorErr {
    /// Wraps an error raised by an external collaborator.
    ///
    /// # Arguments
    /// * `err` - The collaborator's own error.
    ///
    /// # Returns
    /// A new `OperatorErr::Collaborator`.
    pub fn collaborator<E>(err: E) -> Self
    where
        E: Into<Box<dyn Error + Send + Sync>>,
    {
        Self::Collaborator(err.into())
    }
}

impl Display for OperatorErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperatorErr::ShapeMismatch {
                what,
                got,
                expected,
            } => write!(f, "shape mismatch for {what}: got {got}, expected {expected}"),
            OperatorErr::Shape(e) => write!(f, "failed to stack arrays: {e}"),
            OperatorErr::VariableOutOfRange { index, dim } => write!(
                f,
                "function variable {index} is out of range for a {dim}-dimensional domain"
            ),
            OperatorErr::NotPopulated { slot } => {
                write!(f, "the {slot} slot is empty, generate it before reading it")
            }
            OperatorErr::InvalidSpec(msg) => write!(f, "invalid spec: {msg}"),
            OperatorErr::Distribution(msg) => write!(f, "invalid distribution: {msg}"),
            OperatorErr::Json(e) => write!(f, "malformed json spec: {e}"),
            OperatorErr::Collaborator(e) => write!(f, "collaborator failed: {e}"),
        }
    }
}

impl Error for OperatorErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            OperatorErr::Shape(e) => Some(e),
            OperatorErr::Json(e) => Some(e),
            OperatorErr::Collaborator(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

impl From<ShapeError> for OperatorErr {
    fn from(value: ShapeError) -> Self {
        Self::Shape(value)
    }
}

impl From<serde_json::Error> for OperatorErr {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<rand_distr::uniform::Error> for OperatorErr {
    fn from(value: rand_distr::uniform::Error) -> Self {
        Self::Distribution(value.to_string())
    }
}
