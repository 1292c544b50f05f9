mod collocation;
mod condition;
mod dirichlet;
mod problem;

pub use collocation::{CollocationProblem, FnResidual};
pub use condition::Condition;
pub use dirichlet::DirichletCondition;
pub use problem::{Problem, Residual};
