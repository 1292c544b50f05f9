use ndarray::{ArrayView2, s};

use super::{assembler::InputAssembler, inputs::PairedInputs, layout::ConditionLayout};
use crate::{OperatorErr, Real, Result, function_space::FunctionSpace, problem::Problem};

/// Builds the boundary/initial condition rows of a dataset.
///
/// The problem's condition points are split by `num_bcs`, each slice is paired with
/// every function and the blocks are stacked in condition order. The rows of condition
/// `i` are therefore `ConditionLayout::new(problem.num_bcs(), features.len()).range(i)`.
/// A problem without conditions yields a triple with no rows but the right widths.
///
/// # Arguments
/// * `problem` - The problem owning the conditions.
/// * `assembler` - Pairs functions with points.
/// * `features` - The sampled functions.
/// * `func_vals` - The functions evaluated at the evaluation points.
///
/// # Returns
/// The stacked triple or an error if the condition points don't match `num_bcs`.
pub fn batch_conditions<P, S>(
    problem: &P,
    assembler: &InputAssembler<'_, S>,
    features: &[S::Feature],
    func_vals: ArrayView2<Real>,
) -> Result<PairedInputs>
where
    P: Problem,
    S: FunctionSpace,
{
    if problem.num_bcs().is_empty() {
        return Ok(PairedInputs::empty(func_vals.ncols(), problem.dim()));
    }

    let points = problem.train_points_bc();
    let raw = ConditionLayout::new(problem.num_bcs(), 1);
    if raw.total() != points.nrows() {
        return Err(OperatorErr::ShapeMismatch {
            what: "condition training points",
            got: points.nrows(),
            expected: raw.total(),
        });
    }

    let blocks = raw
        .ranges()
        .map(|range| -> Result<PairedInputs> {
            let block = assembler.assemble(features, func_vals, points.slice(s![range, ..]))?;
            Ok(block.into_inputs())
        })
        .collect::<Result<Vec<_>>>()?;

    PairedInputs::concat(&blocks)
}
