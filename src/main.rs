use std::{env, fs, num::NonZeroUsize, process};

use log::info;
use ndarray::{Array2, ArrayView2};
use pde_operator::{
    FunctionSpaceSpec, LossSpec, OperatorSpec, PdeOperator, Real, Result,
    function_space::Basis,
    problem::{CollocationProblem, DirichletCondition},
};
use rand::{SeedableRng, rngs::StdRng};

const NUM_FUNCTION: NonZeroUsize = NonZeroUsize::new(10).unwrap();
const NUM_TEST: NonZeroUsize = NonZeroUsize::new(5).unwrap();
const NUM_EVAL_POINTS: usize = 20;
const NUM_INTERIOR: usize = 30;
const NUM_TEST_INTERIOR: usize = 50;

// Antiderivative operator on [0, 1]: u(0) = 0. Without autodiff the residual here
// only checks the outputs against v(x), which is enough to exercise the layout.
fn problem() -> Result<CollocationProblem> {
    let grid = |n: usize| Array2::from_shape_fn((n, 1), |(i, _)| (i as Real + 0.5) / n as Real);

    CollocationProblem::new(1, grid(NUM_INTERIOR), grid(NUM_TEST_INTERIOR))?
        .with_residual(|_, outputs, aux| Ok(vec![&outputs - &aux]))
        .with_condition(Array2::zeros((1, 1)), DirichletCondition::new(0, zero))
}

fn zero(x: ArrayView2<Real>, _: ArrayView2<Real>) -> Array2<Real> {
    Array2::zeros((x.nrows(), 1))
}

fn run(spec: OperatorSpec) -> Result<()> {
    let space = FunctionSpaceSpec {
        basis: Basis::Chebyshev,
        n: 5,
        m: 1.,
    }
    .build()?;
    let eval_pts = Array2::from_shape_fn((NUM_EVAL_POINTS, 1), |(i, _)| {
        i as Real / (NUM_EVAL_POINTS - 1) as Real
    });

    let mut op = PdeOperator::new(problem()?, space, eval_pts, &spec, StdRng::seed_from_u64(0))?;
    info!("condition rows: {:?}", op.num_bcs());

    let train = op.train_next_batch(None)?.x.clone();
    let test = op.test()?.x.clone();
    info!(
        "train: v {:?}, x {:?}, vx {:?}",
        train.v().dim(),
        train.x().dim(),
        train.vx().dim()
    );
    info!("test: {} rows", test.len());

    let outputs = Array2::zeros((train.len(), 1));
    let losses = op.losses(None, outputs.view(), &LossSpec::Mse, &train)?;
    info!("losses of a zero model: {losses:?}");

    Ok(())
}

fn main() {
    env_logger::init();

    let spec = match env::args().nth(1) {
        Some(path) => match fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| OperatorSpec::from_json(&json).map_err(|e| e.to_string()))
        {
            Ok(spec) => spec,
            Err(e) => {
                eprintln!("failed to read spec from {path}: {e}");
                process::exit(1);
            }
        },
        None => OperatorSpec::new(NUM_FUNCTION).with_num_test(NUM_TEST),
    };

    if let Err(e) = run(spec) {
        eprintln!("{e}");
        process::exit(1);
    }
}
