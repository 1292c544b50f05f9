use std::{cell::RefCell, num::NonZeroUsize, ops::Range, rc::Rc};

use ndarray::{Array2, ArrayView2, array, s};
use pde_operator::{
    OperatorSpec, PdeOperator, Real, Result,
    function_space::PolynomialSpace,
    loss::Mse,
    problem::{CollocationProblem, Condition, DirichletCondition},
};
use rand::{SeedableRng, rngs::StdRng};

/// Records the rows it is asked about and reports no error.
struct Recorder(Rc<RefCell<Vec<Range<usize>>>>);

impl Condition for Recorder {
    fn error(
        &self,
        _x_full: ArrayView2<Real>,
        _inputs: ArrayView2<Real>,
        _outputs: ArrayView2<Real>,
        rows: Range<usize>,
        _aux: ArrayView2<Real>,
    ) -> Result<Array2<Real>> {
        let len = rows.len();
        self.0.borrow_mut().push(rows);
        Ok(Array2::zeros((len, 1)))
    }
}

fn eval_pts() -> Array2<Real> {
    Array2::from_shape_fn((10, 1), |(i, _)| i as Real / 9.)
}

fn interior() -> Array2<Real> {
    array![[0.1], [0.3], [0.5], [0.7], [0.9]]
}

#[test]
fn two_conditions_four_functions() {
    let rows = Rc::new(RefCell::new(Vec::new()));
    let problem = CollocationProblem::new(1, interior(), array![[0.2], [0.4]])
        .unwrap()
        .with_residual(|_, outputs, aux| Ok(vec![&outputs - &aux]))
        .with_condition(array![[0.], [0.], [0.]], Recorder(rows.clone()))
        .unwrap()
        .with_condition(array![[1.], [1.]], Recorder(rows.clone()))
        .unwrap();
    let space = PolynomialSpace::power_series(3, 1.).unwrap();
    let spec = OperatorSpec::new(NonZeroUsize::new(4).unwrap());

    let op = PdeOperator::new(problem, space, eval_pts(), &spec, StdRng::seed_from_u64(5)).unwrap();

    assert_eq!(op.num_bcs(), [12, 8]);
    assert_eq!(op.train_x_bc().unwrap().len(), 20);

    let train = op.train_x().unwrap();
    assert_eq!(train.len(), 20 + 4 * 5);
    assert_eq!(train.v().ncols(), 10);
    assert_eq!(train.x().ncols(), 1);
    assert_eq!(train.vx().ncols(), 1);

    let outputs = Array2::<Real>::zeros((train.len(), 1));
    let losses = op.losses(None, outputs.view(), &Mse, train).unwrap();

    assert_eq!(losses.len(), 3);
    assert_eq!(*rows.borrow(), [0..12, 12..20]);
    assert_eq!(op.condition_layout().range(1), 12..20);
}

#[test]
fn paired_values_match_the_branch_input() {
    // condition points sit on the first and the last evaluation points, so v(x) can be
    // read back from the branch input of the same row
    fn zero(x: ArrayView2<Real>, _: ArrayView2<Real>) -> Array2<Real> {
        Array2::zeros((x.nrows(), 1))
    }

    let problem = CollocationProblem::new(1, interior(), Array2::zeros((0, 1)))
        .unwrap()
        .with_condition(array![[0.]], DirichletCondition::new(0, zero))
        .unwrap()
        .with_condition(array![[1.]], DirichletCondition::new(0, zero))
        .unwrap();
    let space = PolynomialSpace::chebyshev(4, 2.).unwrap();
    let spec = OperatorSpec::new(NonZeroUsize::new(6).unwrap());

    let op = PdeOperator::new(problem, space, eval_pts(), &spec, StdRng::seed_from_u64(9)).unwrap();
    let bc = op.train_x_bc().unwrap();
    let layout = op.condition_layout();

    for row in layout.range(0) {
        assert!((bc.vx()[[row, 0]] - bc.v()[[row, 0]]).abs() < 1e-5);
    }
    for row in layout.range(1) {
        assert!((bc.vx()[[row, 0]] - bc.v()[[row, 9]]).abs() < 1e-5);
    }

    // one row per function and condition, function-major inside each condition
    assert_eq!(bc.len(), 12);
    assert_eq!(bc.v().slice(s![0..6, ..]), bc.v().slice(s![6..12, ..]));
}

#[test]
fn seeded_generation_is_reproducible() {
    let build = || {
        let problem = CollocationProblem::new(1, interior(), array![[0.25]])
            .unwrap()
            .with_residual(|_, outputs, _| Ok(vec![outputs.to_owned()]));
        let space = PolynomialSpace::power_series(5, 1.).unwrap();
        let spec = OperatorSpec::new(NonZeroUsize::new(3).unwrap())
            .with_num_test(NonZeroUsize::new(2).unwrap());

        PdeOperator::new(problem, space, eval_pts(), &spec, StdRng::seed_from_u64(21)).unwrap()
    };

    let a = build();
    let b = build();

    assert_eq!(a.train_x(), b.train_x());
    assert_eq!(a.test_x(), b.test_x());
    assert_eq!(a.test_x().unwrap().len(), 2);
}

#[test]
fn spec_from_json() {
    let spec = OperatorSpec::from_json(r#"{ "num_function": 2, "num_test": 1 }"#).unwrap();
    let problem = CollocationProblem::new(1, interior(), array![[0.5], [0.6], [0.7]])
        .unwrap()
        .with_residual(|_, outputs, _| Ok(vec![outputs.to_owned()]));
    let space = PolynomialSpace::power_series(2, 1.).unwrap();

    let op = PdeOperator::new(problem, space, eval_pts(), &spec, StdRng::seed_from_u64(0)).unwrap();

    assert_eq!(op.train_x().unwrap().len(), 2 * 5);
    assert_eq!(op.test_x().unwrap().len(), 3);
}
