use log::{debug, info};
use ndarray::{Array2, ArrayView2, s};
use rand::Rng;

use super::{
    assembler::InputAssembler,
    bc::batch_conditions,
    inputs::{DataRef, PairedInputs},
    layout::ConditionLayout,
};
use crate::{
    OperatorErr, OperatorSpec, Real, Result, function_space::FunctionSpace, loss::LossFn,
    model::OperatorModel, problem::Problem,
};

/// Training and testing data for learning the solution operator of a problem.
///
/// The training set `train_x` holds, in this order:
/// 1. the condition rows (`train_x_bc`): for each condition, every training function
///    paired with each of the condition's points,
/// 2. when the problem has an equation, every training function paired with each
///    interior training point.
///
/// The testing set reuses the training condition rows and appends the interior rows of
/// freshly sampled testing functions over the interior testing points. Without a
/// testing size it is a copy of the training set.
///
/// Each dataset is generated once and kept until the owner invalidates it.
pub struct PdeOperator<P, S, R>
where
    P: Problem,
    S: FunctionSpace,
    R: Rng,
{
    problem: P,
    func_space: S,
    eval_pts: Array2<Real>,
    num_func: usize,
    func_vars: Vec<usize>,
    num_test: Option<usize>,
    num_bcs: ConditionLayout,
    rng: R,

    train_x_bc: Option<PairedInputs>,
    train_x: Option<PairedInputs>,
    test_x: Option<PairedInputs>,
}

impl<P, S, R> PdeOperator<P, S, R>
where
    P: Problem,
    S: FunctionSpace,
    R: Rng,
{
    /// Creates a new `PdeOperator` and generates its training and testing sets.
    ///
    /// # Arguments
    /// * `problem` - The problem whose solution operator is learnt.
    /// * `func_space` - The space input functions are sampled from.
    /// * `eval_pts` - The points every function is discretized at for the branch input.
    /// * `spec` - The dataset sizes and the function variables.
    /// * `rng` - A random number generator.
    ///
    /// # Returns
    /// A new `PdeOperator` or an error if the spec doesn't fit the problem or any
    /// collaborator fails.
    pub fn new(
        problem: P,
        func_space: S,
        eval_pts: Array2<Real>,
        spec: &OperatorSpec,
        rng: R,
    ) -> Result<Self> {
        let dim = problem.dim();
        let func_vars = match &spec.function_variables {
            Some(vars) => vars.clone(),
            None => (0..dim).collect(),
        };

        if let Some(&index) = func_vars.iter().find(|&&i| i >= dim) {
            return Err(OperatorErr::VariableOutOfRange { index, dim });
        }

        if problem.conditions().len() != problem.num_bcs().len() {
            return Err(OperatorErr::ShapeMismatch {
                what: "condition point counts",
                got: problem.num_bcs().len(),
                expected: problem.conditions().len(),
            });
        }

        let num_func = spec.num_function.get();
        let num_bcs = ConditionLayout::new(problem.num_bcs(), num_func);

        let mut operator = Self {
            problem,
            func_space,
            eval_pts,
            num_func,
            func_vars,
            num_test: spec.num_test.map(|n| n.get()),
            num_bcs,
            rng,
            train_x_bc: None,
            train_x: None,
            test_x: None,
        };

        operator.train_next_batch(None)?;
        operator.test()?;

        Ok(operator)
    }

    #[inline]
    pub fn problem(&self) -> &P {
        &self.problem
    }

    #[inline]
    pub fn func_space(&self) -> &S {
        &self.func_space
    }

    #[inline]
    pub fn eval_pts(&self) -> ArrayView2<'_, Real> {
        self.eval_pts.view()
    }

    #[inline]
    pub fn func_vars(&self) -> &[usize] {
        &self.func_vars
    }

    /// The row count of each condition inside the datasets, that is, the problem's
    /// own point counts multiplied by the amount of training functions.
    pub fn num_bcs(&self) -> Vec<usize> {
        self.num_bcs.counts()
    }

    /// The rows each condition owns in the leading part of the datasets.
    #[inline]
    pub fn condition_layout(&self) -> &ConditionLayout {
        &self.num_bcs
    }

    #[inline]
    pub fn train_x_bc(&self) -> Option<&PairedInputs> {
        self.train_x_bc.as_ref()
    }

    #[inline]
    pub fn train_x(&self) -> Option<&PairedInputs> {
        self.train_x.as_ref()
    }

    #[inline]
    pub fn test_x(&self) -> Option<&PairedInputs> {
        self.test_x.as_ref()
    }

    /// Returns the training set, generating it only if it's not cached.
    ///
    /// # Arguments
    /// * `batch_size` - Ignored. The whole function batch is always generated at once,
    ///   the argument exists so callers written for mini-batched data keep working.
    ///
    /// # Returns
    /// The training set or an error if generating it failed.
    pub fn train_next_batch(&mut self, batch_size: Option<usize>) -> Result<DataRef<'_>> {
        if let Some(batch_size) = batch_size {
            debug!(batch_size = batch_size; "batch size ignored, the whole function batch is used");
        }

        let train_x = match self.train_x.take() {
            Some(cached) => {
                debug!("reusing cached training set");
                cached
            }
            None => self.generate_train()?,
        };

        Ok(DataRef::unlabeled(self.train_x.insert(train_x)))
    }

    /// Returns the testing set, generating it only if it's not cached.
    ///
    /// # Returns
    /// The testing set or an error if generating it failed.
    pub fn test(&mut self) -> Result<DataRef<'_>> {
        let test_x = match self.test_x.take() {
            Some(cached) => {
                debug!("reusing cached testing set");
                cached
            }
            None => self.generate_test()?,
        };

        Ok(DataRef::unlabeled(self.test_x.insert(test_x)))
    }

    /// Drops the cached training set (and its condition rows), the next
    /// `train_next_batch` call samples new functions.
    pub fn invalidate_train(&mut self) {
        self.train_x_bc = None;
        self.train_x = None;
    }

    /// Drops the cached testing set, the next `test` call regenerates it.
    pub fn invalidate_test(&mut self) {
        self.test_x = None;
    }

    pub fn invalidate(&mut self) {
        self.invalidate_train();
        self.invalidate_test();
    }

    /// Computes the loss terms for a batch of model outputs.
    ///
    /// The outputs must follow the row order of the datasets: condition rows first,
    /// interior rows last. The terms come out in this order:
    /// 1. one per equation component, over the interior rows only,
    /// 2. one per condition, in declaration order, over that condition's rows.
    ///
    /// Every term compares the error against zero with `loss_fn`.
    ///
    /// # Arguments
    /// * `targets` - Unused, the datasets carry no labels.
    /// * `outputs` - The model outputs.
    /// * `loss_fn` - Reduces each error to a scalar.
    /// * `model` - The inputs the model was fed.
    ///
    /// # Returns
    /// The loss terms or an error if the training set is missing, the shapes disagree or
    /// the equation or a condition fails.
    pub fn losses<L, M>(
        &self,
        targets: Option<ArrayView2<Real>>,
        outputs: ArrayView2<Real>,
        loss_fn: &L,
        model: &M,
    ) -> Result<Vec<Real>>
    where
        L: LossFn,
        M: OperatorModel,
    {
        if targets.is_some() {
            debug!("targets ignored, losses are driven by residuals and condition errors");
        }

        // The condition rows are shared by training and testing.
        let train_x = self
            .train_x
            .as_ref()
            .ok_or(OperatorErr::NotPopulated { slot: "train_x" })?;
        let bcs_end = self.num_bcs.total();

        let mut losses = Vec::with_capacity(self.num_bcs.len() + 1);

        if let Some(residual) = self.problem.residual() {
            let f = residual.residual(model.trunk_input(), outputs, model.aux_input())?;

            for fi in &f {
                if fi.nrows() < bcs_end {
                    return Err(OperatorErr::ShapeMismatch {
                        what: "residual rows",
                        got: fi.nrows(),
                        expected: bcs_end,
                    });
                }

                let error = fi.slice(s![bcs_end.., ..]);
                let zeros = Array2::zeros(error.raw_dim());
                losses.push(loss_fn.loss(error, zeros.view()));
            }
        }

        for (condition, rows) in self.problem.conditions().iter().zip(self.num_bcs.ranges()) {
            let error = condition.error(
                train_x.x(),
                model.trunk_input(),
                outputs,
                rows,
                train_x.vx(),
            )?;
            let zeros = Array2::zeros(error.raw_dim());
            losses.push(loss_fn.loss(error.view(), zeros.view()));
        }

        Ok(losses)
    }

    fn generate_train(&mut self) -> Result<PairedInputs> {
        let (features, func_vals) = self.sample_functions(self.num_func)?;
        let assembler = InputAssembler::new(&self.func_space, &self.func_vars);

        let bc = batch_conditions(&self.problem, &assembler, &features, func_vals.view())?;
        let mut train_x = bc.clone();

        if self.problem.residual().is_some() {
            let interior = assembler.assemble(
                &features,
                func_vals.view(),
                self.problem.train_points_interior(),
            )?;
            train_x.extend(interior.inputs())?;
        }

        // Only cache the condition rows once the whole batch exists.
        self.train_x_bc = Some(bc);

        info!(
            funcs = self.num_func,
            bc_rows = self.num_bcs.total(),
            rows = train_x.len();
            "generated training set"
        );

        Ok(train_x)
    }

    fn generate_test(&mut self) -> Result<PairedInputs> {
        let Some(num_test) = self.num_test else {
            return Ok(self.train_next_batch(None)?.x.clone());
        };

        if self.train_x_bc.is_none() || self.train_x.is_none() {
            self.train_next_batch(None)?;
        }

        let (features, func_vals) = self.sample_functions(num_test)?;

        // TODO: sample testing condition rows from the testing functions instead of
        // reusing the training ones.
        let mut test_x = self
            .train_x_bc
            .clone()
            .ok_or(OperatorErr::NotPopulated { slot: "train_x_bc" })?;

        if self.problem.residual().is_some() {
            let offset: usize = self.problem.num_bcs().iter().sum();
            let points = self.problem.test_points();
            if points.nrows() < offset {
                return Err(OperatorErr::ShapeMismatch {
                    what: "testing points",
                    got: points.nrows(),
                    expected: offset,
                });
            }

            let assembler = InputAssembler::new(&self.func_space, &self.func_vars);
            let interior =
                assembler.assemble(&features, func_vals.view(), points.slice(s![offset.., ..]))?;
            test_x.extend(interior.inputs())?;
        }

        info!(funcs = num_test, rows = test_x.len(); "generated testing set");

        Ok(test_x)
    }

    fn sample_functions(&mut self, n: usize) -> Result<(Vec<S::Feature>, Array2<Real>)> {
        let features = self.func_space.random(n, &mut self.rng)?;
        if features.len() != n {
            return Err(OperatorErr::ShapeMismatch {
                what: "sampled functions",
                got: features.len(),
                expected: n,
            });
        }

        let func_vals = self.func_space.eval_batch(&features, self.eval_pts.view())?;
        if func_vals.dim() != (n, self.eval_pts.nrows()) {
            return Err(OperatorErr::ShapeMismatch {
                what: "function values at the evaluation points",
                got: func_vals.len(),
                expected: n * self.eval_pts.nrows(),
            });
        }

        Ok((features, func_vals))
    }
}
