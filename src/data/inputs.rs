use ndarray::{Array2, ArrayView2, Axis, concatenate};

use super::layout::BlockLayout;
use crate::{OperatorErr, Real, Result};

/// The `(v, x, vx)` triple fed into a physics-informed operator network.
///
/// * `v` - The branch input, one row of function values at the evaluation points.
/// * `x` - The trunk input, one coordinate point per row.
/// * `vx` - The same function evaluated at that row's point, one scalar per row.
///
/// Row `i` of the three arrays always describes the same function and point.
#[derive(Debug, Clone, PartialEq)]
pub struct PairedInputs {
    v: Array2<Real>,
    x: Array2<Real>,
    vx: Array2<Real>,
}

impl PairedInputs {
    /// Creates a new `PairedInputs`.
    ///
    /// # Arguments
    /// * `v` - The branch input.
    /// * `x` - The trunk input.
    /// * `vx` - The paired values, a single column.
    ///
    /// # Returns
    /// A new `PairedInputs` or an error if the row counts disagree or `vx` is not a column.
    pub fn new(v: Array2<Real>, x: Array2<Real>, vx: Array2<Real>) -> Result<Self> {
        if x.nrows() != v.nrows() {
            return Err(OperatorErr::ShapeMismatch {
                what: "trunk input rows",
                got: x.nrows(),
                expected: v.nrows(),
            });
        }

        if vx.nrows() != v.nrows() {
            return Err(OperatorErr::ShapeMismatch {
                what: "paired value rows",
                got: vx.nrows(),
                expected: v.nrows(),
            });
        }

        if vx.ncols() != 1 {
            return Err(OperatorErr::ShapeMismatch {
                what: "paired value columns",
                got: vx.ncols(),
                expected: 1,
            });
        }

        Ok(Self { v, x, vx })
    }

    /// A triple with no rows that still carries the right column widths.
    ///
    /// # Arguments
    /// * `num_eval_points` - The width of `v`.
    /// * `dim` - The width of `x`.
    pub fn empty(num_eval_points: usize, dim: usize) -> Self {
        Self {
            v: Array2::zeros((0, num_eval_points)),
            x: Array2::zeros((0, dim)),
            vx: Array2::zeros((0, 1)),
        }
    }

    /// Stacks `parts` vertically, keeping their order.
    ///
    /// # Returns
    /// The stacked triple or an error if `parts` is empty or the widths disagree.
    pub fn concat(parts: &[PairedInputs]) -> Result<Self> {
        if parts.is_empty() {
            return Err(OperatorErr::ShapeMismatch {
                what: "stacked blocks",
                got: 0,
                expected: 1,
            });
        }

        let v: Vec<_> = parts.iter().map(|p| p.v.view()).collect();
        let x: Vec<_> = parts.iter().map(|p| p.x.view()).collect();
        let vx: Vec<_> = parts.iter().map(|p| p.vx.view()).collect();

        Ok(Self {
            v: concatenate(Axis(0), &v)?,
            x: concatenate(Axis(0), &x)?,
            vx: concatenate(Axis(0), &vx)?,
        })
    }

    /// Appends every row of `other` after the rows of `self`.
    pub fn extend(&mut self, other: &PairedInputs) -> Result<()> {
        self.v.append(Axis(0), other.v.view())?;
        self.x.append(Axis(0), other.x.view())?;
        self.vx.append(Axis(0), other.vx.view())?;
        Ok(())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.v.nrows()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn v(&self) -> ArrayView2<'_, Real> {
        self.v.view()
    }

    #[inline]
    pub fn x(&self) -> ArrayView2<'_, Real> {
        self.x.view()
    }

    #[inline]
    pub fn vx(&self) -> ArrayView2<'_, Real> {
        self.vx.view()
    }
}

/// A `PairedInputs` triple produced from a single function batch and point set,
/// together with the layout its rows follow.
#[derive(Debug, Clone, PartialEq)]
pub struct PairedBlock {
    layout: BlockLayout,
    inputs: PairedInputs,
}

impl PairedBlock {
    pub(crate) fn new(layout: BlockLayout, inputs: PairedInputs) -> Self {
        debug_assert_eq!(layout.len(), inputs.len());
        Self { layout, inputs }
    }

    #[inline]
    pub fn layout(&self) -> BlockLayout {
        self.layout
    }

    #[inline]
    pub fn inputs(&self) -> &PairedInputs {
        &self.inputs
    }

    /// The `(func, point)` pair stored at `row`.
    #[inline]
    pub fn locate(&self, row: usize) -> (usize, usize) {
        self.layout.locate(row)
    }

    pub fn into_inputs(self) -> PairedInputs {
        self.inputs
    }
}

/// Borrowed view of a cached dataset.
///
/// Labels are never produced: the loss is driven by residuals and condition
/// errors only, so `y` is always `None`.
#[derive(Debug, Clone, Copy)]
pub struct DataRef<'a> {
    pub x: &'a PairedInputs,
    pub y: Option<ArrayView2<'a, Real>>,
}

impl<'a> DataRef<'a> {
    pub(crate) fn unlabeled(x: &'a PairedInputs) -> Self {
        Self { x, y: None }
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    fn triple(rows: usize, offset: Real) -> PairedInputs {
        PairedInputs::new(
            Array2::from_elem((rows, 3), offset),
            Array2::from_elem((rows, 2), offset + 1.),
            Array2::from_elem((rows, 1), offset + 2.),
        )
        .unwrap()
    }

    #[test]
    fn rejects_misaligned_rows() {
        let res = PairedInputs::new(
            Array2::zeros((4, 3)),
            Array2::zeros((3, 2)),
            Array2::zeros((4, 1)),
        );

        assert!(matches!(
            res,
            Err(OperatorErr::ShapeMismatch {
                what: "trunk input rows",
                got: 3,
                expected: 4
            })
        ));
    }

    #[test]
    fn rejects_wide_paired_values() {
        let res = PairedInputs::new(
            Array2::zeros((2, 3)),
            Array2::zeros((2, 2)),
            Array2::zeros((2, 2)),
        );

        assert!(matches!(res, Err(OperatorErr::ShapeMismatch { got: 2, .. })));
    }

    #[test]
    fn empty_keeps_widths() {
        let empty = PairedInputs::empty(10, 2);

        assert!(empty.is_empty());
        assert_eq!(empty.v().dim(), (0, 10));
        assert_eq!(empty.x().dim(), (0, 2));
        assert_eq!(empty.vx().dim(), (0, 1));
    }

    #[test]
    fn concat_keeps_order() {
        let stacked = PairedInputs::concat(&[triple(2, 0.), triple(1, 10.)]).unwrap();

        assert_eq!(stacked.len(), 3);
        assert_eq!(stacked.v().column(0).to_vec(), [0., 0., 10.]);
        assert_eq!(stacked.x().column(1).to_vec(), [1., 1., 11.]);
        assert_eq!(stacked.vx().column(0).to_vec(), [2., 2., 12.]);
    }

    #[test]
    fn concat_nothing_fails() {
        assert!(PairedInputs::concat(&[]).is_err());
    }

    #[test]
    fn extend_appends_after_existing_rows() {
        let mut head = PairedInputs::new(
            array![[1., 2.]],
            array![[0.5]],
            array![[3.]],
        )
        .unwrap();
        let tail = PairedInputs::new(array![[4., 5.]], array![[0.25]], array![[6.]]).unwrap();

        head.extend(&tail).unwrap();

        assert_eq!(head.v(), array![[1., 2.], [4., 5.]]);
        assert_eq!(head.x(), array![[0.5], [0.25]]);
        assert_eq!(head.vx(), array![[3.], [6.]]);
    }

    #[test]
    fn extend_rejects_other_widths() {
        let mut head = triple(1, 0.);
        let other = PairedInputs::new(
            Array2::zeros((1, 4)),
            Array2::zeros((1, 2)),
            Array2::zeros((1, 1)),
        )
        .unwrap();

        assert!(matches!(head.extend(&other), Err(OperatorErr::Shape(_))));
    }
}
