use std::ops::Range;

/// Row layout of a block pairing `num_funcs` functions with `num_points` points.
///
/// Rows are function-major and point-minor: the rows of function `n` are the
/// contiguous range `n * num_points..(n + 1) * num_points`, and inside it the
/// points appear in their original order. The condition ranges computed by
/// `ConditionLayout` and sliced by `PdeOperator::losses` rely on this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockLayout {
    num_funcs: usize,
    num_points: usize,
}

impl BlockLayout {
    /// Creates a new `BlockLayout`.
    ///
    /// # Arguments
    /// * `num_funcs` - The amount of sampled functions.
    /// * `num_points` - The amount of coordinate points each function is paired with.
    ///
    /// # Returns
    /// A new `BlockLayout` instance.
    pub fn new(num_funcs: usize, num_points: usize) -> Self {
        Self {
            num_funcs,
            num_points,
        }
    }

    #[inline]
    pub fn num_funcs(&self) -> usize {
        self.num_funcs
    }

    #[inline]
    pub fn num_points(&self) -> usize {
        self.num_points
    }

    /// The total amount of rows in the block.
    #[inline]
    pub fn len(&self) -> usize {
        self.num_funcs * self.num_points
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the row holding function `func` paired with point `point`.
    #[inline]
    pub fn row(&self, func: usize, point: usize) -> usize {
        debug_assert!(func < self.num_funcs && point < self.num_points);
        func * self.num_points + point
    }

    /// Inverse of `row`: the `(func, point)` pair stored at `row`.
    #[inline]
    pub fn locate(&self, row: usize) -> (usize, usize) {
        debug_assert!(row < self.len());
        (row / self.num_points, row % self.num_points)
    }
}

/// Contiguous row ranges owned by each boundary/initial condition.
///
/// Range `i` spans `counts[i] * scale` rows and starts where range `i - 1`
/// ends, so the ranges partition `0..total()` in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionLayout {
    starts: Vec<usize>,
}

impl ConditionLayout {
    /// Creates a new `ConditionLayout`.
    ///
    /// # Arguments
    /// * `counts` - The raw point count of each condition.
    /// * `scale` - The factor every count is multiplied by (the function batch size).
    ///
    /// # Returns
    /// A new `ConditionLayout` instance.
    pub fn new(counts: &[usize], scale: usize) -> Self {
        let mut starts = Vec::with_capacity(counts.len() + 1);
        starts.push(0);

        let mut acc = 0;
        for count in counts {
            acc += count * scale;
            starts.push(acc);
        }

        Self { starts }
    }

    /// The amount of conditions.
    #[inline]
    pub fn len(&self) -> usize {
        self.starts.len() - 1
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The total amount of rows reserved for all conditions.
    #[inline]
    pub fn total(&self) -> usize {
        self.starts[self.len()]
    }

    /// The rows reserved for condition `i`.
    ///
    /// # Panics
    /// If `i` is not a valid condition index.
    #[inline]
    pub fn range(&self, i: usize) -> Range<usize> {
        self.starts[i]..self.starts[i + 1]
    }

    pub fn ranges(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        self.starts.windows(2).map(|w| w[0]..w[1])
    }

    /// The (scaled) row count of each condition.
    pub fn counts(&self) -> Vec<usize> {
        self.ranges().map(|range| range.len()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_rows_are_function_major() {
        let layout = BlockLayout::new(3, 4);

        assert_eq!(layout.len(), 12);
        assert_eq!(layout.row(0, 3), 3);
        assert_eq!(layout.row(1, 0), 4);
        assert_eq!(layout.row(2, 1), 9);
        assert_eq!(layout.locate(9), (2, 1));

        for row in 0..layout.len() {
            let (func, point) = layout.locate(row);
            assert_eq!(layout.row(func, point), row);
        }
    }

    #[test]
    fn empty_block() {
        let layout = BlockLayout::new(5, 0);
        assert!(layout.is_empty());
    }

    #[test]
    fn condition_ranges_are_scaled_and_contiguous() {
        let layout = ConditionLayout::new(&[3, 2], 4);

        assert_eq!(layout.len(), 2);
        assert_eq!(layout.counts(), [12, 8]);
        assert_eq!(layout.range(0), 0..12);
        assert_eq!(layout.range(1), 12..20);
        assert_eq!(layout.total(), 20);
        assert_eq!(layout.ranges().collect::<Vec<_>>(), [0..12, 12..20]);
    }

    #[test]
    fn no_conditions() {
        let layout = ConditionLayout::new(&[], 7);

        assert!(layout.is_empty());
        assert_eq!(layout.total(), 0);
        assert_eq!(layout.ranges().count(), 0);
    }
}
