//! Non-owning matrix views.
//!
//! A view is a rectangular window into a [`Storage`] buffer: a storage
//! reference plus a row/column offset and its own extents. Views compose —
//! the block of a view is another view into the same buffer — and never copy
//! coefficients. [`MatRef`] is the read-only flavor and the leaf type of the
//! expression layer; [`MatMut`] additionally writes through to the
//! underlying buffer.

use crate::{Scalar, Storage, Xpr};

/// A read-only view of (part of) a matrix.
pub struct MatRef<'a, T> {
    storage: &'a Storage<T>,
    row0: usize,
    col0: usize,
    rows: usize,
    cols: usize,
}

impl<'a, T> Clone for MatRef<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<'a, T> Copy for MatRef<'a, T> {}

impl<'a, T: Scalar> MatRef<'a, T> {
    pub(crate) fn whole(storage: &'a Storage<T>) -> Self {
        Self {
            storage,
            row0: 0,
            col0: 0,
            rows: storage.rows(),
            cols: storage.cols(),
        }
    }

    /// The number of rows of the view.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// The number of columns of the view.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Reads the coefficient at `(row, col)`, relative to the view.
    #[inline]
    pub fn read(&self, row: usize, col: usize) -> T {
        assert!(
            row < self.rows && col < self.cols,
            "index ({row}, {col}) out of range for {}x{} view",
            self.rows,
            self.cols
        );
        self.storage.read(self.row0 + row, self.col0 + col)
    }

    /// A sub-view spanning rows `start_row..=end_row` and columns
    /// `start_col..=end_col` (end indices inclusive).
    ///
    /// # Panics
    ///
    /// Panics if a range is inverted or exceeds the view's extents.
    pub fn block(self, start_row: usize, end_row: usize, start_col: usize, end_col: usize) -> Self {
        check_block(self.rows, self.cols, start_row, end_row, start_col, end_col);
        Self {
            storage: self.storage,
            row0: self.row0 + start_row,
            col0: self.col0 + start_col,
            rows: end_row - start_row + 1,
            cols: end_col - start_col + 1,
        }
    }

    /// The `1 x cols` view of row `i`.
    pub fn row(self, i: usize) -> Self {
        assert!(i < self.rows, "row {i} out of range for {} rows", self.rows);
        self.block(i, i, 0, self.cols - 1)
    }

    /// The `rows x 1` view of column `j`.
    pub fn col(self, j: usize) -> Self {
        assert!(j < self.cols, "column {j} out of range for {} columns", self.cols);
        self.block(0, self.rows - 1, j, j)
    }

    /// Lifts the view into the expression layer.
    pub fn xpr(self) -> Xpr<'a, T> {
        Xpr::leaf(self)
    }
}

/// A mutable view of (part of) a matrix.
///
/// All writes go through to the buffer owned by the viewed matrix. The
/// typical use is carving a window with [`MatMut::block_mut`] (or
/// [`MatMut::row_mut`] / [`MatMut::col_mut`]) and then storing an expression
/// into it with [`MatMut::assign`].
pub struct MatMut<'a, T> {
    storage: &'a mut Storage<T>,
    row0: usize,
    col0: usize,
    rows: usize,
    cols: usize,
}

impl<'a, T: Scalar> MatMut<'a, T> {
    pub(crate) fn whole(storage: &'a mut Storage<T>) -> Self {
        let (rows, cols) = (storage.rows(), storage.cols());
        Self {
            storage,
            row0: 0,
            col0: 0,
            rows,
            cols,
        }
    }

    /// The number of rows of the view.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// The number of columns of the view.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Reads the coefficient at `(row, col)`, relative to the view.
    #[inline]
    pub fn read(&self, row: usize, col: usize) -> T {
        self.rb().read(row, col)
    }

    /// Returns a mutable reference to the coefficient at `(row, col)`.
    #[inline]
    pub fn write(&mut self, row: usize, col: usize) -> &mut T {
        assert!(
            row < self.rows && col < self.cols,
            "index ({row}, {col}) out of range for {}x{} view",
            self.rows,
            self.cols
        );
        self.storage.write(self.row0 + row, self.col0 + col)
    }

    /// Reborrows the view as read-only.
    pub fn rb(&self) -> MatRef<'_, T> {
        MatRef {
            storage: self.storage,
            row0: self.row0,
            col0: self.col0,
            rows: self.rows,
            cols: self.cols,
        }
    }

    /// A mutable sub-view spanning rows `start_row..=end_row` and columns
    /// `start_col..=end_col` (end indices inclusive).
    ///
    /// # Panics
    ///
    /// Panics if a range is inverted or exceeds the view's extents.
    pub fn block_mut(
        self,
        start_row: usize,
        end_row: usize,
        start_col: usize,
        end_col: usize,
    ) -> Self {
        check_block(self.rows, self.cols, start_row, end_row, start_col, end_col);
        Self {
            storage: self.storage,
            row0: self.row0 + start_row,
            col0: self.col0 + start_col,
            rows: end_row - start_row + 1,
            cols: end_col - start_col + 1,
        }
    }

    /// The mutable `1 x cols` view of row `i`.
    pub fn row_mut(self, i: usize) -> Self {
        assert!(i < self.rows, "row {i} out of range for {} rows", self.rows);
        let cols = self.cols;
        self.block_mut(i, i, 0, cols - 1)
    }

    /// The mutable `rows x 1` view of column `j`.
    pub fn col_mut(self, j: usize) -> Self {
        assert!(j < self.cols, "column {j} out of range for {} columns", self.cols);
        let rows = self.rows;
        self.block_mut(0, rows - 1, j, j)
    }

    /// Stores `src` into the view, element by element in row-major order.
    ///
    /// The source expression is read lazily while the destination is
    /// written, which gives no aliasing guarantee in principle; see
    /// [`Mat::assign`][crate::Mat::assign] for the aliasing contract.
    ///
    /// # Panics
    ///
    /// Panics if the extents of `src` differ from the view's.
    pub fn assign(&mut self, src: &Xpr<'_, T>) {
        assert!(
            src.rows() == self.rows && src.cols() == self.cols,
            "cannot assign a {}x{} expression to a {}x{} view",
            src.rows(),
            src.cols(),
            self.rows,
            self.cols
        );
        for i in 0..self.rows {
            for j in 0..self.cols {
                *self.write(i, j) = src.at(i, j);
            }
        }
    }

    /// Fills the view from a flat row-major coefficient list.
    ///
    /// # Panics
    ///
    /// Panics unless `coeffs.len()` equals the view's element count exactly.
    pub fn fill(&mut self, coeffs: &[T]) {
        assert!(
            coeffs.len() == self.rows * self.cols,
            "expected exactly {} coefficients for a {}x{} view, got {}",
            self.rows * self.cols,
            self.rows,
            self.cols,
            coeffs.len()
        );
        for i in 0..self.rows {
            for j in 0..self.cols {
                *self.write(i, j) = coeffs[i * self.cols + j];
            }
        }
    }
}

fn check_block(
    rows: usize,
    cols: usize,
    start_row: usize,
    end_row: usize,
    start_col: usize,
    end_col: usize,
) {
    assert!(
        start_row <= end_row && end_row < rows && start_col <= end_col && end_col < cols,
        "block ({start_row}..={end_row}, {start_col}..={end_col}) out of range for {rows}x{cols}"
    );
}

#[cfg(test)]
mod tests {
    use crate::{Extent, Mat};

    #[test]
    fn block_write_through() {
        let mut m = Mat::<i32>::zeros(Extent::Fixed(4), Extent::Fixed(4));
        let mut block = m.as_mut().block_mut(1, 2, 1, 2);
        block.fill(&[1, 2, 3, 4]);

        assert_eq!(m[(1, 1)], 1);
        assert_eq!(m[(1, 2)], 2);
        assert_eq!(m[(2, 1)], 3);
        assert_eq!(m[(2, 2)], 4);
        assert_eq!(m[(0, 0)], 0);
        assert_eq!(m[(3, 3)], 0);
    }

    #[test]
    fn views_compose() {
        let mut m = Mat::<i32>::from_coeffs(
            Extent::Fixed(3),
            Extent::Fixed(3),
            &[1, 2, 3, 4, 5, 6, 7, 8, 9],
        );

        let inner = m.as_ref().block(1, 2, 0, 2).block(0, 0, 1, 2);
        assert_eq!(inner.rows(), 1);
        assert_eq!(inner.cols(), 2);
        assert_eq!(inner.read(0, 0), 5);
        assert_eq!(inner.read(0, 1), 6);

        *m.as_mut().block_mut(0, 1, 0, 1).row_mut(1).write(0, 1) = 50;
        assert_eq!(m[(1, 1)], 50);
    }

    #[test]
    fn row_and_col_views() {
        let m = Mat::<i32>::from_coeffs(Extent::Fixed(2), Extent::Fixed(3), &[1, 2, 3, 4, 5, 6]);
        let r = m.as_ref().row(1);
        assert_eq!((r.rows(), r.cols()), (1, 3));
        assert_eq!(r.read(0, 2), 6);

        let c = m.as_ref().col(0);
        assert_eq!((c.rows(), c.cols()), (2, 1));
        assert_eq!(c.read(1, 0), 4);
    }

    #[test]
    #[should_panic(expected = "cannot assign a 2x2 expression to a 2x3 view")]
    fn assign_extent_mismatch_panics() {
        let src = Mat::<i32>::from_coeffs(Extent::Fixed(2), Extent::Fixed(2), &[1, 2, 3, 4]);
        let mut dest = Mat::<i32>::zeros(Extent::Fixed(3), Extent::Fixed(3));
        dest.as_mut().block_mut(0, 1, 0, 2).assign(&src.xpr());
    }

    #[test]
    #[should_panic(expected = "block (1..=0, 0..=0) out of range")]
    fn inverted_block_panics() {
        let m = Mat::<f32>::zeros(Extent::Fixed(2), Extent::Fixed(2));
        m.as_ref().block(1, 0, 0, 0);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn oversized_block_panics() {
        let m = Mat::<f32>::zeros(Extent::Fixed(2), Extent::Fixed(2));
        m.as_ref().block(0, 1, 0, 2);
    }
}
