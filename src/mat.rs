//! The owning matrix type with runtime extents.

use std::fmt;
use std::ops::{AddAssign, DivAssign, Index, IndexMut, MulAssign, SubAssign};

use crate::approx::ApproxEq;
use crate::{Extent, MatMut, MatRef, Matrix, Scalar, Storage, Xpr};

/// A matrix that owns its coefficients.
///
/// Each axis carries an [`Extent`] that is either `Fixed` (pinned at
/// construction, resizing it is a programmer error) or `Dyn` (freely
/// resizable). A `Mat` with two `Fixed` extents behaves like a
/// statically-sized matrix; one with two `Dyn` extents like a fully dynamic
/// one; mixed forms pin one axis only.
///
/// Arithmetic on `Mat` goes through the expression layer: operators on
/// `&Mat` build an [`Xpr`] that is evaluated on assignment. Since an
/// expression borrows its operands, the borrow checker rules out storing an
/// expression into a matrix it reads from; when a computation needs its own
/// input (like squaring a matrix in place), evaluate into a temporary first:
///
/// ```
/// # use matxpr::*;
/// let mut m = Mat::from_coeffs(Extent::Fixed(2), Extent::Fixed(2), &[1.0, 2.0, 3.0, 4.0]);
/// m = (&m * &m).eval();
/// ```
#[derive(Clone)]
pub struct Mat<T> {
    storage: Storage<T>,
}

impl<T: Scalar> Mat<T> {
    /// Creates a zero-filled matrix with the given extents.
    ///
    /// # Panics
    ///
    /// Panics if either extent is zero.
    pub fn zeros(rows: Extent, cols: Extent) -> Self {
        Self {
            storage: Storage::new(rows, cols),
        }
    }

    /// Creates a matrix from a flat row-major coefficient list.
    ///
    /// # Panics
    ///
    /// Panics unless `coeffs.len()` equals the element count exactly.
    pub fn from_coeffs(rows: Extent, cols: Extent, coeffs: &[T]) -> Self {
        let mut mat = Self::zeros(rows, cols);
        mat.fill(coeffs);
        mat
    }

    /// Creates a matrix with every coefficient drawn from `rng`.
    ///
    /// Coefficients are uniform in [-10, 10]; see [`Scalar::random`].
    pub fn random(rows: Extent, cols: Extent, rng: &mut fastrand::Rng) -> Self {
        let mut mat = Self::zeros(rows, cols);
        for i in 0..mat.rows() {
            for j in 0..mat.cols() {
                *mat.storage.write(i, j) = T::random(rng);
            }
        }
        mat
    }

    /// The current number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.storage.rows()
    }

    /// The current number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.storage.cols()
    }

    /// The coefficients in row-major order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.storage.as_slice()
    }

    /// Changes the dimensions of the matrix.
    ///
    /// Coefficient values are unspecified afterwards; follow up with
    /// [`Mat::fill`] or [`Mat::assign`]. Storage only grows, so resizing
    /// back and forth does not allocate; see [`Storage::resize`].
    ///
    /// # Panics
    ///
    /// Panics if a dimension is zero or changes a `Fixed` extent.
    pub fn resize(&mut self, rows: usize, cols: usize) {
        self.storage.resize(rows, cols);
    }

    /// Overwrites all coefficients from a flat row-major list.
    ///
    /// # Panics
    ///
    /// Panics unless `coeffs.len()` equals the element count exactly.
    pub fn fill(&mut self, coeffs: &[T]) {
        self.as_mut().fill(coeffs);
    }

    /// A read-only view of the whole matrix.
    pub fn as_ref(&self) -> MatRef<'_, T> {
        MatRef::whole(&self.storage)
    }

    /// A mutable view of the whole matrix.
    pub fn as_mut(&mut self) -> MatMut<'_, T> {
        MatMut::whole(&mut self.storage)
    }

    /// Lifts the matrix into the expression layer.
    pub fn xpr(&self) -> Xpr<'_, T> {
        self.as_ref().xpr()
    }

    /// The lazy window of rows `start_row..=end_row` and columns
    /// `start_col..=end_col` (end indices inclusive). See [`Xpr::block`].
    pub fn block(&self, start_row: usize, end_row: usize, start_col: usize, end_col: usize) -> Xpr<'_, T> {
        self.xpr().block(start_row, end_row, start_col, end_col)
    }

    /// The lazy `1 x cols` view of row `i`.
    pub fn row(&self, i: usize) -> Xpr<'_, T> {
        self.xpr().row(i)
    }

    /// The lazy `rows x 1` view of column `j`.
    pub fn col(&self, j: usize) -> Xpr<'_, T> {
        self.xpr().col(j)
    }

    /// The lazy view with row `row` and column `col` removed. See
    /// [`Xpr::minor`].
    pub fn minor(&self, row: usize, col: usize) -> Xpr<'_, T> {
        self.xpr().minor(row, col)
    }

    /// The lazy transpose.
    pub fn t(&self) -> Xpr<'_, T> {
        self.xpr().t()
    }

    /// Resizes the matrix to the expression's dimensions and stores the
    /// expression into it.
    ///
    /// The expression is read lazily while the destination is written, so
    /// `src` must not read from `self`. The borrow checker enforces this:
    /// an expression over `self` keeps `self` borrowed and cannot be passed
    /// here. To store a computation into one of its own operands, go through
    /// [`Xpr::eval`] and assign the temporary.
    ///
    /// # Panics
    ///
    /// Panics if resizing would change a `Fixed` extent.
    pub fn assign(&mut self, src: &Xpr<'_, T>) {
        self.resize(src.rows(), src.cols());
        self.as_mut().assign(src);
    }

    /// Element-wise approximate equality via [`Scalar::is_approx`].
    ///
    /// Unlike the [`ApproxEq`] machinery this works for every scalar
    /// (integers compare exactly) and uses the scalar's own tolerance.
    pub fn is_approx(&self, other: &Self) -> bool {
        self.rows() == other.rows()
            && self.cols() == other.cols()
            && self
                .as_slice()
                .iter()
                .zip(other.as_slice())
                .all(|(a, b)| a.is_approx(*b))
    }

    /// Copies the coefficients into a statically-sized [`Matrix`].
    ///
    /// # Panics
    ///
    /// Panics if the dimensions don't match.
    pub fn to_fixed<const R: usize, const C: usize>(&self) -> Matrix<T, R, C> {
        assert!(
            self.rows() == R && self.cols() == C,
            "cannot convert a {}x{} matrix into a {R}x{C} matrix",
            self.rows(),
            self.cols()
        );
        Matrix::from_fn(|i, j| self[(i, j)])
    }
}

impl<T: Scalar, const R: usize, const C: usize> From<Matrix<T, R, C>> for Mat<T> {
    /// Converts a statically-sized matrix into a `Mat` with `Fixed` extents.
    fn from(m: Matrix<T, R, C>) -> Self {
        let mut out = Self::zeros(Extent::Fixed(R), Extent::Fixed(C));
        for i in 0..R {
            for j in 0..C {
                *out.storage.write(i, j) = m[(i, j)];
            }
        }
        out
    }
}

impl<T: Scalar> Index<(usize, usize)> for Mat<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        assert!(
            row < self.rows() && col < self.cols(),
            "index ({row}, {col}) out of range for {}x{} matrix",
            self.rows(),
            self.cols()
        );
        &self.storage.as_slice()[row * self.cols() + col]
    }
}

impl<T: Scalar> IndexMut<(usize, usize)> for Mat<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        self.storage.write(row, col)
    }
}

impl<T: Scalar> PartialEq for Mat<T> {
    fn eq(&self, other: &Self) -> bool {
        self.rows() == other.rows()
            && self.cols() == other.cols()
            && self.as_slice() == other.as_slice()
    }
}

impl<T: Scalar + fmt::Debug> fmt::Debug for Mat<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for i in 0..self.rows() {
            if i != 0 {
                f.write_str(", ")?;
            }
            f.debug_list()
                .entries((0..self.cols()).map(|j| &self[(i, j)]))
                .finish()?;
        }
        f.write_str("]")
    }
}

impl<T: Scalar + ApproxEq> ApproxEq for Mat<T> {
    type Tolerance = T::Tolerance;

    fn abs_diff_eq(&self, other: &Self, abs_tolerance: Self::Tolerance) -> bool {
        self.rows() == other.rows()
            && self.cols() == other.cols()
            && self.as_slice().abs_diff_eq(other.as_slice(), abs_tolerance)
    }

    fn rel_diff_eq(&self, other: &Self, rel_tolerance: Self::Tolerance) -> bool {
        self.rows() == other.rows()
            && self.cols() == other.cols()
            && self.as_slice().rel_diff_eq(other.as_slice(), rel_tolerance)
    }
}

impl<T: Scalar> AddAssign<Xpr<'_, T>> for Mat<T> {
    fn add_assign(&mut self, rhs: Xpr<'_, T>) {
        compound_assign(self, &rhs, "add", |a, b| a + b);
    }
}

impl<T: Scalar> AddAssign<&Mat<T>> for Mat<T> {
    fn add_assign(&mut self, rhs: &Mat<T>) {
        *self += rhs.xpr();
    }
}

impl<T: Scalar> SubAssign<Xpr<'_, T>> for Mat<T> {
    fn sub_assign(&mut self, rhs: Xpr<'_, T>) {
        compound_assign(self, &rhs, "subtract", |a, b| a - b);
    }
}

impl<T: Scalar> SubAssign<&Mat<T>> for Mat<T> {
    fn sub_assign(&mut self, rhs: &Mat<T>) {
        *self -= rhs.xpr();
    }
}

impl<T: Scalar> MulAssign<&Mat<T>> for Mat<T> {
    /// Replaces `self` with the matrix product `self * rhs`.
    ///
    /// The product is evaluated into a temporary before the store, so this
    /// is alias-safe even though the product reads `self`.
    fn mul_assign(&mut self, rhs: &Mat<T>) {
        let product = (&*self * rhs).eval();
        self.assign(&product.xpr());
    }
}

impl<T: Scalar> MulAssign<T> for Mat<T> {
    fn mul_assign(&mut self, factor: T) {
        for i in 0..self.rows() {
            for j in 0..self.cols() {
                *self.storage.write(i, j) = self.storage.read(i, j) * factor;
            }
        }
    }
}

impl<T: Scalar> DivAssign<T> for Mat<T> {
    fn div_assign(&mut self, divisor: T) {
        for i in 0..self.rows() {
            for j in 0..self.cols() {
                *self.storage.write(i, j) = self.storage.read(i, j) / divisor;
            }
        }
    }
}

fn compound_assign<T: Scalar>(
    dest: &mut Mat<T>,
    src: &Xpr<'_, T>,
    what: &str,
    combine: impl Fn(T, T) -> T,
) {
    assert!(
        dest.rows() == src.rows() && dest.cols() == src.cols(),
        "cannot {what}-assign a {}x{} expression to a {}x{} matrix",
        src.rows(),
        src.cols(),
        dest.rows(),
        dest.cols()
    );
    for i in 0..dest.rows() {
        for j in 0..dest.cols() {
            *dest.storage.write(i, j) = combine(dest.storage.read(i, j), src.at(i, j));
        }
    }
}
