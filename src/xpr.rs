//! Lazily-evaluated matrix expressions.
//!
//! An [`Xpr`] is a description of a computation, not its result: it captures
//! read-only views of its operands plus an operation tag, and computes
//! nothing until it is stored into a destination ([`Mat::assign`],
//! [`MatMut::assign`]) or materialized with [`Xpr::eval`]. Building an
//! expression touches no coefficient memory; extent compatibility is the
//! only thing checked at construction time.
//!
//! `*` between expressions is always the matrix product. The element-wise
//! multiply and divide live in the [`elem`] module, so that the distinction
//! is visible at the call site.
//!
//! [`Mat::assign`]: crate::Mat::assign
//! [`MatMut::assign`]: crate::MatMut::assign

use crate::{Extent, Mat, MatRef, Scalar};

mod ops;

/// The element-wise binary operations an expression node can apply.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinOp {
    fn apply<T: Scalar>(self, a: T, b: T) -> T {
        match self {
            BinOp::Add => a + b,
            BinOp::Sub => a - b,
            BinOp::Mul => a * b,
            BinOp::Div => a / b,
        }
    }

    fn name(self) -> &'static str {
        match self {
            BinOp::Add => "add",
            BinOp::Sub => "subtract",
            BinOp::Mul => "element-wise multiply",
            BinOp::Div => "element-wise divide",
        }
    }
}

/// A lazily-evaluated matrix expression.
///
/// Expressions are transient values: they borrow the matrices they were
/// built from and are consumed by a single evaluation or assignment.
pub enum Xpr<'a, T> {
    /// A reference to matrix storage.
    Leaf(MatRef<'a, T>),
    /// A rectangular window of a sub-expression.
    Block {
        src: Box<Xpr<'a, T>>,
        start_row: usize,
        start_col: usize,
        rows: usize,
        cols: usize,
    },
    /// A sub-expression with one row and one column removed.
    Minor {
        src: Box<Xpr<'a, T>>,
        row: usize,
        col: usize,
    },
    /// A sub-expression with rows and columns swapped.
    Transpose(Box<Xpr<'a, T>>),
    /// An element-wise combination of two sub-expressions.
    Binary {
        op: BinOp,
        lhs: Box<Xpr<'a, T>>,
        rhs: Box<Xpr<'a, T>>,
    },
    /// A sub-expression with every element multiplied by a factor.
    Scale { src: Box<Xpr<'a, T>>, factor: T },
    /// A sub-expression with every element divided by a divisor.
    ScaleDiv { src: Box<Xpr<'a, T>>, divisor: T },
    /// An element-wise negation.
    Neg(Box<Xpr<'a, T>>),
    /// A matrix product, contracting over the shared inner dimension.
    Product {
        lhs: Box<Xpr<'a, T>>,
        rhs: Box<Xpr<'a, T>>,
    },
}

impl<'a, T: Scalar> Xpr<'a, T> {
    pub(crate) fn leaf(view: MatRef<'a, T>) -> Self {
        Xpr::Leaf(view)
    }

    /// The number of rows of the expression's result.
    pub fn rows(&self) -> usize {
        match self {
            Xpr::Leaf(view) => view.rows(),
            Xpr::Block { rows, .. } => *rows,
            Xpr::Minor { src, .. } => src.rows() - 1,
            Xpr::Transpose(src) => src.cols(),
            Xpr::Binary { lhs, .. } => lhs.rows(),
            Xpr::Scale { src, .. } | Xpr::ScaleDiv { src, .. } | Xpr::Neg(src) => src.rows(),
            Xpr::Product { lhs, .. } => lhs.rows(),
        }
    }

    /// The number of columns of the expression's result.
    pub fn cols(&self) -> usize {
        match self {
            Xpr::Leaf(view) => view.cols(),
            Xpr::Block { cols, .. } => *cols,
            Xpr::Minor { src, .. } => src.cols() - 1,
            Xpr::Transpose(src) => src.rows(),
            Xpr::Binary { lhs, .. } => lhs.cols(),
            Xpr::Scale { src, .. } | Xpr::ScaleDiv { src, .. } | Xpr::Neg(src) => src.cols(),
            Xpr::Product { rhs, .. } => rhs.cols(),
        }
    }

    /// Evaluates the single element at `(row, col)`.
    ///
    /// This walks the expression tree for every call; a matrix product
    /// performs its dot-product contraction here and is not memoized.
    pub fn at(&self, row: usize, col: usize) -> T {
        match self {
            Xpr::Leaf(view) => view.read(row, col),
            Xpr::Block {
                src,
                start_row,
                start_col,
                ..
            } => src.at(start_row + row, start_col + col),
            // Indices at or past the excluded row/column shift up by one.
            Xpr::Minor {
                src,
                row: xrow,
                col: xcol,
            } => src.at(
                row + usize::from(row >= *xrow),
                col + usize::from(col >= *xcol),
            ),
            Xpr::Transpose(src) => src.at(col, row),
            Xpr::Binary { op, lhs, rhs } => op.apply(lhs.at(row, col), rhs.at(row, col)),
            Xpr::Scale { src, factor } => src.at(row, col) * *factor,
            Xpr::ScaleDiv { src, divisor } => src.at(row, col) / *divisor,
            Xpr::Neg(src) => -src.at(row, col),
            Xpr::Product { lhs, rhs } => {
                let inner = lhs.cols();
                (0..inner).fold(T::ZERO, |acc, k| acc + lhs.at(row, k) * rhs.at(k, col))
            }
        }
    }

    /// A lazy window spanning rows `start_row..=end_row` and columns
    /// `start_col..=end_col` (end indices inclusive).
    ///
    /// # Panics
    ///
    /// Panics if a range is inverted or exceeds the expression's extents.
    pub fn block(
        self,
        start_row: usize,
        end_row: usize,
        start_col: usize,
        end_col: usize,
    ) -> Self {
        assert!(
            start_row <= end_row
                && end_row < self.rows()
                && start_col <= end_col
                && end_col < self.cols(),
            "block ({start_row}..={end_row}, {start_col}..={end_col}) out of range for {}x{}",
            self.rows(),
            self.cols()
        );
        Xpr::Block {
            src: Box::new(self),
            start_row,
            start_col,
            rows: end_row - start_row + 1,
            cols: end_col - start_col + 1,
        }
    }

    /// The lazy `1 x cols` view of row `i`.
    pub fn row(self, i: usize) -> Self {
        assert!(i < self.rows(), "row {i} out of range for {} rows", self.rows());
        let cols = self.cols();
        self.block(i, i, 0, cols - 1)
    }

    /// The lazy `rows x 1` view of column `j`.
    pub fn col(self, j: usize) -> Self {
        assert!(
            j < self.cols(),
            "column {j} out of range for {} columns",
            self.cols()
        );
        let rows = self.rows();
        self.block(0, rows - 1, j, j)
    }

    /// The lazy view with row `row` and column `col` removed, of dimensions
    /// `(rows - 1) x (cols - 1)`.
    ///
    /// # Panics
    ///
    /// Panics if the indices are out of range or the expression has only one
    /// row or column.
    pub fn minor(self, row: usize, col: usize) -> Self {
        assert!(
            row < self.rows() && col < self.cols(),
            "minor ({row}, {col}) out of range for {}x{}",
            self.rows(),
            self.cols()
        );
        assert!(
            self.rows() > 1 && self.cols() > 1,
            "cannot take a minor of a {}x{} expression",
            self.rows(),
            self.cols()
        );
        Xpr::Minor {
            src: Box::new(self),
            row,
            col,
        }
    }

    /// The lazy transpose.
    pub fn t(self) -> Self {
        Xpr::Transpose(Box::new(self))
    }

    pub(crate) fn binary(op: BinOp, lhs: Self, rhs: Self) -> Self {
        assert!(
            lhs.rows() == rhs.rows() && lhs.cols() == rhs.cols(),
            "cannot {} a {}x{} and a {}x{} expression",
            op.name(),
            lhs.rows(),
            lhs.cols(),
            rhs.rows(),
            rhs.cols()
        );
        Xpr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub(crate) fn product(lhs: Self, rhs: Self) -> Self {
        assert!(
            lhs.cols() == rhs.rows(),
            "cannot multiply a {}x{} by a {}x{} matrix",
            lhs.rows(),
            lhs.cols(),
            rhs.rows(),
            rhs.cols()
        );
        Xpr::Product {
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// Evaluates the expression into freshly allocated storage.
    ///
    /// This is the alias-safe protocol: the result shares no memory with any
    /// operand, so it may subsequently be stored over one of them. Compound
    /// assignment (`*=`) routes through here by construction.
    pub fn eval(&self) -> Mat<T> {
        let mut out = Mat::zeros(Extent::Dyn(self.rows()), Extent::Dyn(self.cols()));
        out.as_mut().assign(self);
        out
    }
}

/// Element-wise multiplication and division of expressions.
///
/// These are deliberately not operators: `*` on matrices always means the
/// matrix product, so the element-wise variants are spelled out.
pub mod elem {
    use super::{BinOp, Xpr};
    use crate::Scalar;

    /// The element-wise product of two equally-sized expressions.
    ///
    /// # Panics
    ///
    /// Panics if the extents differ.
    pub fn mul<'a, T: Scalar>(
        lhs: impl Into<Xpr<'a, T>>,
        rhs: impl Into<Xpr<'a, T>>,
    ) -> Xpr<'a, T> {
        Xpr::binary(BinOp::Mul, lhs.into(), rhs.into())
    }

    /// The element-wise quotient of two equally-sized expressions.
    ///
    /// # Panics
    ///
    /// Panics if the extents differ.
    pub fn div<'a, T: Scalar>(
        lhs: impl Into<Xpr<'a, T>>,
        rhs: impl Into<Xpr<'a, T>>,
    ) -> Xpr<'a, T> {
        Xpr::binary(BinOp::Div, lhs.into(), rhs.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Extent;

    fn mat2(coeffs: &[i32]) -> Mat<i32> {
        Mat::from_coeffs(Extent::Fixed(2), Extent::Fixed(2), coeffs)
    }

    #[test]
    fn building_is_lazy() {
        let a = mat2(&[1, 2, 3, 4]);
        let b = mat2(&[5, 6, 7, 8]);

        // Building the tree performs no evaluation; `at` does.
        let x = (&a + &b) * 2;
        assert_eq!(x.rows(), 2);
        assert_eq!(x.cols(), 2);
        assert_eq!(x.at(0, 0), 12);
        assert_eq!(x.at(1, 1), 24);
    }

    #[test]
    fn matrix_product() {
        let m = mat2(&[1, 2, 3, 4]);
        let p = &m * &m;
        assert_eq!(p.at(0, 0), 7);
        assert_eq!(p.at(0, 1), 10);
        assert_eq!(p.at(1, 0), 15);
        assert_eq!(p.at(1, 1), 22);

        let out = p.eval();
        assert_eq!(out, mat2(&[7, 10, 15, 22]));
    }

    #[test]
    fn product_of_non_square() {
        let a = Mat::from_coeffs(Extent::Fixed(2), Extent::Fixed(3), &[1, 2, 3, 4, 5, 6]);
        let b = Mat::from_coeffs(Extent::Fixed(3), Extent::Fixed(1), &[1, 0, -1]);
        let p = (&a * &b).eval();
        assert_eq!((p.rows(), p.cols()), (2, 1));
        assert_eq!(p[(0, 0)], 1 - 3);
        assert_eq!(p[(1, 0)], 4 - 6);
    }

    #[test]
    fn transpose_product_forms() {
        let a = Mat::from_coeffs(Extent::Fixed(2), Extent::Fixed(3), &[1, 2, 3, 4, 5, 6]);
        // aᵀ·a is 3x3; a·aᵀ is 2x2.
        let ata = (a.t() * a.xpr()).eval();
        assert_eq!((ata.rows(), ata.cols()), (3, 3));
        assert_eq!(ata[(0, 0)], 1 + 16);
        assert_eq!(ata[(2, 1)], 3 * 2 + 6 * 5);

        let aat = (a.xpr() * a.t()).eval();
        assert_eq!((aat.rows(), aat.cols()), (2, 2));
        assert_eq!(aat[(0, 1)], 1 * 4 + 2 * 5 + 3 * 6);
    }

    #[test]
    fn minor_remaps_indices() {
        let m = Mat::from_coeffs(
            Extent::Fixed(3),
            Extent::Fixed(3),
            &[1, 2, 3, 4, 5, 6, 7, 8, 9],
        );
        let minor = m.minor(0, 1).eval();
        assert_eq!((minor.rows(), minor.cols()), (2, 2));
        assert_eq!(minor, mat2(&[4, 6, 7, 9]));
    }

    #[test]
    fn block_row_col() {
        let m = Mat::from_coeffs(
            Extent::Fixed(3),
            Extent::Fixed(3),
            &[1, 2, 3, 4, 5, 6, 7, 8, 9],
        );
        assert_eq!(m.block(1, 2, 1, 2).eval(), mat2(&[5, 6, 8, 9]));

        let row = m.row(2).eval();
        assert_eq!((row.rows(), row.cols()), (1, 3));
        assert_eq!(row[(0, 0)], 7);

        let col = m.col(0).eval();
        assert_eq!((col.rows(), col.cols()), (3, 1));
        assert_eq!(col[(2, 0)], 7);
    }

    #[test]
    fn elementwise_namespace() {
        let a = mat2(&[1, 2, 3, 4]);
        let b = mat2(&[2, 2, 3, 4]);
        assert_eq!(elem::mul(&a, &b).eval(), mat2(&[2, 4, 9, 16]));
        assert_eq!(elem::div(&b, &a).eval(), mat2(&[2, 1, 1, 1]));
    }

    #[test]
    fn scale_and_negate() {
        let a = mat2(&[1, 2, 3, 4]);
        assert_eq!((-&a).eval(), mat2(&[-1, -2, -3, -4]));
        assert_eq!((&a / 1).eval(), a);
        assert_eq!((a.xpr() * 3 - &a).eval(), mat2(&[2, 4, 6, 8]));
    }

    #[test]
    #[should_panic(expected = "cannot add")]
    fn add_extent_mismatch_panics() {
        let a = mat2(&[1, 2, 3, 4]);
        let b = Mat::from_coeffs(Extent::Fixed(2), Extent::Fixed(3), &[0; 6]);
        let _ = &a + &b;
    }

    #[test]
    #[should_panic(expected = "cannot multiply")]
    fn product_extent_mismatch_panics() {
        let a = mat2(&[1, 2, 3, 4]);
        let b = Mat::from_coeffs(Extent::Fixed(3), Extent::Fixed(2), &[0; 6]);
        let _ = &a * &b;
    }

    #[test]
    #[should_panic(expected = "cannot take a minor")]
    fn minor_of_single_row_panics() {
        let m = Mat::<f32>::zeros(Extent::Fixed(1), Extent::Fixed(3));
        let _ = m.minor(0, 0);
    }
}
