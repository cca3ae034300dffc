//! Statically-sized matrices.
//!
//! [`Matrix`] complements [`Mat`][crate::Mat] for the small fixed sizes
//! where dimensions are part of the type: rotation matrices, covariances,
//! and similar 2x2 to 4x4 workhorses. Coefficients live inline in row-major
//! order and all arithmetic is eager.

use std::fmt;
use std::ops::{Index, IndexMut, Mul};

use bytemuck::{Pod, Zeroable};

use crate::approx::ApproxEq;
use crate::{One, Scalar, Vector, Zero};

/// An `R x C` matrix with inline storage.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Matrix<T, const R: usize, const C: usize>([[T; C]; R]);

/// A 2x2 matrix.
pub type Mat2<T> = Matrix<T, 2, 2>;
/// A 3x3 matrix.
pub type Mat3<T> = Matrix<T, 3, 3>;
/// A 4x4 matrix.
pub type Mat4<T> = Matrix<T, 4, 4>;

pub type Mat2f = Mat2<f32>;
pub type Mat3f = Mat3<f32>;
pub type Mat4f = Mat4<f32>;

unsafe impl<T: Zeroable, const R: usize, const C: usize> Zeroable for Matrix<T, R, C> {}
unsafe impl<T: Pod, const R: usize, const C: usize> Pod for Matrix<T, R, C> {}

impl<T: Zero + Copy, const R: usize, const C: usize> Matrix<T, R, C> {
    /// The matrix with all elements zero.
    pub const ZERO: Self = Self([[T::ZERO; C]; R]);
}

impl<T: Zero + One + Copy, const N: usize> Matrix<T, N, N> {
    /// The identity matrix.
    pub const IDENTITY: Self = {
        let mut rows = [[T::ZERO; N]; N];
        let mut i = 0;
        while i < N {
            rows[i][i] = T::ONE;
            i += 1;
        }
        Self(rows)
    };
}

impl<T, const R: usize, const C: usize> Matrix<T, R, C> {
    /// Creates a matrix from its rows.
    #[inline]
    pub fn from_rows(rows: [[T; C]; R]) -> Self {
        Self(rows)
    }

    /// Computes each element from its row and column index.
    #[inline]
    pub fn from_fn(mut f: impl FnMut(usize, usize) -> T) -> Self {
        Self(std::array::from_fn(|i| std::array::from_fn(|j| f(i, j))))
    }
}

impl<T: Copy, const R: usize, const C: usize> Matrix<T, R, C> {
    /// Creates a matrix from its columns.
    pub fn from_columns(columns: [[T; R]; C]) -> Self {
        Self::from_fn(|i, j| columns[j][i])
    }

    /// Applies `f` to every element.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Matrix<U, R, C> {
        Matrix(self.0.map(|row| row.map(&mut f)))
    }

    /// Row `i` as a vector.
    pub fn row(&self, i: usize) -> Vector<T, C> {
        Vector::from_fn(|j| self.0[i][j])
    }

    /// Column `j` as a vector.
    pub fn col(&self, j: usize) -> Vector<T, R> {
        Vector::from_fn(|i| self.0[i][j])
    }

    /// The transposed matrix.
    pub fn transpose(self) -> Matrix<T, C, R> {
        Matrix::from_fn(|i, j| self.0[j][i])
    }
}

impl<T: Scalar, const N: usize> Matrix<T, N, N> {
    /// The sum of the diagonal elements.
    pub fn trace(&self) -> T {
        (0..N).fold(T::ZERO, |acc, i| acc + self.0[i][i])
    }
}

impl<T: Scalar> Mat2<T> {
    pub fn determinant(&self) -> T {
        let m = &self.0;
        m[0][0] * m[1][1] - m[0][1] * m[1][0]
    }
}

impl<T: Scalar> Mat3<T> {
    pub fn determinant(&self) -> T {
        let m = &self.0;
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }
}

impl<T, const R: usize, const C: usize> Index<(usize, usize)> for Matrix<T, R, C> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        &self.0[row][col]
    }
}

impl<T, const R: usize, const C: usize> IndexMut<(usize, usize)> for Matrix<T, R, C> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        &mut self.0[row][col]
    }
}

impl<T: Scalar, const R: usize, const C: usize, const K: usize> Mul<Matrix<T, C, K>>
    for Matrix<T, R, C>
{
    type Output = Matrix<T, R, K>;

    fn mul(self, rhs: Matrix<T, C, K>) -> Matrix<T, R, K> {
        Matrix::from_fn(|i, j| (0..C).fold(T::ZERO, |acc, k| acc + self.0[i][k] * rhs.0[k][j]))
    }
}

impl<T: Scalar, const R: usize, const C: usize> Mul<Vector<T, C>> for Matrix<T, R, C> {
    type Output = Vector<T, R>;

    fn mul(self, rhs: Vector<T, C>) -> Vector<T, R> {
        Vector::from_fn(|i| self.row(i).dot(rhs))
    }
}

impl<T: Scalar, const R: usize, const C: usize> Mul<T> for Matrix<T, R, C> {
    type Output = Self;

    fn mul(self, rhs: T) -> Self {
        self.map(|e| e * rhs)
    }
}

impl<T: fmt::Debug, const R: usize, const C: usize> fmt::Debug for Matrix<T, R, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

impl<T: ApproxEq<U>, U, const R: usize, const C: usize> ApproxEq<Matrix<U, R, C>>
    for Matrix<T, R, C>
{
    type Tolerance = T::Tolerance;

    fn abs_diff_eq(&self, other: &Matrix<U, R, C>, abs_tolerance: Self::Tolerance) -> bool {
        self.0.abs_diff_eq(&other.0, abs_tolerance)
    }

    fn rel_diff_eq(&self, other: &Matrix<U, R, C>, rel_tolerance: Self::Tolerance) -> bool {
        self.0.rel_diff_eq(&other.0, rel_tolerance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{vec2, vec3};

    #[test]
    fn constructors_agree() {
        let a = Matrix::from_rows([[1, 2, 3], [4, 5, 6]]);
        let b = Matrix::from_columns([[1, 4], [2, 5], [3, 6]]);
        assert_eq!(a, b);
        assert_eq!(a[(0, 2)], 3);
        assert_eq!(a[(1, 0)], 4);
        assert_eq!(a.row(1), vec3(4, 5, 6));
        assert_eq!(a.col(2), vec2(3, 6));
    }

    #[test]
    fn transpose() {
        let a = Matrix::from_rows([[1, 2, 3], [4, 5, 6]]);
        assert_eq!(a.transpose(), Matrix::from_rows([[1, 4], [2, 5], [3, 6]]));
        assert_eq!(a.transpose().transpose(), a);
    }

    #[test]
    fn identity_and_zero() {
        assert_eq!(Mat2::IDENTITY, Matrix::from_rows([[1, 0], [0, 1]]));
        assert_eq!(Mat3f::ZERO, Matrix::from_rows([[0.0; 3]; 3]));
        let v = vec3(1.0, 2.0, 3.0);
        assert_eq!(Mat3f::IDENTITY * v, v);
    }

    #[test]
    fn products() {
        let m = Mat2::from_rows([[1, 2], [3, 4]]);
        assert_eq!(m * m, Mat2::from_rows([[7, 10], [15, 22]]));
        assert_eq!(m * vec2(1, 1), vec2(3, 7));
        assert_eq!(m * 2, Mat2::from_rows([[2, 4], [6, 8]]));

        let a = Matrix::from_rows([[1, 2, 3], [4, 5, 6]]);
        let prod = a * a.transpose();
        assert_eq!(prod, Mat2::from_rows([[14, 32], [32, 77]]));
    }

    #[test]
    fn trace_and_determinant() {
        let m = Mat3::from_rows([[2, 0, 0], [0, 3, 0], [0, 0, 4]]);
        assert_eq!(m.trace(), 9);
        assert_eq!(m.determinant(), 24);
        assert_eq!(Mat2::from_rows([[1, 2], [3, 4]]).determinant(), -2);
        assert_eq!(Mat3::<i32>::IDENTITY.determinant(), 1);
    }
}
