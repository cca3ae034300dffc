//! Statically-sized vectors.
//!
//! [`Vector`] is a thin wrapper around `[T; N]` with vector-space
//! arithmetic. Unlike [`Mat`][crate::Mat], these are plain eager values;
//! they exist to give the quaternion layer and the fixed-size
//! [`Matrix`][crate::Matrix] type a compact coefficient representation.

use std::array;
use std::fmt;
use std::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
};

use bytemuck::{Pod, Zeroable};

use crate::approx::ApproxEq;
use crate::{One, Scalar, Sqrt, Zero};

/// An `N`-element column vector.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Vector<T, const N: usize>([T; N]);

/// A 2-element vector.
pub type Vec2<T> = Vector<T, 2>;
/// A 3-element vector.
pub type Vec3<T> = Vector<T, 3>;
/// A 4-element vector.
pub type Vec4<T> = Vector<T, 4>;

pub type Vec2f = Vec2<f32>;
pub type Vec3f = Vec3<f32>;
pub type Vec4f = Vec4<f32>;

/// Constructs a [`Vec2`].
#[inline]
pub const fn vec2<T>(x: T, y: T) -> Vec2<T> {
    Vector([x, y])
}

/// Constructs a [`Vec3`].
#[inline]
pub const fn vec3<T>(x: T, y: T, z: T) -> Vec3<T> {
    Vector([x, y, z])
}

/// Constructs a [`Vec4`].
#[inline]
pub const fn vec4<T>(x: T, y: T, z: T, w: T) -> Vec4<T> {
    Vector([x, y, z, w])
}

unsafe impl<T: Zeroable, const N: usize> Zeroable for Vector<T, N> {}
unsafe impl<T: Pod, const N: usize> Pod for Vector<T, N> {}

impl<T: Zero + Copy, const N: usize> Vector<T, N> {
    /// The vector with all elements zero.
    pub const ZERO: Self = Self([T::ZERO; N]);
}

impl<T, const N: usize> Vector<T, N> {
    /// Computes each element from its index.
    #[inline]
    pub fn from_fn(f: impl FnMut(usize) -> T) -> Self {
        Self(array::from_fn(f))
    }

    /// Creates a vector with all elements set to `value`.
    pub fn splat(value: T) -> Self
    where
        T: Copy,
    {
        Self([value; N])
    }

    #[inline]
    pub fn as_array(&self) -> &[T; N] {
        &self.0
    }

    #[inline]
    pub fn into_array(self) -> [T; N] {
        self.0
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    /// Applies `f` to every element.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Vector<U, N> {
        Vector(self.0.map(f))
    }

    /// Combines two vectors element by element.
    pub fn zip<U, V>(self, other: Vector<U, N>, mut f: impl FnMut(T, U) -> V) -> Vector<V, N>
    where
        T: Copy,
        U: Copy,
    {
        Vector(array::from_fn(|i| f(self.0[i], other.0[i])))
    }
}

impl<T: Scalar, const N: usize> Vector<T, N> {
    /// The dot product of `self` and `other`.
    pub fn dot(self, other: Self) -> T {
        self.0
            .iter()
            .zip(&other.0)
            .fold(T::ZERO, |acc, (a, b)| acc + *a * *b)
    }

    /// The squared length of the vector.
    pub fn length2(self) -> T {
        self.dot(self)
    }

    /// The length of the vector.
    pub fn length(self) -> T
    where
        T: Sqrt,
    {
        self.length2().sqrt()
    }

    /// Returns the vector scaled to length 1.
    pub fn normalize(self) -> Self
    where
        T: Sqrt,
    {
        self / self.length()
    }
}

impl<T: Copy> Vec2<T> {
    #[inline]
    pub fn x(self) -> T {
        self.0[0]
    }
    #[inline]
    pub fn y(self) -> T {
        self.0[1]
    }
}

impl<T: Copy> Vec3<T> {
    #[inline]
    pub fn x(self) -> T {
        self.0[0]
    }
    #[inline]
    pub fn y(self) -> T {
        self.0[1]
    }
    #[inline]
    pub fn z(self) -> T {
        self.0[2]
    }
}

impl<T: Copy> Vec4<T> {
    #[inline]
    pub fn x(self) -> T {
        self.0[0]
    }
    #[inline]
    pub fn y(self) -> T {
        self.0[1]
    }
    #[inline]
    pub fn z(self) -> T {
        self.0[2]
    }
    #[inline]
    pub fn w(self) -> T {
        self.0[3]
    }
}

impl<T: Zero + One + Copy> Vec3<T> {
    /// The positive X axis.
    pub const X: Self = {
        let mut v = [T::ZERO; 3];
        v[0] = T::ONE;
        Self(v)
    };
    /// The positive Y axis.
    pub const Y: Self = {
        let mut v = [T::ZERO; 3];
        v[1] = T::ONE;
        Self(v)
    };
    /// The positive Z axis.
    pub const Z: Self = {
        let mut v = [T::ZERO; 3];
        v[2] = T::ONE;
        Self(v)
    };
}

impl<T: Scalar> Vec3<T> {
    /// The cross product of `self` and `other`.
    pub fn cross(self, other: Self) -> Self {
        vec3(
            self.y() * other.z() - self.z() * other.y(),
            self.z() * other.x() - self.x() * other.z(),
            self.x() * other.y() - self.y() * other.x(),
        )
    }
}

impl<T, const N: usize> From<[T; N]> for Vector<T, N> {
    fn from(array: [T; N]) -> Self {
        Self(array)
    }
}

impl<T, const N: usize> From<Vector<T, N>> for [T; N] {
    fn from(v: Vector<T, N>) -> Self {
        v.0
    }
}

impl<T, const N: usize> Index<usize> for Vector<T, N> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        &self.0[index]
    }
}

impl<T, const N: usize> IndexMut<usize> for Vector<T, N> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.0[index]
    }
}

impl<T: PartialEq, const N: usize> PartialEq<[T; N]> for Vector<T, N> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.0 == *other
    }
}

impl<T: Scalar, const N: usize> Neg for Vector<T, N> {
    type Output = Self;
    fn neg(self) -> Self {
        self.map(|e| -e)
    }
}

impl<T: Scalar, const N: usize> Add for Vector<T, N> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a + b)
    }
}

impl<T: Scalar, const N: usize> Sub for Vector<T, N> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a - b)
    }
}

impl<T: Scalar, const N: usize> Mul<T> for Vector<T, N> {
    type Output = Self;
    fn mul(self, rhs: T) -> Self {
        self.map(|e| e * rhs)
    }
}

impl<T: Scalar, const N: usize> Div<T> for Vector<T, N> {
    type Output = Self;
    fn div(self, rhs: T) -> Self {
        self.map(|e| e / rhs)
    }
}

impl<T: Scalar, const N: usize> AddAssign for Vector<T, N> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<T: Scalar, const N: usize> SubAssign for Vector<T, N> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<T: Scalar, const N: usize> MulAssign<T> for Vector<T, N> {
    fn mul_assign(&mut self, rhs: T) {
        *self = *self * rhs;
    }
}

impl<T: Scalar, const N: usize> DivAssign<T> for Vector<T, N> {
    fn div_assign(&mut self, rhs: T) {
        *self = *self / rhs;
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for Vector<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl<T: ApproxEq<U>, U, const N: usize> ApproxEq<Vector<U, N>> for Vector<T, N> {
    type Tolerance = T::Tolerance;

    fn abs_diff_eq(&self, other: &Vector<U, N>, abs_tolerance: Self::Tolerance) -> bool {
        self.0.abs_diff_eq(&other.0, abs_tolerance)
    }

    fn rel_diff_eq(&self, other: &Vector<U, N>, rel_tolerance: Self::Tolerance) -> bool {
        self.0.rel_diff_eq(&other.0, rel_tolerance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_approx_eq;

    #[test]
    fn arithmetic() {
        let a = vec3(1.0, 2.0, 3.0);
        let b = vec3(4.0, 5.0, 6.0);
        assert_eq!(a + b, [5.0, 7.0, 9.0]);
        assert_eq!(b - a, [3.0, 3.0, 3.0]);
        assert_eq!(-a, [-1.0, -2.0, -3.0]);
        assert_eq!(a * 2.0, [2.0, 4.0, 6.0]);
        assert_eq!(b / 2.0, [2.0, 2.5, 3.0]);

        let mut c = a;
        c += b;
        c *= 2.0;
        assert_eq!(c, [10.0, 14.0, 18.0]);
    }

    #[test]
    fn dot_and_cross() {
        let a = vec3(1.0, 2.0, 3.0);
        let b = vec3(4.0, 5.0, 6.0);
        assert_eq!(a.dot(b), 32.0);
        assert_eq!(a.cross(b), [-3.0, 6.0, -3.0]);
        assert_eq!(Vec3f::X.cross(Vec3f::Y), Vec3f::Z);
        assert_eq!(Vec3f::Y.cross(Vec3f::X), -Vec3f::Z);
    }

    #[test]
    fn length_and_normalize() {
        let v = vec3(2.0f32, 3.0, 6.0);
        assert_eq!(v.length2(), 49.0);
        assert_eq!(v.length(), 7.0);
        assert_approx_eq!(v.normalize().length(), 1.0);
        assert_approx_eq!(vec2(3.0f64, 4.0).length(), 5.0);
    }

    #[test]
    fn axes_and_zero() {
        assert_eq!(Vec3f::ZERO, [0.0; 3]);
        assert_eq!(Vec3f::X, [1.0, 0.0, 0.0]);
        assert_eq!(Vec3f::Y, [0.0, 1.0, 0.0]);
        assert_eq!(Vec3f::Z, [0.0, 0.0, 1.0]);
    }

    #[test]
    fn accessors_and_indexing() {
        let mut v = vec4(1, 2, 3, 4);
        assert_eq!((v.x(), v.y(), v.z(), v.w()), (1, 2, 3, 4));
        v[2] = 30;
        assert_eq!(v[2], 30);
        assert_eq!(v.as_array(), &[1, 2, 30, 4]);
    }
}
