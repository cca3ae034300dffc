//! Unit quaternions for representing 3D rotations.
//!
//! [`Quat`] stores its coefficients as `[x, y, z, w]` where `w` is the
//! scalar part. Only *unit* quaternions represent rotations; the
//! constructors that build rotations ([`Quat::from_angle_axis`],
//! [`Quat::from_rotation_matrix`], [`Quat::from_two_vectors`]) produce unit
//! quaternions, while the arithmetic operations don't renormalize on their
//! own.
//!
//! A quaternion and its negation encode the same rotation. Comparisons that
//! should be rotation-aware (rather than coefficient-wise) go through
//! [`Quat::angular_distance`].

use std::fmt;
use std::ops::{Mul, MulAssign};

use crate::approx::ApproxEq;
use crate::{vec4, Mat3, One, RealScalar, Scalar, Sqrt, Trig, Vec3, Vec4, Zero};

/// A quaternion `w + x·i + y·j + z·k`.
#[derive(Clone, Copy, PartialEq)]
pub struct Quat<T> {
    coeffs: Vec4<T>,
}

pub type Quatf = Quat<f32>;
pub type Quatd = Quat<f64>;

impl<T: Zero + One + Copy> Quat<T> {
    /// The identity rotation.
    pub const IDENTITY: Self = Self {
        coeffs: vec4(T::ZERO, T::ZERO, T::ZERO, T::ONE),
    };
}

impl<T: Scalar> Quat<T> {
    /// Creates a quaternion from its scalar part `w` and imaginary parts
    /// `x`, `y`, `z`.
    ///
    /// Note that the parameter order differs from the storage order; see
    /// [`Quat::from_vec`].
    pub fn new(w: T, x: T, y: T, z: T) -> Self {
        Self {
            coeffs: vec4(x, y, z, w),
        }
    }

    /// Creates a quaternion from its coefficient vector `[x, y, z, w]`.
    pub fn from_vec(coeffs: Vec4<T>) -> Self {
        Self { coeffs }
    }

    /// The coefficients in storage order `[x, y, z, w]`.
    #[inline]
    pub fn coeffs(&self) -> Vec4<T> {
        self.coeffs
    }

    #[inline]
    pub fn x(&self) -> T {
        self.coeffs[0]
    }
    #[inline]
    pub fn y(&self) -> T {
        self.coeffs[1]
    }
    #[inline]
    pub fn z(&self) -> T {
        self.coeffs[2]
    }
    #[inline]
    pub fn w(&self) -> T {
        self.coeffs[3]
    }

    /// The imaginary part `[x, y, z]`.
    pub fn vec(&self) -> Vec3<T> {
        crate::vec3(self.x(), self.y(), self.z())
    }

    /// The conjugate `w - x·i - y·j - z·k`.
    ///
    /// For unit quaternions this equals the inverse.
    pub fn conjugate(&self) -> Self {
        Self::new(self.w(), -self.x(), -self.y(), -self.z())
    }

    /// The 4D dot product of the coefficient vectors.
    pub fn dot(&self, other: Self) -> T {
        self.coeffs.dot(other.coeffs)
    }

    /// The squared norm of the coefficient vector.
    pub fn length2(&self) -> T {
        self.coeffs.length2()
    }

    /// Converts to the equivalent rotation matrix.
    ///
    /// `self` must be a unit quaternion for the result to be a rotation.
    pub fn to_rotation_matrix(&self) -> Mat3<T> {
        let two = T::ONE + T::ONE;
        let (x, y, z, w) = (self.x(), self.y(), self.z(), self.w());
        let (tx, ty, tz) = (two * x, two * y, two * z);
        let (twx, twy, twz) = (tx * w, ty * w, tz * w);
        let (txx, txy, txz) = (tx * x, ty * x, tz * x);
        let (tyy, tyz) = (ty * y, tz * y);
        let tzz = tz * z;
        Mat3::from_rows([
            [T::ONE - (tyy + tzz), txy - twz, txz + twy],
            [txy + twz, T::ONE - (txx + tzz), tyz - twx],
            [txz - twy, tyz + twx, T::ONE - (txx + tyy)],
        ])
    }

    /// Rotates `v` by `self` (which must be a unit quaternion).
    ///
    /// Cheaper than converting to a matrix for a single vector; for many
    /// vectors, convert once with [`Quat::to_rotation_matrix`].
    pub fn transform_vector(&self, v: Vec3<T>) -> Vec3<T> {
        let vec = self.vec();
        let uv = vec.cross(v) * (T::ONE + T::ONE);
        v + uv * self.w() + vec.cross(uv)
    }
}

impl<T: RealScalar + Sqrt> Quat<T> {
    /// The norm of the coefficient vector.
    pub fn length(&self) -> T {
        self.coeffs.length()
    }

    /// Returns the quaternion scaled to unit length.
    pub fn normalize(&self) -> Self {
        Self::from_vec(self.coeffs.normalize())
    }

    /// The multiplicative inverse.
    ///
    /// The zero quaternion has no inverse; it is mapped to itself.
    pub fn inverse(&self) -> Self {
        let n2 = self.length2();
        if n2 > T::ZERO {
            Self::from_vec(self.conjugate().coeffs / n2)
        } else {
            log::trace!("inverting a zero quaternion, returning zero");
            Self::from_vec(Vec4::ZERO)
        }
    }

    /// Creates the quaternion equivalent to the rotation matrix `m`.
    ///
    /// Uses the larger of the trace and the dominant diagonal element to
    /// pick a numerically stable extraction, so no cancellation occurs for
    /// rotations near half a turn.
    pub fn from_rotation_matrix(m: &Mat3<T>) -> Self {
        let half = T::ONE / (T::ONE + T::ONE);
        let mut coeffs = Vec4::ZERO;
        let t = m.trace();
        if t > T::ZERO {
            let s = (t + T::ONE).sqrt();
            coeffs[3] = half * s;
            let s = half / s;
            coeffs[0] = (m[(2, 1)] - m[(1, 2)]) * s;
            coeffs[1] = (m[(0, 2)] - m[(2, 0)]) * s;
            coeffs[2] = (m[(1, 0)] - m[(0, 1)]) * s;
        } else {
            let mut i = 0;
            if m[(1, 1)] > m[(0, 0)] {
                i = 1;
            }
            if m[(2, 2)] > m[(i, i)] {
                i = 2;
            }
            let j = (i + 1) % 3;
            let k = (j + 1) % 3;
            let s = (m[(i, i)] - m[(j, j)] - m[(k, k)] + T::ONE).sqrt();
            coeffs[i] = half * s;
            let s = half / s;
            coeffs[3] = (m[(k, j)] - m[(j, k)]) * s;
            coeffs[j] = (m[(j, i)] + m[(i, j)]) * s;
            coeffs[k] = (m[(k, i)] + m[(i, k)]) * s;
        }
        Self { coeffs }
    }

    /// Creates the rotation that maps the direction of `a` onto the
    /// direction of `b`.
    ///
    /// Neither input needs to be normalized, but both must be non-zero.
    /// When the directions are (nearly) opposite, the rotation axis is not
    /// determined by a cross product; any axis orthogonal to both works and
    /// one is recovered from the null space of the pair.
    pub fn from_two_vectors(a: Vec3<T>, b: Vec3<T>) -> Self {
        let half = T::ONE / (T::ONE + T::ONE);
        let v0 = a.normalize();
        let v1 = b.normalize();
        let c = v0.dot(v1);

        if c < -T::ONE + T::epsilon() {
            log::trace!("near-antipodal directions, recovering rotation axis from null space");
            let c = c.max(-T::ONE);
            let gram = Mat3::from_fn(|i, j| v0[i] * v0[j] + v1[i] * v1[j]);
            let axis = smallest_eigenvector3(gram);
            let w2 = (T::ONE + c) * half;
            let vec = axis * (T::ONE - w2).sqrt();
            Self::from_vec(vec4(vec.x(), vec.y(), vec.z(), w2.sqrt()))
        } else {
            let axis = v0.cross(v1);
            let s = ((T::ONE + c) * (T::ONE + T::ONE)).sqrt();
            let vec = axis / s;
            Self::from_vec(vec4(vec.x(), vec.y(), vec.z(), s * half))
        }
    }
}

impl<T: RealScalar + Sqrt + Trig> Quat<T> {
    /// Creates the rotation of `angle` radians around `axis`.
    ///
    /// `axis` must have unit length.
    pub fn from_angle_axis(angle: T, axis: Vec3<T>) -> Self {
        let half_angle = angle / (T::ONE + T::ONE);
        let vec = axis * half_angle.sin();
        Self::from_vec(vec4(vec.x(), vec.y(), vec.z(), half_angle.cos()))
    }

    /// The rotation of `angle` radians around the X axis.
    pub fn from_rotation_x(angle: T) -> Self {
        Self::from_angle_axis(angle, Vec3::X)
    }

    /// The rotation of `angle` radians around the Y axis.
    pub fn from_rotation_y(angle: T) -> Self {
        Self::from_angle_axis(angle, Vec3::Y)
    }

    /// The rotation of `angle` radians around the Z axis.
    pub fn from_rotation_z(angle: T) -> Self {
        Self::from_angle_axis(angle, Vec3::Z)
    }

    /// Spherical linear interpolation from `self` (at `t = 0`) to `other`
    /// (at `t = 1`), along the shorter of the two arcs.
    ///
    /// When the rotations are nearly identical the interpolation angle
    /// underflows and a linear interpolation of the coefficients is used
    /// instead.
    pub fn slerp(&self, t: T, other: &Self) -> Self {
        let d = self.dot(*other);
        let abs_d = d.abs();

        let (scale0, scale1) = if abs_d >= T::ONE - T::epsilon() {
            log::trace!("near-parallel rotations, falling back to linear interpolation");
            (T::ONE - t, t)
        } else {
            let theta = abs_d.acos();
            let sin_theta = theta.sin();
            let scale0 = ((T::ONE - t) * theta).sin() / sin_theta;
            let scale1 = (t * theta).sin() / sin_theta;
            // Negating one operand keeps the interpolation on the shorter arc.
            let scale1 = if d < T::ZERO { -scale1 } else { scale1 };
            (scale0, scale1)
        };

        Self::from_vec(self.coeffs * scale0 + other.coeffs * scale1)
    }

    /// The angle of the rotation taking `self` to `other`, in [0, π].
    ///
    /// Antipodal coefficient vectors encode the same rotation, so their
    /// distance is zero.
    pub fn angular_distance(&self, other: &Self) -> T {
        let d = self.dot(*other).abs().min(T::ONE);
        (T::ONE + T::ONE) * d.acos()
    }
}

/// Hamilton product; composes rotations so that `(a * b)` applies `b`
/// first, then `a`.
impl<T: Scalar> Mul for Quat<T> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let (x1, y1, z1, w1) = (self.x(), self.y(), self.z(), self.w());
        let (x2, y2, z2, w2) = (rhs.x(), rhs.y(), rhs.z(), rhs.w());
        Self::new(
            w1 * w2 - x1 * x2 - y1 * y2 - z1 * z2,
            w1 * x2 + x1 * w2 + y1 * z2 - z1 * y2,
            w1 * y2 + y1 * w2 + z1 * x2 - x1 * z2,
            w1 * z2 + z1 * w2 + x1 * y2 - y1 * x2,
        )
    }
}

impl<T: Scalar> MulAssign for Quat<T> {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<T: Scalar + fmt::Debug> fmt::Debug for Quat<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Quat")
            .field("x", &self.x())
            .field("y", &self.y())
            .field("z", &self.z())
            .field("w", &self.w())
            .finish()
    }
}

impl<T: ApproxEq> ApproxEq for Quat<T> {
    type Tolerance = T::Tolerance;

    fn abs_diff_eq(&self, other: &Self, abs_tolerance: Self::Tolerance) -> bool {
        self.coeffs.abs_diff_eq(&other.coeffs, abs_tolerance)
    }

    fn rel_diff_eq(&self, other: &Self, rel_tolerance: Self::Tolerance) -> bool {
        self.coeffs.rel_diff_eq(&other.coeffs, rel_tolerance)
    }
}

/// Computes the unit eigenvector belonging to the smallest eigenvalue of a
/// symmetric 3x3 matrix, by cyclic Jacobi rotations.
fn smallest_eigenvector3<T: RealScalar + Sqrt>(mut a: Mat3<T>) -> Vec3<T> {
    let mut v = Mat3::IDENTITY;
    for _ in 0..10 {
        let off = a[(0, 1)].abs() + a[(0, 2)].abs() + a[(1, 2)].abs();
        if off == T::ZERO || off.is_negligible(a.trace()) {
            break;
        }
        for (p, q) in [(0, 1), (0, 2), (1, 2)] {
            let apq = a[(p, q)];
            if apq == T::ZERO {
                continue;
            }
            let tau = (a[(q, q)] - a[(p, p)]) / ((T::ONE + T::ONE) * apq);
            let t = if tau >= T::ZERO {
                T::ONE / (tau + (T::ONE + tau * tau).sqrt())
            } else {
                -T::ONE / (-tau + (T::ONE + tau * tau).sqrt())
            };
            let c = T::ONE / (T::ONE + t * t).sqrt();
            let s = t * c;

            let mut g = Mat3::IDENTITY;
            g[(p, p)] = c;
            g[(q, q)] = c;
            g[(p, q)] = s;
            g[(q, p)] = -s;
            a = g.transpose() * a * g;
            v = v * g;
        }
    }

    let mut min = 0;
    for i in 1..3 {
        if a[(i, i)] < a[(min, min)] {
            min = i;
        }
    }
    v.col(min).normalize()
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use super::*;
    use crate::{assert_approx_eq, vec3, Mat3};

    fn random_rotation(rng: &mut fastrand::Rng) -> Quatd {
        let axis = vec3(f64::random(rng), f64::random(rng), f64::random(rng)).normalize();
        Quat::from_angle_axis(f64::random(rng), axis)
    }

    #[test]
    fn identity() {
        let v = vec3(1.0, -2.0, 3.0);
        assert_eq!(Quatd::IDENTITY.transform_vector(v), v);
        assert_eq!(Quatd::IDENTITY.to_rotation_matrix(), Mat3::IDENTITY);
        assert_eq!(Quatd::IDENTITY * Quatd::IDENTITY, Quatd::IDENTITY);
    }

    #[test]
    fn axis_rotations() {
        let q = Quatd::from_rotation_z(FRAC_PI_2);
        let rotated = q.transform_vector(Vec3::X);
        assert_approx_eq!(rotated, Vec3::Y).abs(1e-12);

        let q = Quatd::from_rotation_x(PI);
        let rotated = q.transform_vector(Vec3::Y);
        assert_approx_eq!(rotated, -Vec3::<f64>::Y).abs(1e-12);

        let q = Quatd::from_rotation_y(FRAC_PI_2);
        let rotated = q.transform_vector(Vec3::Z);
        assert_approx_eq!(rotated, Vec3::X).abs(1e-12);
    }

    #[test]
    fn matrix_and_vector_transform_agree() {
        let mut rng = fastrand::Rng::with_seed(0xf00d);
        for _ in 0..20 {
            let q = random_rotation(&mut rng);
            let v = vec3(f64::random(&mut rng), f64::random(&mut rng), f64::random(&mut rng));
            let by_matrix = q.to_rotation_matrix() * v;
            let direct = q.transform_vector(v);
            assert_approx_eq!(by_matrix, direct).abs(1e-9);
        }
    }

    #[test]
    fn rotation_matrix_is_orthonormal() {
        let mut rng = fastrand::Rng::with_seed(0xbeef);
        for _ in 0..20 {
            let r = random_rotation(&mut rng).to_rotation_matrix();
            assert_approx_eq!(r * r.transpose(), Mat3::IDENTITY).abs(1e-12);
            assert_approx_eq!(r.determinant(), 1.0).abs(1e-12);
        }
    }

    #[test]
    fn matrix_round_trip() {
        let mut rng = fastrand::Rng::with_seed(0xcafe);
        for _ in 0..50 {
            let q = random_rotation(&mut rng);
            let back = Quat::from_rotation_matrix(&q.to_rotation_matrix());
            // The round trip may flip the sign of all coefficients.
            assert_approx_eq!(q.angular_distance(&back), 0.0).abs(1e-9);
        }
    }

    #[test]
    fn matrix_round_trip_near_half_turn() {
        // Exercises the diagonal-pivot extraction branch (trace <= 0).
        for axis in [Vec3::X, Vec3::Y, Vec3::Z, vec3(1.0, 1.0, 0.0).normalize()] {
            let q = Quatd::from_angle_axis(PI - 1e-3, axis);
            let back = Quat::from_rotation_matrix(&q.to_rotation_matrix());
            assert_approx_eq!(q.angular_distance(&back), 0.0).abs(1e-9);
        }
    }

    #[test]
    fn hamilton_product_composes() {
        let mut rng = fastrand::Rng::with_seed(0x900d);
        let a = random_rotation(&mut rng);
        let b = random_rotation(&mut rng);
        let v = vec3(1.0, 2.0, 3.0);

        let composed = (a * b).transform_vector(v);
        let sequential = a.transform_vector(b.transform_vector(v));
        assert_approx_eq!(composed, sequential).abs(1e-9);
    }

    #[test]
    fn inverse_undoes_rotation() {
        let mut rng = fastrand::Rng::with_seed(0x1234);
        let q = random_rotation(&mut rng);
        let v = vec3(4.0, -1.0, 0.5);
        let back = q.inverse().transform_vector(q.transform_vector(v));
        assert_approx_eq!(back, v).abs(1e-9);

        let id = q * q.inverse();
        assert_approx_eq!(id.coeffs(), Quatd::IDENTITY.coeffs()).abs(1e-12);

        // Conjugate equals inverse for unit quaternions.
        assert_approx_eq!(q.conjugate().coeffs(), q.inverse().coeffs()).abs(1e-12);
    }

    #[test]
    fn zero_quaternion_inverse_is_zero() {
        let zero = Quatd::from_vec(Vec4::ZERO);
        assert_eq!(zero.inverse(), zero);
    }

    #[test]
    fn slerp_endpoints_and_midpoint() {
        let a = Quatd::from_rotation_z(0.0);
        let b = Quatd::from_rotation_z(1.0);

        assert_approx_eq!(a.slerp(0.0, &b).coeffs(), a.coeffs()).abs(1e-12);
        assert_approx_eq!(a.slerp(1.0, &b).coeffs(), b.coeffs()).abs(1e-12);

        let mid = a.slerp(0.5, &b);
        let expected = Quatd::from_rotation_z(0.5);
        assert_approx_eq!(mid.coeffs(), expected.coeffs()).abs(1e-12);
    }

    #[test]
    fn slerp_of_nearly_identical_rotations() {
        let a = Quatd::from_rotation_x(0.5);
        let b = Quatd::from_rotation_x(0.5 + 1e-14);
        let mid = a.slerp(0.25, &b);
        assert_approx_eq!(mid.angular_distance(&a), 0.0).abs(1e-9);
    }

    #[test]
    fn slerp_between_opposite_coefficient_vectors() {
        // Antipodal coefficient vectors encode the same rotation and have
        // dot = -1, so this takes the linear-interpolation branch. The
        // endpoints must still be hit coefficient-wise.
        let a = Quatd::from_rotation_z(0.5);
        let b = Quatd::from_vec(a.coeffs() * -1.0);
        assert_approx_eq!(a.slerp(0.0, &b).coeffs(), a.coeffs()).abs(1e-12);
        assert_approx_eq!(a.slerp(1.0, &b).coeffs(), b.coeffs()).abs(1e-12);
    }

    #[test]
    fn slerp_takes_shorter_arc() {
        let a = Quatd::from_rotation_z(0.2);
        let b = Quatd::from_rotation_z(0.8);
        // Negate b's coefficients; same rotation, opposite hemisphere.
        let b_neg = Quatd::from_vec(b.coeffs() * -1.0);
        let mid = a.slerp(0.5, &b_neg);
        assert_approx_eq!(mid.angular_distance(&Quatd::from_rotation_z(0.5)), 0.0).abs(1e-9);
    }

    #[test]
    fn angular_distance_properties() {
        let a = Quatd::from_rotation_z(0.3);
        let b = Quatd::from_rotation_z(1.0);
        assert_approx_eq!(a.angular_distance(&b), 0.7).abs(1e-12);

        let neg = Quatd::from_vec(a.coeffs() * -1.0);
        assert_approx_eq!(a.angular_distance(&neg), 0.0).abs(1e-9);
    }

    #[test]
    fn from_two_vectors_maps_direction() {
        let mut rng = fastrand::Rng::with_seed(0xabcd);
        for _ in 0..20 {
            let a = vec3(f64::random(&mut rng), f64::random(&mut rng), f64::random(&mut rng));
            let b = vec3(f64::random(&mut rng), f64::random(&mut rng), f64::random(&mut rng));
            if a.length2() < 1e-6 || b.length2() < 1e-6 {
                continue;
            }
            let q = Quat::from_two_vectors(a, b);
            assert_approx_eq!(q.length(), 1.0).abs(1e-9);
            let mapped = q.transform_vector(a.normalize());
            assert_approx_eq!(mapped, b.normalize()).abs(1e-9);
        }
    }

    #[test]
    fn from_two_vectors_parallel() {
        let v = vec3(0.3, -0.4, 1.2);
        let q = Quatd::from_two_vectors(v, v * 5.0);
        assert_approx_eq!(q.angular_distance(&Quatd::IDENTITY), 0.0).abs(1e-9);
    }

    #[test]
    fn from_two_vectors_antipodal() {
        for (a, b) in [
            (Vec3::<f64>::X, -Vec3::<f64>::X),
            (Vec3::<f64>::Z, -Vec3::<f64>::Z),
            (vec3(1.0, 2.0, -0.5), vec3(-2.0, -4.0, 1.0)),
        ] {
            let q = Quat::from_two_vectors(a, b);
            assert_approx_eq!(q.length(), 1.0).abs(1e-9);
            let mapped = q.transform_vector(a.normalize());
            assert_approx_eq!(mapped, b.normalize()).abs(1e-6);
        }
    }

    #[test]
    fn smallest_eigenvector() {
        // diag(3, 1, 2): the smallest eigenvalue belongs to the Y axis.
        let m = Mat3::from_rows([[3.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 2.0]]);
        let v = smallest_eigenvector3(m);
        assert_approx_eq!(v.y().abs(), 1.0).abs(1e-9);

        // Gram matrix of the X axis: null space spans the Y/Z plane.
        let gram = Mat3::from_rows([[1.0, 0.0, 0.0], [0.0, 0.0, 0.0], [0.0, 0.0, 0.0]]);
        let v = smallest_eigenvector3(gram);
        assert_approx_eq!(v.x(), 0.0).abs(1e-9);
        assert_approx_eq!(v.length(), 1.0).abs(1e-9);
    }
}
