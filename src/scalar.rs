//! Scalar capabilities required by the matrix and quaternion types.
//!
//! Every algorithm in this crate is written against the small trait set in
//! this module rather than against concrete number types. [`Scalar`] is the
//! full capability bundle (including complex numbers); [`RealScalar`] adds
//! ordering for the scalars that have one.

use std::ops;

use num_complex::Complex;

/// Types that have a "zero" value (an additive identity).
pub trait Zero {
    /// The *0* value of this type.
    const ZERO: Self;
}

/// Types that have a "one" value (a multiplicative identity).
pub trait One {
    /// The *1* value of this type.
    const ONE: Self;
}

/// Types that support computing their square root.
pub trait Sqrt {
    fn sqrt(self) -> Self;
}

/// Types that support the trigonometric functions needed by rotations.
pub trait Trig {
    /// Computes the sine of the angle `self` (in radians).
    fn sin(self) -> Self;
    /// Computes the cosine of the angle `self` (in radians).
    fn cos(self) -> Self;
    /// Computes the arccosine of `self`, in radians.
    fn acos(self) -> Self;
}

/// Types that support a `min` and `max` operation.
pub trait MinMax: Sized {
    fn min(self, other: Self) -> Self;
    fn max(self, other: Self) -> Self;
    fn clamp(self, min: Self, max: Self) -> Self {
        self.max(min).min(max)
    }
}

/// The full scalar capability bundle.
///
/// Everything the storage, expression, and quaternion layers require of an
/// element type: arithmetic, magnitude, an approximate-equality predicate,
/// and a way to draw a random value from a caller-supplied generator.
///
/// The random range is uniform in [-10, 10], which keeps products of a few
/// random matrices comfortably inside every supported type's range.
pub trait Scalar:
    Zero
    + One
    + ops::Neg<Output = Self>
    + ops::Add<Output = Self>
    + ops::Sub<Output = Self>
    + ops::Mul<Output = Self>
    + ops::Div<Output = Self>
    + PartialEq
    + Copy
{
    /// The underlying real type; `Self` for non-complex scalars.
    type Real: RealScalar;

    /// The comparison tolerance of this type. Zero for integer scalars, so
    /// that [`Scalar::is_approx`] degrades to exact equality.
    fn epsilon() -> Self::Real;
    /// The real part of `self`.
    fn re(self) -> Self::Real;
    /// The imaginary part of `self` (zero for real scalars).
    fn im(self) -> Self::Real;
    /// The complex conjugate (`self` for real scalars).
    fn conj(self) -> Self;
    /// The magnitude of `self`.
    fn abs(self) -> Self::Real;
    /// The squared magnitude of `self`. For complex scalars this is the sum
    /// of squares of the components.
    fn abs2(self) -> Self::Real;
    /// Draws a value uniformly from [-10, 10]. Complex scalars draw each
    /// component independently.
    fn random(rng: &mut fastrand::Rng) -> Self;

    /// Approximate equality: `|a - b| <= min(|a|, |b|) * epsilon` for
    /// floating types, exact equality for integer types.
    fn is_approx(self, other: Self) -> bool;

    /// Whether `self` is negligible compared to `reference`:
    /// `|self| <= |reference| * epsilon`.
    fn is_negligible(self, reference: Self) -> bool {
        !(self.abs() > reference.abs() * Self::epsilon())
    }
}

/// Scalars with a total order on their values (i.e. not complex).
pub trait RealScalar: Scalar<Real = Self> + PartialOrd + MinMax {
    /// `self < other`, or the two are approximately equal.
    fn lt_or_approx(self, other: Self) -> bool {
        self < other || self.is_approx(other)
    }
}

macro_rules! float_scalar {
    ($($t:ty => $eps:expr, $rand:ident;)+) => {
        $(
            impl Zero for $t {
                const ZERO: Self = 0.0;
            }
            impl One for $t {
                const ONE: Self = 1.0;
            }
            impl Sqrt for $t {
                fn sqrt(self) -> Self {
                    self.sqrt()
                }
            }
            impl Trig for $t {
                fn sin(self) -> Self {
                    self.sin()
                }
                fn cos(self) -> Self {
                    self.cos()
                }
                fn acos(self) -> Self {
                    self.acos()
                }
            }
            impl MinMax for $t {
                fn min(self, other: Self) -> Self {
                    self.min(other)
                }
                fn max(self, other: Self) -> Self {
                    self.max(other)
                }
            }
            impl Scalar for $t {
                type Real = $t;

                fn epsilon() -> Self {
                    $eps
                }
                fn re(self) -> Self {
                    self
                }
                fn im(self) -> Self {
                    0.0
                }
                fn conj(self) -> Self {
                    self
                }
                fn abs(self) -> Self {
                    self.abs()
                }
                fn abs2(self) -> Self {
                    self * self
                }
                fn random(rng: &mut fastrand::Rng) -> Self {
                    rng.$rand() * 20.0 - 10.0
                }
                fn is_approx(self, other: Self) -> bool {
                    (self - other).abs() <= self.abs().min(other.abs()) * Self::epsilon()
                }
            }
            impl RealScalar for $t {}
        )+
    };
}
float_scalar! {
    f32 => 1e-5, f32;
    f64 => 1e-11, f64;
}

macro_rules! int_scalar {
    ($($t:ty => $rand:ident;)+) => {
        $(
            impl Zero for $t {
                const ZERO: Self = 0;
            }
            impl One for $t {
                const ONE: Self = 1;
            }
            impl MinMax for $t {
                fn min(self, other: Self) -> Self {
                    Ord::min(self, other)
                }
                fn max(self, other: Self) -> Self {
                    Ord::max(self, other)
                }
            }
            impl Scalar for $t {
                type Real = $t;

                fn epsilon() -> Self {
                    0
                }
                fn re(self) -> Self {
                    self
                }
                fn im(self) -> Self {
                    0
                }
                fn conj(self) -> Self {
                    self
                }
                fn abs(self) -> Self {
                    self.abs()
                }
                fn abs2(self) -> Self {
                    self * self
                }
                fn random(rng: &mut fastrand::Rng) -> Self {
                    rng.$rand(-10..=10)
                }
                fn is_approx(self, other: Self) -> bool {
                    self == other
                }
            }
            impl RealScalar for $t {
                fn lt_or_approx(self, other: Self) -> bool {
                    self <= other
                }
            }
        )+
    };
}
int_scalar! {
    i32 => i32;
    i64 => i64;
}

macro_rules! complex_scalar {
    ($($t:ty;)+) => {
        $(
            impl Zero for Complex<$t> {
                const ZERO: Self = Complex { re: 0.0, im: 0.0 };
            }
            impl One for Complex<$t> {
                const ONE: Self = Complex { re: 1.0, im: 0.0 };
            }
            impl Scalar for Complex<$t> {
                type Real = $t;

                fn epsilon() -> $t {
                    <$t>::epsilon()
                }
                fn re(self) -> $t {
                    self.re
                }
                fn im(self) -> $t {
                    self.im
                }
                fn conj(self) -> Self {
                    Complex::new(self.re, -self.im)
                }
                fn abs(self) -> $t {
                    self.abs2().sqrt()
                }
                fn abs2(self) -> $t {
                    self.re * self.re + self.im * self.im
                }
                fn random(rng: &mut fastrand::Rng) -> Self {
                    Complex::new(<$t>::random(rng), <$t>::random(rng))
                }
                fn is_approx(self, other: Self) -> bool {
                    (self - other).abs() <= self.abs().min(other.abs()) * Self::epsilon()
                }
            }
        )+
    };
}
complex_scalar! {
    f32;
    f64;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approx_predicates() {
        assert!(1.0f64.is_approx(1.0 + 1e-13));
        assert!(!1.0f64.is_approx(1.001));
        assert!(3i32.is_approx(3));
        assert!(!3i32.is_approx(4));

        // Relative to `min(|a|, |b|)`, so two tiny numbers of opposing sign
        // are not approximately equal.
        assert!(!1e-20f64.is_approx(-1e-20));
    }

    #[test]
    fn negligible() {
        assert!(1e-9f32.is_negligible(1.0));
        assert!(!0.1f32.is_negligible(1.0));
        assert!(0.0f64.is_negligible(0.0));
    }

    #[test]
    fn lt_or_approx() {
        assert!(1.0f32.lt_or_approx(2.0));
        assert!(1.0f32.lt_or_approx(1.0 + f32::EPSILON));
        assert!(!2.0f32.lt_or_approx(1.0));
        assert!(5i64.lt_or_approx(5));
    }

    #[test]
    fn complex_magnitude() {
        let c = Complex::new(3.0f64, 4.0);
        assert_eq!(c.abs2(), 25.0);
        assert_eq!(Scalar::abs(c), 5.0);
        assert_eq!(c.re(), 3.0);
        assert_eq!(c.im(), 4.0);
        assert_eq!(Scalar::conj(c), Complex::new(3.0, -4.0));
    }

    #[test]
    fn random_range() {
        let mut rng = fastrand::Rng::with_seed(0x7ea);
        for _ in 0..100 {
            let f = f64::random(&mut rng);
            assert!((-10.0..=10.0).contains(&f));
            let i = i32::random(&mut rng);
            assert!((-10..=10).contains(&i));
        }
    }
}
