//! Operator impls that build expression nodes.
//!
//! Every combination of `Xpr` and `&Mat` operands is supported for `+`, `-`
//! and `*`, so matrices lift into the expression layer without an explicit
//! [`Mat::xpr`][crate::Mat::xpr] call at every use site.

use std::ops::{Add, Div, Mul, Neg, Sub};

use super::{BinOp, Xpr};
use crate::{Mat, Scalar};

impl<'a, T: Scalar> From<&'a Mat<T>> for Xpr<'a, T> {
    fn from(mat: &'a Mat<T>) -> Self {
        mat.xpr()
    }
}

macro_rules! elementwise_binop {
    ($trait:ident, $method:ident, $op:expr) => {
        impl<'a, T: Scalar> $trait for Xpr<'a, T> {
            type Output = Xpr<'a, T>;
            fn $method(self, rhs: Xpr<'a, T>) -> Xpr<'a, T> {
                Xpr::binary($op, self, rhs)
            }
        }

        impl<'a, T: Scalar> $trait<&'a Mat<T>> for Xpr<'a, T> {
            type Output = Xpr<'a, T>;
            fn $method(self, rhs: &'a Mat<T>) -> Xpr<'a, T> {
                Xpr::binary($op, self, rhs.xpr())
            }
        }

        impl<'a, T: Scalar> $trait<Xpr<'a, T>> for &'a Mat<T> {
            type Output = Xpr<'a, T>;
            fn $method(self, rhs: Xpr<'a, T>) -> Xpr<'a, T> {
                Xpr::binary($op, self.xpr(), rhs)
            }
        }

        impl<'a, T: Scalar> $trait<&'a Mat<T>> for &'a Mat<T> {
            type Output = Xpr<'a, T>;
            fn $method(self, rhs: &'a Mat<T>) -> Xpr<'a, T> {
                Xpr::binary($op, self.xpr(), rhs.xpr())
            }
        }
    };
}

elementwise_binop!(Add, add, BinOp::Add);
elementwise_binop!(Sub, sub, BinOp::Sub);

// `*` is the matrix product; the element-wise product is `xpr::elem::mul`.
impl<'a, T: Scalar> Mul for Xpr<'a, T> {
    type Output = Xpr<'a, T>;
    fn mul(self, rhs: Xpr<'a, T>) -> Xpr<'a, T> {
        Xpr::product(self, rhs)
    }
}

impl<'a, T: Scalar> Mul<&'a Mat<T>> for Xpr<'a, T> {
    type Output = Xpr<'a, T>;
    fn mul(self, rhs: &'a Mat<T>) -> Xpr<'a, T> {
        Xpr::product(self, rhs.xpr())
    }
}

impl<'a, T: Scalar> Mul<Xpr<'a, T>> for &'a Mat<T> {
    type Output = Xpr<'a, T>;
    fn mul(self, rhs: Xpr<'a, T>) -> Xpr<'a, T> {
        Xpr::product(self.xpr(), rhs)
    }
}

impl<'a, T: Scalar> Mul<&'a Mat<T>> for &'a Mat<T> {
    type Output = Xpr<'a, T>;
    fn mul(self, rhs: &'a Mat<T>) -> Xpr<'a, T> {
        Xpr::product(self.xpr(), rhs.xpr())
    }
}

impl<'a, T: Scalar> Mul<T> for Xpr<'a, T> {
    type Output = Xpr<'a, T>;
    fn mul(self, factor: T) -> Xpr<'a, T> {
        Xpr::Scale {
            src: Box::new(self),
            factor,
        }
    }
}

impl<'a, T: Scalar> Mul<T> for &'a Mat<T> {
    type Output = Xpr<'a, T>;
    fn mul(self, factor: T) -> Xpr<'a, T> {
        self.xpr() * factor
    }
}

impl<'a, T: Scalar> Div<T> for Xpr<'a, T> {
    type Output = Xpr<'a, T>;
    fn div(self, divisor: T) -> Xpr<'a, T> {
        Xpr::ScaleDiv {
            src: Box::new(self),
            divisor,
        }
    }
}

impl<'a, T: Scalar> Div<T> for &'a Mat<T> {
    type Output = Xpr<'a, T>;
    fn div(self, divisor: T) -> Xpr<'a, T> {
        self.xpr() / divisor
    }
}

impl<'a, T: Scalar> Neg for Xpr<'a, T> {
    type Output = Xpr<'a, T>;
    fn neg(self) -> Xpr<'a, T> {
        Xpr::Neg(Box::new(self))
    }
}

impl<'a, T: Scalar> Neg for &'a Mat<T> {
    type Output = Xpr<'a, T>;
    fn neg(self) -> Xpr<'a, T> {
        -self.xpr()
    }
}
