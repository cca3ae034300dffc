//! A small linear-algebra evaluation engine.
//!
//! # Motivation
//!
//! Matrix arithmetic written naively allocates a temporary for every
//! intermediate result. This crate instead represents matrix and vector
//! arithmetic as composable, lazily-evaluated *expressions* ([`Xpr`]): an
//! expression captures references to its operands and an operation tag, and
//! no element is computed until the expression is assigned into a
//! destination or materialized with [`Xpr::eval`].
//!
//! On top of the expression engine sits a quaternion rotation module
//! ([`Quat`]) for 3D orientation math. Quaternions are fixed-size (4
//! coefficients) and evaluate eagerly; laziness buys nothing at that size.
//!
//! # Goals & Non-Goals
//!
//! - Support both fixed and dynamic dimensions through a single storage
//!   type ([`Mat`]) whose per-axis [`Extent`] is either pinned at
//!   construction (`Fixed`) or freely resizable (`Dyn`).
//! - Be generic over the element type through a small capability trait set
//!   ([`Scalar`]), including complex scalars, but don't try to support
//!   non-[`Copy`] numeric types.
//! - Dimension mismatches and out-of-range views are programmer errors and
//!   panic immediately; numeric degeneracies (zero-norm inverse, antipodal
//!   alignment, near-parallel slerp) have defined fallback values and never
//!   panic.
//! - No SIMD dispatch, sparse storage, or serialization.

pub mod approx;
mod mat;
mod matrix;
mod quat;
mod scalar;
mod storage;
mod vector;
mod view;
pub mod xpr;

pub use mat::*;
pub use matrix::*;
pub use quat::*;
pub use scalar::*;
pub use storage::*;
pub use vector::*;
pub use view::*;
pub use xpr::Xpr;
