//! Coefficient storage with per-axis fixed or dynamic extents.

use std::fmt;

use crate::Scalar;

/// The size of one matrix axis: pinned at construction time, or resizable.
///
/// A `Fixed` extent plays the role of a compile-time dimension: any attempt
/// to resize the axis to a different value is a programmer error and panics.
/// A `Dyn` extent may be changed freely through [`Storage::resize`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Extent {
    /// An axis whose size never changes.
    Fixed(usize),
    /// An axis whose size may change at runtime.
    Dyn(usize),
}

impl Extent {
    /// The current size of the axis.
    #[inline]
    pub fn get(self) -> usize {
        match self {
            Extent::Fixed(n) | Extent::Dyn(n) => n,
        }
    }

    /// Whether the axis may be resized.
    #[inline]
    pub fn is_dynamic(self) -> bool {
        matches!(self, Extent::Dyn(_))
    }

    fn check(self, new: usize) {
        if let Extent::Fixed(n) = self {
            assert!(
                n == new,
                "attempt to resize a fixed extent from {n} to {new}"
            );
        }
    }

    fn set(&mut self, new: usize) {
        if let Extent::Dyn(n) = self {
            *n = new;
        }
    }
}

impl fmt::Debug for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Extent::Fixed(n) => write!(f, "{n}"),
            Extent::Dyn(n) => write!(f, "{n}?"),
        }
    }
}

/// Owns the coefficient buffer of a matrix.
///
/// Coefficients are stored contiguously in row-major order. The buffer is
/// managed with a grow-only policy: shrinking an extent keeps the existing
/// allocation, and growing one reallocates only when the required element
/// count exceeds what has already been allocated. Repeated
/// grow/shrink cycles on a dynamic matrix therefore amortize to zero
/// allocations.
#[derive(Clone)]
pub struct Storage<T> {
    buf: Vec<T>,
    rows: Extent,
    cols: Extent,
}

impl<T: Scalar> Storage<T> {
    /// Creates zero-filled storage with the given extents.
    ///
    /// # Panics
    ///
    /// Panics if either extent is zero.
    pub fn new(rows: Extent, cols: Extent) -> Self {
        assert!(
            rows.get() > 0 && cols.get() > 0,
            "matrix extents must be positive, got {}x{}",
            rows.get(),
            cols.get()
        );
        Self {
            buf: vec![T::ZERO; rows.get() * cols.get()],
            rows,
            cols,
        }
    }

    /// The current number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows.get()
    }

    /// The current number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols.get()
    }

    /// The extent of the row axis.
    #[inline]
    pub fn row_extent(&self) -> Extent {
        self.rows
    }

    /// The extent of the column axis.
    #[inline]
    pub fn col_extent(&self) -> Extent {
        self.cols
    }

    /// Changes the logical extents of the storage.
    ///
    /// Coefficient values are unspecified afterwards (a resize is always
    /// followed by an assignment in this crate). The allocation is reused
    /// whenever `rows * cols` fits into it; it is never shrunk.
    ///
    /// # Panics
    ///
    /// Panics if an extent is zero, or if an axis with a `Fixed` extent is
    /// given a different size.
    pub fn resize(&mut self, rows: usize, cols: usize) {
        assert!(
            rows > 0 && cols > 0,
            "matrix extents must be positive, got {rows}x{cols}"
        );
        // Validate both axes before touching either, so a failed resize
        // leaves the extents as they were.
        self.rows.check(rows);
        self.cols.check(cols);
        self.rows.set(rows);
        self.cols.set(cols);
        let needed = rows * cols;
        if needed > self.buf.len() {
            self.buf.resize(needed, T::ZERO);
        }
    }

    /// Reads the coefficient at `(row, col)`.
    #[inline]
    pub fn read(&self, row: usize, col: usize) -> T {
        self.check(row, col);
        self.buf[row * self.cols.get() + col]
    }

    /// Returns a mutable reference to the coefficient at `(row, col)`.
    #[inline]
    pub fn write(&mut self, row: usize, col: usize) -> &mut T {
        self.check(row, col);
        &mut self.buf[row * self.cols.get() + col]
    }

    /// The live coefficients in row-major order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.buf[..self.rows.get() * self.cols.get()]
    }

    /// The number of elements the current allocation can hold.
    pub(crate) fn allocated(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    fn check(&self, row: usize, col: usize) {
        assert!(
            row < self.rows.get() && col < self.cols.get(),
            "index ({row}, {col}) out of range for {}x{} matrix",
            self.rows.get(),
            self.cols.get()
        );
    }
}
