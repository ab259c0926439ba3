//! A generic dense matrix value type.
//!
//! [`Matrix`] owns a row-major block of elements and exposes element access,
//! arithmetic (`+`, `-`, matrix product `*`, [`Matrix::scalar`],
//! [`Matrix::transpose`]) and aggregates ([`Matrix::sum`], [`Matrix::avg`]).
//! Every arithmetic operation returns a new matrix; operands are never
//! mutated. Failures come back as [`GError`] through [`GResult`].
//!
//! ```
//! use dmatrix::{mat, GResult};
//!
//! fn main() -> GResult<()> {
//!     let a = mat![[1, 2], [3, 4]];
//!     let b = mat![[5, 6], [7, 8]];
//!     assert_eq!((&a * &b)?, mat![[19, 22], [43, 50]]);
//!     assert_eq!(a.avg()?, 2.5);
//!     Ok(())
//! }
//! ```
#[macro_use]
mod macros;
mod error;
mod op;
mod shape;

pub use crate::error::{GError, GResult};
pub use crate::shape::Shape;
use num_traits::Zero;
use std::fmt;
use std::io;
use std::ops::{AddAssign, Index, IndexMut, Mul, Sub};

/// Capabilities an element type needs for matrix arithmetic.
///
/// `Zero` brings the additive identity and `+`; the product accumulates with
/// `+=`.
pub trait Element: Clone + Zero + Sub<Output = Self> + Mul<Output = Self> + AddAssign {}

impl<T> Element for T where T: Clone + Zero + Sub<Output = T> + Mul<Output = T> + AddAssign {}

/// Dense `rows x columns` matrix stored row-major in a single owned buffer.
///
/// Storage always holds exactly `rows * columns` elements; every constructor
/// establishes it, so there is no uninitialized state to check for. A matrix
/// with zero rows or zero columns holds nothing but still reports its
/// dimensions.
#[derive(PartialEq, Eq, Hash)]
pub struct Matrix<A> {
    data: Vec<A>,
    shape: Shape,
}

impl<A> Matrix<A> {
    pub(crate) fn from_parts(data: Vec<A>, shape: Shape) -> Self {
        debug_assert_eq!(Some(data.len()), shape.checked_elem_count());
        Self { data, shape }
    }

    /// `rows x columns` matrix with every cell set to zero.
    pub fn new(rows: usize, columns: usize) -> Self
    where
        A: Clone + Zero,
    {
        Self::from_elem(rows, columns, A::zero())
    }

    pub fn zeros(rows: usize, columns: usize) -> Self
    where
        A: Clone + Zero,
    {
        Self::new(rows, columns)
    }

    /// # Panics
    ///
    /// Panics with "capacity overflow" if `rows * columns` overflows, like
    /// `Vec` does.
    pub fn from_elem(rows: usize, columns: usize, elem: A) -> Self
    where
        A: Clone,
    {
        let shape = Shape::new(rows, columns);
        Self::from_parts(vec![elem; shape.elem_count()], shape)
    }

    /// Deep-copies a grid of exactly `rows` rows holding `columns` elements
    /// each.
    ///
    /// ```
    /// use dmatrix::Matrix;
    ///
    /// let grid = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
    /// let m = Matrix::new_from(&grid, 2, 2).unwrap();
    /// assert_eq!(m[(1, 0)], 3.0);
    /// assert!(Matrix::new_from(&grid, 2, 3).is_err());
    /// ```
    pub fn new_from<R>(source: &[R], rows: usize, columns: usize) -> GResult<Self>
    where
        A: Clone,
        R: AsRef<[A]>,
    {
        let shape = Shape::new(rows, columns);
        let count = match shape.checked_elem_count() {
            Some(n) if source.len() == rows => n,
            _ => {
                let e = GError::SourceShape {
                    expected: shape,
                    rows: source.len(),
                    bad_row: None,
                };
                log::debug!("new_from rejected: {}", e);
                return Err(e);
            }
        };
        let mut data = Vec::with_capacity(count);
        for (i, row) in source.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != columns {
                let e = GError::SourceShape {
                    expected: shape,
                    rows: source.len(),
                    bad_row: Some((i, row.len())),
                };
                log::debug!("new_from rejected: {}", e);
                return Err(e);
            }
            data.extend_from_slice(row);
        }
        Ok(Self::from_parts(data, shape))
    }

    /// Takes ownership of a flat row-major buffer.
    pub fn from_vec(rows: usize, columns: usize, v: Vec<A>) -> GResult<Self> {
        let shape = Shape::new(rows, columns);
        if shape.checked_elem_count() != Some(v.len()) {
            let e = GError::SourceShape {
                expected: shape,
                rows: if columns == 0 { 0 } else { v.len() / columns },
                bad_row: None,
            };
            log::debug!("from_vec rejected: {}", e);
            return Err(e);
        }
        Ok(Self::from_parts(v, shape))
    }

    pub fn rows(&self) -> usize {
        self.shape.rows()
    }

    pub fn columns(&self) -> usize {
        self.shape.columns()
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Number of elements, `rows * columns`.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn check_index(&self, row: usize, col: usize) -> GResult<usize> {
        if self.shape.contains(row, col) {
            Ok(self.shape.offset(row, col))
        } else {
            Err(GError::IndexOutOfRange {
                row,
                col,
                shape: self.shape,
            })
        }
    }

    pub fn at(&self, row: usize, col: usize) -> GResult<&A> {
        let i = self.check_index(row, col)?;
        Ok(&self.data[i])
    }

    pub fn at_mut(&mut self, row: usize, col: usize) -> GResult<&mut A> {
        let i = self.check_index(row, col)?;
        Ok(&mut self.data[i])
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&A> {
        self.at(row, col).ok()
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut A> {
        self.at_mut(row, col).ok()
    }

    fn row_range(&self, row: usize) -> std::ops::Range<usize> {
        let start = self.shape.offset(row, 0);
        start..start + self.columns()
    }

    pub fn row(&self, row: usize) -> GResult<&[A]> {
        if row >= self.rows() {
            return Err(GError::IndexOutOfRange {
                row,
                col: 0,
                shape: self.shape,
            });
        }
        Ok(&self.data[self.row_range(row)])
    }

    pub fn row_mut(&mut self, row: usize) -> GResult<&mut [A]> {
        if row >= self.rows() {
            return Err(GError::IndexOutOfRange {
                row,
                col: 0,
                shape: self.shape,
            });
        }
        let r = self.row_range(row);
        Ok(&mut self.data[r])
    }

    /// Row slices, top to bottom.
    pub fn rows_iter(&self) -> impl Iterator<Item = &[A]> + '_ {
        (0..self.rows()).map(move |i| &self.data[self.row_range(i)])
    }

    /// Elements in row-major order.
    pub fn iter(&self) -> std::slice::Iter<'_, A> {
        self.data.iter()
    }

    pub fn as_slice(&self) -> &[A] {
        &self.data
    }

    pub fn as_slice_mut(&mut self) -> &mut [A] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<A> {
        self.data
    }

    /// Writes the grid to `w`: elements separated by a space, one row per
    /// line.
    pub fn write_to<W: io::Write>(&self, w: &mut W) -> io::Result<()>
    where
        A: fmt::Display,
    {
        write!(w, "{}", self)
    }

    /// Prints the grid to stdout.
    pub fn print(&self)
    where
        A: fmt::Display,
    {
        print!("{}", self);
    }
}

impl<A: Clone> Clone for Matrix<A> {
    fn clone(&self) -> Self {
        Self::from_parts(self.data.clone(), self.shape)
    }

    // Assignment: reuse the destination's buffer.
    fn clone_from(&mut self, source: &Self) {
        self.data.clone_from(&source.data);
        self.shape = source.shape;
    }
}

impl<A> Default for Matrix<A> {
    fn default() -> Self {
        Self::from_parts(Vec::new(), Shape::default())
    }
}

impl<A, const N: usize> From<Vec<[A; N]>> for Matrix<A> {
    fn from(xs: Vec<[A; N]>) -> Self {
        let shape = Shape::new(xs.len(), N);
        let data = xs.into_iter().flatten().collect();
        Self::from_parts(data, shape)
    }
}

impl<A> Index<(usize, usize)> for Matrix<A> {
    type Output = A;

    fn index(&self, (row, col): (usize, usize)) -> &A {
        match self.check_index(row, col) {
            Ok(i) => &self.data[i],
            Err(e) => panic!("{}", e),
        }
    }
}

impl<A> IndexMut<(usize, usize)> for Matrix<A> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut A {
        match self.check_index(row, col) {
            Ok(i) => &mut self.data[i],
            Err(e) => panic!("{}", e),
        }
    }
}

impl<A> Index<usize> for Matrix<A> {
    type Output = [A];

    fn index(&self, row: usize) -> &[A] {
        match self.row(row) {
            Ok(r) => r,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<A> IndexMut<usize> for Matrix<A> {
    fn index_mut(&mut self, row: usize) -> &mut [A] {
        match self.row_mut(row) {
            Ok(r) => r,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<A: fmt::Display> fmt::Display for Matrix<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows_iter() {
            for (j, x) in row.iter().enumerate() {
                if j > 0 {
                    f.write_str(" ")?;
                }
                fmt::Display::fmt(x, f)?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}

impl<A: fmt::Debug> fmt::Debug for Matrix<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, row) in self.rows_iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str("[")?;
            for (j, x) in row.iter().enumerate() {
                if j > 0 {
                    f.write_str(", ")?;
                }
                fmt::Debug::fmt(x, f)?;
            }
            f.write_str("]")?;
        }
        f.write_str("]")
    }
}
