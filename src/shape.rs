use std::fmt;

#[cold]
fn capacity_overflow() -> ! {
    panic!("capacity overflow");
}

/// Row and column extent of a matrix.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: usize,
    columns: usize,
}

impl Shape {
    pub fn new(rows: usize, columns: usize) -> Shape {
        Shape { rows, columns }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn dims2(&self) -> (usize, usize) {
        (self.rows, self.columns)
    }

    /// `rows * columns`, or `None` if it does not fit in a `usize`.
    pub fn checked_elem_count(&self) -> Option<usize> {
        self.rows.checked_mul(self.columns)
    }

    /// # Panics
    ///
    /// Panics with "capacity overflow" if `rows * columns` overflows.
    pub fn elem_count(&self) -> usize {
        match self.checked_elem_count() {
            Some(n) => n,
            None => capacity_overflow(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.columns == 0
    }

    /// Shape with rows and columns swapped.
    pub fn transposed(&self) -> Shape {
        Shape::new(self.columns, self.rows)
    }

    // row-major: [r, c] => strides [c, 1]
    pub fn strides(&self) -> (usize, usize) {
        (self.columns, 1)
    }

    pub(crate) fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.columns
    }

    #[inline]
    pub(crate) fn offset(&self, row: usize, col: usize) -> usize {
        let (rs, cs) = self.strides();
        row * rs + col * cs
    }

    /// Shape of `self * rhs`, if the inner dimensions agree.
    pub(crate) fn matmul(&self, rhs: &Shape) -> Option<Shape> {
        if self.columns == rhs.rows {
            Some(Shape::new(self.rows, rhs.columns))
        } else {
            None
        }
    }
}

impl From<(usize, usize)> for Shape {
    fn from((rows, columns): (usize, usize)) -> Self {
        Shape::new(rows, columns)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset() {
        let s = Shape::new(3, 2);
        assert_eq!(s.strides(), (2, 1));
        assert_eq!(s.offset(0, 0), 0);
        assert_eq!(s.offset(1, 1), 3);
        assert_eq!(s.offset(2, 1), 5);
    }

    #[test]
    fn test_contains() {
        let s = Shape::new(2, 3);
        assert!(s.contains(1, 2));
        assert!(!s.contains(2, 0));
        assert!(!s.contains(0, 3));
        assert!(!Shape::new(0, 0).contains(0, 0));
    }

    #[test]
    fn test_matmul_shape() {
        let a = Shape::new(2, 3);
        let b = Shape::new(3, 4);
        assert_eq!(a.matmul(&b), Some(Shape::new(2, 4)));
        assert_eq!(b.matmul(&a), None);
        assert_eq!(a.transposed(), Shape::new(3, 2));
    }

    #[test]
    fn test_empty() {
        assert!(Shape::new(0, 5).is_empty());
        assert!(Shape::new(5, 0).is_empty());
        assert_eq!(Shape::new(5, 0).rows(), 5);
        assert_eq!(Shape::from((2, 2)).elem_count(), 4);
        assert!(Shape::new(usize::MAX, 0).is_empty());
    }

    #[test]
    fn test_checked_elem_count() {
        assert_eq!(Shape::new(3, 4).checked_elem_count(), Some(12));
        assert_eq!(Shape::new(usize::MAX, 0).checked_elem_count(), Some(0));
        assert_eq!(Shape::new(usize::MAX / 2 + 1, 2).checked_elem_count(), None);
    }

    #[test]
    #[should_panic(expected = "capacity overflow")]
    fn test_elem_count_overflow_panics() {
        let _ = Shape::new(usize::MAX / 2 + 1, 2).elem_count();
    }
}
