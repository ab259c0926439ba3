use crate::error::{GError, GResult};
use crate::{Element, Matrix};
use num_traits::ToPrimitive;

fn mismatch<A>(op: &'static str, lhs: &Matrix<A>, rhs: &Matrix<A>) -> GError {
    let e = GError::DimensionMismatch {
        op,
        lhs: lhs.shape(),
        rhs: rhs.shape(),
    };
    log::debug!("{} rejected: {}", op, e);
    e
}

fn zip_with<A, F>(op: &'static str, lhs: &Matrix<A>, rhs: &Matrix<A>, f: F) -> GResult<Matrix<A>>
where
    A: Clone,
    F: Fn(A, A) -> A,
{
    if lhs.shape() != rhs.shape() {
        return Err(mismatch(op, lhs, rhs));
    }
    log::trace!("{} {}", op, lhs.shape());
    let data = lhs
        .iter()
        .zip(rhs.iter())
        .map(|(x, y)| f(x.clone(), y.clone()))
        .collect();
    Ok(Matrix::from_parts(data, lhs.shape()))
}

impl<A: Element> Matrix<A> {
    /// Element-wise sum. Shapes must be equal.
    pub fn try_add(&self, rhs: &Matrix<A>) -> GResult<Matrix<A>> {
        zip_with("add", self, rhs, |x, y| x + y)
    }

    /// Element-wise difference. Shapes must be equal.
    pub fn try_sub(&self, rhs: &Matrix<A>) -> GResult<Matrix<A>> {
        zip_with("sub", self, rhs, |x, y| x - y)
    }

    /// Matrix product: `r[i][j] = sum over k of self[i][k] * rhs[k][j]`.
    ///
    /// `self.columns()` must equal `rhs.rows()`; the result is
    /// `self.rows() x rhs.columns()`.
    ///
    /// # Panics
    ///
    /// Panics with "capacity overflow" if the result's element count does not
    /// fit in a `usize` (possible only when the shared dimension is zero).
    pub fn matmul(&self, rhs: &Matrix<A>) -> GResult<Matrix<A>> {
        let shape = match self.shape().matmul(&rhs.shape()) {
            Some(s) => s,
            None => return Err(mismatch("matmul", self, rhs)),
        };
        log::trace!("matmul {} * {}", self.shape(), rhs.shape());
        let (m, k) = self.shape().dims2();
        let n = rhs.columns();
        let mut data = Vec::with_capacity(shape.elem_count());
        for i in 0..m {
            let lhs_row = &self.data[i * k..(i + 1) * k];
            for j in 0..n {
                let mut acc = A::zero();
                for (p, x) in lhs_row.iter().enumerate() {
                    acc += x.clone() * rhs.data[p * n + j].clone();
                }
                data.push(acc);
            }
        }
        Ok(Matrix::from_parts(data, shape))
    }

    /// Every cell multiplied by `s`.
    pub fn scalar(&self, s: A) -> Matrix<A> {
        log::trace!("scalar {}", self.shape());
        let data = self.iter().map(|x| x.clone() * s.clone()).collect();
        Matrix::from_parts(data, self.shape())
    }

    /// Sum of every cell, accumulated row-major from zero.
    pub fn sum(&self) -> A {
        self.iter().fold(A::zero(), |mut acc, x| {
            acc += x.clone();
            acc
        })
    }

    /// Mean of every cell, computed in `f64`.
    pub fn avg(&self) -> GResult<f64>
    where
        A: ToPrimitive,
    {
        let n = self.len();
        if n == 0 {
            let e = GError::DivisionByZero { op: "avg" };
            log::debug!("avg rejected on {} matrix", self.shape());
            return Err(e);
        }
        let total = match self.sum().to_f64() {
            Some(t) => t,
            None => {
                let e = GError::Conversion { op: "avg" };
                log::debug!("avg rejected: {}", e);
                return Err(e);
            }
        };
        Ok(total / n as f64)
    }
}

impl<A: Clone> Matrix<A> {
    /// `columns x rows` matrix with `r[i][j] = self[j][i]`.
    pub fn transpose(&self) -> Matrix<A> {
        log::trace!("transpose {}", self.shape());
        let shape = self.shape().transposed();
        let (rows, cols) = self.shape().dims2();
        let mut data = Vec::with_capacity(shape.elem_count());
        for j in 0..cols {
            for i in 0..rows {
                data.push(self.data[i * cols + j].clone());
            }
        }
        Matrix::from_parts(data, shape)
    }
}

macro_rules! impl_binary_op {
    ($trt:ident, $mth:ident, $func:ident) => {
        impl<A: Element> std::ops::$trt<&Matrix<A>> for &Matrix<A> {
            type Output = GResult<Matrix<A>>;
            fn $mth(self, rhs: &Matrix<A>) -> Self::Output {
                self.$func(rhs)
            }
        }

        impl<A: Element> std::ops::$trt<Matrix<A>> for &Matrix<A> {
            type Output = GResult<Matrix<A>>;
            fn $mth(self, rhs: Matrix<A>) -> Self::Output {
                self.$func(&rhs)
            }
        }

        impl<A: Element> std::ops::$trt<&Matrix<A>> for Matrix<A> {
            type Output = GResult<Matrix<A>>;
            fn $mth(self, rhs: &Matrix<A>) -> Self::Output {
                self.$func(rhs)
            }
        }

        impl<A: Element> std::ops::$trt<Matrix<A>> for Matrix<A> {
            type Output = GResult<Matrix<A>>;
            fn $mth(self, rhs: Matrix<A>) -> Self::Output {
                self.$func(&rhs)
            }
        }
    };
}

impl_binary_op!(Add, add, try_add); // +
impl_binary_op!(Sub, sub, try_sub); // -
impl_binary_op!(Mul, mul, matmul); // *

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Shape;
    use half::f16;

    fn a() -> Matrix<i32> {
        mat![[1, 2], [3, 4]]
    }

    fn b() -> Matrix<i32> {
        mat![[5, 6], [7, 8]]
    }

    #[test]
    fn test_add() {
        assert_eq!((a() + b()).unwrap(), mat![[6, 8], [10, 12]]);
        assert_eq!(a().try_add(&b()).unwrap(), mat![[6, 8], [10, 12]]);
    }

    #[test]
    fn test_sub() {
        assert_eq!((&a() - &b()).unwrap(), mat![[-4, -4], [-4, -4]]);
    }

    #[test]
    fn test_operands_untouched() {
        let x = a();
        let y = b();
        let _ = (&x + &y).unwrap();
        let _ = (&x * &y).unwrap();
        let _ = x.scalar(3);
        let _ = x.transpose();
        assert_eq!(x, a());
        assert_eq!(y, b());
    }

    #[test]
    fn test_add_mismatch() {
        let x = mat![[1, 2, 3]];
        let err = (&x + &a()).unwrap_err();
        assert_eq!(
            err,
            GError::DimensionMismatch {
                op: "add",
                lhs: Shape::new(1, 3),
                rhs: Shape::new(2, 2),
            }
        );
        assert!(matches!(
            &x - &a(),
            Err(GError::DimensionMismatch { op: "sub", .. })
        ));
    }

    #[test]
    fn test_matmul() {
        assert_eq!((a() * b()).unwrap(), mat![[19, 22], [43, 50]]);
        assert_eq!((b() * &a()).unwrap(), mat![[23, 34], [31, 46]]);
    }

    #[test]
    fn test_matmul_non_square() {
        let x = mat![[1, 2, 3], [4, 5, 6]];
        let y = mat![[7, 8], [9, 10], [11, 12]];
        let r = (&x * &y).unwrap();
        assert_eq!(r, mat![[58, 64], [139, 154]]);

        let r = (&y * &x).unwrap();
        assert_eq!(r.shape(), Shape::new(3, 3));
        assert_eq!(r[0], [39, 54, 69]);

        let row = mat![[1, 2, 3]];
        let col = mat![[4], [5], [6]];
        assert_eq!((&row * &col).unwrap(), mat![[32]]);
        assert_eq!((&col * &row).unwrap().shape(), Shape::new(3, 3));
    }

    #[test]
    fn test_matmul_mismatch() {
        let x = mat![[1, 2, 3], [4, 5, 6]];
        assert_eq!(
            x.matmul(&x),
            Err(GError::DimensionMismatch {
                op: "matmul",
                lhs: Shape::new(2, 3),
                rhs: Shape::new(2, 3),
            })
        );
    }

    #[test]
    fn test_matmul_empty_inner() {
        let x = Matrix::<i32>::new(2, 0);
        let y = Matrix::<i32>::new(0, 3);
        assert_eq!((&x * &y).unwrap(), Matrix::new(2, 3));
        assert_eq!((&y * &x).unwrap().shape(), Shape::new(0, 0));
    }

    #[test]
    fn test_scalar() {
        assert_eq!(a().scalar(2), mat![[2, 4], [6, 8]]);
        assert_eq!(a().scalar(1), a());
        assert!(a().scalar(0).iter().all(|x| *x == 0));
    }

    #[test]
    fn test_transpose() {
        assert_eq!(a().transpose(), mat![[1, 3], [2, 4]]);
        let x = mat![[1, 2, 3], [4, 5, 6]];
        assert_eq!(x.transpose(), mat![[1, 4], [2, 5], [3, 6]]);
        assert_eq!(Matrix::<i32>::new(0, 4).transpose().shape(), Shape::new(4, 0));
    }

    #[test]
    fn test_sum_avg() {
        assert_eq!(a().sum(), 10);
        assert_eq!(a().avg(), Ok(2.5));
        assert_eq!(Matrix::from_elem(2, 2, 2).avg(), Ok(2.0));
    }

    #[test]
    fn test_avg_empty() {
        assert_eq!(
            Matrix::<f64>::new(0, 0).avg(),
            Err(GError::DivisionByZero { op: "avg" })
        );
        assert!(Matrix::<f64>::new(3, 0).avg().is_err());
        assert_eq!(Matrix::<f64>::new(0, 3).sum(), 0.0);
    }

    #[derive(Clone)]
    struct Opaque(i32);

    impl std::ops::Add for Opaque {
        type Output = Opaque;
        fn add(self, rhs: Opaque) -> Opaque {
            Opaque(self.0 + rhs.0)
        }
    }

    impl std::ops::Sub for Opaque {
        type Output = Opaque;
        fn sub(self, rhs: Opaque) -> Opaque {
            Opaque(self.0 - rhs.0)
        }
    }

    impl std::ops::Mul for Opaque {
        type Output = Opaque;
        fn mul(self, rhs: Opaque) -> Opaque {
            Opaque(self.0 * rhs.0)
        }
    }

    impl std::ops::AddAssign for Opaque {
        fn add_assign(&mut self, rhs: Opaque) {
            self.0 += rhs.0;
        }
    }

    impl num_traits::Zero for Opaque {
        fn zero() -> Opaque {
            Opaque(0)
        }
        fn is_zero(&self) -> bool {
            self.0 == 0
        }
    }

    impl ToPrimitive for Opaque {
        fn to_i64(&self) -> Option<i64> {
            None
        }
        fn to_u64(&self) -> Option<u64> {
            None
        }
    }

    #[test]
    fn test_avg_conversion_failure() {
        let m = Matrix::from_elem(2, 2, Opaque(3));
        assert_eq!(m.sum().0, 12);
        assert_eq!(m.avg(), Err(GError::Conversion { op: "avg" }));
    }

    #[test]
    fn test_sum_row_major_order() {
        // 1e16 comes first in row-major order, so each 1.0 after it is absorbed.
        let m: Matrix<f64> = mat![[1e16, 1.0], [1.0, 1.0]];
        let expected = ((1e16f64 + 1.0) + 1.0) + 1.0;
        assert_eq!(m.sum().to_bits(), expected.to_bits());
    }

    #[test]
    fn test_half_precision() {
        let x = Matrix::from_vec(
            2,
            2,
            vec![
                f16::from_f32(1.0),
                f16::from_f32(2.0),
                f16::from_f32(3.0),
                f16::from_f32(4.0),
            ],
        )
        .unwrap();
        let y = (&x * &x.transpose()).unwrap();
        assert_eq!(y[(0, 0)], f16::from_f32(5.0));
        assert_eq!(y[(1, 1)], f16::from_f32(25.0));
        assert_eq!(x.avg(), Ok(2.5));
    }
}
