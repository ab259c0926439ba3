/// Builds a [`Matrix`](crate::Matrix) from row literals.
///
/// ```
/// use dmatrix::mat;
///
/// let m = mat![[1, 2, 3], [4, 5, 6]];
/// assert_eq!(m.shape().dims2(), (2, 3));
/// ```
#[macro_export]
macro_rules! mat {
    ($([$($x:expr),* $(,)*]),+ $(,)*) => {{
        $crate::Matrix::from(vec![$([$($x,)*],)*])
    }};
}
