use crate::shape::Shape;
use thiserror::Error;

pub type GResult<T> = Result<T, GError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GError {
    #[error("dimension mismatch in {op}: lhs {lhs}, rhs {rhs}")]
    DimensionMismatch {
        op: &'static str,
        lhs: Shape,
        rhs: Shape,
    },
    #[error("index ({row}, {col}) out of range for {shape} matrix")]
    IndexOutOfRange { row: usize, col: usize, shape: Shape },
    #[error("division by zero in {op}: matrix has no elements")]
    DivisionByZero { op: &'static str },
    #[error("source does not match {expected}: got {rows} rows{}", bad_row_msg(.bad_row))]
    SourceShape {
        expected: Shape,
        rows: usize,
        bad_row: Option<(usize, usize)>,
    },
    #[error("value in {op} is not representable as f64")]
    Conversion { op: &'static str },
}

fn bad_row_msg(bad_row: &Option<(usize, usize)>) -> String {
    match bad_row {
        Some((i, len)) => format!(", row {} has {} elements", i, len),
        None => String::new(),
    }
}

impl From<GError> for String {
    fn from(e: GError) -> Self {
        format!("{}", e)
    }
}
