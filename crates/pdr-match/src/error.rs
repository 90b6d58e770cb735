use thiserror::Error;

#[derive(Debug, Error)]
pub enum MatchError {
    #[error("line {line}: record is {len} bytes, need at least {need}")]
    LineTooShort { line: usize, len: usize, need: usize },
    #[error("line {line}: field `{field}` is not numeric: {value:?}")]
    BadNumber {
        line: usize,
        field: &'static str,
        value: String,
    },
    #[error("line {line}: field `{field}` is not a {fmt} date: {value:?}")]
    BadDate {
        line: usize,
        field: &'static str,
        fmt: &'static str,
        value: String,
    },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("national extract: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MatchError>;
