use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("Failed processing DataFrame")]
    DataFrameProcessing(#[from] PolarsError),

    #[error("Unexpected null in column '{column}' at row {row}")]
    UnexpectedNull { column: &'static str, row: usize },
}
